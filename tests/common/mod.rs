// 集成测试公共模块
//
// 提供渲染好的侧边栏和正文片段

/// 一个 caption 包住一个列表：先是带两个子链接的分组，再是一个普通链接
pub const GUIDES_NAV: &str = r#"<p class="caption" role="heading"><span class="caption-text">Guides</span></p>
<ul class="current">
<li class="toctree-l1 current"><a class="reference internal" href="/guides/install/">Installing</a><ul>
<li class="toctree-l2"><a class="reference internal" href="/guides/install/linux/">Linux</a></li>
<li class="toctree-l2"><a class="reference internal" href="/guides/install/windows/">Windows</a></li>
</ul>
</li>
<li class="toctree-l1"><a class="reference internal" href="/guides/usage/">Usage</a></li>
</ul>
"#;

/// 无标题列表后跟一个带标题的列表
pub const MIXED_NAV: &str = r#"<ul>
<li class="toctree-l1"><a class="reference internal" href="/">Home</a></li>
</ul>
<p class="caption"><span class="caption-text">Reference</span></p>
<ul>
<li class="toctree-l1"><a class="reference internal" href="/ref/cli/">CLI</a></li>
<li class="toctree-l1"><span>Formats</span><ul>
<li class="toctree-l2"><a class="reference internal" href="/ref/formats/json/">JSON</a></li>
</ul>
</li>
</ul>
"#;

/// 需要改写的正文：跨目录相对链接、外部文档链接、代码、图片说明
pub const INSTALL_BODY: &str = r##"<section id="installing">
<h1>Installing</h1>
<p>See <a class="reference internal" href="guides/usage.html">usage</a>, the <a class="reference external" href="https://hub.example.org/sdk/index.html">SDK</a> and <a class="reference internal" href="#requirements">requirements</a>.</p>
<p>Run <code class="docutils literal notranslate"><span class="pre">make</span> <span class="pre">a&amp;b</span></code>.</p>
<img alt="x &lt; y" src="_images/plot.png">
</section>"##;

pub const HUB_CONFIG: &str = r#"
project_name = "handbook"

[[link_mappings]]
prefix = "https://hub.example.org/sdk/"
root = "sdk"
"#;
