use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::builders::{GlobalContext, PageContext};
use crate::config::BuildConfig;
use crate::error::DocnavResult;
use crate::parsers::html::{decode_html, fragment_root, fragment_to_dom, serialize_fragment};
use crate::parsers::{
    build_navigation_tree, reencode_alt_text, reencode_pre_text, rewrite_links_in_dom, NavNode,
};
use crate::utils::url::page_path;

/// 外部链接映射表中的一项：以 `prefix` 开头的链接改写到 `/library/{root}/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMapping {
    pub prefix: String,
    pub root: String,
}

/// 有序的外部链接映射表
///
/// 按声明顺序匹配，第一个前缀命中的条目生效。整个构建期间只读，
/// 可以在并行渲染的页面之间共享。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkMappings(Vec<LinkMapping>);

impl LinkMappings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, prefix: impl Into<String>, root: impl Into<String>) {
        self.0.push(LinkMapping {
            prefix: prefix.into(),
            root: root.into(),
        });
    }

    /// 第一个前缀是 `href` 前缀的条目
    pub fn find(&self, href: &str) -> Option<&LinkMapping> {
        self.0.iter().find(|mapping| href.starts_with(&mapping.prefix))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkMapping> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<P: Into<String>, R: Into<String>> FromIterator<(P, R)> for LinkMappings {
    fn from_iter<I: IntoIterator<Item = (P, R)>>(iter: I) -> Self {
        let mut mappings = LinkMappings::new();
        for (prefix, root) in iter {
            mappings.push(prefix, root);
        }
        mappings
    }
}

/// Parses a rendered sidebar fragment into the navigation tree
pub fn convert_nav_html_to_json(html: &str) -> DocnavResult<Vec<NavNode>> {
    let dom = fragment_to_dom(html.as_bytes(), "utf-8");
    build_navigation_tree(&fragment_root(&dom))
}

/// Runs every body pass over one parse of `html`
///
/// Order: image `alt` re-encoding, code text re-encoding, link rewriting.
/// The fragment is serialized only if a pass changed something; otherwise
/// the input is returned as-is.
pub fn process_body(
    html: &str,
    page_filename: &str,
    link_mappings: &LinkMappings,
) -> DocnavResult<String> {
    let dom = fragment_to_dom(html.as_bytes(), "utf-8");
    let root = fragment_root(&dom);

    let mut edited = reencode_alt_text(&root);
    edited |= reencode_pre_text(&root);
    edited |= rewrite_links_in_dom(&root, page_filename, link_mappings);

    if edited {
        debug!("body of {:?} changed, re-serializing", page_filename);
        serialize_fragment(&dom)
    } else {
        trace!("body of {:?} unchanged", page_filename);
        Ok(html.to_string())
    }
}

/// Target URI of a document as seen by the client-side router
pub fn target_uri(docname: &str) -> String {
    if docname == "index" {
        return String::new();
    }
    match docname.strip_suffix("/index") {
        Some(directory) => format!("{}/", directory),
        None => docname.to_string(),
    }
}

/// Name a page is written under
///
/// `index` pages are stored under their directory's name, and the root
/// `index` under the project name.
pub fn page_output_name(pagename: &str, project_name: &str) -> String {
    match page_path(pagename) {
        "" => project_name.to_string(),
        path => path.to_string(),
    }
}

/// 页面处理器，负责协调单个页面的处理流程
pub struct PageProcessor<'a> {
    config: &'a BuildConfig,
}

impl<'a> PageProcessor<'a> {
    pub fn new(config: &'a BuildConfig) -> Self {
        Self { config }
    }

    /// 处理一个页面的导航片段和正文，得到可序列化的页面上下文
    pub fn process_page(
        &self,
        pagename: &str,
        nav_html: &str,
        body_html: &str,
    ) -> DocnavResult<PageContext> {
        // 1. 导航树
        let toctree = convert_nav_html_to_json(nav_html)?;

        // 2. 正文：重编码和链接重写
        let body = process_body(body_html, page_path(pagename), &self.config.link_mappings)?;

        // 3. 组装上下文
        let mut context = PageContext::new(page_output_name(pagename, &self.config.project_name));
        context.toctree = toctree;
        context.body = body;

        Ok(context)
    }

    /// 与 [`Self::process_page`] 相同，输入是按配置编码的原始字节
    pub fn process_page_bytes(
        &self,
        pagename: &str,
        nav_data: &[u8],
        body_data: &[u8],
    ) -> DocnavResult<PageContext> {
        let nav_html = decode_html(nav_data, &self.config.encoding);
        let body_html = decode_html(body_data, &self.config.encoding);
        self.process_page(pagename, &nav_html, &body_html)
    }

    /// 汇总整个构建的全局上下文
    pub fn global_context<'p>(
        &self,
        pagenames: impl IntoIterator<Item = &'p str>,
    ) -> GlobalContext {
        GlobalContext {
            project_name: self.config.project_name.clone(),
            target_uris: pagenames
                .into_iter()
                .map(|pagename| (pagename.to_string(), target_uri(pagename)))
                .collect(),
        }
    }
}
