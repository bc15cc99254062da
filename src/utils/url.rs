//! URL 和页面路径的纯函数工具
//!
//! 链接重写和导航树都只做字符串层面的路径运算，不访问文件系统。

pub use url::{ParseError, Url};

/// 是否为相对 URL（既没有 scheme，也没有网络位置）
pub fn is_relative_url(url: &str) -> bool {
    if url.starts_with("//") {
        return false;
    }
    matches!(Url::parse(url), Err(ParseError::RelativeUrlWithoutBase))
}

/// 去掉 href 开头的一个 `/` 和结尾的一个 `/`
pub fn clean_href(href: &str) -> &str {
    let href = href.strip_prefix('/').unwrap_or(href);
    href.strip_suffix('/').unwrap_or(href)
}

/// 页面路径的第一段
pub fn page_head(page_path: &str) -> &str {
    page_path
        .split_once('/')
        .map_or(page_path, |(head, _)| head)
}

/// 去掉页面名末尾的 `index` 段，得到页面的逻辑路径
///
/// `a/b/index` 变成 `a/b`，根目录的 `index` 变成空字符串。
pub fn page_path(pagename: &str) -> &str {
    if pagename == "index" {
        ""
    } else {
        pagename.strip_suffix("/index").unwrap_or(pagename)
    }
}

fn path_segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

/// 从 `from_path` 到 `to_path` 的 `../` 相对路径
///
/// 向上的层数比按目录计算的少一层：客户端路由把当前页面本身当作
/// 一层目录来解析相对链接。
pub fn relative_traversal(from_path: &str, to_path: &str) -> String {
    let from_parts = path_segments(from_path);
    let to_parts = path_segments(to_path);

    let common_length = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(f, t)| f == t)
        .count();

    let up_steps = from_parts.len().saturating_sub(common_length + 1);
    let down_path = to_parts[common_length..].join("/");

    format!("{}{}", "../".repeat(up_steps), down_path)
}
