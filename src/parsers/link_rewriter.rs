//! 链接重写模块
//!
//! 页面从静态站点目录结构搬到客户端路由之后，正文里的链接要做两步处理：
//!
//! 1. 修正相对链接：页面的基础路径变了，原先的相对链接按新的位置重算
//! 2. 映射外部文档链接：命中映射表前缀的链接改写为 `/library/{root}/...`
//!
//! 第一步必须在第二步之前，映射产生的路径不再做相对修正。

use markup5ever_rcdom::{Handle, NodeData};
use tracing::{debug, trace};

use crate::core::LinkMappings;
use crate::error::DocnavResult;
use crate::parsers::html::{
    fragment_root, fragment_to_dom, get_node_attr, serialize_fragment, set_node_attr,
};
use crate::utils::url::{is_relative_url, page_head, relative_traversal};

/// 重写 DOM 中所有 `a` 的链接，返回是否有修改
///
/// # Arguments
///
/// * `node` - 片段根节点
/// * `page_filename` - 当前页面的逻辑路径，例如 `guides/install`
/// * `link_mappings` - 外部链接映射表
pub fn rewrite_links_in_dom(
    node: &Handle,
    page_filename: &str,
    link_mappings: &LinkMappings,
) -> bool {
    trace!("rewriting links for page {:?}", page_filename);
    walk_and_rewrite_links(node, page_filename, link_mappings)
}

/// 重写HTML字符串中的链接
///
/// 没有任何链接变化时原样返回输入，不重新序列化。
pub fn rewrite_hub_links(
    html: &str,
    link_mappings: &LinkMappings,
    page_filename: &str,
) -> DocnavResult<String> {
    let dom = fragment_to_dom(html.as_bytes(), "utf-8");

    if rewrite_links_in_dom(&fragment_root(&dom), page_filename, link_mappings) {
        serialize_fragment(&dom)
    } else {
        Ok(html.to_string())
    }
}

/// 递归遍历DOM树并重写链接
fn walk_and_rewrite_links(node: &Handle, page_filename: &str, link_mappings: &LinkMappings) -> bool {
    let mut edited = false;

    match node.data {
        NodeData::Document => {
            for child_node in node.children.borrow().iter() {
                edited |= walk_and_rewrite_links(child_node, page_filename, link_mappings);
            }
        }
        NodeData::Element { ref name, .. } => {
            if name.local.as_ref() == "a" {
                edited |= rewrite_anchor_link(node, page_filename, link_mappings);
            }

            for child_node in node.children.borrow().iter() {
                edited |= walk_and_rewrite_links(child_node, page_filename, link_mappings);
            }
        }
        _ => {}
    }

    edited
}

/// 重写锚点链接的href属性
fn rewrite_anchor_link(node: &Handle, page_filename: &str, link_mappings: &LinkMappings) -> bool {
    if let Some(href_value) = get_node_attr(node, "href") {
        if let Some(rewritten_href) = rewrite_href(&href_value, page_filename, link_mappings) {
            debug!("rewriting link {:?} -> {:?}", href_value, rewritten_href);
            set_node_attr(node, "href", Some(rewritten_href));
            return true;
        }
    }
    false
}

/// 依次做相对链接修正和映射替换，结果与原值不同时返回新值
pub fn rewrite_href(href: &str, page_filename: &str, link_mappings: &LinkMappings) -> Option<String> {
    let relative = normalize_relative_link(href, page_filename);
    let current = relative.as_deref().unwrap_or(href);

    let rewritten = apply_link_mappings(current, link_mappings).or(relative)?;
    (rewritten != href).then_some(rewritten)
}

/// 判断相对链接修正是否应该跳过
fn should_skip_link(href: &str) -> bool {
    // 空链接、锚点、根路径以及带 scheme 或主机名的链接都不动
    href.is_empty() || href.starts_with('#') || href.starts_with('/') || !is_relative_url(href)
}

/// 相对链接修正
///
/// 页面在顶层时不需要修正。链接以页面首段开头时去掉首段，
/// 否则（且不是 `../` 开头）按公共前缀计算新的相对路径。
pub fn normalize_relative_link(href: &str, page_filename: &str) -> Option<String> {
    let head = page_head(page_filename);
    if head == page_filename {
        trace!("no relative link adjustment needed for {:?}", href);
        return None;
    }

    if should_skip_link(href) {
        return None;
    }

    if let Some(rest) = href
        .strip_prefix(head)
        .and_then(|rest| rest.strip_prefix('/'))
    {
        return Some(rest.to_string());
    }

    if href.starts_with("../") {
        return None;
    }

    let new_path = relative_traversal(page_filename, href);
    if new_path != href {
        Some(new_path)
    } else {
        trace!("relative link {:?} unchanged", href);
        None
    }
}

/// 映射替换
///
/// 第一个前缀命中的条目生效：去掉前缀和所有 `.html`，单独的 `index`
/// 换成根名，去掉结尾的 `/index`，拼成 `/library/{root}/{remainder}`。
pub fn apply_link_mappings(href: &str, link_mappings: &LinkMappings) -> Option<String> {
    let mapping = link_mappings.find(href)?;

    let remainder = href[mapping.prefix.len()..].replace(".html", "");
    let remainder = if remainder == "index" {
        mapping.root.clone()
    } else {
        remainder
    };
    let remainder = remainder.strip_suffix("/index").unwrap_or(&remainder);
    let remainder = remainder.strip_prefix('/').unwrap_or(remainder);

    Some(format!("/library/{}/{}", mapping.root, remainder))
}
