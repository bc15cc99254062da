//! 导航树构建模块
//!
//! 把渲染好的侧边栏目录片段（`p.caption` 标题和 `ul` 列表交替出现）
//! 转换成客户端使用的有序导航节点序列。
//!
//! 规则：
//!
//! - `p.caption` 之后的第一个 `ul` 整体包进 `section-group`
//! - 没有标题的 `ul` 直接展开到外层序列
//! - 含有子列表的 `li` 变成 `expandable-link-group`（父项有链接）或
//!   `section`（父项没有链接），子列表只取一层
//! - 分组前如果已有内容插入一个 `divider`；分组之后的普通链接前再插入一个

use markup5ever_rcdom::{Handle, NodeData};
use serde::Serialize;
use tracing::trace;

use crate::error::{DocnavError, DocnavResult};
use crate::parsers::html::{
    element_children, find_first_descendant, get_node_attr, get_node_name, has_class,
    text_content, trim_whitespace,
};
use crate::utils::url::clean_href;

/// 导航节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NavNode {
    Link {
        text: String,
        href: String,
    },
    /// 父项没有自己的链接的子列表
    Section {
        text: String,
        items: Vec<NavLink>,
    },
    /// 父项本身也是链接的子列表
    ExpandableLinkGroup {
        text: String,
        href: String,
        items: Vec<NavLink>,
    },
    /// 一个 caption 标题下的全部内容
    SectionGroup {
        title: String,
        items: Vec<NavNode>,
    },
    Divider,
}

/// 分组内的单个链接，序列化形式与 [`NavNode::Link`] 相同
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "link")]
pub struct NavLink {
    pub text: String,
    pub href: String,
}

impl NavLink {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        NavLink {
            text: text.into(),
            href: href.into(),
        }
    }
}

impl From<NavLink> for NavNode {
    fn from(link: NavLink) -> Self {
        NavNode::Link {
            text: link.text,
            href: link.href,
        }
    }
}

/// 从侧边栏片段的根节点构建导航树
///
/// 只看根节点的直接子元素。没有后续列表的 caption 被丢弃。
///
/// # Errors
///
/// 列表项缺少链接、caption 缺少标题元素时返回 [`DocnavError::Structure`]，
/// 其中的位置形如 `ul[2]/li[3]/ul/li[1]`。
pub fn build_navigation_tree(root: &Handle) -> DocnavResult<Vec<NavNode>> {
    let mut result = Vec::new();
    let mut caption: Option<String> = None;
    let mut p_index = 0;
    let mut ul_index = 0;

    for child in element_children(root) {
        match get_node_name(&child) {
            Some("p") => {
                p_index += 1;
                if has_class(&child, "caption") {
                    let title = caption_title(&child, &format!("p[{}]", p_index))?;
                    if let Some(dropped) = caption.replace(title) {
                        trace!("caption {:?} has no list, dropping it", dropped);
                    }
                }
            }
            Some("ul") => {
                ul_index += 1;
                let position = format!("ul[{}]", ul_index);
                match caption.take() {
                    Some(title) => {
                        let mut items = Vec::new();
                        process_list(&mut items, &child, &position)?;
                        result.push(NavNode::SectionGroup { title, items });
                    }
                    None => process_list(&mut result, &child, &position)?,
                }
            }
            _ => {}
        }
    }

    if let Some(dropped) = caption {
        trace!("caption {:?} has no list, dropping it", dropped);
    }

    Ok(result)
}

fn caption_title(caption: &Handle, position: &str) -> DocnavResult<String> {
    element_children(caption)
        .first()
        .map(|title| trim_whitespace(&text_content(title)).to_string())
        .ok_or_else(|| DocnavError::structure(position, "caption has no title element"))
}

/// 把一个 `ul` 的条目追加到 `result`
///
/// 待插入的分隔符只在当前列表内有效。
fn process_list(result: &mut Vec<NavNode>, ul: &Handle, position: &str) -> DocnavResult<()> {
    let mut pending_divider = false;

    for (index, item) in list_items(ul).iter().enumerate() {
        let position = format!("{}/li[{}]", position, index + 1);

        match nested_list(item) {
            Some(sub_list) => {
                if !result.is_empty() {
                    result.push(NavNode::Divider);
                }
                result.push(group_node(item, &sub_list, &position)?);
                pending_divider = true;
            }
            None => {
                if pending_divider {
                    result.push(NavNode::Divider);
                    pending_divider = false;
                }
                result.push(item_link(item, &position)?.into());
            }
        }
    }

    Ok(())
}

fn list_items(ul: &Handle) -> Vec<Handle> {
    element_children(ul)
        .into_iter()
        .filter(|child| get_node_name(child) == Some("li"))
        .collect()
}

/// 条目内的第一个子列表；没有 `li` 的空列表视为不存在
fn nested_list(item: &Handle) -> Option<Handle> {
    find_first_descendant(item, "ul").filter(|ul| !list_items(ul).is_empty())
}

/// 列表项的链接：第一个子元素必须是带 `href` 的 `a`
fn item_link(item: &Handle, position: &str) -> DocnavResult<NavLink> {
    let anchor = element_children(item)
        .into_iter()
        .next()
        .filter(|child| get_node_name(child) == Some("a"))
        .ok_or_else(|| DocnavError::structure(position, "list item has no leading anchor"))?;

    let href = get_node_attr(&anchor, "href")
        .ok_or_else(|| DocnavError::structure(position, "anchor has no href"))?;

    Ok(NavLink::new(
        trim_whitespace(&text_content(&anchor)),
        clean_href(&href),
    ))
}

fn group_node(item: &Handle, sub_list: &Handle, position: &str) -> DocnavResult<NavNode> {
    let mut items = Vec::new();
    for (index, sub_item) in list_items(sub_list).iter().enumerate() {
        let position = format!("{}/ul/li[{}]", position, index + 1);
        items.push(item_link(sub_item, &position)?);
    }

    let parent = element_children(item)
        .into_iter()
        .find(|child| get_node_name(child) != Some("ul"));

    match parent {
        Some(parent) => {
            let text = trim_whitespace(&text_content(&parent)).to_string();
            let href = if get_node_name(&parent) == Some("a") {
                get_node_attr(&parent, "href")
            } else {
                None
            };

            Ok(match href {
                Some(href) => NavNode::ExpandableLinkGroup {
                    text,
                    href: clean_href(&href).to_string(),
                    items,
                },
                None => NavNode::Section { text, items },
            })
        }
        None => leading_text(item)
            .map(|text| NavNode::Section { text, items })
            .ok_or_else(|| DocnavError::structure(position, "group item has no title")),
    }
}

/// 条目开头的非空白文本
fn leading_text(item: &Handle) -> Option<String> {
    item.children.borrow().iter().find_map(|child| match &child.data {
        NodeData::Text { contents } => {
            let text = trim_whitespace(&contents.borrow()).to_string();
            (!text.is_empty()).then_some(text)
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::{fragment_root, fragment_to_dom};

    fn build(html: &str) -> DocnavResult<Vec<NavNode>> {
        let dom = fragment_to_dom(html.as_bytes(), "utf-8");
        build_navigation_tree(&fragment_root(&dom))
    }

    fn link(text: &str, href: &str) -> NavNode {
        NavLink::new(text, href).into()
    }

    #[test]
    fn test_flat_links() {
        let tree = build(
            r#"<ul>
<li class="toctree-l1"><a class="reference internal" href="/intro/">Intro</a></li>
<li class="toctree-l1"><a class="reference internal" href="usage">Usage</a></li>
</ul>"#,
        )
        .unwrap();

        assert_eq!(tree, vec![link("Intro", "intro"), link("Usage", "usage")]);
    }

    #[test]
    fn test_group_between_links() {
        let tree = build(
            r#"<ul>
<li><a href="a">A</a></li>
<li><a href="b">B</a><ul><li><a href="b/1">B1</a></li></ul></li>
<li><a href="c">C</a></li>
</ul>"#,
        )
        .unwrap();

        assert_eq!(
            tree,
            vec![
                link("A", "a"),
                NavNode::Divider,
                NavNode::ExpandableLinkGroup {
                    text: "B".to_string(),
                    href: "b".to_string(),
                    items: vec![NavLink::new("B1", "b/1")],
                },
                NavNode::Divider,
                link("C", "c"),
            ]
        );
    }

    #[test]
    fn test_group_first_and_last_has_no_outer_dividers() {
        let tree = build(r#"<ul><li><a href="b">B</a><ul><li><a href="b/1">B1</a></li></ul></li></ul>"#)
            .unwrap();

        assert_eq!(tree.len(), 1);
        assert!(!tree.contains(&NavNode::Divider));
    }

    #[test]
    fn test_consecutive_groups_share_one_divider() {
        let tree = build(
            r#"<ul>
<li><a href="a">A</a><ul><li><a href="a/1">A1</a></li></ul></li>
<li><a href="b">B</a><ul><li><a href="b/1">B1</a></li></ul></li>
</ul>"#,
        )
        .unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree[1], NavNode::Divider);
    }

    #[test]
    fn test_section_without_own_link() {
        let tree = build(
            r#"<ul><li><span>Reference</span><ul><li><a href="/ref/api/">API</a></li></ul></li></ul>"#,
        )
        .unwrap();

        assert_eq!(
            tree,
            vec![NavNode::Section {
                text: "Reference".to_string(),
                items: vec![NavLink::new("API", "ref/api")],
            }]
        );
    }

    #[test]
    fn test_section_titled_by_text() {
        let tree = build(r#"<ul><li>Topics<ul><li><a href="t">T</a></li></ul></li></ul>"#).unwrap();

        assert_eq!(
            tree,
            vec![NavNode::Section {
                text: "Topics".to_string(),
                items: vec![NavLink::new("T", "t")],
            }]
        );
    }

    #[test]
    fn test_empty_nested_list_is_a_link() {
        let tree = build(r#"<ul><li><a href="a">A</a><ul></ul></li></ul>"#).unwrap();
        assert_eq!(tree, vec![link("A", "a")]);
    }

    #[test]
    fn test_sub_sections_are_one_level_deep() {
        let tree = build(
            r#"<ul><li><a href="a">A</a><ul>
<li><a href="a/1">A1</a><ul><li><a href="a/1/x">X</a></li></ul></li>
</ul></li></ul>"#,
        )
        .unwrap();

        assert_eq!(
            tree,
            vec![NavNode::ExpandableLinkGroup {
                text: "A".to_string(),
                href: "a".to_string(),
                items: vec![NavLink::new("A1", "a/1")],
            }]
        );
    }

    #[test]
    fn test_caption_without_list_is_dropped() {
        let tree = build(
            r#"<ul><li><a href="a">A</a></li></ul>
<p class="caption"><span class="caption-text">Orphan</span></p>"#,
        )
        .unwrap();

        assert_eq!(tree, vec![link("A", "a")]);
    }

    #[test]
    fn test_pending_divider_does_not_cross_lists() {
        let tree = build(
            r#"<ul><li><a href="a">A</a><ul><li><a href="a/1">A1</a></li></ul></li></ul>
<ul><li><a href="b">B</a></li></ul>"#,
        )
        .unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[1], link("B", "b"));
    }

    #[test]
    fn test_item_without_anchor_fails() {
        let error = build(r#"<ul><li><a href="a">A</a></li><li><span>B</span></li></ul>"#)
            .unwrap_err();

        match error {
            DocnavError::Structure { position, .. } => assert_eq!(position, "ul[1]/li[2]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sub_item_without_anchor_fails() {
        let error = build(r#"<ul><li><a href="a">A</a><ul><li>bare</li></ul></li></ul>"#)
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "malformed fragment at ul[1]/li[1]/ul/li[1]: list item has no leading anchor"
        );
    }

    #[test]
    fn test_caption_without_title_fails() {
        let error = build(r#"<p class="caption">Guides</p><ul></ul>"#).unwrap_err();
        assert!(error.is_structural());
    }

    #[test]
    fn test_json_shape() {
        let tree = vec![
            NavNode::SectionGroup {
                title: "Guides".to_string(),
                items: vec![
                    NavNode::Section {
                        text: "S".to_string(),
                        items: vec![NavLink::new("L", "l")],
                    },
                    NavNode::Divider,
                ],
            },
        ];

        assert_eq!(
            serde_json::to_string(&tree).unwrap(),
            r#"[{"type":"section-group","title":"Guides","items":[{"type":"section","text":"S","items":[{"type":"link","text":"L","href":"l"}]},{"type":"divider"}]}]"#
        );
    }
}
