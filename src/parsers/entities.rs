//! 实体重编码模块
//!
//! 解析后的 DOM 已经像浏览器一样把 `&lt;` 之类的字符引用解码过一次。
//! 正文会被放进 JSON 字符串，客户端再把它当 HTML 解析一次，于是图片
//! `alt` 和行内代码里的字符引用会被多解码一层。这里对这些位置的文本
//! 先转义一次，结果含有 `&` 时再转义一次写回；不含 `&` 的文本保持原样。

use std::rc::Rc;

use markup5ever_rcdom::Handle;
use tracing::debug;

use crate::error::DocnavResult;
use crate::parsers::html::{
    escape_html, find_nodes, fragment_root, fragment_to_dom, get_node_attr, has_class,
    serialize_fragment, set_node_attr, set_text, single_text_node, text_content,
};

/// 需要时返回两次转义后的文本
///
/// 第一次转义后不含 `&` 说明原文没有需要保护的字符，返回 `None`。
pub fn double_escape(original: &str) -> Option<String> {
    let interim = escape_html(original);
    if interim.contains('&') {
        Some(escape_html(&interim))
    } else {
        None
    }
}

/// 重编码所有 `img` 的 `alt` 属性，返回是否有修改
///
/// 没有 `alt` 或 `alt` 为空的图片跳过。
pub fn reencode_alt_text(root: &Handle) -> bool {
    let mut edited = false;

    for img in find_nodes(root, vec!["img"]) {
        if let Some(alt) = get_node_attr(&img, "alt") {
            if alt.is_empty() {
                continue;
            }
            if let Some(escaped) = double_escape(&alt) {
                debug!("re-encoding img alt {:?}", alt);
                set_node_attr(&img, "alt", Some(escaped));
                edited = true;
            }
        }
    }

    edited
}

/// 重编码行内代码文本，返回是否有修改
///
/// 目标是 `span.pre` 和 `pre` 内的所有 `span`；同一节点只处理一次。
/// 只处理内容是单一文本的元素。
pub fn reencode_pre_text(root: &Handle) -> bool {
    let mut targets: Vec<Handle> = find_nodes(root, vec!["span"])
        .into_iter()
        .filter(|span| has_class(span, "pre"))
        .collect();

    for span in find_nodes(root, vec!["pre", "span"]) {
        if !targets.iter().any(|target| Rc::ptr_eq(target, &span)) {
            targets.push(span);
        }
    }

    let mut edited = false;

    for target in targets {
        if let Some(text_node) = single_text_node(&target) {
            let content = text_content(&text_node);
            if let Some(escaped) = double_escape(&content) {
                debug!("re-encoding code text {:?}", content);
                set_text(&text_node, &escaped);
                edited = true;
            }
        }
    }

    edited
}

/// 对 HTML 字符串重编码图片 `alt`，没有修改时原样返回
pub fn escape_encoded_alt_text(html: &str) -> DocnavResult<String> {
    let dom = fragment_to_dom(html.as_bytes(), "utf-8");
    if reencode_alt_text(&fragment_root(&dom)) {
        serialize_fragment(&dom)
    } else {
        Ok(html.to_string())
    }
}

/// 对 HTML 字符串重编码行内代码文本，没有修改时原样返回
pub fn escape_encoded_pre_text(html: &str) -> DocnavResult<String> {
    let dom = fragment_to_dom(html.as_bytes(), "utf-8");
    if reencode_pre_text(&fragment_root(&dom)) {
        serialize_fragment(&dom)
    } else {
        Ok(html.to_string())
    }
}
