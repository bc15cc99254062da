use encoding_rs::Encoding;
use html5ever::parse_document;
use html5ever::tendril::{StrTendril, TendrilSink};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::utils::WHITESPACES;

/// 按给定编码把 HTML 字节解码为字符串，未知编码按 UTF-8 宽松解码
pub fn decode_html(data: &[u8], document_encoding: &str) -> String {
    if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
        let (string, _, _) = encoding.decode(data);
        string.into_owned()
    } else {
        String::from_utf8_lossy(data).into_owned()
    }
}

/// 将 HTML 片段字节转换为 DOM
///
/// 片段被包进一个最小的文档骨架里解析，这样所有节点都落在 `<body>` 下，
/// 不会被解析器挪进 `<head>`。用 [`fragment_root`] 取回片段的根。
pub fn fragment_to_dom(data: &[u8], document_encoding: &str) -> RcDom {
    let wrapped = format!(
        "<html><head></head><body>{}</body></html>",
        decode_html(data, document_encoding)
    );

    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .one(wrapped.as_bytes())
}

/// 片段的根节点（即合成出来的 `<body>`）
pub fn fragment_root(dom: &RcDom) -> Handle {
    find_nodes(&dom.document, vec!["html", "body"])
        .into_iter()
        .next()
        .unwrap_or_else(|| dom.document.clone())
}

/// 查找指定路径的DOM节点
pub fn find_nodes(node: &Handle, node_names: Vec<&str>) -> Vec<Handle> {
    if node_names.is_empty() {
        return Vec::new();
    }

    let mut found_nodes = Vec::new();
    let node_name = node_names[0];

    if node_names.len() == 1 {
        if get_node_name(node) == Some(node_name) {
            found_nodes.push(node.clone());
        }

        for child_node in node.children.borrow().iter() {
            found_nodes.append(&mut find_nodes(child_node, node_names.clone()));
        }
    } else if get_node_name(node) == Some(node_name) {
        let mut new_node_names = node_names;
        new_node_names.remove(0);
        for child_node in node.children.borrow().iter() {
            found_nodes.append(&mut find_nodes(child_node, new_node_names.clone()));
        }
    } else {
        for child_node in node.children.borrow().iter() {
            found_nodes.append(&mut find_nodes(child_node, node_names.clone()));
        }
    }

    found_nodes
}

/// 第一个名称匹配的后代元素（不含节点自身），深度优先
pub fn find_first_descendant(node: &Handle, node_name: &str) -> Option<Handle> {
    for child_node in node.children.borrow().iter() {
        if get_node_name(child_node) == Some(node_name) {
            return Some(child_node.clone());
        }
        if let Some(found) = find_first_descendant(child_node, node_name) {
            return Some(found);
        }
    }
    None
}

/// 所有元素子节点，按文档顺序
pub fn element_children(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// `class` 属性中是否含有给定的类名
pub fn has_class(node: &Handle, class_name: &str) -> bool {
    get_node_attr(node, "class")
        .map(|classes| classes.split(WHITESPACES).any(|c| c == class_name))
        .unwrap_or(false)
}

/// 设置节点属性
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<String>) {
    use html5ever::interface::{Attribute, QualName};
    use html5ever::tendril::format_tendril;
    use html5ever::{namespace_url, ns, LocalName};

    if let NodeData::Element { attrs, .. } = &node.data {
        let attrs_mut = &mut attrs.borrow_mut();

        match attr_value {
            Some(attr_value) => {
                if let Some(attr) = attrs_mut
                    .iter_mut()
                    .find(|attr| &*attr.name.local == attr_name)
                {
                    attr.value.clear();
                    attr.value.push_slice(attr_value.as_str());
                } else {
                    // Add new attribute (since originally the target node didn't have it)
                    attrs_mut.push(Attribute {
                        name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                        value: format_tendril!("{}", attr_value),
                    });
                }
            }
            // Remove attr completely if attr_value is not defined
            None => attrs_mut.retain(|attr| &*attr.name.local != attr_name),
        }
    };
}

/// 拼接所有后代文本节点
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: &Handle, text: &mut String) {
    match &node.data {
        NodeData::Text { contents } => text.push_str(&contents.borrow()),
        _ => {
            for child_node in node.children.borrow().iter() {
                collect_text(child_node, text);
            }
        }
    }
}

/// 元素的唯一文本内容
///
/// 元素只有一个子节点时：文本节点直接返回，元素节点继续向下找。
/// 混合内容或空元素返回 `None`。
pub fn single_text_node(node: &Handle) -> Option<Handle> {
    let children = node.children.borrow();
    if children.len() != 1 {
        return None;
    }

    let child = &children[0];
    match child.data {
        NodeData::Text { .. } => Some(child.clone()),
        NodeData::Element { .. } => single_text_node(child),
        _ => None,
    }
}

/// 替换文本节点内容，非文本节点不做任何事
pub fn set_text(node: &Handle, value: &str) {
    if let NodeData::Text { contents } = &node.data {
        *contents.borrow_mut() = StrTendril::from_slice(value);
    }
}
