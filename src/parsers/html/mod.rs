//! HTML解析和处理模块
//!
//! 这个模块把 html5ever 包装成核心逻辑需要的最小能力：
//!
//! - `dom`: 片段解析和基础DOM操作
//! - `serializer`: 片段序列化
//! - `utils`: 转义和空白处理

pub mod dom;
pub mod serializer;
pub mod utils;

pub use dom::{
    decode_html, element_children, find_first_descendant, find_nodes, fragment_root, fragment_to_dom,
    get_node_attr, get_node_name, has_class, set_node_attr, set_text, single_text_node,
    text_content,
};
pub use serializer::serialize_fragment;
pub use utils::{escape_html, trim_whitespace, WHITESPACES};
