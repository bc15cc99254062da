//! # 解析器模块
//!
//! 核心转换逻辑都在这里，全部作用于内存中的 DOM，不做任何 I/O：
//!
//! - `html` - html5ever 适配层：片段解析、DOM操作、序列化
//! - `navigation` - 侧边栏目录片段转导航树
//! - `entities` - 图片 `alt` 和行内代码的字符引用重编码
//! - `link_rewriter` - 相对链接修正和外部文档链接映射

pub mod entities;
pub mod html;
pub mod link_rewriter;
pub mod navigation;

// Re-export commonly used items for convenience
pub use entities::{
    double_escape, escape_encoded_alt_text, escape_encoded_pre_text, reencode_alt_text,
    reencode_pre_text,
};
pub use html::{fragment_root, fragment_to_dom, serialize_fragment};
pub use link_rewriter::{rewrite_hub_links, rewrite_href, rewrite_links_in_dom};
pub use navigation::{build_navigation_tree, NavLink, NavNode};
