//! # 工具模块
//!
//! - `url` - URL判断、href清理、相对路径计算

pub mod url;

// Re-export commonly used items for convenience
pub use url::{clean_href, is_relative_url, page_head, page_path, relative_traversal, Url};
