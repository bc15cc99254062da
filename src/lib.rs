//! # docnav
//!
//! 把文档构建流水线渲染好的 HTML 转换成客户端应用可以直接使用的数据：
//! 侧边栏目录转成有序的导航树，正文里的链接按客户端路由重写，
//! 需要二次解析的字符引用重新编码。
//!
//! ## 模块组织
//!
//! - `core` - 页面处理流程、链接映射表
//! - `parsers` - 导航树构建、实体重编码、链接重写、HTML适配层
//! - `builders` - 页面上下文和序列化后端
//! - `config` - TOML 构建配置
//! - `env` - 环境变量
//! - `error` - 统一错误类型
//! - `utils` - URL 和路径工具

pub mod builders;
pub mod config;
pub mod core;
pub mod env;
pub mod error;
pub mod parsers;
pub mod utils;

// Re-export commonly used items for convenience
pub use builders::{ContextBuilder, GlobalContext, JsonBuilder, PageContext};
pub use config::BuildConfig;
pub use core::{
    convert_nav_html_to_json, page_output_name, process_body, target_uri, LinkMapping,
    LinkMappings, PageProcessor,
};
pub use error::{DocnavError, DocnavResult};
pub use parsers::{NavLink, NavNode};
