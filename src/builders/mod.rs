//! # 构建器模块
//!
//! 页面上下文和输出格式的构建器：
//!
//! - `PageContext` - 单个页面的可序列化上下文（`toctree`、`body` 等）
//! - `GlobalContext` - 整个构建共用的上下文
//! - `ContextBuilder` - 序列化后端的统一接口
//! - `json_builder` - JSON 输出

pub mod json_builder;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::DocnavResult;
use crate::parsers::NavNode;

// Re-export commonly used items for convenience
pub use json_builder::JsonBuilder;

/// 单个页面的上下文，交给序列化后端写盘
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageContext {
    pub current_page_name: String,
    pub toctree: Vec<NavNode>,
    pub body: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub css_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub script_files: Vec<String>,
    /// 宿主流水线透传的其他键
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PageContext {
    pub fn new(current_page_name: impl Into<String>) -> Self {
        Self {
            current_page_name: current_page_name.into(),
            ..Default::default()
        }
    }

    /// 添加透传键；与固定字段同名的键会被忽略
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        if !matches!(
            key.as_str(),
            "current_page_name" | "toctree" | "body" | "css_files" | "script_files"
        ) {
            self.extra.insert(key, value.into());
        }
        self
    }
}

/// 构建结束时写出的全局上下文
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalContext {
    pub project_name: String,
    /// 页面名到客户端路由地址的映射
    pub target_uris: BTreeMap<String, String>,
}

/// 序列化后端
pub trait ContextBuilder {
    /// 页面文件的扩展名，例如 `.json`
    const OUT_SUFFIX: &'static str;
    /// 全局上下文的文件名
    const GLOBAL_CONTEXT_FILENAME: &'static str;

    fn outdir(&self) -> &Path;

    /// 把任意可序列化的值写到 `filename`
    fn dump_context<T: Serialize>(&self, context: &T, filename: &Path) -> DocnavResult<()>;

    /// 页面文件的完整路径
    fn page_path(&self, context: &PageContext) -> PathBuf {
        let mut path = self.outdir().to_path_buf();
        for segment in context.current_page_name.split('/') {
            path.push(segment);
        }
        let mut filename = path.into_os_string();
        filename.push(Self::OUT_SUFFIX);
        PathBuf::from(filename)
    }

    /// 写入单个页面，返回写入的路径
    fn write_page(&self, context: &PageContext) -> DocnavResult<PathBuf> {
        let filename = self.page_path(context);
        self.dump_context(context, &filename)?;
        Ok(filename)
    }

    /// 写入全局上下文，返回写入的路径
    fn write_global_context<T: Serialize>(&self, context: &T) -> DocnavResult<PathBuf> {
        let filename = self.outdir().join(Self::GLOBAL_CONTEXT_FILENAME);
        self.dump_context(context, &filename)?;
        Ok(filename)
    }
}
