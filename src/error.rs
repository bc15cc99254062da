//! 统一错误处理
//!
//! 导航树构建、正文处理、配置加载和输出写入共用同一个错误类型

use thiserror::Error;

use crate::env::EnvError;

/// docnav 错误类型
#[derive(Error, Debug)]
pub enum DocnavError {
    /// 上游渲染出的片段不符合最小结构约定
    #[error("malformed fragment at {position}: {message}")]
    Structure { position: String, message: String },

    /// 配置错误
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

impl DocnavError {
    /// 创建结构错误，`position` 指向出错节点在片段中的位置
    pub fn structure(position: impl Into<String>, message: impl Into<String>) -> Self {
        DocnavError::Structure {
            position: position.into(),
            message: message.into(),
        }
    }

    /// 是否为上游渲染器的缺陷（而不是环境或配置问题）
    pub fn is_structural(&self) -> bool {
        matches!(self, DocnavError::Structure { .. })
    }
}

pub type DocnavResult<T> = Result<T, DocnavError>;
