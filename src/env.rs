//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量读取，CLI 用它来覆盖配置文件中的值

use std::env;
use std::fmt;
use std::path::PathBuf;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "DOCNAV_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                level @ ("trace" | "debug" | "info" | "warn" | "error") => Ok(level.to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 遵循标准：任何非空值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }
}

/// 构建相关环境变量
pub mod build {
    use super::*;

    /// 配置文件路径
    pub struct ConfigPath;
    impl EnvVar<PathBuf> for ConfigPath {
        const NAME: &'static str = "DOCNAV_CONFIG";
        const DEFAULT: Option<PathBuf> = None;
        const DESCRIPTION: &'static str = "Path to the TOML build configuration";

        fn parse(value: &str) -> EnvResult<PathBuf> {
            parse_path(value, Self::NAME)
        }
    }

    /// 输出目录
    pub struct OutDir;
    impl EnvVar<PathBuf> for OutDir {
        const NAME: &'static str = "DOCNAV_OUTDIR";
        const DEFAULT: Option<PathBuf> = None;
        const DESCRIPTION: &'static str = "Directory the page contexts are written to";

        fn parse(value: &str) -> EnvResult<PathBuf> {
            parse_path(value, Self::NAME)
        }
    }
}

fn parse_path(value: &str, var_name: &str) -> EnvResult<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: "Path must not be empty".to_string(),
        });
    }
    Ok(PathBuf::from(trimmed))
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub log_level: String,
    pub no_color: bool,
    pub config_path: Option<PathBuf>,
    pub outdir: Option<PathBuf>,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: core::LogLevel::get()?,
            no_color: core::NoColor::get()?,
            config_path: optional::<build::ConfigPath, _>()?,
            outdir: optional::<build::OutDir, _>()?,
        })
    }
}

/// 未设置时返回 `None`，设置了但无效时报错
fn optional<V: EnvVar<T>, T>() -> EnvResult<Option<T>> {
    match env::var(V::NAME) {
        Ok(value) => V::parse(&value).map(Some),
        Err(_) => Ok(None),
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables\n\n");

    docs.push_str("## Core\n\n");
    docs.push_str(&format!(
        "- `{}`: {} (default: \"info\")\n",
        core::LogLevel::NAME,
        core::LogLevel::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        core::NoColor::NAME,
        core::NoColor::DESCRIPTION,
        core::NoColor::DEFAULT
    ));

    docs.push_str("\n## Build\n\n");
    docs.push_str(&format!(
        "- `{}`: {}\n",
        build::ConfigPath::NAME,
        build::ConfigPath::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {}\n",
        build::OutDir::NAME,
        build::OutDir::DESCRIPTION
    ));

    docs
}
