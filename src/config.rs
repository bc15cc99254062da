//! 构建配置
//!
//! 从 TOML 文件加载，环境变量可以覆盖部分字段。链接映射表用数组表
//! 书写，声明顺序就是匹配顺序：
//!
//! ```toml
//! project_name = "handbook"
//! outdir = "_build/json"
//!
//! [[link_mappings]]
//! prefix = "https://hub.example.org/foo/"
//! root = "foo"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::LinkMappings;
use crate::env::EnvConfig;
use crate::error::{DocnavError, DocnavResult};

/// 配置常量
pub mod constants {
    pub const DEFAULT_PROJECT_NAME: &str = "index";
    pub const DEFAULT_OUTDIR: &str = "_build/json";
    pub const DEFAULT_ENCODING: &str = "utf-8";

    pub const CONFIG_PATHS: &[&str] = &["docnav.toml", ".docnav.toml"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// 根目录 `index` 页面写出时使用的名字
    pub project_name: String,
    pub outdir: PathBuf,
    /// 输入 HTML 的编码
    pub encoding: String,
    pub link_mappings: LinkMappings,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            project_name: constants::DEFAULT_PROJECT_NAME.to_string(),
            outdir: PathBuf::from(constants::DEFAULT_OUTDIR),
            encoding: constants::DEFAULT_ENCODING.to_string(),
            link_mappings: LinkMappings::default(),
        }
    }
}

impl BuildConfig {
    pub fn from_toml_str(s: &str) -> DocnavResult<Self> {
        let config: BuildConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> DocnavResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            DocnavError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// 按优先级加载：显式路径、`DOCNAV_CONFIG`、当前目录下的默认文件名，
    /// 都没有时使用默认配置。之后应用环境变量覆盖。
    pub fn load(explicit_path: Option<&Path>, env: &EnvConfig) -> DocnavResult<Self> {
        let path = explicit_path
            .map(Path::to_path_buf)
            .or_else(|| env.config_path.clone())
            .or_else(|| {
                constants::CONFIG_PATHS
                    .iter()
                    .map(PathBuf::from)
                    .find(|candidate| candidate.is_file())
            });

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => {
                info!("no config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env(env);
        Ok(config)
    }

    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(outdir) = &env.outdir {
            info!("DOCNAV_OUTDIR overrides outdir: {}", outdir.display());
            self.outdir = outdir.clone();
        }
    }

    pub fn validate(&self) -> DocnavResult<()> {
        if self.project_name.is_empty() {
            return Err(DocnavError::Config("project_name must not be empty".to_string()));
        }

        // 空前缀会匹配所有链接
        if let Some(mapping) = self.link_mappings.iter().find(|m| m.prefix.is_empty()) {
            return Err(DocnavError::Config(format!(
                "link mapping for root {:?} has an empty prefix",
                mapping.root
            )));
        }

        Ok(())
    }
}
