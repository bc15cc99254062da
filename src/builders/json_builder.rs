//! JSON 构建器
//!
//! 每个页面写成 `<outdir>/<页面名>.json`，全局上下文写成 `globalcontext.json`

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::DocnavResult;

use super::ContextBuilder;

#[derive(Debug, Clone)]
pub struct JsonBuilder {
    outdir: PathBuf,
}

impl JsonBuilder {
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
        }
    }
}

impl ContextBuilder for JsonBuilder {
    const OUT_SUFFIX: &'static str = ".json";
    const GLOBAL_CONTEXT_FILENAME: &'static str = "globalcontext.json";

    fn outdir(&self) -> &Path {
        &self.outdir
    }

    fn dump_context<T: Serialize>(&self, context: &T, filename: &Path) -> DocnavResult<()> {
        if let Some(parent) = filename.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(filename)?);
        serde_json::to_writer(&mut writer, context)?;
        writer.flush()?;

        info!("wrote {}", filename.display());
        Ok(())
    }
}
