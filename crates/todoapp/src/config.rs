//! # Configuration
//!
//! Configuration is managed by [`confique`], layered in priority order:
//! 1. **Command line**: applied by the binary on top of the loaded value.
//! 2. **Environment variables**: `TODOZ_DATA_DIR`, `TODOZ_LISTEN`, `TODOZ_LOG`.
//! 3. **Config file**: a TOML file, when one is given and exists.
//! 4. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | platform data dir + `/users` | Where snapshot files live |
//! | `listen` | `127.0.0.1:3000` | HTTP listen address |
//! | `log_filter` | `todoz=info,todoapp=info,tower_http=info` | Used when `RUST_LOG` is unset |

use crate::error::{Result, TodoError};
use confique::Config;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "todoz.toml";

#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Directory holding one snapshot file per user.
    #[config(env = "TODOZ_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Address the HTTP server binds to.
    #[config(env = "TODOZ_LISTEN", default = "127.0.0.1:3000")]
    pub listen: String,

    /// Tracing filter directive, overridden by `RUST_LOG`.
    #[config(env = "TODOZ_LOG", default = "todoz=info,todoapp=info,tower_http=info")]
    pub log_filter: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            listen: "127.0.0.1:3000".to_string(),
            log_filter: "todoz=info,todoapp=info,tower_http=info".to_string(),
        }
    }
}

impl TodoConfig {
    /// Load from the environment and, if present, the given TOML file.
    /// A missing file is not an error.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| TodoError::Config(e.to_string()))
    }

    /// The configured data dir, or the platform default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let dirs = ProjectDirs::from("com", "todoz", "todoz").ok_or_else(|| {
            TodoError::Config("Could not determine a data directory; set data_dir".to_string())
        })?;
        Ok(dirs.data_dir().join("users"))
    }
}
