//! Codeshelf's own data directory.
//!
//! Holds the preference database and the optional config file. This is the
//! only place codeshelf writes durable state; the editor's history store is
//! never written except for entry deletion.

use crate::core::error::ShelfError;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "CODESHELF_HOME";
pub const DATA_DIR_NAME: &str = ".codeshelf";
pub const PREFS_DB_NAME: &str = "prefs.db";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Handle to the data directory.
#[derive(Debug, Clone)]
pub struct Store {
    /// Absolute path to the data directory
    pub root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$CODESHELF_HOME`, else `~/.codeshelf`.
    pub fn resolve() -> Result<Self, ShelfError> {
        if let Some(path) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(path));
        }
        let home = dirs::home_dir()
            .ok_or_else(|| ShelfError::NotFound("home directory".to_string()))?;
        Ok(Self::new(home.join(DATA_DIR_NAME)))
    }

    pub fn ensure(&self) -> Result<(), ShelfError> {
        fs::create_dir_all(&self.root).map_err(ShelfError::Io)
    }

    pub fn prefs_db_path(&self) -> PathBuf {
        self.root.join(PREFS_DB_NAME)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
