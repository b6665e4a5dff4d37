//! User configuration loaded from `<data dir>/config.toml`.
//!
//! A missing file means defaults. A malformed file is an error rather than
//! being silently replaced, so typos are noticed.

use crate::core::error::ShelfError;
use crate::plugins::editor::EditorVariant;
use crate::plugins::sort::SortMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Sort order used until one is chosen with `codeshelf sort`.
    #[serde(default)]
    pub default_sort: SortMode,
    /// Editor launched by `codeshelf open`.
    #[serde(default)]
    pub default_editor: EditorVariant,
    /// Preferred terminal: `iterm`/`terminal` on macOS, `wt`/`cmd` on Windows.
    #[serde(default)]
    pub default_terminal: Option<String>,
}

pub fn load_config(path: &Path) -> Result<Config, ShelfError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path).map_err(ShelfError::Io)?;
    parse_config(&content).map_err(|e| match e {
        ShelfError::Config(msg) => ShelfError::Config(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

pub fn parse_config(content: &str) -> Result<Config, ShelfError> {
    toml::from_str(content).map_err(|e| ShelfError::Config(e.to_string()))
}
