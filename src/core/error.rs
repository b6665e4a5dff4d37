use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Workspace storage path not found")]
    StorageNotFound,
    #[error("Invalid workspace id: {0:?}")]
    InvalidIdentity(String),
    #[error(
        "Refusing deletion: {} escapes workspace storage {}",
        .target.display(),
        .root.display()
    )]
    PathEscape { root: PathBuf, target: PathBuf },
    #[error("Failed to delete workspace folder: {primary}{}", fallback_suffix(.fallback))]
    DeletionFailed {
        primary: String,
        fallback: Option<String>,
    },
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Launch failed: {0}")]
    Launch(String),
    #[error("Unsupported platform: {0}")]
    Unsupported(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

fn fallback_suffix(fallback: &Option<String>) -> String {
    match fallback {
        Some(text) => format!(". Fallback error: {}", text),
        None => String::new(),
    }
}
