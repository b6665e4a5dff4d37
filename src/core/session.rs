//! One load + delete session over a single storage root.
//!
//! The root is resolved once, on first use, and reused by every later call so
//! the catalog and the deletion engine always agree on where entries live.

use crate::core::catalog;
use crate::core::deletion::{self, DeleteOutcome};
use crate::core::error::ShelfError;
use crate::core::locator::Locator;
use crate::core::platform::Platform;
use crate::core::workspace::WorkspaceRecord;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug)]
pub struct Session {
    locator: Locator,
    root: OnceLock<Option<PathBuf>>,
}

impl Session {
    pub fn new(locator: Locator) -> Self {
        Self {
            locator,
            root: OnceLock::new(),
        }
    }

    /// Session for the current user and host platform.
    pub fn detect() -> Result<Self, ShelfError> {
        Locator::detect()
            .map(Self::new)
            .ok_or_else(|| ShelfError::NotFound("home directory".to_string()))
    }

    pub fn platform(&self) -> Platform {
        self.locator.platform()
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Storage root, discovered on first call.
    pub fn storage_root(&self) -> Option<&Path> {
        self.root
            .get_or_init(|| self.locator.find_storage_path())
            .as_deref()
    }

    /// All parsable history entries, sorted by name. Empty when no storage
    /// root exists.
    pub fn load_workspaces(&self) -> Result<Vec<WorkspaceRecord>, ShelfError> {
        match self.storage_root() {
            Some(root) => catalog::load_from_root(root, self.platform()),
            None => Ok(Vec::new()),
        }
    }

    /// Find one record by id.
    pub fn find_workspace(&self, id: &str) -> Result<WorkspaceRecord, ShelfError> {
        self.load_workspaces()?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| ShelfError::NotFound(format!("workspace '{}'", id)))
    }

    /// Delete the history entry `id`. Does not require a prior load.
    pub fn delete_workspace(&self, id: &str) -> Result<DeleteOutcome, ShelfError> {
        let root = self.storage_root().ok_or(ShelfError::StorageNotFound)?;
        deletion::delete_in_root(root, id, self.platform())
    }
}
