//! Discovery of the editor's `workspaceStorage` directory.
//!
//! Each editor build keeps its own history store under the user's home. The
//! candidates are consulted in a fixed priority order and the first existing
//! one is used for the whole session; installed variants are never merged.

use crate::core::platform::Platform;
use std::path::{Path, PathBuf};

/// Editor builds whose history we know how to find, in priority order.
const EDITOR_DATA_DIRS: &[&str] = &["Code", "Code - Insiders", "VSCodium"];

const WINDOWS_APPDATA: &[&str] = &["AppData", "Roaming"];
const MACOS_APP_SUPPORT: &[&str] = &["Library", "Application Support"];
const STORAGE_SUFFIX: &[&str] = &["User", "workspaceStorage"];

#[derive(Debug, Clone)]
pub struct Locator {
    home: PathBuf,
    platform: Platform,
}

impl Locator {
    pub fn new(home: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            home: home.into(),
            platform,
        }
    }

    /// Locator for the running user and host OS. `None` when the home
    /// directory cannot be determined.
    pub fn detect() -> Option<Self> {
        dirs::home_dir().map(|home| Self::new(home, Platform::current()))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn candidate_storage_paths(&self) -> Vec<PathBuf> {
        candidate_storage_paths(&self.home, self.platform)
    }

    /// First candidate that exists as a directory.
    pub fn find_storage_path(&self) -> Option<PathBuf> {
        let found = self
            .candidate_storage_paths()
            .into_iter()
            .find(|candidate| candidate.is_dir());
        match &found {
            Some(root) => log::debug!("workspace storage found at {}", root.display()),
            None => log::debug!(
                "no workspace storage under {} for platform {}",
                self.home.display(),
                self.platform
            ),
        }
        found
    }
}

pub fn candidate_storage_paths(home: &Path, platform: Platform) -> Vec<PathBuf> {
    let prefix = match platform {
        Platform::Windows => WINDOWS_APPDATA,
        Platform::MacOs => MACOS_APP_SUPPORT,
        Platform::Unsupported => return Vec::new(),
    };

    EDITOR_DATA_DIRS
        .iter()
        .map(|editor_dir| {
            let mut path = home.to_path_buf();
            path.extend(prefix);
            path.push(editor_dir);
            path.extend(STORAGE_SUFFIX);
            path
        })
        .collect()
}
