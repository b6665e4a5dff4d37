//! Host platform capability tag.
//!
//! Selected once at startup and passed to every operation that behaves
//! differently per operating system. Only Windows and macOS are supported
//! targets; everything else is `Unsupported` and gets empty candidate lists,
//! no deletion fallback and no launcher commands.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    MacOs,
    Unsupported,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unsupported
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Unsupported => "unsupported",
        }
    }

    /// Separator used for canonical workspace paths on this platform.
    pub fn separator(self) -> char {
        match self {
            Platform::Windows => '\\',
            Platform::MacOs | Platform::Unsupported => '/',
        }
    }

    pub fn uses_backslash(self) -> bool {
        self.separator() == '\\'
    }

    pub fn is_supported(self) -> bool {
        self != Platform::Unsupported
    }

    /// Name of the native file manager, for user-facing labels.
    pub fn file_manager_name(self) -> &'static str {
        match self {
            Platform::Windows => "Explorer",
            Platform::MacOs => "Finder",
            Platform::Unsupported => "file manager",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
