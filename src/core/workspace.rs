//! Canonical model of one editor history entry.

use serde::{Deserialize, Serialize};

/// One discovered history entry.
///
/// `id` is the entry's directory name under the storage root and is the only
/// identity used by favorite/tag/delete. `name` and `path` are derived from
/// the entry's `workspace.json` at load time and are display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    /// Storage sub-directory name
    pub id: String,
    /// Last path segment of `path`
    pub name: String,
    /// Canonical project folder path; may no longer exist
    pub path: String,
}

impl WorkspaceRecord {
    pub fn new(id: impl Into<String>, path: impl Into<String>, separator: char) -> Self {
        let path = path.into();
        let name = display_name(&path, separator);
        Self {
            id: id.into(),
            name,
            path,
        }
    }
}

/// Last non-empty segment of `path`, or the whole path when there is none.
pub fn display_name(path: &str, separator: char) -> String {
    path.split(separator)
        .rev()
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_string()
}
