//! Parsing of a single history entry's `workspace.json`.

use crate::core::platform::Platform;
use crate::core::uri;
use crate::core::workspace::WorkspaceRecord;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;

pub const WORKSPACE_FILE_NAME: &str = "workspace.json";

/// Field names that have carried the folder reference across editor
/// versions, highest priority first. Add new formats at the end.
pub const FOLDER_REFERENCE_KEYS: &[&str] = &["folder", "configURIPath", "configPath", "folderUri"];

/// Why an entry was left out of the catalog. Only ever logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySkip {
    Unreadable(String),
    InvalidJson(String),
    NotAnObject,
    NoFolderReference,
}

impl std::fmt::Display for EntrySkip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntrySkip::Unreadable(e) => write!(f, "unreadable {}: {}", WORKSPACE_FILE_NAME, e),
            EntrySkip::InvalidJson(e) => write!(f, "invalid JSON: {}", e),
            EntrySkip::NotAnObject => f.write_str("metadata is not a JSON object"),
            EntrySkip::NoFolderReference => f.write_str("no folder reference"),
        }
    }
}

/// Parse `<root>/<id>/workspace.json` into a record, or `None` to skip it.
pub fn parse_entry(root: &Path, id: &str, platform: Platform) -> Option<WorkspaceRecord> {
    match try_parse_entry(root, id, platform) {
        Ok(record) => Some(record),
        Err(skip) => {
            log::debug!("skipping workspace entry {}: {}", id, skip);
            None
        }
    }
}

pub fn try_parse_entry(
    root: &Path,
    id: &str,
    platform: Platform,
) -> Result<WorkspaceRecord, EntrySkip> {
    let file = root.join(id).join(WORKSPACE_FILE_NAME);
    let content = fs::read_to_string(&file).map_err(|e| EntrySkip::Unreadable(e.to_string()))?;
    let data: JsonValue =
        serde_json::from_str(&content).map_err(|e| EntrySkip::InvalidJson(e.to_string()))?;
    if !data.is_object() {
        return Err(EntrySkip::NotAnObject);
    }
    let reference = folder_reference(&data).ok_or(EntrySkip::NoFolderReference)?;
    let path = uri::canonical_path(reference, platform);
    Ok(WorkspaceRecord::new(id, path, platform.separator()))
}

/// First present, non-blank string among [`FOLDER_REFERENCE_KEYS`].
pub fn folder_reference(data: &JsonValue) -> Option<&str> {
    FOLDER_REFERENCE_KEYS
        .iter()
        .filter_map(|key| data.get(*key).and_then(JsonValue::as_str))
        .find(|value| !value.trim().is_empty())
}
