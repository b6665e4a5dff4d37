//! Catalog loader: every parsable history entry under one storage root.

use crate::core::error::ShelfError;
use crate::core::parser;
use crate::core::platform::Platform;
use crate::core::workspace::WorkspaceRecord;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Load and sort all records under `root`.
///
/// Listing the root itself must succeed; individual entries that are not
/// directories or fail to parse are dropped without error.
pub fn load_from_root(root: &Path, platform: Platform) -> Result<Vec<WorkspaceRecord>, ShelfError> {
    let ids = list_entry_ids(root)?;
    let parsed: Vec<WorkspaceRecord> = ids
        .par_iter()
        .filter_map(|id| parser::parse_entry(root, id, platform))
        .collect();

    let total = ids.len();
    let mut records = dedup_by_id(parsed);
    sort_records(&mut records);
    log::debug!(
        "loaded {} of {} workspace entries from {}",
        records.len(),
        total,
        root.display()
    );
    Ok(records)
}

/// Directory names directly under `root`. Stray files, entries whose type
/// cannot be read and names that are not valid UTF-8 are skipped.
pub fn list_entry_ids(root: &Path) -> Result<Vec<String>, ShelfError> {
    let mut ids = Vec::new();
    for entry in fs::read_dir(root).map_err(ShelfError::Io)? {
        let Ok(entry) = entry else {
            continue;
        };
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => ids.push(name),
            Err(raw) => log::debug!("skipping non UTF-8 entry {:?}", raw),
        }
    }
    Ok(ids)
}

/// Case-insensitive by name, then case-sensitive by name, then by id.
pub fn compare_records(a: &WorkspaceRecord, b: &WorkspaceRecord) -> Ordering {
    compare_names(&a.name, &b.name).then_with(|| a.id.cmp(&b.id))
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn sort_records(records: &mut [WorkspaceRecord]) {
    records.sort_by(compare_records);
}

fn dedup_by_id(records: Vec<WorkspaceRecord>) -> Vec<WorkspaceRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}
