//! On-demand folder statistics for `codeshelf stats`.

use crate::core::process;
use crate::core::time;
use serde::Serialize;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Directory levels below the workspace folder that are still counted.
pub const MAX_SCAN_DEPTH: usize = 3;

pub const SKIPPED_DIRS: [&str; 4] = ["node_modules", ".git", "dist", "build"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceStats {
    /// Bytes
    pub size: u64,
    pub file_count: u64,
    /// Unix epoch milliseconds of the folder itself
    pub last_modified: u64,
    pub git_branch: Option<String>,
}

/// Size, file count, mtime and git branch of `path`, or `None` when the
/// folder is gone.
pub fn workspace_stats(path: &Path) -> Option<WorkspaceStats> {
    let meta = fs::metadata(path).ok()?;
    let last_modified = meta.modified().map(time::system_time_ms).unwrap_or(0);
    let (file_count, size) = scan_tree(path);
    Some(WorkspaceStats {
        size,
        file_count,
        last_modified,
        git_branch: git_branch(path),
    })
}

/// Counts regular files and their bytes, skipping vendored and build output.
pub fn scan_tree(path: &Path) -> (u64, u64) {
    let walker = WalkDir::new(path)
        .min_depth(1)
        .max_depth(MAX_SCAN_DEPTH + 1)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !SKIPPED_DIRS
                    .iter()
                    .any(|skip| entry.file_name() == std::ffi::OsStr::new(skip))
        });

    let mut files = 0;
    let mut bytes = 0;
    for entry in walker.flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        files += 1;
        bytes += meta.len();
    }
    (files, bytes)
}

fn git_branch(path: &Path) -> Option<String> {
    let dir = path.to_str()?;
    let output = process::capture("git", &["-C", dir, "rev-parse", "--abbrev-ref", "HEAD"]).ok()?;
    if !output.success {
        return None;
    }
    let branch = output.combined.trim();
    (!branch.is_empty()).then(|| branch.to_string())
}

pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    match bytes {
        b if b < KB => format!("{} B", b),
        b if b < MB => format!("{:.1} KB", b as f64 / KB as f64),
        b if b < GB => format!("{:.1} MB", b as f64 / MB as f64),
        b => format!("{:.1} GB", b as f64 / GB as f64),
    }
}
