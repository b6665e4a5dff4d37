//! Safe deletion of a history entry's folder.
//!
//! Preconditions are checked in order and each one is a hard stop:
//! storage root exists, id matches the safety pattern, the computed target
//! is contained in the root. Removal then tries `std::fs` first and the
//! platform's native command second.

use crate::core::error::ShelfError;
use crate::core::platform::Platform;
use crate::core::process;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

static WORKSPACE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// Target did not exist; nothing was touched.
    AlreadyAbsent,
    Removed,
    RemovedByFallback,
}

/// Reject anything that is not letters, digits, `-` or `_`.
pub fn validate_workspace_id(id: &str) -> Result<&str, ShelfError> {
    let has_forbidden =
        id.contains("..") || id.contains('/') || id.contains('\\') || id.contains(':');
    if id.is_empty() || has_forbidden || !WORKSPACE_ID_PATTERN.is_match(id) {
        return Err(ShelfError::InvalidIdentity(id.to_string()));
    }
    Ok(id)
}

/// Relative path from `root` to `target`, provided it is a non-empty run of
/// plain components. Purely lexical; does not touch the filesystem.
pub fn ensure_contained(root: &Path, target: &Path) -> Result<PathBuf, ShelfError> {
    let escape = || ShelfError::PathEscape {
        root: root.to_path_buf(),
        target: target.to_path_buf(),
    };
    let relative = target.strip_prefix(root).map_err(|_| escape())?;
    let mut components = relative.components().peekable();
    if components.peek().is_none() {
        return Err(escape());
    }
    if !components.all(|c| matches!(c, Component::Normal(_))) {
        return Err(escape());
    }
    Ok(relative.to_path_buf())
}

/// Delete `<root>/<id>`.
pub fn delete_in_root(root: &Path, id: &str, platform: Platform) -> Result<DeleteOutcome, ShelfError> {
    delete_in_root_with(root, id, platform, remove_tree, |line| {
        process::run_shell(platform, line).map(|_| ())
    })
}

/// Same as [`delete_in_root`] with both removal steps supplied: `primary`
/// removes the target in-process, `fallback` runs the native command line.
pub(crate) fn delete_in_root_with<F, G>(
    root: &Path,
    id: &str,
    platform: Platform,
    primary: F,
    fallback: G,
) -> Result<DeleteOutcome, ShelfError>
where
    F: FnOnce(&Path) -> io::Result<()>,
    G: FnOnce(&str) -> Result<(), ShelfError>,
{
    let id = validate_workspace_id(id)?;
    let target = root.join(id);
    ensure_contained(root, &target)?;

    if !target_exists(&target)? {
        log::debug!("workspace {} already absent", id);
        return Ok(DeleteOutcome::AlreadyAbsent);
    }

    let primary_error = match primary(&target) {
        Ok(()) => return Ok(DeleteOutcome::Removed),
        Err(e) => e.to_string(),
    };
    log::warn!(
        "removing {} failed ({}), trying native fallback",
        target.display(),
        primary_error
    );

    let Some(line) = fallback_command(platform, &target) else {
        return Err(ShelfError::DeletionFailed {
            primary: primary_error,
            fallback: None,
        });
    };
    match fallback(&line) {
        Ok(()) => Ok(DeleteOutcome::RemovedByFallback),
        Err(e) => Err(ShelfError::DeletionFailed {
            primary: primary_error,
            fallback: Some(e.to_string()),
        }),
    }
}

/// Whether anything (file, folder or dangling link) sits at `target`.
/// Only `NotFound` means absent; any other lookup error stops the deletion.
pub fn target_exists(target: &Path) -> Result<bool, ShelfError> {
    match fs::symlink_metadata(target) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ShelfError::DeletionFailed {
            primary: format!("cannot inspect {}: {}", target.display(), e),
            fallback: None,
        }),
    }
}

/// Native forced recursive removal for the platform, with the path quoted
/// for that platform's shell.
pub fn fallback_command(platform: Platform, target: &Path) -> Option<String> {
    let path = target.to_string_lossy();
    match platform {
        Platform::Windows => Some(format!("rd /s /q {}", process::quote(&path))),
        Platform::MacOs => Some(format!("rm -rf -- {}", process::sh_quote(&path))),
        Platform::Unsupported => None,
    }
}

// Recursive and forced: a target that disappears underneath us is fine.
fn remove_tree(path: &Path) -> io::Result<()> {
    let result = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) => Err(e),
    };
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
