//! List ordering policies.

use crate::core::catalog;
use crate::core::error::ShelfError;
use crate::core::workspace::WorkspaceRecord;
use crate::plugins::detect::{self, ProjectType};
use crate::plugins::prefs::{KeyValueStore, Preferences, WorkspaceMetadata};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    Alphabetical,
    RecentlyOpened,
    FavoritesFirst,
    ProjectType,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::RecentlyOpened,
        SortMode::Alphabetical,
        SortMode::FavoritesFirst,
        SortMode::ProjectType,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Alphabetical => "alphabetical",
            SortMode::RecentlyOpened => "recently-opened",
            SortMode::FavoritesFirst => "favorites-first",
            SortMode::ProjectType => "project-type",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SortMode::Alphabetical => "Alphabetical (A-Z)",
            SortMode::RecentlyOpened => "Recently Opened",
            SortMode::FavoritesFirst => "Favorites First",
            SortMode::ProjectType => "Project Type",
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("unknown sort mode '{}'", s))
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record joined with its preferences and detected project type.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceView {
    #[serde(flatten)]
    pub record: WorkspaceRecord,
    pub metadata: WorkspaceMetadata,
    pub project_type: &'static ProjectType,
}

/// Join records with their stored metadata and detected project type.
/// Detection reads each folder, so it runs in parallel.
pub fn build_views<S: KeyValueStore>(
    records: Vec<WorkspaceRecord>,
    prefs: &Preferences<S>,
) -> Result<Vec<WorkspaceView>, ShelfError> {
    let mut metadata = prefs.metadata_for(records.iter().map(|r| r.id.as_str()))?;
    let joined: Vec<(WorkspaceRecord, WorkspaceMetadata)> = records
        .into_iter()
        .map(|record| {
            let meta = metadata.remove(&record.id).unwrap_or_default();
            (record, meta)
        })
        .collect();

    Ok(joined
        .into_par_iter()
        .map(|(record, metadata)| {
            let project_type = detect::detect_project_type(Path::new(&record.path));
            WorkspaceView {
                record,
                metadata,
                project_type,
            }
        })
        .collect())
}

/// Keep views carrying `tag` (exact match) and, if asked, only favorites.
pub fn filter_views(views: Vec<WorkspaceView>, tag: Option<&str>, favorites_only: bool) -> Vec<WorkspaceView> {
    views
        .into_iter()
        .filter(|v| !favorites_only || v.metadata.is_favorite)
        .filter(|v| tag.is_none_or(|t| v.metadata.tags.iter().any(|have| have == t)))
        .collect()
}

pub fn sort_views(views: &mut [WorkspaceView], mode: SortMode) {
    views.sort_by(|a, b| compare_views(a, b, mode));
}

pub fn compare_views(a: &WorkspaceView, b: &WorkspaceView, mode: SortMode) -> Ordering {
    let by_name = || catalog::compare_records(&a.record, &b.record);
    match mode {
        SortMode::Alphabetical => by_name(),
        // Newest first; never-opened entries go last.
        SortMode::RecentlyOpened => match (a.metadata.last_opened, b.metadata.last_opened) {
            (Some(x), Some(y)) => y.cmp(&x).then_with(by_name),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => by_name(),
        },
        SortMode::FavoritesFirst => b
            .metadata
            .is_favorite
            .cmp(&a.metadata.is_favorite)
            .then_with(by_name),
        SortMode::ProjectType => a
            .project_type
            .id
            .cmp(&b.project_type.id)
            .then_with(by_name),
    }
}
