//! Collaborators layered on top of the catalog: preferences, ordering,
//! project-type detection, stats and process launching.

pub mod detect;
pub mod editor;
pub mod prefs;
pub mod sort;
pub mod stats;
pub mod terminal;
