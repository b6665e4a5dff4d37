//! Catalog and deletion core.
//!
//! Everything that touches the editor's history store lives here, along with
//! the shared primitives (errors, platform tag, process helper, data dir).

pub mod catalog;
pub mod config;
pub mod db;
pub mod deletion;
pub mod error;
pub mod locator;
pub mod logging;
pub mod output;
pub mod parser;
pub mod platform;
pub mod process;
pub mod session;
pub mod store;
pub mod time;
pub mod uri;
pub mod workspace;
