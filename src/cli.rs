//! CLI struct definitions for the codeshelf command-line interface.
//!
//! All clap-derived types live here. Dispatch lives in `lib.rs`.

use crate::plugins::editor::EditorVariant;
use crate::plugins::sort::SortMode;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(
    name = "codeshelf",
    version = env!("CARGO_PKG_VERSION"),
    about = "Browse, open and prune your editor's recent-workspace history."
)]
pub(crate) struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[clap(long, short = 'v', global = true)]
    pub verbose: bool,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ListCli {
    /// Sort order for this listing (defaults to the saved preference).
    #[clap(long, value_enum)]
    pub sort: Option<SortMode>,
    /// Only workspaces carrying this tag.
    #[clap(long)]
    pub tag: Option<String>,
    /// Only favorites.
    #[clap(long)]
    pub favorites: bool,
    /// Output format: 'text' or 'json'.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub(crate) struct OpenCli {
    /// Workspace id (the history entry folder name)
    pub id: String,
    /// Editor to launch (defaults to the configured editor).
    #[clap(long, value_enum)]
    pub editor: Option<EditorVariant>,
    /// Force a new editor window.
    #[clap(long, short = 'n')]
    pub new_window: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// List recent workspaces
    #[clap(alias = "ls")]
    List(ListCli),
    /// Open a workspace in an editor
    Open(OpenCli),
    /// Toggle a workspace's favorite flag
    Favorite {
        id: String,
    },
    /// Replace a workspace's tags (no tags clears them)
    Tag {
        id: String,
        tags: Vec<String>,
    },
    /// Open a terminal in a workspace folder
    Terminal {
        id: String,
    },
    /// Show a workspace folder in Finder/Explorer
    Reveal {
        id: String,
    },
    /// Show size, file count and git branch of a workspace folder
    Stats {
        id: String,
        #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Remove a workspace from the editor's history
    #[clap(alias = "rm")]
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[clap(long, short = 'y')]
        yes: bool,
    },
    /// Show or set the saved sort order
    Sort {
        #[clap(value_enum)]
        mode: Option<SortMode>,
    },
    /// List editors found on PATH
    Editors,
    /// Print the workspace storage directory
    Root,
}
