//! Codeshelf: a launcher over your editor's recent-workspace history.
//!
//! VS Code and its forks keep one folder per recently opened workspace under
//! `<user data>/User/workspaceStorage/<id>/`, each with a small
//! `workspace.json` pointing back at the project. Codeshelf reads that store,
//! normalizes the heterogeneous entry formats into one record type, and lets
//! you list, open, tag, favorite and delete entries.
//!
//! # Architecture
//!
//! - [`core`]: storage discovery, URI normalization, entry parsing, the
//!   catalog loader and the guarded deletion engine. Also the shared
//!   primitives: error type, platform tag, process helper, data dir.
//! - [`plugins`]: everything layered on top: per-workspace preferences,
//!   sort policies, project-type detection, folder stats, editor and
//!   terminal launching.
//!
//! The editor's store is read-only to codeshelf except for deleting whole
//! entries. Codeshelf's own state (preferences, config) lives in
//! `$CODESHELF_HOME` or `~/.codeshelf`.
//!
//! # Examples
//!
//! ```bash
//! codeshelf list --sort recently-opened
//! codeshelf open 3f2a9c --editor cursor
//! codeshelf tag 3f2a9c work client
//! codeshelf delete 3f2a9c --yes
//! ```

pub mod core;
pub mod plugins;

mod cli;

use cli::{Cli, Command, ListCli, OpenCli, OutputFormat};
use crate::core::{
    config::{self, Config},
    deletion::{self, DeleteOutcome},
    error::ShelfError,
    logging, output,
    session::Session,
    store::Store,
    time,
};
use crate::plugins::{
    editor,
    prefs::{Preferences, SqliteStore},
    sort::{self, SortMode},
    stats, terminal,
};

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::Path;

struct App {
    session: Session,
    store: Store,
    config: Config,
}

impl App {
    fn preferences(&self) -> Result<Preferences<SqliteStore>, ShelfError> {
        self.store.ensure()?;
        Ok(Preferences::new(SqliteStore::open(&self.store.prefs_db_path())?))
    }

    /// Saved preference, else the configured default.
    fn effective_sort(&self, prefs: &Preferences<SqliteStore>) -> Result<SortMode, ShelfError> {
        Ok(prefs.stored_sort_mode()?.unwrap_or(self.config.default_sort))
    }
}

pub fn run() -> Result<(), ShelfError> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let store = Store::resolve()?;
    let config = config::load_config(&store.config_path())?;
    let session = Session::detect()?;
    log::debug!(
        "platform={} data_dir={}",
        session.platform(),
        store.root().display()
    );
    let app = App {
        session,
        store,
        config,
    };

    match cli.command {
        Command::List(list) => run_list(&app, list),
        Command::Open(open) => run_open(&app, open),
        Command::Favorite { id } => run_favorite(&app, &id),
        Command::Tag { id, tags } => run_tag(&app, &id, &tags),
        Command::Terminal { id } => {
            let record = app.session.find_workspace(&id)?;
            let used = terminal::open_in_terminal(
                &record.path,
                app.session.platform(),
                app.config.default_terminal.as_deref(),
            )?;
            println!("{} Opened {} in {}", "✓".green(), record.name.bold(), used.name());
            Ok(())
        }
        Command::Reveal { id } => {
            let record = app.session.find_workspace(&id)?;
            terminal::reveal(&record.path, app.session.platform())?;
            println!(
                "{} Revealed {} in {}",
                "✓".green(),
                record.name.bold(),
                app.session.platform().file_manager_name()
            );
            Ok(())
        }
        Command::Stats { id, format } => run_stats(&app, &id, format),
        Command::Delete { id, yes } => run_delete(&app, &id, yes),
        Command::Sort { mode } => run_sort(&app, mode),
        Command::Editors => {
            let installed = editor::detect_installed_editors(app.session.platform());
            for variant in editor::EditorVariant::ALL {
                let mark = if installed.contains(&variant) {
                    "✓".green()
                } else {
                    "✗".red()
                };
                let default = if variant == app.config.default_editor {
                    " (default)".dimmed().to_string()
                } else {
                    String::new()
                };
                println!("  {} {:<16} {}{}", mark, variant.name(), variant.command(), default);
            }
            Ok(())
        }
        Command::Root => run_root(&app),
    }
}

fn run_list(app: &App, list: ListCli) -> Result<(), ShelfError> {
    let prefs = app.preferences()?;
    let mode = match list.sort {
        Some(mode) => mode,
        None => app.effective_sort(&prefs)?,
    };

    let records = app.session.load_workspaces()?;
    let views = sort::build_views(records, &prefs)?;
    let mut views = sort::filter_views(views, list.tag.as_deref(), list.favorites);
    sort::sort_views(&mut views, mode);

    if list.format == OutputFormat::Json {
        let payload = serde_json::json!({
            "sort": mode.as_str(),
            "storage_root": app.session.storage_root().map(|p| p.display().to_string()),
            "workspaces": serde_json::to_value(&views)?,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&time::command_envelope("list", "ok", payload))?
        );
        return Ok(());
    }

    if app.session.storage_root().is_none() {
        println!("{}", "No workspace storage found for this editor install.".yellow());
        return Ok(());
    }
    if views.is_empty() {
        println!("{}", "No workspaces.".dimmed());
        return Ok(());
    }

    let now = time::now_epoch_ms();
    let home = app.session.locator().home();
    println!("{} {}", "Sorted by".dimmed(), mode.title().dimmed());
    for view in &views {
        let star = if view.metadata.is_favorite {
            "★".yellow()
        } else {
            " ".normal()
        };
        let opened = view
            .metadata
            .last_opened
            .map(|ts| time::format_time_ago(ts, now))
            .unwrap_or_default();
        println!(
            "{} {} {}{}  {}",
            star,
            view.record.name.bold(),
            view.project_type.id.cyan(),
            output::tag_suffix(&view.metadata.tags).magenta(),
            opened.dimmed()
        );
        println!(
            "    {}  {}",
            output::compact_line(&output::shorten_home(&view.record.path, home), 96),
            view.record.id.dimmed()
        );
    }
    Ok(())
}

fn run_open(app: &App, open: OpenCli) -> Result<(), ShelfError> {
    let record = app.session.find_workspace(&open.id)?;
    let variant = open.editor.unwrap_or(app.config.default_editor);
    editor::open_in_editor(&record.path, variant, open.new_window, app.session.platform())?;
    app.preferences()?.touch_last_opened(&record.id)?;
    println!("{} Opened {} in {}", "✓".green(), record.name.bold(), variant.name());
    Ok(())
}

fn run_favorite(app: &App, id: &str) -> Result<(), ShelfError> {
    let record = app.session.find_workspace(id)?;
    let now_favorite = app.preferences()?.toggle_favorite(&record.id)?;
    if now_favorite {
        println!("{} {} added to favorites", "★".yellow(), record.name.bold());
    } else {
        println!("{} removed from favorites", record.name.bold());
    }
    Ok(())
}

fn run_tag(app: &App, id: &str, tags: &[String]) -> Result<(), ShelfError> {
    let record = app.session.find_workspace(id)?;
    let saved = app.preferences()?.set_tags(&record.id, tags)?;
    if saved.is_empty() {
        println!("Cleared tags on {}", record.name.bold());
    } else {
        println!("{}{}", record.name.bold(), output::tag_suffix(&saved).magenta());
    }
    Ok(())
}

fn run_stats(app: &App, id: &str, format: OutputFormat) -> Result<(), ShelfError> {
    let record = app.session.find_workspace(id)?;
    let stats = stats::workspace_stats(Path::new(&record.path))
        .ok_or_else(|| ShelfError::NotFound(format!("folder {}", record.path)))?;

    if format == OutputFormat::Json {
        let payload = serde_json::json!({
            "workspace": serde_json::to_value(&record)?,
            "stats": serde_json::to_value(&stats)?,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&time::command_envelope("stats", "ok", payload))?
        );
        return Ok(());
    }

    println!("{}", record.name.bold());
    println!("  {:<14} {}", "Path:".dimmed(), record.path);
    println!("  {:<14} {}", "Size:".dimmed(), stats::format_file_size(stats.size));
    println!("  {:<14} {}", "Files:".dimmed(), stats.file_count);
    println!(
        "  {:<14} {}",
        "Modified:".dimmed(),
        time::format_time_ago(stats.last_modified, time::now_epoch_ms())
    );
    if let Some(branch) = &stats.git_branch {
        println!("  {:<14} {}", "Branch:".dimmed(), branch.green());
    }
    Ok(())
}

fn run_delete(app: &App, id: &str, yes: bool) -> Result<(), ShelfError> {
    deletion::validate_workspace_id(id)?;
    // The entry may already be unparsable or gone; deletion is keyed by id.
    let label = app
        .session
        .find_workspace(id)
        .map(|record| format!("{} ({})", record.name, record.path))
        .unwrap_or_else(|_| id.to_string());

    if !yes && !confirm(&format!("Remove {} from recent workspaces?", label.bold()))? {
        println!("{}", "Aborted.".dimmed());
        return Ok(());
    }

    let outcome = app.session.delete_workspace(id)?;
    log::debug!("delete {} -> {:?}", id, outcome);
    match outcome {
        DeleteOutcome::AlreadyAbsent => {
            println!("{} {} was already gone", "✓".green(), id);
        }
        DeleteOutcome::Removed | DeleteOutcome::RemovedByFallback => {
            println!("{} Removed {}", "✓".green(), label);
        }
    }
    Ok(())
}

fn run_sort(app: &App, mode: Option<SortMode>) -> Result<(), ShelfError> {
    let prefs = app.preferences()?;
    if let Some(mode) = mode {
        prefs.set_sort_mode(mode)?;
        println!("{} Sorting by {}", "✓".green(), mode.title().bold());
        return Ok(());
    }

    let current = app.effective_sort(&prefs)?;
    for mode in SortMode::ALL {
        if mode == current {
            println!("{} {:<16} {}", "▸".cyan(), mode.as_str().bold(), mode.title());
        } else {
            println!("  {:<16} {}", mode.as_str(), mode.title().dimmed());
        }
    }
    Ok(())
}

fn run_root(app: &App) -> Result<(), ShelfError> {
    if let Some(root) = app.session.storage_root() {
        println!("{}", root.display());
        return Ok(());
    }
    println!("{}", "No workspace storage found. Looked in:".yellow());
    for candidate in app.session.locator().candidate_storage_paths() {
        println!("  {}", candidate.display());
    }
    if !app.session.platform().is_supported() {
        println!(
            "{}",
            "Editor storage locations are only known on macOS and Windows.".dimmed()
        );
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, ShelfError> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
