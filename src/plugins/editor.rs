//! Opening a workspace folder in one of the supported editors.

use crate::core::error::ShelfError;
use crate::core::platform::Platform;
use crate::core::process;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum EditorVariant {
    #[default]
    Code,
    CodeInsiders,
    #[serde(rename = "vscodium")]
    #[value(name = "vscodium")]
    VsCodium,
    Cursor,
}

impl EditorVariant {
    pub const ALL: [EditorVariant; 4] = [
        EditorVariant::Code,
        EditorVariant::CodeInsiders,
        EditorVariant::VsCodium,
        EditorVariant::Cursor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EditorVariant::Code => "code",
            EditorVariant::CodeInsiders => "code-insiders",
            EditorVariant::VsCodium => "vscodium",
            EditorVariant::Cursor => "cursor",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            EditorVariant::Code => "VS Code",
            EditorVariant::CodeInsiders => "VS Code Insiders",
            EditorVariant::VsCodium => "VSCodium",
            EditorVariant::Cursor => "Cursor",
        }
    }

    /// Command-line launcher on PATH.
    pub fn command(self) -> &'static str {
        match self {
            EditorVariant::Code => "code",
            EditorVariant::CodeInsiders => "code-insiders",
            EditorVariant::VsCodium => "codium",
            EditorVariant::Cursor => "cursor",
        }
    }

    /// macOS application bundle name, for `open -a`.
    pub fn app_name(self) -> &'static str {
        match self {
            EditorVariant::Code => "Visual Studio Code",
            EditorVariant::CodeInsiders => "Visual Studio Code - Insiders",
            EditorVariant::VsCodium => "VSCodium",
            EditorVariant::Cursor => "Cursor",
        }
    }
}

impl std::fmt::Display for EditorVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments passed to the editor CLI.
pub fn editor_args(path: &str, new_window: bool) -> Vec<&str> {
    if new_window { vec!["-n", path] } else { vec![path] }
}

/// Arguments for the macOS `open -a` fallback.
pub fn open_app_args<'a>(variant: EditorVariant, path: &'a str, new_window: bool) -> Vec<&'a str> {
    let mut args = vec!["-a", variant.app_name(), "--args"];
    if new_window {
        args.push("-n");
    }
    args.push(path);
    args
}

/// Launch `variant` on `path`. On macOS, falls back to `open -a` when the CLI
/// launcher is not on PATH.
pub fn open_in_editor(
    path: &str,
    variant: EditorVariant,
    new_window: bool,
    platform: Platform,
) -> Result<(), ShelfError> {
    let primary = run_editor_cli(variant, &editor_args(path, new_window), platform);
    let Err(primary_err) = primary else {
        return Ok(());
    };
    log::info!("{} CLI failed: {}", variant.name(), primary_err);

    if platform == Platform::MacOs {
        process::run("open", &open_app_args(variant, path, new_window))?;
        return Ok(());
    }

    Err(ShelfError::Launch(format!(
        "Failed to open {}. Is it installed and in PATH? ({})",
        variant.name(),
        primary_err
    )))
}

/// Editors whose CLI answers `--version`.
pub fn detect_installed_editors(platform: Platform) -> Vec<EditorVariant> {
    EditorVariant::ALL
        .into_iter()
        .filter(|variant| run_editor_cli(*variant, &["--version"], platform).is_ok())
        .collect()
}

// Windows launchers are `.cmd` shims, which only resolve through cmd.exe.
fn run_editor_cli(variant: EditorVariant, args: &[&str], platform: Platform) -> Result<(), ShelfError> {
    match platform {
        Platform::Windows => {
            let quoted: Vec<String> = args.iter().map(|a| process::quote(a)).collect();
            let line = format!("{} {}", variant.command(), quoted.join(" "));
            process::run_shell(platform, &line).map(|_| ())
        }
        Platform::MacOs | Platform::Unsupported => {
            process::run(variant.command(), args).map(|_| ())
        }
    }
}
