//! Terminal and file-manager launching.

use crate::core::error::ShelfError;
use crate::core::platform::Platform;
use crate::core::process;
use crate::core::uri;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalApp {
    ITerm,
    TerminalApp,
    WindowsTerminal,
    Cmd,
}

impl TerminalApp {
    pub fn name(self) -> &'static str {
        match self {
            TerminalApp::ITerm => "iTerm",
            TerminalApp::TerminalApp => "Terminal",
            TerminalApp::WindowsTerminal => "Windows Terminal",
            TerminalApp::Cmd => "Command Prompt",
        }
    }

    fn from_preference(value: &str) -> Option<TerminalApp> {
        match value.trim().to_ascii_lowercase().as_str() {
            "iterm" | "iterm2" => Some(TerminalApp::ITerm),
            "terminal" => Some(TerminalApp::TerminalApp),
            "wt" | "windows-terminal" => Some(TerminalApp::WindowsTerminal),
            "cmd" => Some(TerminalApp::Cmd),
            _ => None,
        }
    }
}

/// Terminals to try, in order. A recognised preference for this platform is
/// tried first; the remaining defaults follow.
pub fn terminal_candidates(platform: Platform, preferred: Option<&str>) -> Vec<TerminalApp> {
    let defaults: &[TerminalApp] = match platform {
        Platform::MacOs => &[TerminalApp::ITerm, TerminalApp::TerminalApp],
        Platform::Windows => &[TerminalApp::WindowsTerminal, TerminalApp::Cmd],
        Platform::Unsupported => &[],
    };
    let mut ordered = Vec::with_capacity(defaults.len());
    if let Some(first) = preferred.and_then(TerminalApp::from_preference) {
        if defaults.contains(&first) {
            ordered.push(first);
        } else {
            log::warn!("terminal '{}' is not available on {}", first.name(), platform);
        }
    }
    for app in defaults {
        if !ordered.contains(app) {
            ordered.push(*app);
        }
    }
    ordered
}

/// Open a terminal window with `path` as its working directory.
pub fn open_in_terminal(
    path: &str,
    platform: Platform,
    preferred: Option<&str>,
) -> Result<TerminalApp, ShelfError> {
    let candidates = terminal_candidates(platform, preferred);
    if candidates.is_empty() {
        return Err(ShelfError::Unsupported(
            "opening a terminal is only supported on macOS and Windows".to_string(),
        ));
    }

    let mut errors = Vec::new();
    for app in candidates {
        match launch_terminal(app, path, platform) {
            Ok(()) => return Ok(app),
            Err(e) => {
                log::info!("{} failed: {}", app.name(), e);
                errors.push(format!("{}: {}", app.name(), e));
            }
        }
    }
    Err(ShelfError::Launch(errors.join("; ")))
}

fn launch_terminal(app: TerminalApp, path: &str, platform: Platform) -> Result<(), ShelfError> {
    let cd = cd_line(path);
    match app {
        TerminalApp::ITerm => {
            let write = format!(
                "tell application \"iTerm\" to tell current session of current window to write text {}",
                applescript_string(&cd)
            );
            process::run(
                "osascript",
                &[
                    "-e",
                    "tell application \"iTerm\" to create window with default profile",
                    "-e",
                    &write,
                ],
            )?;
        }
        TerminalApp::TerminalApp => {
            let script = format!(
                "tell application \"Terminal\" to do script {}",
                applescript_string(&cd)
            );
            process::run(
                "osascript",
                &["-e", &script, "-e", "tell application \"Terminal\" to activate"],
            )?;
        }
        TerminalApp::WindowsTerminal => {
            let native = uri::normalize_path_for_platform(path, platform);
            process::run_shell(platform, &format!("wt.exe -d {}", process::quote(&native)))?;
        }
        TerminalApp::Cmd => {
            let native = uri::normalize_path_for_platform(path, platform);
            let line = format!(
                "start \"\" cmd.exe /K \"cd /d {}\"",
                process::quote(&native)
            );
            process::run_shell(platform, &line)?;
        }
    }
    Ok(())
}

/// Show `path` in Finder or Explorer.
pub fn reveal(path: &str, platform: Platform) -> Result<(), ShelfError> {
    match platform {
        Platform::MacOs => {
            process::run("open", &[path])?;
            Ok(())
        }
        Platform::Windows => {
            // explorer.exe exits non-zero even when the window opens.
            let native = uri::normalize_path_for_platform(path, platform);
            process::capture("explorer", &[&native])?;
            Ok(())
        }
        Platform::Unsupported => Err(ShelfError::Unsupported(
            "revealing folders is only supported on macOS and Windows".to_string(),
        )),
    }
}

/// Shell line typed into a macOS terminal session.
fn cd_line(path: &str) -> String {
    format!("cd {}", process::sh_quote(path))
}

/// AppleScript string literal.
pub fn applescript_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
