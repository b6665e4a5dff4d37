//! Narrow helper for running external commands.
//!
//! Every spawn in the crate goes through here: output is captured (stdout and
//! stderr combined), a non-zero exit becomes an error that carries that
//! output, and paths interpolated into shell lines are always quoted.

use crate::core::error::ShelfError;
use crate::core::platform::Platform;
use std::process::{Command, Output};

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub program: String,
    pub exit_code: Option<i32>,
    pub success: bool,
    pub combined: String,
}

impl CommandOutput {
    fn from_output(program: &str, output: Output) -> Self {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = match (stdout.trim().is_empty(), stderr.trim().is_empty()) {
            (true, true) => String::new(),
            (false, true) => stdout.trim().to_string(),
            (true, false) => stderr.trim().to_string(),
            (false, false) => format!("{}\n{}", stdout.trim(), stderr.trim()),
        };
        Self {
            program: program.to_string(),
            exit_code: output.status.code(),
            success: output.status.success(),
            combined,
        }
    }

    /// Human-readable failure description.
    pub fn failure_text(&self) -> String {
        let code = self
            .exit_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        if self.combined.is_empty() {
            format!("{} exited with {}", self.program, code)
        } else {
            format!("{} exited with {}: {}", self.program, code, self.combined)
        }
    }

    pub fn into_result(self) -> Result<CommandOutput, ShelfError> {
        if self.success {
            Ok(self)
        } else {
            Err(ShelfError::Launch(self.failure_text()))
        }
    }
}

/// Run `program args...` and capture its output without judging the exit
/// status. Only a failure to spawn is an error.
pub fn capture(program: &str, args: &[&str]) -> Result<CommandOutput, ShelfError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| ShelfError::Launch(format!("failed to start {}: {}", program, e)))?;
    Ok(CommandOutput::from_output(program, output))
}

/// Like [`capture`] but a non-zero exit is an error.
pub fn run(program: &str, args: &[&str]) -> Result<CommandOutput, ShelfError> {
    capture(program, args)?.into_result()
}

/// Run a complete command line through the platform shell (`cmd /C` on
/// Windows, `sh -c` on macOS). Callers must quote interpolated values with
/// [`quote`].
pub fn run_shell(platform: Platform, line: &str) -> Result<CommandOutput, ShelfError> {
    let mut command = shell_command(platform, line)?;
    let program = match platform {
        Platform::Windows => "cmd",
        _ => "sh",
    };
    log::debug!("{} running: {}", program, line);
    let output = command
        .output()
        .map_err(|e| ShelfError::Launch(format!("failed to start {}: {}", program, e)))?;
    CommandOutput::from_output(program, output).into_result()
}

fn shell_command(platform: Platform, line: &str) -> Result<Command, ShelfError> {
    match platform {
        Platform::Windows => {
            let mut command = Command::new("cmd");
            command.arg("/C");
            push_raw_arg(&mut command, line);
            Ok(command)
        }
        Platform::MacOs => {
            let mut command = Command::new("sh");
            command.arg("-c").arg(line);
            Ok(command)
        }
        Platform::Unsupported => Err(ShelfError::Unsupported(
            "no shell is defined for this platform".to_string(),
        )),
    }
}

// cmd.exe does its own parsing; std's argument quoting would double-quote.
#[cfg(windows)]
fn push_raw_arg(command: &mut Command, line: &str) {
    use std::os::windows::process::CommandExt;
    command.raw_arg(line);
}

#[cfg(not(windows))]
fn push_raw_arg(command: &mut Command, line: &str) {
    command.arg(line);
}

pub fn escape_double_quotes(value: &str) -> String {
    value.replace('"', "\\\"")
}

/// Wrap in double quotes, escaping embedded double quotes. For cmd.exe lines.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", escape_double_quotes(value))
}

/// POSIX `sh` literal: single quotes, with each embedded `'` spelled `'\''`.
/// Nothing inside is expanded.
pub fn sh_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
