//! ShellResult and its model-facing text rendering

use std::fmt;

use tracing::debug;

/// Rendered in place of empty stdout/stderr so "no output" is never a blank line
pub const EMPTY_PLACEHOLDER: &str = "<empty>";

/// Outcome of a finished shell command
///
/// Only [`ShellExecutor`](super::ShellExecutor) builds these. A command that
/// timed out never produces one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellResult {
    command: String,
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl ShellResult {
    pub(super) fn new(command: impl Into<String>, exit_code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            command: command.into(),
            exit_code,
            stdout: stdout.trim().to_string(),
            stderr: stderr.trim().to_string(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Render the fixed four-field block sent back to the model
    pub fn to_tool_message(&self) -> String {
        debug!(command = %self.command, exit_code = self.exit_code, "ShellResult::to_tool_message: called");
        format!(
            "Command: {}\nExit code: {}\nStdout:\n{}\nStderr:\n{}",
            self.command,
            self.exit_code,
            or_placeholder(&self.stdout),
            or_placeholder(&self.stderr),
        )
    }
}

impl fmt::Display for ShellResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_tool_message())
    }
}

fn or_placeholder(text: &str) -> &str {
    if text.is_empty() { EMPTY_PLACEHOLDER } else { text }
}
