//! The `run_shell` tool
//!
//! Declares the single tool the model may call, decodes its arguments, and
//! dispatches calls to the shell executor. Every call, valid or not, yields a
//! [`ToolResult`] so the model always gets an answer.

mod error;
mod run_shell;

pub use error::ToolError;
pub use run_shell::{RunShellArgs, RunShellTool};

use std::str::FromStr;

use tracing::debug;

/// Names of the tools the agent can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    RunShell,
}

impl ToolName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::RunShell => "run_shell",
        }
    }
}

impl FromStr for ToolName {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "ToolName::from_str: called");
        match s {
            "run_shell" => Ok(ToolName::RunShell),
            other => Err(ToolError::UnknownTool { name: other.to_string() }),
        }
    }
}

/// Result of a tool execution, as sent back to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error result; the text is prefixed so the model can tell
    pub fn error(err: impl std::fmt::Display) -> Self {
        Self {
            content: format!("Error: {}", err),
            is_error: true,
        }
    }
}
