//! run_shell tool - execute a shell command for the model

use serde_json::Value;
use tracing::{debug, info};

use super::{ToolError, ToolName, ToolResult};
use crate::llm::ToolDefinition;
use crate::shell::ShellExecutor;

/// Decoded `run_shell` arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunShellArgs {
    pub command: String,
}

impl RunShellArgs {
    /// Decode the raw JSON argument string sent by the model
    ///
    /// A blank string is read as `{}` and so fails on the missing field.
    pub fn parse(arguments: &str) -> Result<Self, ToolError> {
        debug!(%arguments, "RunShellArgs::parse: called");
        let arguments = if arguments.trim().is_empty() { "{}" } else { arguments };

        let value: Value = serde_json::from_str(arguments)
            .map_err(|e| ToolError::malformed(format!("arguments are not valid JSON: {}", e)))?;

        let Value::Object(mut fields) = value else {
            return Err(ToolError::malformed("arguments must be a JSON object"));
        };

        match fields.remove("command") {
            Some(Value::String(command)) => Ok(Self { command }),
            Some(_) => Err(ToolError::malformed("field `command` must be a string")),
            None => Err(ToolError::malformed("missing required field `command`")),
        }
    }
}

/// Execute a shell command on the local machine
pub struct RunShellTool {
    executor: ShellExecutor,
}

impl RunShellTool {
    pub fn new(executor: ShellExecutor) -> Self {
        Self { executor }
    }

    /// Static tool declaration sent with every model call
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            ToolName::RunShell.as_str(),
            "Execute a shell command on the local machine.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "Command to execute, passed directly to the shell."
                    }
                },
                "required": ["command"]
            }),
        )
    }

    /// Run the call and render its outcome for the model
    ///
    /// Bad arguments, spawn failures and timeouts come back as error results.
    pub async fn execute(&self, arguments: &str) -> ToolResult {
        debug!(%arguments, "RunShellTool::execute: called");
        let args = match RunShellArgs::parse(arguments) {
            Ok(args) => args,
            Err(e) => {
                info!(error = %e, "Rejected run_shell call");
                return ToolResult::error(e);
            }
        };

        info!(command = %args.command, "Running shell command");
        match self.executor.run(&args.command).await {
            Ok(result) => {
                debug!(exit_code = result.exit_code(), "RunShellTool::execute: command finished");
                ToolResult::success(result.to_tool_message())
            }
            Err(e) => {
                debug!(error = %e, "RunShellTool::execute: shell error");
                ToolResult::error(e)
            }
        }
    }
}
