//! Tool error types

use thiserror::Error;

/// Errors decoding or routing a tool call
///
/// These never abort the loop; they become error tool results.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Malformed tool call: {reason}")]
    MalformedToolCall { reason: String },

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },
}

impl ToolError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ToolError::MalformedToolCall { reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message() {
        let err = ToolError::malformed("missing required field `command`");
        assert_eq!(err.to_string(), "Malformed tool call: missing required field `command`");
    }

    #[test]
    fn test_unknown_tool_message() {
        let err = ToolError::UnknownTool {
            name: "delete_everything".to_string(),
        };
        assert!(err.to_string().contains("delete_everything"));
    }
}
