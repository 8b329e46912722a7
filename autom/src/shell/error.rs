//! Shell execution error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while running a shell command
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Command timed out after {timeout:?}: {command}")]
    Timeout { command: String, timeout: Duration },

    #[error("Failed to spawn shell: {0}")]
    Spawn(#[from] std::io::Error),
}

impl ShellError {
    /// Check if this is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, ShellError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = ShellError::Timeout {
            command: "sleep 10".to_string(),
            timeout: Duration::from_secs(2),
        };

        let msg = err.to_string();
        assert!(msg.contains("timed out"));
        assert!(msg.contains("2s"));
        assert!(msg.contains("sleep 10"));
        assert!(err.is_timeout());
    }

    #[test]
    fn test_spawn_is_not_timeout() {
        let err = ShellError::Spawn(std::io::Error::new(std::io::ErrorKind::NotFound, "no shell"));
        assert!(!err.is_timeout());
        assert!(err.to_string().contains("no shell"));
    }
}
