//! ShellExecutor - run one command string through the host shell

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info};

use super::{ShellError, ShellResult};

/// Runs shell commands with a fixed timeout
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    timeout: Duration,
}

impl ShellExecutor {
    pub fn new(timeout: Duration) -> Self {
        debug!(?timeout, "ShellExecutor::new: called");
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute `command` verbatim in the host shell
    ///
    /// A nonzero exit status is a normal result. Exceeding the timeout kills
    /// the child and returns [`ShellError::Timeout`].
    pub async fn run(&self, command: &str) -> Result<ShellResult, ShellError> {
        debug!(%command, timeout = ?self.timeout, "ShellExecutor::run: called");

        let child = shell_command(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, child).await {
            Ok(Ok(output)) => {
                debug!(status = ?output.status, "ShellExecutor::run: command completed");
                output
            }
            Ok(Err(e)) => {
                debug!(%e, "ShellExecutor::run: failed to spawn shell");
                return Err(ShellError::Spawn(e));
            }
            Err(_) => {
                info!(%command, timeout = ?self.timeout, "Shell command timed out");
                return Err(ShellError::Timeout {
                    command: command.to_string(),
                    timeout: self.timeout,
                });
            }
        };

        // Killed by a signal: no exit code to report
        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(exit_code, stdout_len = stdout.len(), stderr_len = stderr.len(), "ShellExecutor::run: captured output");

        Ok(ShellResult::new(command, exit_code, &stdout, &stderr))
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn executor() -> ShellExecutor {
        ShellExecutor::new(Duration::from_secs(10))
    }

    #[tokio::test]
    async fn test_run_echo() {
        let result = executor().run("echo hi").await.unwrap();

        assert_eq!(result.command(), "echo hi");
        assert_eq!(result.exit_code(), 0);
        assert_eq!(result.stdout(), "hi");
        assert_eq!(result.stderr(), "");
        assert_eq!(
            result.to_tool_message(),
            "Command: echo hi\nExit code: 0\nStdout:\nhi\nStderr:\n<empty>"
        );
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_an_error() {
        let result = executor().run("echo oops >&2; exit 3").await.unwrap();

        assert_eq!(result.exit_code(), 3);
        assert_eq!(result.stdout(), "");
        assert_eq!(result.stderr(), "oops");
    }

    #[tokio::test]
    async fn test_command_passed_verbatim_to_shell() {
        let result = executor().run("printf '%s|' a 'b c' && echo").await.unwrap();
        assert_eq!(result.stdout(), "a|b c|");
    }

    #[tokio::test]
    async fn test_timeout_yields_error_not_result() {
        let executor = ShellExecutor::new(Duration::from_millis(200));
        let err = executor.run("sleep 5").await.unwrap_err();

        assert!(err.is_timeout());
        match err {
            ShellError::Timeout { command, timeout } => {
                assert_eq!(command, "sleep 5");
                assert_eq!(timeout, Duration::from_millis(200));
            }
            other => panic!("Expected Timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_repeated_runs_format_identically() {
        let executor = executor();
        let first = executor.run("echo stable; echo warn >&2").await.unwrap();
        let second = executor.run("echo stable; echo warn >&2").await.unwrap();

        assert_eq!(first.to_tool_message(), second.to_tool_message());
    }
}
