//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::AgentOverrides;

/// Autom - command-executing AI bot
#[derive(Parser)]
#[command(
    name = "autom",
    about = "Run the Autom command-executing AI bot",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run Autom against the provided prompts
    Chat {
        /// Initial prompt for the bot
        #[arg(short, long)]
        prompt: Option<String>,

        /// File with prompts, one per line
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Shell command timeout in seconds
        #[arg(short, long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Maximum model-tool exchange loops per prompt
        #[arg(long)]
        max_turns: Option<u32>,
    },

    /// Preview how a command will be escaped
    Quote {
        /// Command words to escape
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl Command {
    /// Command-line values that override config for a chat run
    pub fn agent_overrides(&self) -> AgentOverrides {
        match self {
            Command::Chat {
                model,
                timeout,
                max_turns,
                ..
            } => AgentOverrides {
                model: model.clone(),
                shell_timeout_secs: *timeout,
                max_turns: *max_turns,
            },
            Command::Quote { .. } => AgentOverrides::default(),
        }
    }
}

/// Collect prompts: a non-empty `--prompt` first, then each non-blank line of `--file`
pub fn read_prompts(prompt: Option<&str>, file: Option<&Path>) -> Result<Vec<String>> {
    debug!(?prompt, ?file, "read_prompts: called");
    let mut prompts = Vec::new();

    // `--prompt` is taken as given; only file lines are trimmed
    if let Some(prompt) = prompt.filter(|p| !p.is_empty()) {
        prompts.push(prompt.to_string());
    }

    if let Some(path) = file {
        let content =
            fs::read_to_string(path).context(format!("Failed to read prompt file {}", path.display()))?;
        prompts.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    if prompts.is_empty() {
        debug!("read_prompts: no prompts found");
        return Err(eyre::eyre!("Provide either --prompt or --file with at least one message."));
    }

    debug!(count = prompts.len(), "read_prompts: returning prompts");
    Ok(prompts)
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("autom")
        .join("logs")
        .join("autom.log")
}

/// Generate the after_help text with config search paths and the log location
pub fn generate_after_help() -> String {
    let mut help = String::from("Config files (first found wins):\n  ./.autom.yml\n");
    if let Some(config_dir) = dirs::config_dir() {
        help.push_str(&format!("  {}\n", config_dir.join("autom").join("autom.yml").display()));
    }
    help.push('\n');
    help.push_str(&format!("Logs are written to: {}\n", get_log_path().display()));
    help
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parse_chat_prompt() {
        let cli = Cli::parse_from(["autom", "chat", "--prompt", "list files"]);
        match cli.command {
            Command::Chat {
                prompt,
                file,
                model,
                timeout,
                max_turns,
            } => {
                assert_eq!(prompt.as_deref(), Some("list files"));
                assert!(file.is_none());
                assert!(model.is_none());
                assert!(timeout.is_none());
                assert!(max_turns.is_none());
            }
            other => panic!("Expected Chat command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_chat_options() {
        let cli = Cli::parse_from([
            "autom",
            "chat",
            "-f",
            "prompts.txt",
            "--model",
            "gpt-4o",
            "--timeout",
            "5",
            "--max-turns",
            "2",
        ]);

        let overrides = cli.command.agent_overrides();
        assert_eq!(overrides.model.as_deref(), Some("gpt-4o"));
        assert_eq!(overrides.shell_timeout_secs, Some(5));
        assert_eq!(overrides.max_turns, Some(2));
        assert!(matches!(cli.command, Command::Chat { file: Some(ref f), .. } if f == Path::new("prompts.txt")));
    }

    #[test]
    fn test_cli_parse_quote_with_hyphen_args() {
        let cli = Cli::parse_from(["autom", "quote", "ls", "-la", "my dir"]);
        match cli.command {
            Command::Quote { args } => assert_eq!(args, vec!["ls", "-la", "my dir"]),
            other => panic!("Expected Quote command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_with_global_options() {
        let cli = Cli::parse_from(["autom", "chat", "-p", "hi", "-c", "/path/to/autom.yml", "-l", "debug"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/autom.yml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_read_prompts_prompt_then_file_lines() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("prompts.txt");
        fs::write(&path, "  first line \n\n   \nsecond line\n").unwrap();

        let prompts = read_prompts(Some("initial"), Some(&path)).unwrap();

        assert_eq!(prompts, vec!["initial", "first line", "second line"]);
    }

    #[test]
    fn test_read_prompts_none_is_error() {
        let err = read_prompts(None, None).unwrap_err();
        assert!(err.to_string().contains("Provide either --prompt or --file"));

        let temp = tempdir().unwrap();
        let path = temp.path().join("blank.txt");
        fs::write(&path, "\n  \n").unwrap();
        assert!(read_prompts(Some(""), Some(&path)).is_err());
    }

    #[test]
    fn test_read_prompts_keeps_prompt_verbatim() {
        let prompts = read_prompts(Some("  list files  "), None).unwrap();
        assert_eq!(prompts, vec!["  list files  "]);

        let prompts = read_prompts(Some(" "), None).unwrap();
        assert_eq!(prompts, vec![" "]);
    }

    #[test]
    fn test_read_prompts_missing_file() {
        let err = read_prompts(None, Some(Path::new("/definitely/not/here.txt"))).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
