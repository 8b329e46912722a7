//! Autom - a command-executing AI bot
//!
//! Relays user prompts to a language model that can run shell commands
//! through a single `run_shell` tool. Commands run locally under a timeout
//! and their output goes back to the model until it answers or the per-prompt
//! turn budget runs out.
//!
//! # Modules
//!
//! - [`agent`] - Conversation loop and per-prompt outcomes
//! - [`llm`] - LLM client trait and OpenAI implementations
//! - [`tools`] - The `run_shell` tool declaration and dispatch
//! - [`shell`] - Shell execution and result formatting
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//! - [`quote`] - Shell quoting helper

pub mod agent;
pub mod cli;
pub mod config;
pub mod llm;
pub mod quote;
pub mod shell;
pub mod tools;

// Re-export commonly used types
pub use agent::{Agent, AgentConfig, AgentError, Conversation, PromptOutcome, RunReport};
pub use config::{Config, LlmConfig};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, Message, OutputItem, create_client};
pub use shell::{ShellError, ShellExecutor, ShellResult};
pub use tools::{RunShellTool, ToolError, ToolResult};
