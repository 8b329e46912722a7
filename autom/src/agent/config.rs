//! Agent loop configuration

use std::time::Duration;

/// System instruction sent ahead of every conversation
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Autom, an assistant that can solve tasks by running shell commands. \
     Use shell responsibly and summarize the results for the user.";

/// Settings for one [`Agent`](super::Agent), fixed for its lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Model identifier sent with every request
    pub model: String,

    /// System instruction
    pub system_prompt: String,

    /// Per-command shell timeout
    pub shell_timeout: Duration,

    /// Maximum model calls per prompt
    pub max_turns: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4.1-mini".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            shell_timeout: Duration::from_secs(30),
            max_turns: 8,
        }
    }
}
