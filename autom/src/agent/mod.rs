//! Conversation loop
//!
//! Relays prompts to the model, dispatches the `run_shell` calls it makes,
//! and feeds results back until it replies or the turn budget runs out.

mod config;
mod conversation;
mod engine;
mod error;

pub use config::{AgentConfig, DEFAULT_SYSTEM_PROMPT};
pub use conversation::Conversation;
pub use engine::{Agent, NO_RESPONSE_PLACEHOLDER, PromptOutcome, RunReport};
pub use error::AgentError;
