//! Agent error types

use thiserror::Error;

use crate::llm::LlmError;

/// Failures that end a run
///
/// Tool problems never show up here; the model sees them as tool results.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
