//! LLM client module for autom
//!
//! The [`LlmClient`] trait is the remote-model boundary. Two OpenAI-compatible
//! clients implement it; [`create_client`] picks one from config.

use std::sync::Arc;

use tracing::debug;

mod chat;
pub mod client;
mod error;
mod http;
mod responses;
mod types;

pub use chat::OpenAIChatClient;
pub use client::LlmClient;
pub use error::LlmError;
pub use responses::OpenAIResponsesClient;
pub use types::{
    CompletionRequest, CompletionResponse, Message, OutputItem, Role, TokenUsage, ToolCall, ToolDefinition,
};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Supports "openai" (Responses API) and "openai-chat" (Chat Completions).
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "openai" => {
            debug!("create_client: creating Responses API client");
            Ok(Arc::new(OpenAIResponsesClient::from_config(config)?))
        }
        "openai-chat" => {
            debug!("create_client: creating Chat Completions client");
            Ok(Arc::new(OpenAIChatClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::UnknownProvider(other.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn config(provider: &str) -> LlmConfig {
        LlmConfig {
            provider: provider.to_string(),
            api_key_env: "AUTOM_TEST_FACTORY_KEY".to_string(),
            ..Default::default()
        }
    }

    #[test]
    #[serial]
    fn test_create_client_known_providers() {
        // SAFETY: serialized with the other env-mutating tests
        unsafe { std::env::set_var("AUTOM_TEST_FACTORY_KEY", "sk-test") };

        assert!(create_client(&config("openai")).is_ok());
        assert!(create_client(&config("openai-chat")).is_ok());

        unsafe { std::env::remove_var("AUTOM_TEST_FACTORY_KEY") };
    }

    #[test]
    #[serial]
    fn test_create_client_unknown_provider() {
        unsafe { std::env::set_var("AUTOM_TEST_FACTORY_KEY", "sk-test") };

        let result = create_client(&config("anthropic"));
        assert!(matches!(result, Err(LlmError::UnknownProvider(ref p)) if p == "anthropic"));

        unsafe { std::env::remove_var("AUTOM_TEST_FACTORY_KEY") };
    }

    #[test]
    #[serial]
    fn test_create_client_missing_key() {
        unsafe { std::env::remove_var("AUTOM_TEST_FACTORY_KEY") };

        let result = create_client(&config("openai"));
        assert!(matches!(result, Err(LlmError::MissingApiKey { .. })));
    }
}
