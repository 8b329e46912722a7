//! OpenAI Chat Completions client
//!
//! Implements the LlmClient trait for `POST /v1/chat/completions`, for
//! OpenAI-compatible servers that do not offer the Responses API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::http::{build_http, post_json};
use super::{
    CompletionRequest, CompletionResponse, LlmClient, LlmError, Message, OutputItem, Role, TokenUsage, ToolCall,
};
use crate::config::LlmConfig;

/// OpenAI Chat Completions client
pub struct OpenAIChatClient {
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl OpenAIChatClient {
    /// Create a new client from configuration
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(base_url = %config.base_url, "OpenAIChatClient::from_config: called");
        let api_key = config.api_key()?;
        let http = build_http(config.timeout())?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            max_tokens: config.max_tokens,
        })
    }

    /// Build the request body for the Chat Completions API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(model = %request.model, message_count = request.messages.len(), "build_request_body: called");

        let mut messages = vec![serde_json::json!({
            "role": "system",
            "content": request.system_prompt,
        })];
        messages.extend(request.messages.iter().map(convert_message));

        // GPT-5.x and o-series models use max_completion_tokens instead of max_tokens
        let uses_completion_tokens = ["gpt-5", "o1", "o3", "o4"]
            .iter()
            .any(|prefix| request.model.starts_with(prefix));

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": messages,
        });

        if uses_completion_tokens {
            body["max_completion_tokens"] = serde_json::json!(self.max_tokens);
        } else {
            body["max_tokens"] = serde_json::json!(self.max_tokens);
        }

        if !request.tools.is_empty() {
            body["tools"] = serde_json::json!(request.tools.iter().map(|t| t.to_chat_schema()).collect::<Vec<_>>());
            body["tool_choice"] = serde_json::json!("auto");
        }

        body
    }
}

/// Map one conversation message to a chat message
///
/// Each tool call becomes its own assistant message; the result that follows
/// it answers it by `tool_call_id`.
fn convert_message(msg: &Message) -> serde_json::Value {
    match (msg.role, &msg.tool_call_id) {
        (Role::Assistant, Some(call_id)) => serde_json::json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": call_id,
                "type": "function",
                "function": {
                    "name": msg.tool_name.as_deref().unwrap_or_default(),
                    "arguments": msg.content,
                }
            }],
        }),
        (Role::Tool, call_id) => serde_json::json!({
            "role": "tool",
            "tool_call_id": call_id.as_deref().unwrap_or_default(),
            "content": msg.content,
        }),
        (role, _) => serde_json::json!({
            "role": role,
            "content": msg.content,
        }),
    }
}

/// Flatten the first choice into ordered output items: text, then tool calls
fn parse_response(api_response: ChatResponse) -> CompletionResponse {
    debug!(choice_count = api_response.choices.len(), "parse_response: called");
    let mut output = Vec::new();

    if let Some(choice) = api_response.choices.into_iter().next() {
        if let Some(text) = choice.message.content.map(|t| t.trim().to_string())
            && !text.is_empty()
        {
            output.push(OutputItem::Message { text });
        }

        for tc in choice.message.tool_calls.unwrap_or_default() {
            output.push(OutputItem::ToolCall(ToolCall::new(
                tc.id,
                tc.function.name,
                tc.function.arguments,
            )));
        }
    }

    let usage = api_response
        .usage
        .map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        })
        .unwrap_or_default();

    CompletionResponse { output, usage }
}

#[async_trait]
impl LlmClient for OpenAIChatClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(model = %request.model, "OpenAIChatClient::complete: called");
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_request_body(&request);

        let api_response: ChatResponse = post_json(&self.http, &url, &self.api_key, &body).await?;
        Ok(parse_response(api_response))
    }
}

// Chat Completions wire types

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ChatToolCall {
    id: String,
    function: ChatFunction,
}

#[derive(Debug, Deserialize)]
struct ChatFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}
