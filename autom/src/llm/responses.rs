//! OpenAI Responses API client
//!
//! Implements the LlmClient trait for `POST /v1/responses`. The wire output is
//! decoded once here into [`OutputItem`]s; item types the agent does not act
//! on (reasoning, web search, ...) are dropped with a warning.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::http::{build_http, post_json};
use super::{
    CompletionRequest, CompletionResponse, LlmClient, LlmError, Message, OutputItem, Role, TokenUsage, ToolCall,
};
use crate::config::LlmConfig;

/// OpenAI Responses API client
pub struct OpenAIResponsesClient {
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl OpenAIResponsesClient {
    /// Create a new client from configuration
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(base_url = %config.base_url, "OpenAIResponsesClient::from_config: called");
        let api_key = config.api_key()?;
        let http = build_http(config.timeout())?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            max_tokens: config.max_tokens,
        })
    }

    /// Build the request body for the Responses API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(model = %request.model, message_count = request.messages.len(), "build_request_body: called");

        let mut body = serde_json::json!({
            "model": request.model,
            "instructions": request.system_prompt,
            "input": convert_messages(&request.messages),
            "max_output_tokens": self.max_tokens,
        });

        if !request.tools.is_empty() {
            body["tools"] = serde_json::json!(
                request
                    .tools
                    .iter()
                    .map(|t| t.to_responses_schema())
                    .collect::<Vec<_>>()
            );
        }

        body
    }
}

/// Map conversation messages to Responses API input items
fn convert_messages(messages: &[Message]) -> Vec<serde_json::Value> {
    messages
        .iter()
        .map(|msg| match (msg.role, &msg.tool_call_id) {
            (Role::Assistant, Some(call_id)) => serde_json::json!({
                "type": "function_call",
                "call_id": call_id,
                "name": msg.tool_name.as_deref().unwrap_or_default(),
                "arguments": msg.content,
            }),
            (Role::Tool, call_id) => serde_json::json!({
                "type": "function_call_output",
                "call_id": call_id.as_deref().unwrap_or_default(),
                "output": msg.content,
            }),
            (role, _) => serde_json::json!({
                "role": role,
                "content": msg.content,
            }),
        })
        .collect()
}

/// Decode the wire response into provider-agnostic output items
fn parse_response(api_response: ResponsesApiResponse) -> CompletionResponse {
    debug!(item_count = api_response.output.len(), "parse_response: called");
    let mut output = Vec::with_capacity(api_response.output.len());

    for item in api_response.output {
        match item {
            WireOutputItem::Message { content } => {
                let text = content
                    .into_iter()
                    .filter_map(|part| match part {
                        WireContentPart::OutputText { text } | WireContentPart::Text { text } => Some(text),
                        WireContentPart::Other => None,
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
                    .trim()
                    .to_string();
                output.push(OutputItem::Message { text });
            }
            WireOutputItem::FunctionCall {
                call_id,
                name,
                arguments,
            } => {
                output.push(OutputItem::ToolCall(ToolCall::new(call_id, name, arguments)));
            }
            WireOutputItem::Unsupported => {
                warn!("Dropping unsupported Responses API output item");
            }
        }
    }

    let usage = api_response
        .usage
        .map(|u| TokenUsage {
            input_tokens: u.input_tokens,
            output_tokens: u.output_tokens,
        })
        .unwrap_or_default();

    CompletionResponse { output, usage }
}

#[async_trait]
impl LlmClient for OpenAIResponsesClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(model = %request.model, "OpenAIResponsesClient::complete: called");
        let url = format!("{}/v1/responses", self.base_url);
        let body = self.build_request_body(&request);

        let api_response: ResponsesApiResponse = post_json(&self.http, &url, &self.api_key, &body).await?;
        Ok(parse_response(api_response))
    }
}

// Responses API wire types

#[derive(Debug, Deserialize)]
struct ResponsesApiResponse {
    #[serde(default)]
    output: Vec<WireOutputItem>,
    usage: Option<ResponsesUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireOutputItem {
    Message {
        #[serde(default)]
        content: Vec<WireContentPart>,
    },
    FunctionCall {
        call_id: String,
        name: String,
        #[serde(default)]
        arguments: String,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireContentPart {
    OutputText { text: String },
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ResponsesUsage {
    input_tokens: u64,
    output_tokens: u64,
}
