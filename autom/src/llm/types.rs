//! LLM request/response types for autom
//!
//! Provider-agnostic shapes: each client maps these to and from its own wire
//! format, so the agent loop only ever sees [`OutputItem`]s.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A completion request - everything needed for one model call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,

    /// Fixed system instruction, sent ahead of the conversation
    pub system_prompt: String,

    /// Full conversation so far
    pub messages: Vec<Message>,

    /// Tools the model may call
    pub tools: Vec<ToolDefinition>,
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A message in the conversation
///
/// Tool traffic uses the optional fields: an assistant message with a
/// `tool_call_id` is the model's call (content holds the raw arguments), a
/// `Tool` message is the matching result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    fn text(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_name: None,
            tool_call_id: None,
        }
    }

    /// Create a user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        debug!("Message::user: called");
        Self::text(Role::User, text)
    }

    /// Create an assistant message with text content
    pub fn assistant(text: impl Into<String>) -> Self {
        debug!("Message::assistant: called");
        Self::text(Role::Assistant, text)
    }

    /// Record the model's tool call so it can be replayed ahead of its result
    pub fn tool_call(call: &ToolCall) -> Self {
        debug!(tool_name = %call.name, tool_call_id = %call.id, "Message::tool_call: called");
        Self {
            role: Role::Assistant,
            content: call.arguments.clone(),
            tool_name: Some(call.name.clone()),
            tool_call_id: Some(call.id.clone()),
        }
    }

    /// Create a tool result message answering the call `call_id`
    pub fn tool_result(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        debug!("Message::tool_result: called");
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_name: Some(tool_name.into()),
            tool_call_id: Some(call_id.into()),
        }
    }

    pub fn is_tool_call(&self) -> bool {
        self.role == Role::Assistant && self.tool_call_id.is_some()
    }

    pub fn is_tool_result(&self) -> bool {
        self.role == Role::Tool
    }
}

/// A tool call requested by the model
///
/// `arguments` is the JSON string exactly as the model sent it; it is only
/// decoded when the call is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// One item of model output, in emission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputItem {
    /// Plain text for the user
    Message { text: String },

    /// Request to invoke a tool
    ToolCall(ToolCall),
}

impl OutputItem {
    pub fn message(text: impl Into<String>) -> Self {
        OutputItem::Message { text: text.into() }
    }
}

/// Response from a completion request
#[derive(Debug, Clone, Default)]
pub struct CompletionResponse {
    /// Output items in the order the model produced them
    pub output: Vec<OutputItem>,

    /// Token usage for this call
    pub usage: TokenUsage,
}

impl CompletionResponse {
    pub fn new(output: Vec<OutputItem>) -> Self {
        Self {
            output,
            usage: TokenUsage::default(),
        }
    }

    pub fn tool_calls(&self) -> impl Iterator<Item = &ToolCall> {
        self.output.iter().filter_map(|item| match item {
            OutputItem::ToolCall(call) => Some(call),
            OutputItem::Message { .. } => None,
        })
    }
}

/// Token usage, summed across a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn add(&mut self, other: TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }

    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Tool definition for the LLM
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: serde_json::Value) -> Self {
        let name = name.into();
        let description = description.into();
        debug!(%name, "ToolDefinition::new: called");
        Self {
            name,
            description,
            input_schema,
        }
    }

    /// Flat function-tool shape used by the Responses API
    pub fn to_responses_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "name": self.name,
            "description": self.description,
            "parameters": self.input_schema,
        })
    }

    /// Nested function-tool shape used by Chat Completions
    pub fn to_chat_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.input_schema,
            }
        })
    }
}
