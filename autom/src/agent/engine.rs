//! Agent - the per-prompt turn loop

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{AgentConfig, AgentError, Conversation};
use crate::llm::{CompletionRequest, LlmClient, Message, OutputItem, TokenUsage, ToolCall, ToolDefinition};
use crate::shell::ShellExecutor;
use crate::tools::{RunShellTool, ToolName, ToolResult};

/// Printed when a turn ends with neither a reply nor a tool call
pub const NO_RESPONSE_PLACEHOLDER: &str = "(No response from model)";

/// How a single prompt finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The model sent a message and requested no further tools
    Replied { turns: u32 },

    /// The model returned nothing usable; the placeholder was printed
    NoResponse { turns: u32 },

    /// Every turn ended in a tool call; the prompt was abandoned
    TurnLimitReached { turns: u32 },
}

impl PromptOutcome {
    /// Model calls spent on the prompt
    pub fn turns(&self) -> u32 {
        match self {
            PromptOutcome::Replied { turns }
            | PromptOutcome::NoResponse { turns }
            | PromptOutcome::TurnLimitReached { turns } => *turns,
        }
    }

    pub fn is_turn_limit(&self) -> bool {
        matches!(self, PromptOutcome::TurnLimitReached { .. })
    }
}

/// Everything a finished run leaves behind
#[derive(Debug, Clone)]
pub struct RunReport {
    /// One outcome per prompt, in prompt order
    pub outcomes: Vec<PromptOutcome>,

    /// Full history, including tool traffic
    pub conversation: Conversation,

    /// Tokens used across all model calls
    pub usage: TokenUsage,
}

impl RunReport {
    /// Number of prompts that ran out of turns
    pub fn turn_limited(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_turn_limit()).count()
    }
}

/// Drives the model/tool exchange for a sequence of prompts
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    config: AgentConfig,
    shell_tool: RunShellTool,
    tool_defs: Vec<ToolDefinition>,
}

impl Agent {
    pub fn new(llm: Arc<dyn LlmClient>, config: AgentConfig) -> Self {
        debug!(model = %config.model, max_turns = config.max_turns, shell_timeout = ?config.shell_timeout, "Agent::new: called");
        let shell_tool = RunShellTool::new(ShellExecutor::new(config.shell_timeout));

        Self {
            llm,
            config,
            shell_tool,
            tool_defs: vec![RunShellTool::definition()],
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Run every prompt in order over one shared conversation
    ///
    /// Model replies are written to `out`. A failed model call stops the run
    /// and is returned; tool failures are handed to the model instead.
    pub async fn run<W: Write>(&self, prompts: &[String], out: &mut W) -> Result<RunReport, AgentError> {
        debug!(prompt_count = prompts.len(), "run: called");
        let mut conversation = Conversation::new();
        let mut usage = TokenUsage::default();
        let mut outcomes = Vec::with_capacity(prompts.len());

        for (idx, prompt) in prompts.iter().enumerate() {
            info!("Prompt {}/{}: {}", idx + 1, prompts.len(), prompt);
            conversation.push(Message::user(prompt.as_str()));

            let outcome = self.run_prompt_turns(&mut conversation, &mut usage, out).await?;
            info!(?outcome, "Prompt {} finished", idx + 1);
            outcomes.push(outcome);
        }

        info!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "Run complete"
        );
        Ok(RunReport {
            outcomes,
            conversation,
            usage,
        })
    }

    /// Convenience wrapper to run a single prompt
    pub async fn run_prompt<W: Write>(&self, prompt: &str, out: &mut W) -> Result<RunReport, AgentError> {
        self.run(&[prompt.to_string()], out).await
    }

    /// Turn loop for the prompt most recently appended to `conversation`
    async fn run_prompt_turns<W: Write>(
        &self,
        conversation: &mut Conversation,
        usage: &mut TokenUsage,
        out: &mut W,
    ) -> Result<PromptOutcome, AgentError> {
        for turn in 1..=self.config.max_turns {
            debug!(turn, max_turns = self.config.max_turns, "run_prompt_turns: turn start");

            let response = match self.llm.complete(self.build_request(conversation)).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(turn, status = ?e.http_status(), error = %e, "Model call failed");
                    return Err(e.into());
                }
            };
            usage.add(response.usage);

            let mut printed = false;
            let mut dispatched = 0usize;

            for item in response.output {
                match item {
                    OutputItem::Message { text } => {
                        // A message item counts as output even when blank
                        printed = true;
                        let text = text.trim();
                        if text.is_empty() {
                            debug!(turn, "run_prompt_turns: blank message, nothing to print");
                            continue;
                        }
                        writeln!(out, "{}", text)?;
                        out.flush()?;
                        conversation.push(Message::assistant(text));
                    }
                    OutputItem::ToolCall(call) => {
                        // The call and its result go in back to back
                        conversation.push(Message::tool_call(&call));
                        let result = self.dispatch(&call).await;
                        conversation.push(Message::tool_result(call.id, call.name, result.content));
                        dispatched += 1;
                    }
                }
            }

            if dispatched > 0 {
                debug!(turn, dispatched, "run_prompt_turns: tools dispatched, calling model again");
                continue;
            }

            if !printed {
                debug!(turn, "run_prompt_turns: no output this turn");
                writeln!(out, "{}", NO_RESPONSE_PLACEHOLDER)?;
                out.flush()?;
                return Ok(PromptOutcome::NoResponse { turns: turn });
            }

            return Ok(PromptOutcome::Replied { turns: turn });
        }

        warn!(max_turns = self.config.max_turns, "Turn limit reached before the model replied");
        Ok(PromptOutcome::TurnLimitReached {
            turns: self.config.max_turns,
        })
    }

    fn build_request(&self, conversation: &Conversation) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            system_prompt: self.config.system_prompt.clone(),
            messages: conversation.messages().to_vec(),
            tools: self.tool_defs.clone(),
        }
    }

    /// Route a tool call by name; always produces a result
    async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        info!(tool = %call.name, call_id = %call.id, "Dispatching tool call");
        let result = match call.name.parse::<ToolName>() {
            Ok(ToolName::RunShell) => self.shell_tool.execute(&call.arguments).await,
            Err(e) => {
                warn!(tool = %call.name, "Model called an undeclared tool");
                ToolResult::error(e)
            }
        };
        debug!(call_id = %call.id, is_error = result.is_error, "dispatch: complete");
        result
    }
}
