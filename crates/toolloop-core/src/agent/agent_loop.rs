//! Agent loop controller
//!
//! Drives the conversation through at most `max_rounds` model rounds:
//!
//! ```text
//! AwaitingModel ──(no tool calls)──────────► Done(answer)
//!      │  ▲
//!      │  └──────(all results appended)──┐
//!      ▼                                 │
//! ExecutingTools ────────────────────────┘
//! ```
//!
//! Running out of rounds while the model still asks for tools ends the run
//! with [`ROUND_LIMIT_ANSWER`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Map;

use super::prompt::seed_conversation;
use crate::chat::{ChatCompletionRequest, ChatTransport};
use crate::config::{DEFAULT_MAX_ROUNDS, DEFAULT_MODEL};
use crate::error::AssistantResult;
use crate::logging::{Logger, NoOpLogger};
use crate::mcp::ToolHost;
use crate::tools::normalize_tool_result;
use crate::types::{ChatMessage, FunctionSchema, RunOutcome, ToolCallRequest};

/// Answer returned when the round budget runs out
pub const ROUND_LIMIT_ANSWER: &str =
    "I couldn't finish this request within the allowed number of tool rounds. Please try a more specific request.";

enum LoopState {
    AwaitingModel,
    ExecutingTools(Vec<ToolCallRequest>),
    Done(RunOutcome),
}

/// One run of the agent loop over a borrowed transport and tool host
pub struct AgentLoop<'a> {
    transport: &'a dyn ChatTransport,
    tools: &'a dyn ToolHost,
    schemas: &'a [FunctionSchema],
    model: String,
    max_rounds: usize,
    timestamp: Option<DateTime<Utc>>,
    logger: Arc<dyn Logger>,
}

impl<'a> AgentLoop<'a> {
    pub fn new(transport: &'a dyn ChatTransport, tools: &'a dyn ToolHost, schemas: &'a [FunctionSchema]) -> Self {
        Self {
            transport,
            tools,
            schemas,
            model: DEFAULT_MODEL.to_string(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            timestamp: None,
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    /// Set the model identifier sent with every request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the round budget
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Pin the timestamp announced to the model (defaults to now)
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Run the loop for `prompt` until the model answers or the budget runs out
    pub async fn run(&self, prompt: &str) -> AssistantResult<RunOutcome> {
        let now = self.timestamp.unwrap_or_else(Utc::now);
        let mut conversation = seed_conversation(prompt, now);
        let mut tool_calls = 0usize;
        let mut round = 0usize;
        let mut state = LoopState::AwaitingModel;

        loop {
            state = match state {
                LoopState::AwaitingModel if round >= self.max_rounds => {
                    self.logger.warn(&format!(
                        "[AgentLoop] Round limit ({}) reached after {} tool calls",
                        self.max_rounds, tool_calls
                    ));
                    LoopState::Done(RunOutcome::new(ROUND_LIMIT_ANSWER, tool_calls))
                }
                LoopState::AwaitingModel => {
                    round += 1;
                    self.logger.debug(&format!(
                        "[AgentLoop] Round {}/{} via {}",
                        round,
                        self.max_rounds,
                        self.transport.name()
                    ));
                    self.await_model(&mut conversation, tool_calls).await?
                }
                LoopState::ExecutingTools(requests) => {
                    tool_calls += self.execute_tools(&mut conversation, &requests).await?;
                    LoopState::AwaitingModel
                }
                LoopState::Done(outcome) => {
                    self.logger.info(&format!(
                        "[AgentLoop] Done after {} round(s), {} tool call(s)",
                        round, outcome.tool_calls
                    ));
                    return Ok(outcome);
                }
            };
        }
    }

    async fn await_model(&self, conversation: &mut Vec<ChatMessage>, tool_calls: usize) -> AssistantResult<LoopState> {
        let request = ChatCompletionRequest::new(&self.model, conversation, self.schemas);
        let response = self.transport.complete(&request).await?;

        let message = match response.into_first_message() {
            Some(message) => message,
            None => {
                self.logger.warn("[AgentLoop] Model returned no choices");
                return Ok(LoopState::Done(RunOutcome::new("", tool_calls)));
            }
        };

        if !message.has_tool_calls() {
            return Ok(LoopState::Done(RunOutcome::new(
                message.content.unwrap_or_default(),
                tool_calls,
            )));
        }

        let requests = message.tool_calls.unwrap_or_default();
        self.logger.info(&format!("[AgentLoop] Model requested {} tool call(s)", requests.len()));
        conversation.push(ChatMessage::assistant_tool_calls(message.content, requests.clone()));

        Ok(LoopState::ExecutingTools(requests))
    }

    /// Invoke each request in order, appending one tool message per request
    async fn execute_tools(
        &self,
        conversation: &mut Vec<ChatMessage>,
        requests: &[ToolCallRequest],
    ) -> AssistantResult<usize> {
        let mut executed = 0;

        for request in requests {
            let arguments = request.parse_arguments().unwrap_or_else(|e| {
                self.logger.warn(&format!(
                    "[AgentLoop] Ignoring arguments of {} ({}): {}",
                    request.name(),
                    request.id,
                    e
                ));
                Map::new()
            });

            let result = self.tools.call_tool(request.name(), arguments).await?;
            executed += 1;

            if result.is_error {
                self.logger.warn(&format!("[AgentLoop] Tool {} reported an error", request.name()));
            }

            conversation.push(ChatMessage::tool(request.id.clone(), normalize_tool_result(&result)));
        }

        Ok(executed)
    }
}
