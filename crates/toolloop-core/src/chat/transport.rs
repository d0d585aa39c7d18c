//! Chat transport trait and wire types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ChatMessage, FunctionSchema, ToolChoice};

/// Errors from one chat-completion round trip
#[derive(Error, Debug)]
pub enum TransportError {
    /// The proxy could not be reached
    #[error("fetch failed: {0}")]
    Network(String),

    /// Network/HTTP error from the client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The proxy answered with a non-success status
    #[error("Chat proxy error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The response body was not a chat completion
    #[error("Invalid chat completion response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Whether the request never got an HTTP answer
    pub fn is_network(&self) -> bool {
        match self {
            TransportError::Network(_) => true,
            TransportError::Http(e) => e.is_connect() || e.is_timeout() || (e.is_request() && e.status().is_none()),
            _ => false,
        }
    }
}

pub type TransportResult<T> = Result<T, TransportError>;

/// Body of `POST /v1/chat/completions`
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    /// Omitted from the body when the catalog is empty
    #[serde(skip_serializing_if = "no_tools")]
    pub tools: &'a [FunctionSchema],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

fn no_tools(tools: &&[FunctionSchema]) -> bool {
    tools.is_empty()
}

impl<'a> ChatCompletionRequest<'a> {
    /// Build a request offering `tools` with automatic tool choice
    pub fn new(model: &'a str, messages: &'a [ChatMessage], tools: &'a [FunctionSchema]) -> Self {
        Self {
            model,
            messages,
            tools,
            tool_choice: (!tools.is_empty()).then_some(ToolChoice::Auto),
        }
    }
}

/// One entry of `choices`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChatMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Decoded chat completion response
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    /// Response whose only choice carries `message`
    pub fn from_message(message: ChatMessage) -> Self {
        Self {
            choices: vec![ChatChoice {
                message: Some(message),
                finish_reason: None,
            }],
        }
    }

    /// Take the first choice's message, if any
    pub fn into_first_message(self) -> Option<ChatMessage> {
        self.choices.into_iter().next().and_then(|choice| choice.message)
    }
}

/// Performs one chat-completion request
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Send the conversation and return the decoded response
    async fn complete(&self, request: &ChatCompletionRequest<'_>) -> TransportResult<ChatCompletionResponse>;
}
