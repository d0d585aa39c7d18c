//! Mock chat transport for testing
//!
//! Replays a script of replies and records every request it receives.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::transport::{
    ChatCompletionRequest, ChatCompletionResponse, ChatTransport, TransportError, TransportResult,
};
use crate::types::{ChatMessage, FunctionSchema, ToolCallRequest, ToolChoice};

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A response whose first choice carries this message
    Message(ChatMessage),
    /// A response with no choices
    Empty,
    /// A network failure (classified as "proxy unavailable")
    NetworkError(String),
    /// A non-success HTTP status
    StatusError(u16),
}

impl MockReply {
    /// Final assistant answer
    pub fn answer(text: impl Into<String>) -> Self {
        MockReply::Message(ChatMessage::assistant(text))
    }

    /// Assistant turn requesting `calls`, with no text content
    pub fn tool_calls(calls: Vec<ToolCallRequest>) -> Self {
        MockReply::Message(ChatMessage::assistant_tool_calls(None, calls))
    }
}

/// Owned copy of a request the mock received
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<FunctionSchema>,
    pub tool_choice: Option<ToolChoice>,
}

#[derive(Debug, Default)]
struct MockChatState {
    script: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Scripted [`ChatTransport`]
///
/// Replies are consumed in order. With [`MockChatTransport::repeating`] the
/// last reply is replayed forever once the script runs out; otherwise an
/// exhausted script is an error.
#[derive(Debug, Clone, Default)]
pub struct MockChatTransport {
    state: Arc<MockChatState>,
    repeat_last: bool,
}

impl MockChatTransport {
    /// Transport replaying `replies` once
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            state: Arc::new(MockChatState {
                script: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }),
            repeat_last: false,
        }
    }

    /// Transport answering every request with `reply`
    pub fn repeating(reply: MockReply) -> Self {
        Self {
            repeat_last: true,
            ..Self::new(vec![reply])
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.state.requests.lock().len()
    }

    fn next_reply(&self) -> Option<MockReply> {
        let mut script = self.state.script.lock();
        if self.repeat_last && script.len() == 1 {
            return script.front().cloned();
        }
        script.pop_front()
    }
}

#[async_trait]
impl ChatTransport for MockChatTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &ChatCompletionRequest<'_>) -> TransportResult<ChatCompletionResponse> {
        self.state.requests.lock().push(RecordedRequest {
            model: request.model.to_string(),
            messages: request.messages.to_vec(),
            tools: request.tools.to_vec(),
            tool_choice: request.tool_choice,
        });

        match self.next_reply() {
            Some(MockReply::Message(message)) => Ok(ChatCompletionResponse::from_message(message)),
            Some(MockReply::Empty) => Ok(ChatCompletionResponse::default()),
            Some(MockReply::NetworkError(message)) => Err(TransportError::Network(message)),
            Some(MockReply::StatusError(status)) => Err(TransportError::Status {
                status,
                body: "mock status error".to_string(),
            }),
            None => Err(TransportError::Other("Mock script exhausted".to_string())),
        }
    }
}
