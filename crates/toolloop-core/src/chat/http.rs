//! HTTP chat transport for OpenAI-compatible chat-completion proxies

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use super::transport::{
    ChatCompletionRequest, ChatCompletionResponse, ChatTransport, TransportError, TransportResult,
};
use crate::logging::Logger;

/// Posts conversations to `<base_url>/v1/chat/completions`
pub struct HttpChatTransport {
    client: Client,
    base_url: String,
    logger: Arc<dyn Logger>,
}

impl HttpChatTransport {
    /// Create a transport for the proxy at `base_url`
    pub fn new(base_url: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_client(Client::new(), base_url, logger)
    }

    /// Create a transport reusing a configured `reqwest` client
    pub fn with_client(client: Client, base_url: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            logger,
        }
    }

    /// Full URL of the completions endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn complete(&self, request: &ChatCompletionRequest<'_>) -> TransportResult<ChatCompletionResponse> {
        let url = self.endpoint();
        self.logger.debug(&format!(
            "[HttpChatTransport] POST {} (model={}, messages={}, tools={})",
            url,
            request.model,
            request.messages.len(),
            request.tools.len()
        ));

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            self.logger.error(&format!("[HttpChatTransport] {} returned {}", url, status));
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
