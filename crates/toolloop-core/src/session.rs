//! Session lifecycle
//!
//! [`Assistant`] is the entry point: one call to [`Assistant::run`] validates
//! the prompt and configuration, opens a tool host connection, runs the agent
//! loop, and closes the connection on every exit path.

use std::sync::Arc;

use crate::agent::AgentLoop;
use crate::chat::{ChatTransport, HttpChatTransport};
use crate::config::{AssistantConfig, ResolvedConfig};
use crate::error::{AssistantError, AssistantResult};
use crate::logging::{Logger, NoOpLogger};
use crate::mcp::{McpConnector, ToolHost, ToolHostConnector};
use crate::tools::adapt_catalog;
use crate::types::RunOutcome;
use crate::{log_error, log_info, log_warn};

/// Runs prompts against a tool server and a chat-completion proxy
pub struct Assistant {
    config: AssistantConfig,
    connector: Arc<dyn ToolHostConnector>,
    transport: Option<Arc<dyn ChatTransport>>,
    logger: Arc<dyn Logger>,
}

impl Assistant {
    /// Create an assistant using MCP and the HTTP chat proxy named in `config`
    ///
    /// Configuration is validated on each run, not here.
    pub fn new(config: AssistantConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            config,
            connector: Arc::new(McpConnector::new(logger.clone())),
            transport: None,
            logger,
        }
    }

    /// Create an assistant that does not log
    pub fn silent(config: AssistantConfig) -> Self {
        Self::new(config, Arc::new(NoOpLogger::new()))
    }

    /// Open tool host connections through `connector`
    pub fn with_connector(mut self, connector: Arc<dyn ToolHostConnector>) -> Self {
        self.connector = connector;
        self
    }

    /// Send completions through `transport` instead of the configured proxy
    pub fn with_transport(mut self, transport: Arc<dyn ChatTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Answer `prompt`, calling tools as the model requests
    pub async fn run(&self, prompt: &str) -> AssistantResult<RunOutcome> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AssistantError::InvalidPrompt);
        }

        let resolved = self.config.resolve().map_err(|e| {
            log_error!(self.logger, "[Assistant] Configuration rejected: {}", e);
            AssistantError::from(e)
        })?;

        let mut host = self.connector.connect(&resolved.tool_server_url).await?;

        let outcome = self.run_connected(host.as_ref(), &resolved, prompt).await;

        if let Err(e) = host.close().await {
            log_warn!(self.logger, "[Assistant] Failed to close tool host connection: {}", e);
        }

        if let Err(e) = &outcome {
            log_error!(self.logger, "[Assistant] Run failed: {}", e);
        }
        outcome
    }

    async fn run_connected(
        &self,
        host: &dyn ToolHost,
        resolved: &ResolvedConfig,
        prompt: &str,
    ) -> AssistantResult<RunOutcome> {
        let catalog = host.list_tools().await?;
        let schemas = adapt_catalog(&catalog, &resolved.tool_filter);
        log_info!(
            self.logger,
            "[Assistant] Offering {} of {} tools to {}",
            schemas.len(),
            catalog.len(),
            resolved.model
        );

        let transport = self.transport_for(resolved);

        AgentLoop::new(transport.as_ref(), host, &schemas)
            .with_model(resolved.model.clone())
            .with_max_rounds(resolved.max_rounds)
            .with_logger(self.logger.clone())
            .run(prompt)
            .await
    }

    fn transport_for(&self, resolved: &ResolvedConfig) -> Arc<dyn ChatTransport> {
        match &self.transport {
            Some(transport) => transport.clone(),
            None => Arc::new(HttpChatTransport::new(
                resolved.chat_proxy_url.clone(),
                self.logger.clone(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ROUND_LIMIT_ANSWER;
    use crate::chat::{MockChatTransport, MockReply};
    use crate::config::ConfigError;
    use crate::logging::{Level, MemoryLogger};
    use crate::mcp::{MockConnector, MockToolHost};
    use crate::types::{ToolCallRequest, ToolDescriptor};

    fn config() -> AssistantConfig {
        AssistantConfig::new()
            .with_tool_server_url("http://tools.local/mcp")
            .with_chat_proxy_url("http://proxy.local")
    }

    fn calendar() -> MockToolHost {
        MockToolHost::new(vec![
            ToolDescriptor::new("listEvents"),
            ToolDescriptor::new("deleteEvent"),
        ])
        .with_text("listEvents", "No events")
    }

    fn assistant(
        config: AssistantConfig,
        connector: Arc<MockConnector>,
        transport: MockChatTransport,
        logger: Arc<MemoryLogger>,
    ) -> Assistant {
        Assistant::new(config, logger)
            .with_connector(connector)
            .with_transport(Arc::new(transport))
    }

    #[tokio::test]
    async fn test_run_lists_tools_and_closes_once() {
        let host = calendar();
        let connector = Arc::new(MockConnector::new(host.clone()));
        let transport = MockChatTransport::new(vec![
            MockReply::tool_calls(vec![ToolCallRequest::new("call_1", "listEvents", "{}")]),
            MockReply::answer("You have no events tomorrow."),
        ]);
        let logger = Arc::new(MemoryLogger::new());

        let outcome = assistant(config(), connector.clone(), transport.clone(), logger)
            .run("  List my events for tomorrow  ")
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::new("You have no events tomorrow.", 1));
        assert_eq!(connector.connected_urls(), vec!["http://tools.local/mcp"]);
        assert_eq!(host.close_count(), 1);

        let first = &transport.requests()[0];
        assert_eq!(first.model, crate::config::DEFAULT_MODEL);
        assert_eq!(first.tools.len(), 2);
        assert_eq!(first.messages[2].content.as_deref(), Some("List my events for tomorrow"));
    }

    #[tokio::test]
    async fn test_blank_prompt_is_rejected_before_anything_else() {
        let connector = Arc::new(MockConnector::new(calendar()));
        let transport = MockChatTransport::new(vec![]);

        let err = assistant(AssistantConfig::new(), connector.clone(), transport.clone(), Arc::new(MemoryLogger::new()))
            .run(" \n\t ")
            .await
            .unwrap_err();

        assert!(matches!(err, AssistantError::InvalidPrompt));
        assert_eq!(err.status_code(), 400);
        assert_eq!(connector.connect_count(), 0);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_config_never_connects() {
        let connector = Arc::new(MockConnector::new(calendar()));
        let transport = MockChatTransport::new(vec![MockReply::answer("unused")]);
        let config = AssistantConfig::new().with_tool_server_url("http://tools.local/mcp");

        let err = assistant(config, connector.clone(), transport.clone(), Arc::new(MemoryLogger::new()))
            .run("Hello")
            .await
            .unwrap_err();

        assert!(err.is_config_missing());
        assert!(matches!(
            &err,
            AssistantError::Config(ConfigError::Incomplete { missing }) if missing == &vec!["chat_proxy_url"]
        ));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "env incomplete");
        assert_eq!(connector.connect_count(), 0);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_close_runs_after_loop_failure() {
        let host = calendar();
        let connector = Arc::new(MockConnector::new(host.clone()));
        let transport = MockChatTransport::new(vec![MockReply::NetworkError("connection refused".into())]);

        let err = assistant(config(), connector, transport, Arc::new(MemoryLogger::new()))
            .run("Hello")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 502);
        assert_eq!(err.public_message(), "proxy unavailable");
        assert_eq!(host.close_count(), 1);
    }

    #[tokio::test]
    async fn test_close_runs_after_list_failure() {
        let host = calendar().failing_list();
        let connector = Arc::new(MockConnector::new(host.clone()));
        let transport = MockChatTransport::new(vec![MockReply::answer("unused")]);

        let err = assistant(config(), connector, transport.clone(), Arc::new(MemoryLogger::new()))
            .run("Hello")
            .await
            .unwrap_err();

        assert!(matches!(err, AssistantError::ToolHost(_)));
        assert_eq!(host.close_count(), 1);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_close_failure_is_logged_not_returned() {
        let host = calendar().failing_close();
        let connector = Arc::new(MockConnector::new(host.clone()));
        let transport = MockChatTransport::new(vec![MockReply::answer("Hi!")]);
        let logger = Arc::new(MemoryLogger::new());

        let outcome = assistant(config(), connector, transport, logger.clone())
            .run("Hello")
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::new("Hi!", 0));
        assert_eq!(host.close_count(), 1);
        assert!(logger
            .messages_at(Level::Warn)
            .iter()
            .any(|m| m.contains("Failed to close tool host connection")));
    }

    #[tokio::test]
    async fn test_close_failure_does_not_mask_run_error() {
        let host = calendar().failing_close().with_failure("listEvents", "calendar offline");
        let connector = Arc::new(MockConnector::new(host.clone()));
        let transport = MockChatTransport::new(vec![MockReply::tool_calls(vec![ToolCallRequest::new(
            "call_1",
            "listEvents",
            "{}",
        )])]);
        let logger = Arc::new(MemoryLogger::new());

        let err = assistant(config(), connector, transport, logger.clone())
            .run("Hello")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Tool call failed: calendar offline");
        assert_eq!(host.close_count(), 1);
        assert!(logger.contains("Failed to close"));
    }

    #[tokio::test]
    async fn test_unreachable_tool_server_maps_to_502() {
        let connector = Arc::new(MockConnector::unreachable());
        let transport = MockChatTransport::new(vec![]);

        let err = assistant(config(), connector.clone(), transport, Arc::new(MemoryLogger::new()))
            .run("Hello")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 502);
        assert_eq!(connector.connect_count(), 1);
    }

    #[tokio::test]
    async fn test_tool_server_dropping_mid_run_maps_to_502() {
        let host = calendar().with_disconnect("listEvents");
        let connector = Arc::new(MockConnector::new(host.clone()));
        let transport = MockChatTransport::new(vec![MockReply::tool_calls(vec![ToolCallRequest::new(
            "call_1",
            "listEvents",
            "{}",
        )])]);

        let err = assistant(config(), connector, transport, Arc::new(MemoryLogger::new()))
            .run("List my events for tomorrow")
            .await
            .unwrap_err();

        assert!(err.is_network());
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.public_message(), "proxy unavailable");
        assert_eq!(host.close_count(), 1);
    }

    #[tokio::test]
    async fn test_config_shapes_the_run() {
        let host = calendar();
        let connector = Arc::new(MockConnector::new(host.clone()));
        let transport = MockChatTransport::repeating(MockReply::tool_calls(vec![ToolCallRequest::new(
            "call_1",
            "listEvents",
            "{}",
        )]));
        let mut config = config().with_model("gpt-4o").with_max_rounds(2);
        config.tools.exclude = vec!["deleteEvent".to_string()];

        let outcome = assistant(config, connector, transport.clone(), Arc::new(MemoryLogger::new()))
            .run("Loop")
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::new(ROUND_LIMIT_ANSWER, 2));
        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].model, "gpt-4o");
        let offered: Vec<_> = requests[0].tools.iter().map(|t| t.name().to_string()).collect();
        assert_eq!(offered, vec!["listEvents"]);
        assert_eq!(host.close_count(), 1);
    }

    #[tokio::test]
    async fn test_runs_do_not_share_connections() {
        let host = calendar();
        let connector = Arc::new(MockConnector::new(host.clone()));
        let transport = MockChatTransport::new(vec![MockReply::answer("one"), MockReply::answer("two")]);
        let assistant = assistant(config(), connector.clone(), transport, Arc::new(MemoryLogger::new()));

        assert_eq!(assistant.run("first").await.unwrap().answer, "one");
        assert_eq!(assistant.run("second").await.unwrap().answer, "two");

        assert_eq!(connector.connect_count(), 2);
        assert_eq!(host.close_count(), 2);
    }
}
