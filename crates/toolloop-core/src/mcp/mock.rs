//! Mock tool host for testing
//!
//! Serves a fixed catalog and canned per-tool results without a network.
//! Clones share their call log, so a test can keep one handle while the
//! session owns another.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};

use super::host::{McpError, McpResult, ToolHost, ToolHostConnector};
use crate::types::{ToolDescriptor, ToolInvocationResult};

/// One recorded `call_tool` invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub name: String,
    pub arguments: Map<String, Value>,
}

#[derive(Debug, Clone)]
enum MockResponse {
    Result(ToolInvocationResult),
    Failure(String),
    Disconnect,
}

#[derive(Debug, Default)]
struct MockHostState {
    calls: Mutex<Vec<RecordedCall>>,
    close_count: Mutex<usize>,
}

/// Scripted [`ToolHost`]
#[derive(Debug, Clone, Default)]
pub struct MockToolHost {
    tools: Vec<ToolDescriptor>,
    responses: HashMap<String, MockResponse>,
    fail_list: bool,
    fail_close: bool,
    state: Arc<MockHostState>,
}

impl MockToolHost {
    /// Create a host advertising `tools`
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        Self {
            tools,
            ..Default::default()
        }
    }

    /// Answer calls to `name` with `result`
    pub fn with_result(mut self, name: impl Into<String>, result: ToolInvocationResult) -> Self {
        self.responses.insert(name.into(), MockResponse::Result(result));
        self
    }

    /// Answer calls to `name` with a single text item
    pub fn with_text(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_result(name, ToolInvocationResult::text(text))
    }

    /// Fail calls to `name`
    pub fn with_failure(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses.insert(name.into(), MockResponse::Failure(message.into()));
        self
    }

    /// Drop the connection when `name` is called
    pub fn with_disconnect(mut self, name: impl Into<String>) -> Self {
        self.responses.insert(name.into(), MockResponse::Disconnect);
        self
    }

    /// Fail `list_tools`
    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Fail `close` (after counting it)
    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().clone()
    }

    /// Names of the tools called so far, in order
    pub fn called_names(&self) -> Vec<String> {
        self.state.calls.lock().iter().map(|c| c.name.clone()).collect()
    }

    /// How many times `close` was called
    pub fn close_count(&self) -> usize {
        *self.state.close_count.lock()
    }
}

#[async_trait]
impl ToolHost for MockToolHost {
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>> {
        if self.fail_list {
            return Err(McpError::Protocol("Mock list failure".to_string()));
        }
        Ok(self.tools.clone())
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> McpResult<ToolInvocationResult> {
        self.state.calls.lock().push(RecordedCall {
            name: name.to_string(),
            arguments,
        });

        match self.responses.get(name) {
            Some(MockResponse::Result(result)) => Ok(result.clone()),
            Some(MockResponse::Failure(message)) => Err(McpError::ToolCallFailed(message.clone())),
            Some(MockResponse::Disconnect) => Err(McpError::Disconnected("transport closed".to_string())),
            None => Err(McpError::ToolCallFailed(format!("Unknown tool: {}", name))),
        }
    }

    async fn close(&mut self) -> McpResult<()> {
        *self.state.close_count.lock() += 1;
        if self.fail_close {
            return Err(McpError::Protocol("Mock close failure".to_string()));
        }
        Ok(())
    }
}

/// Connector handing out clones of one [`MockToolHost`]
#[derive(Debug)]
pub struct MockConnector {
    host: Option<MockToolHost>,
    urls: Mutex<Vec<String>>,
}

impl MockConnector {
    /// Connector whose connections all go to `host`
    pub fn new(host: MockToolHost) -> Self {
        Self {
            host: Some(host),
            urls: Mutex::new(Vec::new()),
        }
    }

    /// Connector whose every connection attempt fails
    pub fn unreachable() -> Self {
        Self {
            host: None,
            urls: Mutex::new(Vec::new()),
        }
    }

    /// URLs passed to `connect`, in order
    pub fn connected_urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }

    /// Number of connection attempts
    pub fn connect_count(&self) -> usize {
        self.urls.lock().len()
    }
}

#[async_trait]
impl ToolHostConnector for MockConnector {
    async fn connect(&self, url: &str) -> McpResult<Box<dyn ToolHost>> {
        self.urls.lock().push(url.to_string());
        match &self.host {
            Some(host) => Ok(Box::new(host.clone())),
            None => Err(McpError::ConnectionFailed(format!("fetch failed: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_host_records_calls() {
        let host = MockToolHost::new(vec![ToolDescriptor::new("listEvents")])
            .with_text("listEvents", "No events");
        let handle = host.clone();

        let mut args = Map::new();
        args.insert("day".to_string(), json!("tomorrow"));
        let result = host.call_tool("listEvents", args.clone()).await.unwrap();

        assert_eq!(result, ToolInvocationResult::text("No events"));
        assert_eq!(handle.calls(), vec![RecordedCall { name: "listEvents".into(), arguments: args }]);
    }

    #[tokio::test]
    async fn test_mock_host_unknown_tool_fails() {
        let host = MockToolHost::new(vec![]);
        let err = host.call_tool("nope", Map::new()).await.unwrap_err();
        assert!(matches!(err, McpError::ToolCallFailed(_)));
    }

    #[tokio::test]
    async fn test_mock_connector_shares_state() {
        let host = MockToolHost::new(vec![]).failing_close();
        let connector = MockConnector::new(host.clone());

        let mut connection = connector.connect("http://tools/mcp").await.unwrap();
        assert!(connection.close().await.is_err());

        assert_eq!(host.close_count(), 1);
        assert_eq!(connector.connected_urls(), vec!["http://tools/mcp"]);
    }

    #[tokio::test]
    async fn test_unreachable_connector() {
        let connector = MockConnector::unreachable();
        let err = connector.connect("http://tools/mcp").await.err().unwrap();

        assert!(err.is_network());
        assert_eq!(connector.connect_count(), 1);
    }
}
