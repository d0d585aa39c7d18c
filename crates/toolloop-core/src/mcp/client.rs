//! MCP client using the official rmcp SDK
//!
//! Connects to the tool-hosting server over Streamable HTTP, or over a Unix
//! socket when the location uses the `unix:` scheme.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::{
    ServiceExt,
    model::{CallToolRequestParams, CallToolResult, ClientCapabilities, ClientInfo, Implementation, Tool},
    service::RunningService,
    RoleClient, ServiceError,
};
use serde_json::{Map, Value};

#[cfg(unix)]
use tokio::net::UnixStream;

use super::host::{McpError, McpResult, ToolHost, ToolHostConnector};
use crate::logging::Logger;
use crate::types::{ToolDescriptor, ToolInvocationResult};

/// Scheme prefix selecting the Unix socket transport
pub const UNIX_SCHEME: &str = "unix:";

fn client_info() -> ClientInfo {
    ClientInfo {
        meta: None,
        protocol_version: Default::default(),
        capabilities: ClientCapabilities::default(),
        client_info: Implementation {
            name: "toolloop-core".to_string(),
            title: Some("toolloop".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            website_url: None,
            icons: None,
        },
    }
}

impl From<Tool> for ToolDescriptor {
    fn from(tool: Tool) -> Self {
        Self {
            name: tool.name.to_string(),
            description: tool.description.map(|s| s.to_string()),
            // input_schema is Arc<JsonObject>
            input_schema: serde_json::to_value(tool.input_schema.as_ref()).ok(),
        }
    }
}

/// Convert an rmcp result, preferring structured content when no items came back
fn to_invocation_result(result: CallToolResult) -> McpResult<ToolInvocationResult> {
    let is_error = result.is_error.unwrap_or(false);

    let content = match result.structured_content {
        Some(structured) if result.content.is_empty() => structured,
        _ => serde_json::to_value(&result.content).map_err(|e| McpError::Protocol(e.to_string()))?,
    };

    Ok(ToolInvocationResult { content, is_error })
}

/// Map an rmcp request failure, treating transport loss as a network failure
fn request_error(err: ServiceError, otherwise: fn(String) -> McpError) -> McpError {
    match err {
        ServiceError::TransportSend(e) => McpError::Disconnected(e.to_string()),
        ServiceError::TransportClosed => McpError::Disconnected("transport closed".to_string()),
        other => otherwise(other.to_string()),
    }
}

/// MCP client for one tool-hosting server
pub struct McpClient {
    /// The underlying rmcp running service, `None` once closed
    client: Option<RunningService<RoleClient, ClientInfo>>,
    logger: Arc<dyn Logger>,
}

impl McpClient {
    /// Connect to an MCP server over a Unix socket
    #[cfg(unix)]
    pub async fn connect_unix(socket_path: &str, logger: Arc<dyn Logger>) -> McpResult<Self> {
        logger.info(&format!("[McpClient] Connecting to Unix socket: {}", socket_path));

        let stream = UnixStream::connect(socket_path)
            .await
            .map_err(|e| McpError::ConnectionFailed(e.to_string()))?;

        let client = client_info()
            .serve(stream)
            .await
            .map_err(|e| McpError::InitializationFailed(e.to_string()))?;

        logger.info("[McpClient] Connected and initialized successfully");

        Ok(Self {
            client: Some(client),
            logger,
        })
    }

    /// Connect to an MCP server over HTTP (Streamable HTTP transport)
    pub async fn connect_http(url: &str, logger: Arc<dyn Logger>) -> McpResult<Self> {
        use rmcp::transport::StreamableHttpClientTransport;

        logger.info(&format!("[McpClient] Connecting to HTTP: {}", url));

        let transport = StreamableHttpClientTransport::from_uri(url);

        let client = client_info()
            .serve(transport)
            .await
            .map_err(|e| McpError::InitializationFailed(e.to_string()))?;

        logger.info("[McpClient] Connected and initialized successfully");

        Ok(Self {
            client: Some(client),
            logger,
        })
    }

    /// Connect using whichever transport `location` names
    pub async fn connect(location: &str, logger: Arc<dyn Logger>) -> McpResult<Self> {
        match location.strip_prefix(UNIX_SCHEME) {
            #[cfg(unix)]
            Some(path) => Self::connect_unix(path, logger).await,
            #[cfg(not(unix))]
            Some(_) => Err(McpError::ConnectionFailed(
                "Unix socket transport is not available on this platform".to_string(),
            )),
            None => Self::connect_http(location, logger).await,
        }
    }

    fn service(&self) -> McpResult<&RunningService<RoleClient, ClientInfo>> {
        self.client.as_ref().ok_or(McpError::Closed)
    }

    /// Get server info
    pub fn server_info(&self) -> Option<&Implementation> {
        self.client
            .as_ref()
            .and_then(|c| c.peer_info())
            .map(|info| &info.server_info)
    }
}

#[async_trait]
impl ToolHost for McpClient {
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>> {
        let result = self
            .service()?
            .list_tools(Default::default())
            .await
            .map_err(|e| request_error(e, McpError::Protocol))?;

        self.logger.info(&format!("[McpClient] Listed {} tools", result.tools.len()));

        Ok(result.tools.into_iter().map(ToolDescriptor::from).collect())
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> McpResult<ToolInvocationResult> {
        self.logger.info(&format!("[McpClient] Calling tool: {}", name));

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: Some(arguments),
            task: None,
        };

        let result = self
            .service()?
            .call_tool(params)
            .await
            .map_err(|e| request_error(e, McpError::ToolCallFailed))?;

        to_invocation_result(result)
    }

    async fn close(&mut self) -> McpResult<()> {
        let client = self.client.take().ok_or(McpError::Closed)?;

        self.logger.info("[McpClient] Closing connection");
        client
            .cancel()
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;
        Ok(())
    }
}

/// Connector producing rmcp-backed [`McpClient`]s
pub struct McpConnector {
    logger: Arc<dyn Logger>,
}

impl McpConnector {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl ToolHostConnector for McpConnector {
    async fn connect(&self, url: &str) -> McpResult<Box<dyn ToolHost>> {
        let client = McpClient::connect(url, Arc::clone(&self.logger)).await?;
        Ok(Box::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::Content;
    use serde_json::json;

    #[test]
    fn test_tool_descriptor_from_rmcp_tool() {
        let schema = json!({
            "type": "object",
            "properties": { "day": { "type": "string" } }
        });
        let schema_obj = schema.as_object().cloned().unwrap();
        let tool = Tool::new("listEvents", "List calendar events", Arc::new(schema_obj));

        let descriptor = ToolDescriptor::from(tool);
        assert_eq!(descriptor.name, "listEvents");
        assert_eq!(descriptor.description.as_deref(), Some("List calendar events"));
        assert_eq!(descriptor.input_schema, Some(schema));
    }

    #[test]
    fn test_invocation_result_keeps_text_items() {
        let result = CallToolResult::success(vec![Content::text("No events")]);
        let converted = to_invocation_result(result).unwrap();

        assert!(!converted.is_error);
        assert_eq!(converted.content[0]["type"], "text");
        assert_eq!(converted.content[0]["text"], "No events");
    }

    #[test]
    fn test_invocation_result_prefers_structured_when_no_items() {
        let mut result = CallToolResult::success(vec![]);
        result.structured_content = Some(json!({ "events": [] }));
        result.is_error = Some(true);

        let converted = to_invocation_result(result).unwrap();
        assert!(converted.is_error);
        assert_eq!(converted.content, json!({ "events": [] }));
    }

    #[test]
    fn test_request_error_classifies_transport_loss() {
        let closed = request_error(ServiceError::TransportClosed, McpError::ToolCallFailed);
        assert!(matches!(closed, McpError::Disconnected(_)));
        assert!(closed.is_network());

        let timeout = request_error(
            ServiceError::Timeout { timeout: std::time::Duration::from_secs(5) },
            McpError::ToolCallFailed,
        );
        assert!(matches!(timeout, McpError::ToolCallFailed(_)));
        assert!(!timeout.is_network());

        let listed = request_error(ServiceError::UnexpectedResponse, McpError::Protocol);
        assert!(matches!(listed, McpError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_connect_unix_missing_socket_fails() {
        let logger: Arc<dyn Logger> = Arc::new(crate::logging::NoOpLogger::new());
        let result = McpClient::connect("unix:/nonexistent/toolloop-test.sock", logger).await;

        #[cfg(unix)]
        assert!(matches!(result, Err(McpError::ConnectionFailed(_))));
        #[cfg(not(unix))]
        assert!(result.is_err());
    }
}
