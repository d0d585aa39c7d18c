//! MCP (Model Context Protocol) tool host module
//!
//! Uses the official rmcp SDK to talk to the tool-hosting server.
//!
//! # Example
//!
//! ```rust,ignore
//! use toolloop_core::mcp::{McpClient, ToolHost};
//! use std::sync::Arc;
//!
//! let logger: Arc<dyn Logger> = Arc::new(NoOpLogger::new());
//!
//! let mut client = McpClient::connect("http://localhost:3001/mcp", logger).await?;
//! let tools = client.list_tools().await?;
//! let result = client.call_tool("listEvents", args).await?;
//! client.close().await?;
//! ```

mod host;
mod client;
mod mock;

pub use host::{McpError, McpResult, ToolHost, ToolHostConnector};
pub use client::{McpClient, McpConnector, UNIX_SCHEME};
pub use mock::{MockConnector, MockToolHost, RecordedCall};
