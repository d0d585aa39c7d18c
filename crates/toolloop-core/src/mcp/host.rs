//! Tool host abstraction
//!
//! The agent loop only needs "list tools", "call tool" and "close" from the
//! tool-hosting server. `McpClient` provides them over rmcp; tests use
//! `MockToolHost`.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::{ToolDescriptor, ToolInvocationResult};

/// Tool host errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Tool call failed: {0}")]
    ToolCallFailed(String),

    /// The connection dropped after it was established
    #[error("fetch failed: {0}")]
    Disconnected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Connection already closed")]
    Closed,
}

impl McpError {
    /// Whether the failure happened before the server could answer
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            McpError::ConnectionFailed(_)
                | McpError::InitializationFailed(_)
                | McpError::Disconnected(_)
                | McpError::Io(_)
        )
    }
}

pub type McpResult<T> = Result<T, McpError>;

/// An open connection to a tool-hosting server
#[async_trait]
pub trait ToolHost: Send + Sync {
    /// List the tools the server exposes
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>>;

    /// Invoke a tool by name
    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> McpResult<ToolInvocationResult>;

    /// Tear the connection down
    async fn close(&mut self) -> McpResult<()>;
}

/// Opens tool host connections
#[async_trait]
pub trait ToolHostConnector: Send + Sync {
    async fn connect(&self, url: &str) -> McpResult<Box<dyn ToolHost>>;
}
