//! Toolloop Core
//!
//! A tool-calling assistant: prompts go to an OpenAI-compatible
//! chat-completion proxy, and the tool calls the model asks for are executed
//! against an MCP tool server until the model answers in plain text.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use toolloop_core::{Assistant, AssistantConfig, ConsoleLogger};
//!
//! let config = AssistantConfig::from_env()?;
//! let assistant = Assistant::new(config, Arc::new(ConsoleLogger::new()));
//!
//! let outcome = assistant.run("List my events for tomorrow").await?;
//! println!("{} ({} tool calls)", outcome.answer, outcome.tool_calls);
//! ```
//!
//! Each run opens its own tool server connection and always closes it.
//! Failures map to front-end statuses through
//! [`AssistantError::status_code`].

pub mod types;
pub mod logging;
pub mod config;
pub mod tools;
pub mod mcp;
pub mod chat;
pub mod agent;
pub mod session;
pub mod error;

// Re-export commonly used types
pub use types::{
    ChatMessage, MessageRole, RunOutcome,
    ToolCallRequest, ToolChoice, ToolDescriptor, ToolInvocationResult, FunctionSchema,
};

pub use logging::{Logger, NoOpLogger, ConsoleLogger, TracingLogger, MemoryLogger};

pub use config::{
    AssistantConfig, ConfigError, ConfigProvider, ResolvedConfig,
    EnvConfigProvider, FileConfigProvider, MemoryConfigProvider,
};

pub use tools::{adapt_catalog, normalize_tool_result, ToolFilter};

pub use mcp::{McpClient, McpConnector, McpError, ToolHost, ToolHostConnector};

pub use chat::{ChatTransport, HttpChatTransport, TransportError};

pub use agent::{AgentLoop, ROUND_LIMIT_ANSWER};

pub use session::Assistant;

pub use error::{AssistantError, AssistantResult};
