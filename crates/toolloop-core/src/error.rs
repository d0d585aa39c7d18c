//! Crate-level error type
//!
//! Every failure that can end a run is an [`AssistantError`]. The front end
//! serving prompts maps it to a status with [`AssistantError::status_code`]
//! and [`AssistantError::public_message`].

use thiserror::Error;

use crate::chat::TransportError;
use crate::config::ConfigError;
use crate::mcp::McpError;

/// Message returned to callers when an endpoint cannot be reached
pub const PROXY_UNAVAILABLE: &str = "proxy unavailable";

#[derive(Error, Debug)]
pub enum AssistantError {
    /// The prompt was empty after trimming
    #[error("prompt must be a non-empty string")]
    InvalidPrompt,

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The chat-completion call failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The tool host failed to connect, list or invoke
    #[error(transparent)]
    ToolHost(#[from] McpError),
}

pub type AssistantResult<T> = Result<T, AssistantError>;

impl AssistantError {
    /// Whether required endpoint configuration was missing
    pub fn is_config_missing(&self) -> bool {
        matches!(self, AssistantError::Config(ConfigError::Incomplete { .. }))
    }

    /// Whether an endpoint could not be reached at all
    pub fn is_network(&self) -> bool {
        match self {
            AssistantError::Transport(e) => e.is_network(),
            AssistantError::ToolHost(e) => e.is_network(),
            _ => false,
        }
    }

    /// HTTP status a front end should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            AssistantError::InvalidPrompt => 400,
            _ if self.is_network() => 502,
            _ => 500,
        }
    }

    /// Message safe to return to the caller
    pub fn public_message(&self) -> String {
        if self.is_network() {
            PROXY_UNAVAILABLE.to_string()
        } else {
            self.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_maps_to_500() {
        let err = AssistantError::from(ConfigError::Incomplete {
            missing: vec!["tool_server_url"],
        });

        assert!(err.is_config_missing());
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "env incomplete");
    }

    #[test]
    fn test_network_failures_map_to_502() {
        let chat = AssistantError::from(TransportError::Network("connection refused".into()));
        assert_eq!(chat.status_code(), 502);
        assert_eq!(chat.public_message(), PROXY_UNAVAILABLE);

        let tools = AssistantError::from(McpError::ConnectionFailed("refused".into()));
        assert_eq!(tools.status_code(), 502);
    }

    #[test]
    fn test_other_failures_keep_their_message() {
        let err = AssistantError::from(TransportError::Status {
            status: 500,
            body: "boom".into(),
        });
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Chat proxy error (500): boom");

        let tool = AssistantError::from(McpError::ToolCallFailed("bad input".into()));
        assert_eq!(tool.public_message(), "Tool call failed: bad input");
    }

    #[test]
    fn test_invalid_prompt_maps_to_400() {
        assert_eq!(AssistantError::InvalidPrompt.status_code(), 400);
    }
}
