//! Assistant configuration and validation

use serde::{Deserialize, Serialize};

use crate::tools::ToolFilter;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Maximum number of model rounds per run
pub const DEFAULT_MAX_ROUNDS: usize = 6;

/// Errors that can occur while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required endpoint is missing
    #[error("env incomplete")]
    Incomplete { missing: Vec<&'static str> },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A source of assistant configuration
pub trait ConfigProvider: Send + Sync {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Load whatever this source knows; absent values stay `None`
    fn load(&self) -> ConfigResult<AssistantConfig>;
}

/// Agent loop policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Maximum model rounds per run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rounds: Option<usize>,
}

/// Which tools of the server's catalog are offered to the model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// If set, only these tools are offered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    /// Tools never offered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// Unvalidated configuration, as read from one or more sources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Location of the MCP tool server (`http(s)://...` or `unix:/path`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_server_url: Option<String>,
    /// Base URL of the chat-completion proxy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_proxy_url: Option<String>,
    /// Model identifier sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub agent: AgentSettings,
    #[serde(default)]
    pub tools: ToolSettings,
}

/// Configuration that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub tool_server_url: String,
    pub chat_proxy_url: String,
    pub model: String,
    pub max_rounds: usize,
    pub tool_filter: ToolFilter,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl AssistantConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tool server URL
    pub fn with_tool_server_url(mut self, url: impl Into<String>) -> Self {
        self.tool_server_url = Some(url.into());
        self
    }

    /// Set the chat proxy base URL
    pub fn with_chat_proxy_url(mut self, url: impl Into<String>) -> Self {
        self.chat_proxy_url = Some(url.into());
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the round budget
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.agent.max_rounds = Some(rounds);
        self
    }

    /// Overlay `other` on top of `self`; values present in `other` win
    pub fn merge(mut self, other: AssistantConfig) -> Self {
        if present(&other.tool_server_url).is_some() {
            self.tool_server_url = other.tool_server_url;
        }
        if present(&other.chat_proxy_url).is_some() {
            self.chat_proxy_url = other.chat_proxy_url;
        }
        if present(&other.model).is_some() {
            self.model = other.model;
        }
        if other.agent.max_rounds.is_some() {
            self.agent.max_rounds = other.agent.max_rounds;
        }
        if other.tools.include.is_some() {
            self.tools.include = other.tools.include;
        }
        if !other.tools.exclude.is_empty() {
            self.tools.exclude = other.tools.exclude;
        }
        self
    }

    /// Load and merge several sources in order (later sources win)
    pub fn load_from(providers: &[&dyn ConfigProvider]) -> ConfigResult<Self> {
        providers
            .iter()
            .try_fold(Self::default(), |acc, provider| Ok(acc.merge(provider.load()?)))
    }

    /// Names of required endpoints that are missing or blank
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if present(&self.tool_server_url).is_none() {
            missing.push("tool_server_url");
        }
        if present(&self.chat_proxy_url).is_none() {
            missing.push("chat_proxy_url");
        }
        missing
    }

    /// Validate and fill in defaults
    pub fn resolve(&self) -> ConfigResult<ResolvedConfig> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(ConfigError::Incomplete { missing });
        }

        let max_rounds = self.agent.max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS);
        if max_rounds == 0 {
            return Err(ConfigError::Invalid("agent.max_rounds must be at least 1".into()));
        }

        let mut tool_filter = ToolFilter::new().with_exclude(self.tools.exclude.iter().cloned());
        if let Some(include) = &self.tools.include {
            tool_filter = tool_filter.with_include(include.iter().cloned());
        }

        Ok(ResolvedConfig {
            tool_server_url: present(&self.tool_server_url).unwrap_or_default(),
            chat_proxy_url: present(&self.chat_proxy_url).unwrap_or_default(),
            model: present(&self.model).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_rounds,
            tool_filter,
        })
    }
}
