//! Environment variable configuration source

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

use super::settings::{AssistantConfig, ConfigError, ConfigProvider, ConfigResult};

/// Environment variables consulted for each setting, in priority order
static ENV_VAR_MAP: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("tool_server_url", vec!["TOOLLOOP_MCP_URL", "MCP_SERVER_URL"]);
    m.insert("chat_proxy_url", vec!["TOOLLOOP_PROXY_URL", "LLM_PROXY_URL"]);
    m.insert("model", vec!["TOOLLOOP_MODEL", "LLM_MODEL"]);
    m.insert("max_rounds", vec!["TOOLLOOP_MAX_ROUNDS"]);
    m
});

/// Configuration read from environment variables
///
/// | setting           | variables                                |
/// |-------------------|------------------------------------------|
/// | `tool_server_url` | `TOOLLOOP_MCP_URL`, `MCP_SERVER_URL`     |
/// | `chat_proxy_url`  | `TOOLLOOP_PROXY_URL`, `LLM_PROXY_URL`    |
/// | `model`           | `TOOLLOOP_MODEL`, `LLM_MODEL`            |
/// | `max_rounds`      | `TOOLLOOP_MAX_ROUNDS`                    |
///
/// Empty values are treated as unset.
pub struct EnvConfigProvider {
    lookup: Box<dyn Fn(&str) -> Option<String> + Send + Sync>,
}

impl Default for EnvConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EnvConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvConfigProvider").finish_non_exhaustive()
    }
}

impl EnvConfigProvider {
    /// Read from the process environment
    pub fn new() -> Self {
        Self::with_lookup(|key| env::var(key).ok())
    }

    /// Read through a custom lookup function instead of the process environment
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
        }
    }

    /// Variable names consulted for a setting
    pub fn env_vars_for(setting: &str) -> Option<&'static [&'static str]> {
        ENV_VAR_MAP.get(setting).map(|v| v.as_slice())
    }

    fn get(&self, setting: &str) -> Option<String> {
        Self::env_vars_for(setting)?
            .iter()
            .filter_map(|var| (self.lookup)(var))
            .find(|value| !value.trim().is_empty())
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn name(&self) -> &str {
        "env"
    }

    fn load(&self) -> ConfigResult<AssistantConfig> {
        let mut config = AssistantConfig {
            tool_server_url: self.get("tool_server_url"),
            chat_proxy_url: self.get("chat_proxy_url"),
            model: self.get("model"),
            ..Default::default()
        };

        if let Some(raw) = self.get("max_rounds") {
            let rounds = raw.trim().parse::<usize>().map_err(|_| {
                ConfigError::Invalid(format!("TOOLLOOP_MAX_ROUNDS is not a number: {raw}"))
            })?;
            config.agent.max_rounds = Some(rounds);
        }

        Ok(config)
    }
}

impl AssistantConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        EnvConfigProvider::new().load()
    }
}
