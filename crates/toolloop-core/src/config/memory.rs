//! In-memory configuration provider

use parking_lot::RwLock;

use super::settings::{AssistantConfig, ConfigProvider, ConfigResult};

/// Configuration held in memory, for tests and embedders
#[derive(Debug, Default)]
pub struct MemoryConfigProvider {
    config: RwLock<AssistantConfig>,
}

impl MemoryConfigProvider {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Replace the held configuration
    pub fn set(&self, config: AssistantConfig) {
        *self.config.write() = config;
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self) -> ConfigResult<AssistantConfig> {
        Ok(self.config.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvConfigProvider;

    #[test]
    fn test_layered_sources() {
        let defaults = MemoryConfigProvider::new(
            AssistantConfig::new()
                .with_chat_proxy_url("http://proxy")
                .with_model("default-model"),
        );
        let env = EnvConfigProvider::with_lookup(|key| match key {
            "TOOLLOOP_MCP_URL" => Some("http://tools/mcp".to_string()),
            _ => None,
        });

        let config = AssistantConfig::load_from(&[&defaults, &env]).unwrap();
        let resolved = config.resolve().unwrap();

        assert_eq!(resolved.tool_server_url, "http://tools/mcp");
        assert_eq!(resolved.chat_proxy_url, "http://proxy");
        assert_eq!(resolved.model, "default-model");
    }

    #[test]
    fn test_set_replaces_config() {
        let provider = MemoryConfigProvider::default();
        assert!(provider.load().unwrap().model.is_none());

        provider.set(AssistantConfig::new().with_model("m"));
        assert_eq!(provider.load().unwrap().model.as_deref(), Some("m"));
    }
}
