//! File-based configuration provider (YAML)
//!
//! The user-level file lives at `<config dir>/toolloop/config.yaml`:
//!
//! ```yaml
//! tool_server_url: http://localhost:3001/mcp
//! chat_proxy_url: http://localhost:8080
//! model: gpt-4o-mini
//! agent:
//!   max_rounds: 6
//! tools:
//!   exclude: [deleteEvent]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::settings::{AssistantConfig, ConfigProvider, ConfigResult};

/// YAML configuration file
///
/// # Example
///
/// ```no_run
/// use toolloop_core::config::{ConfigProvider, FileConfigProvider};
///
/// let config = FileConfigProvider::user().load()?;
/// # Ok::<(), toolloop_core::config::ConfigError>(())
/// ```
pub struct FileConfigProvider {
    path: PathBuf,
    cache: RwLock<Option<AssistantConfig>>,
}

impl FileConfigProvider {
    /// Create a provider for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Create the user-level provider (`~/.config/toolloop/config.yaml` on Linux)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("toolloop").join("config.yaml"))
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the config file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read(&self) -> ConfigResult<AssistantConfig> {
        if !self.path.exists() {
            return Ok(AssistantConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AssistantConfig::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Write `config` to disk and refresh the cache
    pub fn save(&self, config: &AssistantConfig) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_yaml::to_string(config)?)?;
        *self.cache.write() = Some(config.clone());
        Ok(())
    }

    /// Re-read the file, bypassing the cache
    pub fn reload(&self) -> ConfigResult<AssistantConfig> {
        let config = self.read()?;
        *self.cache.write() = Some(config.clone());
        Ok(config)
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("exists", &self.exists())
            .finish()
    }
}

impl ConfigProvider for FileConfigProvider {
    fn name(&self) -> &str {
        "file"
    }

    fn load(&self) -> ConfigResult<AssistantConfig> {
        if let Some(config) = self.cache.read().as_ref() {
            return Ok(config.clone());
        }
        self.reload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::new(dir.path().join("config.yaml"));

        assert!(!provider.exists());
        assert_eq!(provider.load().unwrap(), AssistantConfig::default());
    }

    #[test]
    fn test_reads_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "tool_server_url: http://localhost:3001/mcp\n\
             chat_proxy_url: http://localhost:8080\n\
             agent:\n  max_rounds: 4\n\
             tools:\n  exclude: [deleteEvent]\n",
        )
        .unwrap();

        let config = FileConfigProvider::new(&path).load().unwrap();
        assert_eq!(config.tool_server_url.as_deref(), Some("http://localhost:3001/mcp"));
        assert_eq!(config.agent.max_rounds, Some(4));
        assert_eq!(config.tools.exclude, vec!["deleteEvent".to_string()]);
        assert_eq!(config.resolve().unwrap().max_rounds, 4);
    }

    #[test]
    fn test_save_then_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let provider = FileConfigProvider::new(&path);

        let config = AssistantConfig::new()
            .with_tool_server_url("unix:/tmp/tools.sock")
            .with_model("gpt-4o");
        provider.save(&config).unwrap();

        assert!(provider.exists());
        assert_eq!(provider.reload().unwrap(), config);
        assert!(fs::read_to_string(&path).unwrap().contains("unix:/tmp/tools.sock"));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "agent: [not, a, map").unwrap();

        let err = FileConfigProvider::new(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}
