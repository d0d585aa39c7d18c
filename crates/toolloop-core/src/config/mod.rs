//! Configuration
//!
//! The assistant needs two endpoints (tool server and chat proxy) and a few
//! policy knobs. Sources:
//! - `EnvConfigProvider`: process environment
//! - `FileConfigProvider`: YAML file (user level or explicit path)
//! - `MemoryConfigProvider`: fixed values, for tests and embedding
//!
//! Sources are combined with [`AssistantConfig::merge`] and validated with
//! [`AssistantConfig::resolve`] before a session is created.

mod settings;
mod env;
mod file;
mod memory;

pub use settings::{
    AgentSettings, AssistantConfig, ConfigError, ConfigProvider, ConfigResult, ResolvedConfig,
    ToolSettings, DEFAULT_MAX_ROUNDS, DEFAULT_MODEL,
};
pub use env::EnvConfigProvider;
pub use file::FileConfigProvider;
pub use memory::MemoryConfigProvider;
