//! Configuration module for Summon
//!
//! Configuration hierarchy:
//! 1. CLI `--config` path (highest priority)
//! 2. Project config (`summon.toml` in the project root)
//! 3. User config (`<config dir>/summon/config.toml`)
//! 4. Built-in defaults (lowest priority)
//!
//! Environment variables (`SUMMON_*`) are applied on top of whichever file won.

mod loader;
mod types;

pub use loader::{discover, ConfigError, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{
    BackendConfig, Config, FailuresConfig, LimitsConfig, NamespaceConfig, ProcessorsConfig,
    SourceConfig, StoreConfig,
};
