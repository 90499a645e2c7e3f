//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::OrchestratorOptions;
use crate::domain::policies::PrefixPolicy;
use crate::domain::services::ProcessorDiscovery;
use crate::domain::value_objects::Limits;
use crate::infrastructure::{ArtifactDirectory, CommandSpec, DirectorySourceRepository};

use super::loader::{self, ConfigError, ConfigWarning};

/// Which names may be fetched on a miss
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NamespaceConfig {
    /// Prefixes of remote-addressable names
    #[serde(default)]
    pub remote: Vec<String>,

    /// Prefixes that are never fetched, even under a remote prefix
    #[serde(default)]
    pub platform: Vec<String>,
}

/// Where remote source text lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_root")]
    pub root: PathBuf,

    #[serde(default = "default_source_extension")]
    pub extension: String,

    /// Leading name prefix dropped before mapping a name to a path
    #[serde(default)]
    pub strip_prefix: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: default_source_root(),
            extension: default_source_extension(),
            strip_prefix: None,
        }
    }
}

fn default_source_root() -> PathBuf {
    PathBuf::from("sources")
}

fn default_source_extension() -> String {
    "src".to_string()
}

/// External compiler program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Program to run; no backend is configured when unset
    #[serde(default)]
    pub program: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default = "default_processor_flag")]
    pub processor_flag: String,

    #[serde(default = "default_output_flag")]
    pub output_flag: String,

    #[serde(default)]
    pub link_flag: Option<String>,

    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    #[serde(default = "default_artifact_extension")]
    pub artifact_extension: String,

    #[serde(default = "default_separator")]
    pub separator: char,

    /// Whether two invocations may overlap
    #[serde(default)]
    pub concurrent: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: Vec::new(),
            processor_flag: default_processor_flag(),
            output_flag: default_output_flag(),
            link_flag: None,
            source_extension: default_source_extension(),
            artifact_extension: default_artifact_extension(),
            separator: default_separator(),
            concurrent: false,
        }
    }
}

fn default_processor_flag() -> String {
    "--processors".to_string()
}

fn default_output_flag() -> String {
    "--out".to_string()
}

fn default_artifact_extension() -> String {
    "bin".to_string()
}

fn default_separator() -> char {
    '/'
}

/// Timeouts in milliseconds; unset means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LimitsConfig {
    #[serde(default)]
    pub fetch_timeout_ms: Option<u64>,

    #[serde(default)]
    pub compile_timeout_ms: Option<u64>,
}

/// Negative cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FailuresConfig {
    /// Seconds a failed name is remembered; unset or 0 always retries
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

/// Built-in extension processors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProcessorsConfig {
    #[serde(default)]
    pub builtin: Vec<String>,
}

/// Where the CLI keeps compiled artifacts between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(".summon/artifacts")
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub namespace: NamespaceConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub failures: FailuresConfig,

    #[serde(default)]
    pub processors: ProcessorsConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Parse TOML text; `file` is only used to label warnings and errors
    pub fn parse_with_warnings(
        content: &str,
        file: &Path,
    ) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::parse_with_warnings(content, file)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (SUMMON_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Reject values that parse but cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.backend.separator, '/' | '.') {
            return Err(ConfigError::Invalid {
                key: "backend.separator".to_string(),
                message: format!("expected '/' or '.', got {:?}", self.backend.separator),
            });
        }
        if self.backend.program.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                key: "backend.program".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        for (key, value) in [
            ("limits.fetch_timeout_ms", self.limits.fetch_timeout_ms),
            ("limits.compile_timeout_ms", self.limits.compile_timeout_ms),
        ] {
            if value == Some(0) {
                return Err(ConfigError::Invalid {
                    key: key.to_string(),
                    message: "must be greater than zero; omit it for no limit".to_string(),
                });
            }
        }
        if let Some(prefix) = self
            .namespace
            .remote
            .iter()
            .chain(&self.namespace.platform)
            .find(|p| p.is_empty())
        {
            return Err(ConfigError::Invalid {
                key: "namespace".to_string(),
                message: format!("empty prefix {prefix:?} would match every name"),
            });
        }
        Ok(())
    }

    pub fn limits(&self) -> Limits {
        let mut limits = Limits::unbounded();
        if let Some(ms) = self.limits.fetch_timeout_ms {
            limits = limits.with_fetch(Duration::from_millis(ms));
        }
        if let Some(ms) = self.limits.compile_timeout_ms {
            limits = limits.with_compile(Duration::from_millis(ms));
        }
        limits
    }

    pub fn orchestrator_options(&self) -> OrchestratorOptions {
        let options = OrchestratorOptions::default().with_limits(self.limits());
        match self.failures.ttl_secs {
            Some(secs) if secs > 0 => options.with_failure_ttl(Duration::from_secs(secs)),
            _ => options,
        }
    }

    pub fn namespace_policy(&self) -> PrefixPolicy {
        PrefixPolicy::new(self.namespace.remote.iter().cloned())
            .excluding(self.namespace.platform.iter().cloned())
    }

    pub fn processor_discovery(&self) -> ProcessorDiscovery {
        ProcessorDiscovery::with_builtin(self.processors.builtin.iter().cloned())
    }

    /// Command backend settings, if a program is configured
    pub fn command_spec(&self) -> Option<CommandSpec> {
        let backend = &self.backend;
        let program = backend.program.clone()?;
        Some(CommandSpec {
            program,
            args: backend.args.clone(),
            processor_flag: backend.processor_flag.clone(),
            output_flag: backend.output_flag.clone(),
            link_flag: backend.link_flag.clone(),
            source_extension: backend.source_extension.clone(),
            artifact_extension: backend.artifact_extension.clone(),
            separator: backend.separator,
            concurrent: backend.concurrent,
        })
    }

    /// Source repository with relative roots resolved against `base`
    pub fn source_repository(&self, base: &Path) -> DirectorySourceRepository {
        let repo = DirectorySourceRepository::new(
            base.join(&self.source.root),
            self.source.extension.as_str(),
        );
        match &self.source.strip_prefix {
            Some(prefix) => repo.with_strip_prefix(prefix.as_str()),
            None => repo,
        }
    }

    /// Artifact directory with relative paths resolved against `base`
    pub fn artifact_directory(&self, base: &Path) -> ArtifactDirectory {
        ArtifactDirectory::new(
            base.join(&self.store.dir),
            self.backend.artifact_extension.as_str(),
        )
        .with_separator(self.backend.separator)
    }
}
