//! Per-invocation wiring: config, persistent artifact directory, orchestrator

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use summon::config::{discover, Config, ConfigWarning};
use summon::{
    ArtifactDirectory, ArtifactReader, ArtifactStore, CommandBackend, EventSink, JsonEventSink,
    MemoryArtifactStore, NoopEventSink, Orchestrator, QualifiedName,
};

/// Effective configuration plus where it came from
pub struct LoadedConfig {
    pub config: Config,
    /// File the config was read from; `None` means built-in defaults
    pub path: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
    /// Directory relative config paths resolve against
    pub base: PathBuf,
}

/// Load `--config`, or discover a config file from the current directory
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover(Some(&cwd)),
    };

    let (config, warnings) = match &path {
        Some(path) => Config::load_with_warnings(path)?,
        None => (Config::default(), Vec::new()),
    };
    let config = config.with_env_overrides();

    // A project or explicit config anchors relative paths at its directory
    let base = path
        .as_deref()
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or(cwd);

    Ok(LoadedConfig {
        config,
        path,
        warnings,
        base,
    })
}

/// Print config warnings the way every command reports them
pub fn report_warnings(warnings: &[ConfigWarning], json: bool) {
    for warning in warnings {
        if json {
            super::emit_stderr(serde_json::json!({
                "event": "config_warning",
                "key": warning.key,
                "file": warning.file.display().to_string(),
                "line": warning.line,
                "suggestion": warning.suggestion,
            }));
        } else {
            eprintln!("warning: {warning}");
        }
    }
}

/// An orchestrator over the persistent artifact directory
pub struct Session {
    pub orchestrator: Orchestrator,
    artifacts: ArtifactDirectory,
    loaded: HashSet<QualifiedName>,
}

impl Session {
    /// Build the engine for commands that may compile
    pub fn open(loaded: &LoadedConfig, json: bool) -> Result<Self> {
        let config = &loaded.config;
        config.validate()?;

        let spec = config.command_spec().context(
            "no backend configured: set [backend].program in summon.toml or SUMMON_BACKEND",
        )?;
        let backend = Arc::new(CommandBackend::new(spec));

        let (store, artifacts, names) = open_store(loaded)?;

        let events: Arc<dyn EventSink> = if json {
            Arc::new(JsonEventSink::stderr())
        } else {
            Arc::new(NoopEventSink)
        };

        let orchestrator = Orchestrator::new(backend)
            .with_store(store)
            .with_source(
                Arc::new(config.source_repository(&loaded.base)),
                Arc::new(config.namespace_policy()),
            )
            .with_discovery(config.processor_discovery())
            .with_events(events)
            .with_options(config.orchestrator_options());

        Ok(Self {
            orchestrator,
            artifacts,
            loaded: names,
        })
    }

    /// Write artifacts stored during this run back to the artifact directory
    pub fn persist(&self) -> Result<usize> {
        let fresh: Vec<_> = self
            .orchestrator
            .store()
            .snapshot()
            .into_iter()
            .filter(|a| !self.loaded.contains(a.name()))
            .collect();
        self.artifacts
            .save(&fresh)
            .with_context(|| format!("failed to persist artifacts to {}", self.artifacts.root().display()))?;
        Ok(fresh.len())
    }
}

/// Memory store preloaded from the artifact directory
pub fn open_store(
    loaded: &LoadedConfig,
) -> Result<(Arc<MemoryArtifactStore>, ArtifactDirectory, HashSet<QualifiedName>)> {
    let artifacts = loaded.config.artifact_directory(&loaded.base);
    let existing = artifacts
        .load()
        .with_context(|| format!("failed to load artifacts from {}", artifacts.root().display()))?;
    let names = existing.iter().map(|a| a.name().clone()).collect();

    let store = Arc::new(MemoryArtifactStore::new());
    store.put_all(existing)?;
    Ok((store, artifacts, names))
}

/// Parse a command-line qualified name
pub fn parse_name(raw: &str) -> Result<QualifiedName> {
    QualifiedName::parse(raw).with_context(|| format!("invalid name '{raw}'"))
}

/// Whether `name` is in the persistent store, without building a backend
pub fn stored(loaded: &LoadedConfig, name: &QualifiedName) -> Result<bool> {
    let (store, _, _) = open_store(loaded)?;
    Ok(store.exists(name))
}
