//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use super::types::Config;

/// Project config file name, looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "summon.toml";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid value for '{key}': {message}")]
    Invalid { key: String, message: String },
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_with_warnings(&content, path)
}

/// Parse TOML text and collect unknown keys as warnings
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// First config file found: project `summon.toml`, then the user config dir
pub fn discover(project_root: Option<&Path>) -> Option<PathBuf> {
    let project = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .filter(|p| p.is_file());
    project.or_else(|| {
        dirs::config_dir()
            .map(|dir| dir.join("summon").join("config.toml"))
            .filter(|p| p.is_file())
    })
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> Config {
    let loaded = discover(project_root).and_then(|path| Config::load(&path).ok());
    with_env_overrides(loaded.unwrap_or_default())
}

/// Apply environment variable overrides (SUMMON_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup`. Unparseable numbers are ignored.
pub(crate) fn apply_overrides(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Config {
    // SUMMON_BACKEND
    if let Some(program) = lookup("SUMMON_BACKEND").filter(|p| !p.trim().is_empty()) {
        config.backend.program = Some(program);
    }

    // SUMMON_SOURCE_ROOT
    if let Some(root) = lookup("SUMMON_SOURCE_ROOT") {
        config.source.root = PathBuf::from(root);
    }

    // SUMMON_REMOTE_PREFIXES (comma-separated)
    if let Some(prefixes) = lookup("SUMMON_REMOTE_PREFIXES") {
        let parsed: Vec<String> = prefixes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !parsed.is_empty() {
            config.namespace.remote = parsed;
        }
    }

    // SUMMON_FETCH_TIMEOUT_MS / SUMMON_COMPILE_TIMEOUT_MS
    if let Some(ms) = lookup("SUMMON_FETCH_TIMEOUT_MS").and_then(|v| v.trim().parse().ok()) {
        config.limits.fetch_timeout_ms = Some(ms);
    }
    if let Some(ms) = lookup("SUMMON_COMPILE_TIMEOUT_MS").and_then(|v| v.trim().parse().ok()) {
        config.limits.compile_timeout_ms = Some(ms);
    }

    // SUMMON_FAILURE_TTL_SECS
    if let Some(secs) = lookup("SUMMON_FAILURE_TTL_SECS").and_then(|v| v.trim().parse().ok()) {
        config.failures.ttl_secs = Some(secs);
    }

    // SUMMON_STORE_DIR
    if let Some(dir) = lookup("SUMMON_STORE_DIR") {
        config.store.dir = PathBuf::from(dir);
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "namespace",
        "remote",
        "platform",
        "source",
        "root",
        "extension",
        "strip_prefix",
        "backend",
        "program",
        "args",
        "processor_flag",
        "output_flag",
        "link_flag",
        "source_extension",
        "artifact_extension",
        "separator",
        "concurrent",
        "limits",
        "fetch_timeout_ms",
        "compile_timeout_ms",
        "failures",
        "ttl_secs",
        "processors",
        "builtin",
        "store",
        "dir",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
