//! Artifact Directory
//!
//! On-disk layout shared by the command backend's output directory and the
//! CLI's persistent artifact directory: one file per artifact at
//! `<root>/<segments>.<ext>`, plus two optional list files, one name per line:
//!
//! - `PROCESSORS` names the artifacts that are extension processors
//! - `NAMES` records the exact names saved here
//!
//! `/` and `.` both split a name into segments, so a path alone cannot tell
//! `remote/algo/Sort` from `remote.algo.Sort`. Paths listed in `NAMES` (or
//! passed as known names) load under that name; any other path is rebuilt
//! with the configured separator.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::CompiledArtifact;
use crate::domain::value_objects::{Capability, NameError, QualifiedName};

/// Marker file listing processor artifacts
pub const PROCESSORS_FILE: &str = "PROCESSORS";

/// Manifest of the names saved in the directory
pub const NAMES_FILE: &str = "NAMES";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactDirError {
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {}: {message}", root.display())]
    Walk { root: PathBuf, message: String },

    #[error("artifact path {} is not a qualified name: {source}", path.display())]
    Name {
        path: PathBuf,
        #[source]
        source: NameError,
    },
}

/// A directory of artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDirectory {
    root: PathBuf,
    extension: String,
    separator: char,
    known: Vec<QualifiedName>,
}

impl ArtifactDirectory {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            separator: '/',
            known: Vec::new(),
        }
    }

    /// Separator used to rebuild names from relative paths
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Names whose files load under exactly that spelling
    pub fn with_known_names(mut self, names: impl IntoIterator<Item = QualifiedName>) -> Self {
        self.known.extend(names);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path an artifact named `name` is stored at
    pub fn path_for(&self, name: &QualifiedName) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(name.segments());
        path.set_extension(&self.extension);
        path
    }

    /// Read every artifact, ordered by name. A missing root is empty.
    pub fn load(&self) -> Result<Vec<CompiledArtifact>, ArtifactDirError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let processors: HashSet<PathBuf> = self
            .read_list(PROCESSORS_FILE)?
            .iter()
            .filter_map(|p| QualifiedName::parse(p).ok())
            .map(|n| segment_path(&n))
            .collect();
        let names = self.name_index()?;
        let mut artifacts = Vec::new();

        let walker = ignore::WalkBuilder::new(&self.root)
            .standard_filters(false)
            .build();
        for entry in walker {
            let entry = entry.map_err(|e| ArtifactDirError::Walk {
                root: self.root.clone(),
                message: e.to_string(),
            })?;
            let path = entry.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str())
            {
                continue;
            }

            let relative = path
                .strip_prefix(&self.root)
                .unwrap_or(path)
                .with_extension("");
            let name = match names.get(&relative) {
                Some(name) => name.clone(),
                None => self.rebuild_name(&relative, path)?,
            };
            let payload = fs::read(path).map_err(|source| ArtifactDirError::Io {
                action: "read artifact",
                path: path.to_path_buf(),
                source,
            })?;
            let mut artifact = CompiledArtifact::new(name, payload);
            if processors.contains(&relative) {
                artifact = artifact.with_capability(Capability::ExtensionProcessor);
            }
            artifacts.push(artifact);
        }

        artifacts.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(artifacts)
    }

    /// Write `artifacts`, then append their names to the manifest and the
    /// processor names to the marker file
    pub fn save(&self, artifacts: &[CompiledArtifact]) -> Result<(), ArtifactDirError> {
        fs::create_dir_all(&self.root).map_err(|source| ArtifactDirError::Io {
            action: "create directory",
            path: self.root.clone(),
            source,
        })?;

        for artifact in artifacts {
            write_file(&self.path_for(artifact.name()), artifact.payload())?;
        }

        self.append_list(NAMES_FILE, artifacts.iter().map(|a| a.name()))?;
        self.append_list(
            PROCESSORS_FILE,
            artifacts.iter().filter(|a| a.is_processor()).map(|a| a.name()),
        )
    }

    /// Relative path (no extension) to name, from the manifest and known names
    fn name_index(&self) -> Result<HashMap<PathBuf, QualifiedName>, ArtifactDirError> {
        let mut index = HashMap::new();
        for raw in self.read_list(NAMES_FILE)? {
            if let Ok(name) = QualifiedName::parse(&raw) {
                index.insert(segment_path(&name), name);
            }
        }
        for name in &self.known {
            index.insert(segment_path(name), name.clone());
        }
        Ok(index)
    }

    fn rebuild_name(&self, relative: &Path, path: &Path) -> Result<QualifiedName, ArtifactDirError> {
        let raw = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join(&self.separator.to_string());
        QualifiedName::parse(&raw).map_err(|source| ArtifactDirError::Name {
            path: path.to_path_buf(),
            source,
        })
    }

    fn read_list(&self, file: &str) -> Result<Vec<String>, ArtifactDirError> {
        let path = self.root.join(file);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(ArtifactDirError::Io {
                action: "read list",
                path,
                source,
            }),
        }
    }

    fn append_list<'a>(
        &self,
        file: &str,
        names: impl Iterator<Item = &'a QualifiedName>,
    ) -> Result<(), ArtifactDirError> {
        let mut lines = self.read_list(file)?;
        let before = lines.len();
        for name in names {
            if !lines.iter().any(|l| l == name.as_str()) {
                lines.push(name.to_string());
            }
        }
        if lines.len() == before {
            return Ok(());
        }
        let mut content = lines.join("\n");
        content.push('\n');
        write_file(&self.root.join(file), content.as_bytes())
    }
}

fn segment_path(name: &QualifiedName) -> PathBuf {
    name.segments().collect()
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), ArtifactDirError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ArtifactDirError::Io {
            action: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| ArtifactDirError::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    })
}
