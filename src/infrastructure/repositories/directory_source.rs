//! Directory Source Repository
//!
//! Serves source text from a directory tree, one file per unit:
//! `remote/algo/Sort` (or `remote.algo.Sort`) maps to
//! `<root>/remote/algo/Sort.<extension>`. An optional namespace prefix is
//! stripped first, so a warehouse checkout does not need to mirror it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::entities::SourceUnit;
use crate::domain::ports::{FetchError, SourceRepository};
use crate::domain::value_objects::QualifiedName;

/// Source repository backed by a local or mounted directory
pub struct DirectorySourceRepository {
    root: PathBuf,
    extension: String,
    strip_prefix: Option<String>,
}

impl DirectorySourceRepository {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            strip_prefix: None,
        }
    }

    /// Strip `prefix` from names before mapping them to paths
    pub fn with_strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip_prefix = Some(prefix.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that would hold the source for `name`
    pub fn path_for(&self, name: &QualifiedName) -> PathBuf {
        let raw = match &self.strip_prefix {
            Some(prefix) => name.as_str().strip_prefix(prefix.as_str()).unwrap_or(name.as_str()),
            None => name.as_str(),
        };

        let mut path = self.root.clone();
        path.extend(raw.split(QualifiedName::SEPARATORS).filter(|s| !s.is_empty()));
        if !self.extension.is_empty() {
            path.set_extension(&self.extension);
        }
        path
    }
}

impl SourceRepository for DirectorySourceRepository {
    fn name(&self) -> &'static str {
        "directory"
    }

    fn fetch(&self, name: &QualifiedName) -> Result<Option<SourceUnit>, FetchError> {
        let path = self.path_for(name);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(SourceUnit::remote(name.clone(), text))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(FetchError::InvalidSource {
                name: name.clone(),
                message: format!("{} is not valid UTF-8", path.display()),
            }),
            Err(e) => Err(FetchError::Transport(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
