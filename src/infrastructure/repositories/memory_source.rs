//! In-Memory Source Repository
//!
//! Holds source text in a map. Useful when the host already has a bundle of
//! sources and for wiring the engine up in tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::SourceUnit;
use crate::domain::ports::{FetchError, SourceRepository};
use crate::domain::value_objects::QualifiedName;

#[derive(Default)]
pub struct MemorySourceRepository {
    sources: RwLock<HashMap<QualifiedName, Arc<str>>>,
}

impl MemorySourceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the source for `name`
    pub fn insert(&self, name: QualifiedName, text: impl Into<Arc<str>>) {
        let mut sources = self.sources.write().unwrap_or_else(|e| e.into_inner());
        sources.insert(name, text.into());
    }

    pub fn with_source(self, name: QualifiedName, text: impl Into<Arc<str>>) -> Self {
        self.insert(name, text);
        self
    }
}

impl SourceRepository for MemorySourceRepository {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn fetch(&self, name: &QualifiedName) -> Result<Option<SourceUnit>, FetchError> {
        let sources = self.sources.read().unwrap_or_else(|e| e.into_inner());
        Ok(sources
            .get(name)
            .map(|text| SourceUnit::remote(name.clone(), Arc::clone(text))))
    }
}
