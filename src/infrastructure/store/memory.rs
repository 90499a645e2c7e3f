//! In-Memory Artifact Store
//!
//! Process-lifetime store behind an `RwLock`: lookups from any thread see
//! every completed `put`, and concurrent reads never block each other.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entities::CompiledArtifact;
use crate::domain::ports::{ArtifactReader, ArtifactStore, PutOutcome};
use crate::domain::value_objects::QualifiedName;
use crate::error::{SummonError, SummonResult};

/// Append-only, in-memory compiled-unit store
#[derive(Default)]
pub struct MemoryArtifactStore {
    artifacts: RwLock<HashMap<QualifiedName, CompiledArtifact>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Entries are only ever inserted whole, so a poisoned map is still valid.
    fn read_map(&self) -> RwLockReadGuard<'_, HashMap<QualifiedName, CompiledArtifact>> {
        self.artifacts.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_map(&self) -> RwLockWriteGuard<'_, HashMap<QualifiedName, CompiledArtifact>> {
        self.artifacts.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Compare an incoming artifact against what is stored
fn check(
    stored: Option<&CompiledArtifact>,
    incoming: &CompiledArtifact,
) -> SummonResult<PutOutcome> {
    match stored {
        None => Ok(PutOutcome::Inserted),
        Some(existing) if existing.same_payload(incoming) => Ok(PutOutcome::Unchanged),
        Some(existing) => Err(SummonError::Consistency {
            name: incoming.name().clone(),
            existing: existing.digest(),
            incoming: incoming.digest(),
        }),
    }
}

impl ArtifactReader for MemoryArtifactStore {
    fn exists(&self, name: &QualifiedName) -> bool {
        self.read_map().contains_key(name)
    }

    fn read(&self, name: &QualifiedName) -> Option<CompiledArtifact> {
        self.read_map().get(name).cloned()
    }

    fn snapshot(&self) -> Vec<CompiledArtifact> {
        let map = self.read_map();
        let ordered: BTreeMap<_, _> = map.iter().collect();
        ordered.into_values().cloned().collect()
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn put(&self, artifact: CompiledArtifact) -> SummonResult<PutOutcome> {
        let mut map = self.write_map();
        let outcome = check(map.get(artifact.name()), &artifact)?;
        if outcome == PutOutcome::Inserted {
            map.insert(artifact.name().clone(), artifact);
        }
        Ok(outcome)
    }

    fn put_all(&self, artifacts: Vec<CompiledArtifact>) -> SummonResult<Vec<QualifiedName>> {
        let mut map = self.write_map();

        // Validate everything first, including duplicates within the batch
        let mut pending: HashMap<QualifiedName, CompiledArtifact> = HashMap::new();
        for artifact in artifacts {
            let stored = map.get(artifact.name()).or_else(|| pending.get(artifact.name()));
            if check(stored, &artifact)? == PutOutcome::Inserted {
                pending.insert(artifact.name().clone(), artifact);
            }
        }

        let mut inserted: Vec<QualifiedName> = pending.keys().cloned().collect();
        inserted.sort();
        map.extend(pending);
        Ok(inserted)
    }

    fn len(&self) -> usize {
        self.read_map().len()
    }
}
