//! Failure Cache
//!
//! Optional negative cache for names whose fetch or compile failed.
//! Without it a permanently broken name is re-fetched and re-compiled on
//! every lookup. With it, the failure is replayed until its entry expires or
//! is invalidated by hand.
//!
//! Timeouts are never remembered: they say nothing about the name itself.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::domain::value_objects::QualifiedName;
use crate::error::SummonError;

struct Entry {
    error: SummonError,
    expires_at: Instant,
}

/// Time-bounded memo of failed names
pub struct FailureCache {
    ttl: Duration,
    entries: Mutex<HashMap<QualifiedName, Entry>>,
}

impl FailureCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Remember a failure. Timeouts and abandoned attempts are ignored.
    pub fn record(&self, name: &QualifiedName, error: &SummonError) {
        self.record_at(name, error, Instant::now());
    }

    fn record_at(&self, name: &QualifiedName, error: &SummonError, now: Instant) {
        if matches!(
            error,
            SummonError::TimedOut { .. } | SummonError::Abandoned { .. }
        ) {
            return;
        }
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        // Names that are never looked up again would otherwise stay forever
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            name.clone(),
            Entry {
                error: error.clone(),
                expires_at: now + self.ttl,
            },
        );
    }

    /// Number of entries held, expired or not
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The remembered failure, if it has not expired
    pub fn lookup(&self, name: &QualifiedName) -> Option<SummonError> {
        self.lookup_at(name, Instant::now())
    }

    fn lookup_at(&self, name: &QualifiedName, now: Instant) -> Option<SummonError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(name) {
            Some(entry) if entry.expires_at > now => Some(entry.error.clone()),
            Some(_) => {
                entries.remove(name);
                None
            }
            None => None,
        }
    }

    /// Drop the memo for one name
    pub fn forget(&self, name: &QualifiedName) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(name).is_some()
    }

    /// Drop every memo
    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }
}
