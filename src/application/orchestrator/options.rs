//! Orchestrator Options

use std::time::Duration;

use crate::domain::value_objects::Limits;

/// Tunables for an [`Orchestrator`](super::Orchestrator)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrchestratorOptions {
    /// Default bounds for calls that do not pass their own
    pub limits: Limits,
    /// Remember failed names for this long; `None` always retries
    pub failure_ttl: Option<Duration>,
}

impl OrchestratorOptions {
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_failure_ttl(mut self, ttl: Duration) -> Self {
        self.failure_ttl = Some(ttl);
        self
    }
}
