//! Orchestrator Use Case
//!
//! The public entry point of the engine:
//! 1. Answer lookups from the artifact store
//! 2. On a miss inside the remote-addressable namespace, fetch the source
//! 3. Compile it together with nothing else (a one-unit batch)
//! 4. Re-check the store exactly once and report what is there
//!
//! Explicit compile batches skip names that are already stored, wait for
//! names another batch is compiling, and only trust backend output from a
//! successful invocation.

use std::sync::{Arc, Mutex};

use crate::domain::entities::{CompileReport, CompiledArtifact, SourceUnit};
use crate::domain::policies::FailureCache;
use crate::domain::ports::{
    ArtifactStore, CompileRequest, CompilerBackend, EngineEvent, EventSink, NamespacePolicy,
    NoRemotePolicy, NoopEventSink, ReadOnlyStore, SourceRepository,
};
use crate::domain::services::ProcessorDiscovery;
use crate::domain::value_objects::{Limits, QualifiedName};
use crate::error::{Operation, SummonError, SummonResult};
use crate::infrastructure::{MemoryArtifactStore, MemorySourceRepository};

use super::bounded::run_bounded;
use super::flight::{BatchClaim, Claim, FlightTable, WaitOutcome};
use super::options::OrchestratorOptions;
use super::resolution::Resolution;

/// Fetch-compile-retry orchestrator
///
/// Share it behind an `Arc`; every method takes `&self` and is safe to call
/// from many threads at once.
pub struct Orchestrator {
    backend: Arc<dyn CompilerBackend>,
    store: Arc<dyn ArtifactStore>,
    repository: Arc<dyn SourceRepository>,
    policy: Arc<dyn NamespacePolicy>,
    discovery: Arc<ProcessorDiscovery>,
    events: Arc<dyn EventSink>,
    limits: Limits,
    failures: Option<FailureCache>,
    /// Held for the whole invocation when the backend is not reentrant
    backend_gate: Arc<Mutex<()>>,
    resolving: FlightTable<Resolution>,
    compiling: FlightTable<SummonResult<()>>,
}

impl Orchestrator {
    /// Orchestrator with an empty in-memory store that never fetches
    pub fn new(backend: Arc<dyn CompilerBackend>) -> Self {
        Self {
            backend,
            store: Arc::new(MemoryArtifactStore::new()),
            repository: Arc::new(MemorySourceRepository::new()),
            policy: Arc::new(NoRemotePolicy),
            discovery: Arc::new(ProcessorDiscovery::new()),
            events: Arc::new(NoopEventSink),
            limits: Limits::unbounded(),
            failures: None,
            backend_gate: Arc::new(Mutex::new(())),
            resolving: FlightTable::new(),
            compiling: FlightTable::new(),
        }
    }

    /// Fetch misses from `repository` for names accepted by `policy`
    pub fn with_source(
        mut self,
        repository: Arc<dyn SourceRepository>,
        policy: Arc<dyn NamespacePolicy>,
    ) -> Self {
        self.repository = repository;
        self.policy = policy;
        self
    }

    pub fn with_store(mut self, store: Arc<dyn ArtifactStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_discovery(mut self, discovery: ProcessorDiscovery) -> Self {
        self.discovery = Arc::new(discovery);
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_options(mut self, options: OrchestratorOptions) -> Self {
        self.limits = options.limits;
        self.failures = options.failure_ttl.map(FailureCache::new);
        self
    }

    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.store
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    // ----- Cache probes -----

    /// Pure cache probe
    pub fn exists(&self, name: &QualifiedName) -> bool {
        self.store.exists(name)
    }

    /// Stored artifact, if any, without emitting events
    pub fn read(&self, name: &QualifiedName) -> Option<CompiledArtifact> {
        self.store.read(name)
    }

    /// Pure cache lookup; never fetches or compiles
    pub fn resolve_cache_only(&self, name: &QualifiedName) -> Option<CompiledArtifact> {
        let found = self.store.read(name);
        if found.is_some() && self.events.wants_lookup_events() {
            self.events
                .on_event(EngineEvent::CacheHit { name: name.clone() });
        }
        found
    }

    // ----- Lookup with fetch -----

    /// Look up `name`, fetching and compiling it on a miss when allowed.
    ///
    /// Failures collapse to `None`; use [`resolve_detailed`](Self::resolve_detailed)
    /// to tell them apart from a genuine miss.
    pub fn resolve(&self, name: &QualifiedName) -> Option<CompiledArtifact> {
        self.resolve_detailed(name).into_artifact()
    }

    /// Look up `name` with the default limits, keeping failures distinct
    pub fn resolve_detailed(&self, name: &QualifiedName) -> Resolution {
        self.resolve_with_fetch(name, &self.limits)
    }

    /// Store, then at most one fetch + compile, then one cache-only re-check.
    pub fn resolve_with_fetch(&self, name: &QualifiedName, limits: &Limits) -> Resolution {
        if let Some(artifact) = self.resolve_cache_only(name) {
            return Resolution::Found(artifact);
        }

        let remote = self.policy.is_remote_addressable(name);
        if self.events.wants_lookup_events() {
            self.events.on_event(EngineEvent::CacheMiss {
                name: name.clone(),
                remote_addressable: remote,
            });
        }
        if !remote {
            return Resolution::Absent;
        }

        if let Some(err) = self.failures.as_ref().and_then(|f| f.lookup(name)) {
            self.events
                .on_event(EngineEvent::NegativeHit { name: name.clone() });
            return Resolution::Failed(err);
        }

        match self.resolving.claim(name, |n| self.store.exists(n)) {
            // Compiled between our miss and the claim
            Claim::Done => self.resolve_cache_only(name).into(),
            Claim::Follower(flight) => {
                self.events
                    .on_event(EngineEvent::Joined { name: name.clone() });
                let wait = limits.total();
                match flight.wait(wait) {
                    WaitOutcome::Ready(resolution) => resolution,
                    WaitOutcome::Abandoned => Resolution::Failed(SummonError::Abandoned {
                        operation: Operation::Wait,
                    }),
                    WaitOutcome::TimedOut => {
                        self.timed_out(Operation::Wait, Some(name));
                        Resolution::Failed(SummonError::TimedOut {
                            operation: Operation::Wait,
                            timeout: wait.unwrap_or_default(),
                        })
                    }
                }
            }
            Claim::Leader(guard) => {
                let resolution = self.fetch_then_compile(name, limits);
                if let (Some(failures), Resolution::Failed(err)) = (&self.failures, &resolution) {
                    failures.record(name, err);
                }
                guard.complete(resolution.clone());
                resolution
            }
        }
    }

    /// Drop a remembered failure so the next lookup fetches again
    pub fn forget_failure(&self, name: &QualifiedName) -> bool {
        self.failures.as_ref().is_some_and(|f| f.forget(name))
    }

    /// Drop every remembered failure
    pub fn clear_failures(&self) {
        if let Some(failures) = &self.failures {
            failures.clear();
        }
    }

    fn fetch_then_compile(&self, name: &QualifiedName, limits: &Limits) -> Resolution {
        self.events.on_event(EngineEvent::FetchStarted {
            name: name.clone(),
            repository: self.repository.name(),
        });

        let repository = Arc::clone(&self.repository);
        let wanted = name.clone();
        let fetched = run_bounded(Operation::Fetch, limits.fetch, move || {
            repository.fetch(&wanted)
        });

        let unit = match fetched {
            Err(err) => {
                if err.is_timeout() {
                    self.timed_out(Operation::Fetch, Some(name));
                }
                return Resolution::Failed(err);
            }
            Ok(Err(fetch_err)) => {
                self.events.on_event(EngineEvent::FetchFailed {
                    name: name.clone(),
                    error: fetch_err.to_string(),
                });
                return Resolution::Failed(SummonError::Resolution {
                    name: name.clone(),
                    message: fetch_err.to_string(),
                });
            }
            Ok(Ok(None)) => {
                self.events.on_event(EngineEvent::Fetched {
                    name: name.clone(),
                    found: false,
                });
                // A remote name with no source is a resolution failure, so
                // the failure cache can remember it
                return Resolution::Failed(SummonError::Resolution {
                    name: name.clone(),
                    message: format!("not found in {} repository", self.repository.name()),
                });
            }
            Ok(Ok(Some(unit))) => {
                self.events.on_event(EngineEvent::Fetched {
                    name: name.clone(),
                    found: true,
                });
                unit
            }
        };

        if let Err(err) = self.compile_with(vec![unit], limits) {
            return Resolution::Failed(err);
        }

        // Exactly one re-check, against the store only
        self.resolve_cache_only(name).into()
    }

    // ----- Compilation -----

    /// Compile a batch with the default limits
    pub fn compile(&self, units: Vec<SourceUnit>) -> SummonResult<CompileReport> {
        self.compile_with(units, &self.limits)
    }

    /// Compile the units of `units` that are not stored yet.
    ///
    /// Units already stored are skipped. Units another batch is compiling
    /// right now are waited on first; any of them that batch did not store
    /// are compiled here from our own source, together with the rest. A
    /// backend failure is reported against every unit of `units`.
    pub fn compile_with(
        &self,
        units: Vec<SourceUnit>,
        limits: &Limits,
    ) -> SummonResult<CompileReport> {
        let requested: Vec<QualifiedName> = units.iter().map(|u| u.name().clone()).collect();
        let BatchClaim {
            done,
            followers,
            mut leader,
        } = self
            .compiling
            .claim_batch(&requested, |n| self.store.exists(n));

        let mut report = CompileReport {
            requested: requested.clone(),
            skipped: done,
            ..CompileReport::default()
        };

        // Followed flights were claimed before ours, so waiting on them
        // while holding our own claim cannot form a cycle
        let mut pending: Vec<QualifiedName> = leader
            .as_ref()
            .map(|guard| guard.names().to_vec())
            .unwrap_or_default();
        for (name, flight) in followers {
            if matches!(flight.wait(limits.compile), WaitOutcome::TimedOut) {
                self.timed_out(Operation::Wait, Some(&name));
                let err = SummonError::TimedOut {
                    operation: Operation::Wait,
                    timeout: limits.compile.unwrap_or_default(),
                };
                if let Some(guard) = leader.take() {
                    guard.complete(Err(err.clone()));
                }
                return Err(err);
            }
            if self.store.exists(&name) {
                report.joined.push(name);
            } else {
                pending.push(name);
            }
        }

        let mut submit: Vec<SourceUnit> = Vec::with_capacity(pending.len());
        for unit in units {
            if pending.contains(unit.name()) && !submit.iter().any(|s| s.name() == unit.name()) {
                submit.push(unit);
            }
        }
        report.submitted = submit.iter().map(|u| u.name().clone()).collect();

        if submit.is_empty() {
            if report.joined.is_empty() {
                self.events.on_event(EngineEvent::CompileSkipped {
                    requested: requested.len(),
                });
            }
            return Ok(report);
        }

        let outcome = self.invoke_backend(submit, report.skipped.len(), &requested, limits);
        if let Some(guard) = leader {
            guard.complete(outcome.as_ref().map(|_| ()).map_err(|e| e.clone()));
        }
        report.produced = outcome?;
        Ok(report)
    }

    /// One backend invocation; stores the output only if the whole batch succeeded
    fn invoke_backend(
        &self,
        units: Vec<SourceUnit>,
        skipped: usize,
        requested: &[QualifiedName],
        limits: &Limits,
    ) -> SummonResult<Vec<QualifiedName>> {
        let submitted: Vec<QualifiedName> = units.iter().map(|u| u.name().clone()).collect();

        let backend = Arc::clone(&self.backend);
        let store = Arc::clone(&self.store);
        let discovery = Arc::clone(&self.discovery);
        let events = Arc::clone(&self.events);
        let gate = Arc::clone(&self.backend_gate);
        let started = submitted.clone();

        let result = run_bounded(Operation::Compile, limits.compile, move || {
            let _permit = if backend.supports_concurrent_invocation() {
                None
            } else {
                Some(gate.lock().unwrap_or_else(|e| e.into_inner()))
            };

            // Discovered after taking the gate so a batch sees processors
            // compiled by the batch that ran just before it
            let view = ReadOnlyStore(store.as_ref());
            let processors = discovery.available_processors(&view);
            events.on_event(EngineEvent::CompileStarted {
                backend: backend.name(),
                units: started,
                skipped,
                processors: processors.len(),
            });

            backend.compile(&CompileRequest {
                units: &units,
                processors: &processors,
                store: &view,
            })
        });

        let output = match result {
            Ok(Ok(output)) => output,
            Ok(Err(backend_err)) => {
                self.events.on_event(EngineEvent::CompileFailed {
                    units: requested.to_vec(),
                    error: backend_err.message.clone(),
                    discarded: backend_err.partial.len(),
                });
                return Err(SummonError::Compile {
                    units: requested.to_vec(),
                    message: backend_err.message,
                    diagnostics: backend_err.diagnostics,
                });
            }
            Err(err) => {
                if err.is_timeout() {
                    self.timed_out(Operation::Compile, None);
                } else {
                    self.events.on_event(EngineEvent::CompileFailed {
                        units: requested.to_vec(),
                        error: err.to_string(),
                        discarded: 0,
                    });
                }
                return Err(err);
            }
        };

        let produced_count = output.artifacts.len();
        match self.store.put_all(output.artifacts) {
            Ok(produced) => {
                self.events.on_event(EngineEvent::Compiled {
                    units: submitted,
                    produced: produced.clone(),
                });
                Ok(produced)
            }
            Err(err) => {
                self.events.on_event(EngineEvent::CompileFailed {
                    units: requested.to_vec(),
                    error: err.to_string(),
                    discarded: produced_count,
                });
                Err(err)
            }
        }
    }

    fn timed_out(&self, operation: Operation, name: Option<&QualifiedName>) {
        self.events.on_event(EngineEvent::TimedOut {
            operation,
            name: name.cloned(),
        });
    }
}
