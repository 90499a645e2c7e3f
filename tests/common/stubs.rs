//! In-process stubs for the engine's ports.
//!
//! `ScriptedBackend` reads one directive per source line:
//! - `unit <name>` emits a plain artifact with payload `bin:<name>`
//! - `processor <name>` emits an extension processor
//! - `sleep <ms>` stalls the invocation
//! - `fail` makes the whole invocation fail (output so far becomes partial)

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::thread;
use std::time::Duration;

use summon::{
    BackendError, BackendOutput, Capability, CompileRequest, CompiledArtifact, CompilerBackend,
    FetchError, QualifiedName, SourceRepository, SourceUnit,
};

pub fn name(s: &str) -> QualifiedName {
    QualifiedName::parse(s).unwrap()
}

/// A local unit whose source defines just itself
pub fn unit(s: &str) -> SourceUnit {
    SourceUnit::local(name(s), format!("unit {s}"))
}

#[derive(Default)]
pub struct ScriptedBackend {
    calls: AtomicUsize,
    running: AtomicUsize,
    max_running: AtomicUsize,
    concurrent: bool,
    submitted: Mutex<Vec<Vec<QualifiedName>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reentrant() -> Self {
        Self {
            concurrent: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_running(&self) -> usize {
        self.max_running.load(Ordering::SeqCst)
    }

    /// Units of every invocation, in call order
    pub fn submitted(&self) -> Vec<Vec<QualifiedName>> {
        self.submitted.lock().unwrap().clone()
    }
}

impl CompilerBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn compile(&self, request: &CompileRequest<'_>) -> Result<BackendOutput, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_running.fetch_max(now, Ordering::SeqCst);
        self.submitted
            .lock()
            .unwrap()
            .push(request.units.iter().map(|u| u.name().clone()).collect());

        let mut artifacts = Vec::new();
        let mut failed = false;
        for line in request.units.iter().flat_map(|u| u.text().lines()) {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some("unit"), Some(n)) => {
                    artifacts.push(CompiledArtifact::new(name(n), format!("bin:{n}").into_bytes()))
                }
                (Some("processor"), Some(n)) => artifacts.push(
                    CompiledArtifact::new(name(n), format!("proc:{n}").into_bytes())
                        .with_capability(Capability::ExtensionProcessor),
                ),
                (Some("sleep"), Some(ms)) => {
                    thread::sleep(Duration::from_millis(ms.parse().unwrap()))
                }
                (Some("fail"), _) => failed = true,
                _ => {}
            }
        }

        self.running.fetch_sub(1, Ordering::SeqCst);
        if failed {
            return Err(BackendError::new("scripted failure").with_partial(artifacts));
        }
        Ok(BackendOutput {
            artifacts,
            diagnostics: Vec::new(),
        })
    }

    fn supports_concurrent_invocation(&self) -> bool {
        self.concurrent
    }
}

/// Source repository that counts fetches per name
#[derive(Default)]
pub struct CountingRepository {
    sources: RwLock<HashMap<QualifiedName, String>>,
    fetches: Mutex<HashMap<QualifiedName, usize>>,
    delay: Duration,
}

impl CountingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn with_source(self, n: &str, text: &str) -> Self {
        self.sources.write().unwrap().insert(name(n), text.to_string());
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.lock().unwrap().values().sum()
    }

    pub fn fetches_of(&self, n: &str) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .get(&name(n))
            .copied()
            .unwrap_or(0)
    }
}

impl SourceRepository for CountingRepository {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn fetch(&self, name: &QualifiedName) -> Result<Option<SourceUnit>, FetchError> {
        *self.fetches.lock().unwrap().entry(name.clone()).or_default() += 1;
        thread::sleep(self.delay);
        Ok(self
            .sources
            .read()
            .unwrap()
            .get(name)
            .map(|text| SourceUnit::remote(name.clone(), text.as_str())))
    }
}

/// Orchestrator fetching `remote/` names from `repo`
pub fn remote_orchestrator(
    backend: &Arc<ScriptedBackend>,
    repo: &Arc<CountingRepository>,
) -> summon::Orchestrator {
    summon::Orchestrator::new(backend.clone()).with_source(
        repo.clone(),
        Arc::new(summon::PrefixPolicy::new(["remote/"]).excluding(["remote/platform/"])),
    )
}
