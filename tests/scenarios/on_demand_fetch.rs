//! Scenario: On-Demand Fetch
//!
//! Journey: a lookup misses the store for a name the host may fetch.
//!
//! Steps:
//! 1. Store starts empty
//! 2. `resolve` fetches the source once and compiles it once
//! 3. Every name the compile produced is now served from the store
//!
//! Success Criteria:
//! - Exactly one fetch and one compile per miss, even when it fails
//! - Names outside the remote namespace never reach the repository

use std::sync::Arc;

use crate::common::*;
use summon::{ArtifactReader, Resolution};

/// SCENARIO: remote/A's source also defines remote/B
#[test]
fn scenario_one_fetch_serves_every_unit_in_the_source() {
    let backend = Arc::new(ScriptedBackend::new());
    let repo = Arc::new(
        CountingRepository::new().with_source("remote/A", "unit remote/A\nunit remote/B"),
    );
    let orchestrator = remote_orchestrator(&backend, &repo);

    let a = orchestrator.resolve(&name("remote/A")).unwrap();
    assert_eq!(a.payload(), b"bin:remote/A");

    assert!(orchestrator.exists(&name("remote/B")));
    assert_eq!(repo.fetches(), 1);
    assert_eq!(repo.fetches_of("remote/B"), 0);
    assert_eq!(backend.calls(), 1);
}

/// SCENARIO: compile then look up, no repository involved
#[test]
fn scenario_compiled_unit_resolves_to_produced_payload() {
    let backend = Arc::new(ScriptedBackend::new());
    let repo = Arc::new(CountingRepository::new());
    let orchestrator = remote_orchestrator(&backend, &repo);

    let report = orchestrator.compile(vec![unit("remote/A")]).unwrap();
    let stored = orchestrator.store().read(&report.produced[0]).unwrap();

    assert!(orchestrator.exists(&name("remote/A")));
    assert_eq!(orchestrator.resolve(&name("remote/A")), Some(stored));
    assert_eq!(repo.fetches(), 0);
}

/// SCENARIO: platform and local names are never fetched
#[test]
fn scenario_names_outside_remote_namespace_never_fetch() {
    let backend = Arc::new(ScriptedBackend::new());
    let repo = Arc::new(
        CountingRepository::new()
            .with_source("remote/platform/Object", "unit remote/platform/Object")
            .with_source("local/Main", "unit local/Main"),
    );
    let orchestrator = remote_orchestrator(&backend, &repo);

    for n in ["remote/platform/Object", "local/Main", "Main"] {
        assert_eq!(orchestrator.resolve_detailed(&name(n)), Resolution::Absent);
    }
    assert_eq!(repo.fetches(), 0);
    assert_eq!(backend.calls(), 0);
}

/// SCENARIO: the fetched source does not compile
#[test]
fn scenario_failed_compile_is_absent_after_one_attempt() {
    let backend = Arc::new(ScriptedBackend::new());
    let repo = Arc::new(CountingRepository::new().with_source("remote/Broken", "unit remote/Broken\nfail"));
    let orchestrator = remote_orchestrator(&backend, &repo);

    assert_eq!(orchestrator.resolve(&name("remote/Broken")), None);
    assert_eq!(repo.fetches(), 1);
    assert_eq!(backend.calls(), 1);
    assert!(!orchestrator.exists(&name("remote/Broken")));

    let detailed = orchestrator.resolve_detailed(&name("remote/Broken"));
    assert!(matches!(detailed, Resolution::Failed(summon::SummonError::Compile { .. })));
}

/// SCENARIO: the repository has never heard of the name
#[test]
fn scenario_unknown_remote_name_is_absent_without_compiling() {
    let backend = Arc::new(ScriptedBackend::new());
    let repo = Arc::new(CountingRepository::new());
    let orchestrator = remote_orchestrator(&backend, &repo);

    assert_eq!(orchestrator.resolve(&name("remote/Ghost")), None);
    assert_eq!(repo.fetches_of("remote/Ghost"), 1);
    assert_eq!(backend.calls(), 0);
}
