//! Scenario: Failure Memory and Timeouts
//!
//! Journey: a remote unit is broken or slow.
//!
//! Success Criteria:
//! - Without a failure TTL every lookup retries
//! - With a TTL the failure is replayed until it expires or is forgotten
//! - A timed-out attempt stores nothing and is not remembered

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::common::*;
use summon::{Limits, OrchestratorOptions, Resolution, SummonError};

#[test]
fn scenario_ttl_replays_failure_then_retries() {
    let backend = Arc::new(ScriptedBackend::new());
    let repo = Arc::new(CountingRepository::new().with_source("remote/Bad", "fail"));
    let orchestrator = remote_orchestrator(&backend, &repo).with_options(
        OrchestratorOptions::default().with_failure_ttl(Duration::from_millis(100)),
    );

    orchestrator.resolve(&name("remote/Bad"));
    orchestrator.resolve(&name("remote/Bad"));
    assert_eq!(repo.fetches(), 1);

    thread::sleep(Duration::from_millis(150));
    orchestrator.resolve(&name("remote/Bad"));
    assert_eq!(repo.fetches(), 2);

    orchestrator.clear_failures();
    orchestrator.resolve(&name("remote/Bad"));
    assert_eq!(repo.fetches(), 3);
}

#[test]
fn scenario_slow_fetch_times_out_and_is_not_remembered() {
    let backend = Arc::new(ScriptedBackend::new());
    let repo = Arc::new(
        CountingRepository::with_delay(Duration::from_millis(200))
            .with_source("remote/Slow", "unit remote/Slow"),
    );
    let orchestrator = remote_orchestrator(&backend, &repo).with_options(
        OrchestratorOptions::default()
            .with_limits(Limits::unbounded().with_fetch(Duration::from_millis(20)))
            .with_failure_ttl(Duration::from_secs(60)),
    );

    let first = orchestrator.resolve_detailed(&name("remote/Slow"));
    assert!(matches!(
        first,
        Resolution::Failed(SummonError::TimedOut { .. })
    ));
    assert!(!orchestrator.exists(&name("remote/Slow")));

    // Not memoized: the next lookup fetches again
    orchestrator.resolve_detailed(&name("remote/Slow"));
    assert_eq!(repo.fetches(), 2);
}

#[test]
fn scenario_generous_limits_do_not_interfere() {
    let backend = Arc::new(ScriptedBackend::new());
    let repo = Arc::new(CountingRepository::new().with_source("remote/A", "unit remote/A"));
    let orchestrator = remote_orchestrator(&backend, &repo);
    let limits = Limits::unbounded()
        .with_fetch(Duration::from_secs(5))
        .with_compile(Duration::from_secs(5));

    let found = orchestrator.resolve_with_fetch(&name("remote/A"), &limits);
    assert!(found.is_found());
}
