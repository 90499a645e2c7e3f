//! Scenario: Concurrent Lookups
//!
//! Journey: many compiler threads ask for the same missing names at once.
//!
//! Success Criteria:
//! - One fetch and one compile per name regardless of caller count
//! - Every caller sees the same artifact

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use crate::common::*;
use summon::CompiledArtifact;

const CALLERS: usize = 16;

/// SCENARIO: sixteen threads resolve the same missing name
#[test]
fn scenario_concurrent_resolves_share_one_attempt() {
    let backend = Arc::new(ScriptedBackend::new());
    let repo = Arc::new(
        CountingRepository::with_delay(Duration::from_millis(30))
            .with_source("remote/Hot", "sleep 30\nunit remote/Hot"),
    );
    let orchestrator = Arc::new(remote_orchestrator(&backend, &repo));
    let barrier = Arc::new(Barrier::new(CALLERS));

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let orchestrator = Arc::clone(&orchestrator);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                orchestrator.resolve(&name("remote/Hot"))
            })
        })
        .collect();
    let results: Vec<Option<CompiledArtifact>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(repo.fetches(), 1);
    assert_eq!(backend.calls(), 1);
    let first = results[0].clone().unwrap();
    assert!(results.iter().all(|r| r.as_ref() == Some(&first)));
}

/// SCENARIO: different names proceed independently but the backend stays serialized
#[test]
fn scenario_distinct_names_each_compile_once() {
    let backend = Arc::new(ScriptedBackend::new());
    let mut repo = CountingRepository::new();
    for i in 0..4 {
        let n = format!("remote/U{i}");
        repo = repo.with_source(&n, &format!("sleep 10\nunit {n}"));
    }
    let repo = Arc::new(repo);
    let orchestrator = Arc::new(remote_orchestrator(&backend, &repo));

    let handles: Vec<_> = (0..4)
        .flat_map(|i| {
            (0..3).map(move |_| format!("remote/U{i}"))
        })
        .map(|n| {
            let orchestrator = Arc::clone(&orchestrator);
            thread::spawn(move || orchestrator.resolve(&name(&n)).is_some())
        })
        .collect();
    assert!(handles.into_iter().all(|h| h.join().unwrap()));

    assert_eq!(backend.calls(), 4);
    assert_eq!(backend.max_running(), 1);
    for i in 0..4 {
        assert_eq!(repo.fetches_of(&format!("remote/U{i}")), 1);
    }
}

/// SCENARIO: an explicit compile races a lookup of the same name
#[test]
fn scenario_compile_and_resolve_race_compiles_once() {
    let backend = Arc::new(ScriptedBackend::reentrant());
    let repo = Arc::new(CountingRepository::new().with_source("remote/R", "sleep 20\nunit remote/R"));
    let orchestrator = Arc::new(remote_orchestrator(&backend, &repo));
    let barrier = Arc::new(Barrier::new(2));

    let compiler = {
        let orchestrator = Arc::clone(&orchestrator);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            orchestrator
                .compile(vec![summon::SourceUnit::local(
                    name("remote/R"),
                    "sleep 20\nunit remote/R",
                )])
                .unwrap()
        })
    };
    barrier.wait();
    let resolved = orchestrator.resolve(&name("remote/R"));
    compiler.join().unwrap();

    assert_eq!(resolved.unwrap().payload(), b"bin:remote/R");
    assert_eq!(backend.calls(), 1);
}
