//! Property tests for batch compilation.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;

use crate::common::*;
use summon::Orchestrator;

fn batch() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-d]/[A-F]", 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Compiling the same batch twice invokes the backend once.
    #[test]
    fn property_second_compile_is_noop(names in batch()) {
        let backend = Arc::new(ScriptedBackend::new());
        let orchestrator = Orchestrator::new(backend.clone());
        let units: Vec<_> = names.iter().map(|n| unit(n)).collect();

        orchestrator.compile(units.clone()).unwrap();
        let second = orchestrator.compile(units).unwrap();

        prop_assert_eq!(backend.calls(), 1);
        prop_assert!(second.is_noop());
    }

    /// PROPERTY: Every compiled name exists and resolves to its payload.
    #[test]
    fn property_compiled_names_resolve(names in batch()) {
        let backend = Arc::new(ScriptedBackend::new());
        let orchestrator = Orchestrator::new(backend.clone());
        orchestrator
            .compile(names.iter().map(|n| unit(n)).collect())
            .unwrap();

        for n in &names {
            prop_assert!(orchestrator.exists(&name(n)));
            let artifact = orchestrator.resolve(&name(n)).unwrap();
            let expected = format!("bin:{n}");
            prop_assert_eq!(artifact.payload(), expected.as_bytes());
        }
    }

    /// PROPERTY: A unit is never submitted twice, however batches overlap.
    #[test]
    fn property_no_unit_submitted_twice(first in batch(), second in batch()) {
        let backend = Arc::new(ScriptedBackend::new());
        let orchestrator = Orchestrator::new(backend.clone());

        orchestrator.compile(first.iter().map(|n| unit(n)).collect()).unwrap();
        orchestrator.compile(second.iter().map(|n| unit(n)).collect()).unwrap();

        let submitted: Vec<_> = backend.submitted().into_iter().flatten().collect();
        let distinct: BTreeSet<_> = submitted.iter().cloned().collect();
        prop_assert_eq!(submitted.len(), distinct.len());

        let expected: BTreeSet<_> = first.iter().chain(&second).map(|n| name(n)).collect();
        prop_assert_eq!(distinct, expected);
    }
}
