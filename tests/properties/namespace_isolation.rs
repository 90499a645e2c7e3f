//! Property tests for the remote namespace boundary.

use std::sync::Arc;

use proptest::prelude::*;

use crate::common::*;
use summon::Resolution;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Names outside the remote prefix never reach the repository.
    #[test]
    fn property_outside_namespace_never_fetches(
        // Never spells "remote"
        root in "[a-q]{1,6}",
        rest in proptest::collection::vec("[A-Za-z]{1,6}", 0..3),
    ) {
        let mut raw = root;
        for segment in rest {
            raw.push('/');
            raw.push_str(&segment);
        }

        let backend = Arc::new(ScriptedBackend::new());
        let repo = Arc::new(CountingRepository::new().with_source(&raw, &format!("unit {raw}")));
        let orchestrator = remote_orchestrator(&backend, &repo);

        prop_assert_eq!(orchestrator.resolve_detailed(&name(&raw)), Resolution::Absent);
        prop_assert_eq!(repo.fetches(), 0);
        prop_assert_eq!(backend.calls(), 0);
    }

    /// PROPERTY: A failing remote unit costs exactly one fetch and one compile.
    #[test]
    fn property_retry_bound(leaf in "[A-Z][a-z]{0,6}") {
        let raw = format!("remote/{leaf}");
        let backend = Arc::new(ScriptedBackend::new());
        let repo = Arc::new(CountingRepository::new().with_source(&raw, "fail"));
        let orchestrator = remote_orchestrator(&backend, &repo);

        prop_assert!(orchestrator.resolve(&name(&raw)).is_none());
        prop_assert_eq!(repo.fetches(), 1);
        prop_assert_eq!(backend.calls(), 1);
    }
}
