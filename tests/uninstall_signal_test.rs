//! Integration tests for the uninstall-broadcast path.
//!
//! The handler hears about every package removed from the device; these
//! tests cover the filtering, the wipe on a matched removal, the audit
//! marker, and partial-purge behaviour under injected store failures.

mod common;

use cleanslate::domain::{PREFS_NAMESPACE, RUNTIME_PREFS_NAMESPACE, SECURE_STORAGE_NAMESPACE};
use cleanslate::uninstall::{uninstall_marker, UNINSTALLED_FLAG_KEY};
use cleanslate::traits::StateStore;

use common::{handler_over, init_tracing, store_with_user_data, OWN_PACKAGE};

/// Removing the monitored package wipes user data and leaves the audit
/// marker behind.
#[test]
fn test_own_removal_wipes_and_marks() {
    init_tracing();
    let store = store_with_user_data();
    let handler = handler_over(&store);

    let report = handler
        .on_package_removed(Some(OWN_PACKAGE), 7_777)
        .expect("own package should match");

    assert!(report.is_clean());
    assert!(store.namespace_is_empty(SECURE_STORAGE_NAMESPACE));
    assert!(store.namespace_is_empty(RUNTIME_PREFS_NAMESPACE));

    let marker = uninstall_marker(&store).expect("marker should survive in-process");
    assert_eq!(marker.observed_at_ms, Some(7_777));
}

/// The broadcast identifier usually arrives wrapped in a URI scheme.
#[test]
fn test_uri_wrapped_broadcast_matches() {
    init_tracing();
    let store = store_with_user_data();
    let handler = handler_over(&store);

    let report = handler.on_package_removed_now(Some("package:com.example.app"));

    assert!(report.is_some());
    assert!(store.namespace_is_empty(SECURE_STORAGE_NAMESPACE));
}

/// Removals of other packages leave every namespace untouched, including
/// packages whose names merely extend ours.
#[test]
fn test_unrelated_removals_are_noops() {
    init_tracing();
    let store = store_with_user_data();
    let handler = handler_over(&store);

    for removed in [
        "com.other.app",
        "package:com.other.app",
        "com.example.app2",
        "package:com.example.app.beta",
    ] {
        assert!(
            handler.on_package_removed(Some(removed), 1_000).is_none(),
            "`{removed}` must not match"
        );
    }

    assert!(!store.namespace_is_empty(SECURE_STORAGE_NAMESPACE));
    assert_eq!(
        store.get_bool(PREFS_NAMESPACE, UNINSTALLED_FLAG_KEY).unwrap(),
        None
    );
    assert!(uninstall_marker(&store).is_none());
}

/// A missing identifier in the broadcast is treated as a non-match.
#[test]
fn test_missing_identifier_is_noop() {
    init_tracing();
    let store = store_with_user_data();
    let handler = handler_over(&store);

    assert!(handler.on_package_removed(None, 1_000).is_none());
    assert!(!store.namespace_is_empty(SECURE_STORAGE_NAMESPACE));
}

/// One namespace failing to clear does not stop the others, and the report
/// says exactly which target failed.
#[test]
fn test_partial_purge_is_reported() {
    init_tracing();
    let store = store_with_user_data();
    let handler = handler_over(&store);
    store.fail_clears_for(SECURE_STORAGE_NAMESPACE);

    let report = handler
        .on_package_removed(Some(OWN_PACKAGE), 1_000)
        .expect("own package should match");

    assert!(!report.is_clean());
    assert_eq!(report.failure_count(), 1);
    assert_eq!(
        report.failures().next().unwrap().namespace,
        SECURE_STORAGE_NAMESPACE
    );
    // The failed namespace kept its data; the rest cleared
    assert!(!store.namespace_is_empty(SECURE_STORAGE_NAMESPACE));
    assert!(store.namespace_is_empty(RUNTIME_PREFS_NAMESPACE));
    // The marker still landed
    assert!(uninstall_marker(&store).is_some());
}

/// Both lifecycle components over one shared store: the uninstall purge
/// also removes the launch baseline, so a later launch against a store that
/// survived reads as a first launch, with the audit marker still available
/// for inspection until the next purge.
#[test]
fn test_uninstall_then_much_later_launch() {
    init_tracing();
    let store = store_with_user_data();
    let handler = handler_over(&store);
    let detector = common::detector_over(&store);

    detector.on_foreground(0);
    handler.on_package_removed(Some(OWN_PACKAGE), 1_000);

    let outcome = detector.on_foreground(30 * common::DAY_MS);
    assert_eq!(
        outcome.decision,
        cleanslate::domain::LaunchDecision::FirstLaunch
    );
    assert!(outcome.purge.is_none());
    // The marker written during the removal window is still readable
    assert!(uninstall_marker(&store).is_some());
}
