//! Common test utilities for integration tests.
//!
//! Provides reusable fixtures over the in-memory store so the lifecycle
//! components can be exercised without file system access.

// Each integration test binary compiles its own copy of this module and
// uses a different subset of the helpers.
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;

use cleanslate::adapters::mock::InMemoryStateStore;
use cleanslate::domain::{PackageId, SECURE_STORAGE_NAMESPACE};
use cleanslate::reinstall::ReinstallDetector;
use cleanslate::uninstall::UninstallSignalHandler;

/// One day in epoch milliseconds.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// The package identifier used by the monitored test app.
pub const OWN_PACKAGE: &str = "com.example.app";

/// Install a tracing subscriber so test failures come with log context.
/// Safe to call from every test; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A store seeded with the kind of state a signed-in user accumulates.
pub fn store_with_user_data() -> InMemoryStateStore {
    let store = InMemoryStateStore::new();
    store.seed(
        SECURE_STORAGE_NAMESPACE,
        &[
            ("auth_token", Value::from("stale-access-token")),
            ("refresh_token", Value::from("stale-refresh-token")),
        ],
    );
    store
}

/// A detector sharing state with the returned store handle.
pub fn detector_over(store: &InMemoryStateStore) -> ReinstallDetector<InMemoryStateStore> {
    ReinstallDetector::new(Arc::new(store.clone()))
}

/// An uninstall handler monitoring [`OWN_PACKAGE`], sharing state with the
/// returned store handle.
pub fn handler_over(store: &InMemoryStateStore) -> UninstallSignalHandler<InMemoryStateStore> {
    UninstallSignalHandler::new(Arc::new(store.clone()), PackageId::new(OWN_PACKAGE))
}
