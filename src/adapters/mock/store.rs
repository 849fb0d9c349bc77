//! In-memory state store for testing.
//!
//! Stores namespaced key-value pairs in memory, allowing tests to verify
//! lifecycle behaviour without touching the file system. Clones share the
//! same underlying maps, so a test can hand one handle to the code under
//! test and inspect state through another.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::traits::{StateStore, StoreError};

type Namespaces = HashMap<String, BTreeMap<String, Value>>;

/// In-memory store with per-namespace failure injection.
///
/// # Example
///
/// ```ignore
/// use cleanslate::adapters::mock::InMemoryStateStore;
/// use cleanslate::traits::StateStore;
///
/// let store = InMemoryStateStore::new();
/// store.set_i64("app_prefs", "last_app_launch", 1_000)?;
/// assert_eq!(store.get_i64("app_prefs", "last_app_launch")?, Some(1_000));
///
/// // Simulate one namespace refusing to clear
/// store.fail_clears_for("secure_storage");
/// assert!(store.clear_namespace("secure_storage").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStore {
    namespaces: Arc<Mutex<Namespaces>>,
    /// Namespaces whose reads should fail
    fail_reads: Arc<Mutex<HashSet<String>>>,
    /// Namespaces whose writes (set/remove) should fail
    fail_writes: Arc<Mutex<HashSet<String>>>,
    /// Namespaces whose clears should fail
    fail_clears: Arc<Mutex<HashSet<String>>>,
}

impl InMemoryStateStore {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read of `namespace` fail until failures are reset.
    pub fn fail_reads_for(&self, namespace: &str) {
        self.fail_reads.lock().unwrap().insert(namespace.to_string());
    }

    /// Make every write to `namespace` fail until failures are reset.
    pub fn fail_writes_for(&self, namespace: &str) {
        self.fail_writes.lock().unwrap().insert(namespace.to_string());
    }

    /// Make every clear of `namespace` fail until failures are reset.
    pub fn fail_clears_for(&self, namespace: &str) {
        self.fail_clears.lock().unwrap().insert(namespace.to_string());
    }

    /// Clear all injected failures.
    pub fn reset_failures(&self) {
        self.fail_reads.lock().unwrap().clear();
        self.fail_writes.lock().unwrap().clear();
        self.fail_clears.lock().unwrap().clear();
    }

    /// Snapshot of a namespace's contents (for test inspection).
    pub fn snapshot(&self, namespace: &str) -> BTreeMap<String, Value> {
        self.namespaces
            .lock()
            .unwrap()
            .get(namespace)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether a namespace currently holds no keys.
    pub fn namespace_is_empty(&self, namespace: &str) -> bool {
        self.snapshot(namespace).is_empty()
    }

    /// Seed a namespace with key-value pairs (for test setup).
    pub fn seed(&self, namespace: &str, entries: &[(&str, Value)]) {
        let mut namespaces = self.namespaces.lock().unwrap();
        let ns = namespaces.entry(namespace.to_string()).or_default();
        for (key, value) in entries {
            ns.insert((*key).to_string(), value.clone());
        }
    }

    fn read_should_fail(&self, namespace: &str) -> bool {
        self.fail_reads.lock().unwrap().contains(namespace)
    }

    fn write_should_fail(&self, namespace: &str) -> bool {
        self.fail_writes.lock().unwrap().contains(namespace)
    }

    fn clear_should_fail(&self, namespace: &str) -> bool {
        self.fail_clears.lock().unwrap().contains(namespace)
    }
}

impl StateStore for InMemoryStateStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>, StoreError> {
        if self.read_should_fail(namespace) {
            return Err(StoreError::ReadFailed {
                namespace: namespace.to_string(),
                message: "simulated read failure".to_string(),
            });
        }

        Ok(self
            .namespaces
            .lock()
            .unwrap()
            .get(namespace)
            .and_then(|ns| ns.get(key))
            .cloned())
    }

    fn set(&self, namespace: &str, key: &str, value: Value) -> Result<(), StoreError> {
        if self.write_should_fail(namespace) {
            return Err(StoreError::WriteFailed {
                namespace: namespace.to_string(),
                message: "simulated write failure".to_string(),
            });
        }

        self.namespaces
            .lock()
            .unwrap()
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, namespace: &str, key: &str) -> Result<(), StoreError> {
        if self.write_should_fail(namespace) {
            return Err(StoreError::WriteFailed {
                namespace: namespace.to_string(),
                message: "simulated write failure".to_string(),
            });
        }

        if let Some(ns) = self.namespaces.lock().unwrap().get_mut(namespace) {
            ns.remove(key);
        }
        Ok(())
    }

    fn keys(&self, namespace: &str) -> Result<Vec<String>, StoreError> {
        if self.read_should_fail(namespace) {
            return Err(StoreError::ReadFailed {
                namespace: namespace.to_string(),
                message: "simulated read failure".to_string(),
            });
        }

        Ok(self
            .namespaces
            .lock()
            .unwrap()
            .get(namespace)
            .map(|ns| ns.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn clear_namespace(&self, namespace: &str) -> Result<(), StoreError> {
        if self.clear_should_fail(namespace) {
            return Err(StoreError::ClearFailed {
                namespace: namespace.to_string(),
                message: "simulated clear failure".to_string(),
            });
        }

        self.namespaces.lock().unwrap().remove(namespace);
        Ok(())
    }
}
