//! Persistent key-value store trait abstraction.
//!
//! Models the device-local preference store: namespaced key→scalar pairs
//! that survive process restarts and are deleted by the OS on a genuine
//! uninstall. Implementations must be cheap, synchronous, and callable from
//! whichever thread the host delivers its callbacks on.

use serde_json::Value;
use thiserror::Error;

/// Store operation errors.
///
/// Failures are cloneable, string-payload values because purge reports keep
/// per-namespace outcomes around after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing store cannot be used at all (permission revoked, backing
    /// storage deleted mid-operation).
    #[error("state store unavailable: {0}")]
    Unavailable(String),
    /// Reading a namespace failed.
    #[error("failed to read namespace `{namespace}`: {message}")]
    ReadFailed { namespace: String, message: String },
    /// Writing to a namespace failed.
    #[error("failed to write namespace `{namespace}`: {message}")]
    WriteFailed { namespace: String, message: String },
    /// Clearing a namespace failed.
    #[error("failed to clear namespace `{namespace}`: {message}")]
    ClearFailed { namespace: String, message: String },
}

/// Trait for the device-local persistent key-value store.
///
/// All operations are synchronous: the detector runs on the host's main
/// sequential path and the uninstall handler inside a narrow OS-bounded
/// window, so neither can afford to wait on an executor. Values are JSON
/// scalars; the typed helpers below cover the two shapes the lifecycle
/// state actually uses.
///
/// Clearing a namespace that does not exist (or is already empty) is a
/// successful no-op, never an error.
pub trait StateStore: Send + Sync {
    /// Read a single value. `Ok(None)` means the key has never been written.
    fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>, StoreError>;

    /// Write a single value, creating the namespace if needed.
    fn set(&self, namespace: &str, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove a single key. Removing an absent key is a no-op.
    fn remove(&self, namespace: &str, key: &str) -> Result<(), StoreError>;

    /// List the keys currently present in a namespace.
    fn keys(&self, namespace: &str) -> Result<Vec<String>, StoreError>;

    /// Drop every key in a namespace.
    fn clear_namespace(&self, namespace: &str) -> Result<(), StoreError>;

    /// Read an integer value, treating a non-integer as absent.
    fn get_i64(&self, namespace: &str, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.get(namespace, key)?.and_then(|v| v.as_i64()))
    }

    /// Write an integer value.
    fn set_i64(&self, namespace: &str, key: &str, value: i64) -> Result<(), StoreError> {
        self.set(namespace, key, Value::from(value))
    }

    /// Read a boolean value, treating a non-boolean as absent.
    fn get_bool(&self, namespace: &str, key: &str) -> Result<Option<bool>, StoreError> {
        Ok(self.get(namespace, key)?.and_then(|v| v.as_bool()))
    }

    /// Write a boolean value.
    fn set_bool(&self, namespace: &str, key: &str, value: bool) -> Result<(), StoreError> {
        self.set(namespace, key, Value::from(value))
    }
}
