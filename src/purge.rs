//! Best-effort purge of locally persisted user data.
//!
//! The purge is an attempt-all, report-all operation: every target is tried
//! independently, a failure in one never aborts the others, and nothing is
//! ever raised to the caller. Failures degrade to a warning log line plus an
//! entry in the returned [`PurgeReport`].

use serde::{Deserialize, Serialize};

use crate::domain::{PREFS_NAMESPACE, RUNTIME_PREFS_NAMESPACE, SECURE_STORAGE_NAMESPACE};
use crate::traits::{StateStore, StoreError};

/// A selective rule: remove only the keys under `prefix` from a namespace
/// shared with other subsystems, instead of wiping it whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPrefixRule {
    pub namespace: String,
    pub prefix: String,
}

/// What a purge should clear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeTargets {
    /// Namespaces cleared in full.
    pub namespaces: Vec<String>,
    /// Selective key-prefix rules, applied after the full clears.
    pub key_prefixes: Vec<KeyPrefixRule>,
}

impl PurgeTargets {
    /// The standard target set: the application preference namespace, the
    /// secure-storage namespace, and the embedded runtime's auxiliary
    /// preference namespace.
    pub fn standard() -> Self {
        Self {
            namespaces: vec![
                PREFS_NAMESPACE.to_string(),
                SECURE_STORAGE_NAMESPACE.to_string(),
                RUNTIME_PREFS_NAMESPACE.to_string(),
            ],
            key_prefixes: Vec::new(),
        }
    }

    /// Add a namespace to clear in full.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespaces.push(namespace.into());
        self
    }

    /// Add a selective key-prefix rule.
    pub fn with_key_prefix(
        mut self,
        namespace: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        self.key_prefixes.push(KeyPrefixRule {
            namespace: namespace.into(),
            prefix: prefix.into(),
        });
        self
    }
}

/// How much of a namespace one purge step covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurgeScope {
    /// The whole namespace was cleared.
    Full,
    /// Only keys under this prefix were removed.
    Prefix(String),
}

/// Outcome of one purge step.
#[derive(Debug, Clone)]
pub struct PurgeOutcome {
    pub namespace: String,
    pub scope: PurgeScope,
    pub result: Result<(), StoreError>,
}

/// Per-target outcomes of one purge run.
#[derive(Debug, Clone, Default)]
pub struct PurgeReport {
    pub outcomes: Vec<PurgeOutcome>,
}

impl PurgeReport {
    /// Whether every target cleared successfully.
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    /// The targets that failed to clear.
    pub fn failures(&self) -> impl Iterator<Item = &PurgeOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// Number of targets that failed to clear.
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Clear every purge target, independently and best-effort.
///
/// Never fails from the caller's perspective: each store error is logged and
/// recorded in the report while the remaining targets are still attempted.
/// Clearing an absent or already-empty namespace is a successful no-op, so
/// running the purge twice leaves the store in the same state as running it
/// once.
pub fn purge_user_data<S: StateStore + ?Sized>(store: &S, targets: &PurgeTargets) -> PurgeReport {
    let mut report = PurgeReport::default();

    for namespace in &targets.namespaces {
        let result = store.clear_namespace(namespace);
        if let Err(err) = &result {
            tracing::warn!("purge: failed to clear namespace `{}`: {}", namespace, err);
        } else {
            tracing::debug!("purge: cleared namespace `{}`", namespace);
        }
        report.outcomes.push(PurgeOutcome {
            namespace: namespace.clone(),
            scope: PurgeScope::Full,
            result,
        });
    }

    for rule in &targets.key_prefixes {
        let result = remove_prefixed_keys(store, rule);
        if let Err(err) = &result {
            tracing::warn!(
                "purge: failed to remove `{}*` keys from `{}`: {}",
                rule.prefix,
                rule.namespace,
                err
            );
        }
        report.outcomes.push(PurgeOutcome {
            namespace: rule.namespace.clone(),
            scope: PurgeScope::Prefix(rule.prefix.clone()),
            result,
        });
    }

    if report.is_clean() {
        tracing::info!("purge: all {} targets cleared", report.outcomes.len());
    } else {
        tracing::warn!(
            "purge: {} of {} targets failed to clear",
            report.failure_count(),
            report.outcomes.len()
        );
    }

    report
}

/// Remove every key under the rule's prefix. Keeps going past individual
/// removal failures and reports the first error encountered.
fn remove_prefixed_keys<S: StateStore + ?Sized>(
    store: &S,
    rule: &KeyPrefixRule,
) -> Result<(), StoreError> {
    let keys = store.keys(&rule.namespace)?;
    let mut first_error = None;

    for key in keys.iter().filter(|k| k.starts_with(&rule.prefix)) {
        if let Err(err) = store.remove(&rule.namespace, key) {
            if first_error.is_none() {
                first_error = Some(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
