//! Reaction to OS package-removal broadcasts.
//!
//! The removal broadcast is system-wide: the handler hears about every
//! package removed from the device and must filter for the monitored
//! application's own identifier. On a match it wipes local user data and
//! records an uninstall marker.
//!
//! Everything here is best-effort. The handler runs in a narrow OS-bounded
//! window while removal is already in progress, and the OS may delete the
//! storage backing the state store at any moment, so any write performed
//! here can be lost. The marker is an audit trail for the removal window,
//! never the reinstall-detection signal.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{PackageId, PREFS_NAMESPACE};
use crate::purge::{purge_user_data, PurgeReport, PurgeTargets};
use crate::traits::StateStore;

/// Key under [`PREFS_NAMESPACE`] flagging an observed removal broadcast.
pub const UNINSTALLED_FLAG_KEY: &str = "app_uninstalled";

/// Key under [`PREFS_NAMESPACE`] holding when the removal broadcast fired
/// (epoch millis).
pub const UNINSTALL_TIMESTAMP_KEY: &str = "uninstall_timestamp";

/// The audit marker left behind by an observed removal broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UninstallMarker {
    /// When the removal broadcast fired, if the timestamp write survived.
    pub observed_at_ms: Option<i64>,
}

/// Filters system-wide package-removal broadcasts for the monitored package
/// and wipes local state when the app itself is being removed.
///
/// The monitored [`PackageId`] is fixed for the process lifetime and
/// injected at construction. Unrelated removals are constant-time no-ops, so
/// the handler tolerates arbitrarily many broadcasts for other packages.
pub struct UninstallSignalHandler<S> {
    store: Arc<S>,
    own_package: PackageId,
    targets: PurgeTargets,
}

impl<S: StateStore> UninstallSignalHandler<S> {
    /// Create a handler purging the standard target set.
    pub fn new(store: Arc<S>, own_package: PackageId) -> Self {
        Self::with_targets(store, own_package, PurgeTargets::standard())
    }

    /// Create a handler with a custom purge target set.
    pub fn with_targets(store: Arc<S>, own_package: PackageId, targets: PurgeTargets) -> Self {
        Self {
            store,
            own_package,
            targets,
        }
    }

    /// The package identifier this handler matches against.
    pub fn own_package(&self) -> &PackageId {
        &self.own_package
    }

    /// Handle a removal broadcast stamped with the wall clock.
    pub fn on_package_removed_now(&self, removed_identifier: Option<&str>) -> Option<PurgeReport> {
        self.on_package_removed(removed_identifier, chrono::Utc::now().timestamp_millis())
    }

    /// Handle a removal broadcast for `removed_identifier` observed at
    /// `now_ms` (epoch millis).
    ///
    /// Returns the purge report when the removed package was this app, and
    /// `None` for unrelated packages or a missing/unusable identifier. Store
    /// failures are logged and swallowed; the marker write after the purge
    /// is best-effort and non-durable.
    pub fn on_package_removed(
        &self,
        removed_identifier: Option<&str>,
        now_ms: i64,
    ) -> Option<PurgeReport> {
        let Some(removed) = removed_identifier else {
            tracing::debug!("removal broadcast without a package identifier, ignoring");
            return None;
        };

        if !self.own_package.matches_removal_identifier(removed) {
            tracing::debug!("removal broadcast for unrelated package `{}`", removed);
            return None;
        }

        tracing::info!(
            "own package `{}` is being removed, wiping local state",
            self.own_package
        );

        let report = purge_user_data(self.store.as_ref(), &self.targets);

        if let Err(err) = self
            .store
            .set_bool(PREFS_NAMESPACE, UNINSTALLED_FLAG_KEY, true)
        {
            tracing::warn!("failed to record uninstall flag: {}", err);
        }
        if let Err(err) = self
            .store
            .set_i64(PREFS_NAMESPACE, UNINSTALL_TIMESTAMP_KEY, now_ms)
        {
            tracing::warn!("failed to record uninstall timestamp: {}", err);
        }

        Some(report)
    }
}

/// Read back the uninstall audit marker, if one survived.
///
/// Purely informational: the marker may be missing after a genuine uninstall
/// (the OS deletes the backing store) and its absence never feeds the
/// reinstall decision. Store errors read as "no marker".
pub fn uninstall_marker<S: StateStore + ?Sized>(store: &S) -> Option<UninstallMarker> {
    match store.get_bool(PREFS_NAMESPACE, UNINSTALLED_FLAG_KEY) {
        Ok(Some(true)) => {
            let observed_at_ms = store
                .get_i64(PREFS_NAMESPACE, UNINSTALL_TIMESTAMP_KEY)
                .unwrap_or_default();
            Some(UninstallMarker { observed_at_ms })
        }
        Ok(_) => None,
        Err(err) => {
            tracing::debug!("failed to read uninstall marker: {}", err);
            None
        }
    }
}
