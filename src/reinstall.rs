//! Reinstall detection on app foreground events.
//!
//! The heuristic: if more time than [`REINSTALL_THRESHOLD_MS`] has passed
//! since the last recorded launch, the app was most likely uninstalled and
//! installed again in between. On a likely reinstall all locally persisted
//! user data is purged before the launch timestamp is refreshed.

use std::sync::Arc;

use crate::domain::{LaunchDecision, PREFS_NAMESPACE};
use crate::purge::{purge_user_data, PurgeReport, PurgeTargets};
use crate::traits::StateStore;

/// Gap between launches beyond which the session counts as a fresh
/// reinstall: 7 days, in milliseconds.
///
/// This is a heuristic, not a proof. A user who simply does not open the app
/// for over a week is indistinguishable from a reinstall and will be signed
/// out; the design accepts that false positive.
pub const REINSTALL_THRESHOLD_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Key under [`PREFS_NAMESPACE`] holding the last observed launch time
/// (epoch millis).
pub const LAST_LAUNCH_KEY: &str = "last_app_launch";

/// Result of one foreground-event check.
#[derive(Debug, Clone)]
pub struct ForegroundOutcome {
    /// What this foreground event implied about the install session.
    pub decision: LaunchDecision,
    /// The purge report, when the decision triggered a purge.
    pub purge: Option<PurgeReport>,
}

/// Decides, on every foreground event, whether this is a continuing session
/// or a fresh reinstall, and purges stale user data in the latter case.
///
/// Stateless beyond the persisted launch timestamp; safe to call on every
/// single foreground transition, many times per session. Never fails from
/// the caller's perspective: store errors are logged and degrade to "no
/// state change".
pub struct ReinstallDetector<S> {
    store: Arc<S>,
    targets: PurgeTargets,
}

impl<S: StateStore> ReinstallDetector<S> {
    /// Create a detector purging the standard target set.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_targets(store, PurgeTargets::standard())
    }

    /// Create a detector with a custom purge target set.
    pub fn with_targets(store: Arc<S>, targets: PurgeTargets) -> Self {
        Self { store, targets }
    }

    /// Handle a foreground event stamped with the wall clock.
    pub fn on_foreground_now(&self) -> ForegroundOutcome {
        self.on_foreground(chrono::Utc::now().timestamp_millis())
    }

    /// Handle a foreground event at `now_ms` (epoch millis).
    ///
    /// Reads the stored launch timestamp, decides, purges on a likely
    /// reinstall, and always finishes by overwriting the timestamp with
    /// `now_ms` regardless of the branch taken.
    pub fn on_foreground(&self, now_ms: i64) -> ForegroundOutcome {
        let decision = match self.store.get_i64(PREFS_NAMESPACE, LAST_LAUNCH_KEY) {
            Ok(None) => LaunchDecision::FirstLaunch,
            Ok(Some(last_launch_ms)) => {
                let elapsed_ms = now_ms - last_launch_ms;
                // A negative gap means the clock moved backward; never treat
                // that as a reinstall.
                if elapsed_ms > REINSTALL_THRESHOLD_MS {
                    LaunchDecision::LikelyReinstall
                } else {
                    LaunchDecision::ContinuingSession
                }
            }
            Err(err) => {
                // An unreadable store is not an absent timestamp: claim
                // neither a first launch nor a reinstall.
                tracing::warn!("reinstall check: failed to read last launch: {}", err);
                LaunchDecision::ContinuingSession
            }
        };

        let purge = if decision.triggers_purge() {
            tracing::info!(
                "reinstall check: gap exceeds {} days, purging user data",
                REINSTALL_THRESHOLD_MS / (24 * 60 * 60 * 1000)
            );
            Some(self.purge_user_data())
        } else {
            tracing::debug!("reinstall check: {}", decision.description());
            None
        };

        if let Err(err) = self
            .store
            .set_i64(PREFS_NAMESPACE, LAST_LAUNCH_KEY, now_ms)
        {
            tracing::warn!("reinstall check: failed to record launch time: {}", err);
        }

        ForegroundOutcome { decision, purge }
    }

    /// Clear every purge target now, regardless of the launch gap.
    pub fn purge_user_data(&self) -> PurgeReport {
        purge_user_data(self.store.as_ref(), &self.targets)
    }
}
