//! Core domain vocabulary shared by the detector and the uninstall handler.
//!
//! # Types
//!
//! - [`LaunchDecision`] - Outcome of a foreground-event check
//! - [`PackageId`] - The monitored application's package identifier
//!
//! The namespace constants below name the logical preference stores the
//! application writes to. The tracking keys themselves live in the
//! application preference namespace, so a genuine uninstall (which deletes
//! the backing store) also deletes the tracking state.

pub mod decision;
pub mod package_id;

pub use decision::LaunchDecision;
pub use package_id::PackageId;

/// Namespace holding the application's own preferences, including the
/// install-lifecycle tracking keys.
pub const PREFS_NAMESPACE: &str = "app_prefs";

/// Namespace backing the secure-storage plugin (cached auth tokens).
pub const SECURE_STORAGE_NAMESPACE: &str = "secure_storage";

/// Auxiliary namespace used by the embedded runtime layer's own
/// shared-preferences plugin.
pub const RUNTIME_PREFS_NAMESPACE: &str = "runtime_prefs";
