//! Trait abstractions for dependency injection and testability.
//!
//! The install-lifecycle components never reach for ambient global state:
//! the persistent key-value store they share is injected through the
//! [`StateStore`] trait, so production code wires in a real adapter and unit
//! tests supply an in-memory fake.

pub mod store;

pub use store::{StateStore, StoreError};
