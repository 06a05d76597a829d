//! Persistent key-value backend.
//!
//! Everything the stores persist goes through the [`KeyValueStore`] trait:
//! a single flat namespace of string keys holding serialized JSON values.
//! The app wires in [`FileStore`] for durable on-device storage;
//! [`MemoryStore`] backs tests and throwaway sessions.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreResult;
use async_trait::async_trait;

/// Storage key for the full calendar event collection.
pub const EVENTS_KEY: &str = "chronos_events";
/// Storage key for the user profile record.
pub const USER_PROFILE_KEY: &str = "chronos_user_profile";
/// Storage key for the sign-in session record.
pub const SESSION_KEY: &str = "user_session";

/// An asynchronous string key-value store.
///
/// Implementations are expected to be durable but are allowed to fail;
/// the stores built on top decide per call site whether a failure is
/// propagated or logged and swallowed.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove the value stored under `key`. Removing an absent key is not
    /// an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;
}
