//! Storage core for the Chronos family calendar.
//!
//! This crate provides the data layer the app's screens are built on:
//! - `CalendarEvent` and related types for calendar events
//! - `EventStore` for creating, updating, deleting and querying events
//! - `UserProfileStore` and `SessionStore` for the single-record profile
//!   and sign-in session
//! - `storage` module for the persistent key-value backend they write through
//!
//! Stores keep the canonical state in memory and mirror it to the backend as
//! a full JSON snapshot after every mutation. Queries never touch the backend.

pub mod error;
pub mod event;
pub mod profile;
pub mod storage;
pub mod store;

// Re-export the main types at crate root for convenience
pub use error::{StoreError, StoreResult};
pub use event::{CalendarEvent, EventColor, EventDraft, EventPatch, Recurrence};
pub use profile::{ProfilePatch, UserProfile};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::events::EventStore;
pub use store::profile::UserProfileStore;
pub use store::session::{Session, SessionStore};
