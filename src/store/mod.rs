//! The application's data stores.
//!
//! Each store owns its canonical state in memory and mirrors it to the
//! key-value backend as a full JSON snapshot after every mutation
//! (snapshot persistence: the whole collection or record every time, no
//! deltas). Stores are constructed once at app start with the backend
//! they should write through, then `load()`ed; queries are answered from
//! memory only.

pub mod events;
pub mod profile;
pub mod session;

pub use events::EventStore;
pub use profile::UserProfileStore;
pub use session::{Session, SessionStore};
