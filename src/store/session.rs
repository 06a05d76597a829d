//! The sign-in session record.
//!
//! A small marker persisted under [`SESSION_KEY`] while a user is signed
//! in. Loading it at startup is what keeps the user signed in across app
//! launches; sign-out clears it together with the profile.

use crate::error::StoreResult;
use crate::storage::{KeyValueStore, SESSION_KEY};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Who is currently signed in on this device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Store for the single session record.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    session: Option<Session>,
    loaded: bool,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        SessionStore {
            storage,
            session: None,
            loaded: false,
        }
    }

    /// Load the persisted session, if any. Failures leave the store
    /// loaded and signed out.
    pub async fn load(&mut self) {
        self.session = match self.storage.get(SESSION_KEY).await {
            Ok(Some(stored)) => match serde_json::from_str(&stored) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!(key = SESSION_KEY, error = %e, "stored session unreadable, signing out");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = SESSION_KEY, error = %e, "failed to load session, signing out");
                None
            }
        };
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Persist `session` as the current sign-in. Persist-then-apply: a
    /// failed write propagates (the app offers a retry) and the previous
    /// session, if any, stays in effect.
    pub async fn save(&mut self, session: Session) -> StoreResult<()> {
        let snapshot = serde_json::to_string(&session)?;
        self.storage.set(SESSION_KEY, &snapshot).await?;
        self.session = Some(session);
        Ok(())
    }

    /// Sign out: remove the persisted record and drop the in-memory one.
    /// Failures are logged and swallowed.
    pub async fn clear(&mut self) {
        match self.storage.remove(SESSION_KEY).await {
            Ok(()) => self.session = None,
            Err(e) => {
                warn!(key = SESSION_KEY, error = %e, "failed to clear session");
            }
        }
    }
}
