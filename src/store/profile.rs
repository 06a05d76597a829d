//! The user profile store.
//!
//! Single-record analogue of the event store, keyed by
//! [`USER_PROFILE_KEY`]. One deliberate difference: `initialize` and
//! `update` persist first and only then commit to memory, propagating a
//! failed write to the caller (the app surfaces those with a retry
//! prompt), while `reset` and `clear` swallow failures like the event
//! store does.

use crate::error::StoreResult;
use crate::profile::{random_avatar_url, ProfilePatch, UserProfile, DEFAULT_RELATION};
use crate::storage::{KeyValueStore, USER_PROFILE_KEY};
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

/// Store for the installation's single user profile.
pub struct UserProfileStore {
    storage: Arc<dyn KeyValueStore>,
    profile: Option<UserProfile>,
    loaded: bool,
}

impl UserProfileStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        UserProfileStore {
            storage,
            profile: None,
            loaded: false,
        }
    }

    /// Load the persisted profile, if any. Read and deserialization
    /// failures both leave the store loaded with no profile.
    pub async fn load(&mut self) {
        self.profile = match self.storage.get(USER_PROFILE_KEY).await {
            Ok(Some(stored)) => match serde_json::from_str(&stored) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!(key = USER_PROFILE_KEY, error = %e, "stored profile unreadable, starting fresh");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = USER_PROFILE_KEY, error = %e, "failed to load profile, starting fresh");
                None
            }
        };
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The current profile, if one has been loaded or initialized.
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Adopt the stored profile for `email`, or create a fresh one.
    ///
    /// Called during sign-in/sign-up. If the backend already holds a
    /// profile with the same email it becomes the current profile
    /// unchanged; otherwise a default profile is created (name from
    /// `name` or the email's local part, relation "Family Member",
    /// random placeholder avatar), persisted, and returned. A failed
    /// write propagates and leaves the in-memory profile untouched.
    pub async fn initialize(&mut self, email: &str, name: Option<&str>) -> StoreResult<UserProfile> {
        if let Some(stored) = self.storage.get(USER_PROFILE_KEY).await? {
            if let Ok(existing) = serde_json::from_str::<UserProfile>(&stored) {
                if existing.email == email {
                    self.profile = Some(existing.clone());
                    return Ok(existing);
                }
            }
        }

        let fresh = UserProfile::new(email, name, Utc::now());
        let snapshot = serde_json::to_string(&fresh)?;
        self.storage.set(USER_PROFILE_KEY, &snapshot).await?;

        self.profile = Some(fresh.clone());
        Ok(fresh)
    }

    /// Merge `patch` over the current profile and bump `updatedAt`.
    ///
    /// A no-op when no profile exists. Persist-then-apply: if the write
    /// fails the error propagates and the in-memory profile is unchanged.
    pub async fn update(&mut self, patch: &ProfilePatch) -> StoreResult<()> {
        let Some(current) = &self.profile else {
            return Ok(());
        };

        let mut updated = current.clone();
        patch.apply(&mut updated);
        updated.updated_at = Utc::now();

        let snapshot = serde_json::to_string(&updated)?;
        self.storage.set(USER_PROFILE_KEY, &snapshot).await?;

        self.profile = Some(updated);
        Ok(())
    }

    /// Reset the editable fields back to their defaults, keeping the
    /// profile's identity (id, name, email, `createdAt`). Failures are
    /// logged and swallowed.
    pub async fn reset(&mut self) {
        let Some(current) = &self.profile else {
            return;
        };

        let mut fresh = current.clone();
        fresh.relation = DEFAULT_RELATION.to_string();
        fresh.phone = String::new();
        fresh.date_of_birth = String::new();
        fresh.bio = String::new();
        fresh.avatar_url = random_avatar_url();
        fresh.address = String::new();
        fresh.emergency_contact = String::new();
        fresh.emergency_phone = String::new();
        fresh.updated_at = Utc::now();

        let snapshot = match serde_json::to_string(&fresh) {
            Ok(s) => s,
            Err(e) => {
                warn!(key = USER_PROFILE_KEY, error = %e, "failed to serialize profile reset");
                return;
            }
        };
        match self.storage.set(USER_PROFILE_KEY, &snapshot).await {
            Ok(()) => self.profile = Some(fresh),
            Err(e) => {
                warn!(key = USER_PROFILE_KEY, error = %e, "failed to persist profile reset");
            }
        }
    }

    /// Remove the persisted profile and drop the in-memory one.
    /// Used on sign-out. Failures are logged and swallowed.
    pub async fn clear(&mut self) {
        match self.storage.remove(USER_PROFILE_KEY).await {
            Ok(()) => self.profile = None,
            Err(e) => {
                warn!(key = USER_PROFILE_KEY, error = %e, "failed to clear profile");
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    async fn loaded_store(storage: Arc<dyn KeyValueStore>) -> UserProfileStore {
        let mut store = UserProfileStore::new(storage);
        store.load().await;
        store
    }

    #[tokio::test]
    async fn test_initialize_creates_default_profile() {
        let mut store = loaded_store(Arc::new(MemoryStore::new())).await;
        let profile = store.initialize("sam@example.com", None).await.unwrap();

        assert_eq!(profile.name, "sam");
        assert_eq!(profile.relation, DEFAULT_RELATION);
        assert_eq!(store.profile(), Some(&profile));
    }

    #[tokio::test]
    async fn test_initialize_adopts_existing_profile_for_same_email() {
        let storage = Arc::new(MemoryStore::new());

        let mut first = loaded_store(storage.clone()).await;
        let original = first.initialize("sam@example.com", Some("Samantha")).await.unwrap();

        let mut second = loaded_store(storage).await;
        let adopted = second.initialize("sam@example.com", None).await.unwrap();
        assert_eq!(adopted, original);
    }

    #[tokio::test]
    async fn test_initialize_replaces_profile_for_different_email() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = loaded_store(storage).await;

        let first = store.initialize("sam@example.com", None).await.unwrap();
        let second = store.initialize("alex@example.com", None).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.profile().unwrap().email, "alex@example.com");
    }

    #[tokio::test]
    async fn test_update_merges_and_bumps_updated_at() {
        let mut store = loaded_store(Arc::new(MemoryStore::new())).await;
        let profile = store.initialize("sam@example.com", None).await.unwrap();

        let patch = ProfilePatch {
            bio: Some("Coach of the under-10s".to_string()),
            phone: Some("555-0100".to_string()),
            ..Default::default()
        };
        store.update(&patch).await.unwrap();

        let updated = store.profile().unwrap();
        assert_eq!(updated.bio, "Coach of the under-10s");
        assert_eq!(updated.phone, "555-0100");
        assert_eq!(updated.id, profile.id);
        assert_eq!(updated.created_at, profile.created_at);
        assert!(updated.updated_at >= profile.updated_at);
    }

    #[tokio::test]
    async fn test_update_without_profile_is_a_noop() {
        let mut store = loaded_store(Arc::new(MemoryStore::new())).await;
        store
            .update(&ProfilePatch {
                bio: Some("nobody home".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(store.profile().is_none());
    }

    #[tokio::test]
    async fn test_reset_keeps_identity_and_clears_the_rest() {
        let mut store = loaded_store(Arc::new(MemoryStore::new())).await;
        let profile = store.initialize("sam@example.com", Some("Samantha")).await.unwrap();
        store
            .update(&ProfilePatch {
                bio: Some("old bio".to_string()),
                relation: Some("Parent".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        store.reset().await;

        let reset = store.profile().unwrap();
        assert_eq!(reset.id, profile.id);
        assert_eq!(reset.name, "Samantha");
        assert_eq!(reset.email, "sam@example.com");
        assert_eq!(reset.created_at, profile.created_at);
        assert_eq!(reset.bio, "");
        assert_eq!(reset.relation, DEFAULT_RELATION);
    }

    #[tokio::test]
    async fn test_clear_removes_record() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = loaded_store(storage.clone()).await;
        store.initialize("sam@example.com", None).await.unwrap();

        store.clear().await;
        assert!(store.profile().is_none());
        assert!(storage.get(USER_PROFILE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_relaunch_reproduces_profile() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = loaded_store(storage.clone()).await;
        let profile = store.initialize("sam@example.com", None).await.unwrap();

        let relaunched = loaded_store(storage).await;
        assert!(relaunched.is_loaded());
        assert_eq!(relaunched.profile(), Some(&profile));
    }

    /// Wraps a MemoryStore but fails writes on demand.
    struct FlakyWrites {
        inner: MemoryStore,
        fail: AtomicBool,
    }

    #[async_trait]
    impl KeyValueStore for FlakyWrites {
        async fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key).await
        }
        async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(crate::error::StoreError::Storage("write refused".to_string()));
            }
            self.inner.set(key, value).await
        }
        async fn remove(&self, key: &str) -> StoreResult<()> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn test_failed_update_write_leaves_profile_unchanged() {
        let storage = Arc::new(FlakyWrites {
            inner: MemoryStore::new(),
            fail: AtomicBool::new(false),
        });
        let mut store = loaded_store(storage.clone()).await;
        store.initialize("sam@example.com", None).await.unwrap();

        storage.fail.store(true, Ordering::SeqCst);
        let result = store
            .update(&ProfilePatch {
                bio: Some("will not stick".to_string()),
                ..Default::default()
            })
            .await;

        assert!(result.is_err());
        assert_eq!(store.profile().unwrap().bio, "");
    }
}
