//! Durable key-value store backed by one file per key.

use crate::error::{StoreError, StoreResult};
use crate::storage::KeyValueStore;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// A [`KeyValueStore`] that keeps each key in its own file under a root
/// directory. Writes go to a temp file first and are renamed into place,
/// so a crash mid-write never leaves a truncated value behind.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// write, not here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize(key)))
    }
}

/// Keep keys filename-safe across platforms.
fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;

        let path = self.path_for(key);
        let temp = temp_path(&path);

        tokio::fs::write(&temp, value).await?;
        tokio::fs::rename(&temp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("chronos_events", "[1,2,3]").await.unwrap();
        let value = store.get("chronos_events").await.unwrap();
        assert_eq!(value.as_deref(), Some("[1,2,3]"));
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.get("nothing_here").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("key", "old").await.unwrap();
        store.set("key", "new").await.unwrap();
        assert_eq!(store.get("key").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("key", "value").await.unwrap();
        store.remove("key").await.unwrap();
        store.remove("key").await.unwrap();
        assert!(store.get("key").await.unwrap().is_none());
    }

    #[test]
    fn test_sanitize_keeps_keys_filename_safe() {
        assert_eq!(sanitize("chronos_events"), "chronos_events");
        assert_eq!(sanitize("weird/key name"), "weird_key_name");
    }
}
