//! File-per-key backend with atomic replace writes.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{StorageBackend, StorageResult};

/// Stores each key as `<key>.json` under a single directory.
///
/// Writes land in a temp file and are renamed into place, so a crash
/// mid-write cannot leave a half-written entry behind. A single mutex
/// serializes operations: the medium serializes access so its callers
/// do not have to.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Creates a backend rooted at `dir`.
    ///
    /// The directory is created on first write, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    /// Directory this backend reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl StorageBackend for FileStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock().await;
        match std::fs::read_to_string(self.entry_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        std::fs::create_dir_all(&self.dir)?;
        let temp_path = self.dir.join(format!("{key}.json.tmp"));
        // Write to temp file first, then atomic rename (on most filesystems)
        std::fs::write(&temp_path, value)?;
        std::fs::rename(&temp_path, self.entry_path(key))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        match std::fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn round_trips_across_instances() {
        let dir = tempdir().unwrap();
        let writer = FileStorage::new(dir.path());
        writer.set("state", "{\"a\":1}".to_string()).await.unwrap();

        // A second instance over the same directory sees the entry.
        let reader = FileStorage::new(dir.path());
        assert_eq!(
            reader.get("state").await.unwrap(),
            Some("{\"a\":1}".to_string())
        );
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let dir = tempdir().unwrap();
        let store = FileStorage::new(dir.path());
        assert_eq!(store.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_replaces_prior_value() {
        let dir = tempdir().unwrap();
        let store = FileStorage::new(dir.path());
        store.set("k", "one".to_string()).await.unwrap();
        store.set("k", "two".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("two".to_string()));
    }

    #[tokio::test]
    async fn remove_missing_key_is_ok() {
        let dir = tempdir().unwrap();
        let store = FileStorage::new(dir.path());
        store.remove("never-written").await.unwrap();
    }

    #[tokio::test]
    async fn remove_deletes_the_entry_file() {
        let dir = tempdir().unwrap();
        let store = FileStorage::new(dir.path());
        store.set("k", "v".to_string()).await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(!store.dir().join("k.json").exists());
    }

    #[tokio::test]
    async fn no_temp_file_is_left_behind() {
        let dir = tempdir().unwrap();
        let store = FileStorage::new(dir.path());
        store.set("k", "v".to_string()).await.unwrap();
        assert!(!store.dir().join("k.json.tmp").exists());
    }
}
