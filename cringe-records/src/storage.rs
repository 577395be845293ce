use crate::APP_NAME;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no usable data directory: {0}")]
    DataDir(String),
}

/// Asynchronous key-value storage.
///
/// Keys are plain strings, values are opaque strings. A missing key is
/// `None`, never an error. Calls may fail; callers log and degrade rather
/// than crash.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Filesystem-backed storage: each key maps to `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        FileStorage { dir }
    }

    /// Storage rooted at the XDG data directory for the app.
    pub fn in_default_dir() -> Result<Self, StorageError> {
        let xdg_dir = xdg::BaseDirectories::with_prefix(APP_NAME)
            .map_err(|e| StorageError::DataDir(e.to_string()))?;
        Ok(FileStorage {
            dir: xdg_dir.get_data_home(),
        })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        debug!("writing {} bytes to {:?}", value.len(), path);
        fs::write(path, value).await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory storage used by tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().unwrap().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = tracing_subscriber::fmt::try_init();
    }

    #[tokio::test]
    async fn test_file_storage_missing_key() -> anyhow::Result<()> {
        init();
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().to_path_buf());
        assert_eq!(storage.get_item("records").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_file_storage_round_trip() -> anyhow::Result<()> {
        init();
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().to_path_buf());

        storage.set_item("records", "[1,2,3]").await?;
        assert_eq!(
            storage.get_item("records").await?,
            Some("[1,2,3]".to_string())
        );

        // Value lands in a file named after the key.
        assert!(dir.path().join("records.json").exists());

        storage.remove_item("records").await?;
        assert_eq!(storage.get_item("records").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_file_storage_remove_missing_is_ok() -> anyhow::Result<()> {
        init();
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().to_path_buf());
        storage.remove_item("records").await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_file_storage_creates_dir_on_write() -> anyhow::Result<()> {
        init();
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone());
        storage.set_item("records", "[]").await?;
        assert!(nested.join("records.json").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_memory_storage_contract() -> anyhow::Result<()> {
        init();
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("records").await?, None);

        storage.set_item("records", "x").await?;
        assert_eq!(storage.get_item("records").await?, Some("x".to_string()));

        storage.set_item("records", "y").await?;
        assert_eq!(storage.get_item("records").await?, Some("y".to_string()));

        storage.remove_item("records").await?;
        assert_eq!(storage.get_item("records").await?, None);
        Ok(())
    }
}
