use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;

use super::LocalStorage;
use crate::error::{Error, Result};

/// JSON object on disk, kept in memory and written through on every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let data = match fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                Error::Storage(format!("Corrupt store {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), keys = data.len(), "opened session store");

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, data: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(data)
            .map_err(|e| Error::Storage(e.to_string()))?;

        // Rename keeps the previous file intact if the write is interrupted.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl LocalStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.set_items(&[(key, value)]).await
    }

    async fn set_items(&self, items: &[(&str, &str)]) -> Result<()> {
        let mut data = self.data.write().await;

        let mut next = data.clone();
        for (key, value) in items {
            next.insert(key.to_string(), value.to_string());
        }

        self.persist(&next).await?;
        *data = next;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let mut data = self.data.write().await;
        if !data.contains_key(key) {
            return Ok(());
        }

        let mut next = data.clone();
        next.remove(key);

        self.persist(&next).await?;
        *data = next;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut data = self.data.write().await;

        self.persist(&BTreeMap::new()).await?;
        data.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let storage = FileStorage::open(&path).await.unwrap();
        assert_eq!(storage.get_item("token").await.unwrap(), None);
        storage.set_item("token", "abc123").await.unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path).await.unwrap();
        assert_eq!(
            reopened.get_item("token").await.unwrap().as_deref(),
            Some("abc123")
        );

        reopened.remove_item("token").await.unwrap();
        drop(reopened);

        let reopened = FileStorage::open(&path).await.unwrap();
        assert_eq!(reopened.get_item("token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_storage_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let result = FileStorage::open(&path).await;
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let storage = FileStorage::open(&path).await.unwrap();
        storage.set_item("token", "old").await.unwrap();

        // A directory at the temp path makes every write fail.
        std::fs::create_dir(path.with_extension("tmp")).unwrap();

        assert!(storage.set_item("token", "new").await.is_err());
        assert!(
            storage
                .set_items(&[("token", "new"), ("email", "user@test.com")])
                .await
                .is_err()
        );
        assert!(storage.remove_item("token").await.is_err());
        assert!(storage.clear().await.is_err());

        assert_eq!(storage.get_item("token").await.unwrap().as_deref(), Some("old"));
        assert_eq!(storage.get_item("email").await.unwrap(), None);

        std::fs::remove_dir(path.with_extension("tmp")).unwrap();
        let reopened = FileStorage::open(&path).await.unwrap();
        assert_eq!(reopened.get_item("token").await.unwrap().as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_set_items_writes_together() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let storage = FileStorage::open(&path).await.unwrap();
        storage
            .set_items(&[("token", "abc123"), ("email", "user@test.com")])
            .await
            .unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path).await.unwrap();
        assert_eq!(reopened.get_item("token").await.unwrap().as_deref(), Some("abc123"));
        assert_eq!(
            reopened.get_item("email").await.unwrap().as_deref(),
            Some("user@test.com")
        );
    }
}
