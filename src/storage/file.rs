use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::model::*;
use super::repo::Storage;

/// Stores each key as `{dir}/{key}.json`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn load(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(data) => {
                debug!("Loaded {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        // Readers must never observe a partial snapshot.
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!("Saved {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.load("favorites").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("data"));

        storage.save("favorites", b"[1]").await.unwrap();
        storage.save("favorites", b"[1,2]").await.unwrap();

        assert_eq!(
            storage.load("favorites").await.unwrap().as_deref(),
            Some(&b"[1,2]"[..])
        );
        let on_disk = std::fs::read(dir.path().join("nested/data/favorites.json")).unwrap();
        assert_eq!(on_disk, b"[1,2]");
        assert!(!dir.path().join("nested/data/.favorites.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        let err = storage.save("../favorites", b"[]").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
