use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::model::*;
use super::repo::Storage;

/// Non-durable storage, for tests and `--ephemeral` runs.
#[derive(Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, as if a previous run had saved it.
    pub fn with_value(key: &str, value: impl Into<Vec<u8>>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.into());
        Self {
            values: RwLock::new(values),
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_key(key)?;
        let values = self.values.read().await;
        Ok(values.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        validate_key(key)?;
        let mut values = self.values.write().await;
        values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
