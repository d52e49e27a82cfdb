use async_trait::async_trait;

use super::model::*;

/// Durable key/value medium. Values are opaque bytes and every `save`
/// replaces the previous value for that key in full.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn load(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;
    async fn save(&self, key: &str, value: &[u8]) -> StorageResult<()>;
}
