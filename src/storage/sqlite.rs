use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use super::model::*;
use super::repo::Storage;

/// Key/value table in a SQLite database.
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub async fn new(db_path: &str) -> StorageResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let storage = Self { pool };
        storage.init_schema().await?;

        info!("Database initialized at {}", db_path);

        Ok(storage)
    }

    async fn init_schema(&self) -> StorageResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::query(schema).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn load(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_key(key)?;
        let row = sqlx::query_as::<_, (Vec<u8>,)>("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.0))
    }

    async fn save(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        validate_key(key)?;
        sqlx::query("INSERT OR REPLACE INTO kv (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
