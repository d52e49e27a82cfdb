#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Keys end up as file names, so only a conservative alphabet is accepted.
pub fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
