use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::catalog::{Movie, MovieId};
use crate::storage::{Storage, StorageError};

/// Storage key holding the serialized favorites list.
pub const FAVORITES_KEY: &str = "favorites";

/// The user's saved movies, written through to a `Storage` on every change.
///
/// The list is ordered by insertion and unique by movie id. Call
/// `initialize` once before use to pick up the previous snapshot.
pub struct FavoritesStore {
    storage: Arc<dyn Storage>,
    favorites: RwLock<Vec<Movie>>,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            favorites: RwLock::new(Vec::new()),
        }
    }

    /// Replace the in-memory list with the stored snapshot, if there is one.
    /// On a corrupt snapshot the list is left empty.
    pub async fn initialize(&self) -> Result<(), FavoritesError> {
        let Some(data) = self.storage.load(FAVORITES_KEY).await? else {
            debug!("No stored favorites");
            return Ok(());
        };

        let stored: Vec<Movie> = serde_json::from_slice(&data).map_err(FavoritesError::Corrupt)?;
        info!("Loaded {} favorites", stored.len());

        let mut favorites = self.favorites.write().await;
        *favorites = stored;
        Ok(())
    }

    /// Append `movie` unless a movie with the same id is already present.
    /// Returns whether the list changed.
    ///
    /// If persisting fails the in-memory list keeps the new entry and the
    /// error is returned.
    pub async fn add(&self, movie: Movie) -> Result<bool, FavoritesError> {
        let mut favorites = self.favorites.write().await;
        if favorites.iter().any(|m| m.id == movie.id) {
            return Ok(false);
        }

        debug!("Adding favorite {}", movie.id);
        favorites.push(movie);
        self.persist(&favorites).await?;
        Ok(true)
    }

    /// Remove every entry with this id. Returns whether the list changed.
    pub async fn remove(&self, movie_id: MovieId) -> Result<bool, FavoritesError> {
        let mut favorites = self.favorites.write().await;
        let before = favorites.len();
        favorites.retain(|m| m.id != movie_id);
        if favorites.len() == before {
            return Ok(false);
        }

        debug!("Removed favorite {}", movie_id);
        self.persist(&favorites).await?;
        Ok(true)
    }

    pub async fn is_favorite(&self, movie_id: MovieId) -> bool {
        let favorites = self.favorites.read().await;
        favorites.iter().any(|m| m.id == movie_id)
    }

    pub async fn list(&self) -> Vec<Movie> {
        self.favorites.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.favorites.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.favorites.read().await.is_empty()
    }

    // Called with the write lock held so snapshots land in mutation order.
    async fn persist(&self, favorites: &[Movie]) -> Result<(), FavoritesError> {
        let data = serde_json::to_vec(favorites).map_err(FavoritesError::Serialize)?;
        self.storage.save(FAVORITES_KEY, &data).await?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Stored favorites are corrupt: {0}")]
    Corrupt(serde_json::Error),
    #[error("Failed to serialize favorites: {0}")]
    Serialize(serde_json::Error),
}
