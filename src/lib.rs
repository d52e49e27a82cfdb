pub mod api;
pub mod catalog;
pub mod config;
pub mod favorites;
pub mod middleware;
pub mod server;
pub mod storage;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::catalog::{ApiError, CatalogClient};
use crate::config::{Config, StorageBackend};
use crate::favorites::{FavoritesError, FavoritesStore};
use crate::storage::{FileStorage, MemoryStorage, SqliteStorage, Storage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Catalog error: {0}")]
    Api(#[from] ApiError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Favorites error: {0}")]
    Favorites(#[from] FavoritesError),
    #[error("Server error: {0}")]
    Server(String),
    #[error("{0}")]
    Usage(String),
}

pub fn catalog_client(config: &Config) -> Result<Arc<CatalogClient>, AppError> {
    let (base_url, api_key) = config.catalog_settings()?;
    info!("Catalog API at {}", base_url);
    Ok(Arc::new(CatalogClient::new(base_url, api_key)?))
}

pub async fn open_storage(config: &Config, ephemeral: bool) -> Result<Arc<dyn Storage>, AppError> {
    if ephemeral {
        info!("Using in-memory storage, favorites will not be saved");
        return Ok(Arc::new(MemoryStorage::new()));
    }

    let storage: Arc<dyn Storage> = match config.storage_backend() {
        StorageBackend::File(dir) => {
            info!("Storing favorites in {}", dir.display());
            Arc::new(FileStorage::new(dir))
        }
        StorageBackend::Sqlite(filename) => {
            info!("Opening database at {}", filename);
            Arc::new(SqliteStorage::new(&filename).await?)
        }
    };
    Ok(storage)
}

/// Open storage and load the favorites snapshot.
///
/// A corrupt snapshot is not fatal: the store starts empty and the
/// snapshot is replaced on the next change.
pub async fn open_favorites(config: &Config, ephemeral: bool) -> Result<Arc<FavoritesStore>, AppError> {
    let storage = open_storage(config, ephemeral).await?;
    let favorites = FavoritesStore::new(storage);

    match favorites.initialize().await {
        Ok(()) => {}
        Err(FavoritesError::Corrupt(e)) => {
            warn!("Ignoring unreadable favorites snapshot: {}", e);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Arc::new(favorites))
}

pub async fn run(config: Config, ephemeral: bool) -> Result<(), AppError> {
    if config.debug_logs {
        info!("Debug logging enabled");
    }

    let catalog = catalog_client(&config)?;
    let favorites = open_favorites(&config, ephemeral).await?;
    info!("{} favorites loaded", favorites.len().await);

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| AppError::Server(format!("Invalid address: {}", e)))?;

    let tls = match (&config.listen.tlscert, &config.listen.tlskey) {
        (Some(cert), Some(key)) => Some((cert.clone(), key.clone())),
        _ => None,
    };

    let state = server::AppState::new(config, catalog, favorites);
    let app = server::build_router(state);

    if let Some((cert_path, key_path)) = tls {
        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
            .await
            .map_err(|e| AppError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await
            .map_err(|e| AppError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| AppError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}
