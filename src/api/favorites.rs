use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::error;

use super::types::*;
use crate::catalog::{Movie, MovieId};
use crate::server::AppState;

pub async fn list_favorites(State(state): State<AppState>) -> Json<Vec<Movie>> {
    Json(state.favorites.list().await)
}

// Persistence errors are logged only: the in-memory list already has the
// change and the user is never shown a favorites failure.

pub async fn add_favorite(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> (StatusCode, Json<FavoriteStatus>) {
    let id = movie.id;
    let status = match state.favorites.add(movie).await {
        Ok(true) => StatusCode::CREATED,
        Ok(false) => StatusCode::OK,
        Err(e) => {
            error!("Failed to save favorites after adding {}: {}", id, e);
            StatusCode::CREATED
        }
    };
    (
        status,
        Json(FavoriteStatus {
            id,
            is_favorite: true,
        }),
    )
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
) -> StatusCode {
    if let Err(e) = state.favorites.remove(id).await {
        error!("Failed to save favorites after removing {}: {}", id, e);
    }
    StatusCode::NO_CONTENT
}

pub async fn get_favorite_status(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
) -> Json<FavoriteStatus> {
    Json(FavoriteStatus {
        id,
        is_favorite: state.favorites.is_favorite(id).await,
    })
}
