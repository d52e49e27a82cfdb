use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use super::types::*;
use crate::server::AppState;

pub async fn get_popular(State(state): State<AppState>) -> Result<Json<MovieList>, CatalogFailure> {
    let results = state
        .catalog
        .get_popular()
        .await
        .map_err(|_| CatalogFailure::Popular)?;
    Ok(Json(MovieList { results }))
}

/// A blank query shows the popular list instead, like clearing the
/// search box does.
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<MovieList>, CatalogFailure> {
    let query = params.query.unwrap_or_default();
    if query.trim().is_empty() {
        debug!("Blank search query, returning popular movies");
        return get_popular(State(state)).await;
    }

    let results = state
        .catalog
        .search(&query)
        .await
        .map_err(|_| CatalogFailure::Search)?;
    Ok(Json(MovieList { results }))
}
