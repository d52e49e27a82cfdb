use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{Movie, MovieId};

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieList {
    pub results: Vec<Movie>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub id: MovieId,
    pub is_favorite: bool,
}

/// A catalog failure as shown to the browser: a fixed message and no
/// results, whatever went wrong upstream.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub results: Vec<Movie>,
}

#[derive(Debug, Clone, Copy)]
pub enum CatalogFailure {
    Popular,
    Search,
}

impl CatalogFailure {
    pub fn message(self) -> &'static str {
        match self {
            CatalogFailure::Popular => "Failed to load popular movies.",
            CatalogFailure::Search => "Failed to search movies.",
        }
    }
}

impl IntoResponse for CatalogFailure {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message().to_string(),
            results: Vec::new(),
        };
        (StatusCode::BAD_GATEWAY, Json(body)).into_response()
    }
}
