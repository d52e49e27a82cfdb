#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use movie_finder::storage::{Storage, StorageResult};

pub const API_KEY: &str = "test-key";

/// Decoded `query` parameters seen by the mock search endpoint.
pub type SeenQueries = Arc<Mutex<Vec<String>>>;

async fn popular(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    if params.get("api_key").map(String::as_str) != Some(API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"status_code": 7, "status_message": "Invalid API key"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "page": 1,
            "results": [
                {"id": 550, "title": "Fight Club", "release_date": "1999-10-15"},
                {"id": 603, "title": "The Matrix", "release_date": "1999-03-30"}
            ],
            "total_pages": 1,
            "total_results": 2
        })),
    )
}

async fn search(
    State(seen): State<SeenQueries>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let query = params.get("query").cloned().unwrap_or_default();
    seen.lock().unwrap().push(query.clone());
    Json(json!({
        "page": 1,
        "results": [{"id": 1, "title": query}],
    }))
}

async fn no_results() -> impl IntoResponse {
    Json(json!({"page": 1}))
}

/// Start a TMDB-like catalog on a random local port. Under `/3` it behaves;
/// under `/broken` every list endpoint answers without `results`.
pub async fn start_mock_catalog() -> (SocketAddr, SeenQueries) {
    let seen: SeenQueries = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/3/movie/popular", get(popular))
        .route("/3/search/movie", get(search))
        .route("/broken/movie/popular", get(no_results))
        .route("/broken/search/movie", get(no_results))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, seen)
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Storage that loads nothing and refuses every write.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn load(&self, _key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn save(&self, _key: &str, _value: &[u8]) -> StorageResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
    }
}

/// A server that answers every connection with `status_line` and a body
/// shorter than its Content-Length, then hangs up.
pub async fn start_truncating_server(status_line: &'static str) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: 1000\r\n\r\n{{\"status_message\":",
                status_line
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    addr
}
