use axum::{
    extract::Request,
    http::uri::{PathAndQuery, Uri},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::info;

/// Collapse repeated slashes in the request path. Must wrap the router,
/// not sit inside it, so the rewritten path is the one that gets routed.
pub async fn normalize_path(mut req: Request, next: Next) -> Response {
    let uri = req.uri();
    let path = uri.path();

    if path.contains("//") {
        let mut normalized = path.to_string();
        while normalized.contains("//") {
            normalized = normalized.replace("//", "/");
        }

        let new_path_and_query = match uri.query() {
            Some(query) => format!("{}?{}", normalized, query),
            None => normalized,
        };

        let mut parts = uri.clone().into_parts();
        if let Ok(path_and_query) = new_path_and_query.parse::<PathAndQuery>() {
            parts.path_and_query = Some(path_and_query);
            if let Ok(new_uri) = Uri::from_parts(parts) {
                *req.uri_mut() = new_uri;
            }
        }
    }

    next.run(req).await
}

pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let content_length = response
        .headers()
        .get(axum::http::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);

    // Query strings stay out of the log.
    info!(
        method = %method,
        path = %uri.path(),
        status = status,
        length = content_length,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "HTTP request"
    );

    response
}
