use axum::{
    extract::Request,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::favorites::FavoritesStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<CatalogClient>,
    pub favorites: Arc<FavoritesStore>,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<CatalogClient>, favorites: Arc<FavoritesStore>) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            favorites,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/movies/popular", get(crate::api::get_popular))
        .route("/api/movies/search", get(crate::api::search_movies))
        .route(
            "/api/favorites",
            get(crate::api::list_favorites).post(crate::api::add_favorite),
        )
        .route(
            "/api/favorites/:id",
            get(crate::api::get_favorite_status).delete(crate::api::remove_favorite),
        );

    let mut router = Router::new()
        .route("/robots.txt", get(robots_txt_handler))
        .merge(api_routes)
        .fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        // The browser front end. OPTIONS requests still reach the CORS layer.
        router = router.fallback_service(ServeDir::new(appdir));
    }

    let router = router
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Layers on a router run after route matching, so the path rewrite
    // wraps the finished router as its fallback.
    Router::new()
        .fallback_service(router)
        .layer(axum::middleware::from_fn(crate::middleware::normalize_path))
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
