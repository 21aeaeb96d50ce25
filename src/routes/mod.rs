use axum::{
    extract::State,
    http::{Method, StatusCode},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    db::Artifacts,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::PosterFetcher,
};

pub mod movies;
pub mod pages;
pub mod recommendations;

/// Shared application state
///
/// The artifacts are read-only after startup. The poster fetcher carries the
/// only mutable shared state, its LRU cache.
pub struct AppState {
    pub artifacts: Arc<Artifacts>,
    pub posters: PosterFetcher,
    pub recommendation_count: usize,
}

impl AppState {
    pub fn new(artifacts: Artifacts, posters: PosterFetcher, recommendation_count: usize) -> Self {
        Self {
            artifacts: Arc::new(artifacts),
            posters,
            recommendation_count,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(Arc::new(state))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST]),
                ),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(movies::list))
        .route("/posters/:movie_id", get(movies::poster))
        .route("/recommendations", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "movies": state.artifacts.catalog.len(),
        })),
    )
}
