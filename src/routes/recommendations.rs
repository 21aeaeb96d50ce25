use axum::{extract::State, Extension, Json};
use std::sync::Arc;
use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendationRequest, RecommendationResponse},
    routes::AppState,
    services::recommendations,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let title = request.title.as_str();
    if title.trim().is_empty() {
        return Err(AppError::InvalidInput("title cannot be empty".to_string()));
    }

    tracing::info!(
        request_id = %request_id,
        title = %title,
        "Processing recommendation request"
    );

    let started = Instant::now();
    let result = recommendations::recommend(
        title,
        &state.artifacts.catalog,
        &state.artifacts.similarity,
        &state.posters,
        state.recommendation_count,
    )
    .await;

    let recs = match result {
        Ok(recs) => recs,
        Err(e) => {
            tracing::warn!(request_id = %request_id, title = %title, error = %e, "Lookup failed");
            return Err(e);
        }
    };

    Ok(Json(RecommendationResponse {
        recommendations: recs.into_recommended(),
        elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    }))
}
