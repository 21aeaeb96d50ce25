use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    models::{Movie, MovieId, PosterResponse},
    routes::AppState,
};

/// Handler listing the full catalog, in catalog order
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Movie>> {
    Json(state.artifacts.catalog.movies().to_vec())
}

/// Handler resolving a single poster; always succeeds, falling back to the
/// placeholder
pub async fn poster(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<MovieId>,
) -> Json<PosterResponse> {
    let poster_url = state.posters.fetch_poster(movie_id).await;
    Json(PosterResponse {
        movie_id,
        poster_url,
    })
}
