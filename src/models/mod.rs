use serde::{Deserialize, Serialize};

pub mod movie;

pub use movie::{Movie, MovieId, RecommendedMovie, Recommendations};

/// Request body for the recommendations endpoint
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
}

/// Response with ranked recommendations
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendedMovie>,
    pub elapsed_ms: u64,
}

/// Poster lookup for a single movie
#[derive(Debug, Serialize, Deserialize)]
pub struct PosterResponse {
    pub movie_id: MovieId,
    pub poster_url: String,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Subset of the TMDB `/movie/{id}` response we care about
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}
