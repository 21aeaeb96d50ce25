/// Movie metadata provider abstraction
///
/// The poster fetcher only needs one thing from a metadata source: the
/// relative poster path for a movie id. Keeping it behind a trait lets the
/// fetcher's caching and fallback logic be exercised without the network.
use crate::{error::AppResult, models::MovieId};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Fetch the relative poster path for a movie
    ///
    /// `Ok(None)` means the provider knows the movie but has no poster.
    async fn poster_path(&self, movie_id: MovieId) -> AppResult<Option<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
