use std::sync::Arc;

use crate::{cached, db::Cache, models::MovieId, services::providers::PosterProvider};

/// Resolves poster URLs, memoized per movie id
///
/// Failures never leave this type: any provider error, and any movie
/// without a poster, resolves to the placeholder URL. Placeholders are
/// cached like real posters.
#[derive(Clone)]
pub struct PosterFetcher {
    provider: Arc<dyn PosterProvider>,
    cache: Cache,
    base_url: String,
    placeholder_url: String,
}

impl PosterFetcher {
    pub fn new(
        provider: Arc<dyn PosterProvider>,
        cache: Cache,
        base_url: String,
        placeholder_url: String,
    ) -> Self {
        Self {
            provider,
            cache,
            base_url,
            placeholder_url,
        }
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Returns the poster URL for a movie, hitting the provider at most once
    /// per id while it stays in the cache
    pub async fn fetch_poster(&self, movie_id: MovieId) -> String {
        cached!(self.cache, movie_id, self.resolve(movie_id))
    }

    async fn resolve(&self, movie_id: MovieId) -> String {
        match self.provider.poster_path(movie_id).await {
            Ok(Some(path)) => format!("{}{}", self.base_url, path),
            Ok(None) => self.placeholder_url.clone(),
            Err(e) => {
                tracing::warn!(
                    movie_id = movie_id,
                    provider = self.provider.name(),
                    error = %e,
                    "Poster lookup failed, using placeholder"
                );
                self.placeholder_url.clone()
            }
        }
    }
}
