/// TMDB (The Movie Database) metadata provider
///
/// Poster lookups go through `/movie/{id}`, which returns the full movie
/// details. Only `poster_path` is read; everything else is ignored.
use crate::{
    error::{AppError, AppResult},
    models::{MovieId, TmdbMovieDetails},
    services::providers::PosterProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    /// Creates a TMDB provider whose requests give up after `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbProvider {
    async fn poster_path(&self, movie_id: MovieId) -> AppResult<Option<String>> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {} for movie {}",
                status, movie_id
            )));
        }

        let details: TmdbMovieDetails = response.json().await?;

        tracing::debug!(
            movie_id = movie_id,
            has_poster = details.poster_path.is_some(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(details.poster_path.filter(|path| !path.is_empty()))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
