use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB metadata API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with a returned `poster_path`
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    /// Poster shown when no real poster can be resolved
    #[serde(default = "default_placeholder_poster_url")]
    pub placeholder_poster_url: String,

    /// Timeout for a single poster lookup, in seconds
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Number of movie ids whose poster URL is memoized
    #[serde(default = "default_poster_cache_capacity")]
    pub poster_cache_capacity: usize,

    /// How many similar movies a recommendation returns
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Path of the movie catalog artifact
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Path of the similarity matrix artifact
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_poster_base_url() -> String {
    "https://image.tmdb.org/t/p/w500/".to_string()
}

fn default_placeholder_poster_url() -> String {
    "https://via.placeholder.com/500x750.png?text=No+Image".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_poster_cache_capacity() -> usize {
    100
}

fn default_recommendation_count() -> usize {
    10
}

fn default_movies_path() -> String {
    "movies.json".to_string()
}

fn default_similarity_path() -> String {
    "similarity.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn poster_timeout(&self) -> Duration {
        Duration::from_secs(self.poster_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
