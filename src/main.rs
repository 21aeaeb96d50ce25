use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cinematch::{
    config::Config,
    db::{Artifacts, Cache},
    routes::{create_router, AppState},
    services::{providers::TmdbProvider, PosterFetcher},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinematch=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let artifacts = match Artifacts::load(&config.movies_path, &config.similarity_path) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load recommendation data");
            return Err(e.into());
        }
    };

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.poster_timeout(),
    )
    .context("Failed to build TMDB client")?;

    let posters = PosterFetcher::new(
        Arc::new(provider),
        Cache::new(config.poster_cache_capacity),
        config.poster_base_url.clone(),
        config.placeholder_poster_url.clone(),
    );

    let state = AppState::new(artifacts, posters, config.recommendation_count);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "CineMatch listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
