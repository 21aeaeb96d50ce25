use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cinematch::{
    db::{Artifacts, Cache, Catalog, SimilarityMatrix},
    error::{AppError, AppResult},
    models::{Movie, MovieId, PosterResponse, RecommendationResponse},
    routes::{create_router, AppState},
    services::{providers::PosterProvider, PosterFetcher},
};

const PLACEHOLDER: &str = "https://via.placeholder.com/500x750.png?text=No+Image";
const BASE: &str = "https://image.tmdb.org/t/p/w500/";

/// Provider that knows posters for even ids, fails for ids divisible by 7,
/// and counts every call
struct StubProvider {
    calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl PosterProvider for StubProvider {
    async fn poster_path(&self, movie_id: MovieId) -> AppResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if movie_id % 7 == 0 {
            return Err(AppError::ExternalApi("unavailable".to_string()));
        }
        if movie_id % 2 == 0 {
            Ok(Some(format!("poster-{}.jpg", movie_id)))
        } else {
            Ok(None)
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Twelve movies; similarity to movie `i` falls off with distance
fn artifacts() -> Artifacts {
    let movies: Vec<Movie> = (0..12)
        .map(|i| Movie::new(i + 1, format!("Movie {}", i)))
        .collect();
    let rows = (0..12)
        .map(|i: i32| {
            (0..12)
                .map(|j: i32| 1.0 / (1.0 + (i - j).abs() as f32))
                .collect::<Vec<f32>>()
        })
        .collect();
    Artifacts::new(Catalog::new(movies), SimilarityMatrix::new(rows))
}

fn create_test_server_with(artifacts: Artifacts) -> (TestServer, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = StubProvider {
        calls: calls.clone(),
    };
    let posters = PosterFetcher::new(
        Arc::new(provider),
        Cache::new(100),
        BASE.to_string(),
        PLACEHOLDER.to_string(),
    );
    let state = AppState::new(artifacts, posters, 10);
    let app = create_router(state);
    (TestServer::new(app).unwrap(), calls)
}

fn create_test_server() -> (TestServer, Arc<AtomicUsize>) {
    create_test_server_with(artifacts())
}

#[tokio::test]
async fn test_health_check() {
    let (server, _) = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["movies"], 12);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let (server, _) = create_test_server();
    let response = server.get("/health").await;
    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn test_list_movies_in_catalog_order() {
    let (server, _) = create_test_server();
    let response = server.get("/api/v1/movies").await;
    response.assert_status_ok();

    let movies: Vec<Movie> = response.json();
    assert_eq!(movies.len(), 12);
    assert_eq!(movies[0], Movie::new(1, "Movie 0"));
    assert_eq!(movies[11].title, "Movie 11");
}

#[tokio::test]
async fn test_recommendations_small_example() {
    let catalog = Catalog::new(vec![Movie::new(1, "A"), Movie::new(2, "B"), Movie::new(3, "C")]);
    let similarity = SimilarityMatrix::new(vec![
        vec![1.0, 0.5, 0.9],
        vec![0.5, 1.0, 0.2],
        vec![0.9, 0.2, 1.0],
    ]);
    let (server, _) = create_test_server_with(Artifacts::new(catalog, similarity));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "A" }))
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    let ids: Vec<MovieId> = body.recommendations.iter().map(|r| r.movie_id).collect();
    assert_eq!(ids, vec![3, 2]);
    assert_eq!(body.recommendations[0].title, "C");
    assert_eq!(body.recommendations[0].poster_url, PLACEHOLDER);
    assert_eq!(
        body.recommendations[1].poster_url,
        format!("{}poster-2.jpg", BASE)
    );
    // Stub lookups are in-process, so the reported time stays small
    assert!(body.elapsed_ms < 60_000);
}

#[tokio::test]
async fn test_recommendations_return_ten_excluding_selection() {
    let (server, calls) = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Movie 5" }))
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert_eq!(body.recommendations.len(), 10);
    assert!(body.recommendations.iter().all(|r| r.title != "Movie 5"));
    // Nearest neighbours first; equal distances keep catalog order
    assert_eq!(body.recommendations[0].title, "Movie 4");
    assert_eq!(body.recommendations[1].title, "Movie 6");
    assert_eq!(calls.load(Ordering::SeqCst), 10);
}

#[tokio::test]
async fn test_failed_poster_lookup_falls_back_to_placeholder() {
    let (server, _) = create_test_server();

    let response = server.get("/api/v1/posters/14").await;
    response.assert_status_ok();

    let body: PosterResponse = response.json();
    assert_eq!(body.movie_id, 14);
    assert_eq!(body.poster_url, PLACEHOLDER);
}

#[tokio::test]
async fn test_repeated_recommendations_reuse_cached_posters() {
    let (server, calls) = create_test_server();

    for _ in 0..3 {
        server
            .post("/api/v1/recommendations")
            .json(&json!({ "title": "Movie 0" }))
            .await
            .assert_status_ok();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 10);
}

#[tokio::test]
async fn test_unknown_title_returns_not_found() {
    let (server, calls) = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Not A Movie" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Movie not found in the database.");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_blank_title_rejected() {
    let (server, _) = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "   " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_page_without_selection_shows_form() {
    let (server, _) = create_test_server();

    let response = server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("CineMatch - AI Movie Recommender"));
    assert!(html.contains("-- Choose a Movie --"));
    assert!(html.contains("<option value=\"Movie 11\">Movie 11</option>"));
    assert!(!html.contains("You might also like:"));
}

#[tokio::test]
async fn test_page_prompt_selection_warns() {
    let (server, calls) = create_test_server();

    let response = server
        .get("/")
        .add_query_param("movie", "-- Choose a Movie --")
        .await;
    response.assert_status_ok();

    assert!(response.text().contains("Please choose a movie to proceed!"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_page_renders_tiles() {
    let (server, _) = create_test_server();

    let response = server.get("/").add_query_param("movie", "Movie 0").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("You might also like:"));
    assert_eq!(html.matches("<div class=\"tile\">").count(), 10);
    assert_eq!(html.matches("<div class=\"row\">").count(), 2);
    assert!(html.contains(&format!("{}poster-2.jpg", BASE)));
    assert!(html.contains("Found recommendations in"));
}

#[tokio::test]
async fn test_page_unknown_title_shows_error() {
    let (server, _) = create_test_server();

    let response = server.get("/").add_query_param("movie", "Nope").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("Movie not found in the database."));
    assert!(html.contains("No recommendations available at the moment."));
    assert!(!html.contains("<div class=\"tile\">"));
}
