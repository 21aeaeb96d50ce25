use crate::{
    db::{Catalog, SimilarityMatrix},
    error::{AppError, AppResult},
    models::{Movie, Recommendations},
    services::PosterFetcher,
};

pub const NOT_FOUND_MESSAGE: &str = "Movie not found in the database.";

/// Selects the `count` movies most similar to `title`
///
/// Scores from the title's matrix row are ranked highest first. The sort is
/// stable, so equal scores keep catalog order. Neither the queried movie nor
/// any other catalog entry sharing its title is part of the result. NaN scores rank below every real score, and
/// row entries with no catalog counterpart are skipped.
pub fn top_similar<'a>(
    catalog: &'a Catalog,
    similarity: &SimilarityMatrix,
    title: &str,
    count: usize,
) -> AppResult<Vec<&'a Movie>> {
    let not_found = || AppError::NotFound(NOT_FOUND_MESSAGE.to_string());

    let index = catalog.position(title).ok_or_else(not_found)?;
    let row = similarity.row(index).ok_or_else(not_found)?;

    let mut scored: Vec<(usize, f32)> = row.iter().copied().enumerate().collect();
    scored.sort_by(|a, b| rank_key(b.1).total_cmp(&rank_key(a.1)));

    Ok(scored
        .into_iter()
        .filter(|(i, _)| *i != index)
        .filter_map(|(i, _)| catalog.get(i))
        .filter(|movie| movie.title != title)
        .take(count)
        .collect())
}

fn rank_key(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score
    }
}

/// Recommends movies similar to `title`, with a poster for each
///
/// Posters are fetched one after another in ranking order. An unknown title
/// yields `NotFound` and no partial result.
pub async fn recommend(
    title: &str,
    catalog: &Catalog,
    similarity: &SimilarityMatrix,
    posters: &PosterFetcher,
    count: usize,
) -> AppResult<Recommendations> {
    let similar = top_similar(catalog, similarity, title, count)?;

    let mut recommendations = Recommendations::default();
    for movie in similar {
        let poster = posters.fetch_poster(movie.movie_id).await;
        recommendations.movies.push(movie.clone());
        recommendations.posters.push(poster);
    }

    tracing::info!(
        title = %title,
        results = recommendations.len(),
        "Recommendations generated"
    );

    Ok(recommendations)
}
