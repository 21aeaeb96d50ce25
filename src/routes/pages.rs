use axum::{
    extract::{Query, State},
    response::Html,
    Extension,
};
use serde::Deserialize;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    db::Catalog,
    middleware::request_id::RequestId,
    models::Recommendations,
    routes::AppState,
    services::recommendations,
};

/// First entry of the selection control; choosing it is not a real selection
pub const CHOOSE_PROMPT: &str = "-- Choose a Movie --";

const TILES_PER_ROW: usize = 5;

const STYLE: &str = r#"
    body { font-family: sans-serif; max-width: 960px; margin: 0 auto; padding: 16px; }
    .title-text { text-align: center; font-size: 28px; font-weight: bold; color: #F39C12; }
    .movie-box { text-align: center; font-size: 14px; margin-top: 5px; }
    .row { display: grid; grid-template-columns: repeat(5, 1fr); gap: 12px; margin-bottom: 16px; }
    .row img { width: 100%; }
    button { background-color: #3498DB; color: white; width: 100%; padding: 8px; border: none; }
    button:hover { background-color: #2980B9; }
    .warning { color: #B9770E; }
    .error { color: #C0392B; }
    .success { color: #1E8449; }
"#;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    movie: Option<String>,
}

/// Outcome of a submitted selection, as shown below the form
enum Outcome {
    NoSelection,
    Found {
        recommendations: Recommendations,
        seconds: f64,
    },
    NotFound(String),
}

/// Handler for the recommender page
///
/// Without a `movie` query parameter only the form is shown. Submitting the
/// form runs a recommendation for the selected title.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let catalog = &state.artifacts.catalog;

    let outcome = match query.movie.as_deref() {
        None => None,
        Some(movie) if movie == CHOOSE_PROMPT || movie.is_empty() => Some(Outcome::NoSelection),
        Some(movie) => {
            tracing::info!(request_id = %request_id, title = %movie, "Page recommendation requested");

            let started = Instant::now();
            match recommendations::recommend(
                movie,
                catalog,
                &state.artifacts.similarity,
                &state.posters,
                state.recommendation_count,
            )
            .await
            {
                Ok(recommendations) => Some(Outcome::Found {
                    recommendations,
                    seconds: started.elapsed().as_secs_f64(),
                }),
                Err(e) => {
                    tracing::warn!(request_id = %request_id, title = %movie, error = %e, "Lookup failed");
                    Some(Outcome::NotFound(e.to_string()))
                }
            }
        }
    };

    Html(render_page(catalog, query.movie.as_deref(), outcome))
}

fn render_page(catalog: &Catalog, selected: Option<&str>, outcome: Option<Outcome>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<title>CineMatch - AI Movie Recommender</title>\n");
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n");
    html.push_str("<p class=\"title-text\">&#127909; CineMatch - AI Movie Recommender</p>\n");
    html.push_str("<p>Select a movie to discover similar recommendations powered by AI.</p>\n");

    render_form(&mut html, catalog, selected);

    match outcome {
        None => {}
        Some(Outcome::NoSelection) => {
            html.push_str("<p class=\"warning\">Please choose a movie to proceed!</p>\n");
        }
        Some(Outcome::NotFound(message)) => {
            let _ = writeln!(html, "<p class=\"error\">{}</p>", escape_html(&message));
            html.push_str("<p class=\"error\">No recommendations available at the moment.</p>\n");
        }
        Some(Outcome::Found {
            recommendations,
            seconds,
        }) => {
            if recommendations.is_empty() {
                html.push_str(
                    "<p class=\"error\">No recommendations available at the moment.</p>\n",
                );
            } else {
                render_tiles(&mut html, &recommendations);
                let _ = writeln!(
                    html,
                    "<p class=\"success\">Found recommendations in {:.2} seconds!</p>",
                    seconds
                );
            }
        }
    }

    html.push_str("<hr>\n<div style=\"text-align: center;\">Powered by ");
    html.push_str("<a href=\"https://www.themoviedb.org/\" target=\"_blank\">TMDB</a></div>\n");
    html.push_str("</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, catalog: &Catalog, selected: Option<&str>) {
    html.push_str("<form method=\"get\" action=\"/\">\n");
    html.push_str("<label for=\"movie\">Select a movie:</label>\n");
    html.push_str("<select id=\"movie\" name=\"movie\">\n");

    for title in std::iter::once(CHOOSE_PROMPT).chain(catalog.titles()) {
        let escaped = escape_html(title);
        let marker = if selected == Some(title) { " selected" } else { "" };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            escaped, marker, escaped
        );
    }

    html.push_str("</select>\n");
    html.push_str("<button type=\"submit\">Find Similar Movies &#127916;</button>\n");
    html.push_str("</form>\n");
}

fn render_tiles(html: &mut String, recommendations: &Recommendations) {
    html.push_str("<h3>You might also like:</h3>\n");

    let tiles: Vec<(&str, &str)> = recommendations
        .movies
        .iter()
        .zip(&recommendations.posters)
        .map(|(movie, poster)| (movie.title.as_str(), poster.as_str()))
        .collect();

    for row in tiles.chunks(TILES_PER_ROW) {
        html.push_str("<div class=\"row\">\n");
        for (title, poster) in row {
            let title = escape_html(title);
            let _ = writeln!(
                html,
                "<div class=\"tile\"><img src=\"{}\" alt=\"{}\"><div class=\"movie-box\"><b>{}</b></div></div>",
                escape_html(poster),
                title,
                title
            );
        }
        html.push_str("</div>\n");
    }
}

/// Escapes text for use in HTML content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
