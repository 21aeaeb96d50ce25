use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
};

/// Ordered movie catalog; positions index the similarity matrix
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    /// Position of the first movie whose title matches exactly
    pub fn position(&self, title: &str) -> Option<usize> {
        self.movies.iter().position(|movie| movie.title == title)
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|movie| movie.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Square matrix of pairwise similarity scores, row-major by catalog position
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    pub fn new(rows: Vec<Vec<f32>>) -> Self {
        Self { rows }
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The two precomputed artifacts, loaded once and shared read-only
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    pub catalog: Catalog,
    pub similarity: SimilarityMatrix,
}

impl Artifacts {
    pub fn new(catalog: Catalog, similarity: SimilarityMatrix) -> Self {
        if catalog.len() != similarity.len() {
            tracing::warn!(
                movies = catalog.len(),
                rows = similarity.len(),
                "Catalog and similarity matrix sizes differ"
            );
        }
        Self {
            catalog,
            similarity,
        }
    }

    /// Loads the catalog and similarity matrix from JSON files
    pub fn load(
        movies_path: impl AsRef<Path>,
        similarity_path: impl AsRef<Path>,
    ) -> AppResult<Self> {
        let catalog: Catalog = read_json(movies_path.as_ref())?;
        let similarity: SimilarityMatrix = read_json(similarity_path.as_ref())?;

        tracing::info!(
            movies = catalog.len(),
            rows = similarity.len(),
            "Loaded recommendation artifacts"
        );

        Ok(Self::new(catalog, similarity))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let display = path.display().to_string();

    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::MissingArtifact {
            path: display.clone(),
        },
        _ => AppError::InvalidArtifact {
            path: display.clone(),
            reason: e.to_string(),
        },
    })?;

    serde_json::from_slice(&bytes).map_err(|e| AppError::InvalidArtifact {
        path: display,
        reason: e.to_string(),
    })
}
