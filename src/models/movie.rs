use serde::{Deserialize, Serialize};

/// TMDB movie identifier
pub type MovieId = u64;

/// A catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub movie_id: MovieId,
    pub title: String,
}

impl Movie {
    pub fn new(movie_id: MovieId, title: impl Into<String>) -> Self {
        Self {
            movie_id,
            title: title.into(),
        }
    }
}

/// A recommended movie together with its resolved poster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedMovie {
    pub movie_id: MovieId,
    pub title: String,
    pub poster_url: String,
}

/// Result of a recommendation: movies and their posters, index-aligned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    pub movies: Vec<Movie>,
    pub posters: Vec<String>,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Pairs each movie with its poster, in ranking order
    pub fn into_recommended(self) -> Vec<RecommendedMovie> {
        self.movies
            .into_iter()
            .zip(self.posters)
            .map(|(movie, poster_url)| RecommendedMovie {
                movie_id: movie.movie_id,
                title: movie.title,
                poster_url,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_deserialization() {
        let json = r#"{"movie_id": 19995, "title": "Avatar"}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie, Movie::new(19995, "Avatar"));
    }

    #[test]
    fn test_into_recommended_keeps_order() {
        let recs = Recommendations {
            movies: vec![Movie::new(3, "C"), Movie::new(2, "B")],
            posters: vec!["c.jpg".to_string(), "b.jpg".to_string()],
        };

        let paired = recs.into_recommended();
        assert_eq!(paired.len(), 2);
        assert_eq!(paired[0].movie_id, 3);
        assert_eq!(paired[0].poster_url, "c.jpg");
        assert_eq!(paired[1].title, "B");
    }

    #[test]
    fn test_empty_recommendations() {
        let recs = Recommendations::default();
        assert!(recs.is_empty());
        assert_eq!(recs.len(), 0);
        assert!(recs.posters.is_empty());
    }
}
