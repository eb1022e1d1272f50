//! In-memory movie catalog
//!
//! Loaded once from the service, sorted by descending popularity and
//! read-only afterwards. Search is a case-insensitive substring match on
//! the title that keeps catalog order.

use std::collections::HashMap;

use crate::models::{Movie, MovieId};

/// Maximum number of suggestions produced for a query
pub const SUGGESTION_LIMIT: usize = 10;

/// Normalize a raw search box value into a match needle
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Popularity-ordered movie catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    index: HashMap<MovieId, usize>,
}

impl Catalog {
    /// Build a catalog, sorting by popularity (descending, stable on ties)
    pub fn new(mut movies: Vec<Movie>) -> Self {
        movies.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));

        let mut index = HashMap::with_capacity(movies.len());
        for (i, movie) in movies.iter().enumerate() {
            index.entry(movie.id.clone()).or_insert(i);
        }

        Self { movies, index }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Look up a movie by id (first occurrence for duplicated ids)
    pub fn get(&self, id: &MovieId) -> Option<&Movie> {
        self.index.get(id).map(|&i| &self.movies[i])
    }

    /// First `limit` movies whose title contains `query`, in catalog order
    ///
    /// The query is trimmed and lower-cased; an empty query yields nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Movie> {
        let needle = normalize_query(query);
        if needle.is_empty() {
            return Vec::new();
        }

        self.movies
            .iter()
            .filter(|m| m.matches(&needle))
            .take(limit)
            .collect()
    }
}
