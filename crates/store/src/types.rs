//! Core domain types: the movie catalog and the user rating table.
//!
//! This module defines the fundamental data structures used throughout the
//! system:
//! - Type aliases for domain clarity (UserId, MovieId)
//! - `Movie`: catalog entry plus the set of users who rated it
//! - `RatingsStore`: the in-memory catalog + sparse user×movie rating matrix

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with movie IDs

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie (unique and stable after load)
pub type MovieId = u32;

// =============================================================================
// Row Types
// =============================================================================

/// One parsed row of the movie catalog table: `(movie_id, title)`.
///
/// Extra trailing fields in the source file (genres etc.) are ignored by
/// the parser and never reach this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRow {
    pub movie_id: MovieId,
    pub title: String,
}

/// One parsed row of a rating table (training or test):
/// `(user_id, movie_id, rating)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RatingRow {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value on a 0.5-step scale from 0.5 to 5.0
    pub rating: f64,
}

// =============================================================================
// Movie
// =============================================================================

/// Represents a movie in the catalog.
///
/// `raters` accumulates as the training rating table is loaded; it is the
/// membership set consulted for exact recall and for co-rater intersection
/// during similarity computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Users who have rated this movie
    pub raters: HashSet<UserId>,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            raters: HashSet::new(),
        }
    }
}

// =============================================================================
// RatingsStore - The Core In-Memory Database
// =============================================================================

/// Owns the movie catalog and the sparse user×movie rating matrix.
///
/// Both tables are built once at load time and are read-only for the rest
/// of the session; the engine shares the store behind an `Arc` and only
/// ever borrows from it.
#[derive(Debug, Default)]
pub struct RatingsStore {
    /// Catalog: movie id -> movie
    pub(crate) movies: HashMap<MovieId, Movie>,
    /// Rating table: user id -> (movie id -> rating)
    pub(crate) ratings: HashMap<UserId, HashMap<MovieId, f64>>,
}

impl RatingsStore {
    /// Creates a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the catalog from parsed rows, one `Movie` per row with an
    /// empty raters set. Must be called before [`load_ratings`].
    ///
    /// [`load_ratings`]: RatingsStore::load_ratings
    pub fn load_catalog(&mut self, rows: Vec<CatalogRow>) {
        for row in rows {
            self.movies
                .insert(row.movie_id, Movie::new(row.movie_id, row.title));
        }
    }

    /// Apply training rating rows: record `ratings[user][movie] = rating`
    /// and add the user to the movie's raters set.
    ///
    /// Fails with [`StoreError::UnknownMovie`] on the first row whose movie
    /// id is absent from the catalog; rows are never silently skipped.
    pub fn load_ratings(&mut self, rows: Vec<RatingRow>) -> Result<()> {
        for row in rows {
            let movie = self
                .movies
                .get_mut(&row.movie_id)
                .ok_or(StoreError::UnknownMovie { id: row.movie_id })?;
            movie.raters.insert(row.user_id);

            self.ratings
                .entry(row.user_id)
                .or_default()
                .insert(row.movie_id, row.rating);
        }
        Ok(())
    }

    // Getters - Note: These return references (&T) not owned values (T)

    /// Whether the user appears in the rating table
    pub fn has_user(&self, id: UserId) -> bool {
        self.ratings.contains_key(&id)
    }

    /// Whether the movie appears in the catalog
    pub fn has_movie(&self, id: MovieId) -> bool {
        self.movies.contains_key(&id)
    }

    /// Get a movie by ID
    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// All ratings made by a user, keyed by movie id
    ///
    /// Fails with [`StoreError::UnknownUser`] if the user never rated
    /// anything.
    pub fn ratings_of(&self, user_id: UserId) -> Result<&HashMap<MovieId, f64>> {
        self.ratings
            .get(&user_id)
            .ok_or(StoreError::UnknownUser { id: user_id })
    }

    /// The rating a user gave a movie, if any
    pub fn rating(&self, user_id: UserId, movie_id: MovieId) -> Option<f64> {
        self.ratings.get(&user_id)?.get(&movie_id).copied()
    }

    /// Get counts for logging/validation: (users, movies, ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_ratings = self.ratings.values().map(|m| m.len()).sum();
        (self.ratings.len(), self.movies.len(), total_ratings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_rows() -> Vec<CatalogRow> {
        vec![
            CatalogRow {
                movie_id: 1,
                title: "Toy Story (1995)".to_string(),
            },
            CatalogRow {
                movie_id: 2,
                title: "Jumanji (1995)".to_string(),
            },
        ]
    }

    #[test]
    fn test_empty_store() {
        let store = RatingsStore::new();
        let (users, movies, ratings) = store.counts();

        assert_eq!(users, 0);
        assert_eq!(movies, 0);
        assert_eq!(ratings, 0);
    }

    #[test]
    fn test_load_catalog() {
        let mut store = RatingsStore::new();
        store.load_catalog(catalog_rows());

        assert!(store.has_movie(1));
        assert!(store.has_movie(2));
        assert!(!store.has_movie(99));

        let movie = store.movie(1).unwrap();
        assert_eq!(movie.title, "Toy Story (1995)");
        assert!(movie.raters.is_empty());
    }

    #[test]
    fn test_load_ratings_populates_raters() {
        let mut store = RatingsStore::new();
        store.load_catalog(catalog_rows());
        store
            .load_ratings(vec![
                RatingRow {
                    user_id: 10,
                    movie_id: 1,
                    rating: 4.0,
                },
                RatingRow {
                    user_id: 11,
                    movie_id: 1,
                    rating: 5.0,
                },
                RatingRow {
                    user_id: 10,
                    movie_id: 2,
                    rating: 3.0,
                },
            ])
            .unwrap();

        assert!(store.has_user(10));
        assert!(store.has_user(11));
        assert!(!store.has_user(12));

        let movie = store.movie(1).unwrap();
        assert!(movie.raters.contains(&10));
        assert!(movie.raters.contains(&11));

        assert_eq!(store.rating(10, 1), Some(4.0));
        assert_eq!(store.rating(11, 2), None);

        let ratings = store.ratings_of(10).unwrap();
        assert_eq!(ratings.len(), 2);

        let (users, movies, ratings) = store.counts();
        assert_eq!((users, movies, ratings), (2, 2, 3));
    }

    #[test]
    fn test_load_ratings_unknown_movie_fails_fast() {
        let mut store = RatingsStore::new();
        store.load_catalog(catalog_rows());

        let err = store
            .load_ratings(vec![RatingRow {
                user_id: 10,
                movie_id: 42,
                rating: 4.0,
            }])
            .unwrap_err();

        assert!(matches!(err, StoreError::UnknownMovie { id: 42 }));
    }

    #[test]
    fn test_ratings_of_unknown_user() {
        let store = RatingsStore::new();
        let err = store.ratings_of(999).unwrap_err();
        assert!(matches!(err, StoreError::UnknownUser { id: 999 }));
    }
}
