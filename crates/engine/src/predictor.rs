//! Item-based collaborative filtering predictor.
//!
//! Predicts the rating a user would give an unseen movie from the ratings
//! they already gave, weighting each rated movie by its similarity to the
//! target:
//!
//! ## Algorithm
//! 1. If the user already rated the target, return that rating verbatim
//!    (exact recall, not a prediction).
//! 2. Otherwise, for every movie the user rated, compute its similarity to
//!    the target and accumulate `rating * similarity` and `similarity`.
//! 3. No weighted evidence (zero denominator) falls back to the neutral
//!    rating 2.5; otherwise the prediction is the weighted average.
//!
//! Similarities may be negative, so the result is a weighted average, not
//! a convex combination; it is not clamped to the nominal rating range.

use crate::error::{EngineError, Result};
use crate::similarity::SimilarityCache;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use store::{MovieId, RatingRow, RatingsStore, UserId};
use tracing::{debug, instrument};

/// Maximum possible difference between two on-scale ratings
/// (0.5 through 5.0 in 0.5 steps). Normalizes the average absolute
/// rating difference into a similarity score.
const MAX_RATING_SPREAD: f64 = 4.5;

/// Neutral rating returned when a prediction has no weighted evidence
const FALLBACK_RATING: f64 = 2.5;

/// One batch-prediction result: the user, the movie's title, the predicted
/// rating, and the actual rating from the test table.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub user_id: UserId,
    pub title: String,
    pub predicted: f64,
    pub actual: f64,
}

/// Predicts user ratings over a shared, read-only [`RatingsStore`].
///
/// The only mutable state is the lazily populated similarity cache, so a
/// single predictor can serve many predictions (and parallel batches)
/// without re-deriving pair similarities.
pub struct RatingPredictor {
    /// Shared reference to the loaded tables (read-only, so no lock needed)
    store: Arc<RatingsStore>,

    /// Memoized pairwise similarities, populated on demand
    similarities: SimilarityCache,
}

impl RatingPredictor {
    /// Create a predictor over a loaded store
    pub fn new(store: Arc<RatingsStore>) -> Self {
        Self {
            store,
            similarities: SimilarityCache::new(),
        }
    }

    /// Similarity between two movies: `1 - avg(|rating diffs|) / 4.5` over
    /// the users who rated both, `0.0` when no user rated both (no
    /// evidence, not an error). Symmetric and memoized per unordered pair.
    ///
    /// Fails with [`EngineError::BadInput`] if either movie id is absent
    /// from the catalog.
    pub fn similarity(&self, movie_a: MovieId, movie_b: MovieId) -> Result<f64> {
        let a = self
            .store
            .movie(movie_a)
            .ok_or(EngineError::BadInput { entity: "movie", id: movie_a })?;
        let b = self
            .store
            .movie(movie_b)
            .ok_or(EngineError::BadInput { entity: "movie", id: movie_b })?;

        if let Some(cached) = self.similarities.get(movie_a, movie_b) {
            return Ok(cached);
        }

        // Average absolute rating difference among co-raters. Raters are
        // exactly the users holding a stored rating for the movie, so the
        // lookups inside the intersection always hit.
        let diffs: Vec<f64> = a
            .raters
            .intersection(&b.raters)
            .filter_map(|&user_id| {
                let rating_a = self.store.rating(user_id, movie_a)?;
                let rating_b = self.store.rating(user_id, movie_b)?;
                Some((rating_a - rating_b).abs())
            })
            .collect();

        let similarity = if diffs.is_empty() {
            0.0
        } else {
            let avg_diff = diffs.iter().sum::<f64>() / diffs.len() as f64;
            1.0 - avg_diff / MAX_RATING_SPREAD
        };

        self.similarities.insert(movie_a, movie_b, similarity);
        Ok(similarity)
    }

    /// Predict the rating `user_id` would give `movie_id`.
    ///
    /// Fails with [`EngineError::BadInput`] if the user is unknown to the
    /// rating table or the movie to the catalog, before any computation.
    pub fn predict_rating(&self, user_id: UserId, movie_id: MovieId) -> Result<f64> {
        if !self.store.has_user(user_id) {
            return Err(EngineError::BadInput { entity: "user", id: user_id });
        }
        if !self.store.has_movie(movie_id) {
            return Err(EngineError::BadInput { entity: "movie", id: movie_id });
        }

        // Exact recall: the user already rated this movie
        if let Some(rating) = self.store.rating(user_id, movie_id) {
            return Ok(rating);
        }

        let rated = self
            .store
            .ratings_of(user_id)
            .map_err(|_| EngineError::BadInput { entity: "user", id: user_id })?;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (&rated_movie, &rating) in rated {
            let similarity = self.similarity(rated_movie, movie_id)?;
            numerator += rating * similarity;
            denominator += similarity;
        }

        // Exact zero only: negative and positive similarities may cancel
        // out entirely, which counts as no evidence.
        if denominator == 0.0 {
            return Ok(FALLBACK_RATING);
        }

        Ok(numerator / denominator)
    }

    /// Batch-predict over test rows, preserving input order.
    ///
    /// Rows are independent (the store is read-only and the similarity
    /// cache write is idempotent per pair), so they are evaluated in
    /// parallel. The first failing row in input order aborts the whole
    /// batch; no partial results escape.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn predict_ratings(&self, rows: &[RatingRow]) -> Result<Vec<Prediction>> {
        let results: Vec<Result<Prediction>> = rows
            .par_iter()
            .map(|row| self.predict_row(row))
            .collect();

        debug!(
            cached_pairs = self.similarities.len(),
            "batch prediction complete"
        );

        results.into_iter().collect()
    }

    fn predict_row(&self, row: &RatingRow) -> Result<Prediction> {
        let title = self
            .store
            .movie(row.movie_id)
            .ok_or(EngineError::BadInput { entity: "movie", id: row.movie_id })?
            .title
            .clone();
        let predicted = self.predict_rating(row.user_id, row.movie_id)?;

        Ok(Prediction {
            user_id: row.user_id,
            title,
            predicted,
            actual: row.rating,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::CatalogRow;

    /// Two movies, two users who rated both one point apart (so
    /// similarity(1, 2) = 1 - 1/4.5), plus a third user who rated only
    /// movie 1 and a third movie nobody rated.
    fn create_test_store() -> Arc<RatingsStore> {
        let mut store = RatingsStore::new();
        store.load_catalog(vec![
            CatalogRow {
                movie_id: 1,
                title: "A".to_string(),
            },
            CatalogRow {
                movie_id: 2,
                title: "B".to_string(),
            },
            CatalogRow {
                movie_id: 3,
                title: "C".to_string(),
            },
        ]);
        store
            .load_ratings(vec![
                RatingRow { user_id: 10, movie_id: 1, rating: 4.0 },
                RatingRow { user_id: 10, movie_id: 2, rating: 3.0 },
                RatingRow { user_id: 11, movie_id: 1, rating: 5.0 },
                RatingRow { user_id: 11, movie_id: 2, rating: 4.0 },
                RatingRow { user_id: 12, movie_id: 1, rating: 5.0 },
            ])
            .unwrap();
        Arc::new(store)
    }

    #[test]
    fn test_similarity_worked_example() {
        let predictor = RatingPredictor::new(create_test_store());

        // Co-raters {10, 11}, both one point apart: 1 - 1/4.5
        let sim = predictor.similarity(1, 2).unwrap();
        assert!((sim - (1.0 - 1.0 / 4.5)).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_is_symmetric_and_memoized() {
        let predictor = RatingPredictor::new(create_test_store());

        let forward = predictor.similarity(1, 2).unwrap();
        let backward = predictor.similarity(2, 1).unwrap();
        assert_eq!(forward, backward);

        // Both orientations hit the same cache entry
        assert_eq!(predictor.similarities.len(), 1);
        assert_eq!(predictor.similarity(1, 2).unwrap(), forward);
        assert_eq!(predictor.similarities.len(), 1);
    }

    #[test]
    fn test_similarity_with_self_is_one() {
        let predictor = RatingPredictor::new(create_test_store());
        assert_eq!(predictor.similarity(1, 1).unwrap(), 1.0);
    }

    #[test]
    fn test_similarity_without_co_raters_is_zero() {
        let predictor = RatingPredictor::new(create_test_store());
        // Nobody rated movie 3
        assert_eq!(predictor.similarity(1, 3).unwrap(), 0.0);
    }

    #[test]
    fn test_similarity_unknown_movie() {
        let predictor = RatingPredictor::new(create_test_store());
        let err = predictor.similarity(1, 99).unwrap_err();
        assert_eq!(err, EngineError::BadInput { entity: "movie", id: 99 });

        let err = predictor.similarity(99, 1).unwrap_err();
        assert_eq!(err, EngineError::BadInput { entity: "movie", id: 99 });
    }

    #[test]
    fn test_exact_recall_of_stored_rating() {
        let predictor = RatingPredictor::new(create_test_store());
        // User 10 already rated movie 2: stored value, not a weighted estimate
        assert_eq!(predictor.predict_rating(10, 2).unwrap(), 3.0);
    }

    #[test]
    fn test_prediction_from_single_rated_movie() {
        let predictor = RatingPredictor::new(create_test_store());
        // User 12 rated only movie 1 at 5.0: (5.0 * sim) / sim = 5.0
        let predicted = predictor.predict_rating(12, 2).unwrap();
        assert!((predicted - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_fallback_when_no_weighted_evidence() {
        let predictor = RatingPredictor::new(create_test_store());
        // Movie 3 has no co-raters with anything user 10 rated: all
        // similarities are zero
        assert_eq!(predictor.predict_rating(10, 3).unwrap(), 2.5);
    }

    #[test]
    fn test_predict_rating_unknown_ids() {
        let predictor = RatingPredictor::new(create_test_store());

        let err = predictor.predict_rating(999, 1).unwrap_err();
        assert_eq!(err, EngineError::BadInput { entity: "user", id: 999 });

        let err = predictor.predict_rating(10, 999).unwrap_err();
        assert_eq!(err, EngineError::BadInput { entity: "movie", id: 999 });
    }

    #[test]
    fn test_predict_ratings_preserves_order() {
        let predictor = RatingPredictor::new(create_test_store());
        let rows = vec![
            RatingRow { user_id: 12, movie_id: 2, rating: 4.5 },
            RatingRow { user_id: 10, movie_id: 2, rating: 3.0 },
        ];

        let predictions = predictor.predict_ratings(&rows).unwrap();
        assert_eq!(predictions.len(), 2);

        assert_eq!(predictions[0].user_id, 12);
        assert_eq!(predictions[0].title, "B");
        assert!((predictions[0].predicted - 5.0).abs() < 1e-12);
        assert_eq!(predictions[0].actual, 4.5);

        assert_eq!(predictions[1].user_id, 10);
        assert_eq!(predictions[1].predicted, 3.0);
    }

    #[test]
    fn test_predict_ratings_first_error_aborts() {
        let predictor = RatingPredictor::new(create_test_store());
        let rows = vec![
            RatingRow { user_id: 10, movie_id: 2, rating: 3.0 },
            RatingRow { user_id: 10, movie_id: 77, rating: 3.0 },
            RatingRow { user_id: 999, movie_id: 1, rating: 3.0 },
        ];

        // The first failing row in input order wins, even under parallel
        // evaluation
        let err = predictor.predict_ratings(&rows).unwrap_err();
        assert_eq!(err, EngineError::BadInput { entity: "movie", id: 77 });
    }
}
