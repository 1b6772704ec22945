//! # Engine Crate
//!
//! Item-based collaborative filtering over a loaded [`store::RatingsStore`]:
//! movies are similar when the users who rated both gave them close scores.
//!
//! ## Components
//!
//! ### RatingPredictor
//! - Single prediction: weighted average of the user's ratings, weighted by
//!   each rated movie's similarity to the target
//! - Exact recall when the user already rated the target
//! - Batch prediction over a test table, in input order
//!
//! ### SimilarityCache
//! - Symmetric, pair-keyed, populated on demand, at most once per
//!   unordered movie pair
//!
//! ### Correlation
//! - Pearson correlation between predicted and actual rating columns
//!
//! ## Example Usage
//!
//! ```ignore
//! use engine::{pearson, RatingPredictor};
//! use store::RatingsStore;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let store = Arc::new(RatingsStore::load_from_files(
//!     Path::new("movies.csv"),
//!     Path::new("training_ratings.csv"),
//! )?);
//!
//! let predictor = RatingPredictor::new(store);
//! let rating = predictor.predict_rating(10, 2)?;
//!
//! let test_rows = store::load_test_rows(Path::new("test_ratings.csv"))?;
//! let predictions = predictor.predict_ratings(&test_rows)?;
//!
//! let predicted: Vec<f64> = predictions.iter().map(|p| p.predicted).collect();
//! let actual: Vec<f64> = predictions.iter().map(|p| p.actual).collect();
//! println!("Correlation: {}", pearson(&predicted, &actual)?);
//! ```

// Public modules
pub mod error;
pub mod similarity;
pub mod predictor;
pub mod correlation;

// Re-export main types
pub use correlation::pearson;
pub use error::{EngineError, Result};
pub use predictor::{Prediction, RatingPredictor};
pub use similarity::SimilarityCache;
