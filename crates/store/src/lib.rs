//! # Store Crate
//!
//! This crate owns the movie catalog and the user rating table, loaded once
//! from CSV and read-only for the rest of the session.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, RatingsStore, row types)
//! - **parser**: Parse the CSV tables into row structs
//! - **loader**: Build a RatingsStore from the table files
//! - **error**: Error types for loading and lookups
//!
//! ## Example Usage
//!
//! ```ignore
//! use store::RatingsStore;
//! use std::path::Path;
//!
//! // Load the catalog and training ratings
//! let store = RatingsStore::load_from_files(
//!     Path::new("movies.csv"),
//!     Path::new("training_ratings.csv"),
//! )?;
//!
//! // Query data
//! let movie = store.movie(1).unwrap();
//! let ratings = store.ratings_of(10)?;
//!
//! println!("{} has {} raters", movie.title, movie.raters.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod loader;

// Re-export commonly used types for convenience
pub use error::{Result, StoreError};
pub use loader::load_test_rows;
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    Movie,
    RatingsStore,
    // Row types
    CatalogRow,
    RatingRow,
};
