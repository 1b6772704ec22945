//! Building a [`RatingsStore`] from the table files.
//!
//! The catalog and training ratings are parsed in parallel, then applied
//! in order: catalog first (it defines the movie id space), ratings second
//! (each row must reference a cataloged movie).

use crate::error::Result;
use crate::parser;
use crate::types::{RatingRow, RatingsStore};
use std::path::Path;
use tracing::info;

impl RatingsStore {
    /// Load the catalog and training rating table from two CSV files.
    ///
    /// This is the main entry point for loading data. Fails fast on the
    /// first unreadable file, malformed row, or rating row that references
    /// a movie absent from the catalog.
    pub fn load_from_files(movies_path: &Path, ratings_path: &Path) -> Result<Self> {
        // The two files are independent until the build step, so parse
        // them in parallel.
        let (catalog_rows, rating_rows) = rayon::join(
            || parser::parse_catalog(movies_path),
            || parser::parse_ratings(ratings_path),
        );
        let catalog_rows = catalog_rows?;
        let rating_rows = rating_rows?;

        let mut store = RatingsStore::new();
        store.load_catalog(catalog_rows);
        store.load_ratings(rating_rows)?;

        let (users, movies, ratings) = store.counts();
        info!(users, movies, ratings, "rating store loaded");

        Ok(store)
    }
}

/// Parse a test rating file. Same row shape as the training table; kept
/// as a free function because test rows are never inserted into the store,
/// only predicted against.
pub fn load_test_rows(path: &Path) -> Result<Vec<RatingRow>> {
    parser::parse_ratings(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::fs;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_from_files() {
        let movies = write_temp(
            "loader_movies.csv",
            "movieId,title,genres\n1,Toy Story (1995),Animation\n2,Jumanji (1995),Adventure\n",
        );
        let ratings = write_temp(
            "loader_ratings.csv",
            "userId,movieId,rating\n10,1,4.0\n10,2,3.0\n11,1,5.0\n",
        );

        let store = RatingsStore::load_from_files(&movies, &ratings).unwrap();
        let (users, movie_count, rating_count) = store.counts();

        assert_eq!(users, 2);
        assert_eq!(movie_count, 2);
        assert_eq!(rating_count, 3);
        assert!(store.movie(1).unwrap().raters.contains(&11));
    }

    #[test]
    fn test_load_from_files_rating_for_uncataloged_movie() {
        let movies = write_temp(
            "loader_movies_sparse.csv",
            "movieId,title\n1,Toy Story (1995)\n",
        );
        let ratings = write_temp(
            "loader_ratings_orphan.csv",
            "userId,movieId,rating\n10,7,4.0\n",
        );

        let err = RatingsStore::load_from_files(&movies, &ratings).unwrap_err();
        assert!(matches!(err, StoreError::UnknownMovie { id: 7 }));
    }
}
