//! Error types for the store crate.

use thiserror::Error;

/// Errors that can occur while loading and querying the catalog and
/// rating tables.
///
/// Load-time problems (unreadable files, malformed rows, a rating that
/// references a movie missing from the catalog) are hard errors: the
/// loader fails fast rather than silently skipping rows.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error occurred while reading a table file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Row in a table file couldn't be parsed
    ///
    /// This variant stores context about where the error occurred
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A rating row references a movie absent from the catalog.
    /// The catalog must be loaded before the rating table.
    #[error("Rating references unknown movie id {id}")]
    UnknownMovie { id: u32 },

    /// A rating lookup was made for a user not present in the rating table
    #[error("Unknown user id {id}")]
    UnknownUser { id: u32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
