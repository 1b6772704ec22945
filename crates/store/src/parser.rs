//! Parser for the delimited table files.
//!
//! This module handles parsing the three CSV tables:
//! - movies.csv: `movieId,title,...` (extra trailing fields ignored)
//! - training_ratings.csv: `userId,movieId,rating`
//! - test_ratings.csv: `userId,movieId,rating`
//!
//! Each file carries a single header row, which is skipped. Fields are
//! comma-separated and may be quoted with `"` (titles contain commas), with
//! `""` as the escape for a literal quote inside a quoted field.

use crate::error::{Result, StoreError};
use crate::types::{CatalogRow, RatingRow};
use std::fs;
use std::path::Path;

/// Read a table file into its data lines, skipping the header row.
///
/// Returns `(line_number, line)` pairs so parse errors can point at the
/// offending line in the input file (1-based, header included).
fn read_data_lines(path: &Path) -> Result<Vec<(usize, String)>> {
    let content = fs::read_to_string(path)?;

    Ok(content
        .lines()
        .enumerate()
        .skip(1) // header row
        .map(|(idx, line)| (idx + 1, line.to_string()))
        .collect())
}

/// Split one CSV line into fields, honoring `"` quoting.
///
/// Handles the RFC-4180 subset the MovieLens exports use: fields may be
/// wrapped in double quotes, commas inside quotes are literal, and `""`
/// inside a quoted field is an escaped quote.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    // Escaped quote inside a quoted field
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

/// Parse the movie catalog file
///
/// Format: `movieId,title,...` — one movie per row, trailing fields
/// beyond the title are ignored.
pub fn parse_catalog(path: &Path) -> Result<Vec<CatalogRow>> {
    let file = path.display().to_string();
    let mut rows = Vec::new();

    for (line_no, line) in read_data_lines(path)? {
        if line.trim().is_empty() {
            continue; // Skip empty lines
        }

        let fields = split_fields(&line);
        if fields.len() < 2 {
            return Err(StoreError::ParseError {
                file,
                line: line_no,
                reason: format!("Expected at least 2 fields, found {}", fields.len()),
            });
        }

        let movie_id = fields[0].parse().map_err(|e| StoreError::ParseError {
            file: file.clone(),
            line: line_no,
            reason: format!("Invalid movieId: {}", e),
        })?;

        rows.push(CatalogRow {
            movie_id,
            title: fields[1].clone(),
        });
    }

    Ok(rows)
}

/// Parse a rating table file (training or test)
///
/// Format: `userId,movieId,rating`
pub fn parse_ratings(path: &Path) -> Result<Vec<RatingRow>> {
    let file = path.display().to_string();
    let mut rows = Vec::new();

    for (line_no, line) in read_data_lines(path)? {
        if line.trim().is_empty() {
            continue; // Skip empty lines
        }

        let fields = split_fields(&line);
        if fields.len() < 3 {
            return Err(StoreError::ParseError {
                file,
                line: line_no,
                reason: format!("Expected 3 fields, found {}", fields.len()),
            });
        }

        let user_id = fields[0].parse().map_err(|e| StoreError::ParseError {
            file: file.clone(),
            line: line_no,
            reason: format!("Invalid userId: {}", e),
        })?;
        let movie_id = fields[1].parse().map_err(|e| StoreError::ParseError {
            file: file.clone(),
            line: line_no,
            reason: format!("Invalid movieId: {}", e),
        })?;
        let rating = fields[2].parse().map_err(|e| StoreError::ParseError {
            file: file.clone(),
            line: line_no,
            reason: format!("Invalid rating: {}", e),
        })?;

        rows.push(RatingRow {
            user_id,
            movie_id,
            rating,
        });
    }

    Ok(rows)
}
