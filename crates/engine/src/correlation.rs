//! Pearson correlation between predicted and actual rating sequences.
//!
//! Pure function with no dependency on the store:
//!
//! ```text
//! r(X, Y) = Σ (x_i - x̄)(y_i - ȳ) / (√Σ (x_i - x̄)² · √Σ (y_i - ȳ)²)
//! ```

use crate::error::{EngineError, Result};

/// Computes the Pearson correlation coefficient between two equal-length
/// sequences.
///
/// Fails with [`EngineError::LengthMismatch`] when the lengths differ and
/// [`EngineError::EmptySequence`] on empty input. A constant (zero
/// variance) input makes the denominator zero and the result `NaN`, which
/// is left to the caller to interpret.
pub fn pearson(predicted: &[f64], actual: &[f64]) -> Result<f64> {
    if predicted.len() != actual.len() {
        return Err(EngineError::LengthMismatch {
            predicted: predicted.len(),
            actual: actual.len(),
        });
    }
    if predicted.is_empty() {
        return Err(EngineError::EmptySequence);
    }

    let n = predicted.len() as f64;
    let x_mean = predicted.iter().sum::<f64>() / n;
    let y_mean = actual.iter().sum::<f64>() / n;

    let covariance: f64 = predicted
        .iter()
        .zip(actual.iter())
        .map(|(&x, &y)| (x - x_mean) * (y - y_mean))
        .sum();
    let variance_x: f64 = predicted.iter().map(|&x| (x - x_mean).powi(2)).sum();
    let variance_y: f64 = actual.iter().map(|&y| (y - y_mean).powi(2)).sum();

    Ok(covariance / (variance_x.sqrt() * variance_y.sqrt()))
}
