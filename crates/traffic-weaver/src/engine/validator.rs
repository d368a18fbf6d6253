//! Input validation for series and orchestrator operations.
//!
//! ## Purpose
//!
//! This module checks input series and the arguments of orchestrator
//! operations before any data is transformed.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * Validation is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or repair input data.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::WeaverError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for series and operation arguments.
///
/// All methods return `Result<(), WeaverError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Series Validation
    // ========================================================================

    /// Validate a series: non-empty, equal lengths, finite, strictly increasing x.
    pub fn validate_series<T: Float>(x: &[T], y: &[T]) -> Result<(), WeaverError> {
        // Check 1: Matching lengths
        if x.len() != y.len() {
            return Err(WeaverError::MismatchedInputs {
                x_len: x.len(),
                y_len: y.len(),
            });
        }

        // Check 2: Non-empty arrays
        if x.is_empty() {
            return Err(WeaverError::EmptyInput);
        }

        // Check 3: All values finite
        for (i, (&xi, &yi)) in x.iter().zip(y).enumerate() {
            if !xi.is_finite() {
                return Err(WeaverError::InvalidNumericValue(format!(
                    "x[{}]={}",
                    i,
                    xi.to_f64().unwrap_or(f64::NAN)
                )));
            }
            if !yi.is_finite() {
                return Err(WeaverError::InvalidNumericValue(format!(
                    "y[{}]={}",
                    i,
                    yi.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        // Check 4: Strictly increasing x
        if let Some(i) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(WeaverError::InvalidInput(format!(
                "x must be strictly increasing (x[{}] >= x[{}])",
                i,
                i + 1
            )));
        }

        Ok(())
    }

    /// Validate that a series holds at least `min` points.
    pub fn validate_min_points(len: usize, min: usize) -> Result<(), WeaverError> {
        if len < min {
            return Err(WeaverError::TooFewPoints { got: len, min });
        }
        Ok(())
    }

    /// Validate a single numeric value for finiteness.
    pub fn validate_scalar<T: Float>(val: T, name: &str) -> Result<(), WeaverError> {
        if !val.is_finite() {
            return Err(WeaverError::InvalidNumericValue(format!(
                "{}={}",
                name,
                val.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate a single numeric value as finite and strictly positive.
    pub fn validate_positive<T: Float>(val: T, name: &str) -> Result<(), WeaverError> {
        Self::validate_scalar(val, name)?;
        if val <= T::zero() {
            return Err(WeaverError::InvalidInput(format!(
                "{} must be positive, got {}",
                name,
                val.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Operation Validation
    // ========================================================================

    /// Validate the oversampling factor of a reconstruction.
    pub fn validate_oversampling(n: usize) -> Result<(), WeaverError> {
        if n < 2 {
            return Err(WeaverError::InvalidOversampling(n));
        }
        Ok(())
    }

    /// Validate a non-empty index range `start..end` within `len`.
    pub fn validate_index_range(start: usize, end: usize, len: usize) -> Result<(), WeaverError> {
        if start >= end || end > len {
            return Err(WeaverError::IndexOutOfBounds { start, end, len });
        }
        Ok(())
    }

    /// Validate that `new_x` spans exactly the range of `x`.
    ///
    /// Endpoints are compared with a tolerance relative to the span of `x`.
    pub fn validate_same_range<T: Float>(x: &[T], new_x: &[T]) -> Result<(), WeaverError> {
        let (Some(&first), Some(&last)) = (x.first(), x.last()) else {
            return Err(WeaverError::EmptyInput);
        };
        let (Some(&new_first), Some(&new_last)) = (new_x.first(), new_x.last()) else {
            return Err(WeaverError::EmptyInput);
        };

        let tol = (last - first).abs() * T::from(1e-9).unwrap();
        if (new_first - first).abs() > tol || (new_last - last).abs() > tol {
            return Err(WeaverError::RangeMismatch {
                requested_min: new_first.to_f64().unwrap_or(f64::NAN),
                requested_max: new_last.to_f64().unwrap_or(f64::NAN),
                available_min: first.to_f64().unwrap_or(f64::NAN),
                available_max: last.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }
}
