//! Per-segment integral approximations.
//!
//! ## Purpose
//!
//! This module approximates the definite integral of a sampled function over
//! every segment `[x[i], x[i+1]]`.
//!
//! ## Key concepts
//!
//! * **Rectangle**: `y[i] * (x[i+1] - x[i])`, the left value held over the segment.
//! * **Trapezoid**: `(y[i] + y[i+1]) / 2 * (x[i+1] - x[i])`.
//!
//! ## Invariants
//!
//! * Output length is `len(x) - 1` (empty for fewer than two points).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{string::ToString, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::str::FromStr;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::WeaverError;

// ============================================================================
// Integral Method
// ============================================================================

/// Integral approximation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntegralMethod {
    /// Average of both segment endpoints.
    #[default]
    Trapezoid,

    /// Left segment endpoint.
    Rectangle,
}

impl FromStr for IntegralMethod {
    type Err = WeaverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trapezoid" => Ok(Self::Trapezoid),
            "rectangle" => Ok(Self::Rectangle),
            other => Err(WeaverError::InvalidIntegralMethod(other.to_string())),
        }
    }
}

// ============================================================================
// Integrals
// ============================================================================

/// Left-rectangle integral of every segment.
pub fn rectangle_integral<T: Float>(x: &[T], y: &[T]) -> Vec<T> {
    x.windows(2)
        .zip(y)
        .map(|(w, &yi)| yi * (w[1] - w[0]))
        .collect()
}

/// Trapezoid integral of every segment.
pub fn trapezoid_integral<T: Float>(x: &[T], y: &[T]) -> Vec<T> {
    let half = T::from(0.5).unwrap();
    x.windows(2)
        .zip(y.windows(2))
        .map(|(wx, wy)| (wy[0] + wy[1]) * half * (wx[1] - wx[0]))
        .collect()
}

/// Integral of every segment using `method`.
pub fn integral<T: Float>(x: &[T], y: &[T], method: IntegralMethod) -> Vec<T> {
    match method {
        IntegralMethod::Trapezoid => trapezoid_integral(x, y),
        IntegralMethod::Rectangle => rectangle_integral(x, y),
    }
}

/// Integral of every segment using a method given by name.
pub fn integral_by_name<T: Float>(x: &[T], y: &[T], method: &str) -> Result<Vec<T>, WeaverError> {
    Ok(integral(x, y, method.parse()?))
}
