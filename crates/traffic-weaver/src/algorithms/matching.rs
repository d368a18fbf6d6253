//! Integral matching against a reference series.
//!
//! ## Purpose
//!
//! After reconstruction or any cosmetic pass, the integral of the fine series
//! between two fixed points generally differs from the integral of the
//! reference series over the same span. This module stretches the fine series
//! so that both integrals agree while the fixed points stay in place.
//!
//! ## Design notes
//!
//! * **Fixed points**: By default every reference x is a fixed point. Each is
//!   located on both grids with a nearest-index search.
//! * **Tent stretch**: The integral difference of a segment is spread over its
//!   interior samples with a tent-shaped weight that vanishes at the fixed
//!   points and peaks halfway between them.
//! * **Linearity**: Both integral rules are linear in y, so one additive
//!   correction per segment matches the integral exactly.
//!
//! ## Invariants
//!
//! * Samples at fixed points are never modified.
//! * Segments without interior samples are left untouched.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use tracing::{debug, trace};

// Internal dependencies
use crate::math::integral::{IntegralMethod, integral};
use crate::primitives::errors::WeaverError;
use crate::primitives::search::{SearchStrategy, find_clamped_indices, sum_over_indices};

// ============================================================================
// Configuration
// ============================================================================

/// Parameters of integral matching.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntegralMatching<T> {
    /// Rule used to integrate the series being stretched (default: trapezoid).
    pub target_method: IntegralMethod,

    /// Rule used to integrate the reference series (default: rectangle).
    pub reference_method: IntegralMethod,

    /// Fixed points in x; defaults to the reference x-values.
    pub fixed_points: Option<Vec<T>>,

    /// How fixed points are located on both grids (default: closest).
    pub fixed_points_strategy: SearchStrategy,
}

impl<T> Default for IntegralMatching<T> {
    fn default() -> Self {
        Self {
            target_method: IntegralMethod::Trapezoid,
            reference_method: IntegralMethod::Rectangle,
            fixed_points: None,
            fixed_points_strategy: SearchStrategy::Closest,
        }
    }
}

impl<T> IntegralMatching<T> {
    /// Matching with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the integral rule of the stretched series.
    pub fn target_method(mut self, method: IntegralMethod) -> Self {
        self.target_method = method;
        self
    }

    /// Set the integral rule of the reference series.
    pub fn reference_method(mut self, method: IntegralMethod) -> Self {
        self.reference_method = method;
        self
    }

    /// Set explicit fixed points.
    pub fn fixed_points(mut self, points: Vec<T>) -> Self {
        self.fixed_points = Some(points);
        self
    }

    /// Set the fixed-point search strategy.
    pub fn fixed_points_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.fixed_points_strategy = strategy;
        self
    }
}

// ============================================================================
// Matching
// ============================================================================

/// Stretch `y` so that its integral between consecutive fixed points equals
/// the integral of `(x_ref, y_ref)` between the same points.
pub fn integral_matching_reference_stretch<T: Float>(
    x: &[T],
    y: &[T],
    x_ref: &[T],
    y_ref: &[T],
    config: &IntegralMatching<T>,
) -> Result<Vec<T>, WeaverError> {
    if x.len() != y.len() {
        return Err(WeaverError::MismatchedInputs {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x_ref.len() != y_ref.len() {
        return Err(WeaverError::MismatchedInputs {
            x_len: x_ref.len(),
            y_len: y_ref.len(),
        });
    }

    let fixed = config.fixed_points.as_deref().unwrap_or(x_ref);
    if fixed.len() < 2 || x.len() < 2 || x_ref.len() < 2 {
        return Ok(y.to_vec());
    }

    let target_idx = find_clamped_indices(x, fixed, config.fixed_points_strategy);
    let reference_idx = find_clamped_indices(x_ref, fixed, config.fixed_points_strategy);

    let target_integrals = sum_over_indices(&integral(x, y, config.target_method), &target_idx);
    let reference_integrals = sum_over_indices(
        &integral(x_ref, y_ref, config.reference_method),
        &reference_idx,
    );

    let mut out = y.to_vec();
    let mut matched = 0usize;
    for (j, pair) in target_idx.windows(2).enumerate() {
        let (l, r) = (pair[0], pair[1]);
        if r <= l + 1 {
            trace!(segment = j, "no interior samples; skipping");
            continue;
        }

        let delta = reference_integrals[j] - target_integrals[j];
        if delta == T::zero() {
            matched += 1;
            continue;
        }

        let weights = tent(&x[l..=r]);
        let weight_integral = integral(&x[l..=r], &weights, config.target_method)
            .into_iter()
            .fold(T::zero(), |acc, v| acc + v);
        if weight_integral == T::zero() {
            trace!(segment = j, "degenerate stretch weight; skipping");
            continue;
        }

        let height = delta / weight_integral;
        for (yi, &wi) in out[l..=r].iter_mut().zip(&weights) {
            *yi = *yi + height * wi;
        }
        matched += 1;
    }

    debug!(
        segments = target_idx.len() - 1,
        matched, "integral matching finished"
    );
    Ok(out)
}

/// Tent weights over `x`: zero at both ends, one halfway.
fn tent<T: Float>(x: &[T]) -> Vec<T> {
    let first = x[0];
    let span = x[x.len() - 1] - first;
    let two = T::from(2.0).unwrap();
    x.iter()
        .map(|&xi| {
            let t = (xi - first) / span;
            T::one() - (two * t - T::one()).abs()
        })
        .collect()
}
