//! Natural cubic splines.
//!
//! ## Purpose
//!
//! This module interpolates sampled data with a natural cubic spline. It backs
//! cubic-spline reconstruction and cubic interpolation onto a new grid.
//!
//! ## Design notes
//!
//! * **Second derivatives**: The interior second derivatives solve a
//!   symmetric tridiagonal system, factorized in O(n).
//! * **Extrapolation**: Outside the knot range the spline continues linearly.
//!
//! ## Invariants
//!
//! * Knots are strictly increasing.
//! * Second derivatives vanish at both end knots.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::WeaverError;

// ============================================================================
// Cubic Spline
// ============================================================================

/// Natural cubic spline defined by knot values and second derivatives.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline<T> {
    knots: Vec<T>,
    values: Vec<T>,
    second: Vec<T>,
}

impl<T: Float> CubicSpline<T> {
    /// Natural cubic spline through all points.
    pub fn natural(x: &[T], y: &[T]) -> Result<Self, WeaverError> {
        validate_knots(x, y)?;

        let n = x.len();
        if n < 3 {
            return Ok(Self {
                knots: x.to_vec(),
                values: y.to_vec(),
                second: vec![T::zero(); n],
            });
        }

        let three = T::from(3.0).unwrap();
        let six = T::from(6.0).unwrap();
        let h: Vec<T> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let slope: Vec<T> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

        let diag: Vec<T> = (0..n - 2).map(|j| (h[j] + h[j + 1]) / three).collect();
        let off: Vec<T> = (0..n - 3).map(|j| h[j + 1] / six).collect();
        let rhs: Vec<T> = (0..n - 2).map(|j| slope[j + 1] - slope[j]).collect();

        let mut second = Vec::with_capacity(n);
        second.push(T::zero());
        second.extend(solve_tridiagonal(&diag, &off, &rhs));
        second.push(T::zero());

        Ok(Self {
            knots: x.to_vec(),
            values: y.to_vec(),
            second,
        })
    }

    /// Knot positions.
    pub fn knots(&self) -> &[T] {
        &self.knots
    }

    /// Spline values at the knots.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Evaluate the spline at `x`.
    pub fn eval(&self, x: T) -> T {
        let k = &self.knots;
        let g = &self.values;
        let last = k.len() - 1;
        if last == 0 || x.is_nan() {
            return if x.is_nan() { x } else { g[0] };
        }

        let six = T::from(6.0).unwrap();
        if x < k[0] {
            let h = k[1] - k[0];
            let slope = (g[1] - g[0]) / h - h * self.second[1] / six;
            return g[0] + slope * (x - k[0]);
        }
        if x > k[last] {
            let h = k[last] - k[last - 1];
            let slope = (g[last] - g[last - 1]) / h + h * self.second[last - 1] / six;
            return g[last] + slope * (x - k[last]);
        }

        // Locate the segment containing x.
        let i = match k.binary_search_by(|knot| {
            knot
                .partial_cmp(&x)
                .unwrap_or(core::cmp::Ordering::Less)
        }) {
            Ok(i) => return g[i],
            Err(i) => i - 1,
        };

        let h = k[i + 1] - k[i];
        let dl = x - k[i];
        let dr = k[i + 1] - x;
        (dl * g[i + 1] + dr * g[i]) / h
            - dl * dr / six
                * ((T::one() + dl / h) * self.second[i + 1] + (T::one() + dr / h) * self.second[i])
    }

    /// Evaluate the spline at every value of `x`.
    pub fn eval_many(&self, x: &[T]) -> Vec<T> {
        x.iter().map(|&xi| self.eval(xi)).collect()
    }
}

/// Natural cubic spline through all points.
pub fn natural_cubic_spline<T: Float>(x: &[T], y: &[T]) -> Result<CubicSpline<T>, WeaverError> {
    CubicSpline::natural(x, y)
}

// ============================================================================
// Helpers
// ============================================================================

/// Solve a symmetric positive definite tridiagonal system by Cholesky.
fn solve_tridiagonal<T: Float>(diag: &[T], off: &[T], rhs: &[T]) -> Vec<T> {
    let m = diag.len();
    let mut l0 = vec![T::zero(); m];
    let mut l1 = vec![T::zero(); m];

    for i in 0..m {
        if i >= 1 {
            l1[i] = off[i - 1] / l0[i - 1];
        }
        l0[i] = (diag[i] - l1[i] * l1[i]).max(T::min_positive_value()).sqrt();
    }

    let mut z = vec![T::zero(); m];
    for i in 0..m {
        let carried = if i >= 1 { l1[i] * z[i - 1] } else { T::zero() };
        z[i] = (rhs[i] - carried) / l0[i];
    }

    let mut out = vec![T::zero(); m];
    for i in (0..m).rev() {
        let carried = if i + 1 < m { l1[i + 1] * out[i + 1] } else { T::zero() };
        out[i] = (z[i] - carried) / l0[i];
    }
    out
}

fn validate_knots<T: Float>(x: &[T], y: &[T]) -> Result<(), WeaverError> {
    if x.is_empty() {
        return Err(WeaverError::EmptyInput);
    }
    if x.len() != y.len() {
        return Err(WeaverError::MismatchedInputs {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(WeaverError::TooFewPoints { got: x.len(), min: 2 });
    }
    if x.windows(2).any(|w| w[1] <= w[0]) {
        return Err(WeaverError::InvalidInput(
            "spline knots must be strictly increasing".into(),
        ));
    }
    Ok(())
}
