//! Transition windows shared by the window-based reconstruction strategies.
//!
//! ## Purpose
//!
//! Window-based strategies hold the average value `y_k` flat in the middle of
//! interval `k` and blend toward the neighbouring averages inside a transition
//! window at each end. This module owns the padded working buffers, the window
//! sizing rules, and the per-interval fill routines.
//!
//! ## Design notes
//!
//! * **Padded workspace**: x is padded linearly, y and the output z by
//!   repetition, each by one interval per side. Interval `k` of the padded
//!   buffers reads only `y[k-1, 0]`, `y[k, 0]` and `y[k+1, 0]` and writes only
//!   `z[k, *]`.
//! * **Transition values**: The value on the boundary shared by intervals `k-1`
//!   and `k` lies on the line joining the end of the plateau of `k-1` with the
//!   start of the plateau of `k`.
//!
//! ## Key concepts
//!
//! * **Window size**: `a = floor(alpha * n)` unless given, at least 2.
//! * **Fixed windows**: `a / 2` samples on each side.
//! * **Adaptive windows**: split of `a` driven by the ratio of the jumps on the
//!   right and left side of the interval.
//!
//! ## Invariants
//!
//! * Every window is at most `n` samples wide.
//! * Padding intervals use one-sample windows.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::Range;
use num_traits::Float;

// Internal dependencies
use crate::math::funfit::{exp_lin_fit, lin_exp_xy_fit, lin_fit};
use crate::primitives::errors::WeaverError;
use crate::primitives::interval::IntervalArray;

// ============================================================================
// Windows
// ============================================================================

/// Left and right transition window of one interval, in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Samples blending in from the previous interval.
    pub left: usize,

    /// Samples blending out toward the next interval.
    pub right: usize,
}

impl Window {
    /// Window with `left` and `right` samples.
    pub const fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// Linear sub-windows taking a `beta` fraction of each side.
    pub fn linear_part<T: Float>(self, beta: T) -> Self {
        Self {
            left: fraction_of(beta, self.left),
            right: fraction_of(beta, self.right),
        }
    }
}

/// `floor(fraction * samples)`, zero for negative or non-finite products.
pub fn fraction_of<T: Float>(fraction: T, samples: usize) -> usize {
    (fraction * T::from(samples).unwrap())
        .floor()
        .to_usize()
        .unwrap_or(0)
}

/// Total transition window `a`, derived from `alpha * n` when not given.
pub fn window_size<T: Float>(alpha: T, a: Option<usize>, n: usize) -> usize {
    a.unwrap_or_else(|| fraction_of(alpha, n)).max(2)
}

/// Fixed windows of `a / 2` samples on each side.
pub fn fixed_window(a: usize, n: usize) -> Result<Window, WeaverError> {
    let half = a / 2;
    if half > n {
        return Err(WeaverError::InvalidTransitionWindow { window: a, n });
    }
    Ok(Window::new(half, half))
}

/// Adaptive windows for every interval of the padded buffer `y`.
///
/// With `nom = |y[k+1] - y[k]|` and `denom = |y[k] - y[k-1]|`:
///
/// ```text
/// nom = 0, denom = 0   (0, 0)
/// nom = 0              (a/2, 0)
/// denom = 0            (0, a/2)
/// otherwise            gamma = (nom / denom)^adaptive_smooth
///                      left  = floor(clamp(gamma * a / (1 + gamma), 1, a))
///                      right = floor(clamp(a / (1 + gamma), 1, a))
/// ```
pub fn adaptive_windows<T: Float>(
    y: &IntervalArray<T>,
    a: usize,
    adaptive_smooth: T,
    n: usize,
) -> Result<Vec<Window>, WeaverError> {
    if a > n {
        return Err(WeaverError::InvalidTransitionWindow { window: a, n });
    }

    let total = y.nr_of_full_intervals();
    let a_t = T::from(a).unwrap();
    let mut windows = Vec::with_capacity(total);
    windows.push(Window::new(1, 1));
    for k in 1..total - 1 {
        let nom = (y[(k + 1, 0)] - y[(k, 0)]).abs();
        let denom = (y[(k, 0)] - y[(k - 1, 0)]).abs();
        let window = if nom == T::zero() && denom == T::zero() {
            Window::new(0, 0)
        } else if nom == T::zero() {
            Window::new(a / 2, 0)
        } else if denom == T::zero() {
            Window::new(0, a / 2)
        } else {
            let gamma = (nom / denom).powf(adaptive_smooth);
            let left = (gamma * a_t / (T::one() + gamma)).max(T::one()).min(a_t);
            let right = (a_t / (T::one() + gamma)).max(T::one()).min(a_t);
            Window::new(
                left.floor().to_usize().unwrap_or(1),
                right.floor().to_usize().unwrap_or(1),
            )
        };
        windows.push(window);
    }
    windows.push(Window::new(1, 1));
    Ok(windows)
}

// ============================================================================
// Padded Workspace
// ============================================================================

/// Padded x, y and output buffers of one reconstruction.
pub struct Workspace<T> {
    /// Oversampled x, padded linearly.
    pub x: IntervalArray<T>,

    /// Oversampled averages, padded by repetition.
    pub y: IntervalArray<T>,

    /// Output buffer, initialised from `y`.
    pub z: IntervalArray<T>,
}

impl<T: Float> Workspace<T> {
    /// Pad the oversampled arrays by one interval on each side.
    pub fn new(xs: &[T], ys: &[T], n: usize) -> Result<Self, WeaverError> {
        let x = IntervalArray::extended_linspace(xs, n)?;
        let y = IntervalArray::extended_constant(ys, n)?;
        let z = y.clone();
        Ok(Self { x, y, z })
    }

    /// Intervals of the unpadded data.
    pub fn intervals(&self) -> Range<usize> {
        1..self.x.nr_of_full_intervals() - 1
    }

    /// Transition values at the start and end of interval `k`.
    ///
    /// `prev` and `next` are the windows of the neighbouring intervals.
    pub fn transition_values(&self, k: usize, prev: Window, cur: Window, next: Window) -> (T, T) {
        let (x, y) = (&self.x, &self.y);
        let n = x.n();
        let y0 = y[(k, 0)];

        let z0 = if prev.right == 0 && cur.left == 0 {
            y[(k - 1, 0)]
        } else {
            lin_fit(
                x[(k, 0)],
                (x.before(k, prev.right), y[(k - 1, 0)]),
                (x[(k, cur.left)], y0),
            )
        };
        let z1 = if cur.right == 0 && next.left == 0 {
            y[(k + 1, 0)]
        } else {
            lin_fit(
                x[(k + 1, 0)],
                (x[(k, n - cur.right)], y0),
                (x[(k + 1, next.left)], y[(k + 1, 0)]),
            )
        };
        (z0, z1)
    }

    /// Linear ramps from `z0` up to the plateau and from the plateau to `z1`.
    pub fn fill_linear(&mut self, k: usize, w: Window, z0: T, z1: T) {
        let x = &self.x;
        let n = x.n();
        let y0 = self.y[(k, 0)];

        for i in 0..w.left {
            self.z[(k, i)] = lin_fit(x[(k, i)], (x[(k, 0)], z0), (x[(k, w.left)], y0));
        }
        for i in n - w.right + 1..=n {
            self.z[(k, i)] = lin_fit(x[(k, i)], (x[(k, n - w.right)], y0), (x[(k, n)], z1));
        }
    }

    /// Linear ramps of `b` samples next to the boundaries, blended into the
    /// plateau by exponential curves of shape `exp`.
    pub fn fill_exponential(&mut self, k: usize, w: Window, b: Window, z0: T, z1: T, exp: T) {
        let x = &self.x;
        let n = x.n();
        let y0 = self.y[(k, 0)];

        let z_left = if b.left == 0 {
            z0
        } else {
            lin_fit(x[(k, b.left)], (x[(k, 0)], z0), (x[(k, w.left)], y0))
        };
        let z_right = if b.right == 0 {
            z1
        } else {
            lin_fit(
                x[(k, n - b.right)],
                (x[(k, n - w.right)], y0),
                (x[(k + 1, 0)], z1),
            )
        };

        for i in 0..b.left {
            self.z[(k, i)] = lin_fit(x[(k, i)], (x[(k, 0)], z0), (x[(k, b.left)], z_left));
        }
        for i in b.left..w.left {
            self.z[(k, i)] = lin_exp_xy_fit(
                x[(k, i)],
                (x[(k, b.left)], z_left),
                (x[(k, w.left)], y0),
                exp,
            );
        }
        for i in n - w.right..n - b.right {
            self.z[(k, i)] = exp_lin_fit(
                x[(k, i)],
                (x[(k, n - w.right)], y0),
                (x[(k, n - b.right)], z_right),
                exp,
            );
        }
        for i in n - b.right..n {
            self.z[(k, i)] = lin_fit(x[(k, i)], (x[(k, n - b.right)], z_right), (x[(k, n)], z1));
        }
    }

    /// Drop the padding and return the reconstructed `(x, y)`.
    pub fn finish(self) -> (Vec<T>, Vec<T>) {
        (self.x.into_inner(), self.z.into_inner())
    }
}
