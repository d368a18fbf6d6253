//! Two-point fitting functions used as transition curves.
//!
//! ## Purpose
//!
//! Every function maps a query `x` and two boundary points `(x0, y0)` and
//! `(x1, y1)` onto a value of a curve passing through both points.
//!
//! ## Key concepts
//!
//! With `t = (x - x0) / (x1 - x0)`:
//!
//! ```text
//! lin_fit         y0 + (y1 - y0) * t
//! exp_fit         y0 + (y1 - y0) * t^alpha             flat at x0
//! exp_xy_fit      y1 + (y0 - y1) * (1 - t)^alpha       flat at x1
//! exp_lin_fit     (1 - t) * exp_fit + t * lin_fit
//! lin_exp_xy_fit  (1 - t) * lin_fit + t * exp_xy_fit
//! ```
//!
//! ## Invariants
//!
//! * For `t` in `[0, 1]` and `alpha >= 1` the result lies between `y0` and `y1`.
//! * `x1 != x0`; equal abscissae are a caller error and are only checked in
//!   debug builds.

// External dependencies
use num_traits::Float;

/// A boundary point `(x, y)`.
pub type Point<T> = (T, T);

#[inline]
fn unit<T: Float>(x: T, x0: T, x1: T) -> T {
    debug_assert!(x1 != x0, "fitting points must have distinct x");
    (x - x0) / (x1 - x0)
}

/// Straight line through both points.
#[inline]
pub fn lin_fit<T: Float>(x: T, (x0, y0): Point<T>, (x1, y1): Point<T>) -> T {
    y0 + (y1 - y0) * unit(x, x0, x1)
}

/// Power curve leaving `(x0, y0)` flat and reaching `(x1, y1)`.
///
/// `alpha = 1` is the straight line.
#[inline]
pub fn exp_fit<T: Float>(x: T, (x0, y0): Point<T>, (x1, y1): Point<T>, alpha: T) -> T {
    y0 + (y1 - y0) * unit(x, x0, x1).powf(alpha)
}

/// [`exp_fit`] mirrored so that the curve leaves `(x0, y0)` steeply and
/// arrives flat at `(x1, y1)`.
#[inline]
pub fn exp_xy_fit<T: Float>(x: T, (x0, y0): Point<T>, (x1, y1): Point<T>, alpha: T) -> T {
    y1 + (y0 - y1) * (T::one() - unit(x, x0, x1)).powf(alpha)
}

/// Blend moving from [`exp_fit`] at `x0` to [`lin_fit`] at `x1`.
#[inline]
pub fn exp_lin_fit<T: Float>(x: T, p0: Point<T>, p1: Point<T>, alpha: T) -> T {
    let t = unit(x, p0.0, p1.0);
    (T::one() - t) * exp_fit(x, p0, p1, alpha) + t * lin_fit(x, p0, p1)
}

/// Blend moving from [`lin_fit`] at `x0` to [`exp_xy_fit`] at `x1`.
#[inline]
pub fn lin_exp_xy_fit<T: Float>(x: T, p0: Point<T>, p1: Point<T>, alpha: T) -> T {
    let t = unit(x, p0.0, p1.0);
    (T::one() - t) * lin_fit(x, p0, p1) + t * exp_xy_fit(x, p0, p1, alpha)
}
