//! Oversampling and boundary extension of sorted arrays.
//!
//! ## Purpose
//!
//! This module turns a coarse array into a fine one by inserting `num` samples
//! into every gap, and pads arrays with synthetic samples on either side.
//!
//! ## Design notes
//!
//! * **Shared boundaries**: Consecutive gaps share their endpoint, so `m` points
//!   oversampled by `num` give `(m - 1) * num + 1` points.
//! * **No-op fallback**: `num < 2` returns the input unchanged.
//! * **Allocation**: Every function allocates its output exactly once.
//!
//! ## Key concepts
//!
//! * **Linspace oversampling**: Evenly spaced values inside each gap (x-axis).
//! * **Piecewise-constant oversampling**: Each gap repeats its left value (y-axis).
//! * **Linear extension**: Continues the array with the spacing of its outer `n` samples.
//! * **Constant extension**: Repeats the first or last element.
//!
//! ## Invariants
//!
//! * The first and last input elements are kept as first and last output elements.
//! * Extension never modifies the original values.
//!
//! ## Non-goals
//!
//! * This module does not check that the input is sorted.

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
// Direction
// ============================================================================

/// Side(s) of an array to extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Prepend samples only.
    Left,

    /// Append samples only.
    Right,

    /// Prepend and append samples.
    #[default]
    Both,
}

impl Direction {
    #[inline]
    fn left(self) -> bool {
        matches!(self, Self::Left | Self::Both)
    }

    #[inline]
    fn right(self) -> bool {
        matches!(self, Self::Right | Self::Both)
    }
}

impl FromStr for Direction {
    type Err = WeaverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "both" => Ok(Self::Both),
            other => Err(WeaverError::InvalidDirection(other.to_string())),
        }
    }
}

// ============================================================================
// Oversampling
// ============================================================================

/// Insert `num` evenly spaced samples into every gap of `a`.
///
/// ```text
/// oversample_linspace([1, 2, 3], 4) = [1, 1.25, 1.5, 1.75, 2, 2.25, 2.5, 2.75, 3]
/// ```
pub fn oversample_linspace<T: Float>(a: &[T], num: usize) -> Vec<T> {
    if num < 2 || a.len() < 2 {
        return a.to_vec();
    }

    let steps = T::from(num).unwrap();
    let mut out = Vec::with_capacity((a.len() - 1) * num + 1);
    for pair in a.windows(2) {
        let start = pair[0];
        let step = (pair[1] - pair[0]) / steps;
        for j in 0..num {
            out.push(start + step * T::from(j).unwrap());
        }
    }
    out.push(a[a.len() - 1]);
    out
}

/// Insert `num` samples into every gap of `a`, each repeating the gap's left value.
pub fn oversample_piecewise_constant<T: Float>(a: &[T], num: usize) -> Vec<T> {
    if num < 2 || a.len() < 2 {
        return a.to_vec();
    }

    let mut out = Vec::with_capacity((a.len() - 1) * num + 1);
    for &value in &a[..a.len() - 1] {
        out.extend(core::iter::repeat_n(value, num));
    }
    out.push(a[a.len() - 1]);
    out
}

// ============================================================================
// Extension
// ============================================================================

/// Extend `a` with `n` linearly spaced samples on the requested side(s).
///
/// Left padding runs from `lstart` up to (excluding) `a[0]`; right padding runs
/// from (excluding) `a[last]` up to `rstop`. Missing bounds mirror the outer
/// `n`-th sample: `lstart = 2*a[0] - a[n]`, `rstop = 2*a[last] - a[last - n]`.
pub fn extend_linspace<T: Float>(
    a: &[T],
    n: usize,
    direction: Direction,
    lstart: Option<T>,
    rstop: Option<T>,
) -> Result<Vec<T>, WeaverError> {
    if a.is_empty() {
        return Err(WeaverError::EmptyInput);
    }
    if n == 0 {
        return Ok(a.to_vec());
    }
    let needs_default = (direction.left() && lstart.is_none())
        || (direction.right() && rstop.is_none());
    if needs_default && a.len() <= n {
        return Err(WeaverError::TooFewPoints {
            got: a.len(),
            min: n + 1,
        });
    }

    let last = a.len() - 1;
    let steps = T::from(n).unwrap();
    let mut out = Vec::with_capacity(a.len() + 2 * n);

    if direction.left() {
        let start = lstart.unwrap_or_else(|| a[0] + a[0] - a[n]);
        let step = (a[0] - start) / steps;
        for j in 0..n {
            out.push(start + step * T::from(j).unwrap());
        }
    }

    out.extend_from_slice(a);

    if direction.right() {
        let stop = rstop.unwrap_or_else(|| a[last] + a[last] - a[last - n]);
        let step = (stop - a[last]) / steps;
        for j in 1..=n {
            out.push(a[last] + step * T::from(j).unwrap());
        }
    }

    Ok(out)
}

/// Extend `a` with `n` copies of its first and/or last element.
pub fn extend_constant<T: Float>(a: &[T], n: usize, direction: Direction) -> Vec<T> {
    let mut out = Vec::with_capacity(a.len() + 2 * n);
    let (Some(&first), Some(&last)) = (a.first(), a.last()) else {
        return out;
    };
    if direction.left() {
        out.extend(core::iter::repeat_n(first, n));
    }
    out.extend_from_slice(a);
    if direction.right() {
        out.extend(core::iter::repeat_n(last, n));
    }
    out
}

/// Append one synthetic sample to the end of a series.
///
/// `x` continues with its last spacing. `y` repeats its first value when
/// `make_periodic` is set, otherwise its last value.
pub fn append_one_sample<T: Float>(
    x: &[T],
    y: &[T],
    make_periodic: bool,
) -> Result<(Vec<T>, Vec<T>), WeaverError> {
    if x.len() < 2 || y.is_empty() {
        return Err(WeaverError::TooFewPoints {
            got: x.len().min(y.len()),
            min: 2,
        });
    }

    let last = x.len() - 1;
    let mut new_x = x.to_vec();
    new_x.push(x[last] + x[last] - x[last - 1]);

    let mut new_y = y.to_vec();
    new_y.push(if make_periodic { y[0] } else { y[y.len() - 1] });

    Ok((new_x, new_y))
}
