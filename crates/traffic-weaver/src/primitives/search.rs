//! Nearest-index search over sorted arrays.
//!
//! ## Purpose
//!
//! This module locates, for every value of a sorted lookup array, the closest
//! element of a sorted array `x`. It is used to pin fixed points on two grids
//! of different resolution and to cut series by value.
//!
//! ## Design notes
//!
//! * **Co-scan**: Both arrays are sorted, so every search is a single merge-like
//!   pass in O(len(x) + len(lookup)) instead of one binary search per value.
//! * **Invalid results**: Lookups outside the range of `x` either clamp to the
//!   first/last index or are reported as `None`.
//!
//! ## Key concepts
//!
//! * **LowerOrEqual**: largest `i` with `x[i] <= v`.
//! * **HigherOrEqual**: smallest `i` with `x[i] >= v`.
//! * **Closest**: index minimizing `|x[i] - v|`, ties resolved toward the lower index.
//!
//! ## Invariants
//!
//! * Both `x` and `lookup` must be sorted in ascending order.
//! * Returned indices are non-decreasing.

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
// Search Strategy
// ============================================================================

/// Which neighbour of a lookup value to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStrategy {
    /// Closest element that is lower or equal.
    LowerOrEqual,

    /// Closest element that is higher or equal.
    HigherOrEqual,

    /// Closest element in either direction.
    #[default]
    Closest,
}

impl FromStr for SearchStrategy {
    type Err = WeaverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower" => Ok(Self::LowerOrEqual),
            "higher" => Ok(Self::HigherOrEqual),
            "closest" => Ok(Self::Closest),
            other => Err(WeaverError::InvalidSearchStrategy(other.to_string())),
        }
    }
}

// ============================================================================
// Search Functions
// ============================================================================

/// Index of the closest lower-or-equal element of `x` for each lookup value.
///
/// Values below `x[0]` yield `Some(0)` when `fill_not_valid` is set, `None` otherwise.
pub fn find_lower_or_equal_indices<T: Float>(
    x: &[T],
    lookup: &[T],
    fill_not_valid: bool,
) -> Vec<Option<usize>> {
    if x.is_empty() {
        return vec![None; lookup.len()];
    }

    let mut i = 0;
    lookup
        .iter()
        .map(|&v| {
            while i + 1 < x.len() && x[i + 1] <= v {
                i += 1;
            }
            if x[i] <= v {
                Some(i)
            } else if fill_not_valid {
                Some(0)
            } else {
                None
            }
        })
        .collect()
}

/// Index of the closest higher-or-equal element of `x` for each lookup value.
///
/// Values above `x[last]` yield `Some(last)` when `fill_not_valid` is set, `None` otherwise.
pub fn find_higher_or_equal_indices<T: Float>(
    x: &[T],
    lookup: &[T],
    fill_not_valid: bool,
) -> Vec<Option<usize>> {
    if x.is_empty() {
        return vec![None; lookup.len()];
    }

    let last = x.len() - 1;
    let mut i = 0;
    lookup
        .iter()
        .map(|&v| {
            while i < x.len() && x[i] < v {
                i += 1;
            }
            if i < x.len() {
                Some(i)
            } else if fill_not_valid {
                Some(last)
            } else {
                None
            }
        })
        .collect()
}

/// Index of the closest element of `x` for each lookup value.
///
/// Out-of-range values always resolve to the first or last index.
pub fn find_closest_indices<T: Float>(x: &[T], lookup: &[T]) -> Vec<Option<usize>> {
    if x.is_empty() {
        return vec![None; lookup.len()];
    }

    let mut i = 0;
    lookup
        .iter()
        .map(|&v| {
            while i + 1 < x.len() && x[i + 1] <= v {
                i += 1;
            }
            if i + 1 < x.len() && x[i] < v && x[i + 1] - v < v - x[i] {
                Some(i + 1)
            } else {
                Some(i)
            }
        })
        .collect()
}

/// Dispatch a nearest-index search on `strategy`.
pub fn find_closest_element_indices<T: Float>(
    x: &[T],
    lookup: &[T],
    strategy: SearchStrategy,
    fill_not_valid: bool,
) -> Vec<Option<usize>> {
    match strategy {
        SearchStrategy::LowerOrEqual => find_lower_or_equal_indices(x, lookup, fill_not_valid),
        SearchStrategy::HigherOrEqual => find_higher_or_equal_indices(x, lookup, fill_not_valid),
        SearchStrategy::Closest => find_closest_indices(x, lookup),
    }
}

/// Clamped nearest-index search returning plain indices.
pub fn find_clamped_indices<T: Float>(x: &[T], lookup: &[T], strategy: SearchStrategy) -> Vec<usize> {
    find_closest_element_indices(x, lookup, strategy, true)
        .into_iter()
        .map(|idx| idx.unwrap_or(0))
        .collect()
}

// ============================================================================
// Range Sums
// ============================================================================

/// Sum `a` over the half-open ranges between consecutive cut points.
///
/// ```text
/// sum_over_indices([1, 2, 3, 4, 5], [0, 2, 5]) = [3, 12]
/// ```
///
/// Cut points past the end of `a` are clamped; a decreasing pair sums to zero.
pub fn sum_over_indices<T: Float>(a: &[T], indices: &[usize]) -> Vec<T> {
    indices
        .windows(2)
        .map(|w| {
            let start = w[0].min(a.len());
            let end = w[1].min(a.len());
            if start >= end {
                T::zero()
            } else {
                a[start..end].iter().fold(T::zero(), |acc, &v| acc + v)
            }
        })
        .collect()
}
