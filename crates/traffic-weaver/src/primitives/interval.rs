//! Interval-indexed view over an oversampled array.
//!
//! ## Purpose
//!
//! Oversampled arrays are naturally addressed by `(interval, offset)`: offset
//! `0` is the left original sample of an interval and offset `n` is the right
//! one, shared with the next interval. This module provides that addressing
//! over one flat buffer.
//!
//! ## Design notes
//!
//! * **Padding once**: A padded array is allocated as `[n pad | data | n pad]`
//!   in a single step and never regrown. Padding adds one synthetic interval on
//!   each side so that boundary intervals can read their neighbours.
//! * **Index arithmetic**: `value_at(k, i)` reads `buffer[k * n + i]`. Reads
//!   left of an interval start go through [`IntervalArray::before`].
//!
//! ## Key concepts
//!
//! * **Constant padding**: Repeats the first/last value (used for y).
//! * **Linear padding**: Continues the outer spacing (used for x).
//!
//! ## Invariants
//!
//! * `n >= 1`.
//! * Interval `k` covers buffer positions `k * n ..= (k + 1) * n`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::{Index, IndexMut};
use num_traits::Float;

// Internal dependencies
use crate::primitives::arrays::{Direction, extend_constant, extend_linspace};
use crate::primitives::errors::WeaverError;

// ============================================================================
// Interval Array
// ============================================================================

/// Flat buffer addressed by `(interval, offset)`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalArray<T> {
    buffer: Vec<T>,
    n: usize,
    padded: bool,
}

impl<T: Float> IntervalArray<T> {
    /// Wrap an oversampled array without padding.
    pub fn new(array: Vec<T>, n: usize) -> Result<Self, WeaverError> {
        if n == 0 {
            return Err(WeaverError::InvalidOversampling(n));
        }
        Ok(Self {
            buffer: array,
            n,
            padded: false,
        })
    }

    /// Pad an oversampled array by one interval of repeated boundary values.
    pub fn extended_constant(array: &[T], n: usize) -> Result<Self, WeaverError> {
        if n == 0 {
            return Err(WeaverError::InvalidOversampling(n));
        }
        if array.is_empty() {
            return Err(WeaverError::EmptyInput);
        }
        Ok(Self {
            buffer: extend_constant(array, n, Direction::Both),
            n,
            padded: true,
        })
    }

    /// Pad an oversampled array by one interval of linearly continued values.
    pub fn extended_linspace(array: &[T], n: usize) -> Result<Self, WeaverError> {
        if n == 0 {
            return Err(WeaverError::InvalidOversampling(n));
        }
        Ok(Self {
            buffer: extend_linspace(array, n, Direction::Both, None, None)?,
            n,
            padded: true,
        })
    }

    /// Number of samples per interval.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total buffer length, including padding.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of intervals whose both ends lie inside the buffer.
    #[inline]
    pub fn nr_of_full_intervals(&self) -> usize {
        self.buffer.len().saturating_sub(1) / self.n
    }

    /// Value at `offset` samples into interval `k`.
    #[inline]
    pub fn value_at(&self, k: usize, offset: usize) -> T {
        self.buffer[k * self.n + offset]
    }

    /// Value `back` samples to the left of the start of interval `k`.
    #[inline]
    pub fn before(&self, k: usize, back: usize) -> T {
        self.buffer[k * self.n - back]
    }

    /// Samples of interval `k`, both boundaries included.
    pub fn interval(&self, k: usize) -> &[T] {
        let start = k * self.n;
        let end = (start + self.n + 1).min(self.buffer.len());
        &self.buffer[start..end]
    }

    /// Whole buffer, including padding.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buffer
    }

    /// Consume the view and return the data without padding.
    pub fn into_inner(self) -> Vec<T> {
        if !self.padded {
            return self.buffer;
        }
        let n = self.n;
        let end = self.buffer.len() - n;
        let mut buffer = self.buffer;
        buffer.truncate(end);
        buffer.drain(..n);
        buffer
    }
}

impl<T> Index<(usize, usize)> for IntervalArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, (k, offset): (usize, usize)) -> &T {
        &self.buffer[k * self.n + offset]
    }
}

impl<T> IndexMut<(usize, usize)> for IntervalArray<T> {
    #[inline]
    fn index_mut(&mut self, (k, offset): (usize, usize)) -> &mut T {
        &mut self.buffer[k * self.n + offset]
    }
}
