//! Input abstractions for series construction.
//!
//! ## Purpose
//!
//! This module lets the orchestrator accept slices, vectors, arrays and (with
//! the `ndarray` feature) one-dimensional ndarray views through one trait.
//!
//! ## Design notes
//!
//! * **Zero-copy views**: Every input exposes a contiguous slice; the
//!   orchestrator copies it once into its own state.
//! * **Fail-fast**: Non-contiguous ndarray inputs are rejected.
//!
//! ## Invariants
//!
//! * Returned slices represent all elements in the input container.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(all(feature = "ndarray", not(feature = "std")))]
use alloc::string::ToString;

// External dependencies
#[cfg(feature = "ndarray")]
use ndarray::{ArrayBase, Data, Ix1};
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::WeaverError;

/// Types that can provide series values as a contiguous slice.
pub trait SeriesInput<T: Float> {
    /// View the input as a contiguous slice.
    fn as_series_slice(&self) -> Result<&[T], WeaverError>;
}

impl<T: Float> SeriesInput<T> for [T] {
    fn as_series_slice(&self) -> Result<&[T], WeaverError> {
        Ok(self)
    }
}

impl<T: Float> SeriesInput<T> for Vec<T> {
    fn as_series_slice(&self) -> Result<&[T], WeaverError> {
        Ok(self.as_slice())
    }
}

impl<T: Float, const N: usize> SeriesInput<T> for [T; N] {
    fn as_series_slice(&self) -> Result<&[T], WeaverError> {
        Ok(self.as_slice())
    }
}

#[cfg(feature = "ndarray")]
impl<T: Float, S> SeriesInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_series_slice(&self) -> Result<&[T], WeaverError> {
        self.as_slice().ok_or_else(|| {
            WeaverError::InvalidInput("ndarray input must be contiguous in memory".to_string())
        })
    }
}
