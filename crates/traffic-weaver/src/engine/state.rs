//! Series state owned by the orchestrator.
//!
//! ## Purpose
//!
//! This module defines the plain [`TimeSeries`] value and the [`SeriesSet`]
//! that bundles the working, original and reference series of one pipeline.
//!
//! ## Design notes
//!
//! * **Cohesive state**: The three series and the scale accumulators form one
//!   value. Tracked transforms update working and reference together through
//!   [`SeriesSet::map_tracked`], so the two cannot drift apart.
//! * **All-or-nothing**: A transform is evaluated for both series before either
//!   is replaced; a failure leaves the set unchanged.
//!
//! ## Key concepts
//!
//! * **Working**: the series being transformed.
//! * **Original**: snapshot taken at construction, never modified.
//! * **Reference**: ground truth for integral matching; follows structural
//!   transforms but not reconstruction or cosmetic passes.
//!
//! ## Invariants
//!
//! * `x.len() == y.len()` for every series.
//! * Value transforms through [`SeriesSet::map_values`] keep every series
//!   finite with strictly increasing x.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::primitives::errors::WeaverError;

// ============================================================================
// Time Series
// ============================================================================

/// Ordered pair of equal-length sequences.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSeries<T> {
    /// Independent variable, strictly increasing.
    pub x: Vec<T>,

    /// Dependent variable.
    pub y: Vec<T>,
}

impl<T: Float> TimeSeries<T> {
    /// Series from owned vectors.
    pub fn new(x: Vec<T>, y: Vec<T>) -> Self {
        Self { x, y }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Samples as `(x, y)` pairs.
    pub fn to_pairs(&self) -> Vec<(T, T)> {
        self.x.iter().copied().zip(self.y.iter().copied()).collect()
    }

    /// Series from `(x, y)` pairs.
    pub fn from_pairs(pairs: &[(T, T)]) -> Self {
        let (x, y) = pairs.iter().copied().unzip();
        Self { x, y }
    }
}

impl<T: Float + Display> Display for TimeSeries<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Series:")?;
        writeln!(f, "  Data points: {}", self.len())?;
        writeln!(f)?;
        writeln!(f, "{:>12} {:>12}", "X", "Y")?;
        writeln!(f, "  {}", "-".repeat(23))?;
        for (x, y) in self.x.iter().zip(&self.y) {
            writeln!(f, "{:>12.4} {:>12.5}", x, y)?;
        }
        Ok(())
    }
}

// ============================================================================
// Series Set
// ============================================================================

/// Coordinate addressed by a value transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Sample positions.
    X,

    /// Sample values.
    Y,
}

/// Working, original and reference series with scale accumulators.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesSet<T> {
    working: TimeSeries<T>,
    original: TimeSeries<T>,
    reference: TimeSeries<T>,
    x_scale: T,
    y_scale: T,
}

impl<T: Float> SeriesSet<T> {
    /// Start a pipeline from `series`.
    pub fn new(series: TimeSeries<T>) -> Self {
        Self {
            working: series.clone(),
            original: series.clone(),
            reference: series,
            x_scale: T::one(),
            y_scale: T::one(),
        }
    }

    /// Series being transformed.
    pub fn working(&self) -> &TimeSeries<T> {
        &self.working
    }

    /// Snapshot taken at construction.
    pub fn original(&self) -> &TimeSeries<T> {
        &self.original
    }

    /// Ground truth for integral matching.
    pub fn reference(&self) -> &TimeSeries<T> {
        &self.reference
    }

    /// Product of all x scale factors applied so far.
    pub fn x_scale(&self) -> T {
        self.x_scale
    }

    /// Product of all y scale factors applied so far.
    pub fn y_scale(&self) -> T {
        self.y_scale
    }

    /// Replace the working series only.
    pub fn set_working(&mut self, series: TimeSeries<T>) {
        self.working = series;
    }

    /// Apply `f` to the working series only.
    pub fn map_working<F>(&mut self, f: F) -> Result<(), WeaverError>
    where
        F: FnOnce(&TimeSeries<T>) -> Result<TimeSeries<T>, WeaverError>,
    {
        self.working = f(&self.working)?;
        Ok(())
    }

    /// Apply `f` to the working and the reference series.
    pub fn map_tracked<F>(&mut self, f: F) -> Result<(), WeaverError>
    where
        F: Fn(&TimeSeries<T>) -> Result<TimeSeries<T>, WeaverError>,
    {
        let working = f(&self.working)?;
        let reference = f(&self.reference)?;
        self.working = working;
        self.reference = reference;
        Ok(())
    }

    /// Apply separate transforms to the working and the reference series.
    pub fn map_each<W, R>(&mut self, on_working: W, on_reference: R) -> Result<(), WeaverError>
    where
        W: FnOnce(&TimeSeries<T>) -> Result<TimeSeries<T>, WeaverError>,
        R: FnOnce(&TimeSeries<T>) -> Result<TimeSeries<T>, WeaverError>,
    {
        let working = on_working(&self.working)?;
        let reference = on_reference(&self.reference)?;
        self.working = working;
        self.reference = reference;
        Ok(())
    }

    /// Apply `f` to every value on `axis` of the working and reference series.
    ///
    /// Fails without changes when either result is not finite with strictly
    /// increasing x.
    pub fn map_values<F>(&mut self, axis: Axis, f: F) -> Result<(), WeaverError>
    where
        F: Fn(T) -> T,
    {
        self.map_tracked(|s| {
            let mut out = s.clone();
            let values = match axis {
                Axis::X => &mut out.x,
                Axis::Y => &mut out.y,
            };
            for v in values.iter_mut() {
                *v = f(*v);
            }
            Validator::validate_series(&out.x, &out.y)?;
            Ok(out)
        })
    }

    /// Multiply x of working and reference by `factor`.
    pub fn scale_x(&mut self, factor: T) -> Result<(), WeaverError> {
        self.map_values(Axis::X, |v| v * factor)?;
        self.x_scale = self.x_scale * factor;
        Ok(())
    }

    /// Multiply y of working and reference by `factor`.
    pub fn scale_y(&mut self, factor: T) -> Result<(), WeaverError> {
        self.map_values(Axis::Y, |v| v * factor)?;
        self.y_scale = self.y_scale * factor;
        Ok(())
    }

    /// Reset the working series to the original snapshot.
    pub fn restore(&mut self) {
        self.working = self.original.clone();
    }
}
