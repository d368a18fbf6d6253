//! High-level API for time-series reconstruction.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point, [`Weaver`]. It
//! chains reconstruction, integral matching and the cosmetic and structural
//! passes over one series.
//!
//! ## Design notes
//!
//! * **Chaining**: Every transform returns `&mut Self` (or a `Result` of it),
//!   so pipelines read as one expression joined with `?`.
//! * **Tracked transforms**: Structural transforms (repeat, truncate, shift,
//!   scale, normalize, append) update working and reference series together.
//! * **Untracked transforms**: Reconstruction, integral matching, noise,
//!   trend, smoothing and interpolation touch the working series only.
//! * **Valid after every pass**: Passes that would produce non-finite values
//!   or non-increasing x fail and leave the pipeline unchanged.
//!
//! ## Key concepts
//!
//! * **Reference series**: ground truth for [`Weaver::integral_match`].
//! * **Original series**: snapshot restored by [`Weaver::restore_original`].
//!
//! ### Typical Flow
//!
//! 1. Create a [`Weaver`] from `(x, y)`.
//! 2. Optionally `append_one_sample` to close a periodic series.
//! 3. `recreate_from_average` with a strategy, then `integral_match`.
//! 4. Apply noise, trend, smoothing, truncation or scaling as needed.
//! 5. Read the result with `get` or sample it continuously via `to_function`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use tracing::debug;

// Internal dependencies
use crate::algorithms::matching::integral_matching_reference_stretch;
use crate::algorithms::process::{self, interpolate as interpolate_values, linspace, noise_gauss};
use crate::engine::state::{Axis, SeriesSet};
use crate::engine::validator::Validator;
use crate::input::SeriesInput;
use crate::primitives::arrays;

// Publicly re-exported types
pub use crate::algorithms::matching::IntegralMatching;
pub use crate::algorithms::process::{Cut, InterpolationMethod, Noise};
pub use crate::algorithms::rfa::{
    CubicSplineRfa, ExpAdaptiveRfa, ExpFixedRfa, FunctionRfa, LinearAdaptiveRfa, LinearFixedRfa,
    PiecewiseConstantRfa, RecreateFromAverage, RfaStrategy, SamplingFunction, SamplingSupplier,
};
pub use crate::engine::state::TimeSeries;
pub use crate::math::integral::IntegralMethod;
pub use crate::math::smoothing::SmoothingSpline;
pub use crate::primitives::arrays::Direction;
pub use crate::primitives::errors::{ErrorKind, WeaverError};
pub use crate::primitives::search::SearchStrategy;

// ============================================================================
// Weaver
// ============================================================================

/// Fluent pipeline over one time series.
#[derive(Debug, Clone, PartialEq)]
pub struct Weaver<T> {
    series: SeriesSet<T>,
}

impl<T: Float> Weaver<T> {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Start a pipeline from `x` and `y`.
    ///
    /// Fails when the lengths differ, the input is empty or non-finite, or
    /// `x` is not strictly increasing.
    pub fn new<X, Y>(x: &X, y: &Y) -> Result<Self, WeaverError>
    where
        X: SeriesInput<T> + ?Sized,
        Y: SeriesInput<T> + ?Sized,
    {
        let x = x.as_series_slice()?;
        let y = y.as_series_slice()?;
        Self::from_series(TimeSeries::new(x.to_vec(), y.to_vec()))
    }

    /// Start a pipeline from `y` sampled at `x = 0, 1, 2, ...`.
    pub fn from_y<Y>(y: &Y) -> Result<Self, WeaverError>
    where
        Y: SeriesInput<T> + ?Sized,
    {
        let y = y.as_series_slice()?;
        let x = (0..y.len()).map(|i| T::from(i).unwrap()).collect();
        Self::from_series(TimeSeries::new(x, y.to_vec()))
    }

    /// Start a pipeline from `(x, y)` pairs.
    pub fn from_pairs(pairs: &[(T, T)]) -> Result<Self, WeaverError> {
        Self::from_series(TimeSeries::from_pairs(pairs))
    }

    /// Start a pipeline from an owned series.
    pub fn from_series(series: TimeSeries<T>) -> Result<Self, WeaverError> {
        Validator::validate_series(&series.x, &series.y)?;
        debug!(len = series.len(), "weaver created");
        Ok(Self {
            series: SeriesSet::new(series),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Working `(x, y)`.
    pub fn get(&self) -> (&[T], &[T]) {
        let s = self.series.working();
        (&s.x, &s.y)
    }

    /// Original `(x, y)` as constructed.
    pub fn get_original(&self) -> (&[T], &[T]) {
        let s = self.series.original();
        (&s.x, &s.y)
    }

    /// Reference `(x, y)` used for integral matching.
    pub fn get_reference(&self) -> (&[T], &[T]) {
        let s = self.series.reference();
        (&s.x, &s.y)
    }

    /// Working series.
    pub fn series(&self) -> &TimeSeries<T> {
        self.series.working()
    }

    /// Working series as `(x, y)` pairs.
    pub fn to_pairs(&self) -> Vec<(T, T)> {
        self.series.working().to_pairs()
    }

    /// Number of working samples.
    pub fn len(&self) -> usize {
        self.series.working().len()
    }

    /// Whether the working series is empty.
    pub fn is_empty(&self) -> bool {
        self.series.working().is_empty()
    }

    /// Product of all x scale factors applied so far.
    pub fn x_scale(&self) -> T {
        self.series.x_scale()
    }

    /// Product of all y scale factors applied so far.
    pub fn y_scale(&self) -> T {
        self.series.y_scale()
    }

    /// New pipeline over the working samples `start..end`.
    pub fn slice_by_index(&self, start: usize, end: usize) -> Result<Self, WeaverError> {
        let s = self.series.working();
        Validator::validate_index_range(start, end, s.len())?;
        Self::from_series(TimeSeries::new(
            s.x[start..end].to_vec(),
            s.y[start..end].to_vec(),
        ))
    }

    /// New pipeline over the working samples from x-value `start` to x-value
    /// `end`, both included. Both values must be present in x.
    pub fn slice_by_value(&self, start: T, end: T) -> Result<Self, WeaverError> {
        let x = &self.series.working().x;
        let find = |v: T| {
            x.iter()
                .position(|&xi| xi == v)
                .ok_or(WeaverError::ValueNotFound(v.to_f64().unwrap_or(f64::NAN)))
        };
        let first = find(start)?;
        let last = find(end)?;
        self.slice_by_index(first, last + 1)
    }

    /// Continuous smoothing spline through the working series.
    ///
    /// `s` bounds the residual sum of squares; `0` interpolates.
    pub fn to_function(&self, s: T) -> Result<SmoothingSpline<T>, WeaverError> {
        let w = self.series.working();
        SmoothingSpline::fit(&w.x, &w.y, s)
    }

    // ========================================================================
    // Reconstruction
    // ========================================================================

    /// Replace the working series by its reconstruction with `n` samples per
    /// interval. The reference series is left untouched.
    pub fn recreate_from_average<S>(&mut self, n: usize, strategy: S) -> Result<&mut Self, WeaverError>
    where
        S: RecreateFromAverage<T>,
    {
        Validator::validate_oversampling(n)?;
        self.series.map_working(|w| {
            let (x, y) = strategy.rfa(&w.x, &w.y, n)?;
            Ok(TimeSeries::new(x, y))
        })?;
        debug!(strategy = strategy.name(), n, len = self.len(), "reconstruction applied");
        Ok(self)
    }

    /// Stretch the working series so that its integrals match the reference.
    pub fn integral_match(&mut self, config: &IntegralMatching<T>) -> Result<&mut Self, WeaverError> {
        let reference = self.series.reference().clone();
        self.series.map_working(|w| {
            let y = integral_matching_reference_stretch(&w.x, &w.y, &reference.x, &reference.y, config)?;
            Ok(TimeSeries::new(w.x.clone(), y))
        })?;
        Ok(self)
    }

    // ========================================================================
    // Cosmetic Passes
    // ========================================================================

    /// Add Gaussian noise to the working y.
    pub fn noise(&mut self, noise: &Noise<T>) -> Result<&mut Self, WeaverError> {
        self.series
            .map_working(|w| Ok(TimeSeries::new(w.x.clone(), noise_gauss(&w.y, noise)?)))?;
        Ok(self)
    }

    /// Add `f(x)` to the working y; see [`process::trend`].
    ///
    /// Fails when `f` produces a non-finite value.
    pub fn trend<F>(&mut self, f: F, normalized: bool) -> Result<&mut Self, WeaverError>
    where
        F: Fn(T) -> T,
    {
        self.series.map_working(|w| {
            let y = process::trend(&w.x, &w.y, f, normalized);
            Validator::validate_series(&w.x, &y)?;
            Ok(TimeSeries::new(w.x.clone(), y))
        })?;
        Ok(self)
    }

    /// Replace the working y by a smoothing spline with residual budget `s`.
    pub fn smooth(&mut self, s: T) -> Result<&mut Self, WeaverError> {
        self.series.map_working(|w| {
            let y = SmoothingSpline::fit(&w.x, &w.y, s)?.eval_many(&w.x);
            Ok(TimeSeries::new(w.x.clone(), y))
        })?;
        Ok(self)
    }

    /// Resample the working series on `n` evenly spaced points over its range.
    pub fn interpolate(&mut self, n: usize, method: InterpolationMethod<T>) -> Result<&mut Self, WeaverError> {
        Validator::validate_min_points(n, 2)?;
        let w = self.series.working();
        let new_x = linspace(w.x[0], w.x[w.len() - 1], n);
        self.interpolate_at(&new_x, method)
    }

    /// Resample the working series at `new_x`, which must span the same range
    /// and be strictly increasing.
    pub fn interpolate_at(
        &mut self,
        new_x: &[T],
        method: InterpolationMethod<T>,
    ) -> Result<&mut Self, WeaverError> {
        self.series.map_working(|w| {
            Validator::validate_same_range(&w.x, new_x)?;
            let y = interpolate_values(&w.x, &w.y, new_x, method)?;
            Validator::validate_series(new_x, &y)?;
            Ok(TimeSeries::new(new_x.to_vec(), y))
        })?;
        Ok(self)
    }

    // ========================================================================
    // Structural Passes
    // ========================================================================

    /// Append one synthetic sample to working and reference series.
    pub fn append_one_sample(&mut self, make_periodic: bool) -> Result<&mut Self, WeaverError> {
        self.series.map_tracked(|s| {
            let (x, y) = arrays::append_one_sample(&s.x, &s.y, make_periodic)?;
            Ok(TimeSeries::new(x, y))
        })?;
        Ok(self)
    }

    /// Tile working and reference series `repeats` times.
    pub fn repeat(&mut self, repeats: usize) -> Result<&mut Self, WeaverError> {
        Validator::validate_min_points(repeats, 1)?;
        self.series.map_tracked(|s| {
            let (x, y) = process::repeat(&s.x, &s.y, repeats)?;
            Ok(TimeSeries::new(x, y))
        })?;
        Ok(self)
    }

    /// Keep the samples between the x-values `left` and `right`.
    ///
    /// `left` snaps to the closest lower-or-equal sample and `right` to the
    /// closest higher-or-equal sample.
    pub fn truncate_by_value(&mut self, left: T, right: T) -> Result<&mut Self, WeaverError> {
        self.truncate(Cut::Value(left), Cut::Value(right))
    }

    /// Keep the samples between two cuts given as values or range fractions.
    pub fn truncate(&mut self, left: Cut<T>, right: Cut<T>) -> Result<&mut Self, WeaverError> {
        self.series.map_tracked(|s| {
            let (x, y) = process::truncate(&s.x, &s.y, left, right)?;
            Ok(TimeSeries::new(x, y))
        })?;
        Ok(self)
    }

    /// Keep the working samples `start..end`; the reference keeps the same
    /// x-range.
    pub fn truncate_by_index(&mut self, start: usize, end: usize) -> Result<&mut Self, WeaverError> {
        let w = self.series.working();
        Validator::validate_index_range(start, end, w.len())?;
        let (lo, hi) = (w.x[start], w.x[end - 1]);
        self.series.map_each(
            |w| {
                Ok(TimeSeries::new(
                    w.x[start..end].to_vec(),
                    w.y[start..end].to_vec(),
                ))
            },
            |r| {
                let (x, y) = process::truncate(&r.x, &r.y, Cut::Value(lo), Cut::Value(hi))?;
                Ok(TimeSeries::new(x, y))
            },
        )?;
        Ok(self)
    }

    /// Add `shift` to x of working and reference series.
    pub fn shift_x(&mut self, shift: T) -> Result<&mut Self, WeaverError> {
        Validator::validate_scalar(shift, "shift")?;
        self.series.map_values(Axis::X, |v| v + shift)?;
        Ok(self)
    }

    /// Add `shift` to y of working and reference series.
    pub fn shift_y(&mut self, shift: T) -> Result<&mut Self, WeaverError> {
        Validator::validate_scalar(shift, "shift")?;
        self.series.map_values(Axis::Y, |v| v + shift)?;
        Ok(self)
    }

    /// Multiply x of working and reference series by a positive `factor`.
    pub fn scale_x(&mut self, factor: T) -> Result<&mut Self, WeaverError> {
        Validator::validate_positive(factor, "factor")?;
        self.series.scale_x(factor)?;
        Ok(self)
    }

    /// Multiply y of working and reference series by `factor`.
    pub fn scale_y(&mut self, factor: T) -> Result<&mut Self, WeaverError> {
        Validator::validate_scalar(factor, "factor")?;
        self.series.scale_y(factor)?;
        Ok(self)
    }

    /// Map the working x-range onto `[lo, hi]`; the reference follows the same map.
    ///
    /// Requires `lo < hi`.
    pub fn normalize_x(&mut self, lo: T, hi: T) -> Result<&mut Self, WeaverError> {
        Validator::validate_scalar(lo, "lo")?;
        Validator::validate_positive(hi - lo, "hi - lo")?;
        let (offset, factor) = affine_onto(&self.series.working().x, lo, hi);
        self.series.map_values(Axis::X, |v| (v - offset) * factor + lo)?;
        Ok(self)
    }

    /// Map the working y-range onto `[lo, hi]`; the reference follows the same map.
    pub fn normalize_y(&mut self, lo: T, hi: T) -> Result<&mut Self, WeaverError> {
        Validator::validate_scalar(lo, "lo")?;
        Validator::validate_scalar(hi, "hi")?;
        let (offset, factor) = affine_onto(&self.series.working().y, lo, hi);
        self.series.map_values(Axis::Y, |v| (v - offset) * factor + lo)?;
        Ok(self)
    }

    /// Reset the working series to the original snapshot.
    pub fn restore_original(&mut self) -> &mut Self {
        self.series.restore();
        self
    }
}

/// `(min, factor)` of the affine map sending `[min(a), max(a)]` onto `[lo, hi]`.
///
/// A constant array gets factor zero, mapping everything to `lo`.
fn affine_onto<T: Float>(a: &[T], lo: T, hi: T) -> (T, T) {
    let min = a.iter().fold(T::infinity(), |acc, &v| acc.min(v));
    let max = a.iter().fold(T::neg_infinity(), |acc, &v| acc.max(v));
    if !(max > min) {
        return (min, T::zero());
    }
    (min, (hi - lo) / (max - min))
}
