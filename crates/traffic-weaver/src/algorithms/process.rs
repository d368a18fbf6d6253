//! Cosmetic and structural passes over a time series.
//!
//! ## Purpose
//!
//! This module holds the transformations chained after reconstruction:
//! Gaussian noise, additive trend, periodic repetition, interpolation onto a
//! new grid, truncation and normalization.
//!
//! ## Design notes
//!
//! * **Pure functions**: Every pass takes slices and returns new vectors.
//! * **Reproducible noise**: Noise draws from a seeded `StdRng` when a seed is
//!   given.
//!
//! ## Key concepts
//!
//! * **SNR**: Ratio of mean signal power to noise power, in decibels by default.
//! * **Normalized trend**: The trend function receives `x / (x_last - x_first)`.
//! * **Repetition**: x continues with period `x_last - x_first + last spacing`.
//!
//! ## Non-goals
//!
//! * This module does not track reference series; see the orchestrator.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, string::ToString, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::str::FromStr;
use num_traits::Float;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

// Internal dependencies
use crate::math::smoothing::SmoothingSpline;
use crate::math::spline::CubicSpline;
use crate::primitives::errors::WeaverError;
use crate::primitives::search::{SearchStrategy, find_clamped_indices};

// ============================================================================
// Noise
// ============================================================================

/// Seed used when no seed is given and no OS entropy is available.
#[cfg(not(feature = "std"))]
const FALLBACK_SEED: u64 = 0x5eed;

/// Gaussian noise parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Noise<T> {
    /// Signal-to-noise ratio.
    pub snr: T,

    /// Whether `snr` is given in decibels (default: true).
    pub snr_in_db: bool,

    /// Seed for reproducible noise.
    pub seed: Option<u64>,
}

impl<T: Float> Noise<T> {
    /// Noise with the given signal-to-noise ratio in decibels.
    pub fn snr(snr: T) -> Self {
        Self {
            snr,
            snr_in_db: true,
            seed: None,
        }
    }

    /// Interpret the ratio as a linear power ratio.
    pub fn linear(mut self) -> Self {
        self.snr_in_db = false;
        self
    }

    /// Draw reproducible noise from `seed`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn linear_ratio(&self) -> T {
        if self.snr_in_db {
            T::from(10.0).unwrap().powf(self.snr / T::from(10.0).unwrap())
        } else {
            self.snr
        }
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        #[cfg(feature = "std")]
        None => StdRng::from_os_rng(),
        #[cfg(not(feature = "std"))]
        None => StdRng::seed_from_u64(FALLBACK_SEED),
    }
}

/// Add zero-mean Gaussian noise with the requested signal-to-noise ratio.
pub fn noise_gauss<T: Float>(y: &[T], noise: &Noise<T>) -> Result<Vec<T>, WeaverError> {
    if y.is_empty() {
        return Ok(Vec::new());
    }

    let ratio = noise.linear_ratio();
    if !(ratio > T::zero()) {
        return Err(WeaverError::InvalidInput(format!(
            "signal-to-noise ratio must be positive, got {}",
            noise.snr.to_f64().unwrap_or(f64::NAN)
        )));
    }

    let power = y.iter().fold(T::zero(), |acc, &v| acc + v * v) / T::from(y.len()).unwrap();
    let std_dev = (power / ratio).sqrt().to_f64().unwrap_or(f64::NAN);
    let normal = Normal::new(0.0, std_dev)
        .map_err(|e| WeaverError::InvalidNumericValue(format!("noise std_dev={std_dev}: {e}")))?;

    debug!(std_dev, seeded = noise.seed.is_some(), "adding gaussian noise");
    let mut rng = make_rng(noise.seed);
    Ok(y.iter()
        .map(|&v| v + T::from(normal.sample(&mut rng)).unwrap_or_else(T::zero))
        .collect())
}

// ============================================================================
// Trend
// ============================================================================

/// Add `f(x)` to `y`; with `normalized`, `f` receives `x / (x_last - x_first)`.
pub fn trend<T, F>(x: &[T], y: &[T], f: F, normalized: bool) -> Vec<T>
where
    T: Float,
    F: Fn(T) -> T,
{
    let span = match (x.first(), x.last()) {
        (Some(&first), Some(&last)) if normalized && last != first => last - first,
        _ => T::one(),
    };
    x.iter().zip(y).map(|(&xi, &yi)| yi + f(xi / span)).collect()
}

// ============================================================================
// Repetition
// ============================================================================

/// Tile the series `repeats` times, continuing x with the last spacing.
pub fn repeat<T: Float>(x: &[T], y: &[T], repeats: usize) -> Result<(Vec<T>, Vec<T>), WeaverError> {
    if x.len() < 2 {
        return Err(WeaverError::TooFewPoints {
            got: x.len(),
            min: 2,
        });
    }

    let last = x.len() - 1;
    let period = x[last] - x[0] + (x[last] - x[last - 1]);
    let mut new_x = Vec::with_capacity(x.len() * repeats);
    let mut new_y = Vec::with_capacity(y.len() * repeats);
    for r in 0..repeats {
        let offset = period * T::from(r).unwrap();
        new_x.extend(x.iter().map(|&v| v + offset));
        new_y.extend_from_slice(y);
    }
    Ok((new_x, new_y))
}

// ============================================================================
// Interpolation
// ============================================================================

/// Interpolation rule between samples.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationMethod<T> {
    /// Straight lines between samples.
    Linear,

    /// Value of the sample at or left of the query.
    Constant,

    /// Natural cubic spline through all samples.
    Cubic,

    /// Smoothing spline with residual budget `s`; needs at least four samples.
    Spline(T),
}

impl<T> Default for InterpolationMethod<T> {
    fn default() -> Self {
        Self::Linear
    }
}

impl<T: Float> FromStr for InterpolationMethod<T> {
    type Err = WeaverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "constant" => Ok(Self::Constant),
            "cubic" => Ok(Self::Cubic),
            "spline" => Ok(Self::Spline(T::zero())),
            other => Err(WeaverError::InvalidInterpolationMethod(other.to_string())),
        }
    }
}

/// Evaluate the series at `new_x` using `method`.
///
/// Queries outside the range of `x` are extrapolated from the outer segment.
pub fn interpolate<T: Float>(
    x: &[T],
    y: &[T],
    new_x: &[T],
    method: InterpolationMethod<T>,
) -> Result<Vec<T>, WeaverError> {
    if x.len() != y.len() {
        return Err(WeaverError::MismatchedInputs {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(WeaverError::TooFewPoints {
            got: x.len(),
            min: 2,
        });
    }

    match method {
        InterpolationMethod::Linear => Ok(new_x
            .iter()
            .map(|&v| {
                let i = segment_of(x, v);
                let t = (v - x[i]) / (x[i + 1] - x[i]);
                y[i] + (y[i + 1] - y[i]) * t
            })
            .collect()),
        InterpolationMethod::Constant => Ok(new_x
            .iter()
            .map(|&v| {
                let i = x.partition_point(|&xi| xi <= v);
                y[i.saturating_sub(1)]
            })
            .collect()),
        InterpolationMethod::Cubic => Ok(CubicSpline::natural(x, y)?.eval_many(new_x)),
        InterpolationMethod::Spline(s) => Ok(SmoothingSpline::fit(x, y, s)?.eval_many(new_x)),
    }
}

/// Index `i` of the segment `[x[i], x[i+1]]` used for `v`.
fn segment_of<T: Float>(x: &[T], v: T) -> usize {
    x.partition_point(|&xi| xi <= v)
        .saturating_sub(1)
        .min(x.len() - 2)
}

/// `num` evenly spaced values from `start` to `stop`, both included.
pub fn linspace<T: Float>(start: T, stop: T, num: usize) -> Vec<T> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / T::from(num - 1).unwrap();
            let mut out: Vec<T> = (0..num - 1)
                .map(|i| start + step * T::from(i).unwrap())
                .collect();
            out.push(stop);
            out
        }
    }
}

// ============================================================================
// Truncation
// ============================================================================

/// Truncation boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cut<T> {
    /// Absolute x-value.
    Value(T),

    /// Fraction of the x-range, measured from the first x.
    Ratio(T),
}

impl<T: Float> Cut<T> {
    fn resolve(self, x: &[T]) -> T {
        match self {
            Self::Value(v) => v,
            Self::Ratio(r) => x[0] + (x[x.len() - 1] - x[0]) * r,
        }
    }
}

/// Index range `start..end` kept when cutting `x` at `left` and `right`.
///
/// The left cut snaps to the closest lower-or-equal sample, the right cut to
/// the closest higher-or-equal sample; both are kept.
pub fn truncation_range<T: Float>(x: &[T], left: Cut<T>, right: Cut<T>) -> Result<(usize, usize), WeaverError> {
    if x.is_empty() {
        return Err(WeaverError::EmptyInput);
    }
    let lo = left.resolve(x);
    let hi = right.resolve(x);
    if !(lo <= hi) {
        return Err(WeaverError::InvalidInput(format!(
            "truncation bounds are reversed: {} > {}",
            lo.to_f64().unwrap_or(f64::NAN),
            hi.to_f64().unwrap_or(f64::NAN)
        )));
    }

    let start = find_clamped_indices(x, &[lo], SearchStrategy::LowerOrEqual)[0];
    let end = find_clamped_indices(x, &[hi], SearchStrategy::HigherOrEqual)[0] + 1;
    Ok((start, end))
}

/// Keep the samples between `left` and `right`; see [`truncation_range`].
pub fn truncate<T: Float>(
    x: &[T],
    y: &[T],
    left: Cut<T>,
    right: Cut<T>,
) -> Result<(Vec<T>, Vec<T>), WeaverError> {
    let (start, end) = truncation_range(x, left, right)?;
    Ok((x[start..end].to_vec(), y[start..end].to_vec()))
}

// ============================================================================
// Normalization
// ============================================================================

/// Map the range `[min(a), max(a)]` affinely onto `[lo, hi]`.
///
/// A constant array maps to `lo`.
pub fn normalize<T: Float>(a: &[T], lo: T, hi: T) -> Vec<T> {
    let (amin, amax) = a
        .iter()
        .fold((T::infinity(), T::neg_infinity()), |(mn, mx), &v| (mn.min(v), mx.max(v)));
    let range = amax - amin;
    if !(range > T::zero()) {
        return vec![lo; a.len()];
    }
    let scale = (hi - lo) / range;
    a.iter().map(|&v| lo + (v - amin) * scale).collect()
}
