//! Error types for time-series reconstruction.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while oversampling,
//! reconstructing, matching or transforming a time series.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected lengths).
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! Every variant belongs to one [`ErrorKind`]:
//!
//! 1. **Invalid configuration**: oversampling factor, transition window, unknown option names.
//! 2. **Shape mismatch**: x/y lengths differ, too few points, query outside the data range.
//! 3. **Lookup miss**: a requested value or index does not exist in the series.
//! 4. **Invalid input**: empty or non-finite data.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * Numeric degeneracy inside the point-fit functions is not reported here.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Kind
// ============================================================================

/// Coarse classification of a [`WeaverError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A parameter or option is outside its allowed domain.
    InvalidConfiguration,

    /// Array lengths or ranges do not fit together.
    ShapeMismatch,

    /// A requested value or index could not be located.
    LookupMiss,

    /// The data itself is unusable (empty, NaN, infinite).
    InvalidInput,
}

// ============================================================================
// Error Type
// ============================================================================

/// Error type for traffic-weaver operations.
#[derive(Debug, Clone, PartialEq)]
pub enum WeaverError {
    /// Input arrays are empty.
    EmptyInput,

    /// Generic invalid input error with a descriptive message.
    InvalidInput(String),

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// `x` and `y` arrays must have the same number of elements.
    MismatchedInputs {
        /// Number of elements in the `x` array.
        x_len: usize,
        /// Number of elements in the `y` array.
        y_len: usize,
    },

    /// Number of points is below the minimum requirement of the operation.
    TooFewPoints {
        /// Number of points provided.
        got: usize,
        /// Minimum required points.
        min: usize,
    },

    /// Oversampling factor must be at least 2.
    InvalidOversampling(usize),

    /// Transition window does not fit into the neighbouring intervals.
    InvalidTransitionWindow {
        /// Window size in samples.
        window: usize,
        /// Oversampling factor.
        n: usize,
    },

    /// Linear sub-window fraction must lie in [0, 1].
    InvalidBeta(f64),

    /// Unknown integral method name.
    InvalidIntegralMethod(String),

    /// Unknown nearest-index search strategy name.
    InvalidSearchStrategy(String),

    /// Unknown extension direction name.
    InvalidDirection(String),

    /// Unknown interpolation method name.
    InvalidInterpolationMethod(String),

    /// A function-based reconstruction was requested without a sampling function.
    MissingSamplingFunction,

    /// Requested x-values extend beyond the range of the series.
    RangeMismatch {
        /// Smallest requested value.
        requested_min: f64,
        /// Largest requested value.
        requested_max: f64,
        /// First x-value of the series.
        available_min: f64,
        /// Last x-value of the series.
        available_max: f64,
    },

    /// Index range is empty or lies outside the series.
    IndexOutOfBounds {
        /// Start of the requested range.
        start: usize,
        /// End of the requested range (exclusive).
        end: usize,
        /// Length of the series.
        len: usize,
    },

    /// Requested x-value is not present in the series.
    ValueNotFound(f64),
}

impl WeaverError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput | Self::InvalidInput(_) | Self::InvalidNumericValue(_) => {
                ErrorKind::InvalidInput
            }
            Self::MismatchedInputs { .. } | Self::TooFewPoints { .. } | Self::RangeMismatch { .. } => {
                ErrorKind::ShapeMismatch
            }
            Self::IndexOutOfBounds { .. } | Self::ValueNotFound(_) => ErrorKind::LookupMiss,
            Self::InvalidOversampling(_)
            | Self::InvalidTransitionWindow { .. }
            | Self::InvalidBeta(_)
            | Self::InvalidIntegralMethod(_)
            | Self::InvalidSearchStrategy(_)
            | Self::InvalidDirection(_)
            | Self::InvalidInterpolationMethod(_)
            | Self::MissingSamplingFunction => ErrorKind::InvalidConfiguration,
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for WeaverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::MismatchedInputs { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} points, y has {y_len}")
            }
            Self::TooFewPoints { got, min } => {
                write!(f, "Too few points: got {got}, need at least {min}")
            }
            Self::InvalidOversampling(n) => {
                write!(f, "Invalid oversampling factor: {n} (must be >= 2)")
            }
            Self::InvalidTransitionWindow { window, n } => {
                write!(
                    f,
                    "Invalid transition window: {window} samples does not fit intervals of {n} samples"
                )
            }
            Self::InvalidBeta(beta) => write!(f, "Invalid beta: {beta} (must be in [0, 1])"),
            Self::InvalidIntegralMethod(name) => write!(
                f,
                "Unknown integral method '{name}' (expected 'trapezoid' or 'rectangle')"
            ),
            Self::InvalidSearchStrategy(name) => write!(
                f,
                "Unknown search strategy '{name}' (expected 'lower', 'higher' or 'closest')"
            ),
            Self::InvalidDirection(name) => write!(
                f,
                "Unknown direction '{name}' (expected 'left', 'right' or 'both')"
            ),
            Self::InvalidInterpolationMethod(name) => write!(
                f,
                "Unknown interpolation method '{name}' (expected 'linear', 'constant', 'cubic' or 'spline')"
            ),
            Self::MissingSamplingFunction => {
                write!(f, "Function-based reconstruction requires a sampling function")
            }
            Self::RangeMismatch {
                requested_min,
                requested_max,
                available_min,
                available_max,
            } => write!(
                f,
                "Requested range [{requested_min}, {requested_max}] exceeds series range [{available_min}, {available_max}]"
            ),
            Self::IndexOutOfBounds { start, end, len } => {
                write!(f, "Index range {start}..{end} is invalid for length {len}")
            }
            Self::ValueNotFound(value) => write!(f, "Value {value} not found in x"),
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for WeaverError {}
