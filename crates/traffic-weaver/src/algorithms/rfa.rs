//! Recreate-from-average reconstruction strategies.
//!
//! ## Purpose
//!
//! A coarse series whose values are averages over consecutive intervals is
//! expanded into a fine series with `n` samples per interval. The strategies in
//! this module differ only in the shape of the signal between the original
//! sample points.
//!
//! ## Design notes
//!
//! * **Strategy trait**: Every strategy implements [`RecreateFromAverage`]; the
//!   tagged union [`RfaStrategy`] dispatches to them when the choice is made at
//!   runtime.
//! * **Immutable parameters**: Strategy structs are plain configuration values;
//!   a reconstruction borrows them and never mutates them.
//! * **Overridable oversampling**: The initial x-grid (linspace) and y-grid
//!   (piecewise constant) are produced by provided trait methods.
//!
//! ## Key concepts
//!
//! * **Piecewise constant**: every interval holds its average.
//! * **Function sampling**: a function built from the original points is
//!   evaluated on the fine grid (natural cubic spline by default).
//! * **Linear / exponential windows**: the average is held flat in the middle of
//!   each interval and blended into the neighbours inside fixed or adaptive
//!   transition windows.
//!
//! ## Invariants
//!
//! * `n >= 2` and at least two input points.
//! * The fine x-grid contains `x[i]` at position `i * n`.
//! * Window-based transitions are convex combinations of neighbouring
//!   averages and never overshoot them.
//!
//! ## Non-goals
//!
//! * Strategies do not preserve integrals by themselves; see integral matching.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, sync::Arc, vec::Vec};
#[cfg(feature = "std")]
use std::{boxed::Box, sync::Arc, vec::Vec};

// External dependencies
use core::fmt;
use num_traits::Float;
use tracing::debug;

// Internal dependencies
use crate::algorithms::transition::{Workspace, adaptive_windows, fixed_window, window_size};
use crate::math::spline::natural_cubic_spline;
use crate::primitives::arrays::{oversample_linspace, oversample_piecewise_constant};
use crate::primitives::errors::WeaverError;

// ============================================================================
// Strategy Trait
// ============================================================================

/// A reconstruction of an average-valued series on a finer grid.
pub trait RecreateFromAverage<T: Float> {
    /// Short strategy name used in logs.
    fn name(&self) -> &'static str;

    /// Reconstruct `(x, y)` with `n` samples per interval.
    fn rfa(&self, x: &[T], y: &[T], n: usize) -> Result<(Vec<T>, Vec<T>), WeaverError>;

    /// Initial fine x-grid.
    fn initial_x_oversample(&self, x: &[T], n: usize) -> Vec<T> {
        oversample_linspace(x, n)
    }

    /// Initial fine y-values.
    fn initial_y_oversample(&self, y: &[T], n: usize) -> Vec<T> {
        oversample_piecewise_constant(y, n)
    }
}

/// Reject oversampling factors below 2 and unusable input.
fn check_inputs<T: Float>(x: &[T], y: &[T], n: usize) -> Result<(), WeaverError> {
    if n < 2 {
        return Err(WeaverError::InvalidOversampling(n));
    }
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
    Ok(())
}

fn check_beta<T: Float>(beta: T) -> Result<(), WeaverError> {
    if !(beta >= T::zero() && beta <= T::one()) {
        return Err(WeaverError::InvalidBeta(beta.to_f64().unwrap_or(f64::NAN)));
    }
    Ok(())
}

// ============================================================================
// Piecewise Constant
// ============================================================================

/// Holds each average over its whole interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PiecewiseConstantRfa;

impl<T: Float> RecreateFromAverage<T> for PiecewiseConstantRfa {
    fn name(&self) -> &'static str {
        "piecewise_constant"
    }

    fn rfa(&self, x: &[T], y: &[T], n: usize) -> Result<(Vec<T>, Vec<T>), WeaverError> {
        check_inputs(x, y, n)?;
        debug!(strategy = "piecewise_constant", n, "recreating from average");
        let xs = <Self as RecreateFromAverage<T>>::initial_x_oversample(self, x, n);
        let ys = <Self as RecreateFromAverage<T>>::initial_y_oversample(self, y, n);
        Ok((xs, ys))
    }
}

// ============================================================================
// Function Sampling
// ============================================================================

/// Continuous function sampled on the fine grid.
pub type SamplingFunction<T> = Box<dyn Fn(T) -> T + Send + Sync>;

type SupplierFn<T> = dyn Fn(&[T], &[T]) -> Result<SamplingFunction<T>, WeaverError> + Send + Sync;

/// Builds a [`SamplingFunction`] from the original points.
#[derive(Clone)]
pub struct SamplingSupplier<T>(Arc<SupplierFn<T>>);

impl<T> SamplingSupplier<T> {
    /// Wrap a supplier closure.
    pub fn new<F>(supplier: F) -> Self
    where
        F: Fn(&[T], &[T]) -> Result<SamplingFunction<T>, WeaverError> + Send + Sync + 'static,
    {
        Self(Arc::new(supplier))
    }

    /// Build the sampling function for `(x, y)`.
    pub fn supply(&self, x: &[T], y: &[T]) -> Result<SamplingFunction<T>, WeaverError> {
        (self.0)(x, y)
    }
}

impl<T> fmt::Debug for SamplingSupplier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SamplingSupplier(..)")
    }
}

/// Evaluates a function built from the original points on the fine grid.
#[derive(Debug, Clone)]
pub struct FunctionRfa<T> {
    supplier: Option<SamplingSupplier<T>>,
}

impl<T> Default for FunctionRfa<T> {
    fn default() -> Self {
        Self { supplier: None }
    }
}

impl<T: Float> FunctionRfa<T> {
    /// Strategy without a sampling function; set one with [`Self::supplier`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampling-function supplier.
    pub fn supplier(mut self, supplier: SamplingSupplier<T>) -> Self {
        self.supplier = Some(supplier);
        self
    }

    fn sample(
        &self,
        supplier: &SamplingSupplier<T>,
        x: &[T],
        y: &[T],
        n: usize,
    ) -> Result<(Vec<T>, Vec<T>), WeaverError> {
        let f = supplier.supply(x, y)?;
        let xs = self.initial_x_oversample(x, n);
        let ys = xs.iter().map(|&xi| f(xi)).collect();
        Ok((xs, ys))
    }
}

impl<T: Float> RecreateFromAverage<T> for FunctionRfa<T> {
    fn name(&self) -> &'static str {
        "function"
    }

    fn rfa(&self, x: &[T], y: &[T], n: usize) -> Result<(Vec<T>, Vec<T>), WeaverError> {
        check_inputs(x, y, n)?;
        let supplier = self
            .supplier
            .as_ref()
            .ok_or(WeaverError::MissingSamplingFunction)?;
        debug!(strategy = "function", n, "recreating from average");
        self.sample(supplier, x, y, n)
    }
}

/// Natural cubic spline through the original points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicSplineRfa;

impl CubicSplineRfa {
    /// Supplier building a natural cubic spline.
    pub fn spline_supplier<T>() -> SamplingSupplier<T>
    where
        T: Float + Send + Sync + 'static,
    {
        SamplingSupplier::new(|x: &[T], y: &[T]| {
            let spline = natural_cubic_spline(x, y)?;
            Ok(Box::new(move |v| spline.eval(v)) as SamplingFunction<T>)
        })
    }
}

impl<T> RecreateFromAverage<T> for CubicSplineRfa
where
    T: Float + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "cubic_spline"
    }

    fn rfa(&self, x: &[T], y: &[T], n: usize) -> Result<(Vec<T>, Vec<T>), WeaverError> {
        check_inputs(x, y, n)?;
        debug!(strategy = "cubic_spline", n, "recreating from average");
        FunctionRfa::new().sample(&Self::spline_supplier(), x, y, n)
    }
}

// ============================================================================
// Linear Fixed
// ============================================================================

/// Linear transitions inside windows of fixed size.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearFixedRfa<T> {
    /// Window size as a fraction of `n` (default: 1).
    ///
    /// Each side takes half the window, so values above 2 make the window
    /// overrun an interval and fail with `InvalidTransitionWindow`.
    pub alpha: T,

    /// Window size in samples; overrides `alpha`. At most `2 * n`.
    pub window: Option<usize>,
}

impl<T: Float> Default for LinearFixedRfa<T> {
    fn default() -> Self {
        Self {
            alpha: T::one(),
            window: None,
        }
    }
}

impl<T: Float> LinearFixedRfa<T> {
    /// Strategy with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window fraction.
    pub fn alpha(mut self, alpha: T) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the window size in samples.
    pub fn window(mut self, a: usize) -> Self {
        self.window = Some(a);
        self
    }
}

impl<T: Float> RecreateFromAverage<T> for LinearFixedRfa<T> {
    fn name(&self) -> &'static str {
        "linear_fixed"
    }

    fn rfa(&self, x: &[T], y: &[T], n: usize) -> Result<(Vec<T>, Vec<T>), WeaverError> {
        check_inputs(x, y, n)?;
        let a = window_size(self.alpha, self.window, n);
        let w = fixed_window(a, n)?;
        debug!(strategy = "linear_fixed", n, a, "recreating from average");

        let xs = self.initial_x_oversample(x, n);
        let ys = self.initial_y_oversample(y, n);
        let mut ws = Workspace::new(&xs, &ys, n)?;
        for k in ws.intervals() {
            let (z0, z1) = ws.transition_values(k, w, w, w);
            ws.fill_linear(k, w, z0, z1);
        }
        Ok(ws.finish())
    }
}

// ============================================================================
// Linear Adaptive
// ============================================================================

/// Linear transitions inside windows sized by the neighbouring jumps.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearAdaptiveRfa<T> {
    /// Window size as a fraction of `n` (default: 1).
    ///
    /// The whole window must fit in one interval, so values above 1 fail
    /// with `InvalidTransitionWindow`.
    pub alpha: T,

    /// Window size in samples; overrides `alpha`. At most `n`.
    pub window: Option<usize>,

    /// Exponent applied to the jump ratio (default: 1).
    pub adaptive_smooth: T,
}

impl<T: Float> Default for LinearAdaptiveRfa<T> {
    fn default() -> Self {
        Self {
            alpha: T::one(),
            window: None,
            adaptive_smooth: T::one(),
        }
    }
}

impl<T: Float> LinearAdaptiveRfa<T> {
    /// Strategy with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window fraction.
    pub fn alpha(mut self, alpha: T) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the window size in samples.
    pub fn window(mut self, a: usize) -> Self {
        self.window = Some(a);
        self
    }

    /// Set the jump-ratio exponent.
    pub fn adaptive_smooth(mut self, adaptive_smooth: T) -> Self {
        self.adaptive_smooth = adaptive_smooth;
        self
    }
}

impl<T: Float> RecreateFromAverage<T> for LinearAdaptiveRfa<T> {
    fn name(&self) -> &'static str {
        "linear_adaptive"
    }

    fn rfa(&self, x: &[T], y: &[T], n: usize) -> Result<(Vec<T>, Vec<T>), WeaverError> {
        check_inputs(x, y, n)?;
        let a = window_size(self.alpha, self.window, n);
        debug!(strategy = "linear_adaptive", n, a, "recreating from average");

        let xs = self.initial_x_oversample(x, n);
        let ys = self.initial_y_oversample(y, n);
        let mut ws = Workspace::new(&xs, &ys, n)?;
        let windows = adaptive_windows(&ws.y, a, self.adaptive_smooth, n)?;
        for k in ws.intervals() {
            let (z0, z1) = ws.transition_values(k, windows[k - 1], windows[k], windows[k + 1]);
            ws.fill_linear(k, windows[k], z0, z1);
        }
        Ok(ws.finish())
    }
}

// ============================================================================
// Exponential Fixed
// ============================================================================

/// Linear-then-exponential transitions inside windows of fixed size.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpFixedRfa<T> {
    /// Window size as a fraction of `n` (default: 1).
    ///
    /// Each side takes half the window, so values above 2 make the window
    /// overrun an interval and fail with `InvalidTransitionWindow`.
    pub alpha: T,

    /// Fraction of each half-window that is purely linear (default: 0.5).
    pub beta: T,

    /// Window size in samples; overrides `alpha`. At most `2 * n`.
    pub window: Option<usize>,

    /// Shape exponent of the exponential part (default: 2).
    pub exp: T,
}

impl<T: Float> Default for ExpFixedRfa<T> {
    fn default() -> Self {
        Self {
            alpha: T::one(),
            beta: T::from(0.5).unwrap(),
            window: None,
            exp: T::from(2.0).unwrap(),
        }
    }
}

impl<T: Float> ExpFixedRfa<T> {
    /// Strategy with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window fraction.
    pub fn alpha(mut self, alpha: T) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the linear sub-window fraction.
    pub fn beta(mut self, beta: T) -> Self {
        self.beta = beta;
        self
    }

    /// Set the window size in samples.
    pub fn window(mut self, a: usize) -> Self {
        self.window = Some(a);
        self
    }

    /// Set the shape exponent.
    pub fn exp(mut self, exp: T) -> Self {
        self.exp = exp;
        self
    }
}

impl<T: Float> RecreateFromAverage<T> for ExpFixedRfa<T> {
    fn name(&self) -> &'static str {
        "exp_fixed"
    }

    fn rfa(&self, x: &[T], y: &[T], n: usize) -> Result<(Vec<T>, Vec<T>), WeaverError> {
        check_inputs(x, y, n)?;
        check_beta(self.beta)?;
        let a = window_size(self.alpha, self.window, n);
        let w = fixed_window(a, n)?;
        let b = w.linear_part(self.beta);
        debug!(strategy = "exp_fixed", n, a, b = b.left, "recreating from average");

        let xs = self.initial_x_oversample(x, n);
        let ys = self.initial_y_oversample(y, n);
        let mut ws = Workspace::new(&xs, &ys, n)?;
        for k in ws.intervals() {
            let (z0, z1) = ws.transition_values(k, w, w, w);
            ws.fill_exponential(k, w, b, z0, z1, self.exp);
        }
        Ok(ws.finish())
    }
}

// ============================================================================
// Exponential Adaptive
// ============================================================================

/// Linear-then-exponential transitions inside adaptive windows.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpAdaptiveRfa<T> {
    /// Window size as a fraction of `n` (default: 1).
    ///
    /// The whole window must fit in one interval, so values above 1 fail
    /// with `InvalidTransitionWindow`.
    pub alpha: T,

    /// Fraction of each side window that is purely linear (default: 0.5).
    pub beta: T,

    /// Window size in samples; overrides `alpha`. At most `n`.
    pub window: Option<usize>,

    /// Exponent applied to the jump ratio (default: 1).
    pub adaptive_smooth: T,

    /// Shape exponent of the exponential part (default: 2).
    pub exp: T,
}

impl<T: Float> Default for ExpAdaptiveRfa<T> {
    fn default() -> Self {
        Self {
            alpha: T::one(),
            beta: T::from(0.5).unwrap(),
            window: None,
            adaptive_smooth: T::one(),
            exp: T::from(2.0).unwrap(),
        }
    }
}

impl<T: Float> ExpAdaptiveRfa<T> {
    /// Strategy with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window fraction.
    pub fn alpha(mut self, alpha: T) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the linear sub-window fraction.
    pub fn beta(mut self, beta: T) -> Self {
        self.beta = beta;
        self
    }

    /// Set the window size in samples.
    pub fn window(mut self, a: usize) -> Self {
        self.window = Some(a);
        self
    }

    /// Set the jump-ratio exponent.
    pub fn adaptive_smooth(mut self, adaptive_smooth: T) -> Self {
        self.adaptive_smooth = adaptive_smooth;
        self
    }

    /// Set the shape exponent.
    pub fn exp(mut self, exp: T) -> Self {
        self.exp = exp;
        self
    }
}

impl<T: Float> RecreateFromAverage<T> for ExpAdaptiveRfa<T> {
    fn name(&self) -> &'static str {
        "exp_adaptive"
    }

    fn rfa(&self, x: &[T], y: &[T], n: usize) -> Result<(Vec<T>, Vec<T>), WeaverError> {
        check_inputs(x, y, n)?;
        check_beta(self.beta)?;
        let a = window_size(self.alpha, self.window, n);
        debug!(strategy = "exp_adaptive", n, a, "recreating from average");

        let xs = self.initial_x_oversample(x, n);
        let ys = self.initial_y_oversample(y, n);
        let mut ws = Workspace::new(&xs, &ys, n)?;
        let windows = adaptive_windows(&ws.y, a, self.adaptive_smooth, n)?;
        for k in ws.intervals() {
            let w = windows[k];
            let (z0, z1) = ws.transition_values(k, windows[k - 1], w, windows[k + 1]);
            ws.fill_exponential(k, w, w.linear_part(self.beta), z0, z1, self.exp);
        }
        Ok(ws.finish())
    }
}

// ============================================================================
// Runtime Dispatch
// ============================================================================

/// Reconstruction strategy selected at runtime.
#[derive(Debug, Clone)]
pub enum RfaStrategy<T> {
    /// See [`PiecewiseConstantRfa`].
    PiecewiseConstant,

    /// See [`FunctionRfa`].
    Function(FunctionRfa<T>),

    /// See [`CubicSplineRfa`].
    CubicSpline,

    /// See [`LinearFixedRfa`].
    LinearFixed(LinearFixedRfa<T>),

    /// See [`LinearAdaptiveRfa`].
    LinearAdaptive(LinearAdaptiveRfa<T>),

    /// See [`ExpFixedRfa`].
    ExpFixed(ExpFixedRfa<T>),

    /// See [`ExpAdaptiveRfa`].
    ExpAdaptive(ExpAdaptiveRfa<T>),
}

impl<T: Float> Default for RfaStrategy<T> {
    fn default() -> Self {
        Self::ExpAdaptive(ExpAdaptiveRfa::default())
    }
}

impl<T> RecreateFromAverage<T> for RfaStrategy<T>
where
    T: Float + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        match self {
            Self::PiecewiseConstant => RecreateFromAverage::<T>::name(&PiecewiseConstantRfa),
            Self::Function(s) => s.name(),
            Self::CubicSpline => RecreateFromAverage::<T>::name(&CubicSplineRfa),
            Self::LinearFixed(s) => s.name(),
            Self::LinearAdaptive(s) => s.name(),
            Self::ExpFixed(s) => s.name(),
            Self::ExpAdaptive(s) => s.name(),
        }
    }

    fn rfa(&self, x: &[T], y: &[T], n: usize) -> Result<(Vec<T>, Vec<T>), WeaverError> {
        match self {
            Self::PiecewiseConstant => PiecewiseConstantRfa.rfa(x, y, n),
            Self::Function(s) => s.rfa(x, y, n),
            Self::CubicSpline => CubicSplineRfa.rfa(x, y, n),
            Self::LinearFixed(s) => s.rfa(x, y, n),
            Self::LinearAdaptive(s) => s.rfa(x, y, n),
            Self::ExpFixed(s) => s.rfa(x, y, n),
            Self::ExpAdaptive(s) => s.rfa(x, y, n),
        }
    }
}

impl<T> From<PiecewiseConstantRfa> for RfaStrategy<T> {
    fn from(_: PiecewiseConstantRfa) -> Self {
        Self::PiecewiseConstant
    }
}

impl<T> From<CubicSplineRfa> for RfaStrategy<T> {
    fn from(_: CubicSplineRfa) -> Self {
        Self::CubicSpline
    }
}

impl<T> From<FunctionRfa<T>> for RfaStrategy<T> {
    fn from(s: FunctionRfa<T>) -> Self {
        Self::Function(s)
    }
}

impl<T> From<LinearFixedRfa<T>> for RfaStrategy<T> {
    fn from(s: LinearFixedRfa<T>) -> Self {
        Self::LinearFixed(s)
    }
}

impl<T> From<LinearAdaptiveRfa<T>> for RfaStrategy<T> {
    fn from(s: LinearAdaptiveRfa<T>) -> Self {
        Self::LinearAdaptive(s)
    }
}

impl<T> From<ExpFixedRfa<T>> for RfaStrategy<T> {
    fn from(s: ExpFixedRfa<T>) -> Self {
        Self::ExpFixed(s)
    }
}

impl<T> From<ExpAdaptiveRfa<T>> for RfaStrategy<T> {
    fn from(s: ExpAdaptiveRfa<T>) -> Self {
        Self::ExpAdaptive(s)
    }
}
