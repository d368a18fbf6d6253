//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure mathematical building blocks of the crate:
//! - Per-segment integral approximations
//! - Two-point transition curves
//! - Natural cubic splines
//! - Cubic smoothing splines with knot selection
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Rectangle and trapezoid integrals.
pub mod integral;

/// Two-point fitting functions.
pub mod funfit;

/// Natural cubic splines.
pub mod spline;

/// Smoothing B-splines.
pub mod smoothing;
