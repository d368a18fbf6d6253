//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the reconstruction algorithms and the passes chained
//! around them:
//! - Recreate-from-average strategies and their transition windows
//! - Integral matching against a reference series
//! - Noise, trend, repetition, interpolation, truncation, normalization
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Transition windows and the padded workspace.
pub mod transition;

/// Recreate-from-average strategies.
pub mod rfa;

/// Integral matching.
pub mod matching;

/// Post-reconstruction passes.
pub mod process;
