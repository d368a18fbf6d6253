//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the primitive abstractions, data structures, and
//! array utilities used throughout the crate. Apart from the shared error
//! type it has no internal dependencies.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Oversampling and boundary extension.
pub mod arrays;

/// Nearest-index search over sorted arrays.
pub mod search;

/// Interval-indexed arrays.
pub mod interval;
