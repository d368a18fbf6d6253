//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer holds the state and checks of a transformation pipeline: the
//! working, original and reference series and the validation performed
//! before any pass touches them.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Validation utilities.
pub mod validator;

/// Series state of a pipeline.
pub mod state;
