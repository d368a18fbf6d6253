//! # Traffic Weaver: Time Series Reconstruction from Averages
//!
//! Rebuilds a finer-grained time series from one measured as interval
//! averages, then lets you shape the result (noise, trend, smoothing,
//! repetition, truncation, scaling) for synthetic traffic generation.
//!
//! ## What is Recreate-From-Average?
//!
//! Monitoring systems usually report one averaged value per interval. A
//! recreate-from-average (RFA) strategy oversamples each interval `n` times
//! and shapes the samples inside it, so that the curve stays close to the
//! measured averages while moving smoothly from one interval to the next.
//! Integral matching then corrects the reconstruction so that its area over
//! every original interval equals the area of the measured series.
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use traffic_weaver::prelude::*;
//!
//! let x = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = vec![1.0, 3.0, 4.0, 2.0, 2.0, 5.0];
//!
//! let mut weaver = Weaver::new(&x, &y)?;
//! weaver
//!     .recreate_from_average(10, LinearFixedRfa::new().alpha(0.8))?
//!     .integral_match(&IntegralMatching::new())?;
//!
//! let (new_x, new_y) = weaver.get();
//! assert_eq!(new_x.len(), 51);
//! assert_eq!(new_y.len(), 51);
//! # Result::<(), WeaverError>::Ok(())
//! ```
//!
//! ### Full Pipeline
//!
//! ```rust
//! use traffic_weaver::prelude::*;
//!
//! let x: Vec<f64> = (0..24).map(f64::from).collect();
//! let y: Vec<f64> = x.iter().map(|v| 10.0 + (v / 4.0).sin()).collect();
//!
//! let mut weaver = Weaver::new(&x, &y)?;
//! weaver
//!     .append_one_sample(true)?                        // Close the period
//!     .recreate_from_average(6, ExpAdaptiveRfa::new())? // Oversample 6x
//!     .integral_match(&IntegralMatching::new())?        // Keep interval areas
//!     .repeat(3)?                                       // Three periods
//!     .trend(|t| 0.5 * t, true)?                        // Slow growth
//!     .noise(&Noise::snr(40.0).seed(42))?               // Reproducible noise
//!     .scale_y(2.0)?;                                   // Unit conversion
//!
//! let spline = weaver.to_function(0.0)?;
//! let (new_x, _) = weaver.get();
//! assert!(spline.eval(new_x[3]).is_finite());
//! # Result::<(), WeaverError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Fallible operations return `Result<_, WeaverError>` and leave the pipeline
//! unchanged on failure:
//!
//! ```rust
//! use traffic_weaver::prelude::*;
//!
//! let mut weaver = Weaver::new(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0])?;
//!
//! match weaver.recreate_from_average(1, PiecewiseConstantRfa) {
//!     Ok(_) => unreachable!(),
//!     Err(e) => assert_eq!(e, WeaverError::InvalidOversampling(1)),
//! }
//! assert_eq!(weaver.len(), 3);
//! # Result::<(), WeaverError>::Ok(())
//! ```
//!
//! ## Minimal Usage (no_std)
//!
//! Disable default features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! traffic-weaver = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std`, unseeded noise falls back to a fixed seed.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - errors, array utilities and interval views.
mod primitives;

// Layer 2: Math - integrals, point fits and splines.
mod math;

// Layer 3: Algorithms - reconstruction, integral matching and passes.
mod algorithms;

// Layer 4: Engine - validation and pipeline state.
mod engine;

// Input abstractions for series construction.
mod input;

// High-level fluent API.
mod api;

// Standard traffic weaver prelude.
pub mod prelude {
    pub use crate::api::{
        CubicSplineRfa, Cut, Direction, ErrorKind, ExpAdaptiveRfa, ExpFixedRfa, FunctionRfa,
        IntegralMatching, IntegralMethod, InterpolationMethod, LinearAdaptiveRfa, LinearFixedRfa,
        Noise, PiecewiseConstantRfa, RecreateFromAverage, RfaStrategy, SamplingFunction,
        SamplingSupplier, SearchStrategy, SmoothingSpline, TimeSeries, Weaver, WeaverError,
    };
    pub use crate::input::SeriesInput;
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
