#![cfg(feature = "dev")]
//! Tests for natural cubic splines.
//!
//! These tests verify:
//! - Interpolation through every knot
//! - Exactness for linear data and a hand-computed cubic
//! - Linear extrapolation outside the knot range
//!
//! ## Test Organization
//!
//! 1. **Interpolation** - Knot values and known curves
//! 2. **Extrapolation** - Behaviour outside the knots
//! 3. **Errors** - Invalid knots

use approx::assert_relative_eq;

use traffic_weaver::internals::math::spline::{CubicSpline, natural_cubic_spline};
use traffic_weaver::internals::primitives::errors::{ErrorKind, WeaverError};

// ============================================================================
// Interpolation Tests
// ============================================================================

/// Test the spline reproduces every knot value.
#[test]
fn test_interpolates_knots() {
    let x = [0.0, 0.5, 1.5, 2.0, 3.5, 4.0];
    let y = [1.0, -2.0, 0.5, 3.0, 2.0, 2.5];
    let spline = CubicSpline::natural(&x, &y).unwrap();

    assert_eq!(spline.knots(), &x);
    assert_eq!(spline.values(), &y);
    for (xi, yi) in x.iter().zip(y.iter()) {
        assert_relative_eq!(spline.eval(*xi), *yi);
    }
}

/// Test the spline is exact for linear data.
#[test]
fn test_linear_data() {
    let x: Vec<f64> = (0..6).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
    let spline = natural_cubic_spline(&x, &y).unwrap();

    for q in [0.25, 1.5, 2.5, 4.75] {
        assert_relative_eq!(spline.eval(q), 2.0 * q + 1.0, epsilon = 1e-10);
    }
}

/// Test a natural cubic spline against a hand-computed value.
///
/// Through (0,0), (1,1), (2,0) the middle second derivative is -3, giving
/// 0.6875 at x = 0.5.
#[test]
fn test_known_cubic() {
    let spline = CubicSpline::natural(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]).unwrap();

    assert_relative_eq!(spline.eval(0.5), 0.6875, epsilon = 1e-12);
    assert_relative_eq!(spline.eval(1.5), 0.6875, epsilon = 1e-12);
}

/// Test two knots give a straight line.
#[test]
fn test_two_knots() {
    let spline = CubicSpline::natural(&[1.0, 3.0], &[2.0, 6.0]).unwrap();
    assert_relative_eq!(spline.eval(2.0), 4.0);
    assert_relative_eq!(spline.eval(4.0), 8.0);
}

/// Test evaluation of many points matches single evaluations.
#[test]
fn test_eval_many() {
    let spline = CubicSpline::natural(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]).unwrap();
    let q = [0.1, 0.9, 1.3];
    let many = spline.eval_many(&q);

    for (v, qi) in many.iter().zip(q.iter()) {
        assert_eq!(*v, spline.eval(*qi));
    }
}

// ============================================================================
// Extrapolation Tests
// ============================================================================

/// Test extrapolation continues linearly.
#[test]
fn test_linear_extrapolation() {
    let x: Vec<f64> = (0..6).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
    let spline = CubicSpline::natural(&x, &y).unwrap();

    assert_relative_eq!(spline.eval(-1.0), -1.0, epsilon = 1e-10);
    assert_relative_eq!(spline.eval(7.0), 15.0, epsilon = 1e-10);
}

/// Test NaN queries propagate.
#[test]
fn test_nan_query() {
    let spline = CubicSpline::natural(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]).unwrap();
    assert!(spline.eval(f64::NAN).is_nan());
}

// ============================================================================
// Error Tests
// ============================================================================

/// Test invalid knots are rejected.
#[test]
fn test_spline_errors() {
    assert_eq!(
        CubicSpline::<f64>::natural(&[], &[]),
        Err(WeaverError::EmptyInput)
    );
    assert_eq!(
        CubicSpline::natural(&[0.0, 1.0], &[0.0]),
        Err(WeaverError::MismatchedInputs { x_len: 2, y_len: 1 })
    );
    assert_eq!(
        CubicSpline::natural(&[0.0], &[0.0]),
        Err(WeaverError::TooFewPoints { got: 1, min: 2 })
    );

    let err = CubicSpline::natural(&[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}
