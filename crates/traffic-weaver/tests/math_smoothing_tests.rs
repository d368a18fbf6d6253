#![cfg(feature = "dev")]
//! Tests for cubic smoothing splines.
//!
//! These tests verify:
//! - Knot selection and values against reference fits
//! - Interpolation when the budget is zero
//! - The least-squares cubic when the budget is large
//! - The residual budget within its relative tolerance
//!
//! ## Test Organization
//!
//! 1. **Reference Fits** - Known knots and values
//! 2. **Limits** - Zero and large budgets
//! 3. **Budget** - Residual tolerance
//! 4. **Errors** - Invalid points and budgets

use approx::assert_relative_eq;

use traffic_weaver::internals::math::smoothing::SmoothingSpline;
use traffic_weaver::internals::primitives::errors::{ErrorKind, WeaverError};

fn tent() -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (5..=15).map(f64::from).collect();
    let y = vec![5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 9.0, 8.0, 7.0, 6.0, 5.0];
    (x, y)
}

fn rss(spline: &SmoothingSpline<f64>, x: &[f64], y: &[f64]) -> f64 {
    x.iter()
        .zip(y)
        .map(|(&xi, &yi)| (spline.eval(xi) - yi).powi(2))
        .sum()
}

// ============================================================================
// Reference Fit Tests
// ============================================================================

/// Test a smoothed tent against reference values.
#[test]
fn test_tent_reference_values() {
    let (x, y) = tent();
    let spline = SmoothingSpline::fit(&x, &y, 1.0).unwrap();

    assert_eq!(
        spline.knots(),
        &[5.0, 5.0, 5.0, 5.0, 10.0, 15.0, 15.0, 15.0, 15.0]
    );
    let expected = [
        4.80997905, 6.07830526, 7.27209891, 8.27226261, 8.95969893, 9.21531047, 8.95969893,
        8.27226261, 7.27209891, 6.07830526, 4.80997905,
    ];
    for (got, want) in spline.eval_many(&x).iter().zip(expected.iter()) {
        assert_relative_eq!(*got, *want, epsilon = 1e-7);
    }
}

/// Test the reported residual matches the fitted values.
#[test]
fn test_residual_matches_fit() {
    let (x, y) = tent();
    let spline = SmoothingSpline::fit(&x, &y, 1.0).unwrap();

    assert_relative_eq!(spline.residual(), rss(&spline, &x, &y), epsilon = 1e-9);
}

// ============================================================================
// Limit Tests
// ============================================================================

/// Test a zero budget interpolates with knots at the inner data points.
#[test]
fn test_zero_budget_interpolates() {
    let (x, y) = tent();
    let spline = SmoothingSpline::interpolating(&x, &y).unwrap();

    assert_eq!(spline.knots().len(), x.len() + 4);
    assert_eq!(&spline.knots()[4..11], &x[2..9]);
    for (xi, yi) in x.iter().zip(y.iter()) {
        assert_relative_eq!(spline.eval(*xi), *yi, epsilon = 1e-10);
    }
    assert_relative_eq!(spline.eval(5.5), 5.503865979381446, epsilon = 1e-10);
}

/// Test cubic data is reproduced everywhere, including outside the data.
#[test]
fn test_cubic_data_is_exact() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0];
    let y: Vec<f64> = x.iter().map(|v| v * v * v - 2.0 * v).collect();
    let spline = SmoothingSpline::interpolating(&x, &y).unwrap();

    for q in [-1.5, 0.5, 2.5, 6.0] {
        assert_relative_eq!(spline.eval(q), q * q * q - 2.0 * q, epsilon = 1e-9);
    }
}

/// Test a large budget yields the least-squares cubic without interior knots.
#[test]
fn test_large_budget_gives_cubic() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0];
    let y = [0.0, 1.0, 0.0, 1.0, 0.0];
    let spline = SmoothingSpline::fit(&x, &y, 10.0).unwrap();

    assert_eq!(spline.knots(), &[0.0, 0.0, 0.0, 0.0, 4.0, 4.0, 4.0, 4.0]);
    let expected = [4.0 / 35.0, 19.0 / 35.0, 24.0 / 35.0, 19.0 / 35.0, 4.0 / 35.0];
    for (got, want) in spline.eval_many(&x).iter().zip(expected.iter()) {
        assert_relative_eq!(*got, *want, epsilon = 1e-12);
    }
}

/// Test a line is returned unchanged for any budget.
#[test]
fn test_line_is_kept() {
    let x: Vec<f64> = (5..=15).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();

    for s in [0.0, 1.0, 1e6] {
        let spline = SmoothingSpline::fit(&x, &y, s).unwrap();
        assert_relative_eq!(spline.eval(6.12), 12.24, epsilon = 1e-9);
        assert_relative_eq!(spline.eval(7.44), 14.88, epsilon = 1e-9);
    }
}

// ============================================================================
// Budget Tests
// ============================================================================

/// Test an intermediate budget is used up within the relative tolerance.
#[test]
fn test_budget_is_met() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0];
    let y = [0.0, 1.0, 0.0, 1.0, 0.0];
    let s: f64 = 0.5;
    let spline = SmoothingSpline::fit(&x, &y, s).unwrap();

    assert!((spline.residual() - s).abs() <= 1e-3 * s);
    assert_relative_eq!(rss(&spline, &x, &y), spline.residual(), epsilon = 1e-9);
}

/// Test a larger budget gives a smoother curve.
#[test]
fn test_smoothing_reduces_roughness() {
    let x: Vec<f64> = (0..20).map(f64::from).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|v| v * 0.5 + if (*v as usize) % 2 == 0 { 1.0 } else { -1.0 })
        .collect();

    let rough = SmoothingSpline::fit(&x, &y, 1.0).unwrap().eval_many(&x);
    let smooth = SmoothingSpline::fit(&x, &y, 10.0).unwrap().eval_many(&x);

    let jumps = |v: &[f64]| -> f64 { v.windows(3).map(|w| (w[0] - 2.0 * w[1] + w[2]).abs()).sum() };
    assert!(jumps(&smooth) < jumps(&rough));
    assert!(jumps(&rough) < jumps(&y));
}

// ============================================================================
// Error Tests
// ============================================================================

/// Test invalid points and budgets are rejected.
#[test]
fn test_smoothing_errors() {
    assert_eq!(
        SmoothingSpline::<f64>::fit(&[], &[], 0.0),
        Err(WeaverError::EmptyInput)
    );
    assert_eq!(
        SmoothingSpline::fit(&[0.0, 1.0], &[0.0], 0.0),
        Err(WeaverError::MismatchedInputs { x_len: 2, y_len: 1 })
    );
    assert_eq!(
        SmoothingSpline::fit(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0], 0.0),
        Err(WeaverError::TooFewPoints { got: 3, min: 4 })
    );

    let unsorted = SmoothingSpline::fit(&[0.0, 2.0, 1.0, 3.0], &[0.0; 4], 0.0).unwrap_err();
    assert_eq!(unsorted, WeaverError::InvalidInput("spline knots must be strictly increasing".into()));

    let x = [0.0, 1.0, 2.0, 3.0];
    for s in [-1.0, f64::NAN, f64::INFINITY] {
        let err = SmoothingSpline::fit(&x, &x, s).unwrap_err();
        assert!(matches!(err, WeaverError::InvalidNumericValue(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
