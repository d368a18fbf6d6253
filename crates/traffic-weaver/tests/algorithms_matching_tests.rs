#![cfg(feature = "dev")]
//! Tests for integral matching.
//!
//! These tests verify that stretching a fine series:
//! - Matches the reference integral between every pair of fixed points
//! - Leaves samples at fixed points untouched
//! - Honours explicit fixed points and integral rules
//!
//! ## Test Organization
//!
//! 1. **Reconstruction Round Trip** - Matching after reconstruction
//! 2. **Fixed Points** - Explicit points and untouched samples
//! 3. **Degenerate Input** - Short inputs and errors

use approx::assert_relative_eq;

use traffic_weaver::internals::algorithms::matching::{
    IntegralMatching, integral_matching_reference_stretch,
};
use traffic_weaver::internals::algorithms::rfa::{
    ExpAdaptiveRfa, LinearFixedRfa, RecreateFromAverage,
};
use traffic_weaver::internals::math::integral::{IntegralMethod, trapezoid_integral};
use traffic_weaver::internals::primitives::errors::WeaverError;

fn reference() -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..=10).map(f64::from).collect();
    let y = vec![3.0, 5.0, 5.0, 9.0, 2.0, 2.5, 7.0, 7.0, 1.0, 4.0, 6.0];
    (x, y)
}

fn segment_sum(values: &[f64], start: usize, end: usize) -> f64 {
    values[start..end].iter().sum()
}

// ============================================================================
// Reconstruction Round Trip Tests
// ============================================================================

/// Test matching after a linear reconstruction restores every interval area.
#[test]
fn test_matching_restores_interval_areas() {
    let (x, y) = reference();
    let n = 4;
    let (xs, ys) = LinearFixedRfa::new().rfa(&x, &y, n).unwrap();

    let matched =
        integral_matching_reference_stretch(&xs, &ys, &x, &y, &IntegralMatching::new()).unwrap();
    let areas = trapezoid_integral(&xs, &matched);

    for j in 0..x.len() - 1 {
        assert_relative_eq!(
            segment_sum(&areas, j * n, (j + 1) * n),
            y[j] * (x[j + 1] - x[j]),
            epsilon = 1e-9
        );
    }
}

/// Test matching after an exponential reconstruction on a finer grid.
#[test]
fn test_matching_after_exp_reconstruction() {
    let (x, y) = reference();
    let n = 12;
    let (xs, ys) = ExpAdaptiveRfa::new().rfa(&x, &y, n).unwrap();

    let matched =
        integral_matching_reference_stretch(&xs, &ys, &x, &y, &IntegralMatching::new()).unwrap();
    let areas = trapezoid_integral(&xs, &matched);

    for j in 0..x.len() - 1 {
        assert_relative_eq!(segment_sum(&areas, j * n, (j + 1) * n), y[j], epsilon = 1e-9);
    }
}

/// Test the samples at fixed points are never moved.
#[test]
fn test_matching_keeps_fixed_samples() {
    let (x, y) = reference();
    let n = 5;
    let (xs, ys) = LinearFixedRfa::new().rfa(&x, &y, n).unwrap();

    let matched =
        integral_matching_reference_stretch(&xs, &ys, &x, &y, &IntegralMatching::new()).unwrap();

    for i in 0..x.len() {
        assert_eq!(matched[i * n], ys[i * n]);
    }
}

/// Test a series already matching its reference is unchanged.
#[test]
fn test_matching_identity() {
    let (x, y) = reference();
    let config = IntegralMatching::new().reference_method(IntegralMethod::Trapezoid);

    let matched = integral_matching_reference_stretch(&x, &y, &x, &y, &config).unwrap();
    assert_eq!(matched, y);
}

// ============================================================================
// Fixed Point Tests
// ============================================================================

/// Test explicit fixed points match coarser segments.
#[test]
fn test_matching_explicit_fixed_points() {
    let (x, y) = reference();
    let n = 4;
    let (xs, ys) = LinearFixedRfa::new().rfa(&x, &y, n).unwrap();

    let config = IntegralMatching::new().fixed_points(vec![0.0, 4.0, 10.0]);
    let matched = integral_matching_reference_stretch(&xs, &ys, &x, &y, &config).unwrap();
    let areas = trapezoid_integral(&xs, &matched);

    assert_relative_eq!(segment_sum(&areas, 0, 16), segment_sum(&y, 0, 4), epsilon = 1e-9);
    assert_relative_eq!(segment_sum(&areas, 16, 40), segment_sum(&y, 4, 10), epsilon = 1e-9);
}

/// Test fixed points between samples snap to the closest sample.
#[test]
fn test_matching_snaps_fixed_points() {
    let (x, y) = reference();
    let n = 4;
    let (xs, ys) = LinearFixedRfa::new().rfa(&x, &y, n).unwrap();

    let config = IntegralMatching::new().fixed_points(vec![0.1, 4.9]);
    let matched = integral_matching_reference_stretch(&xs, &ys, &x, &y, &config).unwrap();
    let areas = trapezoid_integral(&xs, &matched);

    // 0.1 snaps to x = 0 on both grids, 4.9 to x = 5.
    assert_relative_eq!(segment_sum(&areas, 0, 20), segment_sum(&y, 0, 5), epsilon = 1e-9);
}

// ============================================================================
// Degenerate Input Tests
// ============================================================================

/// Test fewer than two fixed points leave the series unchanged.
#[test]
fn test_matching_single_fixed_point() {
    let (x, y) = reference();
    let config = IntegralMatching::new().fixed_points(vec![3.0]);

    let matched = integral_matching_reference_stretch(&x, &y, &x, &y, &config).unwrap();
    assert_eq!(matched, y);
}

/// Test segments without interior samples are skipped.
#[test]
fn test_matching_no_interior_samples() {
    let x = [0.0, 1.0, 2.0];
    let y = [1.0, 2.0, 3.0];
    let y_ref = [10.0, 20.0, 30.0];

    let matched =
        integral_matching_reference_stretch(&x, &y, &x, &y_ref, &IntegralMatching::new()).unwrap();
    assert_eq!(matched, y.to_vec());
}

/// Test mismatched lengths are rejected.
#[test]
fn test_matching_mismatched_inputs() {
    let config = IntegralMatching::new();
    assert_eq!(
        integral_matching_reference_stretch(&[0.0, 1.0], &[1.0], &[0.0, 1.0], &[1.0, 1.0], &config),
        Err(WeaverError::MismatchedInputs { x_len: 2, y_len: 1 })
    );
    assert_eq!(
        integral_matching_reference_stretch(&[0.0, 1.0], &[1.0, 1.0], &[0.0, 1.0, 2.0], &[1.0], &config),
        Err(WeaverError::MismatchedInputs { x_len: 3, y_len: 1 })
    );
}
