#![cfg(feature = "dev")]
//! Tests for recreate-from-average strategies.
//!
//! These tests verify reconstruction of oversampled series from averages:
//! - Output grid shape and anchoring on the original x-values
//! - Reference output of the linear fixed-window strategy
//! - Exact preservation of averages by piecewise and spline strategies
//! - Transition window computation and its failure modes
//! - Boundedness and constant-input behaviour of all windowed strategies
//!
//! ## Test Organization
//!
//! 1. **Windows** - Window sizes, fixed and adaptive windows
//! 2. **Grid Shape** - Lengths and anchoring
//! 3. **Reference Output** - Known reconstruction values
//! 4. **Sample-Based Strategies** - Piecewise, function and spline
//! 5. **Windowed Strategies** - Boundedness and constant input
//! 6. **Runtime Dispatch** - Strategy enum
//! 7. **Errors** - Invalid factors, windows and parameters

use approx::assert_relative_eq;

use traffic_weaver::internals::algorithms::rfa::{
    CubicSplineRfa, ExpAdaptiveRfa, ExpFixedRfa, FunctionRfa, LinearAdaptiveRfa, LinearFixedRfa,
    PiecewiseConstantRfa, RecreateFromAverage, RfaStrategy, SamplingFunction, SamplingSupplier,
};
use traffic_weaver::internals::algorithms::transition::{
    Window, adaptive_windows, fixed_window, fraction_of, window_size,
};
use traffic_weaver::internals::primitives::errors::WeaverError;
use traffic_weaver::internals::primitives::interval::IntervalArray;

fn linear_series() -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (5..=15).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
    (x, y)
}

fn bumpy_series() -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..10).map(f64::from).collect();
    let y = vec![3.0, 5.0, 5.0, 9.0, 2.0, 2.5, 7.0, 7.0, 1.0, 4.0];
    (x, y)
}

fn windowed_strategies() -> Vec<RfaStrategy<f64>> {
    vec![
        LinearFixedRfa::new().into(),
        LinearFixedRfa::new().alpha(0.4).into(),
        LinearAdaptiveRfa::new().into(),
        LinearAdaptiveRfa::new().adaptive_smooth(0.5).into(),
        ExpFixedRfa::new().into(),
        ExpFixedRfa::new().beta(0.0).exp(3.0).into(),
        ExpAdaptiveRfa::new().into(),
        ExpAdaptiveRfa::new().beta(1.0).into(),
    ]
}

// ============================================================================
// Window Tests
// ============================================================================

/// Test window sizes derive from alpha, honour explicit sizes and floor at two.
#[test]
fn test_window_size() {
    assert_eq!(window_size(0.8, None, 5), 4);
    assert_eq!(window_size(1.0, None, 10), 10);
    assert_eq!(window_size(0.1, None, 5), 2);
    assert_eq!(window_size(1.0, Some(3), 5), 3);
    assert_eq!(window_size(1.0, Some(0), 5), 2);
}

/// Test fractions floor and clamp negative products to zero.
#[test]
fn test_fraction_of() {
    assert_eq!(fraction_of(0.5, 5), 2);
    assert_eq!(fraction_of(1.0, 5), 5);
    assert_eq!(fraction_of(0.0, 5), 0);
    assert_eq!(fraction_of(-1.0, 5), 0);
}

/// Test fixed windows split the total evenly.
#[test]
fn test_fixed_window() {
    assert_eq!(fixed_window(4, 5), Ok(Window::new(2, 2)));
    assert_eq!(fixed_window(5, 5), Ok(Window::new(2, 2)));
    assert_eq!(
        fixed_window(12, 5),
        Err(WeaverError::InvalidTransitionWindow { window: 12, n: 5 })
    );
}

/// Test linear sub-windows take a fraction of each side.
#[test]
fn test_window_linear_part() {
    let w = Window::new(4, 3);
    assert_eq!(w.linear_part(0.5), Window::new(2, 1));
    assert_eq!(w.linear_part(0.0), Window::new(0, 0));
    assert_eq!(w.linear_part(1.0), w);
}

/// Test adaptive windows follow the ratio of neighbouring jumps.
#[test]
fn test_adaptive_windows() {
    // Oversampled averages [1, 2, 4, 4] with n = 4, padded by one interval.
    let ys = [1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 4.0, 4.0, 4.0, 4.0, 4.0];
    let y = IntervalArray::extended_constant(&ys, 4).unwrap();

    let windows = adaptive_windows(&y, 4, 1.0, 4).unwrap();
    assert_eq!(
        windows,
        vec![
            Window::new(1, 1),
            Window::new(0, 2),
            Window::new(2, 1),
            Window::new(2, 0),
            Window::new(1, 1),
        ]
    );
}

/// Test flat neighbourhoods get empty windows.
#[test]
fn test_adaptive_windows_flat() {
    let ys = [3.0; 9];
    let y = IntervalArray::extended_constant(&ys, 4).unwrap();

    let windows = adaptive_windows(&y, 4, 1.0, 4).unwrap();
    assert_eq!(windows.len(), 4);
    assert_eq!(windows[1], Window::new(0, 0));
    assert_eq!(windows[2], Window::new(0, 0));
}

/// Test adaptive windows larger than an interval are rejected.
#[test]
fn test_adaptive_windows_too_large() {
    let y = IntervalArray::extended_constant(&[1.0; 9], 4).unwrap();
    assert_eq!(
        adaptive_windows(&y, 5, 1.0, 4),
        Err(WeaverError::InvalidTransitionWindow { window: 5, n: 4 })
    );
}

// ============================================================================
// Grid Shape Tests
// ============================================================================

/// Test every strategy produces `(m - 1) * n + 1` samples anchored on x.
#[test]
fn test_output_grid_anchored() {
    let (x, y) = bumpy_series();
    let n = 6;

    let mut strategies = windowed_strategies();
    strategies.push(RfaStrategy::PiecewiseConstant);
    strategies.push(RfaStrategy::CubicSpline);

    for strategy in strategies {
        let (xs, ys) = strategy.rfa(&x, &y, n).unwrap();
        assert_eq!(xs.len(), (x.len() - 1) * n + 1, "{}", strategy.name());
        assert_eq!(ys.len(), xs.len(), "{}", strategy.name());
        for (i, xi) in x.iter().enumerate() {
            assert_eq!(xs[i * n], *xi, "{} anchor {}", strategy.name(), i);
        }
        for w in xs.windows(2) {
            assert!(w[1] > w[0]);
        }
    }
}

// ============================================================================
// Reference Output Tests
// ============================================================================

/// Test the linear fixed strategy against known output.
///
/// A line sampled at 5..=15 with `alpha = 0.8` and `n = 5` ramps halfway
/// between neighbouring averages at each interval boundary.
#[test]
fn test_linear_fixed_reference_output() {
    let (x, y) = linear_series();
    let (xs, ys) = LinearFixedRfa::new().alpha(0.8).rfa(&x, &y, 5).unwrap();

    let expected_y = [
        10.0, 10.0, 10.0, 10.0, 10.5, 11.0, 11.5, 12.0, 12.0, 12.5, 13.0, 13.5, 14.0, 14.0, 14.5,
        15.0, 15.5, 16.0, 16.0, 16.5, 17.0, 17.5, 18.0, 18.0, 18.5, 19.0, 19.5, 20.0, 20.0, 20.5,
        21.0, 21.5, 22.0, 22.0, 22.5, 23.0, 23.5, 24.0, 24.0, 24.5, 25.0, 25.5, 26.0, 26.0, 26.5,
        27.0, 27.5, 28.0, 28.0, 28.5, 29.0,
    ];

    assert_eq!(xs.len(), 51);
    for (i, v) in xs.iter().enumerate() {
        assert_relative_eq!(*v, 5.0 + 0.2 * i as f64, epsilon = 1e-9);
    }
    for (got, want) in ys.iter().zip(expected_y.iter()) {
        assert_relative_eq!(*got, *want, epsilon = 1e-9);
    }
}

// ============================================================================
// Sample-Based Strategy Tests
// ============================================================================

/// Test piecewise-constant reconstruction holds each average.
#[test]
fn test_piecewise_constant() {
    let (x, y) = bumpy_series();
    let (_, ys) = PiecewiseConstantRfa.rfa(&x, &y, 4).unwrap();

    for (i, yi) in y[..y.len() - 1].iter().enumerate() {
        assert!(ys[i * 4..(i + 1) * 4].iter().all(|v| v == yi));
    }
    assert_eq!(*ys.last().unwrap(), *y.last().unwrap());
}

/// Test the spline strategy passes through every average.
#[test]
fn test_cubic_spline_preserves_knots() {
    let (x, y) = bumpy_series();
    let (_, ys) = CubicSplineRfa.rfa(&x, &y, 5).unwrap();

    for (i, yi) in y.iter().enumerate() {
        assert_eq!(ys[i * 5], *yi);
    }
}

/// Test a user supplied sampling function is evaluated on the fine grid.
#[test]
fn test_function_strategy() {
    let supplier = SamplingSupplier::new(|_x: &[f64], _y: &[f64]| {
        Ok(Box::new(|v: f64| v * v) as SamplingFunction<f64>)
    });
    let (xs, ys) = FunctionRfa::new()
        .supplier(supplier)
        .rfa(&[0.0, 1.0, 2.0], &[0.0, 0.0, 0.0], 4)
        .unwrap();

    for (xi, yi) in xs.iter().zip(ys.iter()) {
        assert_relative_eq!(*yi, xi * xi);
    }
}

/// Test the spline supplier can back a function strategy.
#[test]
fn test_function_strategy_with_spline_supplier() {
    let (x, y) = bumpy_series();
    let via_function = FunctionRfa::<f64>::new()
        .supplier(CubicSplineRfa::spline_supplier())
        .rfa(&x, &y, 3)
        .unwrap();
    let direct = CubicSplineRfa.rfa(&x, &y, 3).unwrap();

    assert_eq!(via_function, direct);
}

/// Test supplier errors propagate.
#[test]
fn test_function_supplier_error() {
    let supplier = SamplingSupplier::new(|_x: &[f64], _y: &[f64]| -> Result<SamplingFunction<f64>, WeaverError> {
        Err(WeaverError::InvalidInput("no model".to_string()))
    });
    let result = FunctionRfa::new().supplier(supplier).rfa(&[0.0, 1.0], &[1.0, 2.0], 2);

    assert_eq!(result, Err(WeaverError::InvalidInput("no model".to_string())));
}

// ============================================================================
// Windowed Strategy Tests
// ============================================================================

/// Test windowed strategies never overshoot the range of the averages.
#[test]
fn test_windowed_strategies_bounded() {
    let (x, y) = bumpy_series();
    let lo = y.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    for strategy in windowed_strategies() {
        let (_, ys) = strategy.rfa(&x, &y, 8).unwrap();
        for v in &ys {
            assert!(
                *v >= lo - 1e-9 && *v <= hi + 1e-9,
                "{} produced {} outside [{}, {}]",
                strategy.name(),
                v,
                lo,
                hi
            );
        }
    }
}

/// Test constant averages reconstruct to a constant.
#[test]
fn test_windowed_strategies_constant_input() {
    let x: Vec<f64> = (0..6).map(f64::from).collect();
    let y = vec![7.0; 6];

    for strategy in windowed_strategies() {
        let (_, ys) = strategy.rfa(&x, &y, 5).unwrap();
        for v in &ys {
            assert_relative_eq!(*v, 7.0, epsilon = 1e-12);
        }
    }
}

/// Test the final sample keeps the last average.
#[test]
fn test_windowed_strategies_keep_last_sample() {
    let (x, y) = bumpy_series();
    for strategy in [
        RfaStrategy::from(ExpFixedRfa::new()),
        RfaStrategy::from(ExpAdaptiveRfa::new()),
    ] {
        let (_, ys) = strategy.rfa(&x, &y, 4).unwrap();
        assert_eq!(*ys.last().unwrap(), *y.last().unwrap());
    }
}

/// Test plateaus away from transitions keep the average.
#[test]
fn test_linear_fixed_plateau() {
    let (x, y) = bumpy_series();
    let n = 10;
    let (_, ys) = LinearFixedRfa::new().alpha(0.4).rfa(&x, &y, n).unwrap();

    // Windows of 2 samples per side leave offsets 2..=8 on the average.
    for k in 0..x.len() - 1 {
        for offset in 2..=8 {
            assert_relative_eq!(ys[k * n + offset], y[k], epsilon = 1e-12);
        }
    }
}

// ============================================================================
// Runtime Dispatch Tests
// ============================================================================

/// Test the strategy enum delegates to its variants.
#[test]
fn test_rfa_strategy_dispatch() {
    let (x, y) = bumpy_series();
    let direct = LinearAdaptiveRfa::new().alpha(0.5).rfa(&x, &y, 6).unwrap();
    let dispatched = RfaStrategy::from(LinearAdaptiveRfa::new().alpha(0.5))
        .rfa(&x, &y, 6)
        .unwrap();

    assert_eq!(direct, dispatched);
}

/// Test strategy names.
#[test]
fn test_rfa_strategy_names() {
    assert_eq!(RfaStrategy::<f64>::default().name(), "exp_adaptive");
    assert_eq!(RfaStrategy::<f64>::PiecewiseConstant.name(), "piecewise_constant");
    assert_eq!(RfaStrategy::<f64>::CubicSpline.name(), "cubic_spline");
    assert_eq!(RfaStrategy::from(LinearFixedRfa::<f64>::new()).name(), "linear_fixed");
    assert_eq!(RfaStrategy::from(ExpFixedRfa::<f64>::new()).name(), "exp_fixed");
    assert_eq!(RfaStrategy::from(FunctionRfa::<f64>::new()).name(), "function");
}

// ============================================================================
// Error Tests
// ============================================================================

/// Test oversampling factors below two are rejected by every strategy.
#[test]
fn test_invalid_oversampling() {
    let (x, y) = bumpy_series();
    let mut strategies = windowed_strategies();
    strategies.push(RfaStrategy::PiecewiseConstant);
    strategies.push(RfaStrategy::CubicSpline);

    for strategy in strategies {
        assert_eq!(
            strategy.rfa(&x, &y, 1),
            Err(WeaverError::InvalidOversampling(1)),
            "{}",
            strategy.name()
        );
    }
}

/// Test malformed input is rejected.
#[test]
fn test_invalid_series() {
    assert_eq!(
        PiecewiseConstantRfa.rfa(&[0.0, 1.0], &[1.0], 2),
        Err(WeaverError::MismatchedInputs { x_len: 2, y_len: 1 })
    );
    assert_eq!(
        LinearFixedRfa::new().rfa(&[0.0], &[1.0], 2),
        Err(WeaverError::TooFewPoints { got: 1, min: 2 })
    );
}

/// Test a function strategy without a sampling function fails.
#[test]
fn test_missing_sampling_function() {
    let result = FunctionRfa::<f64>::new().rfa(&[0.0, 1.0], &[1.0, 2.0], 2);
    assert_eq!(result, Err(WeaverError::MissingSamplingFunction));
}

/// Test windows that do not fit an interval are rejected.
#[test]
fn test_window_too_large() {
    let (x, y) = bumpy_series();
    assert_eq!(
        LinearFixedRfa::new().window(12).rfa(&x, &y, 5),
        Err(WeaverError::InvalidTransitionWindow { window: 12, n: 5 })
    );
    assert_eq!(
        LinearAdaptiveRfa::new().window(6).rfa(&x, &y, 5),
        Err(WeaverError::InvalidTransitionWindow { window: 6, n: 5 })
    );
}

/// Test alpha bounds: adaptive windows accept up to 1, fixed windows up to 2.
#[test]
fn test_alpha_upper_bounds() {
    let (x, y) = bumpy_series();

    assert!(LinearAdaptiveRfa::new().alpha(1.0).rfa(&x, &y, 5).is_ok());
    assert!(ExpAdaptiveRfa::new().alpha(1.0).rfa(&x, &y, 5).is_ok());
    assert_eq!(
        LinearAdaptiveRfa::new().alpha(1.2).rfa(&x, &y, 5),
        Err(WeaverError::InvalidTransitionWindow { window: 6, n: 5 })
    );
    assert_eq!(
        ExpAdaptiveRfa::new().alpha(1.2).rfa(&x, &y, 5),
        Err(WeaverError::InvalidTransitionWindow { window: 6, n: 5 })
    );

    assert!(LinearFixedRfa::new().alpha(2.0).rfa(&x, &y, 5).is_ok());
    assert!(ExpFixedRfa::new().alpha(2.0).rfa(&x, &y, 5).is_ok());
    assert_eq!(
        LinearFixedRfa::new().alpha(2.4).rfa(&x, &y, 5),
        Err(WeaverError::InvalidTransitionWindow { window: 12, n: 5 })
    );
    assert_eq!(
        ExpFixedRfa::new().alpha(2.4).rfa(&x, &y, 5),
        Err(WeaverError::InvalidTransitionWindow { window: 12, n: 5 })
    );
}

/// Test the linear fraction must lie in the unit interval.
#[test]
fn test_invalid_beta() {
    let (x, y) = bumpy_series();
    assert_eq!(
        ExpFixedRfa::new().beta(1.5).rfa(&x, &y, 5),
        Err(WeaverError::InvalidBeta(1.5))
    );
    assert_eq!(
        ExpAdaptiveRfa::new().beta(-0.1).rfa(&x, &y, 5),
        Err(WeaverError::InvalidBeta(-0.1))
    );
}
