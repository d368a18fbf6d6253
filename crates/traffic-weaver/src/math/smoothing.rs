//! Cubic smoothing splines with automatic knot placement.
//!
//! ## Purpose
//!
//! This module fits a cubic B-spline to sampled data under a residual budget.
//! It backs the smoothing pass, spline interpolation and the continuous
//! sampling function exposed by the orchestrator.
//!
//! ## Design notes
//!
//! * **Knot selection**: Fitting starts from the least-squares cubic without
//!   interior knots. While the residual sum of squares exceeds the budget,
//!   knots are inserted at the data point in the middle of the knot interval
//!   with the largest residual.
//! * **Smoothing factor**: Once the least-squares spline undershoots the
//!   budget, a penalty on the jumps of the third derivative at the interior
//!   knots is weighted by `1/p`. `p` is found by rational interpolation so
//!   that the residual matches the budget within a relative tolerance.
//! * **Givens rotations**: The banded observation matrix is reduced to upper
//!   triangular form row by row, so no normal equations are formed.
//! * **Extrapolation**: Outside the data range the end polynomial pieces are
//!   continued.
//!
//! ## Key concepts
//!
//! * `s = 0`: interpolating spline with interior knots at `x[2..len-2]`.
//! * `s >=` residual of the least-squares cubic: that cubic.
//! * Otherwise: residual sum of squares equal to `s` within `0.1%`.
//!
//! ## Invariants
//!
//! * Knots are non-decreasing; the first and last four equal the end points.
//! * There are `knots.len() - 4` coefficients.
//!
//! ## Non-goals
//!
//! * No observation weights and no periodic boundary conditions.
//! * Only cubic splines.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use tracing::trace;

// Internal dependencies
use crate::primitives::errors::WeaverError;

// ============================================================================
// Constants
// ============================================================================

/// Polynomial degree of every piece.
const DEGREE: usize = 3;

/// Number of B-splines that are non-zero on one knot interval.
const ORDER: usize = DEGREE + 1;

/// Bandwidth of the penalized system.
const BAND: usize = ORDER + 1;

/// Relative tolerance on the residual budget.
const TOLERANCE: f64 = 0.001;

/// Maximum iterations when searching the smoothing factor.
const MAX_ITERATIONS: usize = 20;

// ============================================================================
// Smoothing Spline
// ============================================================================

/// Cubic B-spline given by its knots and coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingSpline<T> {
    knots: Vec<T>,
    coefficients: Vec<T>,
    residual: T,
}

impl<T: Float> SmoothingSpline<T> {
    /// Interpolating cubic spline through all points.
    pub fn interpolating(x: &[T], y: &[T]) -> Result<Self, WeaverError> {
        Self::fit(x, y, T::zero())
    }

    /// Smoothing spline whose residual sum of squares is `s`.
    ///
    /// Requires at least four strictly increasing points and a finite,
    /// non-negative `s`.
    pub fn fit(x: &[T], y: &[T], s: T) -> Result<Self, WeaverError> {
        validate_points(x, y, s)?;
        Ok(KnotSearch::new(x, y, s).run())
    }

    /// Full knot vector, including the repeated end knots.
    pub fn knots(&self) -> &[T] {
        &self.knots
    }

    /// B-spline coefficients.
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Residual sum of squares at the data points.
    pub fn residual(&self) -> T {
        self.residual
    }

    /// Evaluate the spline at `x`.
    pub fn eval(&self, x: T) -> T {
        let t = &self.knots;
        let nk1 = self.coefficients.len();
        let l = DEGREE + t[DEGREE + 1..nk1].partition_point(|&tk| tk <= x);
        let h = basis(t, x, l);
        (0..ORDER).fold(T::zero(), |acc, j| {
            acc + self.coefficients[l - DEGREE + j] * h[j]
        })
    }

    /// Evaluate the spline at every value of `x`.
    pub fn eval_many(&self, x: &[T]) -> Vec<T> {
        x.iter().map(|&xi| self.eval(xi)).collect()
    }
}

// ============================================================================
// Knot Search
// ============================================================================

/// State of the knot insertion loop.
struct KnotSearch<'a, T> {
    x: &'a [T],
    y: &'a [T],
    s: T,
    acc: T,
    knots: Vec<T>,
    /// Residual share of every knot interval.
    fpint: Vec<T>,
    /// Data points strictly inside every knot interval.
    nrdata: Vec<usize>,
}

impl<'a, T: Float> KnotSearch<'a, T> {
    fn new(x: &'a [T], y: &'a [T], s: T) -> Self {
        let nmax = x.len() + ORDER;
        Self {
            x,
            y,
            s,
            acc: s * T::from(TOLERANCE).unwrap(),
            knots: vec![T::zero(); nmax],
            fpint: vec![T::zero(); nmax],
            nrdata: vec![0; nmax],
        }
    }

    fn run(mut self) -> SmoothingSpline<T> {
        let m = self.x.len();
        let nmin = 2 * ORDER;
        let nmax = m + ORDER;

        let mut n = if self.s > T::zero() {
            self.nrdata[0] = m - 2;
            nmin
        } else {
            self.place_interpolation_knots()
        };

        let mut fp0 = T::zero();
        let mut fpold = T::zero();
        let mut nplus = 0usize;
        let mut polynomial = false;
        let mut undershoot = None;

        for _ in 0..m {
            polynomial = n == nmin;
            let nrint = n - nmin + 1;
            self.set_boundary_knots(n);

            let lsq = LeastSquares::new(self.x, self.y, &self.knots[..n]);
            if polynomial {
                fp0 = lsq.residual;
            }
            let fpms = lsq.residual - self.s;
            if fpms.abs() < self.acc || (fpms >= T::zero() && n == nmax) {
                return lsq.into_spline(&self.knots[..n]);
            }
            if fpms < T::zero() {
                undershoot = Some(lsq);
                break;
            }

            nplus = if polynomial {
                1
            } else {
                let mut npl1 = nplus * 2;
                if fpold - lsq.residual > self.acc {
                    npl1 = (T::from(nplus).unwrap() * fpms / (fpold - lsq.residual))
                        .to_usize()
                        .unwrap_or(npl1);
                }
                (nplus * 2).min(npl1.max(nplus / 2).max(1))
            };
            fpold = lsq.residual;

            self.share_residuals(&lsq, n, nrint);
            let mut nrint = nrint;
            for _ in 0..nplus {
                n = self.add_knot(n, nrint);
                nrint += 1;
                if n == nmax {
                    n = self.place_interpolation_knots();
                    break;
                }
            }
        }

        let Some(lsq) = undershoot else {
            self.set_boundary_knots(n);
            return LeastSquares::new(self.x, self.y, &self.knots[..n]).into_spline(&self.knots[..n]);
        };
        if polynomial {
            trace!("least-squares cubic meets the smoothing budget");
            return lsq.into_spline(&self.knots[..n]);
        }
        trace!(knots = n, "knots placed; searching smoothing factor");
        Penalized::new(&self.knots[..n], lsq, fp0 - self.s, self.s, self.acc).solve(self.x, self.y)
    }

    /// Interior knots at `x[2..m-2]`, as for interpolation.
    fn place_interpolation_knots(&mut self) -> usize {
        let m = self.x.len();
        for l in 0..m - ORDER {
            self.knots[ORDER + l] = self.x[2 + l];
        }
        m + ORDER
    }

    fn set_boundary_knots(&mut self, n: usize) {
        let (first, last) = (self.x[0], self.x[self.x.len() - 1]);
        for j in 0..ORDER {
            self.knots[j] = first;
            self.knots[n - 1 - j] = last;
        }
    }

    /// Sum the squared residuals over every knot interval.
    ///
    /// A point lying on an interior knot is split evenly between both sides.
    fn share_residuals(&mut self, lsq: &LeastSquares<T>, n: usize, nrint: usize) {
        let half = T::from(0.5).unwrap();
        let mut fpart = T::zero();
        let mut i = 0;
        for (new, term) in lsq.squared_residuals(self.x, self.y, &self.knots[..n], &lsq.coefficients) {
            fpart = fpart + term;
            if new {
                let store = term * half;
                self.fpint[i] = fpart - store;
                i += 1;
                fpart = store;
            }
        }
        self.fpint[nrint - 1] = fpart;
    }

    /// Insert a knot at the middle data point of the worst interval.
    fn add_knot(&mut self, n: usize, nrint: usize) -> usize {
        let mut fpmax = T::zero();
        let (mut number, mut maxpt, mut maxbeg) = (0, 0, 0);
        let mut begin = 0;
        for j in 0..nrint {
            let points = self.nrdata[j];
            if fpmax < self.fpint[j] && points != 0 {
                fpmax = self.fpint[j];
                number = j;
                maxpt = points;
                maxbeg = begin;
            }
            begin += points + 1;
        }

        let ihalf = maxpt / 2 + 1;
        let next = number + 1;
        for jj in (next..nrint).rev() {
            self.fpint[jj + 1] = self.fpint[jj];
            self.nrdata[jj + 1] = self.nrdata[jj];
            self.knots[jj + DEGREE + 1] = self.knots[jj + DEGREE];
        }

        let total = T::from(maxpt).unwrap();
        self.nrdata[number] = ihalf - 1;
        self.nrdata[next] = maxpt - ihalf;
        self.fpint[number] = fpmax * T::from(self.nrdata[number]).unwrap() / total;
        self.fpint[next] = fpmax * T::from(self.nrdata[next]).unwrap() / total;
        self.knots[next + DEGREE] = self.x[maxbeg + ihalf];
        n + 1
    }
}

// ============================================================================
// Least Squares Spline
// ============================================================================

/// Triangularized least-squares problem for one knot vector.
struct LeastSquares<T> {
    /// Upper triangular band, `ORDER` entries per row.
    a: Vec<[T; ORDER]>,
    /// Rotated right-hand side.
    z: Vec<T>,
    /// Non-zero B-splines at every data point.
    rows: Vec<[T; ORDER]>,
    coefficients: Vec<T>,
    residual: T,
}

impl<T: Float> LeastSquares<T> {
    fn new(x: &[T], y: &[T], t: &[T]) -> Self {
        let nk1 = t.len() - ORDER;
        let mut a = vec![[T::zero(); ORDER]; nk1];
        let mut z = vec![T::zero(); nk1];
        let mut rows = Vec::with_capacity(x.len());
        let mut residual = T::zero();

        let mut l = DEGREE;
        for (&xi, &yi) in x.iter().zip(y) {
            while !(xi < t[l + 1] || l == nk1 - 1) {
                l += 1;
            }
            let mut h = basis(t, xi, l);
            rows.push(h);

            let mut yi = yi;
            for i in 0..ORDER {
                let piv = h[i];
                if piv == T::zero() {
                    continue;
                }
                let r = l - DEGREE + i;
                let (cos, sin) = givens(piv, &mut a[r][0]);
                rotate(cos, sin, &mut yi, &mut z[r]);
                for i1 in i + 1..ORDER {
                    rotate(cos, sin, &mut h[i1], &mut a[r][i1 - i]);
                }
            }
            residual = residual + yi * yi;
        }

        let coefficients = back_substitute(&a, &z);
        Self {
            a,
            z,
            rows,
            coefficients,
            residual,
        }
    }

    /// Squared residual of every point, flagged when the point opens a new
    /// knot interval.
    fn squared_residuals(&self, x: &[T], y: &[T], t: &[T], c: &[T]) -> Vec<(bool, T)> {
        let nk1 = c.len();
        let mut l = DEGREE;
        x.iter()
            .zip(y)
            .zip(&self.rows)
            .map(|((&xi, &yi), h)| {
                let new = l + 1 < nk1 && xi >= t[l + 1];
                if new {
                    l += 1;
                }
                let fitted = (0..ORDER).fold(T::zero(), |acc, j| acc + c[l - DEGREE + j] * h[j]);
                (new, (fitted - yi) * (fitted - yi))
            })
            .collect()
    }

    fn into_spline(self, t: &[T]) -> SmoothingSpline<T> {
        SmoothingSpline {
            knots: t.to_vec(),
            coefficients: self.coefficients,
            residual: self.residual,
        }
    }
}

// ============================================================================
// Penalized Spline
// ============================================================================

/// Search for the smoothing factor `p` on a fixed knot vector.
struct Penalized<'a, T> {
    t: &'a [T],
    lsq: LeastSquares<T>,
    /// Third-derivative jumps at the interior knots.
    jumps: Vec<[T; BAND]>,
    /// Budget excess of the least-squares cubic.
    f_polynomial: T,
    s: T,
    acc: T,
}

impl<'a, T: Float> Penalized<'a, T> {
    fn new(t: &'a [T], lsq: LeastSquares<T>, f_polynomial: T, s: T, acc: T) -> Self {
        Self {
            jumps: discontinuity_jumps(t),
            t,
            lsq,
            f_polynomial,
            s,
            acc,
        }
    }

    fn solve(self, x: &[T], y: &[T]) -> SmoothingSpline<T> {
        let nk1 = self.lsq.coefficients.len();
        let con1 = T::from(0.1).unwrap();
        let con4 = T::from(0.04).unwrap();
        let con9 = T::from(0.9).unwrap();

        let (mut p1, mut f1) = (T::zero(), self.f_polynomial);
        let (mut p3, mut f3) = (-T::one(), self.lsq.residual - self.s);
        let diagonal = self.lsq.a.iter().fold(T::zero(), |acc, row| acc + row[0]);
        let mut p = T::from(nk1).unwrap() / diagonal;
        let (mut ich1, mut ich3) = (false, false);

        let mut best = self.fit_with(p, x, y);
        for iteration in 1..=MAX_ITERATIONS {
            if iteration > 1 {
                best = self.fit_with(p, x, y);
            }
            let fpms = best.residual - self.s;
            if fpms.abs() < self.acc || iteration == MAX_ITERATIONS {
                break;
            }

            let (p2, f2) = (p, fpms);
            if !ich3 {
                if f2 - f3 <= self.acc {
                    // Initial p too large.
                    p3 = p2;
                    f3 = f2;
                    p = p * con4;
                    if p <= p1 {
                        p = p1 * con9 + p2 * con1;
                    }
                    continue;
                }
                if f2 < T::zero() {
                    ich3 = true;
                }
            }
            if !ich1 {
                if f1 - f2 <= self.acc {
                    // Initial p too small.
                    p1 = p2;
                    f1 = f2;
                    p = p / con4;
                    if p3 < T::zero() {
                        continue;
                    }
                    if p >= p3 {
                        p = p2 * con1 + p3 * con9;
                    }
                    continue;
                }
                if f2 > T::zero() {
                    ich1 = true;
                }
            }
            if f2 >= f1 || f2 <= f3 {
                trace!("smoothing factor search stalled");
                break;
            }
            p = rational_step(&mut p1, &mut f1, p2, f2, &mut p3, &mut f3);
        }

        trace!(
            p = p.to_f64().unwrap_or(f64::NAN),
            residual = best.residual.to_f64().unwrap_or(f64::NAN),
            "smoothing factor found"
        );
        best
    }

    /// Rotate the penalty rows weighted by `1/p` into the least-squares triangle.
    fn fit_with(&self, p: T, x: &[T], y: &[T]) -> SmoothingSpline<T> {
        let nk1 = self.lsq.coefficients.len();
        let n8 = self.jumps.len();
        let pinv = p.recip();

        let mut c = self.lsq.z.clone();
        let mut g: Vec<[T; BAND]> = self
            .lsq
            .a
            .iter()
            .map(|row| {
                let mut out = [T::zero(); BAND];
                out[..ORDER].copy_from_slice(row);
                out
            })
            .collect();

        for (it, jump) in self.jumps.iter().enumerate() {
            let mut h = jump.map(|v| v * pinv);
            let mut yi = T::zero();
            for j in it..nk1 {
                let (cos, sin) = givens(h[0], &mut g[j][0]);
                rotate(cos, sin, &mut yi, &mut c[j]);
                if j == nk1 - 1 {
                    break;
                }
                let width = if j + 1 <= n8 { ORDER } else { nk1 - j - 1 };
                for i in 0..width {
                    rotate(cos, sin, &mut h[i + 1], &mut g[j][i + 1]);
                    h[i] = h[i + 1];
                }
                h[width] = T::zero();
            }
        }

        let coefficients = back_substitute(&g, &c);
        let residual = self
            .lsq
            .squared_residuals(x, y, self.t, &coefficients)
            .into_iter()
            .fold(T::zero(), |acc, (_, term)| acc + term);
        SmoothingSpline {
            knots: self.t.to_vec(),
            coefficients,
            residual,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn validate_points<T: Float>(x: &[T], y: &[T], s: T) -> Result<(), WeaverError> {
    if x.is_empty() {
        return Err(WeaverError::EmptyInput);
    }
    if x.len() != y.len() {
        return Err(WeaverError::MismatchedInputs {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.len() < ORDER {
        return Err(WeaverError::TooFewPoints {
            got: x.len(),
            min: ORDER,
        });
    }
    if x.windows(2).any(|w| !(w[1] > w[0])) {
        return Err(WeaverError::InvalidInput(
            "spline knots must be strictly increasing".into(),
        ));
    }
    if !s.is_finite() || s < T::zero() {
        return Err(WeaverError::InvalidNumericValue(format!(
            "smoothing budget must be finite and non-negative, got {}",
            s.to_f64().unwrap_or(f64::NAN)
        )));
    }
    Ok(())
}

/// The `ORDER` B-splines that are non-zero at `x`, for `t[l] <= x < t[l+1]`.
fn basis<T: Float>(t: &[T], x: T, l: usize) -> [T; ORDER] {
    let mut h = [T::zero(); ORDER];
    h[0] = T::one();
    for j in 1..=DEGREE {
        let prev = h;
        h[0] = T::zero();
        for i in 1..=j {
            let right = t[l + i];
            let left = t[l + i - j];
            if right == left {
                h[i] = T::zero();
                continue;
            }
            let f = prev[i - 1] / (right - left);
            h[i - 1] = h[i - 1] + f * (right - x);
            h[i] = f * (x - left);
        }
    }
    h
}

/// Givens rotation zeroing `piv` against `ww`; `ww` becomes the new pivot.
fn givens<T: Float>(piv: T, ww: &mut T) -> (T, T) {
    let store = piv.abs();
    let dd = if store >= *ww {
        store * (T::one() + (*ww / piv).powi(2)).sqrt()
    } else {
        *ww * (T::one() + (piv / *ww).powi(2)).sqrt()
    };
    let rotation = (*ww / dd, piv / dd);
    *ww = dd;
    rotation
}

fn rotate<T: Float>(cos: T, sin: T, a: &mut T, b: &mut T) {
    let (s1, s2) = (*a, *b);
    *b = cos * s2 + sin * s1;
    *a = cos * s1 - sin * s2;
}

/// Solve the upper triangular band system `a c = z`.
fn back_substitute<T: Float, const W: usize>(a: &[[T; W]], z: &[T]) -> Vec<T> {
    let n = z.len();
    let mut c = vec![T::zero(); n];
    c[n - 1] = z[n - 1] / a[n - 1][0];
    for i in (0..n - 1).rev() {
        let width = (W - 1).min(n - 1 - i);
        let store = (1..=width).fold(z[i], |acc, l| acc - c[i + l] * a[i][l]);
        c[i] = store / a[i][0];
    }
    c
}

/// Jumps of the third derivative of every B-spline at the interior knots,
/// scaled by the mean knot spacing.
fn discontinuity_jumps<T: Float>(t: &[T]) -> Vec<[T; BAND]> {
    let n = t.len();
    let nk1 = n - ORDER;
    let fac = T::from(nk1 - DEGREE).unwrap() / (t[nk1] - t[DEGREE]);

    (0..n - 2 * ORDER)
        .map(|r| {
            let tl = t[r + ORDER];
            let mut h = [T::zero(); 2 * ORDER];
            for j in 0..ORDER {
                h[j] = tl - t[r + j];
                h[j + ORDER] = tl - t[r + BAND + j];
            }
            let mut row = [T::zero(); BAND];
            for (j, out) in row.iter_mut().enumerate() {
                let prod = (1..=DEGREE).fold(h[j], |acc, i| acc * h[j + i] * fac);
                *out = (t[r + j + ORDER] - t[r + j]) / prod;
            }
            row
        })
        .collect()
}

/// Next `p` from the rational interpolant through three `(p, f(p))` pairs.
///
/// `p3 < 0` stands for `p3 = infinity`. The bracket is narrowed so that
/// `f1 > 0 > f3` keeps holding.
fn rational_step<T: Float>(p1: &mut T, f1: &mut T, p2: T, f2: T, p3: &mut T, f3: &mut T) -> T {
    let p = if *p3 > T::zero() {
        let h1 = *f1 * (f2 - *f3);
        let h2 = f2 * (*f3 - *f1);
        let h3 = *f3 * (*f1 - f2);
        -(*p1 * p2 * h3 + p2 * *p3 * h1 + *p3 * *p1 * h2) / (*p1 * h1 + p2 * h2 + *p3 * h3)
    } else {
        (*p1 * (*f1 - *f3) * f2 - p2 * (f2 - *f3) * *f1) / ((*f1 - f2) * *f3)
    };
    if f2 < T::zero() {
        *p3 = p2;
        *f3 = f2;
    } else {
        *p1 = p2;
        *f1 = f2;
    }
    p
}
