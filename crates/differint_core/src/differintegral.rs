//! Grünwald–Letnikov and Riemann–Liouville differintegrals on uniform grids.
//!
//! Positive orders differentiate, negative orders integrate. Every function
//! samples its input through [`FunctionSource`], so callables and pre-sampled
//! slices are interchangeable.

use crate::coefficients::{gl_coefficients, rl_coefficient, rl_matrix, InterpolationStencil};
use crate::error::{DifferintError, Result};
use crate::sampling::{validate_order, FunctionSource, Grid, SampledFunction};
use crate::special::gamma;
use nalgebra::DVector;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// GL differintegral at the upper end of the grid.
///
/// h^(-α) Σ_{k=0}^{N-1} c_k f(b - k h), O(N).
pub fn gl_point<S>(alpha: f64, f: &S, grid: &Grid) -> Result<f64>
where
    S: FunctionSource + ?Sized,
{
    validate_order(alpha)?;
    let sampled = f.sample(grid)?;
    let n = sampled.len();
    let coeffs = gl_coefficients(alpha, n - 1);

    let sum: f64 = coeffs
        .iter()
        .zip(sampled.values.iter().rev())
        .map(|(c, v)| c * v)
        .sum();
    Ok(sum * sampled.step_size.powf(-alpha))
}

/// GL differintegral at every grid point.
///
/// The causal convolution of the coefficients with the samples is computed with
/// an FFT, so the whole sequence costs O(N log N).
pub fn gl<S>(alpha: f64, f: &S, grid: &Grid) -> Result<Vec<f64>>
where
    S: FunctionSource + ?Sized,
{
    validate_order(alpha)?;
    let sampled = f.sample(grid)?;
    let result = gl_sequence(alpha, &sampled.values, sampled.step_size);
    log::debug!(
        "GL differintegral of order {alpha} on {} points",
        result.len()
    );
    Ok(result)
}

/// Improved GL differintegral at every grid point.
///
/// Each sample is replaced by the fixed three-point combination of
/// [`InterpolationStencil::unit`] before the GL convolution, for every order.
/// Samples left of the grid are taken as zero and the sample right of the last
/// point is extrapolated quadratically. Needs at least three points.
pub fn gli<S>(alpha: f64, f: &S, grid: &Grid) -> Result<Vec<f64>>
where
    S: FunctionSource + ?Sized,
{
    validate_order(alpha)?;
    if grid.len() < 3 {
        return Err(DifferintError::TooFewPoints {
            got: grid.len(),
            min: 3,
        });
    }
    let sampled = f.sample(grid)?;
    let shifted = interpolate_shifted(&sampled, &InterpolationStencil::unit());
    let result = gl_sequence(alpha, &shifted, sampled.step_size);
    log::debug!(
        "GLI differintegral of order {alpha} on {} points",
        result.len()
    );
    Ok(result)
}

/// RL differintegral at the upper end of the grid, using the last row of the
/// product-trapezoid weights. O(N) time and memory.
pub fn rl_point<S>(alpha: f64, f: &S, grid: &Grid) -> Result<f64>
where
    S: FunctionSource + ?Sized,
{
    validate_order(alpha)?;
    let sampled = f.sample(grid)?;
    let k = sampled.len() - 1;
    let sum: f64 = sampled
        .values
        .iter()
        .enumerate()
        .map(|(j, v)| rl_coefficient(k, j, alpha) * v)
        .sum();
    Ok(sum * sampled.step_size.powf(-alpha) / gamma(2.0 - alpha))
}

/// RL differintegral at every grid point.
///
/// Builds the full N×N weight matrix from [`rl_matrix`], so memory grows
/// quadratically with the number of points. The product-trapezoid weights
/// target orders in [0, 1).
pub fn rl<S>(alpha: f64, f: &S, grid: &Grid) -> Result<Vec<f64>>
where
    S: FunctionSource + ?Sized,
{
    validate_order(alpha)?;
    let sampled = f.sample(grid)?;
    let weights = rl_matrix(alpha, sampled.len());
    let values = DVector::from_vec(sampled.values);
    let result = weights * values * sampled.step_size.powf(-alpha);
    log::debug!(
        "RL differintegral of order {alpha} on {} points",
        result.len()
    );
    Ok(result.iter().copied().collect())
}

fn gl_sequence(alpha: f64, values: &[f64], step_size: f64) -> Vec<f64> {
    let n = values.len();
    let coeffs = gl_coefficients(alpha, n - 1);
    let scale = step_size.powf(-alpha);
    causal_convolution(&coeffs, values)
        .into_iter()
        .map(|v| v * scale)
        .collect()
}

/// First `signal.len()` terms of the linear convolution of `kernel` and `signal`.
fn causal_convolution(kernel: &[f64], signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    let size = (2 * n).next_power_of_two();

    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(size);
    let inverse = planner.plan_fft_inverse(size);

    let mut lhs: Vec<Complex<f64>> = kernel
        .iter()
        .take(n)
        .map(|&c| Complex::new(c, 0.0))
        .collect();
    lhs.resize(size, Complex::new(0.0, 0.0));
    let mut rhs: Vec<Complex<f64>> = signal.iter().map(|&v| Complex::new(v, 0.0)).collect();
    rhs.resize(size, Complex::new(0.0, 0.0));

    forward.process(&mut lhs);
    forward.process(&mut rhs);
    for (a, b) in lhs.iter_mut().zip(rhs.iter()) {
        *a *= *b;
    }
    inverse.process(&mut lhs);

    // rustfft does not normalise the inverse transform.
    let norm = 1.0 / size as f64;
    lhs.iter().take(n).map(|c| c.re * norm).collect()
}

fn interpolate_shifted(sampled: &SampledFunction, stencil: &InterpolationStencil) -> Vec<f64> {
    let v = &sampled.values;
    let n = v.len();
    let beyond = 3.0 * v[n - 1] - 3.0 * v[n - 2] + v[n - 3];
    (0..n)
        .map(|j| {
            let previous = if j == 0 { 0.0 } else { v[j - 1] };
            let next = if j + 1 == n { beyond } else { v[j + 1] };
            stencil.apply(previous, v[j], next)
        })
        .collect()
}
