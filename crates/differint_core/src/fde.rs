//! Fractional Adams–Bashforth–Moulton predictor-corrector for Caputo initial
//! value problems y^(α)(x) = f(x, y), y^(j)(a) = y0[j] for j < ⌈α⌉.

use crate::error::{DifferintError, Result};
use crate::sampling::Grid;
use crate::special::gamma;
use crate::traits::FractionalSystem;

/// Weights of the fractional Adams scheme for one order and step size.
///
/// Powers m^α and m^(α+1) are tabulated once so that each step only does
/// multiply-adds over the history.
struct AdamsWeights {
    alpha: f64,
    pow_alpha: Vec<f64>,
    pow_alpha1: Vec<f64>,
    predictor_scale: f64,
    corrector_scale: f64,
}

impl AdamsWeights {
    fn new(alpha: f64, step_size: f64, steps: usize) -> Self {
        let h_alpha = step_size.powf(alpha);
        Self {
            alpha,
            pow_alpha: (0..=steps + 1).map(|m| (m as f64).powf(alpha)).collect(),
            pow_alpha1: (0..=steps + 1).map(|m| (m as f64).powf(alpha + 1.0)).collect(),
            predictor_scale: h_alpha / gamma(alpha + 1.0),
            corrector_scale: h_alpha / gamma(alpha + 2.0),
        }
    }

    /// Rectangle-rule weight of f_j when predicting y_{n+1}.
    fn predictor(&self, n: usize, j: usize) -> f64 {
        self.pow_alpha[n + 1 - j] - self.pow_alpha[n - j]
    }

    /// Trapezoid-rule weight of f_j when correcting y_{n+1}, 0 <= j <= n.
    fn corrector(&self, n: usize, j: usize) -> f64 {
        if j == 0 {
            self.pow_alpha1[n] - (n as f64 - self.alpha) * self.pow_alpha[n + 1]
        } else {
            self.pow_alpha1[n - j + 2] + self.pow_alpha1[n - j] - 2.0 * self.pow_alpha1[n - j + 1]
        }
    }
}

/// Taylor polynomial built from the initial values.
fn initial_value_contribution(initial_values: &[f64], offset: f64) -> f64 {
    let mut total = 0.0;
    let mut power = 1.0;
    let mut factorial = 1.0;
    for (j, &value) in initial_values.iter().enumerate() {
        if j > 0 {
            power *= offset;
            factorial *= j as f64;
        }
        total += value * power / factorial;
    }
    total
}

/// Solves y^(α)(x) = f(x, y) on `grid` and returns y at every grid point.
///
/// `initial_values` holds y(a), y'(a), ... and must have exactly ⌈α⌉ entries.
/// Each step depends on the full history, so the cost is O(N²).
pub fn pc_solve<S>(initial_values: &[f64], alpha: f64, system: &S, grid: &Grid) -> Result<Vec<f64>>
where
    S: FractionalSystem + ?Sized,
{
    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(DifferintError::InvalidOrder(format!(
            "predictor-corrector order must be positive and finite, got {alpha}"
        )));
    }
    let required = alpha.ceil() as usize;
    if initial_values.len() != required {
        return Err(DifferintError::ShapeMismatch {
            expected: required,
            got: initial_values.len(),
        });
    }

    let n_points = grid.len();
    let h = grid.step_size();
    let a = grid.lower();
    let weights = AdamsWeights::new(alpha, h, n_points);

    let mut y = Vec::with_capacity(n_points);
    let mut f_history = Vec::with_capacity(n_points);
    y.push(initial_values[0]);
    f_history.push(system.rhs(a, initial_values[0]));

    for n in 0..n_points - 1 {
        let x_next = grid.point(n + 1);
        let taylor = initial_value_contribution(initial_values, x_next - a);

        let mut predictor_sum = 0.0;
        let mut corrector_sum = 0.0;
        for (j, &f_j) in f_history.iter().enumerate() {
            predictor_sum += weights.predictor(n, j) * f_j;
            corrector_sum += weights.corrector(n, j) * f_j;
        }

        let y_predicted = taylor + weights.predictor_scale * predictor_sum;
        let f_predicted = system.rhs(x_next, y_predicted);
        let y_corrected = taylor + weights.corrector_scale * (corrector_sum + f_predicted);

        log::trace!(
            "step {}: x = {x_next}, predicted = {y_predicted}, corrected = {y_corrected}",
            n + 1
        );

        y.push(y_corrected);
        f_history.push(system.rhs(x_next, y_corrected));
    }

    log::debug!(
        "predictor-corrector of order {alpha} finished {} steps on [{}, {}]",
        n_points - 1,
        grid.lower(),
        grid.upper()
    );
    Ok(y)
}
