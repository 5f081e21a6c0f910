//! Weight generators shared by the differintegration algorithms.

use crate::special::gamma;
use crate::traits::Scalar;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Grünwald–Letnikov coefficients c_0..c_n of the binomial expansion of (1 - z)^α.
///
/// c_0 = 1, c_k = (1 - (α + 1)/k) c_{k-1}. The returned vector has n + 1 entries.
pub fn gl_coefficients<T: Scalar>(alpha: T, n: usize) -> Vec<T> {
    let mut coeffs = Vec::with_capacity(n + 1);
    coeffs.push(T::one());
    let alpha_plus_one = alpha + T::one();
    for k in 1..=n {
        let factor = T::one() - alpha_plus_one / T::from_f64(k as f64);
        coeffs.push(coeffs[k - 1] * factor);
    }
    coeffs
}

/// Fixed three-point weights applied to the samples before the GLI convolution.
///
/// prv f_{j-1} + crr f_j + nxt f_{j+1} is the quadratic interpolant of f at
/// x_j + h/2. The weights depend on neither the order nor the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolationStencil {
    pub prv: f64,
    pub crr: f64,
    pub nxt: f64,
}

impl InterpolationStencil {
    /// The GLI weights (-1/8, 3/4, 3/8).
    pub const fn unit() -> Self {
        Self {
            prv: -0.125,
            crr: 0.75,
            nxt: 0.375,
        }
    }

    pub fn apply(&self, previous: f64, current: f64, next: f64) -> f64 {
        self.prv * previous + self.crr * current + self.nxt * next
    }
}

/// Unscaled weight of sample j in row k of the product-trapezoid RL rule.
pub fn rl_coefficient(k: usize, j: usize, alpha: f64) -> f64 {
    let one_minus = 1.0 - alpha;
    if j == k {
        return 1.0;
    }
    let kf = k as f64;
    if j == 0 {
        return (kf - 1.0).powf(one_minus) - (kf + alpha - 1.0) * kf.powf(-alpha);
    }
    let d = (k - j) as f64;
    (d + 1.0).powf(one_minus) + (d - 1.0).powf(one_minus) - 2.0 * d.powf(one_minus)
}

/// N×N lower-triangular Riemann–Liouville weight matrix, divided by Γ(2 - α).
///
/// This is the O(N²) memory path of the crate; prefer [`crate::differintegral::rl_point`]
/// when only the last grid point is needed.
pub fn rl_matrix(alpha: f64, n: usize) -> DMatrix<f64> {
    let scale = 1.0 / gamma(2.0 - alpha);
    DMatrix::from_fn(n, n, |row, col| {
        if col > row {
            0.0
        } else {
            rl_coefficient(row, col, alpha) * scale
        }
    })
}
