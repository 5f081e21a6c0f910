//! Two-parameter Mittag-Leffler function E_{α,β}(z) = Σ z^k / Γ(αk + β).
//!
//! Parameter pairs with a known closed form are dispatched to it unless the
//! caller forces the series. The series is summed until a term drops below a
//! relative tolerance; for large |z| with small α it diverges or loses all
//! precision to cancellation (large negative z), and the partial sum is
//! returned as is.

use crate::special::gamma;
use crate::traits::Scalar;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MittagLefflerSettings {
    /// Always sum the series, even when a closed form exists.
    pub ignore_special_cases: bool,
    /// Summation stops once |term| <= tolerance * |sum|.
    pub tolerance: f64,
    /// Hard ceiling on the number of series terms.
    pub max_terms: usize,
}

impl Default for MittagLefflerSettings {
    fn default() -> Self {
        Self {
            ignore_special_cases: false,
            tolerance: 1e-15,
            max_terms: 10_000,
        }
    }
}

impl MittagLefflerSettings {
    pub fn series_only() -> Self {
        Self {
            ignore_special_cases: true,
            ..Self::default()
        }
    }
}

/// Evaluation strategy for a parameter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MittagLefflerKind {
    /// α = 0: 1 / (Γ(β)(1 - z)). Outside the unit disc the series diverges;
    /// the result is -∞ for negative real z and +∞ otherwise.
    Geometric,
    /// α = 1, β = 1: e^z.
    Exponential,
    /// α = 1, β = 2: (e^z - 1)/z.
    ExpShifted,
    /// α = 2, β = 1: cosh(√z).
    CoshRoot,
    /// α = 2, β = 2: sinh(√z)/√z.
    SinhRoot,
    Series,
}

impl MittagLefflerKind {
    pub fn classify(alpha: f64, beta: f64, settings: &MittagLefflerSettings) -> Self {
        if settings.ignore_special_cases {
            return Self::Series;
        }
        match (alpha, beta) {
            (a, _) if a == 0.0 => Self::Geometric,
            (a, b) if a == 1.0 && b == 1.0 => Self::Exponential,
            (a, b) if a == 1.0 && b == 2.0 => Self::ExpShifted,
            (a, b) if a == 2.0 && b == 1.0 => Self::CoshRoot,
            (a, b) if a == 2.0 && b == 2.0 => Self::SinhRoot,
            _ => Self::Series,
        }
    }
}

/// E_{α,β}(z) for a single real or complex argument.
pub fn mittag_leffler<T: Scalar>(alpha: f64, beta: f64, z: T, settings: &MittagLefflerSettings) -> T {
    let kind = MittagLefflerKind::classify(alpha, beta, settings);
    evaluate(kind, alpha, beta, z, settings)
}

/// E_{α,β} applied elementwise. The strategy is chosen once for the whole slice.
pub fn mittag_leffler_slice<T: Scalar>(
    alpha: f64,
    beta: f64,
    zs: &[T],
    settings: &MittagLefflerSettings,
) -> Vec<T> {
    let kind = MittagLefflerKind::classify(alpha, beta, settings);
    zs.iter()
        .map(|&z| evaluate(kind, alpha, beta, z, settings))
        .collect()
}

fn evaluate<T: Scalar>(
    kind: MittagLefflerKind,
    alpha: f64,
    beta: f64,
    z: T,
    settings: &MittagLefflerSettings,
) -> T {
    if z == T::zero() {
        return T::one() / gamma(T::from_f64(beta));
    }
    match kind {
        MittagLefflerKind::Geometric => geometric(beta, z),
        MittagLefflerKind::Exponential => z.exp(),
        MittagLefflerKind::ExpShifted => (z.exp() - T::one()) / z,
        MittagLefflerKind::CoshRoot => cosh_root(z),
        MittagLefflerKind::SinhRoot => sinh_root(z),
        MittagLefflerKind::Series => series(alpha, beta, z, settings),
    }
}

fn geometric<T: Scalar>(beta: f64, z: T) -> T {
    if z.norm() >= 1.0 {
        if is_negative_real(z) {
            return -T::infinity();
        }
        return T::infinity();
    }
    T::one() / (gamma(T::from_f64(beta)) * (T::one() - z))
}

fn is_negative_real<T: Scalar>(z: T) -> bool {
    z.im() == 0.0 && z.re() < 0.0
}

fn cosh_root<T: Scalar>(z: T) -> T {
    if is_negative_real(z) {
        return T::from_f64((-z.re()).sqrt()).cos();
    }
    z.sqrt().cosh()
}

fn sinh_root<T: Scalar>(z: T) -> T {
    if is_negative_real(z) {
        let root = T::from_f64((-z.re()).sqrt());
        return root.sin() / root;
    }
    let root = z.sqrt();
    root.sinh() / root
}

fn series<T: Scalar>(alpha: f64, beta: f64, z: T, settings: &MittagLefflerSettings) -> T {
    let mut sum = T::zero();
    let mut power = T::one();
    for k in 0..settings.max_terms {
        let argument = alpha * k as f64 + beta;
        let denominator = gamma(T::from_f64(argument));
        if denominator.is_pole() {
            if argument > 0.0 {
                // Γ overflowed: every remaining term underflows to zero.
                return sum;
            }
            // 1/Γ vanishes at the poles.
            power *= z;
            continue;
        }
        let term = power / denominator;
        sum += term;
        if k > 0 && term.norm() <= settings.tolerance * sum.norm() {
            return sum;
        }
        power *= z;
    }
    log::warn!(
        "Mittag-Leffler series E_({alpha},{beta}) did not converge in {} terms at z = {:?}",
        settings.max_terms,
        z
    );
    sum
}
