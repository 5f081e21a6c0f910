use num_complex::Complex;
use num_traits::NumAssign;
use std::fmt::Debug;
use std::ops::Neg;

/// A trait for types that can be used as scalars in the special functions and
/// coefficient generators. Implemented for `f64` and `Complex<f64>`.
///
/// Besides field arithmetic it exposes the handful of transcendental functions
/// the Lanczos and Mittag-Leffler evaluators need, and the integer/pole tests
/// used to route Gamma and Pochhammer evaluation.
pub trait Scalar: NumAssign + Neg<Output = Self> + Copy + Debug + PartialEq + 'static {
    fn from_f64(value: f64) -> Self;

    /// Real part.
    fn re(self) -> f64;

    /// Imaginary part (always zero for reals).
    fn im(self) -> f64;

    /// Magnitude |z|.
    fn norm(self) -> f64;

    fn exp(self) -> Self;
    fn ln(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn sinh(self) -> Self;
    fn cosh(self) -> Self;
    fn sqrt(self) -> Self;

    /// self raised to a scalar power (principal branch).
    fn pow(self, exponent: Self) -> Self;

    fn powi(self, n: i32) -> Self;

    /// The value used to report a pole.
    fn infinity() -> Self;

    fn is_integer(self) -> bool {
        self.im() == 0.0 && self.re().is_finite() && self.re().fract() == 0.0
    }

    fn is_positive_integer(self) -> bool {
        self.is_integer() && self.re() > 0.0
    }

    fn is_nonpositive_integer(self) -> bool {
        self.is_integer() && self.re() <= 0.0
    }

    /// True when the magnitude is no longer finite, i.e. a pole was hit upstream.
    fn is_pole(self) -> bool {
        !self.norm().is_finite()
    }
}

impl Scalar for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }
    fn re(self) -> f64 {
        self
    }
    fn im(self) -> f64 {
        0.0
    }
    fn norm(self) -> f64 {
        f64::abs(self)
    }
    fn exp(self) -> Self {
        f64::exp(self)
    }
    fn ln(self) -> Self {
        f64::ln(self)
    }
    fn sin(self) -> Self {
        f64::sin(self)
    }
    fn cos(self) -> Self {
        f64::cos(self)
    }
    fn sinh(self) -> Self {
        f64::sinh(self)
    }
    fn cosh(self) -> Self {
        f64::cosh(self)
    }
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }
    fn pow(self, exponent: Self) -> Self {
        f64::powf(self, exponent)
    }
    fn powi(self, n: i32) -> Self {
        f64::powi(self, n)
    }
    fn infinity() -> Self {
        f64::INFINITY
    }
}

impl Scalar for Complex<f64> {
    fn from_f64(value: f64) -> Self {
        Complex::new(value, 0.0)
    }
    fn re(self) -> f64 {
        self.re
    }
    fn im(self) -> f64 {
        self.im
    }
    fn norm(self) -> f64 {
        Complex::norm(self)
    }
    fn exp(self) -> Self {
        Complex::exp(self)
    }
    fn ln(self) -> Self {
        Complex::ln(self)
    }
    fn sin(self) -> Self {
        Complex::sin(self)
    }
    fn cos(self) -> Self {
        Complex::cos(self)
    }
    fn sinh(self) -> Self {
        Complex::sinh(self)
    }
    fn cosh(self) -> Self {
        Complex::cosh(self)
    }
    fn sqrt(self) -> Self {
        Complex::sqrt(self)
    }
    fn pow(self, exponent: Self) -> Self {
        // powc maps 0^w to NaN; keep 0^w = 0 for Re(w) > 0 so the Lanczos
        // split power stays finite at the origin.
        if self.re == 0.0 && self.im == 0.0 && exponent.re > 0.0 {
            return Complex::new(0.0, 0.0);
        }
        Complex::powc(self, exponent)
    }
    fn powi(self, n: i32) -> Self {
        Complex::powi(&self, n)
    }
    fn infinity() -> Self {
        Complex::new(f64::INFINITY, 0.0)
    }
}

/// Right-hand side of a fractional initial value problem y^(α)(x) = f(x, y).
pub trait FractionalSystem {
    /// Evaluates f(x, y).
    fn rhs(&self, x: f64, y: f64) -> f64;
}

impl<F> FractionalSystem for F
where
    F: Fn(f64, f64) -> f64,
{
    fn rhs(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::{FractionalSystem, Scalar};
    use num_complex::Complex;

    #[test]
    fn integer_predicates_match_for_real_and_complex() {
        assert!(Scalar::is_integer(1.0_f64));
        assert!(Scalar::is_integer(Complex::new(1.0, 0.0)));
        assert!(!Scalar::is_integer(1.1_f64));
        assert!(!Scalar::is_integer(Complex::new(1.1, 0.0)));
        assert!(!Scalar::is_integer(Complex::new(1.0, 1.0)));
        assert!(Scalar::is_positive_integer(1.0_f64));
        assert!(!Scalar::is_positive_integer(1.1_f64));
        assert!(!Scalar::is_positive_integer(-1.0_f64));
        assert!(Scalar::is_nonpositive_integer(0.0_f64));
        assert!(Scalar::is_nonpositive_integer(-3.0_f64));
        assert!(!Scalar::is_integer(f64::INFINITY));
    }

    #[test]
    fn pole_test_detects_non_finite_magnitude() {
        assert!(<f64 as Scalar>::infinity().is_pole());
        assert!(<Complex<f64> as Scalar>::infinity().is_pole());
        assert!(!Scalar::is_pole(2.0_f64));
    }

    #[test]
    fn complex_pow_of_zero_is_zero() {
        let zero = Complex::new(0.0, 0.0);
        assert_eq!(Scalar::pow(zero, Complex::new(0.5, 0.0)), zero);
    }

    #[test]
    fn closures_are_fractional_systems() {
        let system = |x: f64, y: f64| x + 2.0 * y;
        assert_eq!(system.rhs(1.0, 2.0), 5.0);
    }
}
