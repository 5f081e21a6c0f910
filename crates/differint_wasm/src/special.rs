use differint_core::coefficients;
use differint_core::mittag_leffler::{mittag_leffler_slice, MittagLefflerSettings};
use differint_core::special;
use num_complex::Complex;
use wasm_bindgen::prelude::*;

/// Complex Gamma. Returns `[re, im]`.
#[wasm_bindgen]
pub fn gamma(re: f64, im: f64) -> Vec<f64> {
    if im == 0.0 {
        return vec![special::gamma(re), 0.0];
    }
    let value = special::gamma(Complex::new(re, im));
    vec![value.re, value.im]
}

#[wasm_bindgen]
pub fn pochhammer(x: f64, n: f64) -> f64 {
    special::poch(x, n)
}

#[wasm_bindgen]
pub fn gl_coefficients(alpha: f64, n: usize) -> Vec<f64> {
    coefficients::gl_coefficients(alpha, n)
}

/// Riemann-Liouville weight matrix flattened row by row.
#[wasm_bindgen]
pub fn rl_matrix(alpha: f64, n: usize) -> Vec<f64> {
    let matrix = coefficients::rl_matrix(alpha, n);
    let mut flat = Vec::with_capacity(n * n);
    for row in matrix.row_iter() {
        flat.extend(row.iter().copied());
    }
    flat
}

#[wasm_bindgen]
pub fn mittag_leffler(alpha: f64, beta: f64, z: Vec<f64>, ignore_special_cases: bool) -> Vec<f64> {
    let settings = MittagLefflerSettings {
        ignore_special_cases,
        ..MittagLefflerSettings::default()
    };
    mittag_leffler_slice(alpha, beta, &z, &settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamma_splits_real_and_imaginary_parts() {
        assert_eq!(gamma(6.0, 0.0), vec![120.0, 0.0]);
        let value = gamma(0.0, 1.0);
        assert!((value[0] + 0.154_949_828).abs() < 1e-6);
        assert!((value[1] + 0.498_015_668).abs() < 1e-6);
    }

    #[test]
    fn rl_matrix_is_row_major() {
        let n = 4;
        let flat = rl_matrix(0.5, n);
        assert_eq!(flat.len(), n * n);
        let matrix = coefficients::rl_matrix(0.5, n);
        assert_eq!(flat[n + 1], matrix[(1, 1)]);
        assert_eq!(flat[n * 3], matrix[(3, 0)]);
        assert_eq!(flat[1], 0.0);
    }

    #[test]
    fn mittag_leffler_forwards_override() {
        let closed = mittag_leffler(1.0, 1.0, vec![0.5, 1.0], false);
        let series = mittag_leffler(1.0, 1.0, vec![0.5, 1.0], true);
        assert!((closed[1] - std::f64::consts::E).abs() < 1e-15);
        assert!((series[0] - closed[0]).abs() < 1e-12);
        assert!((series[1] - closed[1]).abs() < 1e-12);
    }

    #[test]
    fn pochhammer_and_coefficients() {
        assert_eq!(pochhammer(1.0, 5.0), 120.0);
        let coefficients = gl_coefficients(0.5, 3);
        assert_eq!(coefficients.len(), 4);
        assert_eq!(coefficients[0], 1.0);
        assert!((coefficients[1] + 0.5).abs() < 1e-15);
    }
}
