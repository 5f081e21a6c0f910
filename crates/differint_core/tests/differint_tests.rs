use differint_core::coefficients::{gl_coefficients, rl_matrix, InterpolationStencil};
use differint_core::differintegral::{gl, gl_point, gli, rl, rl_point};
use differint_core::expression::{ExpressionFunction, ExpressionSystem};
use differint_core::fde::pc_solve;
use differint_core::mittag_leffler::{mittag_leffler_slice, MittagLefflerSettings};
use differint_core::special::{gamma, poch};
use differint_core::{DifferintError, FunctionSource, Grid};
use num_complex::Complex;

const SQRT_PI_2: f64 = 0.886_226_925_452_757_9;
const POLY_HALF: f64 = 0.940_315_972_58;
const TEST_N: usize = 512;

fn unit_grid(points: usize) -> Grid {
    Grid::new(0.0, 1.0, points).expect("unit grid")
}

fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

#[test]
fn gamma_reference_values() {
    assert_eq!(gamma(6.0_f64), 120.0);
    assert_eq!(gamma(-2.0_f64), f64::INFINITY);
    assert!((gamma(1.25_f64) - 0.906_402_477_055_476_9).abs() <= 1e-12);
    let value = gamma(Complex::new(0.0, 1.0));
    assert_eq!((value.re * 1e4).round() / 1e4, -0.1549);
    assert_eq!((value.im * 1e4).round() / 1e4, -0.498);
}

#[test]
fn pochhammer_reference_values() {
    assert_eq!(poch(1.0_f64, 5.0), 120.0);
    assert_eq!(poch(-1.0_f64, 3.0), 0.0);
    assert_eq!(poch(-1.5_f64, 0.5), f64::INFINITY);
    assert_eq!(poch(-10.0_f64, 2.0), 90.0);
    let value = poch(Complex::new(0.0, 1.0), Complex::new(1.0, 0.0));
    assert!((value - Complex::new(0.0, 1.0)).norm() < 1e-3);
}

#[test]
fn coefficient_array_size() {
    assert_eq!(gl_coefficients(0.5_f64, 20).len() - 1, 20);
}

#[test]
fn interpolant_coefficients() {
    let stencil = InterpolationStencil::unit();
    assert_eq!(stencil.prv, -0.125);
    assert_eq!(stencil.crr, 0.75);
    assert_eq!(stencil.nxt, 0.375);
}

#[test]
fn sampling_treats_callables_and_arrays_alike() {
    let grid = unit_grid(TEST_N);
    let callable = |x: f64| 2.0 * (3.0 * x).exp() * x - x * x + x - 5.0;
    let from_callable = callable.sample(&grid).expect("callable");
    let from_array = vec![1.0; TEST_N].sample(&grid).expect("array");
    let step = 1.0 / (TEST_N - 1) as f64;

    assert_eq!(from_callable.len(), TEST_N);
    assert_eq!(from_array.len(), TEST_N);
    assert_eq!(from_callable.step_size, step);
    assert_eq!(from_array.step_size, step);
}

#[test]
fn validator_rejects_bad_input() {
    assert!(Grid::new(0.0, 1.0, 1).is_err());
    assert!(Grid::new(1.0, 0.0, 100).is_err());
    let grid = unit_grid(10);
    assert!(matches!(
        gl(0.5, vec![0.0; 11].as_slice(), &grid),
        Err(DifferintError::ShapeMismatch { expected: 10, got: 11 })
    ));
}

#[test]
fn result_lengths() {
    let grid = unit_grid(TEST_N);
    let sqrt = |x: f64| x.sqrt();
    assert_eq!(gl(0.5, &sqrt, &grid).expect("gl").len(), TEST_N);
    assert_eq!(gli(0.5, &sqrt, &grid).expect("gli").len(), TEST_N);
    assert_eq!(rl(0.5, &sqrt, &grid).expect("rl").len(), TEST_N);
    assert_eq!(rl_matrix(0.4, TEST_N).shape(), (TEST_N, TEST_N));
}

#[test]
fn point_evaluators_accuracy() {
    let grid = unit_grid(1024);
    let sqrt = |x: f64| x.powf(0.5);
    let poly = |x: f64| x * x - 1.0;
    assert!((gl_point(0.5, &sqrt, &grid).expect("gl point") - SQRT_PI_2).abs() <= 1e-3);
    assert!((gl_point(0.5, &poly, &grid).expect("gl point") - POLY_HALF).abs() <= 1e-3);
    assert!((rl_point(0.5, &sqrt, &grid).expect("rl point") - SQRT_PI_2).abs() <= 1e-3);
    assert!((rl_point(0.5, &poly, &grid).expect("rl point") - POLY_HALF).abs() <= 1e-2);
}

#[test]
fn sequence_endpoints_accuracy() {
    let grid = unit_grid(TEST_N);
    let sqrt = |x: f64| x.sqrt();
    let last = TEST_N - 1;
    assert!((gl(0.5, &sqrt, &grid).expect("gl")[last] - SQRT_PI_2).abs() <= 1e-4);
    assert!((gli(0.5, &sqrt, &grid).expect("gli")[last] - SQRT_PI_2).abs() <= 1e-4);
    assert!((rl(0.5, &sqrt, &grid).expect("rl")[last] - SQRT_PI_2).abs() <= 1e-4);
}

#[test]
fn compiled_expression_matches_closure() {
    let grid = unit_grid(TEST_N);
    let compiled = ExpressionFunction::compile("sqrt(x)", Vec::new(), &[]).expect("compile");
    let from_expr = gl(0.5, &compiled, &grid).expect("gl");
    let from_closure = gl(0.5, &|x: f64| x.sqrt(), &grid).expect("gl");
    assert!(max_abs_diff(&from_expr, &from_closure) < 1e-12);
}

#[test]
fn mittag_leffler_series_matches_closed_forms() {
    let series = MittagLefflerSettings::series_only();
    let xs: Vec<f64> = (0..100).map(|i| i as f64 * 0.1).collect();

    let cosh_root: Vec<f64> = xs.iter().map(|x| x.sqrt().cosh()).collect();
    assert!(max_abs_diff(&mittag_leffler_slice(2.0, 1.0, &xs, &series), &cosh_root) <= 1e-3);

    let exponential: Vec<f64> = xs.iter().map(|x| x.exp()).collect();
    assert!(max_abs_diff(&mittag_leffler_slice(1.0, 1.0, &xs, &series), &exponential) <= 1e-3);

    let xs: Vec<f64> = (0..20).map(|i| i as f64 * 0.05).collect();
    let geometric: Vec<f64> = xs.iter().map(|x| 1.0 / (1.0 - x)).collect();
    assert!(max_abs_diff(&mittag_leffler_slice(0.0, 1.0, &xs, &series), &geometric) <= 1e-3);
}

#[test]
fn pc_solution_linear() {
    let grid = unit_grid(100);
    let y = pc_solve(&[1.0, 1.0], 1.5, &|x: f64, y: f64| y - x - 1.0, &grid).expect("solve");
    let expected: Vec<f64> = grid.points().iter().map(|x| x + 1.0).collect();
    assert!(max_abs_diff(&y, &expected) <= 1e-2);
}

#[test]
fn pc_solution_three_halves_power() {
    let grid = unit_grid(100);
    let g = gamma(6.5_f64) / 24.0;
    let rhs = move |x: f64, y: f64| g * x.powi(4) + x.powf(11.0) - y * y;
    let y = pc_solve(&[0.0, 0.0], 1.5, &rhs, &grid).expect("solve");
    let expected: Vec<f64> = grid.points().iter().map(|x| x.powf(5.5)).collect();
    assert!(max_abs_diff(&y, &expected) <= 1e-2);
}

#[test]
fn pc_solution_mittag_leffler() {
    let grid = unit_grid(100);
    let y = pc_solve(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0], 5.5, &|_x: f64, y: f64| y, &grid)
        .expect("solve");
    let arguments: Vec<f64> = grid.points().iter().map(|x| x.powf(5.5)).collect();
    let expected = mittag_leffler_slice(5.5, 1.0, &arguments, &MittagLefflerSettings::default());
    assert!(max_abs_diff(&y, &expected) <= 1e-2);
}

#[test]
fn pc_solution_from_compiled_system() {
    let grid = unit_grid(100);
    let system = ExpressionSystem::compile("y - x - c", vec![1.0], &["c".to_string()])
        .expect("compile");
    let y = pc_solve(&[1.0, 1.0], 1.5, &system, &grid).expect("solve");
    let expected: Vec<f64> = grid.points().iter().map(|x| x + 1.0).collect();
    assert!(max_abs_diff(&y, &expected) <= 1e-2);
}
