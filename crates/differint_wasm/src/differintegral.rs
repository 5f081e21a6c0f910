use crate::to_js_error;
use anyhow::{bail, Context};
use differint_core::differintegral::{gl, gl_point, gli, rl, rl_point};
use differint_core::expression::ExpressionFunction;
use differint_core::{FunctionSource, Grid};
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    GlPoint,
    Gl,
    Gli,
    RlPoint,
    Rl,
}

impl Method {
    fn parse(name: &str) -> anyhow::Result<Self> {
        Ok(match name {
            "gl_point" | "GLpoint" => Self::GlPoint,
            "gl" | "GL" => Self::Gl,
            "gli" | "GLI" => Self::Gli,
            "rl_point" | "RLpoint" => Self::RlPoint,
            "rl" | "RL" => Self::Rl,
            _ => bail!("Unknown differintegration method '{}'", name),
        })
    }

    fn label(self) -> &'static str {
        match self {
            Self::GlPoint => "GL point",
            Self::Gl => "GL",
            Self::Gli => "GLI",
            Self::RlPoint => "RL point",
            Self::Rl => "RL",
        }
    }
}

/// Point methods yield a single-element vector.
fn run<S>(method: Method, alpha: f64, f: &S, grid: &Grid) -> anyhow::Result<Vec<f64>>
where
    S: FunctionSource + ?Sized,
{
    let result = match method {
        Method::GlPoint => gl_point(alpha, f, grid).map(|v| vec![v]),
        Method::Gl => gl(alpha, f, grid),
        Method::Gli => gli(alpha, f, grid),
        Method::RlPoint => rl_point(alpha, f, grid).map(|v| vec![v]),
        Method::Rl => rl(alpha, f, grid),
    };
    result.with_context(|| format!("{} differintegral of order {} failed", method.label(), alpha))
}

fn build_grid(a: f64, b: f64, points: usize) -> anyhow::Result<Grid> {
    Grid::new(a, b, points).context("Invalid grid")
}

/// Differintegrates pre-computed samples taken at evenly spaced points on [a, b].
#[wasm_bindgen]
pub fn differintegrate_samples(
    method: &str,
    alpha: f64,
    values: Vec<f64>,
    a: f64,
    b: f64,
) -> Result<Vec<f64>, JsValue> {
    differintegrate_samples_inner(method, alpha, &values, a, b).map_err(to_js_error)
}

fn differintegrate_samples_inner(
    method: &str,
    alpha: f64,
    values: &[f64],
    a: f64,
    b: f64,
) -> anyhow::Result<Vec<f64>> {
    let method = Method::parse(method)?;
    let grid = build_grid(a, b, values.len())?;
    run(method, alpha, values, &grid)
}

/// A user formula f(x) that can be differintegrated over any grid.
#[wasm_bindgen]
pub struct WasmFractionalFunction {
    function: ExpressionFunction,
}

#[wasm_bindgen]
impl WasmFractionalFunction {
    #[wasm_bindgen(constructor)]
    pub fn new(
        expression: &str,
        params: Vec<f64>,
        param_names: Vec<String>,
    ) -> Result<WasmFractionalFunction, JsValue> {
        console_error_panic_hook::set_once();
        let function = ExpressionFunction::compile(expression, params, &param_names)
            .with_context(|| format!("Failed to compile '{}'", expression))
            .map_err(to_js_error)?;
        Ok(WasmFractionalFunction { function })
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.function.eval(x)
    }

    pub fn gl_point(&self, alpha: f64, a: f64, b: f64, points: usize) -> Result<f64, JsValue> {
        self.scalar(Method::GlPoint, alpha, a, b, points)
    }

    pub fn gl(&self, alpha: f64, a: f64, b: f64, points: usize) -> Result<Vec<f64>, JsValue> {
        self.sequence(Method::Gl, alpha, a, b, points)
    }

    pub fn gli(&self, alpha: f64, a: f64, b: f64, points: usize) -> Result<Vec<f64>, JsValue> {
        self.sequence(Method::Gli, alpha, a, b, points)
    }

    pub fn rl_point(&self, alpha: f64, a: f64, b: f64, points: usize) -> Result<f64, JsValue> {
        self.scalar(Method::RlPoint, alpha, a, b, points)
    }

    pub fn rl(&self, alpha: f64, a: f64, b: f64, points: usize) -> Result<Vec<f64>, JsValue> {
        self.sequence(Method::Rl, alpha, a, b, points)
    }
}

impl WasmFractionalFunction {
    fn compute(&self, method: Method, alpha: f64, a: f64, b: f64, points: usize) -> anyhow::Result<Vec<f64>> {
        let grid = build_grid(a, b, points)?;
        run(method, alpha, &self.function, &grid)
    }

    fn sequence(&self, method: Method, alpha: f64, a: f64, b: f64, points: usize) -> Result<Vec<f64>, JsValue> {
        self.compute(method, alpha, a, b, points).map_err(to_js_error)
    }

    fn scalar(&self, method: Method, alpha: f64, a: f64, b: f64, points: usize) -> Result<f64, JsValue> {
        let values = self.sequence(method, alpha, a, b, points)?;
        Ok(values[0])
    }
}
