use crate::to_js_error;
use anyhow::Context;
use differint_core::expression::ExpressionSystem;
use differint_core::fde::pc_solve;
use differint_core::Grid;
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, Serialize)]
struct FdeSolution {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Predictor-corrector solver for y^(α) = f(x, y) with a user formula in `x`, `y`.
#[wasm_bindgen]
pub struct WasmFdeSolver {
    system: ExpressionSystem,
}

#[wasm_bindgen]
impl WasmFdeSolver {
    #[wasm_bindgen(constructor)]
    pub fn new(
        expression: &str,
        params: Vec<f64>,
        param_names: Vec<String>,
    ) -> Result<WasmFdeSolver, JsValue> {
        console_error_panic_hook::set_once();
        let system = ExpressionSystem::compile(expression, params, &param_names)
            .with_context(|| format!("Failed to compile '{}'", expression))
            .map_err(to_js_error)?;
        Ok(WasmFdeSolver { system })
    }

    /// Solution values at `points` evenly spaced abscissae on [a, b].
    pub fn solve(
        &self,
        initial_values: Vec<f64>,
        alpha: f64,
        a: f64,
        b: f64,
        points: usize,
    ) -> Result<Vec<f64>, JsValue> {
        self.solve_inner(&initial_values, alpha, a, b, points)
            .map(|solution| solution.y)
            .map_err(to_js_error)
    }

    /// Same as `solve` but returns `{ x, y }` with the grid abscissae.
    pub fn solve_with_grid(
        &self,
        initial_values: Vec<f64>,
        alpha: f64,
        a: f64,
        b: f64,
        points: usize,
    ) -> Result<JsValue, JsValue> {
        let solution = self
            .solve_inner(&initial_values, alpha, a, b, points)
            .map_err(to_js_error)?;
        to_value(&solution).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

impl WasmFdeSolver {
    fn solve_inner(
        &self,
        initial_values: &[f64],
        alpha: f64,
        a: f64,
        b: f64,
        points: usize,
    ) -> anyhow::Result<FdeSolution> {
        let grid = Grid::new(a, b, points).context("Invalid grid")?;
        let y = pc_solve(initial_values, alpha, &self.system, &grid)
            .with_context(|| format!("Predictor-corrector of order {} failed", alpha))?;
        Ok(FdeSolution { x: grid.points(), y })
    }
}
