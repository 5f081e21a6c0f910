mod differintegral;
mod solver;
mod special;

pub use differintegral::{differintegrate_samples, WasmFractionalFunction};
pub use solver::WasmFdeSolver;
pub use special::{gamma, gl_coefficients, mittag_leffler, pochhammer, rl_matrix};

use wasm_bindgen::JsValue;

pub(crate) fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}
