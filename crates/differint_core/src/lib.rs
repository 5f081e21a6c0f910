pub mod coefficients;
pub mod differintegral;
pub mod error;
pub mod expression;
pub mod fde;
pub mod mittag_leffler;
pub mod sampling;
pub mod special;
/// The `differint_core` crate provides numerical fractional calculus on uniform grids.
/// Special functions and coefficient generators are generic over real (`f64`) and
/// complex (`Complex<f64>`) scalars.
///
/// Key components:
/// - **Traits**: `Scalar` (real/complex abstraction), `FractionalSystem` (FDE right-hand sides).
/// - **Special functions**: Gamma, Beta, Pochhammer and Mittag-Leffler.
/// - **Differintegrals**: Grünwald–Letnikov (plain and interpolated) and Riemann–Liouville.
/// - **Solvers**: Fractional Adams predictor-corrector.
/// - **Expressions**: A small bytecode VM for user-defined functions.
pub mod traits;

pub use error::{DifferintError, Result};
pub use sampling::{FunctionSource, Grid, SampledFunction};
