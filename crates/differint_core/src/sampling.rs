//! Uniform grids and the adapter that turns callables or pre-sampled data into
//! grid-aligned function values.

use crate::error::{DifferintError, Result};
use serde::{Deserialize, Serialize};

/// Uniform grid of `points` samples covering `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    lower: f64,
    upper: f64,
    points: usize,
}

impl Grid {
    pub const MIN_POINTS: usize = 2;

    /// Validates and builds a grid. Requires finite bounds with lower < upper
    /// and at least two points.
    pub fn new(lower: f64, upper: f64, points: usize) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(DifferintError::InvalidGrid { lower, upper });
        }
        if points < Self::MIN_POINTS {
            return Err(DifferintError::TooFewPoints {
                got: points,
                min: Self::MIN_POINTS,
            });
        }
        Ok(Self {
            lower,
            upper,
            points,
        })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn len(&self) -> usize {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points == 0
    }

    pub fn step_size(&self) -> f64 {
        (self.upper - self.lower) / (self.points - 1) as f64
    }

    /// The i-th grid point. The last point is exactly `upper`.
    pub fn point(&self, index: usize) -> f64 {
        if index + 1 == self.points {
            self.upper
        } else {
            self.lower + index as f64 * self.step_size()
        }
    }

    pub fn points(&self) -> Vec<f64> {
        (0..self.points).map(|i| self.point(i)).collect()
    }
}

/// Function values aligned to a grid, together with the grid step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledFunction {
    pub values: Vec<f64>,
    pub step_size: f64,
}

impl SampledFunction {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Anything that can be turned into samples on a [`Grid`].
///
/// Callables are evaluated at every grid point; pre-sampled data must already
/// have exactly one value per grid point.
pub trait FunctionSource {
    fn sample(&self, grid: &Grid) -> Result<SampledFunction>;
}

impl<F> FunctionSource for F
where
    F: Fn(f64) -> f64,
{
    fn sample(&self, grid: &Grid) -> Result<SampledFunction> {
        Ok(SampledFunction {
            values: (0..grid.len()).map(|i| self(grid.point(i))).collect(),
            step_size: grid.step_size(),
        })
    }
}

impl FunctionSource for [f64] {
    fn sample(&self, grid: &Grid) -> Result<SampledFunction> {
        if self.len() != grid.len() {
            return Err(DifferintError::ShapeMismatch {
                expected: grid.len(),
                got: self.len(),
            });
        }
        Ok(SampledFunction {
            values: self.to_vec(),
            step_size: grid.step_size(),
        })
    }
}

impl FunctionSource for Vec<f64> {
    fn sample(&self, grid: &Grid) -> Result<SampledFunction> {
        self.as_slice().sample(grid)
    }
}

/// Rejects non-finite differintegration orders.
pub fn validate_order(alpha: f64) -> Result<()> {
    if !alpha.is_finite() {
        return Err(DifferintError::InvalidOrder(format!(
            "order must be finite, got {alpha}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_order, FunctionSource, Grid};
    use crate::error::DifferintError;

    #[test]
    fn grid_rejects_degenerate_bounds() {
        assert_eq!(
            Grid::new(1.0, 1.0, 10),
            Err(DifferintError::InvalidGrid {
                lower: 1.0,
                upper: 1.0
            })
        );
        assert!(Grid::new(2.0, 1.0, 10).is_err());
        assert!(Grid::new(0.0, f64::INFINITY, 10).is_err());
        assert!(Grid::new(f64::NAN, 1.0, 10).is_err());
        assert_eq!(
            Grid::new(0.0, 1.0, 1),
            Err(DifferintError::TooFewPoints { got: 1, min: 2 })
        );
    }

    #[test]
    fn grid_points_are_uniform_and_end_on_upper() {
        let grid = Grid::new(0.0, 1.0, 5).expect("grid");
        assert_eq!(grid.step_size(), 0.25);
        assert_eq!(grid.points(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let grid = Grid::new(0.0, 1.0, 512).expect("grid");
        assert_eq!(grid.point(511), 1.0);
    }

    #[test]
    fn callable_and_samples_produce_identical_shapes() {
        let n = 512;
        let grid = Grid::new(0.0, 1.0, n).expect("grid");
        let f = |x: f64| 2.0 * (3.0 * x).exp() * x - x * x + x - 5.0;

        let from_callable = f.sample(&grid).expect("callable");
        let from_samples = vec![1.0; n].sample(&grid).expect("samples");

        assert_eq!(from_callable.len(), n);
        assert_eq!(from_samples.len(), n);
        assert_eq!(from_callable.step_size, 1.0 / (n - 1) as f64);
        assert_eq!(from_callable.step_size, from_samples.step_size);
    }

    #[test]
    fn sample_length_mismatch_is_an_error() {
        let grid = Grid::new(0.0, 1.0, 10).expect("grid");
        let values = vec![0.0; 9];
        assert_eq!(
            values.as_slice().sample(&grid),
            Err(DifferintError::ShapeMismatch {
                expected: 10,
                got: 9
            })
        );
    }

    #[test]
    fn order_must_be_finite() {
        assert!(validate_order(0.5).is_ok());
        assert!(validate_order(-1.5).is_ok());
        assert!(validate_order(f64::NAN).is_err());
        assert!(validate_order(f64::INFINITY).is_err());
    }
}
