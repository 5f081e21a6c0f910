use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DifferintError {
    #[error("Invalid grid: lower bound {lower} must be finite and smaller than upper bound {upper}")]
    InvalidGrid { lower: f64, upper: f64 },

    #[error("Too few grid points: got {got}, need at least {min}")]
    TooFewPoints { got: usize, min: usize },

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Shape mismatch: expected {expected} values, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Expression error: {0}")]
    Expression(String),
}

pub type Result<T> = std::result::Result<T, DifferintError>;
