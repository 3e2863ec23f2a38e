use thiserror::Error;

use crate::expression::ArithmeticError;

/// Errors that can occur in the menu calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperationError {
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    #[error("number must be positive, got {value}")]
    NonPositive { value: i64 },
    #[error("root degree must be at least 1")]
    InvalidDegree,
    #[error("cannot round {value} to an integer")]
    NotRepresentable { value: f64 },
}
