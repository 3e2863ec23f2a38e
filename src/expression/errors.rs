use thiserror::Error;

/// Numeric failures raised while applying an operator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("numerical result out of range")]
    Overflow,
    #[error("complex result from negative base with fractional exponent")]
    ComplexResult,
    #[error("zero cannot be raised to a negative power")]
    ZeroToNegativePower,
}

/// Errors that can occur while parsing or evaluating an expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("invalid syntax at column {column}")]
    InvalidSyntax { column: usize },
    #[error("Operator not allowed")]
    UnsupportedOperator { operator: String },
    #[error("Only numbers are allowed")]
    UnsupportedLiteral { literal: String },
    #[error("Expression not allowed")]
    UnsupportedConstruct { construct: &'static str },
    #[error("expression nested too deeply (limit {limit})")]
    NestingTooDeep { limit: usize },
    #[error("expression too long (limit {limit} chained operations)")]
    ExpressionTooLong { limit: usize },
    #[error("a division result cannot be used as an operand")]
    NonNumericOperand,
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

impl ExpressionError {
    /// Whether the failure happened while computing rather than while reading the input
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, ExpressionError::Arithmetic(_))
    }
}
