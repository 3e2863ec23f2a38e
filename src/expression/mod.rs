//! Restricted arithmetic expressions: a closed grammar, a lexer/parser into it, and evaluation

mod ast;
pub mod constants;
mod display;
mod errors;
mod eval;
mod lexer;
mod number;
mod parser;

pub use ast::{BinaryOperator, Expression};
pub use errors::{ArithmeticError, ExpressionError};
pub use eval::{DivisionReport, Evaluation};
pub use number::Number;
pub use parser::parse;

pub(crate) use number::float_pow;

/// Parses and evaluates one line of arithmetic
///
/// # Errors
///
/// Returns an error if the line cannot be parsed into the restricted grammar, or if
/// evaluation fails (division by zero, overflow, complex result).
pub fn evaluate(input: &str) -> Result<Evaluation, ExpressionError> {
    let expr = parse(input)?;
    expr.evaluate()
}

#[cfg(test)]
mod tests;
