//! Calcmenu - An interactive menu calculator built around a restricted expression evaluator
//!
//! Expressions are parsed into a closed grammar of numeric literals, negation and a fixed
//! set of binary operators, so no input can reach anything beyond plain arithmetic.

pub mod expression;
pub mod menu;
pub mod operations;
pub mod settings;

// Re-export the main public API
pub use expression::{
    ArithmeticError, BinaryOperator, DivisionReport, Evaluation, Expression, ExpressionError,
    Number, evaluate, parse,
};
pub use menu::{MenuError, Session};
pub use operations::OperationError;
pub use settings::{Settings, SettingsError, SettingsStore};

/// Evaluate a line of arithmetic and render it the way the calculator prints it
///
/// Successful results are rendered with their `Display` form; failures are rendered
/// as `"Error: {message}"`.
///
/// # Examples
///
/// ```
/// use calcmenu::evaluate_to_string;
///
/// assert_eq!(evaluate_to_string("2+2"), "4");
/// assert_eq!(evaluate_to_string("7/2"), "7 ÷ 2 = 3 remainder 1");
/// assert_eq!(evaluate_to_string("foo(1)"), "Error: Expression not allowed");
/// ```
pub fn evaluate_to_string(input: &str) -> String {
    match evaluate(input) {
        Ok(result) => result.to_string(),
        Err(e) => format!("Error: {}", e),
    }
}
