use log::debug;

use crate::expression::ast::{BinaryOperator, Expression};
use crate::expression::errors::{ArithmeticError, ExpressionError};
use crate::expression::number::Number;

/// Quotient and remainder produced by the `/` operator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivisionReport {
    pub dividend: Number,
    pub divisor: Number,
    pub quotient: Number,
    pub remainder: Number,
}

/// Outcome of evaluating an expression tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    Number(Number),
    /// `/` reports floor quotient and remainder instead of a plain number
    Division(DivisionReport),
}

impl Evaluation {
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Evaluation::Number(n) => Some(*n),
            Evaluation::Division(_) => None,
        }
    }

    fn into_operand(self) -> Result<Number, ExpressionError> {
        self.as_number().ok_or(ExpressionError::NonNumericOperand)
    }
}

impl BinaryOperator {
    fn apply(self, left: Number, right: Number) -> Result<Evaluation, ArithmeticError> {
        let value = match self {
            BinaryOperator::Add => left.checked_add(right)?,
            BinaryOperator::Subtract => left.checked_sub(right)?,
            BinaryOperator::Multiply => left.checked_mul(right)?,
            BinaryOperator::Divide => {
                let (quotient, remainder) = left.div_mod(right)?;
                return Ok(Evaluation::Division(DivisionReport {
                    dividend: left,
                    divisor: right,
                    quotient,
                    remainder,
                }));
            }
            BinaryOperator::Modulo => left.floor_mod(right)?,
            BinaryOperator::FloorDivide => left.floor_div(right)?,
            BinaryOperator::Power => left.pow(right)?,
        };
        Ok(Evaluation::Number(value))
    }
}

impl Expression {
    /// # Errors
    ///
    /// Returns an error when:
    /// - Dividing, taking a modulo or floor-dividing by zero
    /// - An integer operation overflows `i64` or a float power overflows `f64`
    /// - Raising a negative base to a fractional exponent (complex result)
    /// - Raising zero to a negative power
    /// - A division report is used as an operand
    pub fn evaluate(&self) -> Result<Evaluation, ExpressionError> {
        debug!("Evaluating expression: {}", self);

        let result = match self {
            Expression::Number(n) => Ok(Evaluation::Number(*n)),
            Expression::Binary {
                operator,
                left,
                right,
            } => {
                let left = left.evaluate()?.into_operand()?;
                let right = right.evaluate()?.into_operand()?;
                operator.apply(left, right).map_err(ExpressionError::from)
            }
            Expression::Neg(inner) => {
                let value = inner.evaluate()?.into_operand()?;
                value
                    .checked_neg()
                    .map(Evaluation::Number)
                    .map_err(ExpressionError::from)
            }
        };

        match &result {
            Ok(value) => debug!("Expression evaluated to: {}", value),
            Err(e) => debug!("Expression evaluation failed: {}", e),
        }

        result
    }
}
