use std::fmt;

use crate::expression::ast::{BinaryOperator, Expression};
use crate::expression::eval::{DivisionReport, Evaluation};

fn precedence(expr: &Expression) -> u8 {
    match expr {
        Expression::Binary { operator, .. } => match operator {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply
            | BinaryOperator::Divide
            | BinaryOperator::Modulo
            | BinaryOperator::FloorDivide => 2,
            BinaryOperator::Power => 4,
        },
        Expression::Neg(_) => 3,
        // A negative literal reads like a negation
        Expression::Number(n) if n.as_f64().is_sign_negative() => 3,
        Expression::Number(_) => 5,
    }
}

fn write_with_parens(f: &mut fmt::Formatter, expr: &Expression, need_parens: bool) -> fmt::Result {
    if need_parens {
        write!(f, "(")?;
        fmt_expression(f, expr)?;
        write!(f, ")")
    } else {
        fmt_expression(f, expr)
    }
}

fn fmt_expression(f: &mut fmt::Formatter, expr: &Expression) -> fmt::Result {
    match expr {
        Expression::Number(n) => write!(f, "{}", n),
        Expression::Binary {
            operator: BinaryOperator::Power,
            left,
            right,
        } => {
            // Right-associative, and the exponent may be a bare negation
            write_with_parens(f, left, precedence(left) <= 4)?;
            write!(f, " ** ")?;
            write_with_parens(f, right, precedence(right) < 3)
        }
        Expression::Binary {
            operator,
            left,
            right,
        } => {
            let own = precedence(expr);
            write_with_parens(f, left, precedence(left) < own)?;
            write!(f, " {} ", operator.symbol())?;
            write_with_parens(f, right, precedence(right) <= own)
        }
        Expression::Neg(inner) => {
            write!(f, "-")?;
            write_with_parens(f, inner, precedence(inner) < 3)
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_expression(f, self)
    }
}

impl fmt::Display for DivisionReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ÷ {} = {} remainder {}",
            self.dividend, self.divisor, self.quotient, self.remainder
        )
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Evaluation::Number(n) => write!(f, "{}", n),
            Evaluation::Division(report) => write!(f, "{}", report),
        }
    }
}
