use crate::expression::number::Number;

/// The binary operators the evaluator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    FloorDivide,
    Power,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::FloorDivide => "//",
            BinaryOperator::Power => "**",
        }
    }
}

/// Arithmetic expression tree: literals, negation and whitelisted binary operators only
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(Number),
    Binary {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Neg(Box<Expression>),
}

impl Expression {
    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn negate(inner: Expression) -> Self {
        Expression::Neg(Box::new(inner))
    }
}
