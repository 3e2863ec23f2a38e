use log::debug;

use crate::expression::ast::{BinaryOperator, Expression};
use crate::expression::constants::{MAX_NESTING_DEPTH, MAX_TREE_DEPTH};
use crate::expression::errors::ExpressionError;
use crate::expression::lexer::{Token, TokenKind, tokenize};

/// Parses one line into the closed expression grammar
///
/// ```text
/// expr   := term (('+' | '-') term)*
/// term   := factor (('*' | '/' | '%' | '//') factor)*
/// factor := '-' factor | power
/// power  := atom ('**' factor)?
/// atom   := NUMBER | '(' expr ')'
/// ```
///
/// # Errors
///
/// Returns an error when the input is malformed or uses anything outside the grammar:
/// - `UnsupportedOperator` for binary operators outside the whitelist
/// - `UnsupportedLiteral` for string, boolean, `None` and imaginary literals
/// - `UnsupportedConstruct` for names, calls, comparisons and every other construct
/// - `InvalidSyntax` for input that is not an expression at all
/// - `NestingTooDeep` when groups, negations or exponents nest beyond `MAX_NESTING_DEPTH`
/// - `ExpressionTooLong` when the tree would grow taller than `MAX_TREE_DEPTH`
pub fn parse(input: &str) -> Result<Expression, ExpressionError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        recursion: 0,
    };

    let tree = parser.expr()?;
    let trailing = parser.peek();
    if trailing.kind != TokenKind::End {
        return Err(reject(trailing));
    }

    debug!("Parsed '{}' into tree of depth {}", input, tree.depth);
    Ok(tree.expr)
}

/// A parsed subtree together with its height
struct Subtree {
    expr: Expression,
    depth: usize,
}

impl Subtree {
    fn leaf(expr: Expression) -> Self {
        Subtree { expr, depth: 1 }
    }

    fn join(operator: BinaryOperator, left: Subtree, right: Subtree) -> Result<Self, ExpressionError> {
        let depth = left.depth.max(right.depth) + 1;
        check_tree_depth(depth)?;
        Ok(Subtree {
            expr: Expression::binary(operator, left.expr, right.expr),
            depth,
        })
    }

    fn negate(inner: Subtree) -> Result<Self, ExpressionError> {
        let depth = inner.depth + 1;
        check_tree_depth(depth)?;
        Ok(Subtree {
            expr: Expression::negate(inner.expr),
            depth,
        })
    }
}

fn check_tree_depth(depth: usize) -> Result<(), ExpressionError> {
    if depth > MAX_TREE_DEPTH {
        debug!("Rejecting expression tree {} levels tall", depth);
        return Err(ExpressionError::ExpressionTooLong {
            limit: MAX_TREE_DEPTH,
        });
    }
    Ok(())
}

/// Classifies a token that cannot continue the expression
fn reject(token: &Token) -> ExpressionError {
    match &token.kind {
        TokenKind::Operator(op) => ExpressionError::UnsupportedOperator {
            operator: (*op).to_string(),
        },
        TokenKind::Comparison(_) => ExpressionError::UnsupportedConstruct {
            construct: "comparison",
        },
        TokenKind::Punct(',') => ExpressionError::UnsupportedConstruct { construct: "tuple" },
        TokenKind::Punct('.') => ExpressionError::UnsupportedConstruct {
            construct: "attribute access",
        },
        TokenKind::Punct('[') => ExpressionError::UnsupportedConstruct {
            construct: "subscript",
        },
        TokenKind::LeftParen => ExpressionError::UnsupportedConstruct {
            construct: "function call",
        },
        TokenKind::Ident(word) => match word.as_str() {
            "and" | "or" | "not" | "in" | "is" => ExpressionError::UnsupportedConstruct {
                construct: "boolean operator",
            },
            "if" | "else" | "for" | "lambda" => ExpressionError::UnsupportedConstruct {
                construct: "compound expression",
            },
            _ => ExpressionError::InvalidSyntax {
                column: token.column,
            },
        },
        _ => ExpressionError::InvalidSyntax {
            column: token.column,
        },
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    recursion: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // `tokenize` always ends the stream with `End`, and `advance` never moves past it
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn descend(&mut self) -> Result<(), ExpressionError> {
        self.recursion += 1;
        if self.recursion > MAX_NESTING_DEPTH {
            debug!("Rejecting expression nested {} levels deep", self.recursion);
            return Err(ExpressionError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.recursion = self.recursion.saturating_sub(1);
    }

    fn expr(&mut self) -> Result<Subtree, ExpressionError> {
        let mut left = self.term()?;
        loop {
            let operator = match self.peek().kind {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Subtract,
                _ => break,
            };
            self.advance();
            let right = self.term()?;
            left = Subtree::join(operator, left, right)?;
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Subtree, ExpressionError> {
        let mut left = self.factor()?;
        loop {
            let operator = match self.peek().kind {
                TokenKind::Star => BinaryOperator::Multiply,
                TokenKind::Slash => BinaryOperator::Divide,
                TokenKind::Percent => BinaryOperator::Modulo,
                TokenKind::DoubleSlash => BinaryOperator::FloorDivide,
                _ => break,
            };
            self.advance();
            let right = self.factor()?;
            left = Subtree::join(operator, left, right)?;
        }
        Ok(left)
    }

    fn factor(&mut self) -> Result<Subtree, ExpressionError> {
        match self.peek().kind {
            TokenKind::Minus => {
                self.advance();
                self.descend()?;
                let inner = self.factor()?;
                self.ascend();
                Subtree::negate(inner)
            }
            TokenKind::Plus => Err(ExpressionError::UnsupportedConstruct {
                construct: "unary plus",
            }),
            TokenKind::Tilde => Err(ExpressionError::UnsupportedConstruct {
                construct: "bitwise inversion",
            }),
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Subtree, ExpressionError> {
        let base = self.atom()?;
        if self.peek().kind != TokenKind::DoubleStar {
            return Ok(base);
        }

        self.advance();
        self.descend()?;
        let exponent = self.factor()?;
        self.ascend();
        Subtree::join(BinaryOperator::Power, base, exponent)
    }

    fn atom(&mut self) -> Result<Subtree, ExpressionError> {
        let token = self.peek().clone();
        let atom = match token.kind {
            TokenKind::Number(value) => {
                self.advance();
                Subtree::leaf(Expression::Number(value))
            }
            TokenKind::LeftParen => {
                self.advance();
                if self.peek().kind == TokenKind::RightParen {
                    return Err(ExpressionError::UnsupportedConstruct { construct: "tuple" });
                }
                self.descend()?;
                let inner = self.expr()?;
                self.ascend();
                if self.peek().kind != TokenKind::RightParen {
                    return Err(reject(self.peek()));
                }
                self.advance();
                inner
            }
            TokenKind::Foreign(literal) => {
                return Err(ExpressionError::UnsupportedLiteral { literal });
            }
            TokenKind::Ident(word) => return Err(reject_word(word)),
            TokenKind::Punct('[') => {
                return Err(ExpressionError::UnsupportedConstruct { construct: "list" });
            }
            TokenKind::Punct('{') => {
                return Err(ExpressionError::UnsupportedConstruct {
                    construct: "dict or set",
                });
            }
            _ => {
                return Err(ExpressionError::InvalidSyntax {
                    column: token.column,
                });
            }
        };

        // Calls, attribute access and subscripts on a literal or group
        match self.peek().kind {
            TokenKind::LeftParen | TokenKind::Punct('.') | TokenKind::Punct('[') => {
                Err(reject(self.peek()))
            }
            _ => Ok(atom),
        }
    }
}

fn reject_word(word: String) -> ExpressionError {
    match word.as_str() {
        "True" | "False" | "None" => ExpressionError::UnsupportedLiteral { literal: word },
        "not" => ExpressionError::UnsupportedConstruct {
            construct: "boolean operator",
        },
        "lambda" => ExpressionError::UnsupportedConstruct {
            construct: "compound expression",
        },
        _ => ExpressionError::UnsupportedConstruct { construct: "name" },
    }
}
