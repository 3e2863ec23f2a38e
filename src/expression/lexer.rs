use log::debug;

use crate::expression::errors::{ArithmeticError, ExpressionError};
use crate::expression::number::Number;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(Number),
    /// Literal the grammar recognises only to reject it (strings, imaginary numbers)
    Foreign(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    LeftParen,
    RightParen,
    /// Binary operator outside the whitelist: `& | ^ << >> @`
    Operator(&'static str),
    /// `== != < <= > >=`
    Comparison(&'static str),
    Tilde,
    Punct(char),
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based column of the first character
    pub column: usize,
}

/// Splits an expression line into tokens, always terminated by `TokenKind::End`
///
/// # Errors
///
/// Returns `InvalidSyntax` for characters and literals outside the lexical grammar,
/// and `Overflow` for integer literals that do not fit in an `i64`.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut lexer = Lexer {
        chars: input.chars().collect(),
        pos: 0,
    };
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::End;
        tokens.push(token);
        if done {
            break;
        }
    }

    debug!("Tokenized '{}' into {} tokens", input, tokens.len());
    Ok(tokens)
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn syntax_error(&self, pos: usize) -> ExpressionError {
        ExpressionError::InvalidSyntax { column: pos + 1 }
    }

    fn next_token(&mut self) -> Result<Token, ExpressionError> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }

        let start = self.pos;
        let kind = match self.peek() {
            None => TokenKind::End,
            Some(c) if c.is_ascii_digit() => self.scan_number()?,
            Some('.') if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.scan_number()?
            }
            Some(c) if c.is_alphabetic() || c == '_' => self.scan_ident(),
            Some(quote @ ('"' | '\'')) => self.scan_string(quote)?,
            Some(_) => self.scan_symbol()?,
        };

        Ok(Token {
            kind,
            column: start + 1,
        })
    }

    fn scan_symbol(&mut self) -> Result<TokenKind, ExpressionError> {
        let start = self.pos;
        let c = self.bump().ok_or_else(|| self.syntax_error(start))?;

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' if self.eat('*') => TokenKind::DoubleStar,
            '*' => TokenKind::Star,
            '/' if self.eat('/') => TokenKind::DoubleSlash,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '&' => TokenKind::Operator("&"),
            '|' => TokenKind::Operator("|"),
            '^' => TokenKind::Operator("^"),
            '@' => TokenKind::Operator("@"),
            '~' => TokenKind::Tilde,
            '<' if self.eat('<') => TokenKind::Operator("<<"),
            '>' if self.eat('>') => TokenKind::Operator(">>"),
            '<' if self.eat('=') => TokenKind::Comparison("<="),
            '>' if self.eat('=') => TokenKind::Comparison(">="),
            '<' => TokenKind::Comparison("<"),
            '>' => TokenKind::Comparison(">"),
            '=' if self.eat('=') => TokenKind::Comparison("=="),
            '!' if self.eat('=') => TokenKind::Comparison("!="),
            ',' | '.' | '[' | ']' | '{' | '}' | ':' | '=' => TokenKind::Punct(c),
            _ => {
                debug!("Unexpected character '{}' at column {}", c, start + 1);
                return Err(self.syntax_error(start));
            }
        };
        Ok(kind)
    }

    fn scan_ident(&mut self) -> TokenKind {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        TokenKind::Ident(word)
    }

    fn scan_string(&mut self, quote: char) -> Result<TokenKind, ExpressionError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.bump() {
                None => return Err(self.syntax_error(start)),
                Some('\\') => {
                    self.bump();
                }
                Some(c) if c == quote => break,
                Some(_) => {}
            }
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        Ok(TokenKind::Foreign(literal))
    }

    /// Consumes digits and single underscores between digits
    fn scan_digits(&mut self, radix: u32) -> Result<String, ExpressionError> {
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c.is_digit(radix) {
                digits.push(c);
                self.pos += 1;
            } else if c == '_' && self.peek_at(1).is_some_and(|n| n.is_digit(radix)) {
                if digits.is_empty() {
                    break;
                }
                self.pos += 1;
            } else if c == '_' {
                return Err(self.syntax_error(self.pos));
            } else {
                break;
            }
        }
        Ok(digits)
    }

    fn scan_number(&mut self) -> Result<TokenKind, ExpressionError> {
        let start = self.pos;

        if self.peek() == Some('0')
            && let Some(radix) = self.peek_at(1).and_then(radix_for_prefix)
        {
            self.pos += 2;
            self.eat('_');
            let digits = self.scan_digits(radix)?;
            if digits.is_empty() {
                return Err(self.syntax_error(start));
            }
            self.reject_trailing_word(start)?;
            let value = i64::from_str_radix(&digits, radix).map_err(|_| ArithmeticError::Overflow)?;
            return Ok(TokenKind::Number(Number::Int(value)));
        }

        let integer = self.scan_digits(10)?;
        let mut text = integer.clone();
        let mut is_float = false;

        if self.eat('.') {
            is_float = true;
            text.push('.');
            text.push_str(&self.scan_digits(10)?);
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let sign = self.peek_at(1);
            let offset = if matches!(sign, Some('+' | '-')) { 2 } else { 1 };
            if self.peek_at(offset).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                text.push('e');
                self.pos += 1;
                if offset == 2
                    && let Some(sign) = self.bump()
                {
                    text.push(sign);
                }
                text.push_str(&self.scan_digits(10)?);
            } else {
                return Err(self.syntax_error(start));
            }
        }

        if matches!(self.peek(), Some('j' | 'J')) {
            self.pos += 1;
            self.reject_trailing_word(start)?;
            let literal: String = self.chars[start..self.pos].iter().collect();
            return Ok(TokenKind::Foreign(literal));
        }

        self.reject_trailing_word(start)?;

        if is_float {
            let value = text
                .parse::<f64>()
                .map_err(|_| self.syntax_error(start))?;
            return Ok(TokenKind::Number(Number::Float(value)));
        }

        if integer.len() > 1 && integer.starts_with('0') && integer.chars().any(|c| c != '0') {
            debug!("Rejecting integer literal with leading zero: '{}'", integer);
            return Err(self.syntax_error(start));
        }

        let value = integer
            .parse::<i64>()
            .map_err(|_| ArithmeticError::Overflow)?;
        Ok(TokenKind::Number(Number::Int(value)))
    }

    /// A literal directly followed by letters (`5x`, `1e`) is malformed
    fn reject_trailing_word(&self, start: usize) -> Result<(), ExpressionError> {
        if self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            return Err(self.syntax_error(start));
        }
        Ok(())
    }
}

fn radix_for_prefix(c: char) -> Option<u32> {
    match c {
        'x' | 'X' => Some(16),
        'o' | 'O' => Some(8),
        'b' | 'B' => Some(2),
        _ => None,
    }
}
