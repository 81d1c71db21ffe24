//! Tokenizer and flat expression parser
//!
//! The accumulated expression is a flat `operand (operator operand)*`
//! sequence. It is parsed into that shape and nothing more: there is no
//! precedence and no grouping.

use crate::core::{CalcError, CalcResult, Operator};

/// Token types from lexical analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// Numeric literal, sign included
    Number(f64),
    /// Binary operator
    Operator(Operator),
}

impl Token {
    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    expect_operand: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            expect_operand: true,
        }
    }

    /// Returns the remaining input
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number(false)?,
            // A minus where an operand is expected is a sign
            '-' if self.expect_operand => {
                self.advance();
                self.read_number(true)?
            }
            _ => match Operator::from_symbol(ch) {
                Some(op) if op.is_binary() => {
                    self.advance();
                    Token::Operator(op)
                }
                _ => return Err(CalcError::InvalidExpression),
            },
        };

        self.expect_operand = token.is_operator();
        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_number(&mut self, negative: bool) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let value: f64 = self.input[start..self.pos]
            .parse()
            .map_err(|_| CalcError::InvalidExpression)?;

        Ok(Token::Number(if negative { -value } else { value }))
    }
}

/// A parsed flat expression: the first operand followed by
/// `(operator, operand)` pairs in source order
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    /// Leading operand
    pub first: f64,
    /// Remaining operator/operand pairs
    pub rest: Vec<(Operator, f64)>,
}

impl Expression {
    /// Parses expression text such as `12.5*4-3`
    pub fn parse_str(input: &str) -> CalcResult<Self> {
        let tokens = Tokenizer::new(input).tokenize()?;
        Self::parse(&tokens)
    }

    /// Parses a token stream, requiring `number (operator number)*`
    pub fn parse(tokens: &[Token]) -> CalcResult<Self> {
        let mut iter = tokens.iter();

        let Some(Token::Number(first)) = iter.next() else {
            return Err(CalcError::InvalidExpression);
        };

        let mut rest = Vec::with_capacity(tokens.len() / 2);
        while let Some(token) = iter.next() {
            let Token::Operator(op) = token else {
                return Err(CalcError::InvalidExpression);
            };
            let Some(Token::Number(operand)) = iter.next() else {
                // Trailing operator
                return Err(CalcError::InvalidExpression);
            };
            rest.push((*op, *operand));
        }

        Ok(Self {
            first: *first,
            rest,
        })
    }

    /// Number of operators in the expression
    #[must_use]
    pub fn operator_count(&self) -> usize {
        self.rest.len()
    }
}
