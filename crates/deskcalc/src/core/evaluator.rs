//! Left-to-right evaluator
//!
//! Folds the parsed expression in source order. `2+3*4` is `20`, not `14`.

use crate::core::parser::Expression;
use crate::core::{CalcResult, Calculator};

/// Evaluator for accumulated keypad expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluates a parsed expression
    pub fn evaluate(&self, expr: &Expression) -> CalcResult<f64> {
        expr.rest
            .iter()
            .try_fold(expr.first, |acc, &(op, operand)| {
                Calculator::calculate(acc, operand, op)
            })
    }

    /// Evaluates expression text
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let expr = Expression::parse_str(input)?;
        self.evaluate(&expr)
    }

    /// Evaluates expression text and renders the result as operand text
    pub fn evaluate_to_string(&self, input: &str) -> CalcResult<String> {
        self.evaluate_str(input).map(Calculator::render)
    }
}
