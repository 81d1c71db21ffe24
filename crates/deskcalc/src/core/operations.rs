//! Operators and checked arithmetic
//!
//! `=` folds binary operators over `f64`; `%` works on exact decimals so
//! that `5 + 2 %` yields `0.1` rather than a binary approximation.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::format::PlainDecimal;
use crate::core::{CalcError, CalcResult};

/// Operator keys on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Percent (%), applied immediately to the pending operand
    Percent,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Percent,
    ];

    /// Returns the operator symbol as it appears in the expression
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Percent => '%',
        }
    }

    /// Maps an operator symbol back to the operator
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '%' => Some(Self::Percent),
            _ => None,
        }
    }

    /// `+` and `-`: percent is taken of the previous operand
    #[must_use]
    pub const fn is_additive(&self) -> bool {
        matches!(self, Self::Add | Self::Subtract)
    }

    /// Whether the operator is written into the expression
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        !matches!(self, Self::Percent)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Checked arithmetic used by the evaluator and the percent key
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Calculator {
    /// Applies a binary operator to two operands
    pub fn calculate(a: f64, b: f64, op: Operator) -> CalcResult<f64> {
        match op {
            Operator::Add => Self::add(a, b),
            Operator::Subtract => Self::subtract(a, b),
            Operator::Multiply => Self::multiply(a, b),
            Operator::Divide => Self::divide(a, b),
            // Never a token in the expression
            Operator::Percent => Err(CalcError::InvalidExpression),
        }
    }

    /// Addition: a + b
    pub fn add(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_finite(a + b)
    }

    /// Subtraction: a - b
    pub fn subtract(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_finite(a - b)
    }

    /// Multiplication: a * b
    pub fn multiply(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_finite(a * b)
    }

    /// Floating division: a / b
    pub fn divide(a: f64, b: f64) -> CalcResult<f64> {
        if b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Self::check_finite(a / b)
    }

    /// Applies the percent key to `operand`.
    ///
    /// With a pending `+` or `-` the result is that percentage of `base`;
    /// after `*`, `/` or with nothing pending it is `operand / 100`.
    /// Exact decimals are used while they fit, `f64` beyond that.
    pub fn percent(operand: &str, pending: Option<(&str, Operator)>) -> CalcResult<String> {
        let base = match pending {
            Some((base, op)) if op.is_additive() => Some(Self::canonical_decimal(base)?),
            _ => None,
        };
        let operand = Self::canonical_decimal(operand)?;
        let base = base.as_deref();

        match Self::decimal_percent(&operand, base) {
            Some(result) => Ok(Self::render_decimal(result)),
            None => Self::float_percent(&operand, base),
        }
    }

    fn decimal_percent(operand: &str, base: Option<&str>) -> Option<Decimal> {
        let value = Decimal::from_str(operand)
            .ok()?
            .checked_div(Decimal::ONE_HUNDRED)?;
        match base {
            Some(base) => Decimal::from_str(base).ok()?.checked_mul(value),
            None => Some(value),
        }
    }

    fn float_percent(operand: &str, base: Option<&str>) -> CalcResult<String> {
        let value = Self::divide(Self::parse_float(operand)?, 100.0)?;
        let result = match base {
            Some(base) => Self::multiply(Self::parse_float(base)?, value)?,
            None => value,
        };
        Ok(Self::render(result))
    }

    /// Renders an evaluation result as the operand text stored in the engine
    #[must_use]
    pub fn render(value: f64) -> String {
        if value == 0.0 {
            // No "-0"
            return "0".to_string();
        }
        value.to_string()
    }

    fn render_decimal(value: Decimal) -> String {
        if value.is_zero() {
            return "0".to_string();
        }
        value.normalize().to_string()
    }

    fn canonical_decimal(raw: &str) -> CalcResult<String> {
        PlainDecimal::parse(raw)
            .map(|number| number.canonical())
            .ok_or(CalcError::InvalidPercentage)
    }

    fn parse_float(raw: &str) -> CalcResult<f64> {
        raw.parse().map_err(|_| CalcError::InvalidPercentage)
    }

    fn check_finite(result: f64) -> CalcResult<f64> {
        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::Overflow)
        }
    }
}
