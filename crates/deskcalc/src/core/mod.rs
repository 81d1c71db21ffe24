//! Calculator core: engine state machine, evaluator and display formatting
//!
//! Nothing in here performs I/O; front ends feed [`Action`]s in and render
//! the returned [`View`].

pub mod engine;
pub mod evaluator;
pub mod format;
mod operations;
pub mod parser;

pub use engine::{Action, CalculatorEngine, EngineState, View};
pub use format::{format_number, DisplayFormatter};
pub use operations::{Calculator, Operator};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Failures surfaced to the user as an error view.
///
/// Over-long digit entry is not represented here: it is silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// A division's divisor evaluated to zero
    #[error("Cannot divide by zero")]
    DivisionByZero,
    /// Malformed or incomplete expression at `=`
    #[error("Invalid expression")]
    InvalidExpression,
    /// The pending operand is not a valid decimal when `%` is applied
    #[error("Invalid percentage")]
    InvalidPercentage,
    /// The result is not representable
    #[error("Result too large")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_error_messages() {
        assert_eq!(CalcError::DivisionByZero.to_string(), "Cannot divide by zero");
        assert_eq!(CalcError::InvalidExpression.to_string(), "Invalid expression");
        assert_eq!(CalcError::InvalidPercentage.to_string(), "Invalid percentage");
        assert_eq!(CalcError::Overflow.to_string(), "Result too large");
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::DivisionByZero);
        assert!(err.to_string().contains("divide"));
    }
}
