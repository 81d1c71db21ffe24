//! deskcalc - keypad calculator engine
//!
//! A pocket-calculator state machine: keys are decoded into [`core::Action`]s,
//! fed one at a time to [`core::CalculatorEngine`], and every action returns a
//! [`core::View`] holding the main display, the memory line and an error flag.
//!
//! # Layout
//!
//! - [`core`]: engine, left-to-right evaluator, percent rules, display formatter
//! - [`config`]: engine limits and display precision
//! - [`driver`]: one interface over the engine and the terminal front end
//! - [`commands`], [`logging`], [`error`]: the `deskcalc` binary
//! - `tui` (feature `tui`): ratatui keypad front end
//!
//! # Example
//!
//! ```rust
//! use deskcalc::prelude::*;
//!
//! let mut engine = CalculatorEngine::new();
//! for key in "1200*3".chars().filter_map(Action::from_key_char) {
//!     engine.apply(key);
//! }
//! let view = engine.apply(Action::Equals);
//! assert_eq!(view.display, "3,600");
//! assert_eq!(view.secondary, "1200*3 = ");
//!
//! engine.apply(Action::Operator(Operator::Divide));
//! let view = engine.apply_all([Action::Digit(0), Action::Equals]);
//! assert!(view.is_error);
//! assert_eq!(view.secondary, "Cannot divide by zero");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod commands;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod logging;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, EngineConfig};
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::parser::{Expression, Token, Tokenizer};
    pub use crate::core::{
        format_number, Action, CalcError, CalcResult, Calculator, CalculatorEngine,
        DisplayFormatter, EngineState, Operator, View,
    };
    pub use crate::driver::{CalculatorDriver, EngineDriver, UnknownKey};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut engine = CalculatorEngine::new();
        let view = engine.apply_all([
            Action::Digit(6),
            Action::Operator(Operator::Multiply),
            Action::Digit(7),
            Action::Equals,
        ]);
        assert_eq!(view.display, "42");
    }

    #[test]
    fn test_evaluator_direct() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("2+3*4").unwrap(), 20.0);
    }

    #[test]
    fn test_calculator_direct() {
        assert_eq!(
            Calculator::calculate(6.0, 7.0, Operator::Multiply).unwrap(),
            42.0
        );
        assert_eq!(
            Calculator::calculate(1.0, 0.0, Operator::Divide),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_parser_direct() {
        let expr = Expression::parse_str("1.5+2").unwrap();
        assert_eq!(expr.operator_count(), 1);
        let tokens = Tokenizer::new("1+2").tokenize().unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(tokens[1].is_operator());
    }

    #[test]
    fn test_formatter_direct() {
        assert_eq!(format_number("1234567.5"), "1,234,567.5");
        assert_eq!(DisplayFormatter::new().format("12+3"), "12+3");
    }

    #[test]
    fn test_driver_direct() {
        let mut driver = EngineDriver::with_config(EngineConfig::default());
        assert_eq!(driver.press_keys("50+10%").unwrap().display, "5");
    }
}
