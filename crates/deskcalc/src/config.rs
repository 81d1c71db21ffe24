//! Engine configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::DisplayFormatter;

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `max_digits` outside `1..=MAX_DIGITS_LIMIT`
    #[error("max digits must be between 1 and {limit}, got {value}")]
    MaxDigits {
        /// Offending value
        value: usize,
        /// Upper bound
        limit: usize,
    },
    /// `fraction_digits` above `FRACTION_DIGITS_LIMIT`
    #[error("precision must be at most {limit}, got {value}")]
    FractionDigits {
        /// Offending value
        value: usize,
        /// Upper bound
        limit: usize,
    },
}

/// Calculator engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Longest operand accepted from the keypad
    pub max_digits: usize,
    /// Fractional digits shown on the display
    pub fraction_digits: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_digits: Self::DEFAULT_MAX_DIGITS,
            fraction_digits: DisplayFormatter::DEFAULT_FRACTION_DIGITS,
        }
    }
}

impl EngineConfig {
    /// Default operand length limit
    pub const DEFAULT_MAX_DIGITS: usize = 16;
    /// Largest accepted `max_digits`
    pub const MAX_DIGITS_LIMIT: usize = 64;
    /// Largest accepted `fraction_digits`; f64 carries no more
    pub const FRACTION_DIGITS_LIMIT: usize = 15;

    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the operand length limit
    #[must_use]
    pub const fn with_max_digits(mut self, max_digits: usize) -> Self {
        self.max_digits = max_digits;
        self
    }

    /// Set the display precision
    #[must_use]
    pub const fn with_fraction_digits(mut self, fraction_digits: usize) -> Self {
        self.fraction_digits = fraction_digits;
        self
    }

    /// Checks that both limits are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_digits == 0 || self.max_digits > Self::MAX_DIGITS_LIMIT {
            return Err(ConfigError::MaxDigits {
                value: self.max_digits,
                limit: Self::MAX_DIGITS_LIMIT,
            });
        }
        if self.fraction_digits > Self::FRACTION_DIGITS_LIMIT {
            return Err(ConfigError::FractionDigits {
                value: self.fraction_digits,
                limit: Self::FRACTION_DIGITS_LIMIT,
            });
        }
        Ok(())
    }

    /// Formatter matching `fraction_digits`
    #[must_use]
    pub const fn formatter(&self) -> DisplayFormatter {
        DisplayFormatter::with_fraction_digits(self.fraction_digits)
    }
}
