//! Front-end drivers
//!
//! Every front end pushes [`Action`]s into an engine and reads back a
//! [`View`]. [`CalculatorDriver`] captures that contract so the same
//! scenario can be replayed against the bare engine and against the TUI
//! key-decoding path.
//!
//! ```rust
//! use deskcalc::driver::{CalculatorDriver, EngineDriver};
//!
//! let mut driver = EngineDriver::new();
//! let view = driver.press_keys("2*21=").unwrap();
//! assert_eq!(view.display, "42");
//! ```

use thiserror::Error;

use crate::config::EngineConfig;
use crate::core::{Action, CalculatorEngine, View};

/// A key string could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown key {key:?} at position {position}")]
pub struct UnknownKey {
    /// Offending character
    pub key: char,
    /// Character index within the key string
    pub position: usize,
}

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Presses a single key
    fn press(&mut self, action: Action) -> View;

    /// The view currently shown
    fn view(&self) -> View;

    /// Presses each key of a key string, skipping whitespace.
    ///
    /// Fails without pressing anything if the string holds a character that
    /// is not a keypad label.
    fn press_keys(&mut self, keys: &str) -> Result<View, UnknownKey> {
        let actions = keys
            .chars()
            .enumerate()
            .filter(|(_, key)| !key.is_whitespace())
            .map(|(position, key)| Action::from_key_char(key).ok_or(UnknownKey { key, position }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(actions
            .into_iter()
            .fold(self.view(), |_, action| self.press(action)))
    }
}

/// Driver over the bare engine
#[derive(Debug, Clone, Default)]
pub struct EngineDriver {
    engine: CalculatorEngine,
}

impl EngineDriver {
    /// Creates a driver with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver with a custom configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: CalculatorEngine::with_config(config),
        }
    }

    /// Returns the underlying engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, action: Action) -> View {
        self.engine.apply(action)
    }

    fn view(&self) -> View {
        self.engine.view()
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{Action, CalculatorDriver, EngineConfig, View};
    use crate::tui::{CalculatorApp, InputHandler};

    /// Drives the TUI app through synthesized key events
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
        input: InputHandler,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with a custom configuration
        #[must_use]
        pub fn with_config(config: EngineConfig) -> Self {
            Self {
                app: CalculatorApp::with_config(config),
                input: InputHandler::new(),
            }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// The key a user would press for `action`
        #[must_use]
        pub fn key_for(action: Action) -> KeyEvent {
            let code = match action {
                Action::Equals => KeyCode::Enter,
                Action::Backspace => KeyCode::Backspace,
                Action::Clear => KeyCode::Esc,
                other => KeyCode::Char(other.label()),
            };
            KeyEvent::new(code, KeyModifiers::NONE)
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, action: Action) -> View {
            let key = self.input.handle_key(Self::key_for(action));
            self.app.handle(key);
            self.app.view().clone()
        }

        fn view(&self) -> View {
            self.app.view().clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_chain<D: CalculatorDriver>(driver: &mut D) {
        let view = driver.press_keys("1200 + 34 =").unwrap();
        assert_eq!(view.display, "1,234");
        assert_eq!(view.secondary, "1200+34 = ");
    }

    fn check_rejects_unknown<D: CalculatorDriver>(driver: &mut D) {
        driver.press_keys("7").unwrap();
        let err = driver.press_keys("1 x").unwrap_err();
        assert_eq!(err, UnknownKey { key: 'x', position: 2 });
        assert_eq!(err.to_string(), "Unknown key 'x' at position 2");
        assert_eq!(driver.view().display, "7");
    }

    #[test]
    fn test_engine_driver_chain() {
        check_chain(&mut EngineDriver::new());
    }

    #[test]
    fn test_engine_driver_rejects_unknown_key() {
        check_rejects_unknown(&mut EngineDriver::new());
    }

    #[test]
    fn test_engine_driver_with_config() {
        let mut driver = EngineDriver::with_config(EngineConfig::new().with_max_digits(2));
        assert_eq!(driver.press_keys("999").unwrap().display, "99");
        assert_eq!(driver.engine().config().max_digits, 2);
    }

    #[test]
    fn test_empty_key_string_returns_current_view() {
        let mut driver = EngineDriver::new();
        assert_eq!(driver.press_keys("  ").unwrap(), View::default());
    }

    #[cfg(feature = "tui")]
    mod tui {
        use super::*;

        #[test]
        fn test_tui_driver_chain() {
            check_chain(&mut TuiDriver::new());
        }

        #[test]
        fn test_tui_driver_rejects_unknown_key() {
            check_rejects_unknown(&mut TuiDriver::new());
        }

        #[test]
        fn test_tui_driver_key_mapping() {
            use crossterm::event::KeyCode;
            assert_eq!(TuiDriver::key_for(Action::Equals).code, KeyCode::Enter);
            assert_eq!(
                TuiDriver::key_for(Action::Backspace).code,
                KeyCode::Backspace
            );
            assert_eq!(
                TuiDriver::key_for(Action::Digit(4)).code,
                KeyCode::Char('4')
            );
        }

        #[test]
        fn test_tui_driver_matches_engine_driver() {
            let keys = "12.5*4=C9<8%+1";
            let mut engine = EngineDriver::new();
            let mut tui = TuiDriver::new();
            assert_eq!(
                engine.press_keys(keys).unwrap(),
                tui.press_keys(keys).unwrap()
            );
            assert!(tui.app().keypad().pressed().is_some());
        }
    }
}
