//! Expression-accumulation state machine
//!
//! Every keypress is decoded into an [`Action`] and passed to
//! [`CalculatorEngine::apply`], which mutates the owned [`EngineState`] and
//! returns the [`View`] to render. The engine never performs I/O.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::core::evaluator::Evaluator;
use crate::core::{CalcError, CalcResult, Calculator, DisplayFormatter, Operator};

/// Logical calculator inputs, already decoded from keys or buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// A digit key, `0..=9`
    Digit(u8),
    /// The `.` key
    DecimalPoint,
    /// An operator key
    Operator(Operator),
    /// The `=` key
    Equals,
    /// The `C` key
    Clear,
    /// The `⌫` key
    Backspace,
}

impl Action {
    /// Creates a digit action, or `None` for values above 9
    #[must_use]
    pub const fn digit(d: u8) -> Option<Self> {
        if d <= 9 {
            Some(Self::Digit(d))
        } else {
            None
        }
    }

    /// Decodes a key-string character.
    ///
    /// Accepts the keypad labels: `0-9 . + - * / % = C ⌫`, plus `c` for
    /// clear and `<` as a typeable backspace.
    #[must_use]
    pub fn from_key_char(ch: char) -> Option<Self> {
        match ch {
            '0'..='9' => ch.to_digit(10).map(|d| Self::Digit(d as u8)),
            '.' => Some(Self::DecimalPoint),
            '=' => Some(Self::Equals),
            'C' | 'c' => Some(Self::Clear),
            '⌫' | '<' => Some(Self::Backspace),
            _ => Operator::from_symbol(ch).map(Self::Operator),
        }
    }

    /// The keypad label for this action
    #[must_use]
    pub fn label(&self) -> char {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(*d), 10).unwrap_or('?'),
            Self::DecimalPoint => '.',
            Self::Operator(op) => op.symbol(),
            Self::Equals => '=',
            Self::Clear => 'C',
            Self::Backspace => '⌫',
        }
    }

    /// Whether the action is refused once the operand reaches the length
    /// limit; only `=`, `C` and `⌫` get through
    #[must_use]
    pub const fn is_length_gated(&self) -> bool {
        !matches!(self, Self::Equals | Self::Clear | Self::Backspace)
    }
}

/// What the front end renders after each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// Main display line
    pub display: String,
    /// Memory line above the display
    pub secondary: String,
    /// Whether `display` is showing an error
    pub is_error: bool,
}

impl Default for View {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            secondary: String::new(),
            is_error: false,
        }
    }
}

impl View {
    /// Display text for every error view
    pub const ERROR_DISPLAY: &'static str = "Error";

    /// Creates an error view carrying `message` on the memory line
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            display: Self::ERROR_DISPLAY.to_string(),
            secondary: message.into(),
            is_error: true,
        }
    }
}

/// Calculator state, exclusively owned by [`CalculatorEngine`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineState {
    /// Operand being typed; empty means not started (shown as `0`)
    pub current: String,
    /// Left-to-right expression built so far
    pub expression: String,
    /// Operand captured before the most recent operator
    pub last_operand: Option<String>,
    /// Most recent operator
    pub last_operator: Option<Operator>,
    /// Set by `=` so the next digit starts a fresh entry
    pub just_calculated: bool,
    /// Message of the last failure, until the next accepted action
    pub error_message: Option<String>,
    /// Expression consumed by the last successful `=`
    pub evaluated: Option<String>,
}

impl EngineState {
    /// Whether the state equals the construction defaults
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        *self == Self::default()
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Start of the operand at the end of `expression`
    fn trailing_operand_start(&self) -> usize {
        self.expression
            .rfind(|c: char| !(c.is_ascii_digit() || c == '.'))
            .map_or(0, |i| i + 1)
    }
}

/// The calculator state machine
#[derive(Debug, Clone, Default)]
pub struct CalculatorEngine {
    state: EngineState,
    config: EngineConfig,
    formatter: DisplayFormatter,
    evaluator: Evaluator,
}

impl CalculatorEngine {
    /// Creates an engine with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with a custom configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            state: EngineState::default(),
            config,
            formatter: config.formatter(),
            evaluator: Evaluator::new(),
        }
    }

    /// Returns the current state
    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Returns the configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Applies one action and returns the view to render
    pub fn apply(&mut self, action: Action) -> View {
        if action.is_length_gated() && self.state.current.len() >= self.config.max_digits {
            debug!(?action, len = self.state.current.len(), "input rejected");
            return self.view();
        }
        if matches!(action, Action::Digit(d) if d > 9) {
            debug!(?action, "ignoring out-of-range digit");
            return self.view();
        }

        debug!(?action, "apply");
        self.state.error_message = None;
        self.state.evaluated = None;

        let outcome = match action {
            Action::Digit(d) => {
                if let Some(ch) = char::from_digit(u32::from(d), 10) {
                    self.enter(ch);
                }
                Ok(())
            }
            Action::DecimalPoint => {
                self.enter('.');
                Ok(())
            }
            Action::Operator(op) => self.operator(op),
            Action::Equals => self.equals(),
            Action::Clear => {
                self.state.reset();
                Ok(())
            }
            Action::Backspace => {
                self.backspace();
                Ok(())
            }
        };

        if let Err(err) = outcome {
            self.fail(&err);
        }

        self.view()
    }

    /// Applies a sequence of actions, returning the final view
    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = Action>) -> View {
        actions
            .into_iter()
            .fold(self.view(), |_, action| self.apply(action))
    }

    /// Renders the current state
    #[must_use]
    pub fn view(&self) -> View {
        let state = &self.state;

        if let Some(message) = &state.error_message {
            return View::error(message.clone());
        }

        let current = if state.current.is_empty() {
            "0"
        } else {
            state.current.as_str()
        };

        let secondary = if let Some(expression) = &state.evaluated {
            format!("{} = ", self.formatter.format(expression))
        } else if let (Some(operand), Some(op)) = (&state.last_operand, state.last_operator) {
            let mut line = format!("{} {}", self.formatter.format(operand), op);
            if !state.current.is_empty() {
                line.push(' ');
                line.push_str(&self.formatter.format(&state.current));
            }
            line
        } else {
            String::new()
        };

        View {
            display: self.formatter.format(current),
            secondary,
            is_error: false,
        }
    }

    fn enter(&mut self, ch: char) {
        let state = &mut self.state;

        if state.just_calculated {
            state.reset();
        }

        if ch == '.' && state.current.contains('.') {
            return;
        }

        // A lone "0" is replaced by whatever is typed next, "." included
        if state.current == "0" {
            state.current.clear();
            let start = state.trailing_operand_start();
            if &state.expression[start..] == "0" {
                state.expression.truncate(start);
            }
        }

        state.current.push(ch);
        state.expression.push(ch);
    }

    fn operator(&mut self, op: Operator) -> CalcResult<()> {
        let state = &mut self.state;

        if state.just_calculated {
            state.expression = state.current.clone();
            state.just_calculated = false;
        }

        if !op.is_binary() {
            return self.percent();
        }

        if state.current.is_empty() && state.expression.is_empty() {
            return Ok(());
        }

        if !state.current.is_empty() {
            state.last_operand = Some(state.current.clone());
            state.expression = std::mem::take(&mut state.current);
        }
        state.last_operator = Some(op);
        state.expression.push(op.symbol());

        Ok(())
    }

    fn percent(&mut self) -> CalcResult<()> {
        let state = &mut self.state;

        if state.current.is_empty() {
            return Ok(());
        }

        let pending = match (&state.last_operand, state.last_operator) {
            (Some(base), Some(op)) => Some((base.as_str(), op)),
            _ => None,
        };
        let result = Calculator::percent(&state.current, pending)?;

        state.expression = result.clone();
        state.current = result;
        Ok(())
    }

    fn equals(&mut self) -> CalcResult<()> {
        if self.state.expression.is_empty() {
            return Ok(());
        }

        let result = self.evaluator.evaluate_to_string(&self.state.expression)?;
        debug!(expression = %self.state.expression, %result, "evaluated");

        let state = &mut self.state;
        state.evaluated = Some(std::mem::replace(&mut state.expression, result.clone()));
        state.current = result;
        state.last_operand = None;
        state.last_operator = None;
        state.just_calculated = true;
        Ok(())
    }

    /// Drops the last typed character of the pending operand only; the
    /// committed part of `expression` is left as is.
    fn backspace(&mut self) {
        if self.state.just_calculated {
            self.state.reset();
        }
        self.state.current.pop();
    }

    fn fail(&mut self, err: &CalcError) {
        warn!(error = %err, expression = %self.state.expression, "calculation failed");
        self.state.reset();
        self.state.error_message = Some(err.to_string());
    }
}
