//! TUI application state
//!
//! Owns the engine and the keypad. Keyboard and mouse input both end up in
//! [`CalculatorApp::press`], so the two paths cannot drift apart.

use ratatui::layout::Rect;
use tracing::trace;

use super::input::KeyAction;
use super::keypad::Keypad;
use crate::config::EngineConfig;
use crate::core::{Action, CalculatorEngine, View};

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    engine: CalculatorEngine,
    /// View returned by the last action
    view: View,
    keypad: Keypad,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a calculator app with a custom engine configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let engine = CalculatorEngine::with_config(config);
        Self {
            view: engine.view(),
            engine,
            keypad: Keypad::new(),
            should_quit: false,
        }
    }

    /// Returns the view to render
    #[must_use]
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Feeds an action to the engine and lights the matching button
    pub fn press(&mut self, action: Action) -> &View {
        self.keypad.highlight(action);
        self.view = self.engine.apply(action);
        &self.view
    }

    /// Handles a decoded key
    pub fn handle(&mut self, key: KeyAction) {
        match key {
            KeyAction::Calc(action) => {
                self.press(action);
            }
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Handles a mouse click; returns the action of the clicked button
    pub fn click(&mut self, keypad_area: Rect, x: u16, y: u16) -> Option<Action> {
        let action = self.keypad.action_at(keypad_area, x, y);
        trace!(x, y, ?action, "click");
        if let Some(action) = action {
            self.press(action);
        }
        action
    }

    /// Drops the button highlight
    pub fn release(&mut self) {
        self.keypad.release_all();
    }
}
