//! Terminal front end
//!
//! A ratatui/crossterm rendering of the keypad calculator. Keys and mouse
//! clicks are decoded here; all arithmetic stays in [`crate::core`].

mod app;
mod input;
mod keypad;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::info;

use crate::config::EngineConfig;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{Keypad, KeypadButton, KeypadWidget};
pub use ui::{layout, render, CalculatorUI, Regions};

/// How long a pressed button stays lit
const HIGHLIGHT: Duration = Duration::from_millis(150);

/// Runs the interactive calculator until the user quits
pub fn run(config: EngineConfig) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    info!(?config, "starting tui");
    let result = run_app(&mut terminal, CalculatorApp::with_config(config));

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    info!("tui closed");

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: CalculatorApp,
) -> io::Result<()> {
    let input_handler = InputHandler::new();

    while !app.should_quit() {
        terminal.draw(|f| render(&app, f))?;

        if !event::poll(HIGHLIGHT)? {
            app.release();
            continue;
        }

        match event::read()? {
            Event::Key(key) => app.handle(input_handler.handle_key(key)),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                let size = terminal.size()?;
                let regions = layout(Rect::new(0, 0, size.width, size.height));
                app.click(regions.keypad, column, row);
            }
            _ => {}
        }
    }

    Ok(())
}
