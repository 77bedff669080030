pub mod terminal;
pub mod utils;
pub mod input;
pub mod charts;
pub mod renderers;

use std::io;
use ratatui::{backend::Backend, Terminal};
use crate::types::{App, AppMode};

// Re-export the main public functions
pub use terminal::{setup_terminal, restore_terminal};

/// Main UI rendering function that delegates to specific mode renderers
pub fn render_ui<B: Backend>(app: &App, terminal: &mut Terminal<B>) -> Result<(), io::Error> {
    terminal.draw(|f| {
        match app.mode {
            AppMode::Form => renderers::form::render(f, app),
            AppMode::Results => renderers::results::render(f, app),
        }
    })?;
    Ok(())
}
