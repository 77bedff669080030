use crossterm::event::KeyCode;
use crate::types::{App, AppMode, FormField};

/// Handle keyboard input events for all application modes. Returns true to quit.
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match app.mode {
        AppMode::Form => handle_form_keys(app, key),
        AppMode::Results => handle_results_keys(app, key),
    }
}

/// Handle key events while editing the cost form
fn handle_form_keys(app: &mut App, key: KeyCode) -> bool {
    let field = app.focused_field();
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Esc => app.notification = None,
        KeyCode::Up | KeyCode::BackTab => app.focus_prev(),
        KeyCode::Down | KeyCode::Tab => app.focus_next(),
        KeyCode::Enter => app.calculate(),
        KeyCode::Left | KeyCode::Char('-') if field == FormField::VariableCount => {
            app.adjust_variable_count(-1);
        }
        KeyCode::Right | KeyCode::Char('+') if field == FormField::VariableCount => {
            app.adjust_variable_count(1);
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            app.input_mut(field).push(c);
            if field == FormField::VariableCount {
                // Typing past the limit snaps to the limit
                app.adjust_variable_count(0);
            }
        }
        KeyCode::Char(c @ ('.' | ',')) if field.is_amount() => app.input_mut(field).push(c),
        KeyCode::Backspace => {
            app.input_mut(field).pop();
            if field == FormField::VariableCount {
                app.clamp_focus();
            }
        }
        KeyCode::Delete => {
            app.input_mut(field).clear();
            if field == FormField::VariableCount {
                app.clamp_focus();
            }
        }
        _ => {}
    }
    false
}

/// Handle key events on the results view
fn handle_results_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Up => app.select_prev_result(),
        KeyCode::Down => app.select_next_result(),
        KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
            tracing::debug!("returning to form");
            app.back_to_form();
        }
        _ => {}
    }
    false
}
