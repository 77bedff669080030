use ratatui::{
    widgets::{Block, Borders, Paragraph, Table, Row, Cell, TableState},
    layout::{Layout, Constraint, Direction, Rect},
    style::{Style, Color, Modifier},
    Frame
};
use crate::form::MAX_VARIABLE_COSTS;
use crate::types::{App, FormField};

/// Render the cost input form
pub fn render(f: &mut Frame, app: &App) {
    let mut constraints = vec![
        Constraint::Length(3), // Title
        Constraint::Min(0),    // Fields
    ];
    if app.notification.is_some() {
        constraints.push(Constraint::Length(3)); // Notification
    }
    constraints.push(Constraint::Length(3)); // Footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(f.size());

    let title = Paragraph::new("Enter Cost Components (Leave blank or 0 if not applicable)")
        .block(Block::default().title(app.prefs.project_title.as_str()).borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_fields(f, app, chunks[1]);

    if let Some(msg) = &app.notification {
        let notification = Paragraph::new(msg.as_str())
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(notification, chunks[2]);
    }

    let footer = Paragraph::new(
        "↑/↓: move | 0-9 . ,: edit | ←/→: variable count | Enter: calculate | Esc: dismiss | q: quit",
    )
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[chunks.len() - 1]);
}

/// Render the field table, scrolled so the focused row stays visible
fn render_fields(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused_field();
    let header = Row::new(vec![
        Cell::from("Cost Component").style(Style::default().fg(Color::Red)),
        Cell::from("Value").style(Style::default().fg(Color::Red)),
    ]);

    let rows: Vec<Row> = app
        .fields()
        .into_iter()
        .map(|field| {
            let label = if field.is_amount() {
                format!("{} ({})", field.label(), app.prefs.currency)
            } else {
                format!("{} (0-{})", field.label(), MAX_VARIABLE_COSTS)
            };
            let mut value = app.input(field).to_string();
            if field == FormField::VariableCount {
                value = format!("◀ {} ▶", app.variable_count());
            } else if field == focused {
                value.push('▏');
            }
            Row::new(vec![Cell::from(label), Cell::from(value)])
        })
        .collect();

    let widths = [Constraint::Percentage(60), Constraint::Percentage(40)];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Costs"))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(app.focus));
    f.render_stateful_widget(table, area, &mut state);
}
