use ratatui::{
    widgets::{Block, Borders, Paragraph, Table, TableState, Row, Cell},
    layout::{Layout, Constraint, Direction, Rect},
    style::{Style, Color, Modifier},
    text::{Line, Span},
    Frame
};
use crate::aggregator::CostSummary;
use crate::types::App;
use crate::ui::charts::render_cost_pie;
use crate::ui::utils::{format_amount, format_share};

/// Render the total, the breakdown table and the pie chart
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Total
            Constraint::Min(0),    // Table + chart
            Constraint::Length(3), // Footer
        ])
        .split(f.size());

    let Some(summary) = &app.summary else {
        return;
    };

    render_total(f, app, summary, chunks[0]);

    if summary.breakdown.is_empty() {
        // Nothing to tabulate; the chart panel explains why
        render_cost_pie(f, &summary.breakdown, 0, chunks[1]);
    } else {
        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        render_breakdown_table(f, app, summary, content[0]);
        render_cost_pie(f, &summary.breakdown, app.results_row, content[1]);
    }

    let footer = Paragraph::new("↑/↓: scroll breakdown | Esc/Enter: back to form | q: quit")
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[2]);
}

fn render_total(f: &mut Frame, app: &App, summary: &CostSummary, area: Rect) {
    let title = match app.calculated_at {
        Some(at) => format!("{} (calculated {})", app.prefs.project_title, at.format("%H:%M:%S")),
        None => app.prefs.project_title.clone(),
    };
    let total = Paragraph::new(Line::from(vec![
        Span::raw("Total Estimated Cost: "),
        Span::styled(
            format!("{} {}", format_amount(summary.total), app.prefs.currency),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(total, area);
}

fn render_breakdown_table(f: &mut Frame, app: &App, summary: &CostSummary, area: Rect) {
    let amount_header = format!("Amount ({})", app.prefs.currency);
    let header = Row::new(vec![
        Cell::from("Cost Component"),
        Cell::from(amount_header),
        Cell::from("Share"),
    ])
    .style(Style::default().fg(Color::Red));

    let rows = summary.breakdown.iter().map(|(name, amount)| {
        let share = if summary.total != 0.0 { amount / summary.total } else { 0.0 };
        Row::new(vec![
            Cell::from(name.to_string()),
            Cell::from(format_amount(amount)),
            Cell::from(format_share(share)),
        ])
    });

    let widths = [
        Constraint::Percentage(50),
        Constraint::Percentage(30),
        Constraint::Percentage(20),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Breakdown"))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    let mut state = TableState::default();
    state.select(Some(app.results_row));
    f.render_stateful_widget(table, area, &mut state);
}
