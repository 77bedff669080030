use std::fmt::Write;
use crate::aggregator::CostSummary;
use crate::ui::charts::ChartError;
use crate::ui::utils::{format_amount, format_share};

/// Plain-text rendering of a summary for `--summary` mode
pub fn render_summary(summary: &CostSummary, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total Estimated Cost: {} {}",
        format_amount(summary.total),
        currency
    );
    let _ = writeln!(out);

    if summary.breakdown.is_empty() {
        let _ = writeln!(out, "{}", ChartError::Empty);
        return out;
    }

    let amount_header = format!("Amount ({})", currency);
    let rows: Vec<(String, String, String)> = summary
        .breakdown
        .iter()
        .map(|(name, amount)| {
            let share = if summary.total != 0.0 { amount / summary.total } else { 0.0 };
            (name.to_string(), format_amount(amount), format_share(share))
        })
        .collect();

    let name_width = rows
        .iter()
        .map(|(n, _, _)| n.chars().count())
        .chain(std::iter::once("Cost Component".len()))
        .max()
        .unwrap_or(0);
    let amount_width = rows
        .iter()
        .map(|(_, a, _)| a.len())
        .chain(std::iter::once(amount_header.chars().count()))
        .max()
        .unwrap_or(0);

    let _ = writeln!(
        out,
        "{:<nw$}  {:>aw$}  {:>6}",
        "Cost Component",
        amount_header,
        "Share",
        nw = name_width,
        aw = amount_width
    );
    let _ = writeln!(out, "{}", "-".repeat(name_width + amount_width + 10));
    for (name, amount, share) in rows {
        let _ = writeln!(
            out,
            "{:<nw$}  {:>aw$}  {:>6}",
            name,
            amount,
            share,
            nw = name_width,
            aw = amount_width
        );
    }
    out
}
