use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};
use thiserror::Error;
use crate::aggregator::CostBreakdown;
use crate::ui::utils::format_share;

/// Angle (degrees, counter-clockwise from the positive x axis) of the first slice edge
pub const START_ANGLE: f64 = 140.0;

/// Qualitative "Paired" palette, cycled when there are more slices than colours
const PAIRED: [Color; 12] = [
    Color::Rgb(0xa6, 0xce, 0xe3),
    Color::Rgb(0x1f, 0x78, 0xb4),
    Color::Rgb(0xb2, 0xdf, 0x8a),
    Color::Rgb(0x33, 0xa0, 0x2c),
    Color::Rgb(0xfb, 0x9a, 0x99),
    Color::Rgb(0xe3, 0x1a, 0x1c),
    Color::Rgb(0xfd, 0xbf, 0x6f),
    Color::Rgb(0xff, 0x7f, 0x00),
    Color::Rgb(0xca, 0xb2, 0xd6),
    Color::Rgb(0x6a, 0x3d, 0x9a),
    Color::Rgb(0xff, 0xff, 0x99),
    Color::Rgb(0xb1, 0x59, 0x28),
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("No valid costs provided for visualization.")]
    Empty,
    #[error("Cannot chart '{0}': pie slices need positive amounts.")]
    NonPositive(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    /// Fraction of the whole, 0..=1
    pub share: f64,
    /// Offset of the slice's first edge from `START_ANGLE`, in degrees
    pub offset: f64,
    pub sweep: f64,
    pub color: Color,
}

/// Turn a breakdown into pie slices, one per component, in breakdown order
pub fn pie_slices(breakdown: &CostBreakdown) -> Result<Vec<PieSlice>, ChartError> {
    if breakdown.is_empty() {
        return Err(ChartError::Empty);
    }
    if let Some((name, _)) = breakdown.iter().find(|(_, amount)| *amount <= 0.0 || amount.is_nan()) {
        return Err(ChartError::NonPositive(name.to_string()));
    }
    let total = breakdown.total();
    if total <= 0.0 || !total.is_finite() {
        return Err(ChartError::NonPositive("total".to_string()));
    }

    let mut offset = 0.0;
    let slices = breakdown
        .iter()
        .enumerate()
        .map(|(i, (label, amount))| {
            let share = amount / total;
            let sweep = share * 360.0;
            let slice = PieSlice {
                label: label.to_string(),
                share,
                offset,
                sweep,
                color: PAIRED[i % PAIRED.len()],
            };
            offset += sweep;
            slice
        })
        .collect();
    Ok(slices)
}

/// Index of the slice covering `angle` (degrees, any range)
pub fn slice_at(slices: &[PieSlice], angle: f64) -> Option<usize> {
    if slices.is_empty() {
        return None;
    }
    let relative = (angle - START_ANGLE).rem_euclid(360.0);
    slices
        .iter()
        .position(|s| relative < s.offset + s.sweep)
        // Rounding can leave a sliver just under 360 uncovered
        .or(Some(slices.len() - 1))
}

/// Sample points inside the unit disc, grouped by slice
fn disc_points(slices: &[PieSlice], step: f64) -> Vec<Vec<(f64, f64)>> {
    let mut groups = vec![Vec::new(); slices.len()];
    let steps = (2.0 / step).ceil() as i32;
    for yi in 0..=steps {
        let y = -1.0 + yi as f64 * step;
        for xi in 0..=steps {
            let x = -1.0 + xi as f64 * step;
            if x * x + y * y > 1.0 {
                continue;
            }
            if let Some(i) = slice_at(slices, y.atan2(x).to_degrees()) {
                groups[i].push((x, y));
            }
        }
    }
    groups
}

/// First legend line to show so that `selected` fits in `height` lines
pub fn legend_offset(selected: usize, height: u16) -> u16 {
    let first = selected.saturating_sub(usize::from(height.max(1)) - 1);
    u16::try_from(first).unwrap_or(u16::MAX)
}

/// Render the cost distribution pie with a legend, or the reason it cannot be drawn.
/// The legend scrolls to keep the `selected` component in view.
pub fn render_cost_pie(f: &mut Frame, breakdown: &CostBreakdown, selected: usize, area: Rect) {
    let block = Block::default().title("Cost Breakdown").borders(Borders::ALL);

    let slices = match pie_slices(breakdown) {
        Ok(slices) => slices,
        Err(e) => {
            let notice = Paragraph::new(e.to_string())
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            f.render_widget(notice, area);
            return;
        }
    };

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    // Terminal cells are roughly twice as tall as they are wide
    let pie_area = chunks[0];
    let x_span = if pie_area.height > 0 {
        (pie_area.width as f64 / (pie_area.height as f64 * 2.0)).max(1.0)
    } else {
        1.0
    };

    let groups = disc_points(&slices, 0.02);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_span, x_span])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (slice, points) in slices.iter().zip(groups.iter()) {
                ctx.draw(&Points {
                    coords: points.as_slice(),
                    color: slice.color,
                });
            }
        });
    f.render_widget(canvas, pie_area);

    let legend: Vec<Line> = slices
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let text_style = if i == selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(s.color)),
                Span::styled(format!("{} {}", s.label, format_share(s.share)), text_style),
            ])
        })
        .collect();
    let offset = legend_offset(selected, chunks[1].height);
    f.render_widget(Paragraph::new(legend).scroll((offset, 0)), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{aggregate, CostSheet};

    fn breakdown(items: &[(&str, f64)]) -> CostBreakdown {
        let sheet: CostSheet = items.iter().map(|(n, a)| (*n, Some(*a))).collect();
        aggregate(&sheet).breakdown
    }

    #[test]
    fn test_empty_breakdown_has_no_chart() {
        assert_eq!(pie_slices(&CostBreakdown::default()), Err(ChartError::Empty));
        assert_eq!(
            ChartError::Empty.to_string(),
            "No valid costs provided for visualization."
        );
    }

    #[test]
    fn test_negative_amount_has_no_chart() {
        let b = breakdown(&[("fuel_cost", 10.0), ("refund", -2.0)]);
        assert_eq!(pie_slices(&b), Err(ChartError::NonPositive("refund".to_string())));
    }

    #[test]
    fn test_slices_cover_circle_in_order() {
        let b = breakdown(&[("a", 25.0), ("b", 25.0), ("c", 50.0)]);
        let slices = pie_slices(&b).unwrap();
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].label, "a");
        assert_eq!(slices[0].offset, 0.0);
        assert_eq!(slices[1].offset, 90.0);
        assert_eq!(slices[2].offset, 180.0);
        assert_eq!(slices[2].sweep, 180.0);
        assert_eq!(slices[2].share, 0.5);
        assert_eq!(format_share(slices[0].share), "25.0%");
    }

    #[test]
    fn test_colors_cycle() {
        let items: Vec<(String, f64)> = (1..=13).map(|i| (format!("c{i}"), 1.0)).collect();
        let refs: Vec<(&str, f64)> = items.iter().map(|(n, a)| (n.as_str(), *a)).collect();
        let slices = pie_slices(&breakdown(&refs)).unwrap();
        assert_eq!(slices[12].color, slices[0].color);
        assert_ne!(slices[1].color, slices[0].color);
    }

    #[test]
    fn test_slice_at_starts_at_start_angle() {
        let b = breakdown(&[("a", 1.0), ("b", 1.0)]);
        let slices = pie_slices(&b).unwrap();
        assert_eq!(slice_at(&slices, START_ANGLE + 1.0), Some(0));
        assert_eq!(slice_at(&slices, START_ANGLE + 181.0), Some(1));
        assert_eq!(slice_at(&slices, START_ANGLE - 1.0), Some(1));
        assert_eq!(slice_at(&[], 0.0), None);
    }

    #[test]
    fn test_legend_offset_keeps_selection_visible() {
        assert_eq!(legend_offset(0, 10), 0);
        assert_eq!(legend_offset(9, 10), 0);
        assert_eq!(legend_offset(10, 10), 1);
        assert_eq!(legend_offset(29, 20), 10);
        assert_eq!(legend_offset(3, 0), 3);
    }

    #[test]
    fn test_disc_points_split_by_share() {
        let b = breakdown(&[("small", 1.0), ("large", 3.0)]);
        let slices = pie_slices(&b).unwrap();
        let groups = disc_points(&slices, 0.05);
        assert!(groups[1].len() > groups[0].len() * 2);
    }
}
