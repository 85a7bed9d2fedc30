use ratatui::{
    Frame,
    layout::{Direction, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Sparkline},
};
use view_state::ChartSeries;

use crate::ui::{components::money::format_minor, theme::Theme};

fn card<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
}

/// Renders a signed series as horizontal bars.
///
/// Bar length is the magnitude; the sign picks the color.
pub fn render_signed_bars(frame: &mut Frame<'_>, area: Rect, series: &ChartSeries, theme: &Theme) {
    let bars: Vec<Bar> = series
        .points
        .iter()
        .map(|point| {
            let color = if point.value_minor < 0 {
                theme.negative
            } else {
                theme.positive
            };
            Bar::default()
                .value(point.value_minor.unsigned_abs())
                .label(Line::from(point.label.clone()))
                .text_value(format_minor(point.value_minor))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        })
        .collect();

    let chart = BarChart::default()
        .block(card(&series.title, theme))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .label_style(Style::default().fg(theme.text_muted));

    frame.render_widget(chart, area);
}

/// Shifts a signed series so its minimum sits at zero.
///
/// Sparklines only draw non-negative values; the shape is preserved.
#[must_use]
pub fn sparkline_values(series: &ChartSeries) -> Vec<u64> {
    let min = series
        .points
        .iter()
        .map(|point| point.value_minor)
        .min()
        .unwrap_or(0);
    series
        .points
        .iter()
        .map(|point| point.value_minor.abs_diff(min))
        .collect()
}

pub fn render_sparkline(frame: &mut Frame<'_>, area: Rect, series: &ChartSeries, theme: &Theme) {
    let values = sparkline_values(series);
    let sparkline = Sparkline::default()
        .block(card(&series.title, theme))
        .data(&values)
        .style(Style::default().fg(theme.accent));

    frame.render_widget(sparkline, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use view_state::ChartPoint;

    #[test]
    fn sparkline_values_are_shifted_to_zero() {
        let series = ChartSeries {
            title: String::new(),
            points: [-500, 0, 250]
                .into_iter()
                .map(|value_minor| ChartPoint {
                    label: String::new(),
                    value_minor,
                })
                .collect(),
        };
        assert_eq!(sparkline_values(&series), vec![0, 500, 750]);
        assert!(sparkline_values(&ChartSeries::default()).is_empty());
    }
}
