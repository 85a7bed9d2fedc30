use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};
use view_state::ChartSeries;

use crate::{
    app::AppState,
    ui::{
        components::{charts::render_sparkline, money::styled_amount},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(series) = state
        .snapshot
        .chart_balances_data
        .as_deref()
        .filter(|series| !series.is_empty())
    else {
        let block = Block::default()
            .title(" Balance ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border));
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("No balance data. Press "),
                Span::styled("r", Style::default().fg(theme.accent)),
                Span::raw(" to refresh."),
            ]))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6), Constraint::Length(8)])
        .split(area);

    render_summary(frame, layout[0], series, theme);
    render_sparkline(frame, layout[1], series, theme);
    render_recent(frame, layout[2], series, theme);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, series: &ChartSeries, theme: &Theme) {
    let values = series.points.iter().map(|point| point.value_minor);
    let min = values.clone().min().unwrap_or(0);
    let max = values.clone().max().unwrap_or(0);
    let last = values.last().unwrap_or(0);

    let line = Line::from(vec![
        Span::styled("Current", Style::default().fg(theme.text_muted)),
        Span::raw(": "),
        styled_amount(last, theme),
        Span::styled("   Low", Style::default().fg(theme.text_muted)),
        Span::raw(": "),
        styled_amount(min, theme),
        Span::styled("   High", Style::default().fg(theme.text_muted)),
        Span::raw(": "),
        styled_amount(max, theme),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_recent(frame: &mut Frame<'_>, area: Rect, series: &ChartSeries, theme: &Theme) {
    let capacity = usize::from(area.height.saturating_sub(2));
    let items: Vec<ListItem> = series
        .points
        .iter()
        .rev()
        .take(capacity)
        .map(|point| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<12}", point.label),
                    Style::default().fg(theme.text_muted),
                ),
                styled_amount(point.value_minor, theme),
            ]))
        })
        .collect();

    let block = Block::default()
        .title(" Latest ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(List::new(items).block(block), area);
}
