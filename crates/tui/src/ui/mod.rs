pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    // Info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::TopupPayment => screens::topup_payment::render(frame, layout[2], state, &theme),
        Section::Balance => screens::balance::render(frame, layout[2], state, &theme),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let snapshot = &state.snapshot;
    // The store's origin is empty until the first payload lands.
    let origin = if snapshot.origin.is_empty() {
        state.origin.as_str()
    } else {
        snapshot.origin.as_str()
    };

    let mut line = vec![
        Span::styled("Account", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {origin}  ")),
        Span::styled("Period", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", snapshot.time_span.label())),
        Span::styled("Transactions", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", snapshot.all_transactions.len())),
    ];

    if !state.loading.is_empty() {
        line.push(Span::styled(
            format!("loading {}", state.loading.join(", ")),
            Style::default().fg(theme.accent),
        ));
    } else if !snapshot.query_made {
        line.push(Span::styled("no data", Style::default().fg(theme.text_muted)));
    }

    if let Some(err) = &state.error {
        line.push(Span::raw("  "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn hint(key: &'static str, label: &'static str, theme: &Theme) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(theme.accent)),
        Span::raw(label),
    ]
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints: Vec<(&'static str, &'static str)> = if state.editing_filter {
        vec![(" Enter", " keep  "), ("Esc", " clear")]
    } else {
        let mut hints = vec![(" 1", "/"), ("2", " nav  ")];
        if state.section == Section::TopupPayment {
            hints.extend([("v", " view  "), ("g", " chart  "), ("/", " filter  ")]);
        }
        hints.extend([("s", " period  "), ("r", " refresh  "), ("c", " clean  ")]);
        hints.push(("q", " quit"));
        hints
    };

    let parts: Vec<Span> = hints
        .into_iter()
        .flat_map(|(key, label)| hint(key, label, theme))
        .collect();
    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
