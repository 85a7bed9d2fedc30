use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};
use view_state::{TableColumn, TableData, TableRow, filter::filtered_rows};

use crate::{
    app::AppState,
    ui::{
        components::{charts::render_signed_bars, money::styled_amount},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    render_header(frame, layout[0], state, theme);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(layout[1]);

    match state.snapshot.table_data.as_deref() {
        Some(table) => render_table(frame, body[0], table, state, theme),
        None => render_empty(frame, body[0], "Payments", theme),
    }

    match state.snapshot.chart_top_pay_data.as_deref() {
        Some(series) if !series.is_empty() => render_signed_bars(frame, body[1], series, theme),
        Some(series) => render_empty(frame, body[1], &series.title, theme),
        None => render_empty(frame, body[1], "Top payments", theme),
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let filter = &state.snapshot.table_data_filter;
    let mut line = vec![
        Span::styled(" View", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}   ", state.table_view.title())),
        Span::styled("Chart", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}   ", state.chart_view.title())),
        Span::styled("Filter", Style::default().fg(theme.text_muted)),
        Span::raw(": "),
    ];
    if state.editing_filter {
        line.push(Span::styled(
            format!("{filter}_"),
            Style::default().fg(theme.accent),
        ));
    } else if filter.is_empty() {
        line.push(Span::styled("-", Style::default().fg(theme.text_muted)));
    } else {
        line.push(Span::raw(filter.clone()));
    }
    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn column_width(column: TableColumn) -> Constraint {
    match column {
        TableColumn::Date => Constraint::Length(10),
        TableColumn::Account => Constraint::Length(12),
        TableColumn::Type => Constraint::Length(8),
        TableColumn::Concept => Constraint::Min(12),
        TableColumn::Amount => Constraint::Length(14),
    }
}

fn cell(row: &TableRow, column: TableColumn, theme: &Theme) -> Cell<'static> {
    match column {
        TableColumn::Date => Cell::from(row.date.format("%d/%m/%Y").to_string()),
        TableColumn::Account => Cell::from(row.account.clone()),
        TableColumn::Type => Cell::from(row.kind.label()),
        TableColumn::Concept => Cell::from(row.concept.clone()),
        TableColumn::Amount => Cell::from(Line::from(styled_amount(row.amount_minor, theme))),
    }
}

fn render_table(
    frame: &mut Frame<'_>,
    area: Rect,
    table: &TableData,
    state: &AppState,
    theme: &Theme,
) {
    let rows = filtered_rows(table, &state.snapshot.table_data_filter);
    let title = format!(" {} ({}/{}) ", table.title, rows.len(), table.rows.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if rows.is_empty() {
        let message = if table.rows.is_empty() {
            "No transactions in this period."
        } else {
            "Nothing matches the filter."
        };
        frame.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.text_muted))
                .block(block),
            area,
        );
        return;
    }

    let header = Row::new(table.columns.iter().map(|column| column.header()))
        .style(Style::default().fg(theme.text_muted).add_modifier(Modifier::BOLD));
    let body = rows.iter().map(|row| {
        Row::new(
            table
                .columns
                .iter()
                .map(|column| cell(row, *column, theme))
                .collect::<Vec<_>>(),
        )
    });
    let widths: Vec<Constraint> = table.columns.iter().copied().map(column_width).collect();

    let widget = Table::new(body, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(theme.highlight).fg(theme.text));

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(widget, area, &mut table_state);
}

fn render_empty(frame: &mut Frame<'_>, area: Rect, title: &str, theme: &Theme) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("No data. Press "),
            Span::styled("r", Style::default().fg(theme.accent)),
            Span::raw(" to refresh."),
        ]))
        .alignment(Alignment::Center)
        .block(block),
        area,
    );
}
