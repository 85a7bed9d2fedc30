use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Formats integer cents as `-1,234.56€`.
#[must_use]
pub fn format_minor(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let units = (abs / 100).to_string();
    let cents = abs % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}{grouped}.{cents:02}€")
}

/// Creates a styled span for a money amount with semantic coloring.
///
/// - Positive amounts: green with `+` prefix
/// - Negative amounts: red
/// - Zero: neutral text color
#[must_use]
pub fn styled_amount(amount: i64, theme: &Theme) -> Span<'static> {
    let (color, prefix) = if amount > 0 {
        (theme.positive, "+")
    } else if amount < 0 {
        (theme.negative, "")
    } else {
        (theme.text, "")
    };

    Span::styled(
        format!("{prefix}{}", format_minor(amount)),
        Style::default().fg(color),
    )
}
