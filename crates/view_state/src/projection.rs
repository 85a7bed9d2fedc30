//! Table and chart payloads derived from a transaction list.
//!
//! These run in the I/O layer before a "received" event is dispatched.
use std::collections::{BTreeMap, HashMap};

use api_types::transaction::{Transaction, TransactionKind};
use chrono::NaiveDate;

use crate::{
    filter::normalize_token,
    state::{ChartPoint, ChartSeries, DateWindow, TableData, TableRow, TableView},
};

/// Bars shown in the top-payments chart unless configured otherwise.
pub const DEFAULT_TOP_PAY_LIMIT: usize = 8;

/// Amount with the sign implied by the kind: income positive, expense negative.
pub fn signed_amount(tx: &Transaction) -> i64 {
    let magnitude = tx.amount_minor.saturating_abs();
    match tx.kind {
        TransactionKind::Income => magnitude,
        TransactionKind::Expense => -magnitude,
    }
}

fn in_view(tx: &Transaction, view: TableView, window: &DateWindow) -> bool {
    view.kind().is_none_or(|kind| tx.kind == kind) && window.contains(tx.date)
}

/// Rows of `view` inside `window`, newest first.
pub fn table_data(transactions: &[Transaction], view: TableView, window: DateWindow) -> TableData {
    let mut rows: Vec<TableRow> = transactions
        .iter()
        .filter(|tx| in_view(tx, view, &window))
        .map(|tx| TableRow {
            id: tx.id,
            date: tx.date,
            account: tx.account.clone(),
            kind: tx.kind,
            concept: tx.concept.clone(),
            amount_minor: signed_amount(tx),
        })
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    TableData {
        title: view.title().to_string(),
        columns: view.columns(),
        rows,
    }
}

/// Largest totals per concept for the top-payments chart.
///
/// `All` keeps the sign (expenses below zero); the single-kind views chart
/// magnitudes.
pub fn top_pay_chart(
    transactions: &[Transaction],
    view: TableView,
    window: DateWindow,
    limit: usize,
) -> ChartSeries {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, (String, i64)> = HashMap::new();

    for tx in transactions.iter().filter(|tx| in_view(tx, view, &window)) {
        let key = normalize_token(&tx.concept);
        let entry = totals.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            (tx.concept.trim().to_string(), 0)
        });
        entry.1 = entry.1.saturating_add(signed_amount(tx));
    }

    let mut points: Vec<ChartPoint> = order
        .into_iter()
        .filter_map(|key| totals.remove(&key))
        .map(|(label, total)| ChartPoint {
            label,
            value_minor: match view {
                TableView::All => total,
                TableView::Income | TableView::Expense => total.saturating_abs(),
            },
        })
        .collect();
    points.sort_by(|a, b| {
        b.value_minor
            .unsigned_abs()
            .cmp(&a.value_minor.unsigned_abs())
            .then_with(|| a.label.cmp(&b.label))
    });
    points.truncate(limit);

    ChartSeries {
        title: format!("Top {}", view.title().to_lowercase()),
        points,
    }
}

/// Running balance at the end of each day with activity inside `window`.
///
/// Transactions before the window seed the opening balance.
pub fn balance_chart(transactions: &[Transaction], window: DateWindow) -> ChartSeries {
    let mut opening = 0i64;
    let mut daily: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    for tx in transactions {
        if window.is_before(tx.date) {
            opening = opening.saturating_add(signed_amount(tx));
        } else if window.contains(tx.date) {
            let day = daily.entry(tx.date).or_insert(0);
            *day = day.saturating_add(signed_amount(tx));
        }
    }

    let mut balance = opening;
    let points = daily
        .into_iter()
        .map(|(date, net)| {
            balance = balance.saturating_add(net);
            ChartPoint {
                label: date.format("%Y-%m-%d").to_string(),
                value_minor: balance,
            }
        })
        .collect();

    ChartSeries {
        title: "Balance".to_string(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn tx(id: u64, day: u32, kind: TransactionKind, concept: &str, amount: i64) -> Transaction {
        Transaction {
            id,
            date: date(day),
            kind,
            account: "Main".to_string(),
            concept: concept.to_string(),
            amount_minor: amount,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, 1, TransactionKind::Income, "Salary", 200_000),
            tx(2, 3, TransactionKind::Expense, "Rent", -90_000),
            tx(3, 3, TransactionKind::Expense, "Café", 450),
            tx(4, 5, TransactionKind::Expense, "cafe", 550),
            tx(5, 9, TransactionKind::Income, "Refund", 1_000),
        ]
    }

    fn window(from: u32, to: u32) -> DateWindow {
        DateWindow {
            from: Some(date(from)),
            to: Some(date(to)),
        }
    }

    #[test]
    fn signed_amount_ignores_incoming_sign() {
        assert_eq!(signed_amount(&tx(1, 1, TransactionKind::Expense, "x", 450)), -450);
        assert_eq!(signed_amount(&tx(1, 1, TransactionKind::Expense, "x", -450)), -450);
        assert_eq!(signed_amount(&tx(1, 1, TransactionKind::Income, "x", -10)), 10);
    }

    #[test]
    fn table_all_is_newest_first_with_type_column() {
        let table = table_data(&sample(), TableView::All, DateWindow::default());
        let ids: Vec<u64> = table.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);
        assert_eq!(table.title, "Income and expenses");
        assert_eq!(table.columns, TableView::All.columns());
    }

    #[test]
    fn table_expense_view_keeps_only_expenses_in_window() {
        let table = table_data(&sample(), TableView::Expense, window(2, 4));
        let ids: Vec<u64> = table.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert!(table.rows.iter().all(|r| r.amount_minor < 0));
    }

    #[test]
    fn top_pay_groups_concepts_ignoring_accents() {
        let chart = top_pay_chart(&sample(), TableView::Expense, DateWindow::default(), 8);
        assert_eq!(chart.title, "Top expenses");
        assert_eq!(
            chart.points,
            vec![
                ChartPoint {
                    label: "Rent".to_string(),
                    value_minor: 90_000
                },
                ChartPoint {
                    label: "Café".to_string(),
                    value_minor: 1_000
                },
            ]
        );
    }

    #[test]
    fn top_pay_all_keeps_sign_and_truncates() {
        let chart = top_pay_chart(&sample(), TableView::All, DateWindow::default(), 2);
        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.points[0].label, "Salary");
        assert_eq!(chart.points[0].value_minor, 200_000);
        assert_eq!(chart.points[1].label, "Rent");
        assert_eq!(chart.points[1].value_minor, -90_000);
    }

    #[test]
    fn balance_carries_opening_balance_into_window() {
        let chart = balance_chart(&sample(), window(3, 5));
        assert_eq!(
            chart.points,
            vec![
                ChartPoint {
                    label: "2024-03-03".to_string(),
                    value_minor: 200_000 - 90_000 - 450
                },
                ChartPoint {
                    label: "2024-03-05".to_string(),
                    value_minor: 200_000 - 90_000 - 450 - 550
                },
            ]
        );
    }

    #[test]
    fn balance_of_empty_list_is_empty() {
        let chart = balance_chart(&[], DateWindow::default());
        assert!(chart.is_empty());
    }
}
