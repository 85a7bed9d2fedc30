use std::sync::Arc;

use crate::{
    event::TransactionsEvent,
    state::{Snapshot, TransactionsViewState},
};

/// Computes the next revision of the view state.
///
/// Never touches `state`. Request events and a `Clean` on an already clean
/// state return the same `Arc`; everything else returns a fresh one with the
/// named fields replaced and the rest shared.
pub fn reduce(state: &Snapshot, event: TransactionsEvent) -> Snapshot {
    match event {
        TransactionsEvent::TransactionsRequested
        | TransactionsEvent::TopupPaymentDataRequested
        | TransactionsEvent::TopupPaymentChartFilterRequested
        | TransactionsEvent::BalanceDataRequested => Arc::clone(state),
        TransactionsEvent::TransactionsReceived { all_transactions } => {
            replace(state, |next| {
                next.query_made = true;
                next.all_transactions = all_transactions;
            })
        }
        TransactionsEvent::TopupPaymentDataReceived {
            origin,
            table_data,
            chart_top_pay_data,
        } => replace(state, |next| {
            next.origin = origin;
            next.table_data = table_data;
            next.chart_top_pay_data = chart_top_pay_data;
        }),
        TransactionsEvent::TopupPaymentChartFilterReceived { chart_top_pay_data } => {
            replace(state, |next| next.chart_top_pay_data = chart_top_pay_data)
        }
        TransactionsEvent::TopupPaymentTableFilterChanged { table_data_filter } => {
            replace(state, |next| next.table_data_filter = table_data_filter)
        }
        TransactionsEvent::BalanceDataReceived {
            origin,
            chart_balances_data,
        } => replace(state, |next| {
            next.origin = origin;
            next.chart_balances_data = chart_balances_data;
        }),
        TransactionsEvent::TimeSpanSelected { time_span } => {
            replace(state, |next| next.time_span = time_span)
        }
        TransactionsEvent::Clean => {
            let initial = TransactionsViewState::initial();
            if **state == initial {
                Arc::clone(state)
            } else {
                Arc::new(initial)
            }
        }
    }
}

fn replace(state: &Snapshot, apply: impl FnOnce(&mut TransactionsViewState)) -> Snapshot {
    let mut next = TransactionsViewState::clone(state);
    apply(&mut next);
    Arc::new(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ChartPoint, ChartSeries, TableData, TimeSpan};

    fn loaded() -> Snapshot {
        let state = Arc::new(TransactionsViewState::initial());
        let state = reduce(
            &state,
            TransactionsEvent::topup_payment_data_received(
                "Checking",
                TableData::default(),
                ChartSeries {
                    title: "Top".to_string(),
                    points: vec![ChartPoint {
                        label: "Rent".to_string(),
                        value_minor: -90_000,
                    }],
                },
            ),
        );
        reduce(
            &state,
            TransactionsEvent::balance_data_received("Checking", ChartSeries::default()),
        )
    }

    #[test]
    fn requests_return_the_same_snapshot() {
        let state = loaded();
        for event in [
            TransactionsEvent::TransactionsRequested,
            TransactionsEvent::TopupPaymentDataRequested,
            TransactionsEvent::TopupPaymentChartFilterRequested,
            TransactionsEvent::BalanceDataRequested,
        ] {
            assert!(event.is_request());
            let next = reduce(&state, event);
            assert!(Arc::ptr_eq(&state, &next));
        }
    }

    #[test]
    fn received_payloads_are_shared_not_copied() {
        let state = loaded();
        let next = reduce(
            &state,
            TransactionsEvent::topup_payment_table_filter_changed("rent"),
        );
        assert!(!Arc::ptr_eq(&state, &next));
        assert!(Arc::ptr_eq(
            state.chart_top_pay_data.as_ref().unwrap(),
            next.chart_top_pay_data.as_ref().unwrap()
        ));
        assert!(Arc::ptr_eq(&state.all_transactions, &next.all_transactions));
    }

    #[test]
    fn chart_filter_received_replaces_only_the_top_pay_chart() {
        let state = loaded();
        let next = reduce(
            &state,
            TransactionsEvent::TopupPaymentChartFilterReceived {
                chart_top_pay_data: None,
            },
        );
        assert!(next.chart_top_pay_data.is_none());
        assert_eq!(next.origin, state.origin);
        assert_eq!(next.table_data, state.table_data);
        assert_eq!(next.chart_balances_data, state.chart_balances_data);
    }

    #[test]
    fn time_span_selected_replaces_only_time_span() {
        let state = loaded();
        let next = reduce(
            &state,
            TransactionsEvent::TimeSpanSelected {
                time_span: TimeSpan::LastYear,
            },
        );
        assert_eq!(next.time_span, TimeSpan::LastYear);
        let mut expected = TransactionsViewState::clone(&state);
        expected.time_span = TimeSpan::LastYear;
        assert_eq!(*next, expected);
    }

    #[test]
    fn clean_on_clean_state_is_a_no_op() {
        let state = Arc::new(TransactionsViewState::initial());
        let next = reduce(&state, TransactionsEvent::Clean);
        assert!(Arc::ptr_eq(&state, &next));
    }
}
