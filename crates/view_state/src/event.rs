use std::sync::Arc;

use api_types::transaction::Transaction;

use crate::state::{ChartSeries, TableData, TimeSpan};

/// Everything that can happen to the transactions view state.
///
/// `*Requested` events carry nothing the reducer reads. They are dispatched so
/// the I/O layer (and anyone observing the event stream) knows a fetch started.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionsEvent {
    TransactionsRequested,
    TransactionsReceived {
        all_transactions: Arc<Vec<Transaction>>,
    },
    TopupPaymentDataRequested,
    TopupPaymentDataReceived {
        origin: String,
        table_data: Option<Arc<TableData>>,
        chart_top_pay_data: Option<Arc<ChartSeries>>,
    },
    TopupPaymentChartFilterRequested,
    TopupPaymentChartFilterReceived {
        chart_top_pay_data: Option<Arc<ChartSeries>>,
    },
    TopupPaymentTableFilterChanged {
        table_data_filter: String,
    },
    BalanceDataRequested,
    BalanceDataReceived {
        origin: String,
        chart_balances_data: Option<Arc<ChartSeries>>,
    },
    TimeSpanSelected {
        time_span: TimeSpan,
    },
    Clean,
}

impl TransactionsEvent {
    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TransactionsRequested => "transactions_requested",
            Self::TransactionsReceived { .. } => "transactions_received",
            Self::TopupPaymentDataRequested => "topup_payment_data_requested",
            Self::TopupPaymentDataReceived { .. } => "topup_payment_data_received",
            Self::TopupPaymentChartFilterRequested => "topup_payment_chart_filter_requested",
            Self::TopupPaymentChartFilterReceived { .. } => "topup_payment_chart_filter_received",
            Self::TopupPaymentTableFilterChanged { .. } => "topup_payment_table_filter_changed",
            Self::BalanceDataRequested => "balance_data_requested",
            Self::BalanceDataReceived { .. } => "balance_data_received",
            Self::TimeSpanSelected { .. } => "time_span_selected",
            Self::Clean => "clean",
        }
    }

    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Self::TransactionsRequested
                | Self::TopupPaymentDataRequested
                | Self::TopupPaymentChartFilterRequested
                | Self::BalanceDataRequested
        )
    }

    pub fn transactions_received(all_transactions: Vec<Transaction>) -> Self {
        Self::TransactionsReceived {
            all_transactions: Arc::new(all_transactions),
        }
    }

    pub fn topup_payment_data_received(
        origin: impl Into<String>,
        table_data: TableData,
        chart_top_pay_data: ChartSeries,
    ) -> Self {
        Self::TopupPaymentDataReceived {
            origin: origin.into(),
            table_data: Some(Arc::new(table_data)),
            chart_top_pay_data: Some(Arc::new(chart_top_pay_data)),
        }
    }

    pub fn topup_payment_chart_filter_received(chart_top_pay_data: ChartSeries) -> Self {
        Self::TopupPaymentChartFilterReceived {
            chart_top_pay_data: Some(Arc::new(chart_top_pay_data)),
        }
    }

    pub fn topup_payment_table_filter_changed(table_data_filter: impl Into<String>) -> Self {
        Self::TopupPaymentTableFilterChanged {
            table_data_filter: table_data_filter.into(),
        }
    }

    pub fn balance_data_received(
        origin: impl Into<String>,
        chart_balances_data: ChartSeries,
    ) -> Self {
        Self::BalanceDataReceived {
            origin: origin.into(),
            chart_balances_data: Some(Arc::new(chart_balances_data)),
        }
    }
}
