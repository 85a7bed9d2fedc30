use std::sync::Arc;

use api_types::transaction::{Transaction, TransactionKind};
use chrono::{Days, NaiveDate};

/// One published revision of the view state.
pub type Snapshot = Arc<TransactionsViewState>;

/// Reporting window selected in the transactions area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeSpan {
    Last7Days,
    #[default]
    Last30Days,
    Last90Days,
    LastYear,
    All,
}

impl TimeSpan {
    pub fn label(self) -> &'static str {
        match self {
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::Last90Days => "Last 90 days",
            Self::LastYear => "Last year",
            Self::All => "All",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Last7Days => Self::Last30Days,
            Self::Last30Days => Self::Last90Days,
            Self::Last90Days => Self::LastYear,
            Self::LastYear => Self::All,
            Self::All => Self::Last7Days,
        }
    }

    fn days(self) -> Option<u64> {
        match self {
            Self::Last7Days => Some(7),
            Self::Last30Days => Some(30),
            Self::Last90Days => Some(90),
            Self::LastYear => Some(365),
            Self::All => None,
        }
    }

    /// Inclusive date window ending at `today`.
    ///
    /// `All` is unbounded on both sides.
    pub fn window(self, today: NaiveDate) -> DateWindow {
        match self.days() {
            Some(days) => DateWindow {
                from: today.checked_sub_days(Days::new(days - 1)),
                to: Some(today),
            },
            None => DateWindow::default(),
        }
    }
}

/// Inclusive date bounds; `None` leaves that side open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Returns `true` when `date` falls before the lower bound.
    pub fn is_before(&self, date: NaiveDate) -> bool {
        self.from.is_some_and(|from| date < from)
    }
}

/// Which rows the top-up/payment table shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TableView {
    #[default]
    All,
    Income,
    Expense,
}

impl TableView {
    pub fn title(self) -> &'static str {
        match self {
            Self::All => "Income and expenses",
            Self::Income => "Income",
            Self::Expense => "Expenses",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Income,
            Self::Income => Self::Expense,
            Self::Expense => Self::All,
        }
    }

    /// Kind the view is restricted to, if any.
    pub fn kind(self) -> Option<TransactionKind> {
        match self {
            Self::All => None,
            Self::Income => Some(TransactionKind::Income),
            Self::Expense => Some(TransactionKind::Expense),
        }
    }

    pub fn columns(self) -> Vec<TableColumn> {
        match self {
            Self::All => vec![
                TableColumn::Date,
                TableColumn::Account,
                TableColumn::Type,
                TableColumn::Concept,
                TableColumn::Amount,
            ],
            Self::Income | Self::Expense => vec![
                TableColumn::Date,
                TableColumn::Account,
                TableColumn::Concept,
                TableColumn::Amount,
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableColumn {
    Date,
    Account,
    Type,
    Concept,
    Amount,
}

impl TableColumn {
    pub fn header(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Account => "Account",
            Self::Type => "Type",
            Self::Concept => "Concept",
            Self::Amount => "Amount",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub id: u64,
    pub date: NaiveDate,
    pub account: String,
    pub kind: TransactionKind,
    pub concept: String,
    /// Signed cents: income positive, expense negative.
    pub amount_minor: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableData {
    pub title: String,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartPoint {
    pub label: String,
    pub value_minor: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChartSeries {
    pub title: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// UI state of the transactions area.
///
/// Always fully formed: fields that have not been loaded yet are empty or
/// `None`, never missing. Payloads sit behind `Arc` so a new revision shares
/// whatever it did not replace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionsViewState {
    pub query_made: bool,
    pub origin: String,
    pub all_transactions: Arc<Vec<Transaction>>,
    pub time_span: TimeSpan,
    pub table_data: Option<Arc<TableData>>,
    pub table_data_filter: String,
    pub chart_top_pay_data: Option<Arc<ChartSeries>>,
    pub chart_balances_data: Option<Arc<ChartSeries>>,
}

impl TransactionsViewState {
    /// The fixed snapshot a session starts from and `Clean` returns to.
    pub fn initial() -> Self {
        Self {
            query_made: false,
            origin: String::new(),
            all_transactions: Arc::new(Vec::new()),
            time_span: TimeSpan::Last30Days,
            table_data: None,
            table_data_filter: String::new(),
            chart_top_pay_data: None,
            chart_balances_data: None,
        }
    }
}

impl Default for TransactionsViewState {
    fn default() -> Self {
        Self::initial()
    }
}
