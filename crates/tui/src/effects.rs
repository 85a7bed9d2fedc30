//! Turns "requested" events into fetches and fetch results into "received"
//! events.
//!
//! Every request of a kind gets a fresh generation number. A completion is
//! dispatched only if its generation is still the latest one issued for that
//! kind, so a slow response can never overwrite a newer one and nothing
//! issued before a `Clean` lands after it.
//!
//! `TopupPaymentData` and `TopupPaymentChartFilter` both write the top-payments
//! chart, so they also share a chart sequence. A response whose chart is older
//! than the newest chart request never replaces the chart.
use std::collections::{HashMap, HashSet};

use api_types::transaction::{Transaction, TransactionsQuery};
use tokio::sync::mpsc;
use view_state::{DateWindow, Store, TableView, TransactionsEvent, projection};

use crate::client::{ClientError, TransactionSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Transactions,
    TopupPaymentData,
    TopupPaymentChartFilter,
    BalanceData,
}

impl RequestKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::TopupPaymentData => "payments",
            Self::TopupPaymentChartFilter => "chart",
            Self::BalanceData => "balance",
        }
    }

    fn requested_event(self) -> TransactionsEvent {
        match self {
            Self::Transactions => TransactionsEvent::TransactionsRequested,
            Self::TopupPaymentData => TransactionsEvent::TopupPaymentDataRequested,
            Self::TopupPaymentChartFilter => TransactionsEvent::TopupPaymentChartFilterRequested,
            Self::BalanceData => TransactionsEvent::BalanceDataRequested,
        }
    }

    fn writes_top_pay_chart(self) -> bool {
        matches!(self, Self::TopupPaymentData | Self::TopupPaymentChartFilter)
    }
}

/// What the projection of a response depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestParams {
    pub view: TableView,
    pub window: DateWindow,
}

#[derive(Debug)]
pub struct Completion {
    kind: RequestKind,
    generation: u64,
    chart_seq: u64,
    outcome: Result<TransactionsEvent, ClientError>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Applied {
    Dispatched,
    Stale,
    Failed(String),
}

#[derive(Debug, Clone)]
struct Job {
    kind: RequestKind,
    origin: String,
    params: RequestParams,
    top_pay_limit: usize,
}

impl Job {
    fn query(&self) -> TransactionsQuery {
        let window = self.params.window;
        match self.kind {
            RequestKind::Transactions | RequestKind::TopupPaymentData => TransactionsQuery {
                origin: self.origin.clone(),
                from: window.from,
                to: window.to,
                kind: None,
            },
            RequestKind::TopupPaymentChartFilter => TransactionsQuery {
                origin: self.origin.clone(),
                from: window.from,
                to: window.to,
                kind: self.params.view.kind(),
            },
            // Everything up to the window end: older rows seed the opening balance.
            RequestKind::BalanceData => TransactionsQuery {
                origin: self.origin.clone(),
                from: None,
                to: window.to,
                kind: None,
            },
        }
    }

    fn received(&self, list: Vec<Transaction>) -> TransactionsEvent {
        let RequestParams { view, window } = self.params;
        match self.kind {
            RequestKind::Transactions => TransactionsEvent::transactions_received(list),
            RequestKind::TopupPaymentData => TransactionsEvent::topup_payment_data_received(
                self.origin.clone(),
                projection::table_data(&list, view, window),
                projection::top_pay_chart(&list, view, window, self.top_pay_limit),
            ),
            RequestKind::TopupPaymentChartFilter => {
                TransactionsEvent::topup_payment_chart_filter_received(projection::top_pay_chart(
                    &list,
                    view,
                    window,
                    self.top_pay_limit,
                ))
            }
            RequestKind::BalanceData => TransactionsEvent::balance_data_received(
                self.origin.clone(),
                projection::balance_chart(&list, window),
            ),
        }
    }
}

pub struct Effects<S> {
    source: S,
    origin: String,
    top_pay_limit: usize,
    latest: HashMap<RequestKind, u64>,
    chart_seq: u64,
    in_flight: HashSet<RequestKind>,
    sender: mpsc::UnboundedSender<Completion>,
    receiver: mpsc::UnboundedReceiver<Completion>,
}

impl<S: TransactionSource> Effects<S> {
    pub fn new(source: S, origin: impl Into<String>, top_pay_limit: usize) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            source,
            origin: origin.into(),
            top_pay_limit,
            latest: HashMap::new(),
            chart_seq: 0,
            in_flight: HashSet::new(),
            sender,
            receiver,
        }
    }

    /// Dispatches the request event for `kind` and starts the fetch.
    ///
    /// Must be called from within a tokio runtime.
    pub fn request(&mut self, store: &mut Store, kind: RequestKind, params: RequestParams) {
        store.dispatch(kind.requested_event());

        let generation = self.latest.entry(kind).or_insert(0);
        *generation += 1;
        let generation = *generation;
        self.in_flight.insert(kind);

        if kind.writes_top_pay_chart() {
            self.chart_seq += 1;
        }
        // A fresh table request replaces the chart too; an older chart-only
        // fetch can no longer land.
        if kind == RequestKind::TopupPaymentData
            && self.in_flight.remove(&RequestKind::TopupPaymentChartFilter)
        {
            self.bump(RequestKind::TopupPaymentChartFilter);
        }
        let chart_seq = self.chart_seq;

        let job = Job {
            kind,
            origin: self.origin.clone(),
            params,
            top_pay_limit: self.top_pay_limit,
        };
        let source = self.source.clone();
        let sender = self.sender.clone();
        tracing::debug!(kind = kind.label(), generation, "request started");

        tokio::spawn(async move {
            let outcome = source
                .fetch_transactions(job.query())
                .await
                .map(|list| job.received(list));
            if sender
                .send(Completion {
                    kind,
                    generation,
                    chart_seq,
                    outcome,
                })
                .is_err()
            {
                tracing::debug!(kind = kind.label(), "completion dropped, effects closed");
            }
        });
    }

    /// Invalidates every outstanding request.
    pub fn reset(&mut self) {
        for generation in self.latest.values_mut() {
            *generation += 1;
        }
        self.chart_seq += 1;
        self.in_flight.clear();
    }

    fn bump(&mut self, kind: RequestKind) {
        *self.latest.entry(kind).or_insert(0) += 1;
    }

    pub fn in_flight(&self) -> impl Iterator<Item = RequestKind> + '_ {
        self.in_flight.iter().copied()
    }

    /// Applies one completion to `store` unless it was superseded.
    pub fn apply(&mut self, store: &mut Store, completion: Completion) -> Applied {
        let Completion {
            kind,
            generation,
            chart_seq,
            outcome,
        } = completion;

        if self.latest.get(&kind).copied() != Some(generation) {
            tracing::debug!(kind = kind.label(), generation, "stale completion dropped");
            return Applied::Stale;
        }
        self.in_flight.remove(&kind);

        let chart_is_stale = kind.writes_top_pay_chart() && chart_seq != self.chart_seq;
        match outcome {
            Ok(event) => {
                let event = if chart_is_stale {
                    tracing::debug!(kind = kind.label(), chart_seq, "keeping newer chart");
                    keep_current_chart(store, event)
                } else {
                    event
                };
                store.dispatch(event);
                Applied::Dispatched
            }
            Err(err) => {
                tracing::warn!(kind = kind.label(), "request failed: {err:?}");
                Applied::Failed(err.user_message())
            }
        }
    }

    /// Applies every completion that has already arrived.
    ///
    /// Returns the last failure message, if any.
    pub fn drain(&mut self, store: &mut Store) -> Option<String> {
        let mut failure = None;
        while let Ok(completion) = self.receiver.try_recv() {
            if let Applied::Failed(message) = self.apply(store, completion) {
                failure = Some(message);
            }
        }
        failure
    }

    /// Waits for the next completion.
    #[cfg(test)]
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.receiver.recv().await
    }
}

/// Swaps the chart carried by `event` for the one already in the store.
fn keep_current_chart(store: &Store, event: TransactionsEvent) -> TransactionsEvent {
    let current = store.snapshot().chart_top_pay_data.clone();
    match event {
        TransactionsEvent::TopupPaymentDataReceived {
            origin, table_data, ..
        } => TransactionsEvent::TopupPaymentDataReceived {
            origin,
            table_data,
            chart_top_pay_data: current,
        },
        TransactionsEvent::TopupPaymentChartFilterReceived { .. } => {
            TransactionsEvent::TopupPaymentChartFilterReceived {
                chart_top_pay_data: current,
            }
        }
        other => other,
    }
}
