use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    event::TransactionsEvent,
    reducer::reduce,
    state::{Snapshot, TransactionsViewState},
};

/// Owner of the current view-state revision.
///
/// Dispatch takes `&mut self`, so events apply one at a time in call order.
/// Readers either clone the current [`Snapshot`] or hold a `watch` receiver.
#[derive(Debug)]
pub struct Store {
    current: Snapshot,
    revision: u64,
    publisher: watch::Sender<Snapshot>,
}

impl Store {
    pub fn new() -> Self {
        let current = Arc::new(TransactionsViewState::initial());
        let (publisher, _) = watch::channel(Arc::clone(&current));
        Self {
            current,
            revision: 0,
            publisher,
        }
    }

    /// Applies `event` and publishes the result.
    ///
    /// Returns `true` when the state changed.
    pub fn dispatch(&mut self, event: TransactionsEvent) -> bool {
        let name = event.name();
        let next = reduce(&self.current, event);
        let changed = !Arc::ptr_eq(&self.current, &next);

        if changed {
            self.current = next;
            self.revision += 1;
            self.publisher.send_replace(Arc::clone(&self.current));
        }

        tracing::debug!(event = name, changed, revision = self.revision, "dispatched");
        changed
    }

    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.current)
    }

    /// Number of dispatches that changed the state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.publisher.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_counts_only_changes() {
        let mut store = Store::new();
        assert!(!store.dispatch(TransactionsEvent::TransactionsRequested));
        assert_eq!(store.revision(), 0);

        assert!(store.dispatch(TransactionsEvent::transactions_received(Vec::new())));
        assert_eq!(store.revision(), 1);
        assert!(store.snapshot().query_made);

        assert!(!store.dispatch(TransactionsEvent::BalanceDataRequested));
        assert!(store.dispatch(TransactionsEvent::Clean));
        assert!(!store.dispatch(TransactionsEvent::Clean));
        assert_eq!(store.revision(), 2);
        assert_eq!(*store.snapshot(), TransactionsViewState::initial());
    }

    #[tokio::test]
    async fn subscribers_observe_each_change() {
        let mut store = Store::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.dispatch(TransactionsEvent::topup_payment_table_filter_changed("cafe"));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().table_data_filter, "cafe");

        store.dispatch(TransactionsEvent::TopupPaymentDataRequested);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn snapshots_survive_later_dispatches() {
        let mut store = Store::new();
        store.dispatch(TransactionsEvent::topup_payment_table_filter_changed("a"));
        let before = store.snapshot();
        store.dispatch(TransactionsEvent::topup_payment_table_filter_changed("b"));
        assert_eq!(before.table_data_filter, "a");
        assert_eq!(store.snapshot().table_data_filter, "b");
    }
}
