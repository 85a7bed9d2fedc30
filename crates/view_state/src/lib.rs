//! Transaction-browsing view state.
//!
//! The state is an immutable-per-revision [`TransactionsViewState`] published
//! as a [`Snapshot`]. Every change goes through [`reduce`], a pure function of
//! the previous snapshot and a [`TransactionsEvent`]. [`Store`] owns the
//! current revision and notifies observers.
//!
//! [`projection`] and [`filter`] build and narrow the table/chart payloads the
//! "received" events carry; the reducer itself never computes them.
pub use event::TransactionsEvent;
pub use reducer::reduce;
pub use state::{
    ChartPoint, ChartSeries, DateWindow, Snapshot, TableColumn, TableData, TableRow, TableView,
    TimeSpan, TransactionsViewState,
};
pub use store::Store;

pub mod filter;
pub mod projection;

mod event;
mod reducer;
mod state;
mod store;
