use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod transaction {
    use super::*;

    /// Direction of a transaction as labelled by the API.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum TransactionKind {
        #[serde(rename = "Ingreso")]
        Income,
        #[serde(rename = "Egreso")]
        Expense,
    }

    impl TransactionKind {
        /// Returns the label used in tables and filters.
        pub fn label(self) -> &'static str {
            match self {
                Self::Income => "Income",
                Self::Expense => "Expense",
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Transaction {
        pub id: u64,
        pub date: NaiveDate,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        /// Account the movement was booked on.
        ///
        /// Older API versions omit it.
        #[serde(default)]
        pub account: String,
        pub concept: String,
        /// Amount in integer cents.
        ///
        /// Expenses may arrive either signed or as a magnitude; consumers
        /// derive the sign from `kind`.
        pub amount_minor: i64,
    }

    /// Request body for fetching the transactions of one origin.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransactionsQuery {
        pub origin: String,
        /// Inclusive lower bound; `None` means no lower bound.
        pub from: Option<NaiveDate>,
        /// Inclusive upper bound.
        pub to: Option<NaiveDate>,
        /// Restricts the result to one kind (server-side chart filter).
        pub kind: Option<TransactionKind>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionsResponse {
        pub transactions: Vec<Transaction>,
    }
}

pub mod user {
    use super::*;

    /// Role assigned to self-registered users.
    pub const DEFAULT_ROLE_ID: u32 = 1;

    /// Request body for `POST /users`.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserNew {
        pub first_name: String,
        pub last_name: String,
        pub email: String,
        pub password: String,
        #[serde(rename = "roleId")]
        pub role_id: u32,
        pub points: u32,
    }
}
