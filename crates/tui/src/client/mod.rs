use std::future::Future;

use api_types::{
    transaction::{Transaction, TransactionsQuery, TransactionsResponse},
    user::UserNew,
};
use reqwest::{Response, Url};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{AppError, Result};

#[derive(Debug)]
pub enum ClientError {
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict(String),
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

impl ClientError {
    /// Short text shown in the status line.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized | Self::Forbidden => "Not authorized.".to_string(),
            Self::NotFound => "Not found.".to_string(),
            Self::Conflict(message) => format!("Conflict: {message}"),
            Self::Validation(message) => format!("Validation error: {message}"),
            Self::Server(message) => format!("Server error: {message}"),
            Self::Transport(err) => format!("Server unreachable: {err}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Where the effects layer gets transactions from.
pub trait TransactionSource: Clone + Send + Sync + 'static {
    fn fetch_transactions(
        &self,
        query: TransactionsQuery,
    ) -> impl Future<Output = std::result::Result<Vec<Transaction>, ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        // `Url::join` replaces the last segment unless the path ends in a slash.
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)
        } else {
            Url::parse(&format!("{base_url}/"))
        }
        .map_err(|err| {
            AppError::Config(config::ConfigError::Message(format!(
                "invalid base_url: {err}"
            )))
        })?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    pub async fn transactions_list(
        &self,
        query: &TransactionsQuery,
    ) -> std::result::Result<TransactionsResponse, ClientError> {
        let res = self.post("transactions", query).await?;
        decode(res).await
    }

    /// Registers a user; the response body is ignored.
    pub async fn user_register(&self, user: &UserNew) -> std::result::Result<(), ClientError> {
        let res = self.post("users", user).await?;
        if res.status().is_success() {
            return Ok(());
        }
        Err(error_from(res).await)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<Response, ClientError> {
        let endpoint = self
            .base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;

        tracing::debug!(%endpoint, "POST");
        self.http
            .post(endpoint)
            .json(body)
            .send()
            .await
            .map_err(ClientError::Transport)
    }
}

impl TransactionSource for Client {
    async fn fetch_transactions(
        &self,
        query: TransactionsQuery,
    ) -> std::result::Result<Vec<Transaction>, ClientError> {
        self.transactions_list(&query)
            .await
            .map(|response| response.transactions)
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> std::result::Result<T, ClientError> {
    if res.status().is_success() {
        return res.json::<T>().await.map_err(ClientError::Transport);
    }
    Err(error_from(res).await)
}

async fn error_from(res: Response) -> ClientError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    match status.as_u16() {
        401 => ClientError::Unauthorized,
        403 => ClientError::Forbidden,
        404 => ClientError::NotFound,
        409 => ClientError::Conflict(body),
        422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    }
}
