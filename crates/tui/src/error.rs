use thiserror::Error;

use crate::registration::RegistrationError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid registration: {0}")]
    Registration(#[from] RegistrationError),
    #[error("request failed: {0}")]
    Request(String),
    #[error("terminal error: {0}")]
    Terminal(String),
}
