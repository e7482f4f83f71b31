use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the projection core, stores, and configuration.
#[derive(Debug, Error)]
pub enum CashflowError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, CashflowError>;

impl From<std::io::Error> for CashflowError {
    fn from(err: std::io::Error) -> Self {
        CashflowError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for CashflowError {
    fn from(err: serde_json::Error) -> Self {
        CashflowError::StorageError(err.to_string())
    }
}
