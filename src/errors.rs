use thiserror::Error;
use uuid::Uuid;

/// Error type that captures the recoverable failures of the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("Recurring expense not found: {0}")]
    RecurringNotFound(Uuid),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Assist request failed: {0}")]
    Assist(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
