use thiserror::Error;

use crate::domain::{AmountError, EntryNotFound, ValidationError};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AppError {
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: AmountError },

    #[error("Description must not be empty")]
    EmptyDescription,

    #[error("Expense not found: {0}")]
    EntryNotFound(String),

    #[error("Invalid expense reference '{0}' (use the number shown by `list` or a full entry id)")]
    InvalidReference(String),

    #[error("Ledger integrity check failed: {0}")]
    IntegrityViolation(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidAmount { input, reason } => {
                AppError::InvalidAmount { input, reason }
            }
            ValidationError::EmptyDescription => AppError::EmptyDescription,
        }
    }
}

impl From<EntryNotFound> for AppError {
    fn from(err: EntryNotFound) -> Self {
        AppError::EntryNotFound(err.0.to_string())
    }
}
