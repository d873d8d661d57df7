use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum LedgerError {
    /// Malformed expense: empty participants, unknown member, bad amount
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),

    /// Payment status change not allowed from the current state
    #[error("Invalid transition for settlement {settlement_id}: {from} -> {to}")]
    InvalidTransition {
        settlement_id: String,
        from: String,
        to: String,
    },

    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Group {0} not found")]
    GroupNotFound(String),

    #[error("Member {0} not found")]
    MemberNotFound(String),

    #[error("Member {0} is not a group member")]
    NotGroupMember(String),

    #[error("Settlement {0} not found")]
    SettlementNotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}

impl LedgerError {
    pub(crate) fn invalid_input(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        LedgerError::InvalidInput(field.to_string(), FieldError::new(field, title, description))
    }
}
