//! Ledger error model.

use thiserror::Error;

/// Result type used across the ledger crates.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// Every variant is a deterministic input failure raised at the insertion or
/// query boundary. Nothing here is retried or recovered internally; callers
/// decide how to react.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The amount could not be read as an exact decimal.
    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: String },

    /// The expiration date did not match `YYYY-MM-DD`.
    #[error("invalid date {input:?}: {reason}")]
    InvalidDate { input: String, reason: String },

    /// A value was well-formed but violates a ledger rule.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A total exceeded the range of an exact decimal.
    #[error("amount overflow: {0}")]
    Overflow(String),
}

impl LedgerError {
    pub fn invalid_amount(input: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidAmount {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_date(input: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidDate {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::Overflow(msg.into())
    }
}
