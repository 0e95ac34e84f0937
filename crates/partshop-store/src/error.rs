//! Error types for the store module.

use partshop_core::ValidationError;
use thiserror::Error;

/// A single stored row that cannot be turned back into a stock item.
///
/// Loads recover from this locally by skipping the row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CorruptRecordError {
    #[error("expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("quantity {0:?} is not a whole number")]
    InvalidQuantity(String),

    #[error("price {0:?} is not a number")]
    InvalidPrice(String),

    #[error("quantity cannot be negative: {0}")]
    NegativeQuantity(i64),

    #[error("price cannot be negative: {0}")]
    NegativePrice(f64),

    #[error("record is not valid UTF-8")]
    InvalidUtf8,

    #[error("unknown item type {0:?}")]
    UnknownKind(String),

    #[error("invalid field: {0}")]
    Invalid(#[from] ValidationError),
}

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error on a backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reading or writing the text table.
    #[error("table error: {0}")]
    Table(#[from] csv::Error),

    /// A row could not be decoded.
    #[error("corrupt record: {0}")]
    CorruptRecord(#[from] CorruptRecordError),

    /// A sales ledger line could not be read; no aggregate is produced.
    #[error("corrupt sales ledger at line {line}: {reason}")]
    CorruptLedger { line: u64, reason: String },

    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Whether the backing resource itself failed, as opposed to one
    /// unreadable record.
    pub fn is_storage(&self) -> bool {
        !matches!(self, StoreError::CorruptRecord(_))
    }
}

impl From<tempfile::PersistError> for StoreError {
    fn from(e: tempfile::PersistError) -> Self {
        StoreError::Io(e.error)
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
