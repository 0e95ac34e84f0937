//! Error types for the inventory.

use partshop_core::{StockError, ValidationError};
use partshop_store::StoreError;
use thiserror::Error;

/// Errors that can occur during inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Bad input to a constructor or mutator.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Stock change rejected by a business rule.
    #[error("stock error: {0}")]
    Stock(#[from] StockError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// No stock record with this code.
    #[error("item not found: {0}")]
    NotFound(String),
}

impl InventoryError {
    /// The request was refused as given; correcting the input can succeed.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Stock(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The backing storage failed; nothing the caller sent was wrong.
    pub fn is_server_fault(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// Result type for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;
