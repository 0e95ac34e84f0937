//! Error types for the parts shop domain model.

use thiserror::Error;

use crate::item::ItemKind;

/// Bad input to a constructor or mutator.
///
/// Always recoverable by correcting the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("stock code must be a non-empty string")]
    EmptyStockCode,

    #[error("stock code {0:?} contains control characters")]
    InvalidStockCode(String),

    #[error("quantity {quantity} exceeds the maximum of {max} units")]
    QuantityAboveMaximum { quantity: u32, max: u32 },

    #[error("price must be a finite number greater than 0, got {0}")]
    InvalidPrice(f64),

    #[error("amount must be greater than or equal to one")]
    NonPositiveAmount,

    #[error("brand must be a non-empty string")]
    EmptyBrand,

    #[error("brand {0:?} contains control characters")]
    InvalidBrand(String),

    #[error("items of kind {0} do not carry a brand")]
    BrandNotSupported(ItemKind),
}

/// Errors from stock level mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StockError {
    /// The requested change is malformed.
    #[error("invalid stock change: {0}")]
    Validation(#[from] ValidationError),

    /// The change is well-formed but would break the stock ceiling.
    #[error(
        "stock for {stock_code} cannot exceed {max} items: {current} in stock, {requested} requested"
    )]
    LimitExceeded {
        stock_code: String,
        current: u32,
        requested: u32,
        max: u32,
    },
}

impl StockError {
    /// Whether this is the business-rule ceiling rather than bad input.
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(self, StockError::LimitExceeded { .. })
    }
}
