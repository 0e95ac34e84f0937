//! Field validation shared by constructors and mutators.
//!
//! Every check is a pure function so the entity can validate a whole
//! change before touching any field.

use crate::error::ValidationError;
use crate::item::StockItem;

/// Check an initial quantity against the stock ceiling.
pub fn validate_quantity(quantity: u32) -> Result<(), ValidationError> {
    if quantity > StockItem::MAX_QUANTITY {
        return Err(ValidationError::QuantityAboveMaximum {
            quantity,
            max: StockItem::MAX_QUANTITY,
        });
    }
    Ok(())
}

/// Check a price without tax. NaN and infinities are rejected along with
/// zero and negative values.
pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::InvalidPrice(price));
    }
    Ok(())
}

/// Check a brand name.
///
/// Control characters are rejected so the brand always survives the
/// row-per-line text table unchanged.
pub fn validate_brand(brand: &str) -> Result<(), ValidationError> {
    if brand.trim().is_empty() {
        return Err(ValidationError::EmptyBrand);
    }
    if brand.chars().any(char::is_control) {
        return Err(ValidationError::InvalidBrand(brand.to_string()));
    }
    Ok(())
}

/// Check the amount of a restock or sale.
pub fn validate_amount(amount: u32) -> Result<(), ValidationError> {
    if amount < 1 {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(())
}
