//! Stock items: the validated records the shop keeps in stock.
//!
//! An item is only ever mutated through its methods. Each method validates
//! the whole change first and then applies it, so a rejected call leaves the
//! item exactly as it was.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::error::{StockError, ValidationError};
use crate::record::StockRecord;
use crate::types::StockCode;
use crate::validation::{validate_amount, validate_brand, validate_price, validate_quantity};

/// The variant of a stock item.
///
/// The storage tag is the row discriminant; adding a kind here and to
/// [`StockItem::from_parts`] is all a new variant needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// A plain stock item with no variant-specific fields.
    Generic,
    /// A satellite navigation unit, identified by brand.
    NavigationSystem,
}

impl ItemKind {
    /// Every known kind.
    pub const ALL: [ItemKind; 2] = [ItemKind::Generic, ItemKind::NavigationSystem];

    /// The tag written in the `item_type` column.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Generic => "StockItem",
            Self::NavigationSystem => "NavSys",
        }
    }

    /// Parse an `item_type` column value.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Human-readable name of the kind.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Generic => "Unknown Stock Name",
            Self::NavigationSystem => "Navigation system",
        }
    }

    /// Catalogue description of the kind.
    pub fn description(self) -> &'static str {
        match self {
            Self::Generic => "Unknown Stock Description",
            Self::NavigationSystem => "GeoVision Sat Nav",
        }
    }

    /// Whether items of this kind carry a brand.
    pub fn has_brand(self) -> bool {
        matches!(self, Self::NavigationSystem)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Variant {
    Generic,
    NavigationSystem { brand: String },
}

impl Variant {
    fn kind(&self) -> ItemKind {
        match self {
            Variant::Generic => ItemKind::Generic,
            Variant::NavigationSystem { .. } => ItemKind::NavigationSystem,
        }
    }
}

/// A stock record.
///
/// Invariants, upheld by every constructor and mutator:
/// - `0 <= quantity <= MAX_QUANTITY`
/// - `price` is finite and `> 0`
/// - the stock code and brand survive the text table unchanged
#[derive(Debug, Clone, PartialEq)]
pub struct StockItem {
    stock_code: StockCode,
    quantity: u32,
    price: f64,
    variant: Variant,
}

impl StockItem {
    /// Category shared by everything the shop stocks.
    pub const STOCK_CATEGORY: &'static str = "Car accessories";

    /// The stock ceiling per record.
    pub const MAX_QUANTITY: u32 = 100;

    /// Tax rate in percent.
    pub const TAX_RATE: f64 = 17.5;

    /// Create a generic stock item.
    pub fn generic(
        stock_code: impl Into<String>,
        quantity: u32,
        price: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(stock_code.into(), quantity, price, Variant::Generic)
    }

    /// Create a navigation system.
    pub fn navigation_system(
        stock_code: impl Into<String>,
        quantity: u32,
        price: f64,
        brand: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let brand = brand.into();
        validate_brand(&brand)?;
        Self::new(
            stock_code.into(),
            quantity,
            price,
            Variant::NavigationSystem { brand },
        )
    }

    /// Create an item of the given kind from flat fields.
    ///
    /// `brand` is ignored for kinds that do not carry one.
    pub fn from_parts(
        kind: ItemKind,
        stock_code: impl Into<String>,
        quantity: u32,
        price: f64,
        brand: &str,
    ) -> Result<Self, ValidationError> {
        match kind {
            ItemKind::Generic => Self::generic(stock_code, quantity, price),
            ItemKind::NavigationSystem => {
                Self::navigation_system(stock_code, quantity, price, brand)
            }
        }
    }

    fn new(
        stock_code: String,
        quantity: u32,
        price: f64,
        variant: Variant,
    ) -> Result<Self, ValidationError> {
        let stock_code = StockCode::new(stock_code)?;
        validate_quantity(quantity)?;
        validate_price(price)?;

        debug!(%stock_code, kind = %variant.kind(), quantity, price, "created stock item");
        Ok(Self {
            stock_code,
            quantity,
            price,
            variant,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn stock_code(&self) -> &StockCode {
        &self.stock_code
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price without tax.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// The brand, for kinds that carry one.
    pub fn brand(&self) -> Option<&str> {
        match &self.variant {
            Variant::Generic => None,
            Variant::NavigationSystem { brand } => Some(brand),
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.variant.kind()
    }

    pub fn tax_rate(&self) -> f64 {
        Self::TAX_RATE
    }

    /// Unit price including tax, derived from the current price.
    pub fn price_with_tax(&self) -> f64 {
        self.price * (1.0 + self.tax_rate() / 100.0)
    }

    pub fn display_name(&self) -> &'static str {
        self.kind().display_name()
    }

    pub fn description(&self) -> &'static str {
        self.kind().description()
    }

    /// Project into a serializable record including derived fields.
    pub fn to_record(&self) -> StockRecord {
        StockRecord::from(self)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add `amount` units to stock.
    ///
    /// Fails with [`StockError::LimitExceeded`] if the result would pass
    /// [`Self::MAX_QUANTITY`]; the quantity is unchanged on any error.
    pub fn increase_stock(&mut self, amount: u32) -> Result<(), StockError> {
        validate_amount(amount)?;

        let new_quantity = self
            .quantity
            .checked_add(amount)
            .filter(|q| *q <= Self::MAX_QUANTITY)
            .ok_or_else(|| StockError::LimitExceeded {
                stock_code: self.stock_code.to_string(),
                current: self.quantity,
                requested: amount,
                max: Self::MAX_QUANTITY,
            })?;

        self.quantity = new_quantity;
        info!(stock_code = %self.stock_code, amount, quantity = self.quantity, "increased stock");
        Ok(())
    }

    /// Take `amount` units out of stock.
    ///
    /// Returns `Ok(false)` and leaves the quantity alone when there is not
    /// enough stock. Only a zero amount is an error.
    pub fn sell(&mut self, amount: u32) -> Result<bool, ValidationError> {
        validate_amount(amount)?;

        if amount > self.quantity {
            debug!(
                stock_code = %self.stock_code,
                amount,
                available = self.quantity,
                "insufficient stock"
            );
            return Ok(false);
        }

        self.quantity -= amount;
        info!(stock_code = %self.stock_code, amount, quantity = self.quantity, "sold stock");
        Ok(true)
    }

    /// Replace the unit price without tax.
    pub fn set_price(&mut self, price: f64) -> Result<(), ValidationError> {
        validate_price(price)?;
        self.price = price;
        info!(stock_code = %self.stock_code, price, "updated price");
        Ok(())
    }

    /// Replace the brand of an item that carries one.
    pub fn set_brand(&mut self, new_brand: impl Into<String>) -> Result<(), ValidationError> {
        let new_brand = new_brand.into();
        let kind = self.kind();
        match &mut self.variant {
            Variant::Generic => Err(ValidationError::BrandNotSupported(kind)),
            Variant::NavigationSystem { brand } => {
                validate_brand(&new_brand)?;
                *brand = new_brand;
                info!(stock_code = %self.stock_code, brand = %brand, "updated brand");
                Ok(())
            }
        }
    }
}

impl fmt::Display for StockItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stock Category: {}", Self::STOCK_CATEGORY)?;
        writeln!(f, "Stock Type: {}", self.display_name())?;
        writeln!(f, "Description: {}", self.description())?;
        writeln!(f, "StockCode: {}", self.stock_code)?;
        writeln!(f, "PriceWithoutTax: {:.2}", self.price)?;
        writeln!(f, "PriceWithTax: {:.2}", self.price_with_tax())?;
        write!(f, "Total units in stock: {}", self.quantity)?;
        if let Some(brand) = self.brand() {
            write!(f, "\nBrand: {}", brand)?;
        }
        Ok(())
    }
}
