//! # Parts Shop Core
//!
//! Pure domain model for the parts shop inventory: stock items, their
//! validated mutations, and the derived pricing rules.
//!
//! This crate contains no I/O and no storage. Persistence lives in
//! `partshop-store`, which only ever sees fully validated items.
//!
//! ## Key Types
//!
//! - [`StockItem`] - A stock record with a closed set of variants
//! - [`ItemKind`] - Discriminator for the variant, carrying its storage tag
//! - [`StockCode`] - Validated primary key of a stock record
//! - [`StockRecord`] - Serializable projection including derived fields
//!
//! ## Business Rules
//!
//! - Quantity never leaves `0..=100` ([`StockItem::MAX_QUANTITY`]).
//! - Price is always finite and strictly positive.
//! - Selling more than is in stock is declined (`Ok(false)`), not an error.
//! - Tax is a fixed 17.5% and is always derived from the current price.

pub mod error;
pub mod item;
pub mod record;
pub mod types;
pub mod validation;

pub use error::{StockError, ValidationError};
pub use item::{ItemKind, StockItem};
pub use record::StockRecord;
pub use types::StockCode;
pub use validation::{validate_amount, validate_brand, validate_price, validate_quantity};
