//! Serializable projection of a stock item.

use serde::{Deserialize, Serialize};

use crate::item::StockItem;

/// A flat view of a [`StockItem`] with its derived fields filled in.
///
/// This is the shape handed to display and export layers. It is not read
/// back; items are only ever rebuilt from stored rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub stock_category: String,
    pub stock_code: String,
    pub stock_name: String,
    pub description: String,
    pub quantity: u32,
    pub price: f64,
    pub price_with_tax: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl From<&StockItem> for StockRecord {
    fn from(item: &StockItem) -> Self {
        Self {
            stock_category: StockItem::STOCK_CATEGORY.to_string(),
            stock_code: item.stock_code().to_string(),
            stock_name: item.display_name().to_string(),
            description: item.description().to_string(),
            quantity: item.quantity(),
            price: item.price(),
            price_with_tax: item.price_with_tax(),
            brand: item.brand().map(str::to_string),
        }
    }
}
