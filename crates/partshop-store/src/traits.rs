//! Store traits: the interface the inventory layer persists through.
//!
//! Backends only supply raw-row access and the two whole-set mutations.
//! Decoding, lookup and existence checks are shared default methods, so
//! every backend skips corrupt rows the same way.

use partshop_core::StockItem;
use tracing::warn;

use crate::codec::{self, Row};
use crate::error::Result;

/// Result of saving an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No row had the item's stock code; it was appended.
    Inserted,
    /// The row with the item's stock code was replaced in place.
    Updated,
}

/// The durable set of stock records, keyed by stock code.
///
/// Every call works on a fresh load; nothing is cached between calls.
/// Callers mutate the items they get back and hand them to
/// [`ItemStore::save_item`].
pub trait ItemStore: Send + Sync {
    /// Create the backing resource if it is missing.
    ///
    /// Returns `true` if this call created it.
    fn ensure_exists(&self) -> Result<bool>;

    /// Load every raw row, in stored order.
    fn load_all(&self) -> Result<Vec<Row>>;

    /// Insert or replace the row for `item`'s stock code.
    ///
    /// An existing row keeps its position; a new row goes at the end.
    fn save_item(&self, item: &StockItem) -> Result<SaveOutcome>;

    /// Remove the row for `stock_code`.
    ///
    /// Returns `false`, without touching the resource, if there was none.
    fn delete_item(&self, stock_code: &str) -> Result<bool>;

    /// Load and decode every row, skipping rows that do not decode.
    fn load_items(&self) -> Result<Vec<StockItem>> {
        Ok(decode_rows(self.load_all()?))
    }

    /// Find one item by stock code.
    ///
    /// This is a linear scan over a full load.
    fn get_item(&self, stock_code: &str) -> Result<Option<StockItem>> {
        Ok(self
            .load_items()?
            .into_iter()
            .find(|item| item.stock_code() == stock_code))
    }

    /// Check whether any stored row has `stock_code`, decodable or not.
    fn item_exists(&self, stock_code: &str) -> Result<bool> {
        Ok(self
            .load_all()?
            .iter()
            .any(|row| row.key() == Some(stock_code)))
    }

    /// Number of stored rows, including ones that would not decode.
    fn count(&self) -> Result<usize> {
        Ok(self.load_all()?.len())
    }
}

/// Decode rows, logging and dropping the ones that are corrupt.
pub fn decode_rows(rows: Vec<Row>) -> Vec<StockItem> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match codec::decode(&row) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(index, %row, error = %e, "skipping invalid row");
                None
            }
        })
        .collect()
}

/// Replace the first row keyed like `row`, or append it.
pub(crate) fn upsert_row(rows: &mut Vec<Row>, row: Row) -> SaveOutcome {
    match rows.iter().position(|existing| existing.key() == row.key()) {
        Some(index) => {
            rows[index] = row;
            SaveOutcome::Updated
        }
        None => {
            rows.push(row);
            SaveOutcome::Inserted
        }
    }
}

/// Drop every row keyed `stock_code`. Returns whether any were dropped.
pub(crate) fn remove_rows(rows: &mut Vec<Row>, stock_code: &str) -> bool {
    let before = rows.len();
    rows.retain(|row| row.key() != Some(stock_code));
    rows.len() != before
}
