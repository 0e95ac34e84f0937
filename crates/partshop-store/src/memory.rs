//! In-memory implementations of the store traits.
//!
//! These are primarily for testing. They have the same semantics as the
//! CSV backend, including row order and corrupt-row handling, but keep
//! everything in memory with no persistence.

use std::sync::RwLock;

use chrono::NaiveDate;
use partshop_core::StockItem;

use crate::codec::{self, Row};
use crate::error::{Result, StoreError};
use crate::sales::{SaleRecord, SalesLedger};
use crate::traits::{remove_rows, upsert_row, ItemStore, SaveOutcome};

/// In-memory stock table.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
#[derive(Default)]
pub struct MemoryItemStore {
    rows: RwLock<Vec<Row>>,
}

impl MemoryItemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with raw rows, corrupt ones included.
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

impl ItemStore for MemoryItemStore {
    fn ensure_exists(&self) -> Result<bool> {
        Ok(false)
    }

    fn load_all(&self) -> Result<Vec<Row>> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.clone())
    }

    fn save_item(&self, item: &StockItem) -> Result<SaveOutcome> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        Ok(upsert_row(&mut rows, codec::encode(item)))
    }

    fn delete_item(&self, stock_code: &str) -> Result<bool> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        Ok(remove_rows(&mut rows, stock_code))
    }
}

/// In-memory sales ledger.
#[derive(Default)]
pub struct MemorySalesLedger {
    records: RwLock<Vec<SaleRecord>>,
}

impl MemorySalesLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SalesLedger for MemorySalesLedger {
    fn record_sale_on(
        &self,
        date: NaiveDate,
        stock_code: &str,
        quantity: u32,
        price: f64,
        brand: &str,
    ) -> Result<SaleRecord> {
        let record = SaleRecord::new(date, stock_code, quantity, price, brand);
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.push(record.clone());
        Ok(record)
    }

    fn records(&self) -> Result<Vec<SaleRecord>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(code: &str, price: f64) -> StockItem {
        StockItem::navigation_system(code, 10, price, "TomTom").unwrap()
    }

    #[test]
    fn test_memory_store_upsert_order() {
        let store = MemoryItemStore::new();
        store.save_item(&nav("A", 1.0)).unwrap();
        store.save_item(&nav("B", 2.0)).unwrap();
        assert_eq!(store.save_item(&nav("A", 3.0)).unwrap(), SaveOutcome::Updated);

        let items = store.load_items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].stock_code(), "A");
        assert_eq!(items[0].price(), 3.0);
        assert_eq!(items[1].stock_code(), "B");
    }

    #[test]
    fn test_memory_store_skips_corrupt_rows() {
        let good = codec::encode(&nav("A", 1.0));
        let bad: Row = ["NavSys", "B", "-3", "1.0", "TomTom"].into_iter().collect();
        let store = MemoryItemStore::with_rows(vec![good, bad]);

        assert_eq!(store.load_items().unwrap().len(), 1);
        assert_eq!(store.get_item("B").unwrap(), None);
        assert!(store.item_exists("B").unwrap());
    }

    #[test]
    fn test_memory_ledger() {
        let ledger = MemorySalesLedger::new();
        ledger.record_sale("NS101", 4, 2.5, "TomTom").unwrap();
        let records = ledger.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].revenue, 10.0);
    }
}
