//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::path::{Path, PathBuf};

use partshop_core::StockItem;
use partshop_store::{CsvItemStore, CsvSalesLedger, ItemStore};
use tempfile::TempDir;

/// A stock table and sales ledger in a fresh temporary directory.
///
/// The directory is removed when the fixture is dropped.
pub struct TempTables {
    pub dir: TempDir,
    pub items: CsvItemStore,
    pub ledger: CsvSalesLedger,
}

impl TempTables {
    pub const ITEMS_FILE: &'static str = "stock_items.csv";
    pub const SALES_FILE: &'static str = "sales_history.csv";

    /// Create both tables with their headers.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let items = CsvItemStore::open(dir.path().join(Self::ITEMS_FILE))
            .expect("failed to open item table");
        let ledger = CsvSalesLedger::open(dir.path().join(Self::SALES_FILE))
            .expect("failed to open sales ledger");
        Self { dir, items, ledger }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn items_path(&self) -> PathBuf {
        self.dir.path().join(Self::ITEMS_FILE)
    }

    pub fn sales_path(&self) -> PathBuf {
        self.dir.path().join(Self::SALES_FILE)
    }

    /// Save every item, in order.
    pub fn seed(&self, items: &[StockItem]) {
        for item in items {
            self.items.save_item(item).expect("failed to seed item");
        }
    }

    /// Replace the item table with `contents` verbatim.
    pub fn write_raw_items(&self, contents: &str) {
        std::fs::write(self.items_path(), contents).expect("failed to write item table");
    }

    /// The item table as it is on disk.
    pub fn read_raw_items(&self) -> String {
        std::fs::read_to_string(self.items_path()).expect("failed to read item table")
    }
}

impl Default for TempTables {
    fn default() -> Self {
        Self::new()
    }
}

/// A small mixed stock list: three navigation systems and one generic item.
pub fn sample_items() -> Vec<StockItem> {
    vec![
        StockItem::navigation_system("NS101", 10, 199.99, "TomTom").expect("valid sample"),
        StockItem::navigation_system("NS102", 25, 149.5, "Garmin").expect("valid sample"),
        StockItem::navigation_system("NS103", 0, 89.0, "Navman, Inc.").expect("valid sample"),
        StockItem::generic("GEN001", 100, 4.99).expect("valid sample"),
    ]
}
