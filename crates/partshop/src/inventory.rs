//! The Inventory: unified API for the parts shop.
//!
//! The Inventory brings together the stock table and the sales ledger and
//! applies the shop's restock, update and sale policies on top of the
//! entity rules. Every mutating call loads a fresh item, changes a local
//! copy, and saves it once; a rejected change never reaches storage.

use std::sync::{Mutex, MutexGuard};

use partshop_core::{StockItem, StockRecord};
use partshop_store::{
    CsvItemStore, CsvSalesLedger, ItemStore, SaleRecord, SalesHistory, SalesLedger,
    SalesSummary, StoreError,
};
use tracing::{error, info, warn};

use crate::config::InventoryConfig;
use crate::error::{InventoryError, Result};

/// Stock offered for an add-or-restock.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStock {
    pub stock_code: String,
    pub quantity: u32,
    pub price: f64,
    pub brand: String,
}

/// A partial update of an existing item. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    pub price: Option<f64>,
    /// Units to add on top of the current stock.
    pub add_quantity: Option<u32>,
    pub brand: Option<String>,
}

/// What an add-or-restock did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// A new navigation system was added.
    Created,
    /// An existing item was restocked.
    Restocked,
}

/// Result of a sale.
#[derive(Debug, Clone, PartialEq)]
pub enum SaleOutcome {
    /// The stock was taken out and the sale recorded.
    Sold { item: StockItem, sale: SaleRecord },
    /// Not enough stock; nothing changed.
    Insufficient { available: u32 },
}

/// The main Inventory struct.
///
/// Provides a unified API for:
/// - Listing and looking up stock
/// - Adding new stock and restocking existing items
/// - Editing price and brand
/// - Selling, with the sale appended to the ledger
/// - Sales reports
pub struct Inventory<S: ItemStore, L: SalesLedger> {
    store: S,
    ledger: L,
    /// Serialises load-modify-save sequences within the process.
    write_lock: Mutex<()>,
}

impl Inventory<CsvItemStore, CsvSalesLedger> {
    /// Open the file-backed inventory described by `config`.
    pub fn open(config: &InventoryConfig) -> Result<Self> {
        let store = CsvItemStore::open(&config.items_path)?;
        let ledger = CsvSalesLedger::open(&config.sales_path)?;
        info!(
            items = %config.items_path.display(),
            sales = %config.sales_path.display(),
            "opened inventory"
        );
        Ok(Self::new(store, ledger))
    }
}

impl<S: ItemStore, L: SalesLedger> Inventory<S, L> {
    /// Create an inventory over the given backends.
    pub fn new(store: S, ledger: L) -> Self {
        Self {
            store,
            ledger,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| InventoryError::Store(StoreError::Poisoned))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// All decodable items, in stored order.
    pub fn list(&self) -> Result<Vec<StockItem>> {
        Ok(self.store.load_items()?)
    }

    /// All items projected for display.
    pub fn records(&self) -> Result<Vec<StockRecord>> {
        Ok(self.list()?.iter().map(StockItem::to_record).collect())
    }

    /// Look up one item.
    pub fn get(&self, stock_code: &str) -> Result<StockItem> {
        self.store
            .get_item(stock_code)?
            .ok_or_else(|| InventoryError::NotFound(stock_code.to_string()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Stock Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a new navigation system, or restock the existing item with the
    /// same code.
    ///
    /// On restock the quantity is added to the current stock and the given
    /// price and brand replace the stored ones when they differ.
    pub fn add_or_restock(&self, stock: NewStock) -> Result<(Upsert, StockItem)> {
        let _guard = self.lock()?;

        match self.store.get_item(&stock.stock_code)? {
            Some(mut item) => {
                item.increase_stock(stock.quantity)?;
                if item.price() != stock.price {
                    item.set_price(stock.price)?;
                }
                if item.brand().is_some_and(|brand| brand != stock.brand) {
                    item.set_brand(stock.brand)?;
                }
                self.store.save_item(&item)?;
                info!(stock_code = %item.stock_code(), quantity = item.quantity(), "restocked item");
                Ok((Upsert::Restocked, item))
            }
            None => {
                let item = StockItem::navigation_system(
                    stock.stock_code,
                    stock.quantity,
                    stock.price,
                    stock.brand,
                )?;
                self.store.save_item(&item)?;
                info!(stock_code = %item.stock_code(), "added item");
                Ok((Upsert::Created, item))
            }
        }
    }

    /// Apply a partial update to an existing item.
    pub fn update(&self, stock_code: &str, update: ItemUpdate) -> Result<StockItem> {
        let _guard = self.lock()?;
        let mut item = self.get(stock_code)?;

        if let Some(price) = update.price {
            item.set_price(price)?;
        }
        if let Some(amount) = update.add_quantity {
            item.increase_stock(amount)?;
        }
        if let Some(brand) = update.brand {
            item.set_brand(brand)?;
        }

        self.store.save_item(&item)?;
        info!(stock_code, "updated item");
        Ok(item)
    }

    /// Sell `quantity` units.
    ///
    /// The reduced stock is saved before the sale is appended to the
    /// ledger, at the item's current price and brand. If the append fails
    /// the previous stock is saved back before the error is returned.
    pub fn sell(&self, stock_code: &str, quantity: u32) -> Result<SaleOutcome> {
        partshop_core::validate_amount(quantity)?;

        let _guard = self.lock()?;
        let before = self.get(stock_code)?;
        let mut item = before.clone();

        if !item.sell(quantity)? {
            return Ok(SaleOutcome::Insufficient {
                available: item.quantity(),
            });
        }

        self.store.save_item(&item)?;
        let recorded = self.ledger.record_sale(
            stock_code,
            quantity,
            item.price(),
            item.brand().unwrap_or_default(),
        );

        match recorded {
            Ok(sale) => Ok(SaleOutcome::Sold { item, sale }),
            Err(e) => {
                if let Err(restore) = self.store.save_item(&before) {
                    error!(
                        stock_code,
                        error = %restore,
                        "failed to restore stock after ledger error"
                    );
                } else {
                    warn!(stock_code, error = %e, "sale not recorded, stock restored");
                }
                Err(e.into())
            }
        }
    }

    /// Remove an item. Returns `false` if there was none.
    pub fn delete(&self, stock_code: &str) -> Result<bool> {
        let _guard = self.lock()?;
        Ok(self.store.delete_item(stock_code)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sales Reports
    // ─────────────────────────────────────────────────────────────────────────

    pub fn sales_history(&self) -> Result<SalesHistory> {
        Ok(self.ledger.history()?)
    }

    pub fn sales_summary(&self) -> Result<SalesSummary> {
        Ok(self.ledger.summary()?)
    }

    /// Sales rendered for a spreadsheet export, header row first.
    pub fn export_sales(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.ledger.all_records_for_export()?)
    }
}
