//! # Parts Shop Store
//!
//! Persistence for the parts shop: a row codec, a file-backed stock table
//! and an append-only sales ledger, behind the [`ItemStore`] and
//! [`SalesLedger`] traits.
//!
//! ## Key Types
//!
//! - [`ItemStore`] - Get/list/upsert/delete over the stock table
//! - [`CsvItemStore`] - CSV file backend, rewritten atomically on each change
//! - [`MemoryItemStore`] - In-memory backend for tests
//! - [`SalesLedger`] - Append-only sales record with history reports
//! - [`Row`] - One raw record of the stock table
//!
//! ## Usage
//!
//! ```rust,no_run
//! use partshop_core::StockItem;
//! use partshop_store::{CsvItemStore, ItemStore};
//!
//! let store = CsvItemStore::open("data/stock_items.csv").unwrap();
//!
//! let item = StockItem::navigation_system("NS101", 10, 199.99, "TomTom").unwrap();
//! store.save_item(&item).unwrap();
//!
//! let mut loaded = store.get_item("NS101").unwrap().unwrap();
//! loaded.increase_stock(5).unwrap();
//! store.save_item(&loaded).unwrap();
//! ```
//!
//! ## Design Notes
//!
//! - **Snapshot writes**: every save or delete rewrites the whole table via
//!   a temporary file and rename, so the table never holds a duplicate key
//!   or a half-written row.
//! - **Upsert by key**: saving an existing stock code replaces its row in
//!   place; a new code is appended.
//! - **Graceful degradation**: rows that fail to decode are logged and
//!   skipped on load, but kept in the file.
//! - **No caching**: each call reads the file afresh.

pub mod codec;
pub mod csv_store;
pub mod error;
pub mod memory;
pub mod sales;
pub mod schema;
pub mod traits;

pub use codec::{decode, encode, Row};
pub use csv_store::{CsvItemStore, CsvSalesLedger};
pub use error::{CorruptRecordError, Result, StoreError};
pub use memory::{MemoryItemStore, MemorySalesLedger};
pub use sales::{BrandSales, DailySales, SaleRecord, SalesHistory, SalesLedger, SalesSummary};
pub use traits::{decode_rows, ItemStore, SaveOutcome};
