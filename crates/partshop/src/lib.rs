//! # Parts Shop
//!
//! The unified API for the parts shop inventory - stock records,
//! restocking, sales and sales reports.
//!
//! ## Overview
//!
//! The [`Inventory`] ties together:
//!
//! - **Stock items**: validated records with a stock ceiling and derived tax
//! - **The stock table**: a CSV file rewritten atomically on each change
//! - **The sales ledger**: an append-only CSV file of completed sales
//!
//! ## Key Concepts
//!
//! - **Upsert**: adding an existing stock code restocks it instead.
//! - **Declined sale**: selling more than is in stock changes nothing and is
//!   reported as [`SaleOutcome::Insufficient`], not as an error.
//! - **All or nothing**: a rejected change is never written.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use partshop::{Inventory, InventoryConfig, NewStock, SaleOutcome};
//!
//! let inventory = Inventory::open(&InventoryConfig::from_env()).unwrap();
//!
//! inventory
//!     .add_or_restock(NewStock {
//!         stock_code: "NS101".into(),
//!         quantity: 10,
//!         price: 199.99,
//!         brand: "TomTom".into(),
//!     })
//!     .unwrap();
//!
//! match inventory.sell("NS101", 2).unwrap() {
//!     SaleOutcome::Sold { item, .. } => println!("{} left", item.quantity()),
//!     SaleOutcome::Insufficient { available } => println!("only {available} left"),
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `partshop::core` - Domain model (StockItem, StockCode, etc.)
//! - `partshop::store` - Storage traits, CSV tables and the sales ledger

pub mod config;
pub mod error;
pub mod inventory;

// Re-export component crates
pub use partshop_core as core;
pub use partshop_store as store;

// Re-export main types for convenience
pub use config::InventoryConfig;
pub use error::{InventoryError, Result};
pub use inventory::{Inventory, ItemUpdate, NewStock, SaleOutcome, Upsert};

// Re-export commonly used core and store types
pub use partshop_core::{ItemKind, StockCode, StockError, StockItem, StockRecord, ValidationError};
pub use partshop_store::{
    CsvItemStore, CsvSalesLedger, ItemStore, MemoryItemStore, MemorySalesLedger, SaleRecord,
    SalesHistory, SalesLedger, SalesSummary, StoreError,
};
