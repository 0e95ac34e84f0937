//! Inventory configuration.

use std::path::{Path, PathBuf};

/// Where the inventory keeps its tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    /// The stock table.
    pub items_path: PathBuf,
    /// The sales ledger.
    pub sales_path: PathBuf,
}

impl InventoryConfig {
    /// Environment variable naming the data directory.
    pub const DATA_DIR_ENV: &'static str = "PARTSHOP_DATA_DIR";

    pub const ITEMS_FILE: &'static str = "stock_items.csv";
    pub const SALES_FILE: &'static str = "sales_history.csv";

    /// Keep both tables under `dir`.
    pub fn with_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            items_path: dir.join(Self::ITEMS_FILE),
            sales_path: dir.join(Self::SALES_FILE),
        }
    }

    /// Use `$PARTSHOP_DATA_DIR` if it is set and non-empty, else the default.
    pub fn from_env() -> Self {
        match std::env::var_os(Self::DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::with_data_dir(dir),
            _ => Self::default(),
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self::with_data_dir("data")
    }
}
