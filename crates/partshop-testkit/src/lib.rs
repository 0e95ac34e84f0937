//! # Parts Shop Testkit
//!
//! Testing utilities for the parts shop.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Throwaway on-disk tables and sample stock
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use partshop_testkit::generators::{item_from_params, ItemParams};
//!
//! proptest! {
//!     #[test]
//!     fn price_with_tax_exceeds_price(params: ItemParams) {
//!         let item = item_from_params(&params);
//!         prop_assert!(item.price_with_tax() > item.price());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use partshop_store::ItemStore;
//! use partshop_testkit::fixtures::{sample_items, TempTables};
//!
//! let tables = TempTables::new();
//! tables.seed(&sample_items());
//! assert_eq!(tables.items.count().unwrap(), sample_items().len());
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{sample_items, TempTables};
pub use generators::{item_from_params, ItemParams};
