//! Per-currency denomination stock.
//!
//! This module implements the vault state:
//! - Denomination buckets (face value + available count)
//! - The inventory store with its mutation primitives
//! - Error types for inventory operations

pub mod bucket;
pub mod error;
pub mod store;

pub use bucket::DenominationBucket;
pub use error::InventoryError;
pub use store::{Inventory, StockLevel};
