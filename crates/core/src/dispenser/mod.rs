//! Cash dispensing operations.
//!
//! This module implements the dispenser engine:
//! - Deposit validation and application
//! - Exact-amount withdrawal via greedy allocation with rollback
//! - Inventory reset and stock listing
//! - Error types carrying the transport status mapping

mod allocation;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use error::DispenseError;
pub use service::DispenserService;
pub use types::{DepositOutcome, DispensedNote, WithdrawalReceipt};
