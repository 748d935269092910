//! Inventory error types.

use teller_shared::Currency;
use thiserror::Error;

/// Errors that can occur when addressing inventory stock.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// The currency has no configured partition.
    #[error("Currency {0} is not configured")]
    UnknownCurrency(Currency),

    /// No bucket with that face value exists for the currency.
    #[error("Denomination {face_value} {currency} is not configured")]
    UnknownDenomination {
        /// The currency partition that was addressed.
        currency: Currency,
        /// The unrecognized face value.
        face_value: u64,
    },

    /// Requested more notes than the bucket holds.
    #[error(
        "Insufficient stock of {face_value} {currency}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        /// The currency partition that was addressed.
        currency: Currency,
        /// The face value of the depleted bucket.
        face_value: u64,
        /// Number of notes requested.
        requested: u64,
        /// Number of notes actually available.
        available: u64,
    },
}
