//! Dispenser error types.
//!
//! The engine surfaces two classes of failure: malformed input (the typed
//! equivalent of a bad request) and infeasible withdrawals. The status-code
//! mapping a transport wrapper needs is carried on the enum itself.

use teller_shared::Currency;
use thiserror::Error;

/// Errors that can occur during dispenser operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispenseError {
    // ========== Validation Errors ==========
    /// Face value must be a positive integer.
    #[error("Face value must be positive")]
    NonPositiveFaceValue,

    /// Deposit quantity cannot be negative.
    #[error("Deposit quantity cannot be negative")]
    NegativeQuantity,

    /// Withdrawal amount must be a positive integer.
    #[error("Withdrawal amount must be positive")]
    NonPositiveAmount,

    // ========== Allocation Errors ==========
    /// The amount cannot be satisfied exactly with current stock.
    #[error("Cannot dispense {amount} {currency} from available stock")]
    Infeasible {
        /// Currency the withdrawal was requested in.
        currency: Currency,
        /// The requested amount.
        amount: u64,
    },
}

impl DispenseError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveFaceValue => "NON_POSITIVE_FACE_VALUE",
            Self::NegativeQuantity => "NEGATIVE_QUANTITY",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::Infeasible { .. } => "INFEASIBLE_WITHDRAWAL",
        }
    }

    /// Returns the HTTP status code a transport wrapper maps this error to.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - malformed input
            Self::NonPositiveFaceValue | Self::NegativeQuantity | Self::NonPositiveAmount => 400,

            // 406 Not Acceptable - the vault cannot satisfy the request
            Self::Infeasible { .. } => 406,
        }
    }
}
