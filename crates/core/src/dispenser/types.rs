//! Dispenser domain types.

use serde::Serialize;
use teller_shared::Currency;

/// Outcome of a deposit request.
///
/// Deposits naming an unconfigured currency or face value succeed without
/// touching stock; the distinct outcome makes that visible to callers and
/// tests instead of relying on absence of effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositOutcome {
    /// The quantity was added to the matching bucket.
    Applied,
    /// No matching bucket exists; stock is unchanged.
    Ignored,
}

impl DepositOutcome {
    /// Returns true if stock was updated.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// One face value dispensed by a withdrawal, with its note count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispensedNote {
    /// Note face value.
    pub face_value: u64,
    /// Number of notes of this face value dispensed.
    pub quantity: u64,
}

/// Summary of one successful withdrawal.
///
/// A transient report of what left the vault; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawalReceipt {
    /// Currency the amount was dispensed in.
    pub currency: Currency,
    /// The requested amount, satisfied exactly.
    pub amount: u64,
    /// Dispensed notes, compacted per face value, largest first.
    pub notes: Vec<DispensedNote>,
}

impl WithdrawalReceipt {
    /// Total dispensed value: sum of face value times quantity.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.notes.iter().map(|n| n.face_value * n.quantity).sum()
    }
}
