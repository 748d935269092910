//! Dispenser service: the operation surface over the shared inventory.
//!
//! Every operation runs as a single critical section against one owned
//! inventory, so concurrent callers never observe a partially applied
//! withdrawal and jointly overdrawing withdrawals are serialized.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use teller_shared::Currency;

use crate::inventory::{DenominationBucket, Inventory, StockLevel};

use super::allocation;
use super::error::DispenseError;
use super::types::{DepositOutcome, WithdrawalReceipt};

/// Cash dispenser over one shared inventory.
///
/// The service owns the injected inventory behind a mutex. Wrap the service
/// in `Arc` to share it across threads; it is the process-wide state holder
/// and is constructed once at startup.
pub struct DispenserService {
    inventory: Mutex<Inventory>,
}

impl DispenserService {
    /// Creates the service around an already-seeded inventory.
    #[must_use]
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory: Mutex::new(inventory),
        }
    }

    /// Adds `quantity` notes of `face_value` to the currency partition.
    ///
    /// Deposits naming an unconfigured currency or face value succeed with
    /// [`DepositOutcome::Ignored`] and leave stock untouched.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `face_value` is not positive or
    /// `quantity` is negative.
    pub fn deposit(
        &self,
        currency: Currency,
        face_value: i64,
        quantity: i64,
    ) -> Result<DepositOutcome, DispenseError> {
        if face_value <= 0 {
            return Err(DispenseError::NonPositiveFaceValue);
        }
        if quantity < 0 {
            return Err(DispenseError::NegativeQuantity);
        }
        let face_value = face_value.unsigned_abs();
        let quantity = quantity.unsigned_abs();

        let mut inventory = self.lock();
        match inventory.increment(currency, face_value, quantity) {
            Ok(()) => {
                debug!(currency = %currency, face_value, quantity, "deposit applied");
                Ok(DepositOutcome::Applied)
            }
            Err(_) => {
                // Foreign denominations are acknowledged without effect.
                debug!(currency = %currency, face_value, quantity, "deposit ignored");
                Ok(DepositOutcome::Ignored)
            }
        }
    }

    /// Dispenses exactly `amount` from the currency partition.
    ///
    /// The withdrawal either fully satisfies the amount with the greedy
    /// largest-note-first strategy or fails leaving stock unchanged. The
    /// strategy commits to every pick: amounts only reachable by trading a
    /// large note for several smaller ones are reported infeasible.
    ///
    /// # Errors
    ///
    /// Returns a validation error for non-positive amounts and
    /// [`DispenseError::Infeasible`] when the amount cannot be formed from
    /// available notes.
    ///
    /// # Example
    ///
    /// ```
    /// use teller_core::dispenser::DispenserService;
    /// use teller_core::inventory::Inventory;
    /// use teller_shared::{Currency, VaultConfig};
    ///
    /// let service = DispenserService::new(Inventory::from_config(&VaultConfig::default()));
    /// let receipt = service.withdraw(Currency::Rub, 250).unwrap();
    /// assert_eq!(receipt.total(), 250);
    /// ```
    pub fn withdraw(
        &self,
        currency: Currency,
        amount: i64,
    ) -> Result<WithdrawalReceipt, DispenseError> {
        if amount <= 0 {
            return Err(DispenseError::NonPositiveAmount);
        }
        let amount = amount.unsigned_abs();

        let mut inventory = self.lock();
        Self::check_feasible(&inventory, currency, amount)?;

        match allocation::allocate(&mut inventory, currency, amount) {
            Ok(notes) => {
                info!(currency = %currency, amount, notes = notes.len(), "cash dispensed");
                Ok(WithdrawalReceipt {
                    currency,
                    amount,
                    notes,
                })
            }
            Err(_) => {
                warn!(currency = %currency, amount, "withdrawal infeasible");
                Err(DispenseError::Infeasible { currency, amount })
            }
        }
    }

    /// Read-only snapshot of every bucket holding at least one note.
    #[must_use]
    pub fn list(&self) -> Vec<StockLevel> {
        self.lock().list_non_zero()
    }

    /// Zeroes every bucket count across all currencies. Always succeeds.
    pub fn reset(&self) {
        self.lock().reset_all();
        info!("inventory reset");
    }

    /// Aggregate feasibility test; runs before any mutation.
    ///
    /// The partition must hold at least one note, and its total value must
    /// cover the amount. An unconfigured currency holds no stock.
    fn check_feasible(
        inventory: &Inventory,
        currency: Currency,
        amount: u64,
    ) -> Result<(), DispenseError> {
        let Ok(buckets) = inventory.buckets(currency) else {
            return Err(DispenseError::Infeasible { currency, amount });
        };

        let units: u64 = buckets.iter().map(|b| b.available_count).sum();
        let value: u64 = buckets.iter().map(DenominationBucket::total_value).sum();
        if units == 0 || value < amount {
            return Err(DispenseError::Infeasible { currency, amount });
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Inventory> {
        self.inventory.lock().expect("inventory mutex poisoned")
    }
}
