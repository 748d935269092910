//! The inventory store and its mutation primitives.

use std::collections::BTreeMap;

use serde::Serialize;
use teller_shared::{Currency, VaultConfig};

use super::bucket::DenominationBucket;
use super::error::InventoryError;

/// Flattened stock report line for external reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockLevel {
    /// Currency partition.
    pub currency: Currency,
    /// Note face value.
    pub face_value: u64,
    /// Number of notes available.
    pub available_count: u64,
}

/// Per-currency denomination stock.
///
/// Each currency partition holds its buckets sorted ascending by face value.
/// Partitions never interact; the set of face values per currency is fixed
/// after construction and only counts change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inventory {
    partitions: BTreeMap<Currency, Vec<DenominationBucket>>,
}

impl Inventory {
    /// Builds the seeded inventory from validated configuration.
    ///
    /// Buckets are stored sorted ascending by face value regardless of the
    /// order they appear in the seed.
    #[must_use]
    pub fn from_config(config: &VaultConfig) -> Self {
        let partitions = config
            .currencies
            .iter()
            .map(|partition| {
                let mut buckets: Vec<DenominationBucket> = partition
                    .denominations
                    .iter()
                    .map(|d| DenominationBucket::new(d.face_value, d.count))
                    .collect();
                buckets.sort_unstable_by_key(|b| b.face_value);
                (partition.currency, buckets)
            })
            .collect();
        Self { partitions }
    }

    /// The ordered bucket slice for a currency partition.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` if the currency is not configured.
    pub fn buckets(&self, currency: Currency) -> Result<&[DenominationBucket], InventoryError> {
        self.partitions
            .get(&currency)
            .map(Vec::as_slice)
            .ok_or(InventoryError::UnknownCurrency(currency))
    }

    /// Adds `amount` notes to the bucket with the given face value.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` or `UnknownDenomination` if no such bucket
    /// is configured.
    pub fn increment(
        &mut self,
        currency: Currency,
        face_value: u64,
        amount: u64,
    ) -> Result<(), InventoryError> {
        let bucket = self.bucket_mut(currency, face_value)?;
        bucket.available_count += amount;
        Ok(())
    }

    /// Removes `amount` notes from the bucket with the given face value.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` if the bucket holds fewer than `amount`
    /// notes, `UnknownCurrency`/`UnknownDenomination` if no such bucket is
    /// configured.
    pub fn decrement(
        &mut self,
        currency: Currency,
        face_value: u64,
        amount: u64,
    ) -> Result<(), InventoryError> {
        let bucket = self.bucket_mut(currency, face_value)?;
        if amount > bucket.available_count {
            return Err(InventoryError::InsufficientStock {
                currency,
                face_value,
                requested: amount,
                available: bucket.available_count,
            });
        }
        bucket.available_count -= amount;
        Ok(())
    }

    /// Zeroes every bucket count across all currencies. Cannot fail.
    pub fn reset_all(&mut self) {
        for buckets in self.partitions.values_mut() {
            for bucket in buckets {
                bucket.available_count = 0;
            }
        }
    }

    /// Stock report of every bucket holding at least one note.
    ///
    /// Currencies ascend, face values ascend within a currency.
    #[must_use]
    pub fn list_non_zero(&self) -> Vec<StockLevel> {
        self.partitions
            .iter()
            .flat_map(|(currency, buckets)| {
                let currency = *currency;
                buckets
                    .iter()
                    .filter(|b| !b.is_empty())
                    .map(move |b| StockLevel {
                        currency,
                        face_value: b.face_value,
                        available_count: b.available_count,
                    })
            })
            .collect()
    }

    fn bucket_mut(
        &mut self,
        currency: Currency,
        face_value: u64,
    ) -> Result<&mut DenominationBucket, InventoryError> {
        let buckets = self
            .partitions
            .get_mut(&currency)
            .ok_or(InventoryError::UnknownCurrency(currency))?;
        buckets
            .iter_mut()
            .find(|b| b.face_value == face_value)
            .ok_or(InventoryError::UnknownDenomination {
                currency,
                face_value,
            })
    }
}
