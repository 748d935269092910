//! Greedy note allocation with rollback.
//!
//! The allocator always takes one note of the largest available face value
//! not exceeding the remaining amount, then rescans from the largest
//! denomination. It never reconsiders a pick: when no available note fits
//! the remainder, the whole allocation is unwound and the request fails.

use std::collections::BTreeMap;

use teller_shared::Currency;

use crate::inventory::Inventory;

use super::types::DispensedNote;

/// The remaining amount cannot be covered by any available note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct AllocationExhausted;

/// Dispenses `amount` from the currency partition, one note at a time.
///
/// Every taken note is pushed onto an undo log; on exhaustion the log is
/// replayed in reverse so the inventory is left exactly as it was.
pub(super) fn allocate(
    inventory: &mut Inventory,
    currency: Currency,
    amount: u64,
) -> Result<Vec<DispensedNote>, AllocationExhausted> {
    let mut remaining = amount;
    let mut undo: Vec<u64> = Vec::new();

    while remaining > 0 {
        let Some(face_value) = next_note(inventory, currency, remaining) else {
            unwind(inventory, currency, &undo);
            return Err(AllocationExhausted);
        };
        if inventory.decrement(currency, face_value, 1).is_err() {
            // InsufficientStock stays internal to the algorithm.
            unwind(inventory, currency, &undo);
            return Err(AllocationExhausted);
        }
        undo.push(face_value);
        remaining -= face_value;
    }

    Ok(compact(&undo))
}

/// Largest available face value not exceeding the remaining amount.
///
/// Only buckets with stock count: a denomination that exists but is empty
/// cannot help satisfy the remainder.
fn next_note(inventory: &Inventory, currency: Currency, remaining: u64) -> Option<u64> {
    let buckets = inventory.buckets(currency).ok()?;
    buckets
        .iter()
        .rev()
        .find(|b| b.face_value <= remaining && !b.is_empty())
        .map(|b| b.face_value)
}

/// Replays the undo log in reverse, restoring one note per entry.
fn unwind(inventory: &mut Inventory, currency: Currency, undo: &[u64]) {
    for &face_value in undo.iter().rev() {
        // Every entry came from a successful decrement on this partition,
        // so restoring the note cannot fail.
        let _ = inventory.increment(currency, face_value, 1);
    }
}

/// Compacts single notes into per-face-value quantities, largest first.
fn compact(taken: &[u64]) -> Vec<DispensedNote> {
    let mut by_face: BTreeMap<u64, u64> = BTreeMap::new();
    for &face_value in taken {
        *by_face.entry(face_value).or_insert(0) += 1;
    }
    by_face
        .into_iter()
        .rev()
        .map(|(face_value, quantity)| DispensedNote {
            face_value,
            quantity,
        })
        .collect()
}
