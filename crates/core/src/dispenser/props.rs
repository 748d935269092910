//! Property-based tests for the dispenser engine.
//!
//! - Exactness: a successful withdrawal dispenses the requested amount.
//! - Conservation: counts always equal seed plus deposits minus dispensed.
//! - Atomicity: a failed withdrawal leaves stock untouched.
//! - Determinism: identical state and request produce identical results.
//! - Reset idempotence: resetting twice equals resetting once.

use std::collections::BTreeMap;

use proptest::prelude::*;

use teller_shared::config::{CurrencySeed, DenominationSeed};
use teller_shared::{Currency, VaultConfig};

use crate::inventory::Inventory;

use super::service::DispenserService;

/// Strategy for a denomination set: face value to initial count.
fn denomination_set() -> impl Strategy<Value = BTreeMap<u64, u64>> {
    prop::collection::btree_map(1u64..=500, 0u64..=8, 1..6)
}

/// Strategy for requested withdrawal amounts.
fn requested_amount() -> impl Strategy<Value = i64> {
    1i64..=2_000
}

fn inventory_from(denominations: &BTreeMap<u64, u64>) -> Inventory {
    Inventory::from_config(&VaultConfig {
        currencies: vec![CurrencySeed {
            currency: Currency::Rub,
            denominations: denominations
                .iter()
                .map(|(&face_value, &count)| DenominationSeed { face_value, count })
                .collect(),
        }],
    })
}

/// Current counts per face value; buckets at zero are absent.
fn counts(service: &DispenserService) -> BTreeMap<u64, u64> {
    service
        .list()
        .iter()
        .map(|level| (level.face_value, level.available_count))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A successful withdrawal dispenses exactly the requested amount.
    #[test]
    fn prop_withdraw_dispenses_exact_amount(
        denominations in denomination_set(),
        amount in requested_amount(),
    ) {
        let service = DispenserService::new(inventory_from(&denominations));

        if let Ok(receipt) = service.withdraw(Currency::Rub, amount) {
            prop_assert_eq!(receipt.total(), amount.unsigned_abs());
            prop_assert_eq!(receipt.amount, amount.unsigned_abs());
        }
    }

    /// Every dispensed note is accounted for: seed count equals remaining
    /// count plus the receipt's quantity, for every face value.
    #[test]
    fn prop_withdraw_conserves_notes(
        denominations in denomination_set(),
        amount in requested_amount(),
    ) {
        let service = DispenserService::new(inventory_from(&denominations));

        if let Ok(receipt) = service.withdraw(Currency::Rub, amount) {
            let after = counts(&service);
            let dispensed: BTreeMap<u64, u64> = receipt
                .notes
                .iter()
                .map(|n| (n.face_value, n.quantity))
                .collect();

            for (&face_value, &seeded) in &denominations {
                let remaining = after.get(&face_value).copied().unwrap_or(0);
                let taken = dispensed.get(&face_value).copied().unwrap_or(0);
                prop_assert_eq!(
                    seeded,
                    remaining + taken,
                    "face value {} lost or gained notes",
                    face_value
                );
            }
            // Nothing outside the seed set was dispensed.
            for face_value in dispensed.keys() {
                prop_assert!(denominations.contains_key(face_value));
            }
        }
    }

    /// A failed withdrawal leaves stock exactly as it was.
    #[test]
    fn prop_withdraw_failure_leaves_stock_unchanged(
        denominations in denomination_set(),
        amount in requested_amount(),
    ) {
        let service = DispenserService::new(inventory_from(&denominations));
        let before = counts(&service);

        if service.withdraw(Currency::Rub, amount).is_err() {
            prop_assert_eq!(counts(&service), before);
        }
    }

    /// Identical stock and identical request always produce the same result.
    #[test]
    fn prop_withdraw_is_deterministic(
        denominations in denomination_set(),
        amount in requested_amount(),
    ) {
        let first = DispenserService::new(inventory_from(&denominations));
        let second = DispenserService::new(inventory_from(&denominations));

        let a = first.withdraw(Currency::Rub, amount);
        let b = second.withdraw(Currency::Rub, amount);

        prop_assert_eq!(a, b);
        prop_assert_eq!(counts(&first), counts(&second));
    }

    /// A deposit adds exactly the quantity to exactly one bucket.
    #[test]
    fn prop_deposit_adds_exactly_quantity(
        denominations in denomination_set(),
        index in any::<prop::sample::Index>(),
        quantity in 0i64..=50,
    ) {
        let faces: Vec<u64> = denominations.keys().copied().collect();
        let face_value = faces[index.index(faces.len())];

        let service = DispenserService::new(inventory_from(&denominations));
        let before = counts(&service);

        let outcome = service.deposit(
            Currency::Rub,
            i64::try_from(face_value).unwrap(),
            quantity,
        );
        prop_assert!(outcome.is_ok());

        let after = counts(&service);
        for (&face, &seeded) in &denominations {
            let was = before.get(&face).copied().unwrap_or(0);
            let now = after.get(&face).copied().unwrap_or(0);
            prop_assert_eq!(was, seeded);
            if face == face_value {
                prop_assert_eq!(now, was + quantity.unsigned_abs());
            } else {
                prop_assert_eq!(now, was);
            }
        }
    }

    /// Resetting twice yields the same all-zero state as resetting once.
    #[test]
    fn prop_reset_is_idempotent(denominations in denomination_set()) {
        let service = DispenserService::new(inventory_from(&denominations));

        service.reset();
        let once = counts(&service);
        service.reset();

        prop_assert!(once.is_empty());
        prop_assert_eq!(counts(&service), once);
    }

    /// The stock listing never reports an empty bucket.
    #[test]
    fn prop_list_never_reports_zero_counts(
        denominations in denomination_set(),
        amount in requested_amount(),
    ) {
        let service = DispenserService::new(inventory_from(&denominations));
        let _ = service.withdraw(Currency::Rub, amount);

        for level in service.list() {
            prop_assert!(level.available_count > 0);
        }
    }
}
