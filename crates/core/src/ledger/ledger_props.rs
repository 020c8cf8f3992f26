//! Property-based tests for journal entry validation.

use chrono::NaiveDate;
use mizan_shared::types::{AccountId, JournalEntryId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{
    JournalEntry, JournalEntryItem, JournalEntryType, NewJournalEntry, sort_newest_first,
};
use super::validation::validate_entry;

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn line(debit: Decimal, credit: Decimal) -> JournalEntryItem {
    JournalEntryItem {
        account_id: AccountId::new(),
        account_name: "Account".to_string(),
        debit,
        credit,
    }
}

/// Strategy for a balanced entry: debits split arbitrarily, one credit line
/// per debit line carrying the same amounts in reverse order.
fn balanced_entry() -> impl Strategy<Value = NewJournalEntry> {
    prop::collection::vec(positive_amount(), 1..6).prop_map(|amounts| {
        let mut items: Vec<_> = amounts.iter().map(|a| line(*a, Decimal::ZERO)).collect();
        items.extend(amounts.iter().rev().map(|a| line(Decimal::ZERO, *a)));
        NewJournalEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            description: "Generated".to_string(),
            entry_type: JournalEntryType::General,
            source_id: None,
            items,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every balanced entry is accepted with equal column totals.
    #[test]
    fn prop_balanced_entries_accepted(entry in balanced_entry()) {
        let totals = validate_entry(&entry);
        prop_assert!(totals.is_ok(), "balanced entry rejected: {:?}", totals);
        let totals = totals.unwrap();
        prop_assert_eq!(totals.debit, totals.credit);
        prop_assert_eq!(totals.debit, entry.total_debit());
    }

    /// Perturbing any single line by a positive amount unbalances the entry.
    #[test]
    fn prop_perturbed_entries_rejected(
        entry in balanced_entry(),
        pick in any::<prop::sample::Index>(),
        extra in positive_amount(),
    ) {
        let mut entry = entry;
        let idx = pick.index(entry.items.len());
        let target = &mut entry.items[idx];
        if target.debit.is_zero() {
            target.credit += extra;
        } else {
            target.debit += extra;
        }
        let rejected = matches!(validate_entry(&entry), Err(LedgerError::Unbalanced { .. }));
        prop_assert!(rejected);
    }

    /// Newest-first sorting is ordered by date and keeps same-day order.
    #[test]
    fn prop_newest_first_is_stable(days in prop::collection::vec(0u32..5, 0..20)) {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut entries: Vec<JournalEntry> = days
            .iter()
            .enumerate()
            .map(|(i, d)| JournalEntry {
                id: JournalEntryId::new(),
                date: base + chrono::Days::new(u64::from(*d)),
                description: i.to_string(),
                entry_type: JournalEntryType::General,
                is_auto_generated: false,
                source_id: None,
                items: vec![],
            })
            .collect();
        sort_newest_first(&mut entries);

        for pair in entries.windows(2) {
            prop_assert!(pair[0].date >= pair[1].date);
            if pair[0].date == pair[1].date {
                let a: usize = pair[0].description.parse().unwrap();
                let b: usize = pair[1].description.parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }
}
