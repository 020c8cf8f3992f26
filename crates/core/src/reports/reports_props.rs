//! Property-based tests for report invariants.

use chrono::NaiveDate;
use mizan_shared::types::JournalEntryId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::ReportService;
use crate::chart::{Account, default_chart};
use crate::ledger::{JournalEntry, JournalEntryItem, JournalEntryType};

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// A balanced entry shape: (debit legs as (account index, amount), credit
/// account index). The credit leg carries the sum of the debit legs.
fn entry_shape() -> impl Strategy<Value = (Vec<(usize, Decimal)>, usize, bool)> {
    (
        prop::collection::vec((0usize..17, positive_amount()), 1..4),
        0usize..17,
        any::<bool>(),
    )
}

fn build_ledger(
    chart: &[Account],
    shapes: Vec<(Vec<(usize, Decimal)>, usize, bool)>,
) -> Vec<JournalEntry> {
    shapes
        .into_iter()
        .enumerate()
        .map(|(n, (debits, credit_idx, opening))| {
            let total: Decimal = debits.iter().map(|(_, amount)| *amount).sum();
            let mut items: Vec<JournalEntryItem> = debits
                .into_iter()
                .map(|(idx, amount)| JournalEntryItem::debit(&chart[idx], amount))
                .collect();
            items.push(JournalEntryItem::credit(&chart[credit_idx], total));
            JournalEntry {
                id: JournalEntryId::new(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Days::new(u64::try_from(n % 365).unwrap()),
                description: format!("Entry {n}"),
                entry_type: if opening { JournalEntryType::Opening } else { JournalEntryType::General },
                is_auto_generated: false,
                source_id: None,
                items,
            }
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The trial balance footer balances for any balanced ledger.
    #[test]
    fn prop_trial_balance_footer_balances(shapes in prop::collection::vec(entry_shape(), 0..40)) {
        let chart = default_chart();
        let entries = build_ledger(&chart, shapes);
        let tb = ReportService::trial_balance(&chart, &entries);
        prop_assert_eq!(tb.total_debit, tb.total_credit);
        prop_assert!(tb.is_balanced);
        prop_assert!(tb.rows.iter().all(|r| r.debit.is_zero() || r.credit.is_zero()));
    }

    /// Assets equal liabilities plus equity plus current earnings.
    #[test]
    fn prop_balance_sheet_equation_holds(shapes in prop::collection::vec(entry_shape(), 0..40)) {
        let chart = default_chart();
        let entries = build_ledger(&chart, shapes);
        let sheet = ReportService::balance_sheet(&chart, &entries);
        prop_assert_eq!(sheet.total_assets, sheet.liabilities_and_equity);
        prop_assert!(sheet.is_balanced);
    }

    /// The last running balance of every account equals its trial balance net.
    #[test]
    fn prop_general_ledger_closes_at_trial_balance_net(
        shapes in prop::collection::vec(entry_shape(), 0..25),
        pick in 0usize..17,
    ) {
        let chart = default_chart();
        let entries = build_ledger(&chart, shapes);
        let account = &chart[pick];
        let ledger = ReportService::general_ledger(&chart, &entries, account.id).unwrap();
        let tb = ReportService::trial_balance(&chart, &entries);
        prop_assert_eq!(ledger.closing_balance, tb.row(account.id).unwrap().net());
    }
}
