//! Property-based tests: every generated entry balances exactly.

use chrono::NaiveDate;
use mizan_shared::ReceiptCreditTarget;
use mizan_shared::types::{
    AssetId, CustodyMovementId, CustomerId, EmployeeId, ExpenseId, ReceiptVoucherId,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::PostingService;
use crate::chart::{Account, default_chart};
use crate::ledger::NewJournalEntry;
use crate::records::{
    AssetStatus, CustodyKind, CustodyMovement, Expense, FixedAsset, ReceiptVoucher,
};

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a depreciation rate between 0.5% and 100%.
fn rate() -> impl Strategy<Value = Decimal> {
    (1i64..=200i64).prop_map(|halves| Decimal::new(halves * 5, 1))
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn code(chart: &[Account], code: &str) -> Account {
    chart.iter().find(|a| a.code == code).unwrap().clone()
}

fn assert_balanced(entry: &NewJournalEntry) -> Result<(), TestCaseError> {
    prop_assert_eq!(entry.total_debit(), entry.total_credit());
    prop_assert!(entry.total_debit() > Decimal::ZERO);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_expense_entries_balance(amount in positive_amount()) {
        let chart = default_chart();
        let expense = Expense {
            id: ExpenseId::new(),
            date: day(),
            description: "Supplies".to_string(),
            amount,
            expense_account_id: code(&chart, "51").id,
            payment_account_id: code(&chart, "111").id,
            journal_entry_id: None,
        };
        assert_balanced(&PostingService::expense_entry(&chart, &expense).unwrap())?;
    }

    #[test]
    fn prop_custody_entries_balance(amount in positive_amount(), receipt in any::<bool>()) {
        let chart = default_chart();
        let movement = CustodyMovement {
            id: CustodyMovementId::new(),
            employee_id: EmployeeId::new(),
            employee_name: "Ali".to_string(),
            kind: if receipt { CustodyKind::Receipt } else { CustodyKind::Settlement },
            amount,
            date: day(),
            description: String::new(),
            cash_account_id: None,
            journal_entry_id: None,
        };
        assert_balanced(&PostingService::custody_entry(&chart, &movement).unwrap())?;
    }

    #[test]
    fn prop_depreciation_entries_balance(price in positive_amount(), rate in rate()) {
        let chart = default_chart();
        let asset = FixedAsset {
            id: AssetId::new(),
            name: "Machine".to_string(),
            purchase_price: price,
            depreciation_rate: rate,
            useful_life: 5,
            purchase_date: day(),
            status: AssetStatus::Active,
        };
        // Tiny charges may round to zero cents and are rejected as empty entries.
        if let Ok(entry) = PostingService::depreciation_entry(&chart, &[], &asset, day(), false) {
            assert_balanced(&entry)?;
            prop_assert_eq!(Some(entry.total_debit()), asset.annual_depreciation());
        } else {
            prop_assert!(asset.annual_depreciation().is_some_and(|d| d.is_zero()));
        }
    }

    #[test]
    fn prop_receipt_entries_balance(amount in positive_amount(), to_revenue in any::<bool>()) {
        let chart = default_chart();
        let voucher = ReceiptVoucher {
            id: ReceiptVoucherId::new(),
            customer_id: CustomerId::new(),
            customer_name: "Customer".to_string(),
            amount,
            date: day(),
            description: String::new(),
            cash_account_id: code(&chart, "112").id,
            journal_entry_id: None,
        };
        let target = if to_revenue { ReceiptCreditTarget::Revenue } else { ReceiptCreditTarget::Receivables };
        assert_balanced(&PostingService::receipt_entry(&chart, &voucher, target).unwrap())?;
    }
}
