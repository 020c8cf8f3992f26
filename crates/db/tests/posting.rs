//! Business events posting their journal entries through the store.

mod common;

use common::{by_code, date, harness_with, seeded};
use mizan_core::chart::{AccountType, NewAccount};
use mizan_core::ledger::{
    JournalEntryItem, JournalEntryType, LedgerError, MAX_AMOUNT, NewJournalEntry,
};
use mizan_core::posting::PostingError;
use mizan_core::records::{
    AssetStatus, CustodyKind, InvoiceStatus, NewCustodyMovement, NewCustomer, NewExpense,
    NewFixedAsset, NewReceiptVoucher, NewSalesInvoice, NewSalesInvoiceLine,
};
use mizan_db::Collection;
use mizan_db::repositories::{
    AssetError, CreateEmployeeInput, ExpenseError, JournalError, SalesError, UpdateAssetInput,
};
use mizan_shared::types::{AccountId, CustomerId};
use mizan_shared::{AppError, LedgerConfig, ReceiptCreditTarget};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_expense_posts_balanced_entry_with_record() {
    let (h, chart) = seeded().await;
    let rent = h
        .repos
        .accounts
        .create_account(
            &h.ctx,
            NewAccount {
                name: "مصروف الإيجار".to_string(),
                account_type: AccountType::Expense,
                parent_id: Some(by_code(&chart, "51").id),
                code: Some("5101".to_string()),
                role: None,
            },
        )
        .await
        .unwrap();
    let bank = by_code(&chart, "112");

    let (expense, entry) = h
        .repos
        .expenses
        .record_expense(
            &h.ctx,
            NewExpense {
                date: date(2024, 3, 1),
                description: "إيجار مارس".to_string(),
                amount: dec!(500),
                expense_account_id: rent.id,
                payment_account_id: bank.id,
            },
        )
        .await
        .unwrap();

    assert_eq!(expense.journal_entry_id, Some(entry.id));
    assert!(entry.is_auto_generated);
    assert_eq!(entry.source_id, Some(expense.id.to_string()));
    assert_eq!(entry.items[0].account_id, rent.id);
    assert_eq!(entry.items[0].debit, dec!(500));
    assert_eq!(entry.items[1].account_id, bank.id);
    assert_eq!(entry.items[1].credit, dec!(500));

    let entries = h.repos.journal.list_entries(&h.ctx).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0], entry);
    assert_eq!(h.repos.expenses.list_expenses(&h.ctx).await.unwrap(), vec![expense]);
}

#[tokio::test]
async fn test_rejected_expense_writes_nothing() {
    let (h, chart) = seeded().await;
    let err = h
        .repos
        .expenses
        .record_expense(
            &h.ctx,
            NewExpense {
                date: date(2024, 3, 1),
                description: "مجهول".to_string(),
                amount: dec!(50),
                expense_account_id: AccountId::new(),
                payment_account_id: by_code(&chart, "111").id,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ExpenseError::Posting(PostingError::UnknownAccount(_))));
    assert!(matches!(AppError::from(err), AppError::NotFound(_)));
    assert!(h.store.list(&h.ctx, Collection::Expenses).await.unwrap().is_empty());
    assert!(h.store.list(&h.ctx, Collection::JournalEntries).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_offline_store_propagates_and_writes_nothing() {
    let (h, chart) = seeded().await;
    h.memory.set_offline(true);

    let err = h
        .repos
        .expenses
        .record_expense(
            &h.ctx,
            NewExpense {
                date: date(2024, 3, 1),
                description: "كهرباء".to_string(),
                amount: dec!(120),
                expense_account_id: by_code(&chart, "51").id,
                payment_account_id: by_code(&chart, "111").id,
            },
        )
        .await
        .unwrap_err();
    let app: AppError = err.into();
    assert!(app.is_retryable());
    assert_eq!(app.error_code(), "STORE_ERROR");

    h.memory.set_offline(false);
    assert!(h.repos.journal.list_entries(&h.ctx).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_manual_entry_validation() {
    let (h, chart) = seeded().await;
    let cash = by_code(&chart, "111");
    let capital = by_code(&chart, "31");

    let unbalanced = NewJournalEntry {
        date: date(2024, 1, 1),
        description: "رأس المال".to_string(),
        entry_type: JournalEntryType::Opening,
        source_id: None,
        items: vec![
            JournalEntryItem::debit(cash, dec!(1000)),
            JournalEntryItem::credit(capital, dec!(900)),
        ],
    };
    let err = h
        .repos
        .journal
        .post_manual_entry(&h.ctx, unbalanced.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, JournalError::Ledger(LedgerError::Unbalanced { .. })));

    let mut balanced = unbalanced;
    balanced.items[1] = JournalEntryItem::credit(capital, dec!(1000));
    let entry = h.repos.journal.post_manual_entry(&h.ctx, balanced).await.unwrap();
    assert!(!entry.is_auto_generated);
    assert_eq!(entry.total(), dec!(1000));
    assert_eq!(h.repos.journal.find_entry(&h.ctx, entry.id).await.unwrap(), Some(entry));
}

#[tokio::test]
async fn test_oversized_manual_entry_rejected_without_panic() {
    let (h, chart) = seeded().await;
    let cash = by_code(&chart, "111");
    let capital = by_code(&chart, "31");

    let err = h
        .repos
        .journal
        .post_manual_entry(
            &h.ctx,
            NewJournalEntry {
                date: date(2024, 1, 1),
                description: "رأس المال".to_string(),
                entry_type: JournalEntryType::Opening,
                source_id: None,
                items: vec![
                    JournalEntryItem::debit(cash, Decimal::MAX),
                    JournalEntryItem::debit(cash, Decimal::MAX),
                    JournalEntryItem::credit(capital, Decimal::MAX),
                ],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, JournalError::Ledger(LedgerError::AmountTooLarge(_))));
    assert!(matches!(AppError::from(err), AppError::Validation(_)));
    assert!(h.repos.journal.list_entries(&h.ctx).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_asset_rejected() {
    let (h, _) = seeded().await;
    let asset = |price: Decimal, rate: Decimal| NewFixedAsset {
        name: "برج".to_string(),
        purchase_price: price,
        depreciation_rate: rate,
        useful_life: 1,
        purchase_date: date(2023, 1, 1),
    };

    let err = h
        .repos
        .assets
        .register_asset(&h.ctx, asset(Decimal::MAX, dec!(50)))
        .await
        .unwrap_err();
    assert!(matches!(err, AssetError::InvalidAsset(_)));

    let err = h
        .repos
        .assets
        .register_asset(&h.ctx, asset(MAX_AMOUNT, dec!(200)))
        .await
        .unwrap_err();
    assert!(matches!(err, AssetError::InvalidAsset(_)));

    assert!(h.repos.assets.list_assets(&h.ctx).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_entries_listed_newest_first() {
    let (h, chart) = seeded().await;
    let cash = by_code(&chart, "111");
    let revenue = by_code(&chart, "41");
    for (day, amount) in [(5, dec!(10)), (20, dec!(20)), (12, dec!(30))] {
        h.repos
            .journal
            .post_manual_entry(
                &h.ctx,
                NewJournalEntry {
                    date: date(2024, 2, day),
                    description: "مبيعات نقدية".to_string(),
                    entry_type: JournalEntryType::General,
                    source_id: None,
                    items: vec![
                        JournalEntryItem::debit(cash, amount),
                        JournalEntryItem::credit(revenue, amount),
                    ],
                },
            )
            .await
            .unwrap();
    }
    let days: Vec<u32> = h
        .repos
        .journal
        .list_entries(&h.ctx)
        .await
        .unwrap()
        .iter()
        .map(|e| chrono::Datelike::day(&e.date))
        .collect();
    assert_eq!(days, [20, 12, 5]);
}

#[tokio::test]
async fn test_depreciation_once_per_year() {
    let (h, chart) = seeded().await;
    let van = h
        .repos
        .assets
        .register_asset(
            &h.ctx,
            NewFixedAsset {
                name: "سيارة توزيع".to_string(),
                purchase_price: dec!(10000),
                depreciation_rate: dec!(10),
                useful_life: 10,
                purchase_date: date(2023, 1, 1),
            },
        )
        .await
        .unwrap();

    let entry = h
        .repos
        .assets
        .run_depreciation(&h.ctx, van.id, date(2024, 12, 31))
        .await
        .unwrap();
    assert_eq!(entry.total(), dec!(1000));
    assert_eq!(entry.items[0].account_id, by_code(&chart, "511").id);
    assert_eq!(entry.items[1].account_id, by_code(&chart, "129").id);

    let again = h
        .repos
        .assets
        .run_depreciation(&h.ctx, van.id, date(2024, 6, 30))
        .await
        .unwrap_err();
    assert!(matches!(
        again,
        AssetError::Posting(PostingError::AlreadyDepreciated { year: 2024, .. })
    ));

    h.repos
        .assets
        .run_depreciation(&h.ctx, van.id, date(2025, 12, 31))
        .await
        .unwrap();
    assert_eq!(h.repos.journal.list_entries(&h.ctx).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_repeat_depreciation_when_configured() {
    let h = harness_with(&LedgerConfig {
        allow_repeat_depreciation: true,
        ..LedgerConfig::default()
    });
    h.repos.accounts.seed_default_chart(&h.ctx).await.unwrap();
    let asset = h
        .repos
        .assets
        .register_asset(
            &h.ctx,
            NewFixedAsset {
                name: "حاسب".to_string(),
                purchase_price: dec!(3333.33),
                depreciation_rate: dec!(12.5),
                useful_life: 8,
                purchase_date: date(2024, 1, 1),
            },
        )
        .await
        .unwrap();
    for _ in 0..2 {
        let entry = h
            .repos
            .assets
            .run_depreciation(&h.ctx, asset.id, date(2024, 12, 31))
            .await
            .unwrap();
        assert_eq!(entry.total(), dec!(416.67));
    }
}

#[tokio::test]
async fn test_disposed_asset_refused() {
    let (h, _) = seeded().await;
    let asset = h
        .repos
        .assets
        .register_asset(
            &h.ctx,
            NewFixedAsset {
                name: "طابعة".to_string(),
                purchase_price: dec!(800),
                depreciation_rate: dec!(20),
                useful_life: 5,
                purchase_date: date(2022, 5, 1),
            },
        )
        .await
        .unwrap();
    let updated = h
        .repos
        .assets
        .update_asset(
            &h.ctx,
            asset.id,
            UpdateAssetInput {
                status: Some(AssetStatus::Disposed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "طابعة");

    let err = h
        .repos
        .assets
        .run_depreciation(&h.ctx, asset.id, date(2024, 12, 31))
        .await
        .unwrap_err();
    assert!(matches!(err, AssetError::Posting(PostingError::AssetDisposed(_))));
}

#[tokio::test]
async fn test_custody_round_trip_balance() {
    let (h, chart) = seeded().await;
    let ali = h
        .repos
        .hr
        .create_employee(
            &h.ctx,
            CreateEmployeeInput {
                name: "علي".to_string(),
                salary: dec!(3000),
            },
        )
        .await
        .unwrap();

    let (receipt, entry) = h
        .repos
        .custody
        .record_movement(
            &h.ctx,
            NewCustodyMovement {
                employee_id: ali.id,
                kind: CustodyKind::Receipt,
                amount: dec!(500),
                date: date(2024, 4, 1),
                description: String::new(),
                cash_account_id: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(receipt.employee_name, "علي");
    assert_eq!(entry.items[0].account_id, by_code(&chart, "113").id);
    assert_eq!(entry.items[1].account_id, by_code(&chart, "111").id);

    h.repos
        .custody
        .record_movement(
            &h.ctx,
            NewCustodyMovement {
                employee_id: ali.id,
                kind: CustodyKind::Settlement,
                amount: dec!(200),
                date: date(2024, 4, 10),
                description: "فواتير".to_string(),
                cash_account_id: Some(by_code(&chart, "112").id),
            },
        )
        .await
        .unwrap();

    let balances = h.repos.custody.balances(&h.ctx).await.unwrap();
    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].balance, dec!(300));
    assert_eq!(h.repos.custody.list_movements(&h.ctx).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_receipt_voucher_credits_configured_target() {
    for (target, credited) in [
        (ReceiptCreditTarget::Receivables, "114"),
        (ReceiptCreditTarget::Revenue, "41"),
    ] {
        let h = harness_with(&LedgerConfig {
            receipt_credit_target: target,
            ..LedgerConfig::default()
        });
        let chart = h.repos.accounts.seed_default_chart(&h.ctx).await.unwrap();
        let customer = h
            .repos
            .sales
            .create_customer(
                &h.ctx,
                NewCustomer {
                    name: "شركة النور".to_string(),
                    phone: None,
                    email: None,
                },
            )
            .await
            .unwrap();

        let (voucher, entry) = h
            .repos
            .sales
            .record_receipt(
                &h.ctx,
                NewReceiptVoucher {
                    customer_id: customer.id,
                    amount: dec!(750),
                    date: date(2024, 5, 2),
                    description: String::new(),
                    cash_account_id: by_code(&chart, "111").id,
                },
            )
            .await
            .unwrap();

        assert_eq!(voucher.journal_entry_id, Some(entry.id));
        assert_eq!(entry.items[1].account_id, by_code(&chart, credited).id);
        assert_eq!(entry.items[1].credit, dec!(750));
        assert_eq!(h.repos.sales.list_receipts(&h.ctx).await.unwrap().len(), 1);
    }
}

#[tokio::test]
async fn test_invoice_totals_and_customer_lookup() {
    let (h, _) = seeded().await;
    let customer = h
        .repos
        .sales
        .create_customer(
            &h.ctx,
            NewCustomer {
                name: "مؤسسة الأمل".to_string(),
                phone: Some("0500000000".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();

    let invoice = h
        .repos
        .sales
        .create_invoice(
            &h.ctx,
            NewSalesInvoice {
                customer_id: customer.id,
                date: date(2024, 6, 1),
                items: vec![
                    NewSalesInvoiceLine {
                        description: "استشارة".to_string(),
                        quantity: dec!(3),
                        unit_price: dec!(150),
                    },
                    NewSalesInvoiceLine {
                        description: "تقرير".to_string(),
                        quantity: dec!(1),
                        unit_price: dec!(49.50),
                    },
                ],
            },
        )
        .await
        .unwrap();
    assert_eq!(invoice.total_amount, dec!(499.50));
    assert_eq!(invoice.customer_name, "مؤسسة الأمل");

    h.repos
        .sales
        .set_invoice_status(&h.ctx, invoice.id, InvoiceStatus::Issued)
        .await
        .unwrap();
    let for_customer = h.repos.sales.invoices_for(&h.ctx, customer.id).await.unwrap();
    assert_eq!(for_customer.len(), 1);
    assert_eq!(for_customer[0].status, InvoiceStatus::Issued);
    // Invoices do not post to the ledger.
    assert!(h.repos.journal.list_entries(&h.ctx).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_customer_receipt() {
    let (h, chart) = seeded().await;
    let err = h
        .repos
        .sales
        .record_receipt(
            &h.ctx,
            NewReceiptVoucher {
                customer_id: CustomerId::new(),
                amount: Decimal::ONE,
                date: date(2024, 5, 2),
                description: String::new(),
                cash_account_id: by_code(&chart, "111").id,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SalesError::CustomerNotFound(_)));
}
