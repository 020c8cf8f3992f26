//! Demo seeder for Mizan.
//!
//! Builds one tenant in an in-memory store, records a year of sample
//! activity, and prints the resulting financial statements as JSON.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use chrono::{NaiveDate, TimeZone, Utc};
use mizan_core::chart::{AccountType, NewAccount};
use mizan_core::ledger::{JournalEntryItem, JournalEntryType, NewJournalEntry};
use mizan_core::payroll::PenaltyKind;
use mizan_core::records::{
    CustodyKind, NewCustodyMovement, NewCustomer, NewExpense, NewFixedAsset, NewReceiptVoucher,
    NewSalesInvoice, NewSalesInvoiceLine,
};
use mizan_db::repositories::{CreateEmployeeInput, CreatePenaltyInput, CreateRewardInput};
use mizan_db::{MemoryStore, ReportFeed, Repositories, SharedStore};
use mizan_shared::types::TenantId;
use mizan_shared::{AppConfig, TenantContext};
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Demo tenant ID used when none is configured.
const DEMO_TENANT_ID: u128 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load().context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.telemetry.filter));
    let registry = tracing_subscriber::registry().with(filter);
    if config.telemetry.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let store: SharedStore = Arc::new(MemoryStore::new());
    let tenant_id = config
        .tenant
        .id
        .unwrap_or_else(|| TenantId::from_uuid(Uuid::from_u128(DEMO_TENANT_ID)));
    let ctx = TenantContext::new(tenant_id);
    let repos = Repositories::new(&store, &config.ledger);
    info!(tenant_id = %ctx.tenant_id, company = %config.tenant.company_name, "Seeding demo tenant");

    if config.tenant.seed_default_chart {
        repos.accounts.seed_default_chart(&ctx).await?;
    }
    let mut feed = ReportFeed::start(&store, &ctx).await?;

    seed_activity(&repos, &ctx).await?;

    let statements = feed.changed().await?;
    info!(
        balanced = statements.trial_balance.is_balanced,
        net_income = %statements.income_statement.net_income,
        "Live statements updated"
    );
    feed.shutdown().await;

    let statements = mizan_db::compute_statements(&store, &ctx).await?;
    println!("{}", serde_json::to_string_pretty(&statements)?);
    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).with_context(|| format!("bad date {year}-{month}-{day}"))
}

async fn seed_activity(repos: &Repositories, ctx: &TenantContext) -> anyhow::Result<()> {
    let chart = repos.accounts.list_accounts(ctx).await?;
    let code = |c: &str| {
        chart
            .iter()
            .find(|a| a.code == c)
            .cloned()
            .with_context(|| format!("account {c} missing from chart"))
    };
    let cash = code("111")?;
    let bank = code("112")?;
    let capital = code("31")?;

    repos
        .journal
        .post_manual_entry(
            ctx,
            NewJournalEntry {
                date: date(2024, 1, 1)?,
                description: "قيد افتتاحي".to_string(),
                entry_type: JournalEntryType::Opening,
                source_id: None,
                items: vec![
                    JournalEntryItem::debit(&cash, dec!(15000)),
                    JournalEntryItem::debit(&bank, dec!(25000)),
                    JournalEntryItem::credit(&capital, dec!(40000)),
                ],
            },
        )
        .await?;

    let vehicles = repos
        .accounts
        .create_account(
            ctx,
            NewAccount {
                name: "السيارات".to_string(),
                account_type: AccountType::Asset,
                parent_id: Some(code("12")?.id),
                code: None,
                role: None,
            },
        )
        .await?;
    let rent = repos
        .accounts
        .create_account(
            ctx,
            NewAccount {
                name: "مصروف الإيجار".to_string(),
                account_type: AccountType::Expense,
                parent_id: Some(code("51")?.id),
                code: None,
                role: None,
            },
        )
        .await?;

    let van = repos
        .assets
        .register_asset(
            ctx,
            NewFixedAsset {
                name: "سيارة توزيع".to_string(),
                purchase_price: dec!(10000),
                depreciation_rate: dec!(10),
                useful_life: 10,
                purchase_date: date(2024, 1, 15)?,
            },
        )
        .await?;
    repos
        .journal
        .post_manual_entry(
            ctx,
            NewJournalEntry {
                date: date(2024, 1, 15)?,
                description: "شراء سيارة توزيع".to_string(),
                entry_type: JournalEntryType::General,
                source_id: Some(van.id.to_string()),
                items: vec![
                    JournalEntryItem::debit(&vehicles, dec!(10000)),
                    JournalEntryItem::credit(&bank, dec!(10000)),
                ],
            },
        )
        .await?;

    repos
        .expenses
        .record_expense(
            ctx,
            NewExpense {
                date: date(2024, 3, 1)?,
                description: "إيجار مارس".to_string(),
                amount: dec!(500),
                expense_account_id: rent.id,
                payment_account_id: bank.id,
            },
        )
        .await?;

    let employee = repos
        .hr
        .create_employee(
            ctx,
            CreateEmployeeInput {
                name: "سارة".to_string(),
                salary: dec!(3000),
            },
        )
        .await?;
    repos
        .hr
        .add_reward(
            ctx,
            CreateRewardInput {
                employee_id: employee.id,
                reason: "مكافأة أداء".to_string(),
                amount: dec!(200),
                date: date(2024, 3, 10)?,
            },
        )
        .await?;
    repos
        .hr
        .add_penalty(
            ctx,
            CreatePenaltyInput {
                employee_id: employee.id,
                kind: PenaltyKind::Deduction,
                reason: "تأخير".to_string(),
                amount: dec!(50),
                date: date(2024, 3, 15)?,
            },
        )
        .await?;
    let now = Utc
        .with_ymd_and_hms(2024, 3, 31, 12, 0, 0)
        .single()
        .context("bad payroll timestamp")?;
    repos.payroll.create_payroll(ctx, 2024, 3, now).await?;

    repos
        .custody
        .record_movement(
            ctx,
            NewCustodyMovement {
                employee_id: employee.id,
                kind: CustodyKind::Receipt,
                amount: dec!(400),
                date: date(2024, 4, 2)?,
                description: "مشتريات مكتبية".to_string(),
                cash_account_id: None,
            },
        )
        .await?;

    let customer = repos
        .sales
        .create_customer(
            ctx,
            NewCustomer {
                name: "شركة النور".to_string(),
                phone: None,
                email: None,
            },
        )
        .await?;
    repos
        .sales
        .create_invoice(
            ctx,
            NewSalesInvoice {
                customer_id: customer.id,
                date: date(2024, 5, 1)?,
                items: vec![NewSalesInvoiceLine {
                    description: "خدمات توزيع".to_string(),
                    quantity: dec!(3),
                    unit_price: dec!(2500),
                }],
            },
        )
        .await?;
    repos
        .sales
        .record_receipt(
            ctx,
            NewReceiptVoucher {
                customer_id: customer.id,
                amount: dec!(7500),
                date: date(2024, 5, 20)?,
                description: String::new(),
                cash_account_id: cash.id,
            },
        )
        .await?;

    repos
        .assets
        .run_depreciation(ctx, van.id, date(2024, 12, 31)?)
        .await?;

    info!(tenant_id = %ctx.tenant_id, "Sample activity recorded");
    Ok(())
}
