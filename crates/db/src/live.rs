//! Live financial statements.
//!
//! A [`ReportFeed`] subscribes to a tenant's accounts, journal entries and
//! assets, recomputes every statement from scratch on each snapshot, and
//! publishes the result through a watch channel. Dropping the feed (or
//! calling [`ReportFeed::shutdown`]) stops the task and releases its
//! subscriptions.

use std::sync::Arc;

use mizan_core::chart::Account;
use mizan_core::ledger::{JournalEntry, within_limit};
use mizan_core::records::FixedAsset;
use mizan_core::reports::{FinancialStatements, ReportService};
use mizan_shared::TenantContext;
use serde::de::DeserializeOwned;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::store::{Collection, SharedStore, Snapshot, StoreError, decode_all};

/// Shared, immutable statements bundle.
pub type Statements = Arc<FinancialStatements>;

/// Computes every statement once from the store's current contents.
///
/// # Errors
///
/// Returns an error if a collection read or decode fails.
pub async fn compute_statements(
    store: &SharedStore,
    ctx: &TenantContext,
) -> Result<FinancialStatements, StoreError> {
    let accounts: Vec<Account> = decode_all(&store.list(ctx, Collection::Accounts).await?)?;
    let entries: Vec<JournalEntry> = decode_all(&store.list(ctx, Collection::JournalEntries).await?)?;
    let assets: Vec<FixedAsset> = decode_all(&store.list(ctx, Collection::Assets).await?)?;
    Ok(statements_from(&accounts, entries, assets))
}

/// Folds the statements, leaving out records whose amounts exceed the
/// ledger ceiling so the sums stay in range.
fn statements_from(
    accounts: &[Account],
    mut entries: Vec<JournalEntry>,
    mut assets: Vec<FixedAsset>,
) -> FinancialStatements {
    entries.retain(|entry| {
        let keep = entry.amounts_within_limit();
        if !keep {
            warn!(entry_id = %entry.id, "Skipping journal entry with out-of-range amounts");
        }
        keep
    });
    assets.retain(|asset| {
        let keep = within_limit(asset.purchase_price);
        if !keep {
            warn!(asset_id = %asset.id, "Skipping asset with out-of-range price");
        }
        keep
    });
    ReportService::financial_statements(accounts, &entries, &assets)
}

struct Inputs {
    accounts: Snapshot,
    entries: Snapshot,
    assets: Snapshot,
}

impl Inputs {
    fn compute(&self) -> FinancialStatements {
        let accounts: Vec<Account> = decode_lenient(&self.accounts, Collection::Accounts);
        let entries = decode_lenient(&self.entries, Collection::JournalEntries);
        let assets = decode_lenient(&self.assets, Collection::Assets);
        statements_from(&accounts, entries, assets)
    }
}

fn decode_lenient<T: DeserializeOwned>(snapshot: &Snapshot, collection: Collection) -> Vec<T> {
    snapshot
        .iter()
        .filter_map(|doc| match doc.decode() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(collection = %collection, id = %doc.id, error = %e, "Skipping malformed document");
                None
            }
        })
        .collect()
}

/// Handle to a running report feed.
#[derive(Debug)]
pub struct ReportFeed {
    receiver: watch::Receiver<Statements>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ReportFeed {
    /// Subscribes to the tenant's ledger and starts recomputing.
    ///
    /// The first statements are computed before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if any subscription cannot be opened.
    pub async fn start(store: &SharedStore, ctx: &TenantContext) -> Result<Self, StoreError> {
        let mut accounts = store.subscribe(ctx, Collection::Accounts).await?;
        let mut entries = store.subscribe(ctx, Collection::JournalEntries).await?;
        let mut assets = store.subscribe(ctx, Collection::Assets).await?;

        let mut inputs = Inputs {
            accounts: accounts.next().await?,
            entries: entries.next().await?,
            assets: assets.next().await?,
        };
        let (sender, receiver) = watch::channel(Arc::new(inputs.compute()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let tenant_id = ctx.tenant_id;

        let task = tokio::spawn(async move {
            loop {
                let changed = tokio::select! {
                    _ = &mut shutdown_rx => break,
                    next = accounts.next() => next.map(|s| inputs.accounts = s),
                    next = entries.next() => next.map(|s| inputs.entries = s),
                    next = assets.next() => next.map(|s| inputs.assets = s),
                };
                if let Err(e) = changed {
                    warn!(tenant_id = %tenant_id, error = %e, "Report feed input closed");
                    break;
                }

                let statements = inputs.compute();
                debug!(
                    tenant_id = %tenant_id,
                    balanced = statements.trial_balance.is_balanced,
                    net_income = %statements.income_statement.net_income,
                    "Statements recomputed"
                );
                if sender.send(Arc::new(statements)).is_err() {
                    break;
                }
            }
            debug!(tenant_id = %tenant_id, "Report feed stopped");
        });

        info!(tenant_id = %ctx.tenant_id, "Report feed started");
        Ok(Self {
            receiver,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    /// The most recent statements.
    #[must_use]
    pub fn latest(&self) -> Statements {
        Arc::clone(&self.receiver.borrow())
    }

    /// A receiver that observes every future publication.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Statements> {
        self.receiver.clone()
    }

    /// Waits for the next recomputation.
    ///
    /// # Errors
    ///
    /// Returns `SubscriptionClosed` once the feed has stopped.
    pub async fn changed(&mut self) -> Result<Statements, StoreError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| StoreError::SubscriptionClosed)?;
        Ok(Arc::clone(&self.receiver.borrow_and_update()))
    }

    /// Stops the feed and waits until its subscriptions are released.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            warn!(error = %e, "Report feed task failed");
        }
    }
}

impl Drop for ReportFeed {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
