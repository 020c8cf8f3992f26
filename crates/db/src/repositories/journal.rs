//! Journal repository: the append-only entry log.

use mizan_core::ledger::{JournalEntry, LedgerError, NewJournalEntry, sort_newest_first, validate_entry};
use mizan_shared::types::JournalEntryId;
use mizan_shared::{AppError, TenantContext};
use tracing::info;

use super::load_all;
use crate::store::{Collection, Document, SharedStore, StoreError, WriteBatch, to_fields};

/// Error types for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// Entry failed validation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<JournalError> for AppError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::Ledger(e) => e.into(),
            JournalError::Store(e) => e.into(),
        }
    }
}

/// Adds a create-only write for `entry` to `batch`.
pub(crate) fn stage_entry(batch: &mut WriteBatch, entry: &JournalEntry) -> Result<(), StoreError> {
    batch.create(
        Collection::JournalEntries,
        entry.id.to_string(),
        to_fields(entry)?,
    );
    Ok(())
}

/// Journal repository.
#[derive(Clone)]
pub struct JournalRepository {
    store: SharedStore,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Posts a manually entered journal entry.
    ///
    /// # Errors
    ///
    /// Returns a ledger error if the entry is unbalanced or empty, or has a
    /// negative, oversized or two-sided line; nothing is written in that case.
    pub async fn post_manual_entry(
        &self,
        ctx: &TenantContext,
        entry: NewJournalEntry,
    ) -> Result<JournalEntry, JournalError> {
        self.post(ctx, entry, false).await
    }

    /// Posts an entry produced from a business event.
    ///
    /// # Errors
    ///
    /// Same as [`post_manual_entry`](Self::post_manual_entry).
    pub async fn post_auto_entry(
        &self,
        ctx: &TenantContext,
        entry: NewJournalEntry,
    ) -> Result<JournalEntry, JournalError> {
        self.post(ctx, entry, true).await
    }

    async fn post(
        &self,
        ctx: &TenantContext,
        entry: NewJournalEntry,
        is_auto_generated: bool,
    ) -> Result<JournalEntry, JournalError> {
        let totals = validate_entry(&entry)?;
        let entry = JournalEntry::from_new(JournalEntryId::new(), entry, is_auto_generated);

        let mut batch = WriteBatch::new();
        stage_entry(&mut batch, &entry)?;
        self.store.commit(ctx, batch).await?;

        info!(
            tenant_id = %ctx.tenant_id,
            entry_id = %entry.id,
            total = %totals.debit,
            auto = is_auto_generated,
            "Journal entry posted"
        );
        Ok(entry)
    }

    /// Lists entries, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_entries(&self, ctx: &TenantContext) -> Result<Vec<JournalEntry>, JournalError> {
        let mut entries: Vec<JournalEntry> =
            load_all(&self.store, ctx, Collection::JournalEntries).await?;
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    /// Lists entries in posting order, as reports consume them.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn ledger(&self, ctx: &TenantContext) -> Result<Vec<JournalEntry>, JournalError> {
        Ok(load_all(&self.store, ctx, Collection::JournalEntries).await?)
    }

    /// Finds an entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn find_entry(
        &self,
        ctx: &TenantContext,
        id: JournalEntryId,
    ) -> Result<Option<JournalEntry>, JournalError> {
        let doc = self
            .store
            .get(ctx, Collection::JournalEntries, &id.to_string())
            .await?;
        Ok(doc.as_ref().map(Document::decode::<JournalEntry>).transpose()?)
    }
}
