//! Fixed asset repository and depreciation runs.

use chrono::NaiveDate;
use mizan_core::chart::Account;
use mizan_core::ledger::{JournalEntry, within_limit};
use mizan_core::posting::{PostingError, PostingService};
use mizan_core::records::{AssetStatus, FixedAsset, NewFixedAsset};
use mizan_shared::types::{AssetId, JournalEntryId};
use mizan_shared::{AppError, LedgerConfig, TenantContext};
use rust_decimal::Decimal;
use tracing::info;

use super::journal::stage_entry;
use super::load_all;
use crate::store::{Collection, Document, SharedStore, StoreError, WriteBatch, to_fields};

/// Error types for fixed asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// Asset not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(AssetId),

    /// Asset fields failed validation.
    #[error("Invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// The depreciation entry could not be built.
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<AssetError> for AppError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::AssetNotFound(_) => Self::NotFound(err.to_string()),
            AssetError::InvalidAsset(_) => Self::Validation(err.to_string()),
            AssetError::Posting(e) => e.into(),
            AssetError::Store(e) => e.into(),
        }
    }
}

/// Input for editing an asset.
#[derive(Debug, Clone, Default)]
pub struct UpdateAssetInput {
    /// New name.
    pub name: Option<String>,
    /// New acquisition cost.
    pub purchase_price: Option<Decimal>,
    /// New annual rate in percent.
    pub depreciation_rate: Option<Decimal>,
    /// New useful life in years.
    pub useful_life: Option<u32>,
    /// New acquisition date.
    pub purchase_date: Option<NaiveDate>,
    /// New status.
    pub status: Option<AssetStatus>,
}

/// Fixed asset repository.
#[derive(Clone)]
pub struct AssetRepository {
    store: SharedStore,
    config: LedgerConfig,
}

impl AssetRepository {
    /// Creates a new asset repository.
    #[must_use]
    pub const fn new(store: SharedStore, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    /// Registers an asset with status `active`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAsset` for a blank name, a negative price or rate, or
    /// a price or yearly charge above the ledger's amount ceiling.
    pub async fn register_asset(
        &self,
        ctx: &TenantContext,
        input: NewFixedAsset,
    ) -> Result<FixedAsset, AssetError> {
        let asset = FixedAsset {
            id: AssetId::new(),
            name: input.name.trim().to_string(),
            purchase_price: input.purchase_price,
            depreciation_rate: input.depreciation_rate,
            useful_life: input.useful_life,
            purchase_date: input.purchase_date,
            status: AssetStatus::Active,
        };
        validate(&asset)?;

        self.store
            .set(ctx, Collection::Assets, &asset.id.to_string(), to_fields(&asset)?)
            .await?;

        info!(
            tenant_id = %ctx.tenant_id,
            asset_id = %asset.id,
            price = %asset.purchase_price,
            "Asset registered"
        );
        Ok(asset)
    }

    /// Edits asset fields.
    ///
    /// # Errors
    ///
    /// Returns `AssetNotFound` or `InvalidAsset`.
    pub async fn update_asset(
        &self,
        ctx: &TenantContext,
        id: AssetId,
        input: UpdateAssetInput,
    ) -> Result<FixedAsset, AssetError> {
        let mut asset = self.find(ctx, id).await?;
        if let Some(name) = input.name {
            asset.name = name.trim().to_string();
        }
        if let Some(price) = input.purchase_price {
            asset.purchase_price = price;
        }
        if let Some(rate) = input.depreciation_rate {
            asset.depreciation_rate = rate;
        }
        if let Some(life) = input.useful_life {
            asset.useful_life = life;
        }
        if let Some(date) = input.purchase_date {
            asset.purchase_date = date;
        }
        if let Some(status) = input.status {
            asset.status = status;
        }
        validate(&asset)?;

        self.store
            .update(ctx, Collection::Assets, &id.to_string(), to_fields(&asset)?)
            .await?;

        info!(tenant_id = %ctx.tenant_id, asset_id = %id, "Asset updated");
        Ok(asset)
    }

    /// Lists assets in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_assets(&self, ctx: &TenantContext) -> Result<Vec<FixedAsset>, AssetError> {
        Ok(load_all(&self.store, ctx, Collection::Assets).await?)
    }

    /// Posts one year's straight-line depreciation for an asset, dated `on`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The asset does not exist or is disposed
    /// - The asset was already depreciated in `on`'s year
    /// - The depreciation accounts are missing from the chart
    pub async fn run_depreciation(
        &self,
        ctx: &TenantContext,
        id: AssetId,
        on: NaiveDate,
    ) -> Result<JournalEntry, AssetError> {
        let asset = self.find(ctx, id).await?;
        let accounts: Vec<Account> = load_all(&self.store, ctx, Collection::Accounts).await?;
        let entries: Vec<JournalEntry> =
            load_all(&self.store, ctx, Collection::JournalEntries).await?;

        let entry = JournalEntry::from_new(
            JournalEntryId::new(),
            PostingService::depreciation_entry(
                &accounts,
                &entries,
                &asset,
                on,
                self.config.allow_repeat_depreciation,
            )?,
            true,
        );

        let mut batch = WriteBatch::new();
        stage_entry(&mut batch, &entry)?;
        self.store.commit(ctx, batch).await?;

        info!(
            tenant_id = %ctx.tenant_id,
            asset_id = %id,
            entry_id = %entry.id,
            amount = %entry.total(),
            "Depreciation posted"
        );
        Ok(entry)
    }

    async fn find(&self, ctx: &TenantContext, id: AssetId) -> Result<FixedAsset, AssetError> {
        self.store
            .get(ctx, Collection::Assets, &id.to_string())
            .await?
            .as_ref()
            .map(Document::decode::<FixedAsset>)
            .transpose()?
            .ok_or(AssetError::AssetNotFound(id))
    }
}

fn validate(asset: &FixedAsset) -> Result<(), AssetError> {
    if asset.name.is_empty() {
        return Err(AssetError::InvalidAsset("name is required"));
    }
    if asset.purchase_price < Decimal::ZERO {
        return Err(AssetError::InvalidAsset("purchase price cannot be negative"));
    }
    if asset.depreciation_rate < Decimal::ZERO {
        return Err(AssetError::InvalidAsset("depreciation rate cannot be negative"));
    }
    if !within_limit(asset.purchase_price) {
        return Err(AssetError::InvalidAsset("purchase price exceeds the allowed maximum"));
    }
    if !asset.annual_depreciation().is_some_and(within_limit) {
        return Err(AssetError::InvalidAsset("annual depreciation exceeds the allowed maximum"));
    }
    Ok(())
}
