//! Fixed asset register.

use chrono::NaiveDate;
use mizan_shared::types::AssetId;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fixed asset lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// In use; may be depreciated.
    #[default]
    Active,
    /// Sold or written off.
    Disposed,
}

/// A fixed asset, stored in the `assets` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedAsset {
    /// Store-assigned identifier.
    pub id: AssetId,
    /// Name.
    pub name: String,
    /// Acquisition cost.
    pub purchase_price: Decimal,
    /// Annual depreciation rate in percent.
    pub depreciation_rate: Decimal,
    /// Useful life in years.
    pub useful_life: u32,
    /// Acquisition date.
    pub purchase_date: NaiveDate,
    /// Lifecycle status.
    #[serde(default)]
    pub status: AssetStatus,
}

impl FixedAsset {
    /// Straight-line annual charge: price × rate / 100, rounded to cents
    /// with banker's rounding.
    ///
    /// Returns `None` when the product leaves the `Decimal` range.
    #[must_use]
    pub fn annual_depreciation(&self) -> Option<Decimal> {
        self.purchase_price
            .checked_mul(self.depreciation_rate)?
            .checked_div(Decimal::ONE_HUNDRED)
            .map(|charge| charge.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
    }
}

/// Input for registering a fixed asset.
#[derive(Debug, Clone)]
pub struct NewFixedAsset {
    /// Name.
    pub name: String,
    /// Acquisition cost.
    pub purchase_price: Decimal,
    /// Annual depreciation rate in percent.
    pub depreciation_rate: Decimal,
    /// Useful life in years.
    pub useful_life: u32,
    /// Acquisition date.
    pub purchase_date: NaiveDate,
}
