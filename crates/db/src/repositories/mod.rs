//! Repository abstractions for data access.
//!
//! Repositories load what the pure core needs from the document store,
//! call into `mizan-core`, and write the results back. A record and the
//! journal entry it produces are always committed in one batch.

pub mod account;
pub mod asset;
pub mod custody;
pub mod expense;
pub mod hr;
pub mod journal;
pub mod payroll;
pub mod sales;

pub use account::{AccountError, AccountRepository, UpdateAccountInput};
pub use asset::{AssetError, AssetRepository, UpdateAssetInput};
pub use custody::{CustodyError, CustodyRepository};
pub use expense::{ExpenseError, ExpenseRepository};
pub use hr::{CreateEmployeeInput, CreatePenaltyInput, CreateRewardInput, HrError, HrRepository};
pub use journal::{JournalError, JournalRepository};
pub use payroll::{PayrollRepository, PayrollRunError};
pub use sales::{SalesError, SalesRepository};

use mizan_shared::TenantContext;
use serde::de::DeserializeOwned;

use crate::store::{Collection, SharedStore, StoreError, decode_all};

/// Reads and decodes a whole collection.
pub(crate) async fn load_all<T: DeserializeOwned>(
    store: &SharedStore,
    ctx: &TenantContext,
    collection: Collection,
) -> Result<Vec<T>, StoreError> {
    let docs = store.list(ctx, collection).await?;
    decode_all(&docs)
}
