//! Tenant-scoped document store.
//!
//! Every collection lives under one tenant. Records are JSON objects keyed
//! by a string id; the store never interprets them beyond equality filters.
//!
//! - [`DocumentStore`] is the seam repositories write against
//! - [`MemoryStore`] is the in-process implementation
//! - [`WriteBatch`] groups writes that must land together
//! - [`Subscription`] streams collection snapshots until dropped

mod batch;
mod error;
mod memory;
mod subscription;

pub use batch::{BatchOp, WriteBatch};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use subscription::{ListenerGuard, ListenerRegistry, Subscription};

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use mizan_shared::TenantContext;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Named collections under a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    /// Chart of accounts.
    Accounts,
    /// Journal entries.
    JournalEntries,
    /// Expense records.
    Expenses,
    /// Custody receipts and settlements.
    Custody,
    /// Fixed assets.
    Assets,
    /// Customers.
    Customers,
    /// Sales invoices.
    SalesInvoices,
    /// Receipt vouchers.
    ReceiptVouchers,
    /// Employees.
    Employees,
    /// Employee rewards.
    Rewards,
    /// Employee penalties.
    Penalties,
    /// Payroll runs.
    Payrolls,
    /// One marker per payroll period; create-only.
    PayrollPeriods,
    /// Marker written with the default chart; create-only.
    ChartSeed,
}

impl Collection {
    /// Wire name of the collection.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::JournalEntries => "journalEntries",
            Self::Expenses => "expenses",
            Self::Custody => "custody",
            Self::Assets => "assets",
            Self::Customers => "customers",
            Self::SalesInvoices => "salesInvoices",
            Self::ReceiptVouchers => "receiptVouchers",
            Self::Employees => "employees",
            Self::Rewards => "rewards",
            Self::Penalties => "penalties",
            Self::Payrolls => "payrolls",
            Self::PayrollPeriods => "payrollPeriods",
            Self::ChartSeed => "chartSeed",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stored record: its id plus the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store-assigned id.
    pub id: String,
    /// Record body.
    pub data: Map<String, Value>,
}

impl Document {
    /// Decodes the body into `T`, with the document id injected as `id`.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let mut data = self.data.clone();
        data.insert("id".to_string(), Value::String(self.id.clone()));
        Ok(serde_json::from_value(Value::Object(data))?)
    }
}

/// A point-in-time copy of one collection.
pub type Snapshot = Arc<Vec<Document>>;

/// Shared handle to a store implementation.
pub type SharedStore = Arc<dyn DocumentStore>;

/// Encodes a record as a document body.
///
/// The `id` field is dropped; it lives on the document itself.
///
/// # Errors
///
/// Returns `Serialization` if `value` does not encode to a JSON object.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(map)
        }
        other => Err(StoreError::Serialization(serde::ser::Error::custom(
            format!("expected a JSON object, got {other}"),
        ))),
    }
}

/// Decodes every document, failing on the first malformed one.
///
/// # Errors
///
/// Returns `Serialization` for the first document that does not match `T`.
pub fn decode_all<T: DeserializeOwned>(docs: &[Document]) -> Result<Vec<T>, StoreError> {
    docs.iter().map(Document::decode).collect()
}

/// Tenant-scoped document storage.
///
/// Single-document writes are atomic. Multi-document writes go through
/// [`commit`](Self::commit), which applies a [`WriteBatch`] all-or-nothing.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores `data` under a fresh id and returns the id.
    async fn create(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        data: Map<String, Value>,
    ) -> Result<String, StoreError>;

    /// Creates or replaces the document at `id`.
    async fn set(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        id: &str,
        data: Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Merges `fields` into an existing document.
    async fn update(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Fetches one document.
    async fn get(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StoreError>;

    /// Fetches every document in insertion order.
    async fn list(
        &self,
        ctx: &TenantContext,
        collection: Collection,
    ) -> Result<Vec<Document>, StoreError>;

    /// Fetches documents whose `field` equals `value`.
    async fn query_eq(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;

    /// Opens a change stream over one collection.
    async fn subscribe(
        &self,
        ctx: &TenantContext,
        collection: Collection,
    ) -> Result<Subscription, StoreError>;

    /// Applies every write in `batch`, or none.
    async fn commit(&self, ctx: &TenantContext, batch: WriteBatch) -> Result<(), StoreError>;
}
