//! Shared fixtures for store-backed tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mizan_core::chart::Account;
use mizan_db::store::{Document, Subscription};
use mizan_db::{
    Collection, DocumentStore, MemoryStore, Repositories, SharedStore, StoreError, WriteBatch,
};
use mizan_shared::types::TenantId;
use mizan_shared::{LedgerConfig, TenantContext};
use serde_json::{Map, Value};

pub struct Harness {
    pub memory: Arc<MemoryStore>,
    pub store: SharedStore,
    pub ctx: TenantContext,
    pub repos: Repositories,
}

pub fn harness() -> Harness {
    harness_with(&LedgerConfig::default())
}

pub fn harness_with(config: &LedgerConfig) -> Harness {
    let memory = Arc::new(MemoryStore::new());
    let store: SharedStore = memory.clone();
    let repos = Repositories::new(&store, config);
    Harness {
        memory,
        store,
        ctx: TenantContext::new(TenantId::new()),
        repos,
    }
}

/// A harness whose reads yield to the scheduler first, like a networked
/// store would, so concurrent callers interleave between read and commit.
pub fn yielding_harness() -> Harness {
    let memory = Arc::new(MemoryStore::new());
    let store: SharedStore = Arc::new(YieldingStore {
        inner: memory.clone(),
    });
    let repos = Repositories::new(&store, &LedgerConfig::default());
    Harness {
        memory,
        store,
        ctx: TenantContext::new(TenantId::new()),
        repos,
    }
}

pub struct YieldingStore {
    inner: Arc<MemoryStore>,
}

#[async_trait]
impl DocumentStore for YieldingStore {
    async fn create(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        data: Map<String, Value>,
    ) -> Result<String, StoreError> {
        self.inner.create(ctx, collection, data).await
    }

    async fn set(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        id: &str,
        data: Map<String, Value>,
    ) -> Result<(), StoreError> {
        self.inner.set(ctx, collection, id, data).await
    }

    async fn update(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        self.inner.update(ctx, collection, id, fields).await
    }

    async fn get(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        tokio::task::yield_now().await;
        self.inner.get(ctx, collection, id).await
    }

    async fn list(
        &self,
        ctx: &TenantContext,
        collection: Collection,
    ) -> Result<Vec<Document>, StoreError> {
        tokio::task::yield_now().await;
        self.inner.list(ctx, collection).await
    }

    async fn query_eq(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        tokio::task::yield_now().await;
        self.inner.query_eq(ctx, collection, field, value).await
    }

    async fn subscribe(
        &self,
        ctx: &TenantContext,
        collection: Collection,
    ) -> Result<Subscription, StoreError> {
        self.inner.subscribe(ctx, collection).await
    }

    async fn commit(&self, ctx: &TenantContext, batch: WriteBatch) -> Result<(), StoreError> {
        self.inner.commit(ctx, batch).await
    }
}

/// A harness whose tenant already has the default chart.
pub async fn seeded() -> (Harness, Vec<Account>) {
    let h = harness();
    let chart = h.repos.accounts.seed_default_chart(&h.ctx).await.unwrap();
    (h, chart)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn by_code<'a>(accounts: &'a [Account], code: &str) -> &'a Account {
    accounts
        .iter()
        .find(|a| a.code == code)
        .unwrap_or_else(|| panic!("no account {code}"))
}
