//! In-process document store.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use mizan_shared::TenantContext;
use mizan_shared::types::TenantId;
use serde_json::{Map, Value};
use tokio::sync::{RwLock, watch};
use uuid::Uuid;

use super::{
    BatchOp, Collection, Document, DocumentStore, ListenerRegistry, Snapshot, StoreError,
    Subscription, WriteBatch,
};

type Key = (TenantId, Collection);

/// A document store held in memory.
///
/// Writes take one lock over all tenants, so every batch is applied
/// atomically and subscribers see each commit as a single snapshot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Key, Vec<Document>>>,
    channels: DashMap<Key, watch::Sender<Snapshot>>,
    listeners: ListenerRegistry,
    offline: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open subscriptions across all tenants.
    #[must_use]
    pub fn active_subscriptions(&self) -> usize {
        self.listeners.active()
    }

    /// Simulates losing the connection: every call fails until cleared.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        Ok(())
    }

    /// Sends the new snapshot to subscribers, dropping the channel once
    /// nobody listens. Runs under the write lock, so no subscribe can race
    /// the removal.
    fn publish(&self, key: Key, docs: &[Document]) {
        let idle = match self.channels.get(&key) {
            Some(sender) if sender.receiver_count() > 0 => {
                sender.send_replace(Arc::new(docs.to_vec()));
                false
            }
            Some(_) => true,
            None => false,
        };
        if idle {
            self.channels.remove_if(&key, |_, sender| sender.receiver_count() == 0);
        }
    }

    async fn apply(&self, ctx: &TenantContext, ops: Vec<BatchOp>) -> Result<(), StoreError> {
        self.ensure_online()?;
        let tenant = ctx.tenant_id;
        let mut collections = self.collections.write().await;

        let mut staged: HashMap<Collection, Vec<Document>> = HashMap::new();
        for op in ops {
            let collection = op.collection();
            let docs = staged.entry(collection).or_insert_with(|| {
                collections
                    .get(&(tenant, collection))
                    .cloned()
                    .unwrap_or_default()
            });
            apply_op(docs, op)?;
        }

        for (collection, docs) in staged {
            let key = (tenant, collection);
            self.publish(key, &docs);
            collections.insert(key, docs);
        }
        Ok(())
    }
}

fn apply_op(docs: &mut Vec<Document>, op: BatchOp) -> Result<(), StoreError> {
    match op {
        BatchOp::Set { id, data, .. } => {
            match docs.iter_mut().find(|d| d.id == id) {
                Some(doc) => doc.data = data,
                None => docs.push(Document { id, data }),
            }
            Ok(())
        }
        BatchOp::Create {
            collection,
            id,
            data,
        } => {
            if docs.iter().any(|d| d.id == id) {
                return Err(StoreError::AlreadyExists { collection, id });
            }
            docs.push(Document { id, data });
            Ok(())
        }
        BatchOp::Update {
            collection,
            id,
            fields,
        } => {
            let Some(doc) = docs.iter_mut().find(|d| d.id == id) else {
                return Err(StoreError::NotFound { collection, id });
            };
            doc.data.extend(fields);
            Ok(())
        }
    }
}

fn field_matches(doc: &Document, field: &str, value: &Value) -> bool {
    if field == "id" {
        return value.as_str() == Some(doc.id.as_str());
    }
    doc.data.get(field) == Some(value)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        data: Map<String, Value>,
    ) -> Result<String, StoreError> {
        let id = Uuid::now_v7().to_string();
        self.apply(
            ctx,
            vec![BatchOp::Create {
                collection,
                id: id.clone(),
                data,
            }],
        )
        .await?;
        Ok(id)
    }

    async fn set(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        id: &str,
        data: Map<String, Value>,
    ) -> Result<(), StoreError> {
        self.apply(
            ctx,
            vec![BatchOp::Set {
                collection,
                id: id.to_string(),
                data,
            }],
        )
        .await
    }

    async fn update(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        self.apply(
            ctx,
            vec![BatchOp::Update {
                collection,
                id: id.to_string(),
                fields,
            }],
        )
        .await
    }

    async fn get(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(&(ctx.tenant_id, collection))
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn list(
        &self,
        ctx: &TenantContext,
        collection: Collection,
    ) -> Result<Vec<Document>, StoreError> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(&(ctx.tenant_id, collection))
            .cloned()
            .unwrap_or_default())
    }

    async fn query_eq(
        &self,
        ctx: &TenantContext,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(&(ctx.tenant_id, collection))
            .map(|docs| {
                docs.iter()
                    .filter(|d| field_matches(d, field, value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn subscribe(
        &self,
        ctx: &TenantContext,
        collection: Collection,
    ) -> Result<Subscription, StoreError> {
        self.ensure_online()?;
        let key = (ctx.tenant_id, collection);
        // Held across channel creation so no commit slips between the
        // snapshot and the first receiver.
        let collections = self.collections.read().await;
        let receiver = self
            .channels
            .entry(key)
            .or_insert_with(|| {
                let current = collections.get(&key).cloned().unwrap_or_default();
                watch::channel(Arc::new(current)).0
            })
            .subscribe();
        drop(collections);

        tracing::debug!(collection = %collection, tenant_id = %ctx.tenant_id, "Subscription opened");
        Ok(Subscription::new(receiver, self.listeners.register()))
    }

    async fn commit(&self, ctx: &TenantContext, batch: WriteBatch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let writes = batch.len();
        self.apply(ctx, batch.into_ops()).await?;
        tracing::debug!(writes, tenant_id = %ctx.tenant_id, "Batch committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test bodies are objects"),
        }
    }

    fn ctx() -> TenantContext {
        TenantContext::new(TenantId::new())
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemoryStore::new();
        let ctx = ctx();
        let id = store
            .create(&ctx, Collection::Customers, body(json!({"name": "Acme"})))
            .await
            .unwrap();
        let doc = store.get(&ctx, Collection::Customers, &id).await.unwrap().unwrap();
        assert_eq!(doc.data["name"], "Acme");
    }

    #[tokio::test]
    async fn test_tenants_are_isolated() {
        let store = MemoryStore::new();
        let (a, b) = (ctx(), ctx());
        store
            .set(&a, Collection::Employees, "e1", body(json!({"name": "Sara"})))
            .await
            .unwrap();
        assert!(store.list(&b, Collection::Employees).await.unwrap().is_empty());
        assert_eq!(store.list(&a, Collection::Employees).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        let ctx = ctx();
        store
            .set(&ctx, Collection::Assets, "a1", body(json!({"name": "Van", "status": "active"})))
            .await
            .unwrap();
        store
            .update(&ctx, Collection::Assets, "a1", body(json!({"status": "disposed"})))
            .await
            .unwrap();
        let doc = store.get(&ctx, Collection::Assets, "a1").await.unwrap().unwrap();
        assert_eq!(doc.data["name"], "Van");
        assert_eq!(doc.data["status"], "disposed");
    }

    #[tokio::test]
    async fn test_update_missing_document_fails() {
        let store = MemoryStore::new();
        let result = store
            .update(&ctx(), Collection::Assets, "nope", Map::new())
            .await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_failed_batch_writes_nothing() {
        let store = MemoryStore::new();
        let ctx = ctx();
        store
            .set(&ctx, Collection::PayrollPeriods, "2024-03", Map::new())
            .await
            .unwrap();

        let mut batch = WriteBatch::new();
        batch
            .create(Collection::Payrolls, "p1", body(json!({"month": 3})))
            .create(Collection::PayrollPeriods, "2024-03", Map::new());
        let result = store.commit(&ctx, batch).await;

        assert!(matches!(result, Err(StoreError::AlreadyExists { .. })));
        assert!(store.list(&ctx, Collection::Payrolls).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_eq_filters_by_field() {
        let store = MemoryStore::new();
        let ctx = ctx();
        store
            .set(&ctx, Collection::Rewards, "r1", body(json!({"employeeId": "e1"})))
            .await
            .unwrap();
        store
            .set(&ctx, Collection::Rewards, "r2", body(json!({"employeeId": "e2"})))
            .await
            .unwrap();
        let docs = store
            .query_eq(&ctx, Collection::Rewards, "employeeId", &json!("e2"))
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "r2");
    }

    #[tokio::test]
    async fn test_offline_rejects_reads_and_writes() {
        let store = MemoryStore::new();
        let ctx = ctx();
        store.set_offline(true);
        assert!(matches!(
            store.list(&ctx, Collection::Accounts).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store
            .set(&ctx, Collection::Accounts, "x", Map::new())
            .await
            .is_err());
        store.set_offline(false);
        assert!(store.list(&ctx, Collection::Accounts).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subscription_sees_current_then_changes() {
        let store = MemoryStore::new();
        let ctx = ctx();
        store
            .set(&ctx, Collection::Accounts, "a", Map::new())
            .await
            .unwrap();

        let mut sub = store.subscribe(&ctx, Collection::Accounts).await.unwrap();
        assert_eq!(store.active_subscriptions(), 1);
        assert_eq!(sub.next().await.unwrap().len(), 1);

        store
            .set(&ctx, Collection::Accounts, "b", Map::new())
            .await
            .unwrap();
        assert_eq!(sub.next().await.unwrap().len(), 2);

        drop(sub);
        assert_eq!(store.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_idle_channel_pruned_on_next_write() {
        let store = MemoryStore::new();
        let ctx = ctx();
        let sub = store.subscribe(&ctx, Collection::Accounts).await.unwrap();
        assert_eq!(store.channels.len(), 1);

        store
            .set(&ctx, Collection::Accounts, "a", Map::new())
            .await
            .unwrap();
        assert_eq!(store.channels.len(), 1);

        drop(sub);
        store
            .set(&ctx, Collection::Accounts, "b", Map::new())
            .await
            .unwrap();
        assert!(store.channels.is_empty());

        let mut again = store.subscribe(&ctx, Collection::Accounts).await.unwrap();
        assert_eq!(again.next().await.unwrap().len(), 2);
    }
}
