//! Atomic multi-document writes.

use serde_json::{Map, Value};

use super::Collection;

/// One write inside a batch.
#[derive(Debug, Clone)]
pub enum BatchOp {
    /// Create or replace the document at `id`.
    Set {
        /// Target collection.
        collection: Collection,
        /// Document id.
        id: String,
        /// Full document body.
        data: Map<String, Value>,
    },
    /// Create the document at `id`; fails the whole batch if it exists.
    Create {
        /// Target collection.
        collection: Collection,
        /// Document id.
        id: String,
        /// Full document body.
        data: Map<String, Value>,
    },
    /// Merge fields into an existing document; fails the batch if missing.
    Update {
        /// Target collection.
        collection: Collection,
        /// Document id.
        id: String,
        /// Fields to overwrite.
        fields: Map<String, Value>,
    },
}

impl BatchOp {
    /// The collection this op writes to.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        match self {
            Self::Set { collection, .. }
            | Self::Create { collection, .. }
            | Self::Update { collection, .. } => *collection,
        }
    }
}

/// A set of writes applied all-or-nothing.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

impl WriteBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a create-or-replace write.
    pub fn set(&mut self, collection: Collection, id: impl Into<String>, data: Map<String, Value>) -> &mut Self {
        self.ops.push(BatchOp::Set {
            collection,
            id: id.into(),
            data,
        });
        self
    }

    /// Adds a create-only write.
    pub fn create(
        &mut self,
        collection: Collection,
        id: impl Into<String>,
        data: Map<String, Value>,
    ) -> &mut Self {
        self.ops.push(BatchOp::Create {
            collection,
            id: id.into(),
            data,
        });
        self
    }

    /// Adds a field update.
    pub fn update(
        &mut self,
        collection: Collection,
        id: impl Into<String>,
        fields: Map<String, Value>,
    ) -> &mut Self {
        self.ops.push(BatchOp::Update {
            collection,
            id: id.into(),
            fields,
        });
        self
    }

    /// Number of writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if the batch has no writes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Consumes the batch.
    #[must_use]
    pub fn into_ops(self) -> Vec<BatchOp> {
        self.ops
    }
}
