//! Explicit tenant context.
//!
//! Every store operation is scoped to one company workspace. The context is
//! passed by reference into each repository call instead of living in global state.

use serde::{Deserialize, Serialize};

use crate::types::{TenantId, UserId};

/// The tenant (and optionally the acting member) an operation runs for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    /// The company workspace all collections are scoped to.
    pub tenant_id: TenantId,
    /// The member performing the operation, when known.
    pub actor: Option<UserId>,
}

impl TenantContext {
    /// Creates a context for a tenant with no known actor.
    #[must_use]
    pub const fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            actor: None,
        }
    }

    /// Attaches the acting member.
    #[must_use]
    pub const fn with_actor(mut self, actor: UserId) -> Self {
        self.actor = Some(actor);
        self
    }
}
