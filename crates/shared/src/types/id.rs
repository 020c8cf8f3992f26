//! Typed IDs for type-safe document references.
//!
//! Using typed IDs prevents accidentally passing an `EmployeeId` where an `AccountId` is expected.
//! On the wire every ID is the plain UUID string the document store assigned.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(TenantId, "Unique identifier for a tenant (company workspace).");
typed_id!(UserId, "Unique identifier for a workspace member.");
typed_id!(AccountId, "Unique identifier for a chart of accounts entry.");
typed_id!(JournalEntryId, "Unique identifier for a journal entry.");
typed_id!(ExpenseId, "Unique identifier for an expense record.");
typed_id!(CustodyMovementId, "Unique identifier for a custody movement.");
typed_id!(AssetId, "Unique identifier for a fixed asset.");
typed_id!(CustomerId, "Unique identifier for a customer.");
typed_id!(SalesInvoiceId, "Unique identifier for a sales invoice.");
typed_id!(ReceiptVoucherId, "Unique identifier for a receipt voucher.");
typed_id!(EmployeeId, "Unique identifier for an employee.");
typed_id!(PayrollId, "Unique identifier for a payroll run.");
typed_id!(RewardId, "Unique identifier for an employee reward.");
typed_id!(PenaltyId, "Unique identifier for an employee penalty.");
