//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `UserId` where a
//! `TaskId` is expected. Entity IDs mirror the remote REST API, which
//! hands out integer identifiers; billing records are created locally
//! and carry a time-ordered UUID instead.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed wrappers over the API's integer IDs.
macro_rules! entity_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wraps a raw identifier from the remote API.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the inner identifier.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            /// Parses an ID, trimming surrounding whitespace. API payloads
            /// occasionally carry IDs as padded strings; normalization
            /// happens here, once, at the boundary.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

entity_id!(UserId, "Unique identifier for a user account.");
entity_id!(TaskId, "Unique identifier for a task.");
entity_id!(ProjectId, "Unique identifier for a project.");
entity_id!(PlanId, "Unique identifier for a company pricing plan.");
entity_id!(
    PricingRuleId,
    "Unique identifier for a company operation pricing rule."
);

/// Unique identifier for a billing record.
///
/// Billing records are minted by this crate rather than the remote API,
/// so they use locally generated time-ordered UUIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillingRecordId(pub Uuid);

impl BillingRecordId {
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

impl Default for BillingRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BillingRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BillingRecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_entity_id_roundtrip() {
        let id = UserId::new(42);
        assert_eq!(id.into_inner(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(UserId::from_str("42").unwrap(), id);
    }

    #[test]
    fn test_entity_id_parse_trims() {
        assert_eq!(UserId::from_str(" 42 ").unwrap(), UserId::new(42));
        assert_eq!(TaskId::from_str("7\n").unwrap(), TaskId::new(7));
        assert!(UserId::from_str("not-a-number").is_err());
    }

    #[test]
    fn test_entity_ids_are_distinct_types() {
        // Compile-time guarantee; this just documents the intent.
        let user = UserId::new(1);
        let task = TaskId::new(1);
        assert_eq!(user.into_inner(), task.into_inner());
    }

    #[test]
    fn test_billing_record_id_unique() {
        let a = BillingRecordId::new();
        let b = BillingRecordId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_billing_record_id_roundtrip() {
        let id = BillingRecordId::new();
        let parsed = BillingRecordId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }
}
