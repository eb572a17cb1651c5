//! Typed identifiers for stored records
//!
//! Transactions, recurring templates and goals are keyed by UUIDs. On screen they
//! show as a prefix plus the first eight hex digits ("txn-1a2b3c4d"), and
//! the CLI accepts that short form wherever it takes an id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const SHORT_LEN: usize = 8;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Whether `s` (prefixed or bare, any case) is a leading piece of this id
            pub fn matches_short(&self, s: &str) -> bool {
                let s = s.trim();
                let s = s.strip_prefix(Self::PREFIX).unwrap_or(s);
                !s.is_empty() && self.0.to_string().starts_with(&s.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let full = self.0.simple().to_string();
                write!(f, "{}{}", Self::PREFIX, &full[..SHORT_LEN])
            }
        }

        /// Parses a full UUID, with or without the display prefix
        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Uuid::parse_str(s.strip_prefix(Self::PREFIX).unwrap_or(s)).map(Self)
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(RecurringId, "rec-");
define_id!(GoalId, "goal-");
