//! Opaque identifiers for every Utagaki entity.
//!
//! Each entity kind gets its own newtype over a UUID v7 so that a verse id can
//! never be passed where a match id is expected. The UUIDs are time ordered,
//! which keeps freshly minted ids sortable by creation.
//!
//! Snapshots written by older clients carry free-form string ids such as
//! `"v1"`. Those are mapped onto name-based UUIDs (v5) under
//! [`LEGACY_ID_NAMESPACE`], so every reference to the same string resolves to
//! the same id no matter which collection it appears in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TypeError;

/// Namespace for ids derived from non-UUID strings.
pub const LEGACY_ID_NAMESPACE: uuid::Uuid =
    uuid::Uuid::from_u128(0x7574_6167_616b_4900_8000_6c65_6761_6379);

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a new time-ordered identifier (UUID v7).
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// Create from an existing UUID.
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Id for a persisted string: UUIDs parse as themselves, anything
            /// else maps to a stable v5 UUID.
            pub fn from_legacy(raw: &str) -> Self {
                match uuid::Uuid::parse_str(raw) {
                    Ok(uuid) => Self(uuid),
                    Err(_) => Self(uuid::Uuid::new_v5(&LEGACY_ID_NAMESPACE, raw.as_bytes())),
                }
            }

            /// The underlying UUID.
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }

            /// Short representation (first 8 characters of the UUID).
            pub fn short_id(&self) -> String {
                self.0.to_string()[..8].to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.short_id())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok(Self::from_legacy(&raw))
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| TypeError::InvalidId {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered participant.
    ParticipantId,
    "participant"
);
entity_id!(
    /// Identifier of a posted verse.
    VerseId,
    "verse"
);
entity_id!(
    /// Identifier of a reply.
    ReplyId,
    "reply"
);
entity_id!(
    /// Identifier of a match.
    MatchId,
    "match"
);
entity_id!(
    /// Identifier of a chat message.
    MessageId,
    "message"
);
