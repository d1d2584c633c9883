use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::VerseId;
use crate::participant::Participant;
use crate::temporal::Timestamp;

/// Cosmetic style tag attached to a verse.
///
/// The canonical set is the pine/bamboo/plum trio plus moon and water. Older
/// snapshots carry paper-themed names; [`VerseVariant::normalize`] folds them
/// onto the canonical set, and deserialization goes through the same path so
/// legacy data is upgraded on load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerseVariant {
    #[default]
    Matsu,
    Take,
    Ume,
    Tsuki,
    Mizu,
}

impl VerseVariant {
    /// All canonical variants, in display order.
    pub const ALL: [VerseVariant; 5] = [
        VerseVariant::Matsu,
        VerseVariant::Take,
        VerseVariant::Ume,
        VerseVariant::Tsuki,
        VerseVariant::Mizu,
    ];

    /// Map any input, canonical or legacy, to a canonical variant.
    ///
    /// | input | canonical |
    /// |---|---|
    /// | matsu, take, ume, tsuki, mizu | itself |
    /// | shoji, washi, kinari | matsu |
    /// | sakura | ume |
    /// | momiji, kusa | take |
    /// | anything else / missing | matsu |
    pub fn normalize(value: Option<&str>) -> Self {
        match value.unwrap_or_default() {
            "matsu" => Self::Matsu,
            "take" => Self::Take,
            "ume" => Self::Ume,
            "tsuki" => Self::Tsuki,
            "mizu" => Self::Mizu,
            "shoji" | "washi" | "kinari" => Self::Matsu,
            "sakura" => Self::Ume,
            "momiji" | "kusa" => Self::Take,
            _ => Self::Matsu,
        }
    }

    /// The canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matsu => "matsu",
            Self::Take => "take",
            Self::Ume => "ume",
            Self::Tsuki => "tsuki",
            Self::Mizu => "mizu",
        }
    }
}

impl From<String> for VerseVariant {
    fn from(value: String) -> Self {
        Self::normalize(Some(&value))
    }
}

impl From<VerseVariant> for String {
    fn from(value: VerseVariant) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for VerseVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a verse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerseStatus {
    /// Accepting replies; no match bound yet.
    #[default]
    Open,
    /// A match was created from this verse.
    Matched,
    /// Terminal state reserved for expiry. Nothing sets it.
    Expired,
}

impl fmt::Display for VerseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Matched => write!(f, "matched"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

/// A posted upper verse inviting replies.
///
/// Only `status` ever changes after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub id: VerseId,
    pub content: String,
    /// Copy of the author's roster entry at posting time.
    pub author: Participant,
    #[serde(rename = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default)]
    pub variant: VerseVariant,
    #[serde(default)]
    pub status: VerseStatus,
}

impl Verse {
    /// Whether a match has been bound from this verse.
    pub fn is_matched(&self) -> bool {
        self.status == VerseStatus::Matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::Gender;

    #[test]
    fn canonical_names_map_to_themselves() {
        for variant in VerseVariant::ALL {
            assert_eq!(VerseVariant::normalize(Some(variant.as_str())), variant);
        }
    }

    #[test]
    fn legacy_aliases() {
        assert_eq!(VerseVariant::normalize(Some("shoji")), VerseVariant::Matsu);
        assert_eq!(VerseVariant::normalize(Some("washi")), VerseVariant::Matsu);
        assert_eq!(VerseVariant::normalize(Some("kinari")), VerseVariant::Matsu);
        assert_eq!(VerseVariant::normalize(Some("sakura")), VerseVariant::Ume);
        assert_eq!(VerseVariant::normalize(Some("momiji")), VerseVariant::Take);
        assert_eq!(VerseVariant::normalize(Some("kusa")), VerseVariant::Take);
    }

    #[test]
    fn unknown_and_missing_fall_back_to_matsu() {
        assert_eq!(VerseVariant::normalize(Some("unknown-value")), VerseVariant::Matsu);
        assert_eq!(VerseVariant::normalize(Some("")), VerseVariant::Matsu);
        assert_eq!(VerseVariant::normalize(Some("Ume")), VerseVariant::Matsu);
        assert_eq!(VerseVariant::normalize(None), VerseVariant::Matsu);
    }

    #[test]
    fn legacy_variant_is_upgraded_on_deserialize() {
        let author = Participant::new("Alice", Gender::Female);
        let verse = Verse {
            id: VerseId::new(),
            content: "haru sugite".into(),
            author,
            created_at: Timestamp::from_millis(1),
            variant: VerseVariant::Matsu,
            status: VerseStatus::Open,
        };
        let mut json = serde_json::to_value(&verse).unwrap();
        json["variant"] = "sakura".into();
        let parsed: Verse = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(parsed.variant, VerseVariant::Ume);

        json.as_object_mut().unwrap().remove("variant");
        let parsed: Verse = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.variant, VerseVariant::Matsu);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&VerseStatus::Matched).unwrap(), "\"matched\"");
        assert_eq!(serde_json::to_string(&VerseStatus::Expired).unwrap(), "\"expired\"");
    }

    proptest::proptest! {
        #[test]
        fn normalize_is_a_fixed_point(input in ".*") {
            let once = VerseVariant::normalize(Some(&input));
            let twice = VerseVariant::normalize(Some(once.as_str()));
            proptest::prop_assert_eq!(once, twice);
        }
    }
}
