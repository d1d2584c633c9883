use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::ParticipantId;
use crate::temporal::Timestamp;

/// Gender tag chosen at registration.
///
/// The tag only drives presentation (which side of the exchange a participant
/// usually plays); the store attaches no rules to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Tag A: usually posts verses.
    Female,
    /// Tag B: usually answers with replies.
    Male,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Female => write!(f, "female"),
            Self::Male => write!(f, "male"),
        }
    }
}

impl FromStr for Gender {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" | "a" => Ok(Self::Female),
            "male" | "b" => Ok(Self::Male),
            other => Err(TypeError::UnknownGender(other.to_string())),
        }
    }
}

/// A registered member of the local roster.
///
/// Participants are immutable once registered. Verses and replies embed a
/// full copy of their author taken at creation time, so the record that a
/// verse carries is frozen even if the roster entry were ever replaced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    #[serde(rename = "name")]
    pub display_name: String,
    pub gender: Gender,
    pub created_at: Timestamp,
}

impl Participant {
    /// Build a participant with a fresh id stamped with the current time.
    pub fn new(display_name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: ParticipantId::new(),
            display_name: display_name.into(),
            gender,
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parses_tags_and_names() {
        assert_eq!("A".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("b".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" Male ".parse::<Gender>().unwrap(), Gender::Male);
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn participant_uses_snapshot_field_names() {
        let p = Participant {
            id: ParticipantId::from_uuid(uuid::Uuid::nil()),
            display_name: "Alice".into(),
            gender: Gender::Female,
            created_at: Timestamp::from_millis(42),
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["name"], "Alice");
        assert_eq!(json["gender"], "female");
        assert_eq!(json["createdAt"], 42);
    }

    #[test]
    fn new_participants_get_distinct_ids() {
        let a = Participant::new("Alice", Gender::Female);
        let b = Participant::new("Alice", Gender::Female);
        assert_ne!(a.id, b.id);
    }
}
