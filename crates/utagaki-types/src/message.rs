use serde::{Deserialize, Serialize};

use crate::id::{MatchId, MessageId, ParticipantId};
use crate::temporal::Timestamp;

/// A chat line exchanged inside a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub match_id: MatchId,
    pub sender_id: ParticipantId,
    pub content: String,
    #[serde(rename = "timestamp")]
    pub created_at: Timestamp,
    /// Read receipt. Declared for the wire layout; no code path flips it.
    #[serde(default)]
    pub is_read: bool,
}

impl Message {
    /// A new unread message stamped now.
    pub fn new(match_id: MatchId, sender_id: ParticipantId, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            match_id,
            sender_id,
            content: content.into(),
            created_at: Timestamp::now(),
            is_read: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_message_is_unread() {
        let msg = Message::new(MatchId::new(), ParticipantId::new(), "hello");
        assert!(!msg.is_read);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["isRead"], false);
        assert!(json.get("senderId").is_some());
    }
}
