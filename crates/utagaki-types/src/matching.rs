use serde::{Deserialize, Serialize};

use crate::id::{MatchId, ReplyId, VerseId};
use crate::temporal::Timestamp;

/// A bound pairing between one verse and one reply.
///
/// A match only references its verse and reply by id. It is never mutated or
/// deleted once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub verse_id: VerseId,
    pub reply_id: ReplyId,
    #[serde(rename = "timestamp")]
    pub created_at: Timestamp,
}

impl Match {
    /// Bind `verse_id` and `reply_id` under a fresh id stamped now.
    pub fn bind(verse_id: VerseId, reply_id: ReplyId) -> Self {
        Self {
            id: MatchId::new(),
            verse_id,
            reply_id,
            created_at: Timestamp::now(),
        }
    }

    /// Whether this match binds exactly the given verse and reply.
    pub fn binds(&self, verse_id: &VerseId, reply_id: &ReplyId) -> bool {
        &self.verse_id == verse_id && &self.reply_id == reply_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_checks_both_sides() {
        let verse = VerseId::new();
        let reply = ReplyId::new();
        let m = Match::bind(verse, reply);
        assert!(m.binds(&verse, &reply));
        assert!(!m.binds(&verse, &ReplyId::new()));
        assert!(!m.binds(&VerseId::new(), &reply));
    }
}
