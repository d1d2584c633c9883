use serde::{Deserialize, Serialize};

use crate::id::{ReplyId, VerseId};
use crate::participant::Participant;
use crate::temporal::Timestamp;

/// A lower verse answering a specific [`Verse`](crate::Verse).
///
/// Replies are immutable. Nothing stops an author from answering their own
/// verse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: ReplyId,
    pub verse_id: VerseId,
    pub content: String,
    /// Copy of the author's roster entry at reply time.
    pub author: Participant,
    #[serde(rename = "timestamp")]
    pub created_at: Timestamp,
}
