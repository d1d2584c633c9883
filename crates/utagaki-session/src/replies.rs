//! Replies attached to verses.

use tracing::debug;
use utagaki_types::{Participant, ParticipantId, Reply, ReplyId, Timestamp, VerseId};

use crate::error::{Result, SessionError};
use crate::validation::require_content;
use crate::verses::VerseLedger;

/// Ledger of replies in the order they were written, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ReplyLedger {
    replies: Vec<Reply>,
}

impl ReplyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore(replies: Vec<Reply>) -> Self {
        Self { replies }
    }

    /// Answer the verse `verse_id`.
    ///
    /// The verse must exist in `verses`. Authors may answer their own verses.
    pub fn add_reply(
        &mut self,
        verses: &VerseLedger,
        verse_id: &VerseId,
        content: &str,
        author: &Participant,
    ) -> Result<Reply> {
        if !verses.contains(verse_id) {
            return Err(SessionError::not_found("verse", verse_id));
        }
        let content = require_content("content", content)?;

        let reply = Reply {
            id: ReplyId::new(),
            verse_id: *verse_id,
            content,
            author: author.clone(),
            created_at: Timestamp::now(),
        };
        self.replies.push(reply.clone());
        debug!(reply = %reply.id, verse = %verse_id, author = %author.id, "reply added");
        Ok(reply)
    }

    /// Replies to `verse_id`, oldest first.
    pub fn replies_for_verse(&self, verse_id: &VerseId) -> Vec<Reply> {
        self.replies
            .iter()
            .filter(|r| &r.verse_id == verse_id)
            .cloned()
            .collect()
    }

    /// Replies written by `author_id`, oldest first.
    pub fn replies_by_author(&self, author_id: &ParticipantId) -> Vec<Reply> {
        self.replies
            .iter()
            .filter(|r| &r.author.id == author_id)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &ReplyId) -> Option<&Reply> {
        self.replies.iter().find(|r| &r.id == id)
    }

    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use utagaki_types::Gender;

    use super::*;

    fn setup() -> (VerseLedger, VerseId, Participant, Participant) {
        let alice = Participant::new("Alice", Gender::Female);
        let bob = Participant::new("Bob", Gender::Male);
        let mut verses = VerseLedger::new();
        let verse = verses.add_verse("haru sugite", &alice, Some("ume")).unwrap();
        (verses, verse.id, alice, bob)
    }

    #[test]
    fn replies_keep_chronological_order() {
        let (verses, verse_id, alice, bob) = setup();
        let mut replies = ReplyLedger::new();
        let r1 = replies.add_reply(&verses, &verse_id, "first", &bob).unwrap();
        let r2 = replies.add_reply(&verses, &verse_id, "second", &alice).unwrap();
        let r3 = replies.add_reply(&verses, &verse_id, "third", &bob).unwrap();

        let ids: Vec<_> = replies.replies_for_verse(&verse_id).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![r1.id, r2.id, r3.id]);
    }

    #[test]
    fn replies_for_verse_only_returns_that_verse() {
        let (mut verses, verse_id, alice, bob) = setup();
        let other = verses.add_verse("other", &alice, None).unwrap();
        let mut replies = ReplyLedger::new();
        replies.add_reply(&verses, &verse_id, "to first", &bob).unwrap();
        replies.add_reply(&verses, &other.id, "to other", &bob).unwrap();

        let for_other = replies.replies_for_verse(&other.id);
        assert_eq!(for_other.len(), 1);
        assert_eq!(for_other[0].content, "to other");
    }

    #[test]
    fn unknown_verse_is_not_found() {
        let (verses, _, _, bob) = setup();
        let mut replies = ReplyLedger::new();
        let err = replies
            .add_reply(&verses, &VerseId::new(), "lost", &bob)
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(replies.is_empty());
    }

    #[test]
    fn blank_content_is_rejected() {
        let (verses, verse_id, _, bob) = setup();
        let mut replies = ReplyLedger::new();
        let err = replies.add_reply(&verses, &verse_id, "\n", &bob).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn content_is_stored_as_written() {
        let (verses, verse_id, _, bob) = setup();
        let mut replies = ReplyLedger::new();
        let reply = replies.add_reply(&verses, &verse_id, " natsu kinikerashi ", &bob).unwrap();
        assert_eq!(reply.content, " natsu kinikerashi ");
    }

    #[test]
    fn self_reply_is_allowed() {
        let (verses, verse_id, alice, _) = setup();
        let mut replies = ReplyLedger::new();
        let reply = replies.add_reply(&verses, &verse_id, "my own", &alice).unwrap();
        assert_eq!(reply.author.id, alice.id);
    }

    #[test]
    fn replies_by_author() {
        let (verses, verse_id, alice, bob) = setup();
        let mut replies = ReplyLedger::new();
        replies.add_reply(&verses, &verse_id, "b1", &bob).unwrap();
        replies.add_reply(&verses, &verse_id, "a1", &alice).unwrap();
        replies.add_reply(&verses, &verse_id, "b2", &bob).unwrap();

        let bobs: Vec<_> = replies
            .replies_by_author(&bob.id)
            .into_iter()
            .map(|r| r.content)
            .collect();
        assert_eq!(bobs, vec!["b1", "b2"]);
    }
}
