//! Binding replies to verses.
//!
//! A match is created when a verse's author picks one of its replies. Two
//! participants can be matched with each other at most once: whichever verse
//! and reply they exchange later, [`MatchingEngine::create_match`] hands back
//! the match they already share.

use tracing::debug;
use utagaki_types::{Match, MatchId, Participant, ParticipantId, Reply, ReplyId, Verse, VerseId};

use crate::error::{Result, SessionError};
use crate::replies::ReplyLedger;
use crate::verses::VerseLedger;

/// Result of [`MatchingEngine::create_match`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    pub match_id: MatchId,
    /// `false` when an existing match was returned instead of a new one.
    pub created: bool,
}

/// Unordered pair of participant ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AuthorPair(ParticipantId, ParticipantId);

impl AuthorPair {
    pub fn new(a: ParticipantId, b: ParticipantId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        &self.0 == id || &self.1 == id
    }
}

/// A match together with the verse and reply it binds, as seen by one
/// participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchView {
    pub record: Match,
    pub verse: Verse,
    pub reply: Reply,
    /// The other side of the match. `None` when the viewer is not part of it.
    pub partner: Option<Participant>,
}

/// Ledger of matches, oldest first.
#[derive(Clone, Debug, Default)]
pub struct MatchingEngine {
    matches: Vec<Match>,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore(matches: Vec<Match>) -> Self {
        Self { matches }
    }

    /// Bind `reply_id` to `verse_id`.
    ///
    /// 1. Both ids must resolve, otherwise [`SessionError::NotFound`].
    /// 2. A match for this exact verse and reply is returned as is.
    /// 3. A match between the same two authors, in either role, is returned
    ///    as is.
    /// 4. Otherwise a new match is appended and the verse becomes matched.
    ///
    /// The verse status only changes when a new match is created.
    pub fn create_match(
        &mut self,
        verses: &mut VerseLedger,
        replies: &ReplyLedger,
        verse_id: &VerseId,
        reply_id: &ReplyId,
    ) -> Result<MatchOutcome> {
        let verse = verses
            .get(verse_id)
            .ok_or_else(|| SessionError::not_found("verse", verse_id))?;
        let reply = replies
            .get(reply_id)
            .ok_or_else(|| SessionError::not_found("reply", reply_id))?;

        if let Some(existing) = self.matches.iter().find(|m| m.binds(verse_id, reply_id)) {
            return Ok(MatchOutcome {
                match_id: existing.id,
                created: false,
            });
        }

        let pair = AuthorPair::new(verse.author.id, reply.author.id);
        if let Some(existing) = self
            .matches
            .iter()
            .find(|m| Self::author_pair(&*verses, replies, m) == Some(pair))
        {
            debug!(
                existing = %existing.id,
                verse = %verse_id,
                reply = %reply_id,
                "participants already matched"
            );
            return Ok(MatchOutcome {
                match_id: existing.id,
                created: false,
            });
        }

        let record = Match::bind(*verse_id, *reply_id);
        let match_id = record.id;
        self.matches.push(record);
        verses.mark_matched(verse_id);
        debug!(match_id = %match_id, verse = %verse_id, reply = %reply_id, "match created");

        Ok(MatchOutcome {
            match_id,
            created: true,
        })
    }

    /// The authors bound by `record`, if its verse and reply still resolve.
    pub fn author_pair(
        verses: &VerseLedger,
        replies: &ReplyLedger,
        record: &Match,
    ) -> Option<AuthorPair> {
        let verse = verses.get(&record.verse_id)?;
        let reply = replies.get(&record.reply_id)?;
        Some(AuthorPair::new(verse.author.id, reply.author.id))
    }

    pub fn get(&self, id: &MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| &m.id == id)
    }

    pub fn contains(&self, id: &MatchId) -> bool {
        self.get(id).is_some()
    }

    /// The match a reply was bound into, if any.
    pub fn match_for_reply(&self, reply_id: &ReplyId) -> Option<&Match> {
        self.matches.iter().find(|m| &m.reply_id == reply_id)
    }

    /// Matches in which `participant` wrote either the verse or the reply.
    pub fn matches_for_participant(
        &self,
        verses: &VerseLedger,
        replies: &ReplyLedger,
        participant: &ParticipantId,
    ) -> Vec<Match> {
        self.matches
            .iter()
            .filter(|m| {
                Self::author_pair(verses, replies, m)
                    .map(|pair| pair.contains(participant))
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    /// Resolve a match for display to `viewer`.
    pub fn match_view(
        &self,
        verses: &VerseLedger,
        replies: &ReplyLedger,
        match_id: &MatchId,
        viewer: &ParticipantId,
    ) -> Result<MatchView> {
        let record = self
            .get(match_id)
            .ok_or_else(|| SessionError::not_found("match", match_id))?;
        let verse = verses
            .get(&record.verse_id)
            .ok_or_else(|| SessionError::not_found("verse", record.verse_id))?;
        let reply = replies
            .get(&record.reply_id)
            .ok_or_else(|| SessionError::not_found("reply", record.reply_id))?;

        let partner = if &verse.author.id == viewer {
            Some(reply.author.clone())
        } else if &reply.author.id == viewer {
            Some(verse.author.clone())
        } else {
            None
        };

        Ok(MatchView {
            record: record.clone(),
            verse: verse.clone(),
            reply: reply.clone(),
            partner,
        })
    }

    /// Every match, oldest first.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
