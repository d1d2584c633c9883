use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};
use utagaki_snapshot::{validate_key, CollectionKey, SnapshotStore};
use utagaki_types::{
    Gender, Match, MatchId, Message, Participant, ParticipantId, Reply, ReplyId, Timestamp, Verse,
    VerseId,
};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::identity::IdentityStore;
use crate::matching::{MatchOutcome, MatchView, MatchingEngine};
use crate::messaging::MessagingLog;
use crate::replies::ReplyLedger;
use crate::verses::{sample_verses, VerseLedger};

/// The whole client state: roster, ledgers, and the active session.
///
/// Construct one per process with [`SessionStore::open`] and hand it to
/// whatever renders the state. Every mutation rewrites the affected
/// collections in the snapshot before returning. Reads return owned copies,
/// so callers cannot change stored entities in place.
///
/// All state sits behind one `RwLock`; a mutation holds the write lock for its
/// whole check-then-insert, which keeps match deduplication atomic even when
/// the store is shared between threads. Mutations are applied to a copy of the
/// state and swapped in only after the snapshot write succeeded, so a failed
/// operation leaves memory untouched and can be retried.
pub struct SessionStore<S: SnapshotStore> {
    snapshot: S,
    config: SessionConfig,
    inner: RwLock<SessionState>,
}

#[derive(Clone, Default)]
struct SessionState {
    identity: IdentityStore,
    verses: VerseLedger,
    replies: ReplyLedger,
    matching: MatchingEngine,
    messaging: MessagingLog,
}

impl<S: SnapshotStore> SessionStore<S> {
    /// Open a store over `snapshot`, rehydrating every collection from it.
    ///
    /// Missing entries start empty. If the verse entry is missing and
    /// [`SessionConfig::seed_sample_verses`] is set, the river starts with
    /// the sample verses and they are written back immediately.
    ///
    /// A `key_prefix` that yields invalid snapshot keys is rejected with
    /// [`SessionError::Config`] before anything is read.
    pub fn open(snapshot: S, config: SessionConfig) -> Result<Self> {
        let key = |k: CollectionKey| k.with_prefix(&config.key_prefix);
        for collection in CollectionKey::ALL.iter() {
            validate_key(&key(*collection))
                .map_err(|e| SessionError::Config(format!("key_prefix: {e}")))?;
        }

        let roster: Vec<Participant> = snapshot
            .get_json(&key(CollectionKey::Users))?
            .unwrap_or_default();
        // Older clients stored the session id as a bare string, not JSON.
        let current = snapshot
            .get(&key(CollectionKey::CurrentUserId))?
            .map(|raw| ParticipantId::from_legacy(raw.trim().trim_matches('"')));
        let stored_verses: Option<Vec<Verse>> = snapshot.get_json(&key(CollectionKey::Verses))?;
        let replies: Vec<Reply> = snapshot
            .get_json(&key(CollectionKey::Replies))?
            .unwrap_or_default();
        let matches: Vec<Match> = snapshot
            .get_json(&key(CollectionKey::Matches))?
            .unwrap_or_default();
        let messages: Vec<Message> = snapshot
            .get_json(&key(CollectionKey::Messages))?
            .unwrap_or_default();

        let seeded = stored_verses.is_none() && config.seed_sample_verses;
        let verses = match stored_verses {
            Some(verses) => verses,
            None if config.seed_sample_verses => sample_verses(Timestamp::now()),
            None => Vec::new(),
        };

        let state = SessionState {
            identity: IdentityStore::restore(roster, current),
            verses: VerseLedger::restore(verses),
            replies: ReplyLedger::restore(replies),
            matching: MatchingEngine::restore(matches),
            messaging: MessagingLog::restore(messages),
        };

        info!(
            participants = state.identity.participants().len(),
            verses = state.verses.len(),
            replies = state.replies.len(),
            matches = state.matching.len(),
            messages = state.messaging.len(),
            logged_in = state.identity.current_id().is_some(),
            "session store opened"
        );

        let store = Self {
            snapshot,
            config,
            inner: RwLock::new(state),
        };
        if seeded {
            let state = store.read()?;
            store.persist(&state, &[CollectionKey::Verses])?;
        }
        Ok(store)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The backend this store writes to.
    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }

    // ---- Identity ----

    /// Register a participant and log them in.
    pub fn register(&self, display_name: &str, gender: Gender) -> Result<Participant> {
        self.commit(&[CollectionKey::Users, CollectionKey::CurrentUserId], |state| {
            state.identity.register(display_name, gender)
        })
    }

    pub fn login(&self, id: &ParticipantId) -> Result<Participant> {
        self.commit(&[CollectionKey::CurrentUserId], |state| state.identity.login(id))
    }

    pub fn logout(&self) -> Result<()> {
        self.commit(&[CollectionKey::CurrentUserId], |state| {
            state.identity.logout();
            Ok(())
        })
    }

    pub fn current_session(&self) -> Result<Option<Participant>> {
        Ok(self.read()?.identity.current_session().cloned())
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.read()?.identity.current_session().is_some())
    }

    /// The login roster in registration order.
    pub fn participants(&self) -> Result<Vec<Participant>> {
        Ok(self.read()?.identity.participants().to_vec())
    }

    pub fn participant(&self, id: &ParticipantId) -> Result<Option<Participant>> {
        Ok(self.read()?.identity.get(id).cloned())
    }

    // ---- Verses ----

    /// Post a verse. See [`VerseLedger::add_verse`].
    pub fn add_verse(
        &self,
        content: &str,
        author: &Participant,
        variant: Option<&str>,
    ) -> Result<Verse> {
        self.commit(&[CollectionKey::Verses], |state| {
            state.verses.add_verse(content, author, variant)
        })
    }

    /// The river: every verse, newest first.
    pub fn verses(&self) -> Result<Vec<Verse>> {
        Ok(self.read()?.verses.verses().to_vec())
    }

    pub fn verse(&self, id: &VerseId) -> Result<Option<Verse>> {
        Ok(self.read()?.verses.get(id).cloned())
    }

    pub fn verses_by_author(&self, author_id: &ParticipantId) -> Result<Vec<Verse>> {
        Ok(self.read()?.verses.verses_by_author(author_id))
    }

    // ---- Replies ----

    pub fn add_reply(
        &self,
        verse_id: &VerseId,
        content: &str,
        author: &Participant,
    ) -> Result<Reply> {
        self.commit(&[CollectionKey::Replies], |state| {
            state
                .replies
                .add_reply(&state.verses, verse_id, content, author)
        })
    }

    pub fn replies_for_verse(&self, verse_id: &VerseId) -> Result<Vec<Reply>> {
        Ok(self.read()?.replies.replies_for_verse(verse_id))
    }

    pub fn replies_by_author(&self, author_id: &ParticipantId) -> Result<Vec<Reply>> {
        Ok(self.read()?.replies.replies_by_author(author_id))
    }

    pub fn reply(&self, id: &ReplyId) -> Result<Option<Reply>> {
        Ok(self.read()?.replies.get(id).cloned())
    }

    // ---- Matching ----

    /// Bind a reply to a verse. See [`MatchingEngine::create_match`].
    ///
    /// Snapshot writes only happen when a new match was created.
    pub fn create_match(&self, verse_id: &VerseId, reply_id: &ReplyId) -> Result<MatchOutcome> {
        let mut state = self.write()?;
        let mut next = state.clone();
        let outcome =
            next.matching
                .create_match(&mut next.verses, &next.replies, verse_id, reply_id)?;
        if outcome.created {
            self.persist(&next, &[CollectionKey::Matches, CollectionKey::Verses])?;
            *state = next;
        }
        Ok(outcome)
    }

    pub fn match_by_id(&self, id: &MatchId) -> Result<Option<Match>> {
        Ok(self.read()?.matching.get(id).cloned())
    }

    pub fn match_for_reply(&self, reply_id: &ReplyId) -> Result<Option<Match>> {
        Ok(self.read()?.matching.match_for_reply(reply_id).cloned())
    }

    pub fn matches_for_participant(&self, participant: &ParticipantId) -> Result<Vec<Match>> {
        let state = self.read()?;
        Ok(state
            .matching
            .matches_for_participant(&state.verses, &state.replies, participant))
    }

    pub fn match_view(&self, match_id: &MatchId, viewer: &ParticipantId) -> Result<MatchView> {
        let state = self.read()?;
        state
            .matching
            .match_view(&state.verses, &state.replies, match_id, viewer)
    }

    // ---- Messaging ----

    pub fn send_message(
        &self,
        match_id: &MatchId,
        sender_id: &ParticipantId,
        content: &str,
    ) -> Result<Message> {
        self.commit(&[CollectionKey::Messages], |state| {
            state
                .messaging
                .send_message(&state.matching, match_id, sender_id, content)
        })
    }

    pub fn messages_for_match(&self, match_id: &MatchId) -> Result<Vec<Message>> {
        Ok(self.read()?.messaging.messages_for_match(match_id))
    }

    // ---- Internals ----

    fn read(&self) -> Result<RwLockReadGuard<'_, SessionState>> {
        self.inner
            .read()
            .map_err(|e| SessionError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, SessionState>> {
        self.inner
            .write()
            .map_err(|e| SessionError::LockPoisoned(e.to_string()))
    }

    /// Run `op` on a copy of the state, persist `collections` from the copy,
    /// then swap it in. Nothing changes in memory if either step fails.
    fn commit<T>(
        &self,
        collections: &[CollectionKey],
        op: impl FnOnce(&mut SessionState) -> Result<T>,
    ) -> Result<T> {
        let mut state = self.write()?;
        let mut next = state.clone();
        let out = op(&mut next)?;
        self.persist(&next, collections)?;
        *state = next;
        Ok(out)
    }

    /// Rewrite the given collections from `state`.
    fn persist(&self, state: &SessionState, collections: &[CollectionKey]) -> Result<()> {
        for collection in collections {
            let key = collection.with_prefix(&self.config.key_prefix);
            match collection {
                CollectionKey::Users => {
                    self.snapshot.put_json(&key, state.identity.participants())?
                }
                CollectionKey::CurrentUserId => match state.identity.current_id() {
                    Some(id) => self.snapshot.put_json(&key, &id)?,
                    None => {
                        self.snapshot.remove(&key)?;
                    }
                },
                CollectionKey::Verses => self.snapshot.put_json(&key, state.verses.verses())?,
                CollectionKey::Replies => self.snapshot.put_json(&key, state.replies.replies())?,
                CollectionKey::Matches => {
                    self.snapshot.put_json(&key, state.matching.matches())?
                }
                CollectionKey::Messages => {
                    self.snapshot.put_json(&key, state.messaging.messages())?
                }
            }
            debug!(key = %key, "collection persisted");
        }
        Ok(())
    }
}
