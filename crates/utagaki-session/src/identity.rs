//! Roster of registered participants and the single active session.

use tracing::{debug, warn};
use utagaki_types::{Gender, Participant, ParticipantId};

use crate::error::{Result, SessionError};
use crate::validation::require_text;

/// Registered participants plus the one that is currently logged in.
///
/// "Login" is selection from the local roster; there are no credentials.
#[derive(Clone, Debug, Default)]
pub struct IdentityStore {
    roster: Vec<Participant>,
    current: Option<ParticipantId>,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted state.
    ///
    /// A session id that no longer resolves against the roster is dropped
    /// and the store starts logged out.
    pub fn restore(roster: Vec<Participant>, current: Option<ParticipantId>) -> Self {
        let current = match current {
            Some(id) if roster.iter().any(|p| p.id == id) => Some(id),
            Some(id) => {
                warn!(participant = %id, "persisted session does not match any participant");
                None
            }
            None => None,
        };
        Self { roster, current }
    }

    /// Register a new participant and make them the active session.
    pub fn register(&mut self, display_name: &str, gender: Gender) -> Result<Participant> {
        let display_name = require_text("display name", display_name)?;
        let participant = Participant::new(display_name, gender);
        self.roster.push(participant.clone());
        self.current = Some(participant.id);
        debug!(participant = %participant.id, "registered participant");
        Ok(participant)
    }

    /// Make an existing roster entry the active session.
    pub fn login(&mut self, id: &ParticipantId) -> Result<Participant> {
        let participant = self
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::not_found("participant", id))?;
        self.current = Some(participant.id);
        debug!(participant = %id, "logged in");
        Ok(participant)
    }

    pub fn logout(&mut self) {
        self.current = None;
    }

    /// The participant holding the active session, if any.
    pub fn current_session(&self) -> Option<&Participant> {
        self.current.as_ref().and_then(|id| self.get(id))
    }

    pub fn current_id(&self) -> Option<ParticipantId> {
        self.current
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.roster.iter().find(|p| &p.id == id)
    }

    /// All participants in registration order.
    pub fn participants(&self) -> &[Participant] {
        &self.roster
    }
}
