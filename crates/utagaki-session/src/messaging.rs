//! Append-only chat history, scoped per match.

use tracing::debug;
use utagaki_types::{MatchId, Message, ParticipantId};

use crate::error::{Result, SessionError};
use crate::matching::MatchingEngine;
use crate::validation::require_content;

/// Every message ever sent, in send order.
///
/// Messages are never edited. Their `is_read` flag stays `false`; there is no
/// read-receipt operation.
#[derive(Clone, Debug, Default)]
pub struct MessagingLog {
    messages: Vec<Message>,
}

impl MessagingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Append a message to the match `match_id`, which must exist.
    pub fn send_message(
        &mut self,
        matches: &MatchingEngine,
        match_id: &MatchId,
        sender_id: &ParticipantId,
        content: &str,
    ) -> Result<Message> {
        if !matches.contains(match_id) {
            return Err(SessionError::not_found("match", match_id));
        }
        let content = require_content("content", content)?;

        let message = Message::new(*match_id, *sender_id, content);
        self.messages.push(message.clone());
        debug!(message = %message.id, match_id = %match_id, sender = %sender_id, "message sent");
        Ok(message)
    }

    /// Messages of one match in send order.
    pub fn messages_for_match(&self, match_id: &MatchId) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|m| &m.match_id == match_id)
            .cloned()
            .collect()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
