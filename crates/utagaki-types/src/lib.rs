//! Foundation types for Utagaki.
//!
//! This crate provides the entity records and identifiers shared by the
//! snapshot backends, the session store, and the command-line client. Every
//! other Utagaki crate depends on `utagaki-types`.
//!
//! # Key Types
//!
//! - [`Participant`] — A registered member of the local roster
//! - [`Verse`] — A posted upper verse inviting replies, with its [`VerseVariant`] and [`VerseStatus`]
//! - [`Reply`] — A lower verse attached to a specific verse
//! - [`Match`] — A bound pairing of one verse and one reply
//! - [`Message`] — A chat line exchanged inside a match
//! - [`Timestamp`] — Milliseconds since the UNIX epoch

pub mod error;
pub mod id;
pub mod matching;
pub mod message;
pub mod participant;
pub mod reply;
pub mod temporal;
pub mod verse;

pub use error::TypeError;
pub use id::{MatchId, MessageId, ParticipantId, ReplyId, VerseId, LEGACY_ID_NAMESPACE};
pub use matching::Match;
pub use message::Message;
pub use participant::{Gender, Participant};
pub use reply::Reply;
pub use temporal::Timestamp;
pub use verse::{Verse, VerseStatus, VerseVariant};
