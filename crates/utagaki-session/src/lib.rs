//! Session store for Utagaki, the poem-exchange matchmaking client.
//!
//! One participant posts the upper half of a poem (a verse), others answer
//! with a lower half (a reply), and the verse author may bind one reply to
//! open a private chat (a match). This crate provides:
//! - `IdentityStore` for the login roster and the active session
//! - `VerseLedger` and `ReplyLedger` for authored content
//! - `MatchingEngine`, which allows at most one match per pair of participants
//! - `MessagingLog` for per-match chat history
//! - `SessionStore`, which owns all of the above behind one lock and
//!   rewrites a key-value snapshot after every mutation
//! - `SessionConfig`, loaded from TOML

pub mod config;
pub mod error;
pub mod identity;
pub mod matching;
pub mod messaging;
pub mod replies;
pub mod store;
pub mod validation;
pub mod verses;

pub use config::{SessionConfig, DEFAULT_KEY_PREFIX};
pub use error::{Result, SessionError};
pub use identity::IdentityStore;
pub use matching::{AuthorPair, MatchOutcome, MatchView, MatchingEngine};
pub use messaging::MessagingLog;
pub use replies::ReplyLedger;
pub use store::SessionStore;
pub use verses::{sample_verses, VerseLedger};
