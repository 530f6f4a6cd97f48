//! # Study With Me — storage core
//!
//! The persistence layer of the Study With Me flashcard app: the canonical
//! on-device representation of decks and cards, schema migration across
//! format revisions, JSON backup (export / overwrite-restore / merge-restore)
//! and CSV import/export of cards.
//!
//! The UI (rendering, study timers, speech synthesis) lives elsewhere and
//! only ever talks to this crate through the domain services. Everything in
//! here is synchronous and single-writer: the store assumes one active
//! reader/writer at a time, the same contract the original browser app had
//! with `localStorage`.

pub mod domain;
pub mod storage;

pub use domain::models::app_state::{AppState, CURRENT_SCHEMA_VERSION};
pub use domain::models::card::Card;
pub use domain::models::deck::Deck;
pub use storage::json::JsonConnection;
pub use storage::json::StateRepository;
pub use storage::StateStorage;
