//! Command and result structs for the domain services. The UI builds a
//! command from raw dialog input; the service validates it, applies it to
//! the state, and persists through the store.

pub mod cards;
pub mod decks;
