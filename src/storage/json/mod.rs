//! JSON-file storage backend.
//!
//! One small file per concern under a single data directory:
//!
//! ```text
//! data/
//! ├── swm_flashcards_v2.json   ← the whole AppState (state_repository)
//! └── swm_theme_v1             ← theme preference (settings_repository)
//! ```
//!
//! File names carry over the storage keys of the original browser app so
//! the scheme stays recognizable across ports.

pub mod connection;
pub mod settings_repository;
pub mod state_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use settings_repository::{SettingsRepository, Theme};
pub use state_repository::StateRepository;
