//! # Storage Traits
//!
//! Abstraction over the persistence medium so the domain layer never
//! touches files directly. The shipped implementation is JSON-file-based
//! (`storage::json`); tests and future backends implement the same traits.

use anyhow::Result;

use crate::domain::models::AppState;
use crate::storage::json::settings_repository::Theme;

/// Interface for persisting the root application state.
///
/// All operations are synchronous: the store assumes a single active
/// reader/writer, the same contract the original app had with the
/// browser's synchronous storage API.
pub trait StateStorage: Send + Sync {
    /// Read and migrate the persisted state. Returns `None` when nothing
    /// has been persisted yet or the stored bytes do not parse — at this
    /// boundary both simply mean "no prior state".
    fn load(&self) -> Option<AppState>;

    /// Migrate and persist the state. The only legal write path: callers
    /// can never persist an unmigrated shape.
    fn save(&self, state: &AppState) -> Result<()>;

    /// Return the persisted state if it has at least one deck; otherwise
    /// persist and return the default sample state. Every session starts
    /// from a valid, non-empty, schema-correct state.
    fn seed_if_empty(&self) -> Result<AppState>;

    /// Erase all persisted data and reseed.
    fn reset(&self) -> Result<AppState>;
}

/// Interface for persisting lightweight user settings (currently the
/// theme preference).
pub trait SettingsStorage: Send + Sync {
    /// Read the persisted theme; absent or unrecognized values fall back
    /// to the default.
    fn load_theme(&self) -> Theme;

    /// Persist the theme preference.
    fn save_theme(&self, theme: Theme) -> Result<()>;
}
