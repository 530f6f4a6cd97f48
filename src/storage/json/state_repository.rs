//! # State Repository
//!
//! The State Store: sole owner of the persisted [`AppState`] file. Every
//! write goes through migration first, so nothing downstream can ever
//! persist an unmigrated shape, and every read migrates on the way in, so
//! state persisted by any earlier revision keeps loading.

use anyhow::Result;
use log::{debug, info, warn};
use std::fs;

use super::connection::JsonConnection;
use crate::domain::migration::migrate;
use crate::domain::models::{AppState, Card, Deck};
use crate::storage::traits::StateStorage;

/// JSON-file-backed implementation of [`StateStorage`].
#[derive(Debug, Clone)]
pub struct StateRepository {
    connection: JsonConnection,
}

impl StateRepository {
    /// Create a new state repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// The sample state a fresh install starts from: one pinned deck with
    /// three cards, enough to try search, tags, study and TTS.
    fn seed_state() -> AppState {
        let mut deck = Deck::new(
            "English A1 (sample)".to_string(),
            "Sample deck for trying out search, tags, study and TTS.".to_string(),
            vec!["english".to_string(), "vocab".to_string()],
        );
        deck.pinned = true;
        deck.cards = vec![
            sample_card("apple", "quả táo", "noun", "trái cây"),
            sample_card("book", "quyển sách", "noun", "đồ vật"),
            sample_card("thank you", "cảm ơn", "phrase", "lịch sự"),
        ];

        let mut state = AppState::empty();
        state.active_deck_id = Some(deck.id.clone());
        state.decks.push(deck);
        state
    }
}

fn sample_card(front: &str, back: &str, tag: &str, hint: &str) -> Card {
    Card::new(front.to_string(), back.to_string(), tag.to_string(), hint.to_string())
}

impl StateStorage for StateRepository {
    fn load(&self) -> Option<AppState> {
        let path = self.connection.state_file_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => {
                debug!("No persisted state at {:?}", path);
                return None;
            }
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => Some(migrate(value)),
            Err(e) => {
                warn!("Persisted state at {:?} is not valid JSON, treating as absent: {}", path, e);
                None
            }
        }
    }

    fn save(&self, state: &AppState) -> Result<()> {
        let migrated = migrate(serde_json::to_value(state)?);
        let json = serde_json::to_string(&migrated)?;
        self.connection.write_atomic(&self.connection.state_file_path(), &json)?;
        debug!("Saved state with {} decks", migrated.decks.len());
        Ok(())
    }

    fn seed_if_empty(&self) -> Result<AppState> {
        if let Some(state) = self.load() {
            if !state.decks.is_empty() {
                return Ok(state);
            }
        }

        let state = Self::seed_state();
        self.save(&state)?;
        info!("Seeded default state with sample deck");
        Ok(state)
    }

    fn reset(&self) -> Result<AppState> {
        let path = self.connection.state_file_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        let theme_path = self.connection.theme_file_path();
        if theme_path.exists() {
            fs::remove_file(&theme_path)?;
        }
        info!("Reset all persisted data");
        self.seed_if_empty()
    }
}
