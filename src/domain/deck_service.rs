//! Deck commands: create, edit, delete, pin, select. Every mutation goes
//! load → mutate → save through the store, so the persisted state is
//! always one migrated save behind nothing.

use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};

use super::commands::decks::{
    CreateDeckCommand, CreateDeckResult, DeleteDeckCommand, DeleteDeckResult,
    SetActiveDeckCommand, TogglePinnedCommand, TogglePinnedResult, UpdateDeckCommand,
    UpdateDeckResult,
};
use super::models::{AppState, Deck};
use super::tags::parse_tag_list;
use crate::storage::traits::StateStorage;

/// Service for managing decks.
#[derive(Clone)]
pub struct DeckService<S: StateStorage> {
    storage: Arc<S>,
}

impl<S: StateStorage> DeckService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    fn current_state(&self) -> AppState {
        self.storage.load().unwrap_or_else(AppState::empty)
    }

    /// Create a new deck, make it active, and persist. New decks go to
    /// the front of the list (display order is newest first).
    pub fn create_deck(&self, command: CreateDeckCommand) -> Result<CreateDeckResult> {
        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(anyhow::anyhow!("Deck name cannot be empty"));
        }

        info!("Creating deck: {}", name);

        let deck = Deck::new(
            name,
            command.description.trim().to_string(),
            parse_tag_list(&command.tags_input),
        );

        let mut state = self.current_state();
        state.active_deck_id = Some(deck.id.clone());
        state.decks.insert(0, deck.clone());
        self.storage.save(&state)?;

        Ok(CreateDeckResult { deck })
    }

    /// Update an existing deck's editable fields.
    pub fn update_deck(&self, command: UpdateDeckCommand) -> Result<UpdateDeckResult> {
        let mut state = self.current_state();
        let deck = state
            .find_deck_mut(&command.deck_id)
            .ok_or_else(|| anyhow::anyhow!("Deck not found: {}", command.deck_id))?;

        if let Some(name) = command.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(anyhow::anyhow!("Deck name cannot be empty"));
            }
            deck.name = name;
        }
        if let Some(description) = command.description {
            deck.description = description.trim().to_string();
        }
        if let Some(tags_input) = command.tags_input {
            deck.tags = parse_tag_list(&tags_input);
        }

        let updated = deck.clone();
        self.storage.save(&state)?;
        info!("Updated deck: {}", updated.id);

        Ok(UpdateDeckResult { deck: updated })
    }

    /// Delete a deck. If it was the active one, selection falls back to
    /// the first remaining deck.
    pub fn delete_deck(&self, command: DeleteDeckCommand) -> Result<DeleteDeckResult> {
        let mut state = self.current_state();
        let before = state.decks.len();
        state.decks.retain(|d| d.id != command.deck_id);
        let deleted = state.decks.len() < before;

        if !deleted {
            warn!("Delete requested for unknown deck: {}", command.deck_id);
        }
        if state.active_deck_id.as_deref() == Some(command.deck_id.as_str()) {
            state.active_deck_id = None;
        }
        state.fix_active_deck();
        self.storage.save(&state)?;

        Ok(DeleteDeckResult {
            deleted,
            active_deck_id: state.active_deck_id,
        })
    }

    /// Make a deck the active one.
    pub fn set_active_deck(&self, command: SetActiveDeckCommand) -> Result<AppState> {
        let mut state = self.current_state();
        if state.find_deck(&command.deck_id).is_none() {
            return Err(anyhow::anyhow!("Deck not found: {}", command.deck_id));
        }
        state.active_deck_id = Some(command.deck_id);
        self.storage.save(&state)?;
        Ok(state)
    }

    /// Flip a deck's pinned flag.
    pub fn toggle_pinned(&self, command: TogglePinnedCommand) -> Result<TogglePinnedResult> {
        let mut state = self.current_state();
        let deck = state
            .find_deck_mut(&command.deck_id)
            .ok_or_else(|| anyhow::anyhow!("Deck not found: {}", command.deck_id))?;

        deck.pinned = !deck.pinned;
        let pinned = deck.pinned;
        self.storage.save(&state)?;

        Ok(TogglePinnedResult { pinned })
    }
}
