//! Card commands: add, edit, delete, plus per-deck CSV import/export.

use std::sync::Arc;

use anyhow::Result;
use log::info;

use super::commands::cards::{
    AddCardCommand, AddCardResult, DeleteCardCommand, DeleteCardResult, ExportDeckCsvCommand,
    ExportDeckCsvResult, ImportCardsCommand, ImportCardsResult, UpdateCardCommand,
    UpdateCardResult,
};
use super::csv_service;
use super::models::{AppState, Card};
use super::tags::normalize_tag;
use crate::storage::traits::StateStorage;

/// Longest deck-name prefix used in an export filename.
const EXPORT_NAME_MAX_LEN: usize = 50;

/// Service for managing cards within decks.
#[derive(Clone)]
pub struct CardService<S: StateStorage> {
    storage: Arc<S>,
}

impl<S: StateStorage> CardService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    fn current_state(&self) -> AppState {
        self.storage.load().unwrap_or_else(AppState::empty)
    }

    /// Add a card to the front of a deck (display order is newest first).
    pub fn add_card(&self, command: AddCardCommand) -> Result<AddCardResult> {
        let front = command.front.trim().to_string();
        let back = command.back.trim().to_string();
        if front.is_empty() || back.is_empty() {
            return Err(anyhow::anyhow!("Card front and back text are required"));
        }

        let mut state = self.current_state();
        let deck = state
            .find_deck_mut(&command.deck_id)
            .ok_or_else(|| anyhow::anyhow!("Deck not found: {}", command.deck_id))?;

        let card = Card::new(
            front,
            back,
            normalize_tag(&command.tag),
            command.hint.trim().to_string(),
        );
        deck.cards.insert(0, card.clone());
        self.storage.save(&state)?;
        info!("Added card {} to deck {}", card.id, command.deck_id);

        Ok(AddCardResult { card })
    }

    /// Replace the editable fields of an existing card.
    pub fn update_card(&self, command: UpdateCardCommand) -> Result<UpdateCardResult> {
        let front = command.front.trim().to_string();
        let back = command.back.trim().to_string();
        if front.is_empty() || back.is_empty() {
            return Err(anyhow::anyhow!("Card front and back text are required"));
        }

        let mut state = self.current_state();
        let deck = state
            .find_deck_mut(&command.deck_id)
            .ok_or_else(|| anyhow::anyhow!("Deck not found: {}", command.deck_id))?;
        let card = deck
            .find_card_mut(&command.card_id)
            .ok_or_else(|| anyhow::anyhow!("Card not found: {}", command.card_id))?;

        card.front = front;
        card.back = back;
        card.tag = normalize_tag(&command.tag);
        card.hint = command.hint.trim().to_string();

        let updated = card.clone();
        self.storage.save(&state)?;

        Ok(UpdateCardResult { card: updated })
    }

    /// Remove a card from a deck. Unknown ids are reported, not errors.
    pub fn delete_card(&self, command: DeleteCardCommand) -> Result<DeleteCardResult> {
        let mut state = self.current_state();
        let deck = state
            .find_deck_mut(&command.deck_id)
            .ok_or_else(|| anyhow::anyhow!("Deck not found: {}", command.deck_id))?;

        let before = deck.cards.len();
        deck.cards.retain(|c| c.id != command.card_id);
        let deleted = deck.cards.len() < before;
        self.storage.save(&state)?;

        Ok(DeleteCardResult { deleted })
    }

    /// Bulk-import cards from CSV text. Bad rows are counted, never fatal;
    /// imported cards append after the deck's existing cards.
    pub fn import_cards(&self, command: ImportCardsCommand) -> Result<ImportCardsResult> {
        let mut state = self.current_state();
        let deck = state
            .find_deck_mut(&command.deck_id)
            .ok_or_else(|| anyhow::anyhow!("Deck not found: {}", command.deck_id))?;

        let outcome = csv_service::import_cards(deck, &command.csv_text);
        self.storage.save(&state)?;

        Ok(ImportCardsResult { outcome })
    }

    /// Export a deck's cards as CSV, with a filename derived from the
    /// deck name.
    pub fn export_deck_csv(&self, command: ExportDeckCsvCommand) -> Result<ExportDeckCsvResult> {
        let state = self.current_state();
        let deck = state
            .find_deck(&command.deck_id)
            .ok_or_else(|| anyhow::anyhow!("Deck not found: {}", command.deck_id))?;

        let csv_content = csv_service::deck_to_csv(deck);
        let filename = format!("{}.csv", export_file_stem(&deck.name));
        info!("📄 CSV: Exported {} cards from deck '{}' as {}", deck.cards.len(), deck.name, filename);

        Ok(ExportDeckCsvResult {
            filename,
            csv_content,
            card_count: deck.cards.len(),
        })
    }
}

/// Turn a deck name into a safe filename stem: keep alphanumerics,
/// underscore, hyphen and space, replace the rest, cap the length.
fn export_file_stem(deck_name: &str) -> String {
    let safe: String = deck_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .take(EXPORT_NAME_MAX_LEN)
        .collect();

    let trimmed = safe.trim();
    if trimmed.is_empty() {
        "deck".to_string()
    } else {
        trimmed.to_string()
    }
}
