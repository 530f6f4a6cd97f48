use crate::domain::csv_service::ImportOutcome;
use crate::domain::models::Card;

/// Add a card to a deck from dialog input. Tag and hint may be empty.
#[derive(Debug, Clone)]
pub struct AddCardCommand {
    pub deck_id: String,
    pub front: String,
    pub back: String,
    pub tag: String,
    pub hint: String,
}

#[derive(Debug, Clone)]
pub struct AddCardResult {
    pub card: Card,
}

/// Replace the editable fields of an existing card.
#[derive(Debug, Clone)]
pub struct UpdateCardCommand {
    pub deck_id: String,
    pub card_id: String,
    pub front: String,
    pub back: String,
    pub tag: String,
    pub hint: String,
}

#[derive(Debug, Clone)]
pub struct UpdateCardResult {
    pub card: Card,
}

#[derive(Debug, Clone)]
pub struct DeleteCardCommand {
    pub deck_id: String,
    pub card_id: String,
}

#[derive(Debug, Clone)]
pub struct DeleteCardResult {
    pub deleted: bool,
}

/// Bulk-import cards into a deck from pasted or uploaded CSV text.
#[derive(Debug, Clone)]
pub struct ImportCardsCommand {
    pub deck_id: String,
    pub csv_text: String,
}

#[derive(Debug, Clone)]
pub struct ImportCardsResult {
    pub outcome: ImportOutcome,
}

#[derive(Debug, Clone)]
pub struct ExportDeckCsvCommand {
    pub deck_id: String,
}

#[derive(Debug, Clone)]
pub struct ExportDeckCsvResult {
    pub filename: String,
    pub csv_content: String,
    pub card_count: usize,
}
