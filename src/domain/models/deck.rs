use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::card::Card;

/// Domain model representing a named collection of cards, the unit of
/// study selection.
///
/// `cards` is ordered; insertion order is display order and new cards are
/// prepended (newest first). No two cards in a deck share an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Normalized tag labels, in user order. Duplicates are allowed.
    pub tags: Vec<String>,
    pub pinned: bool,
    /// Creation time as epoch milliseconds (the persisted wire format).
    pub created_at: i64,
    pub cards: Vec<Card>,
}

impl Deck {
    /// Generate a unique ID for a deck
    pub fn generate_id() -> String {
        format!("deck::{}", Uuid::new_v4())
    }

    /// Build a new empty deck with a fresh id and the current timestamp.
    pub fn new(name: String, description: String, tags: Vec<String>) -> Self {
        Self {
            id: Self::generate_id(),
            name,
            description,
            tags,
            pinned: false,
            created_at: Utc::now().timestamp_millis(),
            cards: Vec::new(),
        }
    }

    /// Find a card by id.
    pub fn find_card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    /// Find a card by id, mutably.
    pub fn find_card_mut(&mut self, card_id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == card_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_deck_is_empty_and_unpinned() {
        let deck = Deck::new("English".to_string(), String::new(), vec!["vocab".to_string()]);
        assert!(deck.id.starts_with("deck::"));
        assert!(deck.cards.is_empty());
        assert!(!deck.pinned);
        assert_eq!(deck.tags, vec!["vocab"]);
    }
}
