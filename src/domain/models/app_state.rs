use serde::{Deserialize, Serialize};

use super::deck::Deck;

/// Schema version stamped onto every state the Migrator produces.
/// Bump this when the persisted shape changes; the Migrator must keep
/// accepting every older shape.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// The root persisted object: the single long-lived aggregate the whole
/// app operates on. Decks are owned by containment, cards by their deck;
/// the graph is a strict tree with no back-references.
///
/// Invariants (enforced by the Migrator, relied on everywhere else):
/// - no two decks share an `id`, no two cards within a deck share an `id`;
/// - `active_deck_id` is `None` exactly when `decks` is empty, otherwise
///   it references a member of `decks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub version: u32,
    pub decks: Vec<Deck>,
    pub active_deck_id: Option<String>,
}

impl AppState {
    /// A valid state with no decks.
    pub fn empty() -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION,
            decks: Vec::new(),
            active_deck_id: None,
        }
    }

    /// Find a deck by id.
    pub fn find_deck(&self, deck_id: &str) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == deck_id)
    }

    /// Find a deck by id, mutably.
    pub fn find_deck_mut(&mut self, deck_id: &str) -> Option<&mut Deck> {
        self.decks.iter_mut().find(|d| d.id == deck_id)
    }

    /// The currently selected deck, if any.
    pub fn active_deck(&self) -> Option<&Deck> {
        self.active_deck_id
            .as_deref()
            .and_then(|id| self.find_deck(id))
    }

    /// Re-point `active_deck_id` at a valid deck: keep it if it still
    /// resolves, otherwise fall back to the first deck (or `None` when
    /// there are no decks left).
    pub fn fix_active_deck(&mut self) {
        let valid = self
            .active_deck_id
            .as_deref()
            .is_some_and(|id| self.decks.iter().any(|d| d.id == id));
        if !valid {
            self.active_deck_id = self.decks.first().map(|d| d.id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_has_no_active_deck() {
        let state = AppState::empty();
        assert_eq!(state.version, CURRENT_SCHEMA_VERSION);
        assert!(state.decks.is_empty());
        assert_eq!(state.active_deck_id, None);
    }

    #[test]
    fn test_fix_active_deck_selects_first_when_dangling() {
        let mut state = AppState::empty();
        state.decks.push(Deck::new("A".to_string(), String::new(), vec![]));
        state.decks.push(Deck::new("B".to_string(), String::new(), vec![]));
        state.active_deck_id = Some("deck::gone".to_string());

        state.fix_active_deck();
        assert_eq!(state.active_deck_id.as_deref(), Some(state.decks[0].id.as_str()));
    }

    #[test]
    fn test_fix_active_deck_keeps_valid_selection() {
        let mut state = AppState::empty();
        state.decks.push(Deck::new("A".to_string(), String::new(), vec![]));
        state.decks.push(Deck::new("B".to_string(), String::new(), vec![]));
        state.active_deck_id = Some(state.decks[1].id.clone());

        state.fix_active_deck();
        assert_eq!(state.active_deck_id.as_deref(), Some(state.decks[1].id.as_str()));
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(AppState::empty()).unwrap();
        assert!(json.get("activeDeckId").is_some());
        assert!(json.get("decks").is_some());
    }
}
