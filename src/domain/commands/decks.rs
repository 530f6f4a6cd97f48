use crate::domain::models::Deck;

/// Create a new deck from dialog input. `tags_input` is the raw
/// comma-separated tag line as typed.
#[derive(Debug, Clone)]
pub struct CreateDeckCommand {
    pub name: String,
    pub description: String,
    pub tags_input: String,
}

#[derive(Debug, Clone)]
pub struct CreateDeckResult {
    pub deck: Deck,
}

/// Update an existing deck; `None` fields are left untouched.
#[derive(Debug, Clone)]
pub struct UpdateDeckCommand {
    pub deck_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags_input: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateDeckResult {
    pub deck: Deck,
}

#[derive(Debug, Clone)]
pub struct DeleteDeckCommand {
    pub deck_id: String,
}

#[derive(Debug, Clone)]
pub struct DeleteDeckResult {
    /// Whether a deck was actually removed.
    pub deleted: bool,
    /// The deck that became active afterwards, if any.
    pub active_deck_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SetActiveDeckCommand {
    pub deck_id: String,
}

#[derive(Debug, Clone)]
pub struct TogglePinnedCommand {
    pub deck_id: String,
}

#[derive(Debug, Clone)]
pub struct TogglePinnedResult {
    pub pinned: bool,
}
