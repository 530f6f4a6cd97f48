//! # Schema Migrator
//!
//! Best-effort normalization of an arbitrary JSON value into the current
//! [`AppState`] shape. Every revision of the app ever persisted is loaded
//! through this one pass: missing fields get documented defaults, legacy
//! field names are folded into the current ones, and malformed nested
//! entries are skipped so partial corruption never destroys the records
//! around it.
//!
//! `migrate` is total (never fails, for any JSON value) and idempotent
//! (migrating an already-migrated state is the identity).

use std::collections::HashSet;

use chrono::Utc;
use log::warn;
use serde_json::{Map, Value};

use super::models::{AppState, Card, Deck, CURRENT_SCHEMA_VERSION};
use super::tags::normalize_tag;

/// Placeholder name for decks persisted without one.
pub const UNTITLED_DECK_NAME: &str = "Untitled";

/// Normalize any JSON value into a valid current-schema state.
///
/// Inputs that are not objects (null, arrays, primitives) are treated as
/// an empty state rather than an error: at this boundary "unreadable"
/// means "no prior data", never "crash".
pub fn migrate(value: Value) -> AppState {
    let Some(root) = value.as_object() else {
        return AppState::empty();
    };

    let mut decks = Vec::new();
    let mut seen_deck_ids: HashSet<String> = HashSet::new();
    if let Some(raw_decks) = root.get("decks").and_then(Value::as_array) {
        for raw in raw_decks {
            match migrate_deck(raw, &mut seen_deck_ids) {
                Some(deck) => decks.push(deck),
                None => warn!("Skipping malformed deck entry during migration"),
            }
        }
    }

    let mut state = AppState {
        version: CURRENT_SCHEMA_VERSION,
        decks,
        active_deck_id: string_field(root, "activeDeckId"),
    };
    state.fix_active_deck();
    state
}

/// Repair one deck entry. Returns `None` when the entry is not an object
/// at all; every lesser defect is repaired in place.
fn migrate_deck(raw: &Value, seen_deck_ids: &mut HashSet<String>) -> Option<Deck> {
    let obj = raw.as_object()?;

    let id = unique_id(string_field(obj, "id"), seen_deck_ids, Deck::generate_id);

    let name = match string_field(obj, "name") {
        Some(n) if !n.trim().is_empty() => n,
        _ => UNTITLED_DECK_NAME.to_string(),
    };

    let tags = match obj.get("tags").and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(normalize_tag)
            .filter(|t| !t.is_empty())
            .collect(),
        None => Vec::new(),
    };

    let mut cards = Vec::new();
    let mut seen_card_ids: HashSet<String> = HashSet::new();
    if let Some(raw_cards) = obj.get("cards").and_then(Value::as_array) {
        for raw_card in raw_cards {
            match migrate_card(raw_card, &mut seen_card_ids) {
                Some(card) => cards.push(card),
                None => warn!("Skipping malformed card entry during migration"),
            }
        }
    }

    Some(Deck {
        id,
        name,
        description: string_field(obj, "description").unwrap_or_default(),
        tags,
        pinned: obj.get("pinned").and_then(Value::as_bool).unwrap_or(false),
        created_at: timestamp_field(obj, "createdAt"),
        cards,
    })
}

/// Repair one card entry, folding legacy field names (`word`/`meaning`/
/// `example`) into the current ones when the current names are absent.
fn migrate_card(raw: &Value, seen_card_ids: &mut HashSet<String>) -> Option<Card> {
    let obj = raw.as_object()?;

    Some(Card {
        id: unique_id(string_field(obj, "id"), seen_card_ids, Card::generate_id),
        front: string_field(obj, "front")
            .or_else(|| string_field(obj, "word"))
            .unwrap_or_default(),
        back: string_field(obj, "back")
            .or_else(|| string_field(obj, "meaning"))
            .unwrap_or_default(),
        tag: normalize_tag(&string_field(obj, "tag").unwrap_or_default()),
        hint: string_field(obj, "hint")
            .or_else(|| string_field(obj, "example"))
            .unwrap_or_default(),
        created_at: timestamp_field(obj, "createdAt"),
    })
}

/// Keep a persisted id only if it is a non-empty string not seen before in
/// this collection; otherwise mint a fresh one. Guarantees the uniqueness
/// invariant even for corrupted input with duplicated ids.
fn unique_id(
    persisted: Option<String>,
    seen: &mut HashSet<String>,
    fresh: fn() -> String,
) -> String {
    let id = match persisted {
        Some(id) if !id.is_empty() && !seen.contains(&id) => id,
        _ => fresh(),
    };
    seen.insert(id.clone());
    id
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Epoch-millisecond timestamp, defaulting to now. Tolerates floats from
/// revisions that serialized `Date.now()` through lossy number handling.
fn timestamp_field(obj: &Map<String, Value>, key: &str) -> i64 {
    match obj.get(key) {
        Some(v) => v
            .as_i64()
            .or_else(|| v.as_f64().map(|f| f as i64))
            .unwrap_or_else(|| Utc::now().timestamp_millis()),
        None => Utc::now().timestamp_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_inputs_become_empty_state() {
        for value in [
            Value::Null,
            json!(42),
            json!("decks"),
            json!(true),
            json!([1, 2, 3]),
        ] {
            let state = migrate(value);
            assert_eq!(state, AppState::empty());
        }
    }

    #[test]
    fn test_empty_object_becomes_empty_state() {
        assert_eq!(migrate(json!({})), AppState::empty());
    }

    #[test]
    fn test_fills_missing_deck_fields() {
        let state = migrate(json!({ "decks": [{}] }));
        assert_eq!(state.decks.len(), 1);

        let deck = &state.decks[0];
        assert!(deck.id.starts_with("deck::"));
        assert_eq!(deck.name, UNTITLED_DECK_NAME);
        assert_eq!(deck.description, "");
        assert_eq!(deck.tags, Vec::<String>::new());
        assert!(!deck.pinned);
        assert!(deck.created_at > 0);
        assert!(deck.cards.is_empty());
        assert_eq!(state.active_deck_id.as_deref(), Some(deck.id.as_str()));
    }

    #[test]
    fn test_legacy_card_field_names_are_folded_in() {
        let state = migrate(json!({
            "decks": [{
                "name": "Old revision",
                "cards": [
                    { "word": "apple", "meaning": "quả táo", "example": "trái cây" },
                    { "front": "book", "back": "quyển sách", "word": "ignored" }
                ]
            }]
        }));

        let cards = &state.decks[0].cards;
        assert_eq!(cards[0].front, "apple");
        assert_eq!(cards[0].back, "quả táo");
        assert_eq!(cards[0].hint, "trái cây");
        // Current names win when both are present.
        assert_eq!(cards[1].front, "book");
        assert_eq!(cards[1].back, "quyển sách");
    }

    #[test]
    fn test_malformed_nested_entries_are_skipped_not_fatal() {
        let state = migrate(json!({
            "decks": [
                "not a deck",
                { "name": "Good", "cards": [null, { "front": "a", "back": "b" }, 7] },
                42
            ],
            "activeDeckId": null
        }));

        assert_eq!(state.decks.len(), 1);
        assert_eq!(state.decks[0].name, "Good");
        assert_eq!(state.decks[0].cards.len(), 1);
        assert_eq!(state.decks[0].cards[0].front, "a");
    }

    #[test]
    fn test_non_array_decks_becomes_empty() {
        let state = migrate(json!({ "decks": { "0": { "name": "x" } } }));
        assert!(state.decks.is_empty());
        assert_eq!(state.active_deck_id, None);
    }

    #[test]
    fn test_tags_are_normalized_and_empties_dropped() {
        let state = migrate(json!({
            "decks": [{ "name": "d", "tags": [" English ", "", "VOCAB", 3, null] }]
        }));
        assert_eq!(state.decks[0].tags, vec!["english", "vocab"]);
    }

    #[test]
    fn test_card_tag_is_normalized() {
        let state = migrate(json!({
            "decks": [{ "cards": [{ "front": "a", "back": "b", "tag": " Noun " }] }]
        }));
        assert_eq!(state.decks[0].cards[0].tag, "noun");
    }

    #[test]
    fn test_dangling_active_deck_id_is_repaired() {
        let state = migrate(json!({
            "decks": [{ "id": "deck::a", "name": "A" }],
            "activeDeckId": "deck::gone"
        }));
        assert_eq!(state.active_deck_id.as_deref(), Some("deck::a"));
    }

    #[test]
    fn test_duplicate_ids_are_reassigned() {
        let state = migrate(json!({
            "decks": [
                { "id": "deck::same", "name": "first" },
                { "id": "deck::same", "name": "second" },
                { "id": "deck::other", "cards": [
                    { "id": "card::dup", "front": "a", "back": "b" },
                    { "id": "card::dup", "front": "c", "back": "d" }
                ]}
            ]
        }));

        assert_eq!(state.decks[0].id, "deck::same");
        assert_ne!(state.decks[1].id, "deck::same");

        let cards = &state.decks[2].cards;
        assert_eq!(cards[0].id, "card::dup");
        assert_ne!(cards[1].id, "card::dup");
        // Both cards keep their content either way.
        assert_eq!(cards[1].front, "c");
    }

    #[test]
    fn test_version_is_always_stamped_to_current() {
        let state = migrate(json!({ "version": 1, "decks": [] }));
        assert_eq!(state.version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let inputs = [
            Value::Null,
            json!({}),
            json!({ "decks": [{ "name": "d", "cards": [{ "word": "a", "meaning": "b" }] }] }),
            json!({ "decks": "oops", "activeDeckId": 12 }),
        ];

        for input in inputs {
            let once = migrate(input);
            let twice = migrate(serde_json::to_value(&once).unwrap());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_existing_timestamps_and_ids_survive() {
        let state = migrate(json!({
            "decks": [{
                "id": "deck::keep",
                "name": "Keep",
                "createdAt": 1700000000000i64,
                "cards": [{ "id": "card::keep", "front": "a", "back": "b", "createdAt": 1700000000001i64 }]
            }]
        }));

        assert_eq!(state.decks[0].id, "deck::keep");
        assert_eq!(state.decks[0].created_at, 1700000000000);
        assert_eq!(state.decks[0].cards[0].id, "card::keep");
        assert_eq!(state.decks[0].cards[0].created_at, 1700000000001);
    }
}
