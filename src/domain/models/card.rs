use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain model representing a single study item: one prompt/answer pair
/// with an optional tag and hint.
///
/// `tag` and `hint` use empty-string-means-absent semantics to stay
/// byte-compatible with state persisted by earlier revisions of the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub front: String,
    pub back: String,
    pub tag: String,
    pub hint: String,
    /// Creation time as epoch milliseconds (the persisted wire format).
    pub created_at: i64,
}

impl Card {
    /// Generate a unique ID for a card
    pub fn generate_id() -> String {
        format!("card::{}", Uuid::new_v4())
    }

    /// Build a new card with a fresh id and the current timestamp.
    /// Callers are expected to have trimmed/validated `front` and `back`.
    pub fn new(front: String, back: String, tag: String, hint: String) -> Self {
        Self {
            id: Self::generate_id(),
            front,
            back,
            tag,
            hint,
            created_at: Utc::now().timestamp_millis(),
        }
    }
}
