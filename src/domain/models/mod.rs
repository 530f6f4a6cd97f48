pub mod app_state;
pub mod card;
pub mod deck;

pub use app_state::{AppState, CURRENT_SCHEMA_VERSION};
pub use card::Card;
pub use deck::Deck;
