//! Storage layer: the JSON-file-backed store plus the trait seam the
//! domain services depend on.

pub mod json;
pub mod traits;

pub use traits::{SettingsStorage, StateStorage};
