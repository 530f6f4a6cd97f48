//! Theme preference persistence. A single word in its own file, separate
//! from the app state so a corrupted state file cannot take the theme
//! down with it (and vice versa).

use anyhow::Result;
use log::debug;
use std::fs;

use super::connection::JsonConnection;
use crate::storage::traits::SettingsStorage;

/// UI color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The persisted token for this theme.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a persisted token; anything unrecognized is the default.
    pub fn from_persisted(raw: &str) -> Self {
        match raw.trim() {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }
}

/// JSON-connection-backed implementation of [`SettingsStorage`].
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    connection: JsonConnection,
}

impl SettingsRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl SettingsStorage for SettingsRepository {
    fn load_theme(&self) -> Theme {
        match fs::read_to_string(self.connection.theme_file_path()) {
            Ok(raw) => Theme::from_persisted(&raw),
            Err(_) => Theme::default(),
        }
    }

    fn save_theme(&self, theme: Theme) -> Result<()> {
        self.connection
            .write_atomic(&self.connection.theme_file_path(), theme.as_str())?;
        debug!("Saved theme preference: {}", theme.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::TestEnvironment;

    fn setup() -> (SettingsRepository, TestEnvironment) {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        let repo = SettingsRepository::new(env.connection.clone());
        (repo, env)
    }

    #[test]
    fn test_defaults_to_dark_when_absent() {
        let (repo, _env) = setup();
        assert_eq!(repo.load_theme(), Theme::Dark);
    }

    #[test]
    fn test_round_trips_light_theme() {
        let (repo, _env) = setup();
        repo.save_theme(Theme::Light).unwrap();
        assert_eq!(repo.load_theme(), Theme::Light);
    }

    #[test]
    fn test_garbage_value_falls_back_to_dark() {
        let (repo, env) = setup();
        fs::write(env.connection.theme_file_path(), "solarized??").unwrap();
        assert_eq!(repo.load_theme(), Theme::Dark);
    }
}
