//! Test utilities for storage-backed tests.
//!
//! RAII-based cleanup: the temp directory lives as long as the
//! environment and is removed when it drops, even if a test panics.

use anyhow::Result;
use std::sync::Arc;
use tempfile::TempDir;

use super::connection::JsonConnection;
use super::settings_repository::SettingsRepository;
use super::state_repository::StateRepository;

/// A temporary data directory plus an open connection to it.
pub struct TestEnvironment {
    pub connection: JsonConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = JsonConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// Environment plus ready-made repositories for service-level tests.
pub struct TestHelper {
    pub env: TestEnvironment,
    pub state_repo: Arc<StateRepository>,
    pub settings_repo: SettingsRepository,
}

impl TestHelper {
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let state_repo = Arc::new(StateRepository::new(env.connection.clone()));
        let settings_repo = SettingsRepository::new(env.connection.clone());
        Ok(Self {
            env,
            state_repo,
            settings_repo,
        })
    }
}
