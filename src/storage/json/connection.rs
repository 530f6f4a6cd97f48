use anyhow::Result;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Storage key of the persisted app state, carried over from the original
/// app (the `v2` suffix is the schema generation, not a file revision).
const STATE_FILE_NAME: &str = "swm_flashcards_v2.json";

/// Storage key of the theme preference.
const THEME_FILE_NAME: &str = "swm_theme_v1";

/// Handle to the data directory all repositories write under.
///
/// Cheap to clone; repositories each hold their own copy.
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Open a connection rooted at `base_directory`, creating the
    /// directory if needed.
    pub fn new(base_directory: &Path) -> Result<Self> {
        if !base_directory.exists() {
            fs::create_dir_all(base_directory)?;
            info!("Created data directory: {:?}", base_directory);
        }
        Ok(Self {
            base_directory: base_directory.to_path_buf(),
        })
    }

    /// Open a connection under the platform data directory
    /// (e.g. `~/.local/share/study-with-me` on Linux).
    pub fn with_default_directory() -> Result<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine platform data directory"))?
            .join("study-with-me");
        Self::new(&base)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn state_file_path(&self) -> PathBuf {
        self.base_directory.join(STATE_FILE_NAME)
    }

    pub fn theme_file_path(&self) -> PathBuf {
        self.base_directory.join(THEME_FILE_NAME)
    }

    /// Write a file atomically: write to a sibling temp file, then rename
    /// over the target, so a crash mid-write never leaves a half-written
    /// state behind.
    pub fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, path)?;
        debug!("Wrote {} bytes to {:?}", contents.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested = temp_dir.path().join("a").join("b");
        let connection = JsonConnection::new(&nested).unwrap();

        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested.as_path());
    }

    #[test]
    fn test_file_paths_live_under_base_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = JsonConnection::new(temp_dir.path()).unwrap();

        assert_eq!(
            connection.state_file_path(),
            temp_dir.path().join("swm_flashcards_v2.json")
        );
        assert_eq!(connection.theme_file_path(), temp_dir.path().join("swm_theme_v1"));
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let target = connection.state_file_path();

        connection.write_atomic(&target, "{}").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "{}");
        assert!(!target.with_extension("tmp").exists());
    }
}
