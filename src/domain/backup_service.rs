//! # Backup Service
//!
//! Full-state JSON backup: export a snapshot, restore by overwrite, or
//! restore by merging a snapshot into the current state.
//!
//! Restores accept the raw text of an uploaded file. Unparsable JSON is
//! rejected with [`BackupError::InvalidFile`] before anything is touched —
//! silently coercing a bad file and then overwriting state with it would
//! be destructive. Structurally malformed but parsable backups go through
//! the Migrator like any other legacy shape.
//!
//! Merge is append-only: a deck whose id collides with one already present
//! gets a fresh id for itself and every contained card (card ids only
//! guard against same-session collisions, they are not stable across
//! imports), then is appended. Decks are never combined and cards never
//! deduplicated, so re-importing the same backup accumulates duplicate
//! decks — accepted behavior, same as the original app.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use serde_json::Value;
use thiserror::Error;

use super::migration::migrate;
use super::models::{AppState, Card, Deck};
use crate::storage::traits::StateStorage;

/// Failure surface of a restore. Everything else about restoring is
/// repair-don't-reject and cannot fail.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("invalid backup file: {0}")]
    InvalidFile(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// An exported backup: the file contents plus a suggested filename.
#[derive(Debug, Clone)]
pub struct BackupSnapshot {
    pub filename: String,
    pub data: AppState,
}

impl BackupSnapshot {
    /// Serialize the snapshot the way the download writes it.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }
}

/// Take a deep, normalized copy of `state` for download. The copy is
/// independent of the live state: mutating the app afterwards cannot
/// retroactively alter an already-produced snapshot.
pub fn export_snapshot(state: &AppState) -> BackupSnapshot {
    let mut data = state.clone();
    data.fix_active_deck();
    data.version = crate::domain::models::CURRENT_SCHEMA_VERSION;

    let filename = format!("study_with_me_backup_{}.json", Utc::now().format("%Y-%m-%d"));
    BackupSnapshot { filename, data }
}

/// Replace state wholesale with a migrated copy of the imported value.
/// Destructive; the UI obtains explicit confirmation before calling this.
pub fn restore_overwrite(imported: Value) -> AppState {
    migrate(imported)
}

/// Append the imported snapshot's decks to `current`, re-identifying any
/// deck (and its whole card subtree) whose id collides with a deck already
/// present, in imported order. Returns a new state; neither input is
/// mutated.
pub fn restore_merge(current: &AppState, imported: Value) -> AppState {
    let mut merged = current.clone();
    let incoming = migrate(imported);

    let mut seen_ids: HashSet<String> = merged.decks.iter().map(|d| d.id.clone()).collect();
    for mut deck in incoming.decks {
        if seen_ids.contains(&deck.id) {
            reassign_deck_ids(&mut deck);
        }
        seen_ids.insert(deck.id.clone());
        merged.decks.push(deck);
    }

    // Keep the current selection when it still resolves; otherwise fall
    // back to the first deck post-merge.
    merged.fix_active_deck();
    merged.version = crate::domain::models::CURRENT_SCHEMA_VERSION;
    merged
}

/// Give a deck and every card it contains fresh ids.
fn reassign_deck_ids(deck: &mut Deck) {
    deck.id = Deck::generate_id();
    for card in &mut deck.cards {
        card.id = Card::generate_id();
    }
}

/// Storage-aware wrapper around the pure backup operations: reads the
/// current state from the store and persists restore results through it.
#[derive(Clone)]
pub struct BackupService<S: StateStorage> {
    storage: Arc<S>,
}

impl<S: StateStorage> BackupService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Export the persisted state (or an empty state when nothing has
    /// been persisted yet).
    pub fn export_snapshot(&self) -> BackupSnapshot {
        let state = self.storage.load().unwrap_or_else(AppState::empty);
        let snapshot = export_snapshot(&state);
        info!("📦 BACKUP: Exported snapshot '{}' with {} decks", snapshot.filename, snapshot.data.decks.len());
        snapshot
    }

    /// Parse uploaded backup text and replace the persisted state with it.
    pub fn restore_overwrite(&self, json_text: &str) -> Result<AppState, BackupError> {
        let imported = parse_backup_text(json_text)?;
        let state = restore_overwrite(imported);
        self.storage.save(&state).map_err(BackupError::Storage)?;
        info!("📦 BACKUP: Restored by overwrite, {} decks", state.decks.len());
        Ok(state)
    }

    /// Parse uploaded backup text and merge it into the persisted state.
    pub fn restore_merge(&self, json_text: &str) -> Result<AppState, BackupError> {
        let imported = parse_backup_text(json_text)?;
        let current = self.storage.load().unwrap_or_else(AppState::empty);
        let state = restore_merge(&current, imported);
        self.storage.save(&state).map_err(BackupError::Storage)?;
        info!(
            "📦 BACKUP: Restored by merge, {} -> {} decks",
            current.decks.len(),
            state.decks.len()
        );
        Ok(state)
    }
}

fn parse_backup_text(json_text: &str) -> Result<Value, BackupError> {
    serde_json::from_str::<Value>(json_text).map_err(|e| {
        warn!("📦 BACKUP: Rejected upload that is not valid JSON: {}", e);
        BackupError::InvalidFile(e)
    })
}
