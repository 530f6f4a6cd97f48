//! Domain layer: models, commands, and the services that implement the
//! app's storage-facing operations.

pub mod backup_service;
pub mod card_service;
pub mod commands;
pub mod csv_service;
pub mod deck_service;
pub mod migration;
pub mod models;
pub mod tags;
