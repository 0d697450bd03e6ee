//! Loads exported account snapshots and serves them through the same
//! store-backed path the dashboard uses.

use std::{fs, path::Path};

use cashflow_config::ProjectionConfig;
use cashflow_core::{Dashboard, DashboardService, MemoryStore, ProjectionSettings, SystemClock};
use cashflow_domain::AccountRecord;
use tracing::info;
use uuid::Uuid;

use crate::errors::CliError;

/// Reads a JSON array of account rows, each with nested movements.
pub fn read_snapshot(path: &Path) -> Result<Vec<AccountRecord>, CliError> {
    let data = fs::read_to_string(path).map_err(|source| CliError::SnapshotIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| CliError::SnapshotFormat {
        path: path.to_path_buf(),
        source,
    })
}

pub fn projection_settings(config: &ProjectionConfig) -> ProjectionSettings {
    ProjectionSettings {
        max_recurrence_steps: config.max_recurrence_steps,
        projected_occurrences: config.projected_occurrences,
    }
}

/// Seeds an in-process store with the snapshot and loads it back.
pub fn open_dashboard(path: &Path, config: &ProjectionConfig) -> Result<Dashboard, CliError> {
    let records = read_snapshot(path)?;
    let owner = Uuid::new_v4();
    info!(path = %path.display(), accounts = records.len(), "snapshot loaded");
    let store = MemoryStore::seeded(owner, records, SystemClock);
    Ok(DashboardService::load(&store, owner, projection_settings(config))?)
}
