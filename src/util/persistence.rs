use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;
use tracing::{debug, warn};

use crate::domain::app_state::PersistedState;

pub const APP_QUALIFIER: &str = "com";
pub const APP_ORG: &str = "RentalDesk";
pub const APP_NAME: &str = "RentalDesk";

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

fn data_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("state.json"))
}

/// Loads UI state saved by a previous run. Missing or unreadable files yield defaults.
pub fn load_persisted_state() -> PersistedState {
    let Some(path) = data_file() else {
        return PersistedState::default();
    };
    load_from(&path).unwrap_or_default()
}

pub fn save_persisted_state(state: &PersistedState) -> Result<(), PersistSaveError> {
    let path = data_file().ok_or(PersistSaveError::StorageUnavailable)?;
    save_to(&path, state)
}

/// Saves and logs instead of failing; UI handlers have nowhere to send the error.
pub fn persist_or_warn(state: &PersistedState) {
    if let Err(err) = save_persisted_state(state) {
        warn!(%err, "failed to save UI state");
    }
}

fn load_from(path: &Path) -> Option<PersistedState> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to read saved UI state");
            return None;
        }
    };
    match serde_json::from_str(&data) {
        Ok(state) => {
            debug!(path = %path.display(), "loaded saved UI state");
            Some(state)
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "saved UI state is corrupt; using defaults");
            None
        }
    }
}

fn save_to(path: &Path, state: &PersistedState) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransportSelection;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let mut state = PersistedState {
            orders_page_size: 50,
            orders_sort: "number".to_string(),
            ..Default::default()
        };
        state
            .selection_drafts
            .insert("o-1".to_string(), vec![TransportSelection::new("van", 2)]);

        save_to(&path, &state).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.orders_page_size, 50);
        assert_eq!(loaded.selection_drafts["o-1"][0].count, 2);
    }

    #[test]
    fn test_corrupt_or_missing_file_yields_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corrupt.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_from(&path).is_none());

        assert!(load_from(&dir.path().join("missing.json")).is_none());
    }
}
