use super::save_data::SaveData;
use crate::core::constants::{DATA_DIR_NAME, DATA_FILE_NAME};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save data must be a JSON object")]
    NotAnObject,
    #[error("could not determine home directory")]
    NoHomeDir,
}

/// `~/.shanhai`, not created.
pub fn data_dir() -> Result<PathBuf, SaveError> {
    let home = dirs::home_dir().ok_or(SaveError::NoHomeDir)?;
    Ok(home.join(DATA_DIR_NAME))
}

pub fn default_save_path() -> Result<PathBuf, SaveError> {
    Ok(data_dir()?.join(DATA_FILE_NAME))
}

/// Load the save at `path`. A missing, unreadable or corrupt file yields
/// defaults; problems other than a missing file are logged.
pub fn load_or_default(path: &Path) -> SaveData {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no save file, starting fresh");
            return SaveData::default();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read save file");
            return SaveData::default();
        }
    };
    match SaveData::from_json(&json) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt save file, using defaults");
            SaveData::default()
        }
    }
}

/// Write `data` as pretty JSON, creating parent directories as needed.
pub fn save(path: &Path, data: &SaveData) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data.to_json()?)?;
    tracing::debug!(path = %path.display(), "save written");
    Ok(())
}
