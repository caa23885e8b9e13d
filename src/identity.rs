// src/identity.rs

//! Durable client identity. A random id is generated on first run, written
//! under the app data dir, and reused forever after; the backend keys
//! progress records by it. The storage path is a parameter so tests (and
//! embedders with their own layout) can point it anywhere.

use crate::constants::{APP_DATA_DIR, USER_ID_FILE};
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Conventional id file location: `<platform data dir>/mathgrid/loja_user_id`.
pub fn default_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DATA_DIR).join(USER_ID_FILE))
}

/// Returns the stored user id, creating and persisting a fresh UUID v4 on
/// first use. The id never changes once written.
pub fn load_or_create(path: &Path) -> io::Result<String> {
    match fs::read_to_string(path) {
        Ok(existing) => {
            let existing = existing.trim();
            if !existing.is_empty() {
                return Ok(existing.to_string());
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let id = Uuid::new_v4().to_string();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &id)?;
    info!("[Identity] Created user id file at {}", path.display());
    Ok(id)
}
