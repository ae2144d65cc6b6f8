//! File-backed token store.
//!
//! The file holds one JSON object, `{"<key>": "<token>"}`, mirroring a
//! single local-storage entry. Other keys in the file are preserved.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use quarry_core::config::SessionConfig;
use quarry_core::{AccessToken, AppError, AppResult};

use super::store::TokenStore;

/// Persists the bearer token in a JSON file.
#[derive(Debug)]
pub struct FileTokenStore {
    /// Location of the JSON file.
    path: PathBuf,
    /// Key of the token entry.
    key: String,
    /// Serializes read-modify-write cycles within the process.
    lock: Mutex<()>,
}

impl FileTokenStore {
    /// Creates a store at `path` using `key` for the token entry.
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
            lock: Mutex::new(()),
        }
    }

    /// Creates a store from the session configuration.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(&config.token_file, &config.token_key)
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> AppResult<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(AppError::with_source(
                    quarry_core::ErrorKind::Storage,
                    format!("Failed to read token file '{}'", self.path.display()),
                    e,
                ));
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "Token file is not a JSON object; ignoring it");
                Ok(Map::new())
            }
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> AppResult<()> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            };
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Readers never observe a partially written file.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> AppResult<Option<AccessToken>> {
        let _guard = self.lock.lock();
        let entries = self.read_entries()?;

        match entries.get(&self.key) {
            Some(Value::String(raw)) => match AccessToken::new(raw.clone()) {
                Ok(token) => Ok(Some(token)),
                Err(_) => {
                    debug!(path = %self.path.display(), "Persisted token is blank");
                    Ok(None)
                }
            },
            _ => Ok(None),
        }
    }

    fn save(&self, token: &AccessToken) -> AppResult<()> {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries()?;
        entries.insert(self.key.clone(), Value::String(token.expose().to_string()));
        self.write_entries(&entries)
    }

    fn clear(&self) -> AppResult<()> {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries()?;
        if entries.remove(&self.key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}
