//! JSON file-based storage backend.
//!
//! Keeps every key in a single human-readable JSON document and rewrites it on
//! each `set` via write-to-temp + rename, so a crash never leaves a half-written
//! file behind. A missing or corrupt file is treated as an empty store.

use crate::domain::error::{BookshelfError, Result};
use crate::storage::backend::Storage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// On-disk container.
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "bookLibraryTheme": "dark",
///     "bookFavorites": "[{\"id\":\"4\",\"title\":\"The Hobbit\"}]"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// The whole store lives in memory; every `set` persists it. Designed for
/// single-threaded use from the worker thread.
pub struct JsonStorage {
    file_path: PathBuf,
    data: StorageData,
}

impl JsonStorage {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// An unreadable or unparsable file is logged and replaced by an empty
    /// store on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error only if the parent directory cannot be created.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, path = ?file_path, "discarding unreadable storage file");
                StorageData::default()
            })
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(entry_count = data.entries.len(), "storage initialized");

        Ok(Self { file_path, data })
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| BookshelfError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version != FORMAT_VERSION {
            tracing::debug!(version = data.version, "loading storage written by another format version");
        }

        Ok(data)
    }

    /// Writes the store to a temporary sibling file, then renames it into place.
    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| BookshelfError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::trace!(path = ?self.file_path, "storage saved");
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn get(&self, key: &str) -> Option<String> {
        let value = self.data.entries.get(key).cloned();
        tracing::debug!(key = %key, found = value.is_some(), "storage lookup");
        value
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set", key = %key, value_len = value.len()).entered();

        self.data.entries.insert(key.to_string(), value.to_string());
        self.save_to_file()
    }
}
