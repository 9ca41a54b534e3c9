//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait: a string key-value store with
//! best-effort writes. The plugin only ever uses two keys (see
//! [`crate::storage::models`]), and callers treat every read failure as "absent".

use crate::domain::error::Result;

/// Abstraction over persistent key-value backends.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use bookshelf::storage::{JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let mut storage = JsonStorage::new(PathBuf::from("/tmp/preferences.json"))?;
/// storage.set("bookLibraryTheme", "dark")?;
/// assert_eq!(storage.get("bookLibraryTheme").as_deref(), Some("dark"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Storage: Send {
    /// Returns the stored value for `key`, or `None` if absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written to the backing medium.
    /// The in-memory copy is updated even when the write fails.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
