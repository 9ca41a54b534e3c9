//! Storage layer for persistent preferences.
//!
//! A small key-value store holding the user's favorites and theme flag. All
//! access happens on the worker thread; the main thread only ever sees raw
//! string values delivered in worker responses.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction
//! - `json`: JSON file-based implementation
//! - `models`: Persisted record shapes, keys, and tolerant decoding

pub mod backend;
pub mod json;
pub mod models;

pub use backend::Storage;
pub use json::JsonStorage;
pub use models::{StoredBook, FAVORITES_KEY, THEME_KEY};
