//! Error types for the Bookshelf plugin.
//!
//! This module defines the centralized error type [`BookshelfError`] and a type alias
//! [`Result`] used throughout the plugin. None of these errors is fatal: the
//! controller turns gateway failures into a displayed message and persistence
//! failures into log lines.

use thiserror::Error;

/// The main error type for Bookshelf plugin operations.
///
/// # Examples
///
/// ```
/// use bookshelf::BookshelfError;
///
/// let err = BookshelfError::Gateway("status 503".to_string());
/// assert_eq!(err.to_string(), "Gateway error: status 503");
/// ```
#[derive(Debug, Error)]
pub enum BookshelfError {
    /// Reading or writing the preference store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// A configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote search service returned a failure or an undecodable body.
    ///
    /// Network failures and non-success status codes both land here; the
    /// controller does not tell them apart.
    #[error("Gateway error: {0}")]
    Gateway(String),
}

/// A specialized `Result` type for Bookshelf operations.
pub type Result<T> = std::result::Result<T, BookshelfError>;
