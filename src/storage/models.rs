//! Persisted record shapes and preference keys.
//!
//! Favorites are stored as a JSON array of reduced book records: only the
//! fields needed to render a favorite card survive (identifier, title,
//! authors, thumbnail, rating, publication date, description). Decoding is
//! forgiving: anything that is not a well-formed array of records
//! reads as "no favorites".

use crate::domain::error::{BookshelfError, Result};
use crate::domain::{Book, BookInfo};
use serde::{Deserialize, Serialize};

/// Preference key holding the serialized favorites array.
pub const FAVORITES_KEY: &str = "bookFavorites";

/// Preference key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "bookLibraryTheme";

/// A favorite as written to the preference store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBook {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Book> for StoredBook {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.info.title.clone(),
            authors: book.info.authors.clone(),
            thumbnail: book.info.thumbnail.clone(),
            rating: book.info.rating,
            published_date: book.info.published_date.clone(),
            description: book.info.description.clone(),
        }
    }
}

impl From<StoredBook> for Book {
    fn from(stored: StoredBook) -> Self {
        Self::new(
            stored.id,
            BookInfo {
                title: stored.title,
                authors: stored.authors,
                thumbnail: stored.thumbnail,
                rating: stored.rating,
                published_date: stored.published_date,
                description: stored.description,
                ..Default::default()
            },
        )
    }
}

/// Serializes favorites for the preference store.
///
/// # Errors
///
/// Returns an error if JSON serialization fails (non-finite ratings).
pub fn encode_favorites(books: &[Book]) -> Result<String> {
    let records: Vec<StoredBook> = books.iter().map(StoredBook::from).collect();
    serde_json::to_string(&records)
        .map_err(|e| BookshelfError::Storage(format!("failed to serialize favorites: {e}")))
}

/// Reads favorites from a raw stored value.
///
/// `None`, invalid JSON, a non-array value, or an array containing anything
/// that is not a book record all yield an empty list.
///
/// # Examples
///
/// ```
/// use bookshelf::storage::models::decode_favorites;
///
/// assert!(decode_favorites(Some("not json")).is_empty());
/// assert!(decode_favorites(Some("{\"id\":\"1\"}")).is_empty());
/// assert_eq!(decode_favorites(Some("[{\"id\":\"1\"}]")).len(), 1);
/// ```
#[must_use]
pub fn decode_favorites(raw: Option<&str>) -> Vec<Book> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<StoredBook>>(raw) {
        Ok(records) => records.into_iter().map(Book::from).collect(),
        Err(e) => {
            tracing::debug!(error = %e, "stored favorites unreadable, starting empty");
            Vec::new()
        }
    }
}

/// Interprets the stored theme flag; only the exact value `"dark"` is dark.
#[must_use]
pub fn decode_dark_mode(raw: Option<&str>) -> bool {
    raw == Some("dark")
}

/// The stored representation of the theme flag.
#[must_use]
pub const fn encode_dark_mode(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}
