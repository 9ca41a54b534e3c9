//! Book domain model.
//!
//! A [`Book`] is the unit the controller pages over, favorites, and hands to
//! the presentation layer. Books come from two places: the built-in catalog and
//! the remote search service. Both produce the same record shape so that a
//! favorited book stays renderable after its source view has moved on.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single book: a stable identifier plus optional metadata.
///
/// The identifier is the only key used for favorite membership and list
/// rendering. Two books with the same `id` are the same book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Provider- or catalog-assigned identifier.
    pub id: String,
    /// Descriptive metadata, every field optional.
    pub info: BookInfo,
}

/// Metadata attached to a [`Book`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookInfo {
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    /// Cover image URL.
    pub thumbnail: Option<String>,
    /// Average rating on a 0-5 scale.
    pub rating: Option<f64>,
    /// ISO-like publication date (`1960`, `1960-07`, or `1960-07-11`).
    pub published_date: Option<String>,
    /// Plain text or HTML description.
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<u32>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Book {
    /// Creates a book with the given identifier and metadata.
    #[must_use]
    pub fn new(id: impl Into<String>, info: BookInfo) -> Self {
        Self {
            id: id.into(),
            info,
        }
    }

    /// Title for display, `"Untitled"` when the provider sent none.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.info
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Untitled")
    }

    /// Comma-separated author list, `"Unknown author"` when empty.
    #[must_use]
    pub fn author_line(&self) -> String {
        if self.info.authors.is_empty() {
            "Unknown author".to_string()
        } else {
            self.info.authors.join(", ")
        }
    }

    /// Publication year, the only part of the date that is displayed.
    ///
    /// Full dates go through `chrono`; partial dates (`"1960"`, `"1960-07"`)
    /// fall back to their leading four digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::domain::{Book, BookInfo};
    ///
    /// let book = Book::new("x", BookInfo {
    ///     published_date: Some("1937-09-21".to_string()),
    ///     ..Default::default()
    /// });
    /// assert_eq!(book.published_year(), Some(1937));
    /// ```
    #[must_use]
    pub fn published_year(&self) -> Option<i32> {
        let raw = self.info.published_date.as_deref()?.trim();

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date.year());
        }

        let digits: String = raw.chars().take_while(char::is_ascii_digit).collect();
        if digits.len() == 4 {
            digits.parse().ok()
        } else {
            None
        }
    }

    /// Cover URL with `http:` upgraded to `https:`.
    #[must_use]
    pub fn secure_thumbnail(&self) -> Option<String> {
        self.info.thumbnail.as_ref().map(|url| {
            url.strip_prefix("http:")
                .map_or_else(|| url.clone(), |rest| format!("https:{rest}"))
        })
    }

    /// Description with HTML tags removed and whitespace collapsed.
    ///
    /// The provider sends descriptions with inline markup (`<p>`, `<b>`,
    /// `<br>`); the terminal shows plain text.
    #[must_use]
    pub fn plain_description(&self) -> Option<String> {
        let raw = self.info.description.as_deref()?;

        let mut text = String::with_capacity(raw.len());
        let mut in_tag = false;
        let mut chars = raw.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '<' if !in_tag && chars.peek().is_some_and(|&n| n.is_ascii_alphabetic() || n == '/' || n == '!') => {
                    in_tag = true;
                    text.push(' ');
                }
                '>' if in_tag => in_tag = false,
                _ if !in_tag => text.push(c),
                _ => {}
            }
        }

        // `&amp;` goes last so an escaped entity is decoded only once.
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let decoded = collapsed
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&");

        if decoded.is_empty() {
            None
        } else {
            Some(decoded)
        }
    }
}

/// Removes later duplicates of the same identifier, keeping the first.
pub fn dedup_by_id(books: &mut Vec<Book>) {
    let mut seen = std::collections::HashSet::new();
    books.retain(|book| seen.insert(book.id.clone()));
}
