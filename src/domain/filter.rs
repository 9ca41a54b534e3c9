//! Search field filter and its mapping onto the provider's query syntax.

use serde::{Deserialize, Serialize};

/// Which metadata field a free-text search is restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchFilter {
    /// Unrestricted full-text search.
    #[default]
    All,
    /// Restrict matches to the title field.
    Title,
    /// Restrict matches to the author field.
    Author,
}

impl SearchFilter {
    /// Builds the provider search term for an already trimmed query.
    ///
    /// Pure function: `Title` prefixes `intitle:`, `Author` prefixes
    /// `inauthor:`, `All` passes the query through.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::domain::SearchFilter;
    ///
    /// assert_eq!(SearchFilter::Author.to_term("tolkien"), "inauthor:tolkien");
    /// assert_eq!(SearchFilter::All.to_term("dune"), "dune");
    /// ```
    #[must_use]
    pub fn to_term(self, query: &str) -> String {
        match self {
            Self::All => query.to_string(),
            Self::Title => format!("intitle:{query}"),
            Self::Author => format!("inauthor:{query}"),
        }
    }

    /// The next filter in `All → Title → Author → All` order.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::All => Self::Title,
            Self::Title => Self::Author,
            Self::Author => Self::All,
        }
    }

    /// Label shown in the search bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Fields",
            Self::Title => "Title",
            Self::Author => "Author",
        }
    }
}
