//! View and input mode types.
//!
//! Exactly one [`View`] is active at a time and decides which collection the
//! table shows and how pagination is computed. [`InputMode`] decides how key
//! presses are interpreted.

/// Which collection is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The fixed featured catalog, paginated locally.
    #[default]
    Catalog,

    /// Remote search results; one page at a time is held in memory.
    ///
    /// Only reachable through a search, never by switching views directly.
    Search,

    /// The user's favorites, paginated locally in insertion order.
    Favorites,
}

impl View {
    /// Heading shown above the book table.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Catalog => "Popular Books",
            Self::Search => "Search Results",
            Self::Favorites => "Favorites",
        }
    }
}

/// How key presses are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and commands.
    #[default]
    Normal,

    /// Editing the search draft; characters go into the query.
    Typing,
}
