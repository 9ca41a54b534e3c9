//! The user's favorited books.
//!
//! [`FavoritesSet`] keeps full book records keyed by identifier, in insertion
//! order. Full records are kept (not just ids) so that favorites stay
//! renderable without the catalog or the search page they were picked from.

use super::book::Book;

/// Ordered set of favorited books, unique by identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesSet {
    books: Vec<Book>,
}

impl FavoritesSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a list, dropping later duplicates of an identifier.
    #[must_use]
    pub fn from_books(books: Vec<Book>) -> Self {
        let mut books = books;
        super::book::dedup_by_id(&mut books);
        Self { books }
    }

    /// Flips membership of `book`.
    ///
    /// Removes the entry with the same identifier when present, otherwise
    /// appends the full record. Returns `true` when the book is a favorite
    /// after the call.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::domain::{Book, BookInfo, FavoritesSet};
    ///
    /// let mut favorites = FavoritesSet::new();
    /// let book = Book::new("42", BookInfo::default());
    /// assert!(favorites.toggle(&book));
    /// assert!(!favorites.toggle(&book));
    /// assert!(favorites.is_empty());
    /// ```
    pub fn toggle(&mut self, book: &Book) -> bool {
        if let Some(position) = self.books.iter().position(|b| b.id == book.id) {
            self.books.remove(position);
            false
        } else {
            self.books.push(book.clone());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.books.iter().any(|b| b.id == id)
    }

    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
