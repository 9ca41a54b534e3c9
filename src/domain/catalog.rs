//! Built-in featured catalog.
//!
//! The catalog is the default view's data source: a fixed, ordered list of
//! books shown whenever no search is active. It is built once at startup and
//! never mutated.

use super::book::{Book, BookInfo};

/// Immutable ordered sequence of featured books.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Wraps an arbitrary list of books.
    #[must_use]
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// The featured list shipped with the plugin.
    #[must_use]
    pub fn featured() -> Self {
        let entry = |id: &str,
                     title: &str,
                     author: &str,
                     cover_id: u32,
                     rating: f64,
                     published: &str,
                     description: &str| {
            Book::new(
                id,
                BookInfo {
                    title: Some(title.to_string()),
                    authors: vec![author.to_string()],
                    thumbnail: Some(format!(
                        "https://covers.openlibrary.org/b/id/{cover_id}-L.jpg"
                    )),
                    rating: Some(rating),
                    published_date: Some(published.to_string()),
                    description: Some(description.to_string()),
                    ..Default::default()
                },
            )
        };

        Self::new(vec![
            entry(
                "1",
                "To Kill a Mockingbird",
                "Harper Lee",
                8_259_447,
                4.8,
                "1960-07-11",
                "A gripping tale of racial injustice and childhood innocence in the American South.",
            ),
            entry(
                "2",
                "The Alchemist",
                "Paulo Coelho",
                8_905_826,
                4.7,
                "1988-04-25",
                "A mystical story of a shepherd boy's journey to find his Personal Legend.",
            ),
            entry(
                "3",
                "The Little Prince",
                "Antoine de Saint-Exupéry",
                8_262_993,
                4.9,
                "1943-04-06",
                "A poetic tale about a young prince who visits various planets in space.",
            ),
            entry(
                "4",
                "The Hobbit",
                "J.R.R. Tolkien",
                6_979_865,
                4.8,
                "1937-09-21",
                "A fantasy novel about Bilbo Baggins and his unexpected journey.",
            ),
            entry(
                "5",
                "The Da Vinci Code",
                "Dan Brown",
                4_431_526,
                4.2,
                "2003-03-18",
                "A mystery thriller that explores secrets hidden in Leonardo da Vinci's works.",
            ),
            entry(
                "6",
                "The Hunger Games",
                "Suzanne Collins",
                7_336_975,
                4.5,
                "2008-09-14",
                "A dystopian novel about a televised battle where only one survivor remains.",
            ),
        ])
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

impl Default for Catalog {
    fn default() -> Self {
        Self::featured()
    }
}
