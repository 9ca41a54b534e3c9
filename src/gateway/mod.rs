//! Remote book search.
//!
//! The plugin host performs the HTTP call; this layer owns everything around
//! it: the request shape, the URL, the sequence tag that travels in the host's
//! request context, and decoding of the volumes response.

pub mod google_books;
pub mod request;

pub use google_books::{GoogleBooksGateway, DEFAULT_API_URL};
pub use request::{PageOutcome, PageRequest, SearchPage};
