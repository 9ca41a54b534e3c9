//! Domain layer for the Bookshelf plugin.
//!
//! Core types and pure rules, independent of Zellij APIs and of the remote
//! search service.
//!
//! # Organization
//!
//! - [`book`]: Book record and display helpers
//! - [`catalog`]: Built-in featured catalog
//! - [`error`]: Error types and result alias
//! - [`favorites`]: Favorited books keyed by identifier
//! - [`filter`]: Search field filter and query-term mapping
//! - [`pagination`]: Page math and the page-number bar

pub mod book;
pub mod catalog;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod pagination;

pub use book::{Book, BookInfo};
pub use catalog::Catalog;
pub use error::{BookshelfError, Result};
pub use favorites::FavoritesSet;
pub use filter::SearchFilter;
pub use pagination::PageMarker;
