//! Google Books `volumes` endpoint: URL construction and response decoding.
//!
//! The transport itself belongs to the host (`web_request` in the plugin
//! shim); this module only turns a [`PageRequest`] into a URL and an HTTP
//! status plus body into a [`SearchPage`].

use super::request::{PageRequest, SearchPage};
use crate::domain::book::dedup_by_id;
use crate::domain::error::{BookshelfError, Result};
use crate::domain::{Book, BookInfo};
use serde::Deserialize;
use url::Url;

/// Public endpoint used when no `api_url` is configured.
pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Builds request URLs and decodes responses for a volumes endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleBooksGateway {
    endpoint: Url,
}

impl Default for GoogleBooksGateway {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL).unwrap_or_else(|_| unreachable!("default endpoint is a valid URL"))
    }
}

impl GoogleBooksGateway {
    /// Creates a gateway for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::Config`] if `endpoint` is not an absolute
    /// http(s) URL.
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| BookshelfError::Config(format!("invalid api_url {endpoint:?}: {e}")))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(BookshelfError::Config(format!(
                "api_url must be http or https, got {}",
                endpoint.scheme()
            )));
        }

        Ok(Self { endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Full request URL for one page.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::gateway::{GoogleBooksGateway, PageRequest};
    ///
    /// let gateway = GoogleBooksGateway::default();
    /// let url = gateway.request_url(&PageRequest {
    ///     seq: 1,
    ///     term: "inauthor:tolkien".to_string(),
    ///     offset: 12,
    ///     limit: 12,
    /// });
    /// assert!(url.contains("q=inauthor%3Atolkien"));
    /// assert!(url.contains("startIndex=12"));
    /// ```
    #[must_use]
    pub fn request_url(&self, request: &PageRequest) -> String {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", &request.term)
            .append_pair("startIndex", &request.offset.to_string())
            .append_pair("maxResults", &request.limit.to_string())
            .append_pair("orderBy", "relevance");
        url.into()
    }

    /// Decodes an HTTP response into a page of books.
    ///
    /// Missing `items` means an empty page and missing `totalItems` means
    /// zero. Duplicate identifiers within the page are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::Gateway`] for non-2xx statuses and bodies that
    /// are not a volumes response.
    pub fn decode_response(status: u16, body: &[u8]) -> Result<SearchPage> {
        if !(200..300).contains(&status) {
            return Err(BookshelfError::Gateway(format!("status {status}")));
        }

        let response: VolumesResponse = serde_json::from_slice(body)
            .map_err(|e| BookshelfError::Gateway(format!("unexpected response body: {e}")))?;

        let mut books: Vec<Book> = response
            .items
            .unwrap_or_default()
            .into_iter()
            .map(Book::from)
            .collect();
        dedup_by_id(&mut books);

        Ok(SearchPage {
            books,
            total_count: response.total_items.unwrap_or(0),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    total_items: Option<usize>,
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    id: String,
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    image_links: Option<ImageLinks>,
    average_rating: Option<f64>,
    published_date: Option<String>,
    description: Option<String>,
    publisher: Option<String>,
    page_count: Option<u32>,
    #[serde(default)]
    categories: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

impl From<Volume> for Book {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;
        let thumbnail = info
            .image_links
            .and_then(|links| links.thumbnail.or(links.small_thumbnail));

        Self::new(
            volume.id,
            BookInfo {
                title: info.title,
                authors: info.authors,
                thumbnail,
                rating: info.average_rating,
                published_date: info.published_date,
                description: info.description,
                publisher: info.publisher,
                page_count: info.page_count,
                categories: info.categories,
            },
        )
    }
}
