//! Request and response types exchanged with the remote search service.

use crate::domain::Book;
use std::collections::BTreeMap;

/// Context key carrying the request sequence number through the host.
const SEQ_CONTEXT_KEY: &str = "request_seq";

/// One page request issued by the controller.
///
/// `term` already contains any field-restriction prefix. `seq` identifies the
/// request so a late response can be recognised as stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub seq: u64,
    pub term: String,
    pub offset: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Context map attached to the host HTTP call and echoed back with the result.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(SEQ_CONTEXT_KEY.to_string(), self.seq.to_string());
        context
    }

    /// Recovers the sequence number from an echoed context map.
    #[must_use]
    pub fn seq_from_context(context: &BTreeMap<String, String>) -> Option<u64> {
        context.get(SEQ_CONTEXT_KEY)?.parse().ok()
    }
}

/// A decoded page of results plus the provider's total-count estimate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub books: Vec<Book>,
    pub total_count: usize,
}

/// Outcome of a page request: a page, or a human-readable failure.
pub type PageOutcome = std::result::Result<SearchPage, String>;
