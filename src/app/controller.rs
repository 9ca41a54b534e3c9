//! View and query transitions.
//!
//! Every operation that changes what is shown goes through here. Operations
//! that need the network return the [`PageRequest`] to issue; operations that
//! change preferences return the [`WorkerMessage`] that persists them. The
//! caller turns both into actions.

use super::modes::{InputMode, View};
use super::state::AppState;
use crate::domain::pagination::{page_offset, ITEMS_PER_PAGE, MAX_SEARCH_PAGE};
use crate::domain::{Book, FavoritesSet, SearchFilter};
use crate::gateway::{PageOutcome, PageRequest};
use crate::storage::models::{decode_dark_mode, decode_favorites, encode_dark_mode, encode_favorites};
use crate::storage::{FAVORITES_KEY, THEME_KEY};
use crate::worker::WorkerMessage;

/// Message shown when the search service fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch books";

/// Message shown for a page beyond what the provider will return.
#[must_use]
pub fn page_ceiling_message() -> String {
    format!("Only the first {MAX_SEARCH_PAGE} pages of results can be browsed")
}

impl AppState {
    /// Switches to the catalog or favorites view at page 1.
    ///
    /// The committed query and filter are left alone. `View::Search` cannot be
    /// entered this way; asking for it changes nothing.
    pub fn set_view(&mut self, target: View) {
        if target == View::Search {
            tracing::debug!("search view is only entered by searching");
            return;
        }

        tracing::debug!(from = ?self.view, to = ?target, "switching view");
        self.view = target;
        self.page = 1;
        self.loading = false;
        self.error = None;
        self.selected_index = 0;
        self.detail = None;
    }

    /// Starts a search for page 1, or clears the search when `query` is blank.
    pub fn search(&mut self, query: &str, filter: SearchFilter) -> Option<PageRequest> {
        let trimmed = query.trim();
        self.query = trimmed.to_string();
        self.filter = filter;

        if trimmed.is_empty() {
            tracing::debug!("blank query, returning to catalog");
            self.set_view(View::Catalog);
            return None;
        }

        tracing::debug!(query = %trimmed, filter = ?filter, "starting search");
        self.view = View::Search;
        self.total_count = 0;
        self.search_results.clear();
        self.detail = None;
        Some(self.issue_page_request(1))
    }

    /// Moves to `page` in the active view.
    ///
    /// Pages below 1 or past the last page are ignored. In the search view a
    /// page past the browsing ceiling sets an error and issues nothing.
    pub fn change_page(&mut self, page: usize) -> Option<PageRequest> {
        if page < 1 {
            return None;
        }

        let total_pages = self.total_pages();
        if page > total_pages {
            tracing::trace!(page, total_pages, "page out of range");
            return None;
        }

        if self.view == View::Search && page > MAX_SEARCH_PAGE {
            tracing::debug!(page, ceiling = MAX_SEARCH_PAGE, "page beyond search ceiling");
            self.error = Some(page_ceiling_message());
            return None;
        }

        match self.view {
            View::Catalog | View::Favorites => {
                self.page = page;
                self.selected_index = 0;
                self.detail = None;
                None
            }
            View::Search => Some(self.issue_page_request(page)),
        }
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        self.change_page(self.page + 1)
    }

    pub fn previous_page(&mut self) -> Option<PageRequest> {
        self.change_page(self.page.saturating_sub(1))
    }

    pub fn first_page(&mut self) -> Option<PageRequest> {
        self.change_page(1)
    }

    /// Jumps to the last page, or to the ceiling when the search has more.
    pub fn last_page(&mut self) -> Option<PageRequest> {
        let last = match self.view {
            View::Search => self.total_pages().min(MAX_SEARCH_PAGE),
            View::Catalog | View::Favorites => self.total_pages(),
        };
        self.change_page(last)
    }

    fn issue_page_request(&mut self, page: usize) -> PageRequest {
        self.latest_seq += 1;
        self.page = page;
        self.loading = true;
        self.error = None;
        self.selected_index = 0;

        let request = PageRequest {
            seq: self.latest_seq,
            term: self.filter.to_term(&self.query),
            offset: page_offset(page, ITEMS_PER_PAGE),
            limit: ITEMS_PER_PAGE,
        };
        tracing::debug!(seq = request.seq, term = %request.term, offset = request.offset, "issuing page request");
        request
    }

    /// Applies a search response. Returns `false` when it was stale and dropped.
    ///
    /// Only the response to the latest issued request may commit, and only
    /// while the search view is still active.
    pub fn commit_page(&mut self, seq: u64, outcome: PageOutcome) -> bool {
        if seq != self.latest_seq || self.view != View::Search {
            tracing::debug!(seq, latest = self.latest_seq, view = ?self.view, "discarding stale response");
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(page) => {
                tracing::debug!(
                    seq,
                    items = page.books.len(),
                    total_count = page.total_count,
                    "search page committed"
                );
                self.search_results = page.books;
                self.total_count = page.total_count;
                self.error = None;
            }
            Err(detail) => {
                tracing::warn!(seq, error = %detail, "search request failed");
                self.search_results.clear();
                self.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        self.clamp_selection();
        true
    }

    /// Adds or removes `book` and returns the write that persists the new set.
    ///
    /// Before stored preferences are applied the toggle is only recorded and
    /// no write is returned; [`AppState::apply_preferences`] replays it.
    pub fn toggle_favorite(&mut self, book: &Book) -> Option<WorkerMessage> {
        let now_favorite = self.favorites.toggle(book);
        tracing::debug!(book_id = %book.id, now_favorite, count = self.favorites.len(), "favorite toggled");

        if self.view == View::Favorites {
            let total_pages = self.total_pages();
            if self.page > total_pages {
                self.page = total_pages.max(1);
            }
            self.clamp_selection();
        }

        if !self.preferences_loaded {
            self.pending_favorite_toggles.push(book.clone());
            tracing::debug!(pending = self.pending_favorite_toggles.len(), "favorite write held until preferences load");
            return None;
        }

        self.favorites_write()
    }

    fn favorites_write(&self) -> Option<WorkerMessage> {
        match encode_favorites(self.favorites.books()) {
            Ok(json) => Some(WorkerMessage::save_preference(FAVORITES_KEY.to_string(), json)),
            Err(e) => {
                tracing::warn!(error = %e, "favorites not persisted");
                None
            }
        }
    }

    /// Toggles the favorite under the cursor, or the open detail's book.
    pub fn toggle_selected_favorite(&mut self) -> Option<WorkerMessage> {
        let book = self.detail.clone().or_else(|| self.selected_book().cloned())?;
        self.toggle_favorite(&book)
    }

    /// Flips dark mode and returns the write that persists it.
    pub fn toggle_theme(&mut self) -> WorkerMessage {
        self.dark_mode = !self.dark_mode;
        self.theme_changed = true;
        tracing::debug!(dark_mode = self.dark_mode, "theme toggled");
        WorkerMessage::save_preference(THEME_KEY.to_string(), encode_dark_mode(self.dark_mode).to_string())
    }

    /// Applies stored preferences once.
    ///
    /// Favorites toggled earlier in this session are replayed onto the stored
    /// set, and the merged set is returned as a write. A theme toggled earlier
    /// wins over the stored flag. Unreadable favorites load as an empty set.
    pub fn apply_preferences(&mut self, favorites: Option<&str>, theme: Option<&str>) -> Option<WorkerMessage> {
        if self.preferences_loaded {
            tracing::debug!("preferences already applied");
            return None;
        }
        self.preferences_loaded = true;

        let mut merged = FavoritesSet::from_books(decode_favorites(favorites));
        let pending = std::mem::take(&mut self.pending_favorite_toggles);
        for book in &pending {
            merged.toggle(book);
        }
        self.favorites = merged;

        if self.theme_changed {
            tracing::debug!("theme changed before load, keeping in-memory flag");
        } else {
            self.dark_mode = decode_dark_mode(theme);
        }

        if self.view == View::Favorites {
            let total_pages = self.total_pages();
            self.page = self.page.min(total_pages.max(1));
            self.clamp_selection();
        }

        tracing::debug!(
            favorites = self.favorites.len(),
            replayed = pending.len(),
            dark_mode = self.dark_mode,
            "preferences applied"
        );

        if pending.is_empty() {
            None
        } else {
            self.favorites_write()
        }
    }

    pub fn open_detail(&mut self) -> bool {
        let Some(book) = self.selected_book().cloned() else {
            return false;
        };
        tracing::debug!(book_id = %book.id, "opening details");
        self.detail = Some(book);
        true
    }

    pub fn close_detail(&mut self) -> bool {
        self.detail.take().is_some()
    }

    /// Enters typing mode with the committed query and filter as the draft.
    pub fn begin_typing(&mut self) {
        self.input_mode = InputMode::Typing;
        self.draft.clone_from(&self.query);
        self.draft_filter = self.filter;
    }

    pub fn cancel_typing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leaves typing mode and searches for the draft.
    pub fn submit_draft(&mut self) -> Option<PageRequest> {
        self.input_mode = InputMode::Normal;
        let draft = std::mem::take(&mut self.draft);
        self.search(&draft, self.draft_filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::total_pages;
    use crate::domain::BookInfo;
    use crate::gateway::SearchPage;
    use crate::ui::theme::ThemePair;

    fn state() -> AppState {
        AppState::new(ThemePair::default())
    }

    fn loaded_state() -> AppState {
        let mut state = state();
        state.apply_preferences(None, None);
        state
    }

    fn book(id: &str) -> Book {
        Book::new(
            id,
            BookInfo {
                title: Some(format!("Book {id}")),
                ..Default::default()
            },
        )
    }

    fn page_of(ids: &[&str], total_count: usize) -> SearchPage {
        SearchPage {
            books: ids.iter().map(|id| book(id)).collect(),
            total_count,
        }
    }

    fn ids(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_starts_on_catalog_page_one() {
        let state = state();
        assert_eq!(state.view, View::Catalog);
        assert_eq!(state.page, 1);
        assert_eq!(state.visible_books().len(), 6);
        assert_eq!(state.total_pages(), 1);
        assert!(state.page_markers().is_empty());
    }

    #[test]
    fn test_search_issues_first_page_request() {
        let mut state = state();
        let request = state.search("  tolkien ", SearchFilter::Author).unwrap();

        assert_eq!(request.term, "inauthor:tolkien");
        assert_eq!(request.offset, 0);
        assert_eq!(request.limit, ITEMS_PER_PAGE);
        assert_eq!(request.seq, state.latest_seq());
        assert_eq!(state.view, View::Search);
        assert!(state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_author_search_with_single_result() {
        let mut state = state();
        let request = state.search("tolkien", SearchFilter::Author).unwrap();

        assert!(state.commit_page(request.seq, Ok(page_of(&["itemA"], 1))));

        assert_eq!(state.view, View::Search);
        assert_eq!(ids(state.visible_books()), vec!["itemA"]);
        assert_eq!(state.total_pages(), 1);
        assert!(!state.loading);
    }

    #[test]
    fn test_blank_search_returns_to_catalog_from_any_view() {
        for query in ["", "   ", "\t\n"] {
            let mut state = state();
            let request = state.search("dune", SearchFilter::Title).unwrap();
            state.commit_page(request.seq, Ok(page_of(&["a", "b"], 40)));
            state.change_page(2);

            assert_eq!(state.search(query, SearchFilter::All), None);
            assert_eq!(state.view, View::Catalog);
            assert_eq!(state.page, 1);
            assert!(!state.loading);
            assert_eq!(state.visible_books(), state.catalog.books());

            let mut state = self::state();
            state.set_view(View::Favorites);
            assert_eq!(state.search(query, SearchFilter::Author), None);
            assert_eq!(state.view, View::Catalog);
            assert_eq!(state.visible_books(), state.catalog.books());
        }
    }

    #[test]
    fn test_search_then_first_page_is_idempotent() {
        let mut state = state();
        let first = state.search("dune", SearchFilter::All).unwrap();
        state.commit_page(first.seq, Ok(page_of(&["a", "b", "c"], 30)));
        let before_items = state.visible_books().to_vec();
        let before_pages = state.total_pages();

        let again = state.change_page(1).unwrap();
        assert_eq!(again.term, first.term);
        assert_eq!(again.offset, first.offset);
        state.commit_page(again.seq, Ok(page_of(&["a", "b", "c"], 30)));

        assert_eq!(state.visible_books(), &before_items[..]);
        assert_eq!(state.total_pages(), before_pages);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_change_page_out_of_range_is_noop() {
        let mut state = state();
        let request = state.search("dune", SearchFilter::All).unwrap();
        state.commit_page(request.seq, Ok(page_of(&["a"], 30)));
        let seq = state.latest_seq();

        for page in [0, 4, 50] {
            assert_eq!(state.change_page(page), None);
            assert_eq!(state.page, 1);
            assert_eq!(state.latest_seq(), seq);
            assert!(!state.loading);
            assert_eq!(state.error, None);
        }

        let mut catalog = self::state();
        assert_eq!(catalog.change_page(2), None);
        assert_eq!(catalog.change_page(0), None);
        assert_eq!(catalog.page, 1);
    }

    #[test]
    fn test_change_page_in_search_reuses_query_and_filter() {
        let mut state = state();
        let request = state.search("hobbit", SearchFilter::Title).unwrap();
        state.commit_page(request.seq, Ok(page_of(&["a"], 100)));

        let next = state.change_page(3).unwrap();
        assert_eq!(next.term, "intitle:hobbit");
        assert_eq!(next.offset, 24);
        assert_eq!(state.page, 3);
        assert!(state.loading);
        assert!(next.seq > request.seq);
    }

    #[test]
    fn test_page_ceiling_sets_error_without_request() {
        let mut state = state();
        let request = state.search("the", SearchFilter::All).unwrap();
        state.commit_page(request.seq, Ok(page_of(&["a"], 5000)));
        let seq = state.latest_seq();

        assert_eq!(state.change_page(101), None);

        assert_eq!(state.error.as_deref(), Some(page_ceiling_message().as_str()));
        assert_ne!(state.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(!state.loading);
        assert_eq!(state.latest_seq(), seq);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_ceiling_page_past_last_page_is_noop() {
        let mut state = state();
        let request = state.search("tolkien", SearchFilter::Author).unwrap();
        state.commit_page(request.seq, Ok(page_of(&["a"], 1)));
        let seq = state.latest_seq();

        assert_eq!(state.change_page(MAX_SEARCH_PAGE + 1), None);

        assert_eq!(state.error, None);
        assert_eq!(state.latest_seq(), seq);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_last_page_stops_at_ceiling() {
        let mut state = state();
        let request = state.search("the", SearchFilter::All).unwrap();
        state.commit_page(request.seq, Ok(page_of(&["a"], 5000)));

        let last = state.last_page().unwrap();
        assert_eq!(state.page, MAX_SEARCH_PAGE);
        assert_eq!(last.offset, (MAX_SEARCH_PAGE - 1) * ITEMS_PER_PAGE);
    }

    #[test]
    fn test_stale_page_response_does_not_overwrite_newer_search() {
        let mut state = state();
        let first = state.search("dune", SearchFilter::All).unwrap();
        state.commit_page(first.seq, Ok(page_of(&["d1"], 50)));
        let page_two = state.change_page(2).unwrap();

        let newer = state.search("emma", SearchFilter::All).unwrap();
        assert!(state.commit_page(newer.seq, Ok(page_of(&["e1", "e2"], 2))));

        assert!(!state.commit_page(page_two.seq, Ok(page_of(&["d13"], 50))));
        assert_eq!(ids(state.visible_books()), vec!["e1", "e2"]);
        assert_eq!(state.total_count, 2);
        assert_eq!(state.query, "emma");
    }

    #[test]
    fn test_stale_failure_is_ignored_too() {
        let mut state = state();
        let first = state.search("dune", SearchFilter::All).unwrap();
        let second = state.search("emma", SearchFilter::All).unwrap();

        assert!(!state.commit_page(first.seq, Err("timeout".to_string())));
        assert_eq!(state.error, None);
        assert!(state.loading);

        assert!(state.commit_page(second.seq, Ok(page_of(&["e1"], 1))));
        assert!(!state.loading);
    }

    #[test]
    fn test_response_after_leaving_search_is_discarded() {
        let mut state = state();
        let request = state.search("dune", SearchFilter::All).unwrap();
        state.set_view(View::Favorites);

        assert!(!state.loading);
        assert!(!state.commit_page(request.seq, Ok(page_of(&["a"], 1))));
        assert_eq!(state.view, View::Favorites);
    }

    #[test]
    fn test_gateway_failure_clears_items_and_sets_message() {
        let mut state = state();
        let first = state.search("dune", SearchFilter::All).unwrap();
        state.commit_page(first.seq, Ok(page_of(&["a", "b"], 40)));

        let next = state.change_page(2).unwrap();
        assert!(state.commit_page(next.seq, Err("status 503".to_string())));

        assert_eq!(state.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(state.visible_books().is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn test_new_search_clears_previous_error() {
        let mut state = state();
        let first = state.search("dune", SearchFilter::All).unwrap();
        state.commit_page(first.seq, Err("offline".to_string()));

        state.search("dune", SearchFilter::All);
        assert_eq!(state.error, None);
        assert!(state.loading);
    }

    #[test]
    fn test_set_view_search_is_noop() {
        let mut state = state();
        state.set_view(View::Search);
        assert_eq!(state.view, View::Catalog);
    }

    #[test]
    fn test_set_view_keeps_query_and_filter() {
        let mut state = state();
        state.search("dune", SearchFilter::Title);
        state.set_view(View::Favorites);

        assert_eq!(state.view, View::Favorites);
        assert_eq!(state.page, 1);
        assert_eq!(state.query, "dune");
        assert_eq!(state.filter, SearchFilter::Title);
    }

    #[test]
    fn test_double_toggle_restores_membership() {
        let mut state = loaded_state();
        let target = book("x");

        let before = state.is_favorite("x");
        assert!(state.toggle_favorite(&target).is_some());
        assert_ne!(state.is_favorite("x"), before);
        state.toggle_favorite(&target);
        assert_eq!(state.is_favorite("x"), before);

        state.toggle_favorite(&target);
        let before = state.is_favorite("x");
        state.toggle_favorite(&target);
        state.toggle_favorite(&target);
        assert_eq!(state.is_favorite("x"), before);
    }

    #[test]
    fn test_toggle_persists_full_set() {
        let mut state = loaded_state();
        state.toggle_favorite(&book("a"));
        let message = state.toggle_favorite(&book("b")).unwrap();

        let WorkerMessage::SavePreference { key, value, .. } = message else {
            panic!("expected a save");
        };
        assert_eq!(key, FAVORITES_KEY);
        assert_eq!(ids(&decode_favorites(Some(&value))), vec!["a", "b"]);
    }

    #[test]
    fn test_favorites_pages_reproduce_insertion_order() {
        for n in [0, 1, 11, 12, 13, 25, 36] {
            let mut state = state();
            let expected: Vec<String> = (0..n).map(|i| format!("f{i}")).collect();
            for id in &expected {
                state.toggle_favorite(&book(id));
            }
            state.set_view(View::Favorites);

            assert_eq!(state.total_pages(), total_pages(n, ITEMS_PER_PAGE));

            let mut seen = Vec::new();
            for page in 1..=state.total_pages() {
                state.change_page(page);
                seen.extend(state.visible_books().iter().map(|b| b.id.clone()));
            }
            assert_eq!(seen, expected);
        }
    }

    #[test]
    fn test_removing_last_favorite_on_last_page_clamps_page() {
        let mut state = state();
        for i in 0..13 {
            state.toggle_favorite(&book(&format!("f{i}")));
        }
        state.set_view(View::Favorites);
        state.change_page(2);
        assert_eq!(ids(state.visible_books()), vec!["f12"]);

        state.toggle_selected_favorite();

        assert_eq!(state.page, 1);
        assert_eq!(state.visible_books().len(), 12);
    }

    #[test]
    fn test_unreadable_stored_favorites_start_empty() {
        let mut state = state();
        state.apply_preferences(Some("not json"), None);
        assert!(state.favorites.is_empty());
        assert!(!state.dark_mode);
    }

    #[test]
    fn test_preferences_apply_once() {
        let mut state = state();
        state.apply_preferences(Some(r#"[{"id":"a"},{"id":"a"},{"id":"b"}]"#), Some("dark"));
        assert_eq!(state.favorites.len(), 2);
        assert!(state.dark_mode);

        state.apply_preferences(None, Some("light"));
        assert_eq!(state.favorites.len(), 2);
        assert!(state.dark_mode);
    }

    #[test]
    fn test_favorites_toggled_before_load_merge_with_stored() {
        let mut state = state();
        assert_eq!(state.toggle_favorite(&book("new")), None);
        state.toggle_theme();

        let message = state
            .apply_preferences(Some(r#"[{"id":"old1"},{"id":"old2"}]"#), Some("light"))
            .unwrap();

        assert!(state.is_favorite("old1"));
        assert!(state.is_favorite("old2"));
        assert!(state.is_favorite("new"));
        assert_eq!(state.favorites.len(), 3);
        assert!(state.dark_mode);

        let WorkerMessage::SavePreference { key, value, .. } = message else {
            panic!("expected a save");
        };
        assert_eq!(key, FAVORITES_KEY);
        assert_eq!(ids(&decode_favorites(Some(&value))), vec!["old1", "old2", "new"]);
    }

    #[test]
    fn test_unfavorite_before_load_removes_stored_book() {
        let mut state = state();
        state.toggle_favorite(&book("old1"));
        assert!(state.is_favorite("old1"));

        let message = state.apply_preferences(Some(r#"[{"id":"old1"},{"id":"old2"}]"#), None);

        assert!(!state.is_favorite("old1"));
        assert!(state.is_favorite("old2"));
        assert!(message.is_some());
    }

    #[test]
    fn test_load_without_pending_toggles_writes_nothing() {
        let mut state = state();
        assert_eq!(state.apply_preferences(Some(r#"[{"id":"old1"}]"#), None), None);

        let message = state.toggle_favorite(&book("new")).unwrap();
        let WorkerMessage::SavePreference { value, .. } = message else {
            panic!("expected a save");
        };
        assert_eq!(ids(&decode_favorites(Some(&value))), vec!["old1", "new"]);
    }

    #[test]
    fn test_toggle_theme_persists_flag() {
        let mut state = state();
        let message = state.toggle_theme();
        assert_eq!(
            message,
            WorkerMessage::SavePreference {
                key: THEME_KEY.to_string(),
                value: "dark".to_string(),
                trace_context: None,
            }
        );
    }

    #[test]
    fn test_detail_toggle_uses_opened_book() {
        let mut state = state();
        state.move_selection_down();
        assert!(state.open_detail());
        let opened = state.detail.clone().unwrap();

        state.toggle_selected_favorite();
        assert!(state.is_favorite(&opened.id));
        assert!(state.close_detail());
        assert!(!state.close_detail());
    }

    #[test]
    fn test_typing_submits_draft_with_draft_filter() {
        let mut state = state();
        state.begin_typing();
        state.draft.push_str("dune");
        state.draft_filter = state.draft_filter.cycle();

        let request = state.submit_draft().unwrap();
        assert_eq!(request.term, "intitle:dune");
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.filter, SearchFilter::Title);
        assert!(state.draft.is_empty());
    }

    #[test]
    fn test_cancel_typing_keeps_committed_search() {
        let mut state = state();
        state.search("dune", SearchFilter::All);
        state.begin_typing();
        assert_eq!(state.draft, "dune");
        state.draft.push_str(" messiah");
        state.cancel_typing();

        assert_eq!(state.query, "dune");
        assert_eq!(state.input_mode, InputMode::Normal);
    }
}
