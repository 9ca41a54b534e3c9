//! View model types representing renderable UI state.
//!
//! Built by `AppState::compute_viewmodel()` and consumed by the renderer.
//! They carry display-ready strings only; no decisions are left for the
//! components to make.

use crate::domain::PageMarker;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    pub search_bar: SearchBarInfo,

    /// Heading above the table ("Popular Books", "Search Results", ...).
    pub section_title: String,

    /// Rows of the book table that fit on screen.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Page-number bar; `None` when there is at most one page.
    pub pagination: Option<PaginationInfo>,

    /// Loading indicator or error banner.
    pub status: Option<StatusInfo>,

    /// Message shown instead of an empty table.
    pub empty_state: Option<EmptyState>,

    /// Detail panel for the opened book.
    pub detail: Option<DetailInfo>,

    pub footer: FooterInfo,
}

/// One row of the book table.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// Title, truncated to the column width.
    pub title: String,

    pub authors: String,

    /// Publication year, or empty.
    pub year: String,

    /// Average rating with one decimal, or empty.
    pub rating: String,

    pub is_selected: bool,

    pub is_favorite: bool,

    /// Character ranges of `title` matching the active query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    pub favorites_count: usize,
    pub dark_mode: bool,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,
}

/// Search bar contents: the draft while typing, the committed search otherwise.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
    pub filter_label: String,
    pub editing: bool,
}

/// Page-number bar.
#[derive(Debug, Clone)]
pub struct PaginationInfo {
    pub current: usize,
    pub total: usize,
    pub markers: Vec<PageMarker>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusInfo {
    Loading,
    Error { message: String },
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Detail panel for a single book.
#[derive(Debug, Clone)]
pub struct DetailInfo {
    pub title: String,
    pub authors: String,
    /// Year, publisher, page count and rating joined for one line.
    pub facts: String,
    pub categories: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub is_favorite: bool,
}

#[cfg(test)]
mod tests {
    use crate::app::{handle_event, AppState, Event, View};
    use crate::domain::{Book, BookInfo};
    use crate::gateway::SearchPage;
    use crate::ui::theme::ThemePair;
    use crate::ui::viewmodel::StatusInfo;

    fn state() -> AppState {
        AppState::new(ThemePair::default())
    }

    #[test]
    fn test_catalog_viewmodel_hides_pagination() {
        let vm = state().compute_viewmodel(40, 120);

        assert_eq!(vm.section_title, "Popular Books");
        assert_eq!(vm.display_items.len(), 6);
        assert!(vm.pagination.is_none());
        assert!(vm.status.is_none());
        assert!(vm.empty_state.is_none());
        assert!(vm.display_items[0].is_selected);
        assert_eq!(vm.display_items[3].year, "1937");
    }

    #[test]
    fn test_small_pane_windows_rows_around_selection() {
        let mut state = state();
        for _ in 0..5 {
            state.move_selection_down();
        }
        let vm = state.compute_viewmodel(14, 80);

        assert!(vm.display_items.len() < 6);
        assert!(vm.display_items[vm.selected_index].is_selected);
        assert_eq!(vm.display_items[vm.selected_index].title, "The Hunger Games");
    }

    #[test]
    fn test_loading_hides_table() {
        let mut state = state();
        state.search("dune", crate::domain::SearchFilter::All);
        let vm = state.compute_viewmodel(40, 120);

        assert_eq!(vm.status, Some(StatusInfo::Loading));
        assert!(vm.display_items.is_empty());
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn test_empty_search_and_favorites_show_empty_state() {
        let mut state = state();
        let request = state.search("zzzz", crate::domain::SearchFilter::All).unwrap();
        state.commit_page(request.seq, Ok(SearchPage::default()));
        assert!(state.compute_viewmodel(40, 120).empty_state.is_some());

        state.set_view(View::Favorites);
        let vm = state.compute_viewmodel(40, 120);
        assert_eq!(vm.empty_state.map(|e| e.message), Some("No favorites yet".to_string()));
    }

    #[test]
    fn test_search_titles_highlight_query() {
        let mut state = state();
        let request = state.search("hobbit", crate::domain::SearchFilter::Title).unwrap();
        let book = Book::new(
            "h",
            BookInfo {
                title: Some("The Hobbit".to_string()),
                ..Default::default()
            },
        );
        state.commit_page(
            request.seq,
            Ok(SearchPage {
                books: vec![book],
                total_count: 1,
            }),
        );

        let vm = state.compute_viewmodel(40, 120);
        assert_eq!(vm.display_items[0].highlight_ranges, vec![(4, 10)]);
    }

    #[test]
    fn test_pagination_markers_for_many_favorites() {
        let mut state = state();
        for i in 0..120 {
            state.toggle_favorite(&Book::new(format!("f{i}"), BookInfo::default()));
        }
        state.set_view(View::Favorites);
        handle_event(&mut state, &Event::LastPage).unwrap();

        let pagination = state.compute_viewmodel(40, 120).pagination.unwrap();
        assert_eq!(pagination.current, 10);
        assert_eq!(pagination.total, 10);
    }

    #[test]
    fn test_detail_marks_favorite() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenDetail).unwrap();
        handle_event(&mut state, &Event::ToggleFavorite).unwrap();

        let detail = state.compute_viewmodel(40, 120).detail.unwrap();
        assert_eq!(detail.title, "To Kill a Mockingbird");
        assert!(detail.is_favorite);
        assert!(detail.facts.contains("1960"));
        assert_eq!(state.compute_viewmodel(40, 120).header.favorites_count, 1);
    }
}
