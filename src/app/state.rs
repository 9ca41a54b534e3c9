//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for what is on screen: the active
//! view, the committed query and filter, the page, loading and error flags,
//! the favorites set and the built-in catalog. The operations that change it
//! live in [`super::controller`]; this module holds the data, the read-only
//! accessors the presentation layer relies on, and the view model builder.

use super::modes::{InputMode, View};
use crate::domain::pagination::{self, PageMarker, ITEMS_PER_PAGE, NEIGHBOR_RADIUS};
use crate::domain::{Book, Catalog, FavoritesSet, SearchFilter};
use crate::ui::theme::{Theme, ThemePair};
use crate::ui::viewmodel::{
    DetailInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, PaginationInfo, SearchBarInfo, StatusInfo,
    UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Rows used by everything except the book table.
const CHROME_ROWS: usize = 12;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Which collection is shown.
    pub view: View,

    /// How key presses are interpreted.
    pub input_mode: InputMode,

    /// Trimmed query of the most recent search; empty once the search is cleared.
    pub query: String,

    /// Filter of the most recent search.
    pub filter: SearchFilter,

    /// Query being edited in the search bar; committed on submit.
    pub draft: String,

    /// Filter being edited in the search bar; committed on submit.
    pub draft_filter: SearchFilter,

    /// 1-based page within the active view.
    pub page: usize,

    /// Provider's total-count estimate for the active search.
    pub total_count: usize,

    /// Books of the current search page, exactly as returned.
    pub search_results: Vec<Book>,

    /// A search request is outstanding.
    pub loading: bool,

    /// User-visible error message.
    pub error: Option<String>,

    pub favorites: FavoritesSet,

    pub catalog: Catalog,

    /// Zero-based cursor within the visible page.
    pub selected_index: usize,

    /// Book whose detail panel is open.
    pub detail: Option<Book>,

    pub dark_mode: bool,

    pub themes: ThemePair,

    /// Sequence number of the most recently issued page request.
    pub(super) latest_seq: u64,

    /// Stored preferences have been applied.
    pub(super) preferences_loaded: bool,

    /// Favorites toggled before stored preferences arrived, in order. Their
    /// writes are held and replayed onto the stored set once it loads.
    pub(super) pending_favorite_toggles: Vec<Book>,

    /// The theme was changed by the user before stored preferences arrived.
    pub(super) theme_changed: bool,
}

impl AppState {
    /// Creates the startup state: catalog view, page 1, no favorites, light theme.
    #[must_use]
    pub fn new(themes: ThemePair) -> Self {
        Self {
            view: View::Catalog,
            input_mode: InputMode::Normal,
            query: String::new(),
            filter: SearchFilter::All,
            draft: String::new(),
            draft_filter: SearchFilter::All,
            page: 1,
            total_count: 0,
            search_results: Vec::new(),
            loading: false,
            error: None,
            favorites: FavoritesSet::new(),
            catalog: Catalog::featured(),
            selected_index: 0,
            detail: None,
            dark_mode: false,
            themes,
            latest_seq: 0,
            preferences_loaded: false,
            pending_favorite_toggles: Vec::new(),
            theme_changed: false,
        }
    }

    /// Theme matching the dark/light flag.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        self.themes.select(self.dark_mode)
    }

    /// Sequence number of the most recently issued page request.
    #[must_use]
    pub const fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Number of pages in the active view; 0 when it has no items.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        let total = match self.view {
            View::Catalog => self.catalog.len(),
            View::Search => self.total_count,
            View::Favorites => self.favorites.len(),
        };
        pagination::total_pages(total, ITEMS_PER_PAGE)
    }

    /// Books on the current page of the active view.
    ///
    /// Catalog and favorites are sliced locally; search results are already a
    /// single page and are returned as-is.
    #[must_use]
    pub fn visible_books(&self) -> &[Book] {
        match self.view {
            View::Catalog => pagination::page_slice(self.catalog.books(), self.page, ITEMS_PER_PAGE),
            View::Search => &self.search_results,
            View::Favorites => pagination::page_slice(self.favorites.books(), self.page, ITEMS_PER_PAGE),
        }
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Page-number bar for the active view; empty when there is a single page.
    #[must_use]
    pub fn page_markers(&self) -> Vec<PageMarker> {
        pagination::visible_pages(self.page, self.total_pages(), NEIGHBOR_RADIUS)
    }

    #[must_use]
    pub fn selected_book(&self) -> Option<&Book> {
        self.visible_books().get(self.selected_index)
    }

    /// Moves the cursor down, wrapping to the top of the page.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_books().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the cursor up, wrapping to the bottom of the page.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_books().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    pub(super) fn clamp_selection(&mut self) {
        let len = self.visible_books().len();
        self.selected_index = if len == 0 { 0 } else { self.selected_index.min(len - 1) };
    }

    /// Builds the renderable view model for a pane of `rows` x `cols` cells.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols, view = ?self.view).entered();

        let status = self.compute_status();
        let books = if self.loading { &[][..] } else { self.visible_books() };

        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);
        let visible_start = self
            .selected_index
            .saturating_sub(available_rows / 2)
            .min(books.len().saturating_sub(available_rows));
        let visible_end = (visible_start + available_rows).min(books.len());

        let matcher = (self.view == View::Search && !self.query.is_empty()).then(SkimMatcherV2::default);

        let display_items = books[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, book)| self.compute_display_item(book, visible_start + offset, cols, matcher.as_ref()))
            .collect();

        let empty_state = if books.is_empty() && status.is_none() {
            self.compute_empty_state()
        } else {
            None
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            section_title: self.view.title().to_string(),
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            pagination: self.compute_pagination(),
            status,
            empty_state,
            detail: self.detail.as_ref().map(|book| self.compute_detail(book)),
            footer: self.compute_footer(),
        }
    }

    fn compute_display_item(
        &self,
        book: &Book,
        absolute_idx: usize,
        cols: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        const AUTHOR_COLUMN_SHARE: usize = 3;

        let title_width = cols.saturating_sub(cols / AUTHOR_COLUMN_SHARE + 16).max(12);
        let title = crate::ui::helpers::truncate(book.display_title(), title_width);

        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            let ranges = compute_highlight_ranges(&title, &self.query, m);
            let visible = title.chars().count();
            ranges.into_iter().filter(|&(_, end)| end <= visible).collect()
        });

        DisplayItem {
            title,
            authors: book.author_line(),
            year: book.published_year().map(|y| y.to_string()).unwrap_or_default(),
            rating: book.info.rating.map(|r| format!("{r:.1}")).unwrap_or_default(),
            is_selected: absolute_idx == self.selected_index,
            is_favorite: self.is_favorite(&book.id),
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: " Book Library ".to_string(),
            favorites_count: self.favorites.len(),
            dark_mode: self.dark_mode,
        }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        let editing = self.input_mode == InputMode::Typing;
        let (query, filter) = if editing {
            (&self.draft, self.draft_filter)
        } else {
            (&self.query, self.filter)
        };

        SearchBarInfo {
            query: query.clone(),
            filter_label: filter.label().to_string(),
            editing,
        }
    }

    fn compute_pagination(&self) -> Option<PaginationInfo> {
        if self.loading {
            return None;
        }
        let markers = self.page_markers();
        if markers.is_empty() {
            return None;
        }
        Some(PaginationInfo {
            current: self.page,
            total: self.total_pages(),
            markers,
        })
    }

    fn compute_status(&self) -> Option<StatusInfo> {
        if self.loading {
            return Some(StatusInfo::Loading);
        }
        self.error.as_ref().map(|message| StatusInfo::Error {
            message: message.clone(),
        })
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        match self.view {
            View::Catalog => None,
            View::Search => Some(EmptyState {
                message: "No books found.".to_string(),
                subtitle: "Try a different search term.".to_string(),
            }),
            View::Favorites => Some(EmptyState {
                message: "No favorites yet".to_string(),
                subtitle: "Press f on any book to keep it here".to_string(),
            }),
        }
    }

    fn compute_detail(&self, book: &Book) -> DetailInfo {
        let mut facts = Vec::new();
        if let Some(year) = book.published_year() {
            facts.push(format!("Published {year}"));
        }
        if let Some(publisher) = &book.info.publisher {
            facts.push(publisher.clone());
        }
        if let Some(pages) = book.info.page_count {
            facts.push(format!("{pages} pages"));
        }
        if let Some(rating) = book.info.rating {
            facts.push(format!("Rated {rating:.1}/5"));
        }

        DetailInfo {
            title: book.display_title().to_string(),
            authors: book.author_line(),
            facts: facts.join("  ·  "),
            categories: book.info.categories.join(", "),
            description: book
                .plain_description()
                .unwrap_or_else(|| "No description available.".to_string()),
            thumbnail: book.secure_thumbnail(),
            is_favorite: self.is_favorite(&book.id),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.detail.is_some()) {
            (InputMode::Typing, _) => "Enter: search  Tab: filter  Esc: cancel  Type to edit query",
            (InputMode::Normal, true) => "f: favorite  Esc: close details  q: hide",
            (InputMode::Normal, false) => match self.view {
                View::Favorites => "j/k: move  h/l: page  Enter: details  f: unfavorite  c: catalog  /: search  t: theme  q: hide",
                View::Catalog | View::Search => {
                    "j/k: move  h/l: page  Enter: details  f: favorite  v: favorites  c: catalog  /: search  t: theme  q: hide"
                }
            },
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Character ranges of `text` matched by `query`, coalesced into runs.
///
/// Each range is `(start, end)` with an exclusive end, in character indices.
#[must_use]
pub fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
