//! Search bar component renderer.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Placeholder shown when the box is empty and not being edited.
const PLACEHOLDER: &str = "Search for books by title, author, or keyword...";

/// Renders the 3-line search box at `row` and returns the next free row.
///
/// ```text
///   ┌──────────────────────────────────────────────┐
///   │ / tolkien▏                   in: Author  Tab │
///   └──────────────────────────────────────────────┘
/// ```
///
/// The border uses the accent color while the draft is being edited and the
/// plain border color otherwise.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.editing {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let filter_text = if search.editing {
        format!("in: {}  Tab ", search.filter_label)
    } else {
        format!("in: {} ", search.filter_label)
    };
    let filter_len = filter_text.chars().count();

    let (query_text, query_color) = if search.query.is_empty() && !search.editing {
        (format!(" / {PLACEHOLDER}"), &theme.colors.text_dim)
    } else {
        let cursor = if search.editing { "▏" } else { "" };
        (format!(" / {}{cursor}", search.query), &theme.colors.text_normal)
    };
    let query_text = truncate(&query_text, inner_width.saturating_sub(filter_len + 1));
    let padding = inner_width.saturating_sub(query_text.chars().count() + filter_len);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::fg(query_color));
    print!("{query_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    if filter_len < inner_width {
        print!("{filter_text}");
    }
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
