//! Book table component renderer.
//!
//! Four columns: a favorite marker with the title, authors, year, and rating.
//! The title column takes whatever the fixed columns leave over.

use crate::ui::helpers::{self, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const MARKER_WIDTH: usize = 2;
const YEAR_WIDTH: usize = 6;
const RATING_WIDTH: usize = 6;

/// Column widths for a pane `cols` wide: `(title, authors)`.
fn column_widths(cols: usize) -> (usize, usize) {
    let flexible = cols.saturating_sub(MARKER_WIDTH + YEAR_WIDTH + RATING_WIDTH);
    let authors = flexible / 3;
    (flexible - authors, authors)
}

/// Renders the column headers at `row` and returns the next free row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let (title_width, authors_width) = column_widths(cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", " ".repeat(MARKER_WIDTH));
    print!("{}", fit("TITLE", title_width));
    print!("{}", fit("AUTHORS", authors_width));
    print!("{}", fit("YEAR", YEAR_WIDTH));
    print!("{}", fit("RATING", RATING_WIDTH));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every row starting at `row` and returns the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one book.
///
/// The selected row gets the selection colors across the full width and no
/// match highlighting; the favorite marker keeps its own color either way.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let (title_width, authors_width) = column_widths(cols);
    let base_fg = if item.is_selected {
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };

    position_cursor(row, 1);
    if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    }

    if item.is_favorite {
        print!("{}♥ ", Theme::fg(&theme.colors.favorite_fg));
    } else {
        print!("  ");
    }

    print!("{}", Theme::fg(base_fg));
    let title = helpers::truncate(&item.title, title_width.saturating_sub(1));
    helpers::render_highlighted_text(&title, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(title_width.saturating_sub(title.chars().count())));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", fit(&item.authors, authors_width.saturating_sub(1)));
    print!(" ");
    print!("{}", fit(&item.year, YEAR_WIDTH));

    if !item.is_selected && !item.rating.is_empty() {
        print!("{}", Theme::fg(&theme.colors.rating_fg));
    }
    let rating = if item.rating.is_empty() {
        String::new()
    } else {
        format!("★ {}", item.rating)
    };
    print!("{}", fit(&rating, RATING_WIDTH));

    let used = MARKER_WIDTH + title_width + authors_width + YEAR_WIDTH + RATING_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    print!("{}", Theme::reset());
    row + 1
}
