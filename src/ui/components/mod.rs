//! Composable UI component renderers.
//!
//! Each component prints one part of the screen at a given row and returns the
//! next free row.
//!
//! - [`header`]: Title bar with favorites count and theme mode
//! - [`search`]: Search box with the active filter
//! - [`table`]: Book list (TITLE, AUTHORS, YEAR, RATING)
//! - [`pagination`]: Page-number bar
//! - [`status`]: Loading indicator and error banner
//! - [`detail`]: Detail panel for one book
//! - [`empty`]: Message shown instead of an empty table
//! - [`footer`]: Keybinding hints
//!
//! [`render_layout`] stacks them:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Section title / status]
//! [Table Headers]          or  [Detail panel]
//! [Table Rows]
//! [Pagination]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod empty;
mod footer;
mod header;
pub mod pagination;
mod search;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use status::render_status;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row` and returns the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

fn render_section_title(row: usize, title: &str, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("  {title}");
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full screen for `vm`.
///
/// The footer and its border are pinned to the bottom two rows; the
/// pagination bar sits directly above them.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_row = rows.saturating_sub(1);
    let bottom_border_row = footer_row.saturating_sub(1);
    let pagination_row = bottom_border_row.saturating_sub(1);

    let mut current_row = 2;
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);

    current_row = match &vm.status {
        Some(status) => render_status(current_row, status, theme, cols),
        None => render_section_title(current_row, &vm.section_title, theme),
    };

    if let Some(detail) = &vm.detail {
        render_detail(current_row, bottom_border_row, detail, theme, cols);
    } else if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
    } else if !vm.display_items.is_empty() {
        current_row = render_table_headers(current_row, theme, cols);
        render_table_rows(current_row, &vm.display_items, theme, cols);

        if let Some(pagination) = &vm.pagination {
            render_pagination(pagination_row, pagination, theme, cols);
        }
    }

    render_border(bottom_border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
