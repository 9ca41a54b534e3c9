//! Page-number bar renderer.

use crate::domain::PageMarker;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Text of the bar without styling, e.g. `‹  1 … 4 [5] 6 … 20  ›`.
#[must_use]
pub fn pagination_text(pagination: &PaginationInfo) -> String {
    let numbers: Vec<String> = pagination
        .markers
        .iter()
        .map(|marker| match marker {
            PageMarker::Page(page) if *page == pagination.current => format!("[{page}]"),
            PageMarker::Page(page) => page.to_string(),
            PageMarker::Ellipsis => "…".to_string(),
        })
        .collect();

    let previous = if pagination.current > 1 { "‹ h" } else { "   " };
    let next = if pagination.current < pagination.total { "l ›" } else { "   " };
    format!("{previous}  {}  {next}", numbers.join(" "))
}

/// Renders the bar centered at `row`, with the current page emphasized.
pub fn render_pagination(row: usize, pagination: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    let text = pagination_text(pagination);
    let text_len = text.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;
    let current = format!("[{}]", pagination.current);

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.text_dim));

    let (before, after) = text.split_once(&current).unwrap_or((&text, ""));
    print!("{before}");
    if !after.is_empty() || text.ends_with(&current) {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.header_fg));
        print!("{current}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{after}");
    }

    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::visible_pages;

    #[test]
    fn test_pagination_text_marks_current_and_gaps() {
        let info = PaginationInfo {
            current: 5,
            total: 20,
            markers: visible_pages(5, 20, 2),
        };
        assert_eq!(pagination_text(&info), "‹ h  1 … 3 4 [5] 6 7 … 20  l ›");
    }

    #[test]
    fn test_pagination_text_at_edges() {
        let first = PaginationInfo {
            current: 1,
            total: 2,
            markers: visible_pages(1, 2, 2),
        };
        assert_eq!(pagination_text(&first), "     [1] 2  l ›");
    }
}
