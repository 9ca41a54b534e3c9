//! Book detail panel renderer.

use crate::ui::helpers::{fit, position_cursor, truncate, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const PANEL_MARGIN: usize = 2;

/// Renders the detail panel in the rows `row..last_row` (exclusive).
///
/// The description is word-wrapped and cut off at the bottom of the panel.
pub fn render_detail(row: usize, last_row: usize, detail: &DetailInfo, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(PANEL_MARGIN * 2);
    let indent = " ".repeat(PANEL_MARGIN);
    let mut current_row = row;

    let line = |current_row: &mut usize, color: &str, bold: bool, text: &str| {
        if *current_row >= last_row {
            return;
        }
        position_cursor(*current_row, 1);
        if bold {
            print!("{}", Theme::bold());
        }
        print!("{}", Theme::fg(color));
        print!("{indent}{}", fit(text, width));
        print!("{indent}");
        print!("{}", Theme::reset());
        *current_row += 1;
    };

    let marker = if detail.is_favorite { "♥ " } else { "" };
    line(&mut current_row, &theme.colors.header_fg, true, &format!("{marker}{}", detail.title));
    line(&mut current_row, &theme.colors.text_normal, false, &format!("by {}", detail.authors));
    if !detail.facts.is_empty() {
        line(&mut current_row, &theme.colors.rating_fg, false, &detail.facts);
    }
    if !detail.categories.is_empty() {
        line(&mut current_row, &theme.colors.text_dim, false, &detail.categories);
    }
    if let Some(thumbnail) = &detail.thumbnail {
        line(&mut current_row, &theme.colors.text_dim, false, &truncate(&format!("Cover: {thumbnail}"), width));
    }
    line(&mut current_row, &theme.colors.border, false, &"─".repeat(width));

    for text in wrap(&detail.description, width) {
        line(&mut current_row, &theme.colors.text_normal, false, &text);
    }

    current_row
}
