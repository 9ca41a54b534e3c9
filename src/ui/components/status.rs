//! Loading indicator and error banner.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusInfo;

/// Renders the status line at `row` and returns the next free row.
pub fn render_status(row: usize, status: &StatusInfo, theme: &Theme, cols: usize) -> usize {
    let (text, color) = match status {
        StatusInfo::Loading => ("Loading books...".to_string(), &theme.colors.text_dim),
        StatusInfo::Error { message } => (format!("✗ Something went wrong: {message}"), &theme.colors.error_fg),
    };
    let text = truncate(&text, cols);
    let text_len = text.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
