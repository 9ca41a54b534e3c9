//! Header component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar at `row` and returns the next free row.
///
/// The title is centered; the favorites count and the current theme mode sit
/// at the right edge.
///
/// ```text
///                 Book Library                          ♥ 3  ☾ dark
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let mode = if header.dark_mode { "☾ dark" } else { "☀ light" };
    let counts = format!(" {}  {mode} ", header.favorites_count);
    let status_len = counts.chars().count() + 1;

    let title_len = header.title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;
    let gap = cols.saturating_sub(padding + title_len + status_len);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(gap));

    if padding + title_len + status_len <= cols {
        print!("{}", Theme::fg(&theme.colors.favorite_fg));
        print!("♥");
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{counts}");
    }

    print!("{}", Theme::reset());
    row + 1
}
