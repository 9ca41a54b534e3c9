//! Pagination arithmetic shared by every view.
//!
//! Page numbers are 1-based throughout. Catalog and favorites are sliced
//! locally with [`page_slice`]; search pages come pre-sliced from the remote
//! service, which is the offset authority for that view.

/// Books shown per page in every view.
pub const ITEMS_PER_PAGE: usize = 12;

/// Deepest search page the controller will request.
pub const MAX_SEARCH_PAGE: usize = 100;

/// Pages on each side of the current page in the page-number bar.
pub const NEIGHBOR_RADIUS: usize = 2;

/// One entry in the page-number bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    /// A clickable page number.
    Page(usize),
    /// A collapsed run of page numbers.
    Ellipsis,
}

/// Number of pages needed for `total` items, `0` when there are none.
///
/// # Examples
///
/// ```
/// use bookshelf::domain::pagination::total_pages;
///
/// assert_eq!(total_pages(0, 12), 0);
/// assert_eq!(total_pages(6, 12), 1);
/// assert_eq!(total_pages(25, 12), 3);
/// ```
#[must_use]
pub const fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    if total % per_page == 0 {
        total / per_page
    } else {
        total / per_page + 1
    }
}

/// Zero-based offset of the first item on `page`.
#[must_use]
pub const fn page_offset(page: usize, per_page: usize) -> usize {
    page.saturating_sub(1).saturating_mul(per_page)
}

/// The `[(page-1)*per_page, page*per_page)` window of `items`, clipped to bounds.
///
/// Out-of-range pages yield an empty slice.
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = page_offset(page, per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Computes the page-number bar for `current` out of `total` pages.
///
/// Always includes the first and last page, plus up to `radius` pages on
/// either side of `current` (kept within `[2, total-1]`). A single
/// [`PageMarker::Ellipsis`] replaces any gap wider than one page. Yields
/// nothing when `total <= 1`, which hides the bar.
///
/// # Examples
///
/// ```
/// use bookshelf::domain::pagination::{visible_pages, PageMarker::*};
///
/// assert_eq!(
///     visible_pages(10, 20, 2),
///     vec![Page(1), Ellipsis, Page(8), Page(9), Page(10), Page(11), Page(12), Ellipsis, Page(20)]
/// );
/// assert!(visible_pages(1, 1, 2).is_empty());
/// ```
#[must_use]
pub fn visible_pages(current: usize, total: usize, radius: usize) -> Vec<PageMarker> {
    if total <= 1 {
        return Vec::new();
    }

    let window_start = current.saturating_sub(radius).max(2);
    let window_end = current.saturating_add(radius).min(total - 1);

    let mut numbers = Vec::with_capacity(radius * 2 + 3);
    numbers.push(1);
    numbers.extend(window_start..=window_end);
    numbers.push(total);

    let mut markers = Vec::with_capacity(numbers.len() + 2);
    let mut previous: Option<usize> = None;
    for page in numbers {
        if let Some(prev) = previous {
            if page <= prev {
                continue;
            }
            if page - prev > 1 {
                markers.push(PageMarker::Ellipsis);
            }
        }
        markers.push(PageMarker::Page(page));
        previous = Some(page);
    }

    markers
}

#[cfg(test)]
mod tests {
    use super::PageMarker::{Ellipsis, Page};
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, ITEMS_PER_PAGE), 0);
        assert_eq!(total_pages(1, ITEMS_PER_PAGE), 1);
        assert_eq!(total_pages(12, ITEMS_PER_PAGE), 1);
        assert_eq!(total_pages(13, ITEMS_PER_PAGE), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_page_slice_clips_last_page() {
        let items: Vec<usize> = (0..30).collect();
        assert_eq!(page_slice(&items, 1, 12), &items[0..12]);
        assert_eq!(page_slice(&items, 3, 12), &items[24..30]);
        assert!(page_slice(&items, 4, 12).is_empty());
        assert!(page_slice(&items, 0, 12).is_empty());
    }

    #[test]
    fn test_slices_concatenate_to_original_order() {
        let items: Vec<usize> = (0..29).collect();
        let pages = total_pages(items.len(), 12);
        let joined: Vec<usize> = (1..=pages)
            .flat_map(|p| page_slice(&items, p, 12).iter().copied())
            .collect();
        assert_eq!(joined, items);
    }

    #[test]
    fn test_visible_pages_hidden_for_single_page() {
        assert!(visible_pages(1, 0, NEIGHBOR_RADIUS).is_empty());
        assert!(visible_pages(1, 1, NEIGHBOR_RADIUS).is_empty());
    }

    #[test]
    fn test_visible_pages_two_pages() {
        assert_eq!(visible_pages(1, 2, 2), vec![Page(1), Page(2)]);
        assert_eq!(visible_pages(2, 2, 2), vec![Page(1), Page(2)]);
    }

    #[test]
    fn test_visible_pages_at_start_has_trailing_ellipsis() {
        assert_eq!(
            visible_pages(1, 10, 2),
            vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_visible_pages_at_end_has_leading_ellipsis() {
        assert_eq!(
            visible_pages(10, 10, 2),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_visible_pages_no_ellipsis_for_adjacent_runs() {
        assert_eq!(
            visible_pages(3, 6, 2),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6)]
        );
    }

    #[test]
    fn test_visible_pages_single_missing_page_is_collapsed() {
        // 1 and 3 are not adjacent, so page 2 collapses into an ellipsis.
        assert_eq!(
            visible_pages(5, 7, 2),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }
}
