//! Sliding-window pagination model.
//!
//! Every page change is a full re-fetch; this module only decides which
//! buttons to draw: up to five numbered buttons around the current page,
//! the first/last page pinned with ellipses when the window drifts away
//! from them, and prev/next enablement.

/// Numbered buttons shown around the current page (current ±2).
const WINDOW_RADIUS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow {
    pub current: u32,
    pub total_pages: u32,
    pub items: Vec<PageItem>,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Total page count for a listing.
pub fn page_count(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size as u64) as u32
}

/// Build the pager for `current` out of `total` items. Returns `None`
/// when there is at most one page; the pager is not drawn at all then.
pub fn window(current: u32, total: u64, page_size: u32) -> Option<PageWindow> {
    let total_pages = page_count(total, page_size);
    if total_pages <= 1 {
        return None;
    }
    let current = current.clamp(1, total_pages);

    let start = current.saturating_sub(WINDOW_RADIUS).max(1);
    let end = (current + WINDOW_RADIUS).min(total_pages);

    let mut items = Vec::new();
    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    for page in start..=end {
        items.push(PageItem::Page(page));
    }
    if end < total_pages {
        if end < total_pages - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total_pages));
    }

    Some(PageWindow {
        current,
        total_pages,
        items,
        has_prev: current > 1,
        has_next: current < total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn ninety_five_items_at_twenty_per_page_is_five_pages() {
        assert_eq!(page_count(95, 20), 5);
    }

    #[test]
    fn first_page_shows_leading_window_and_pinned_last() {
        let w = window(1, 95, 20).unwrap();
        assert_eq!(w.items, vec![Page(1), Page(2), Page(3), Ellipsis, Page(5)]);
        assert!(!w.has_prev, "page 1 has no prev");
        assert!(w.has_next);
    }

    #[test]
    fn last_page_disables_next() {
        let w = window(5, 95, 20).unwrap();
        assert_eq!(w.items, vec![Page(1), Ellipsis, Page(3), Page(4), Page(5)]);
        assert!(w.has_prev);
        assert!(!w.has_next, "last page has no next");
    }

    #[test]
    fn middle_page_of_a_long_run_pins_both_ends() {
        let w = window(10, 400, 20).unwrap();
        assert_eq!(
            w.items,
            vec![
                Page(1),
                Ellipsis,
                Page(8),
                Page(9),
                Page(10),
                Page(11),
                Page(12),
                Ellipsis,
                Page(20)
            ]
        );
    }

    #[test]
    fn adjacent_window_skips_pointless_ellipsis() {
        // start == 2: first page is pinned but no gap exists.
        let w = window(4, 140, 20).unwrap();
        assert_eq!(
            w.items,
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn single_page_renders_no_pager() {
        assert_eq!(window(1, 15, 20), None);
        assert_eq!(window(1, 0, 20), None);
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        let w = window(99, 95, 20).unwrap();
        assert_eq!(w.current, 5);
    }
}
