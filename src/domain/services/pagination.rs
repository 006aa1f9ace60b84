//! Sliding window of page links for paginated search results

use std::ops::RangeInclusive;

use crate::config::PAGE_WINDOW_WIDTH;

/// Contiguous range of zero-based page indices to display, plus prev/next flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: u32,
    pub end: u32,
    pub current: u32,
    pub total_pages: u32,
}

/// One clickable pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Previous(u32),
    Page { index: u32, active: bool },
    Next(u32),
}

impl PageControl {
    /// Page requested when the control is activated
    pub fn target(&self) -> u32 {
        match *self {
            PageControl::Previous(p) | PageControl::Next(p) => p,
            PageControl::Page { index, .. } => index,
        }
    }
}

/// The widget is only shown when there is more than one page
pub fn should_paginate(total_pages: u32) -> bool {
    total_pages > 1
}

impl PageWindow {
    /// Window of at most five pages around `current_page`
    ///
    /// Returns `None` when there are no pages. `current_page` past the end is
    /// clamped to the last page.
    pub fn compute(total_pages: u32, current_page: u32) -> Option<Self> {
        Self::with_width(total_pages, current_page, PAGE_WINDOW_WIDTH)
    }

    pub fn with_width(total_pages: u32, current_page: u32, width: u32) -> Option<Self> {
        if total_pages == 0 || width == 0 {
            return None;
        }
        let current = current_page.min(total_pages - 1);
        let half = width / 2;

        let (start, end) = if total_pages <= width {
            (0, total_pages - 1)
        } else if current <= half {
            (0, width - 1)
        } else if current + half >= total_pages {
            (total_pages - width, total_pages - 1)
        } else {
            let start = current - half;
            (start, start + width - 1)
        };

        Some(Self {
            start,
            end: end.min(total_pages - 1),
            current,
            total_pages,
        })
    }

    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.total_pages
    }

    /// Controls in display order: previous, page links, next
    pub fn controls(&self) -> Vec<PageControl> {
        let mut controls = Vec::with_capacity(self.len() + 2);
        if self.has_previous() {
            controls.push(PageControl::Previous(self.current - 1));
        }
        controls.extend(self.pages().map(|index| PageControl::Page {
            index,
            active: index == self.current,
        }));
        if self.has_next() {
            controls.push(PageControl::Next(self.current + 1));
        }
        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(total: u32, current: u32) -> PageWindow {
        PageWindow::compute(total, current).unwrap()
    }

    #[test]
    fn test_window_invariants_for_all_pages() {
        for total in [1u32, 4, 5, 6, 10, 100] {
            for current in 0..total {
                let w = window(total, current);
                assert_eq!(w.len(), total.min(5) as usize, "total={total} current={current}");
                assert!(w.end < total);
                assert!(w.pages().contains(&current));
                assert_eq!(w.pages().count(), w.len());
                assert_eq!(w.has_previous(), current > 0);
                assert_eq!(w.has_next(), current < total - 1);
            }
        }
    }

    #[test]
    fn test_window_first_page_of_many() {
        let w = window(100, 0);
        assert_eq!(w.pages(), 0..=4);
        assert!(!w.has_previous());
        assert!(w.has_next());
    }

    #[test]
    fn test_window_last_page_of_many() {
        let w = window(100, 99);
        assert_eq!(w.pages(), 95..=99);
        assert!(w.has_previous());
        assert!(!w.has_next());
    }

    #[test]
    fn test_window_centered() {
        assert_eq!(window(100, 50).pages(), 48..=52);
        assert_eq!(window(10, 3).pages(), 1..=5);
    }

    #[test]
    fn test_window_edge_cases() {
        let w = window(5, 4);
        assert_eq!(w.pages(), 0..=4);
        assert!(!w.has_next());

        assert_eq!(window(6, 5).pages(), 1..=5);
        assert_eq!(window(6, 3).pages(), 1..=5);
        assert_eq!(window(6, 2).pages(), 0..=4);
    }

    #[test]
    fn test_single_page_is_not_paginated() {
        assert!(!should_paginate(1));
        assert!(!should_paginate(0));
        assert!(should_paginate(2));
        assert!(PageWindow::compute(0, 0).is_none());
    }

    #[test]
    fn test_current_page_is_clamped() {
        let w = window(3, 7);
        assert_eq!(w.current, 2);
        assert!(!w.has_next());
    }

    #[test]
    fn test_controls_order_and_targets() {
        let controls = window(10, 5).controls();
        assert_eq!(controls.first(), Some(&PageControl::Previous(4)));
        assert_eq!(controls.last(), Some(&PageControl::Next(6)));
        let active: Vec<_> = controls
            .iter()
            .filter(|c| matches!(c, PageControl::Page { active: true, .. }))
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].target(), 5);
        assert_eq!(controls.len(), 7);
    }
}
