//! Generic pagination utilities.
//!
//! Computes the sliding window of page handles a pagination control shows.
//! This is a pure data component that knows nothing about rendering: the
//! widgets crate turns a [`PageWindow`] into nodes.

use serde::{Deserialize, Serialize};

use crate::{DashboardError, DashboardResult};

/// Sizing of a paginated table and its control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Number of records shown per page.
    pub page_size: usize,
    /// Maximum number of numbered page handles shown at once.
    pub max_handles: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            max_handles: 5,
        }
    }
}

impl PaginationConfig {
    /// Create a validated configuration.
    pub fn new(page_size: usize, max_handles: usize) -> DashboardResult<Self> {
        let config = Self {
            page_size,
            max_handles,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.page_size == 0 {
            return Err(DashboardError::Validation(
                "page_size must be greater than zero".to_string(),
            ));
        }
        if self.max_handles == 0 {
            return Err(DashboardError::Validation(
                "max_handles must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Handles kept on each side of the current page when the window slides.
    pub fn side(&self) -> usize {
        self.max_handles.saturating_sub(1) / 2
    }

    /// Number of pages needed for `data_count` records.
    pub fn page_count(&self, data_count: usize) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        data_count.div_ceil(self.page_size)
    }

    /// Whether `data_count` records spill over a single page.
    pub fn needs_pagination(&self, data_count: usize) -> bool {
        data_count > self.page_size
    }

    /// Window of handles for `data_count` records with `current_index` active.
    ///
    /// An index past the last page is clamped to the last page.
    pub fn window(&self, data_count: usize, current_index: usize) -> PageWindow {
        PageWindow::compute(self, self.page_count(data_count), current_index)
    }
}

/// Visible range `[start, end)` of page handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// First page index shown.
    pub start: usize,
    /// One past the last page index shown.
    pub end: usize,
    /// Active page index.
    pub current: usize,
    /// Total number of pages.
    pub page_count: usize,
}

impl PageWindow {
    pub fn compute(config: &PaginationConfig, page_count: usize, current_index: usize) -> Self {
        let current = current_index.min(page_count.saturating_sub(1));

        let (start, end) = if page_count <= config.max_handles {
            (0, page_count)
        } else {
            let start = current.saturating_sub(config.side());
            let end = start + config.max_handles;

            if end > page_count {
                (page_count.saturating_sub(config.max_handles), page_count)
            } else {
                (start, end)
            }
        };

        Self {
            start,
            end,
            current,
            page_count,
        }
    }

    /// Page indices that get a numbered handle.
    pub fn pages(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether pages before the window are hidden.
    pub fn show_leading_ellipsis(&self) -> bool {
        self.start > 0
    }

    /// Whether pages after the window are hidden.
    pub fn show_trailing_ellipsis(&self) -> bool {
        self.end < self.page_count
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.current == index
    }

    /// Page reached by the "previous" handle, if any.
    pub fn previous(&self) -> Option<usize> {
        self.current.checked_sub(1)
    }

    /// Page reached by the "next" handle, if any.
    pub fn next(&self) -> Option<usize> {
        let next = self.current + 1;
        (next < self.page_count).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PaginationConfig::default();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.max_handles, 5);
        assert_eq!(config.side(), 2);
    }

    #[test]
    fn test_new_rejects_zero_sizes() {
        assert!(PaginationConfig::new(0, 5).is_err());
        assert!(PaginationConfig::new(5, 0).is_err());
        assert!(PaginationConfig::new(10, 7).is_ok());
    }

    #[test]
    fn test_page_count_rounds_up() {
        let config = PaginationConfig::default();
        assert_eq!(config.page_count(0), 0);
        assert_eq!(config.page_count(5), 1);
        assert_eq!(config.page_count(6), 2);
        assert_eq!(config.page_count(23), 5);
        assert_eq!(config.page_count(100), 20);
    }

    #[test]
    fn test_needs_pagination() {
        let config = PaginationConfig::default();
        assert!(!config.needs_pagination(0));
        assert!(!config.needs_pagination(5));
        assert!(config.needs_pagination(6));
    }

    #[test]
    fn test_few_pages_show_all() {
        let config = PaginationConfig::default();
        for current in 0..5 {
            let window = config.window(23, current);
            assert_eq!(window.pages(), 0..5);
            assert!(!window.show_leading_ellipsis());
            assert!(!window.show_trailing_ellipsis());
        }
    }

    #[test]
    fn test_window_centered() {
        let window = PaginationConfig::default().window(100, 10);
        assert_eq!(window.pages(), 8..13);
        assert!(window.show_leading_ellipsis());
        assert!(window.show_trailing_ellipsis());
    }

    #[test]
    fn test_window_first_page() {
        let window = PaginationConfig::default().window(100, 0);
        assert_eq!(window.pages(), 0..5);
        assert!(!window.show_leading_ellipsis());
        assert!(window.show_trailing_ellipsis());
    }

    #[test]
    fn test_window_last_page_clamps() {
        let window = PaginationConfig::default().window(100, 19);
        assert_eq!(window.pages(), 15..20);
        assert!(window.show_leading_ellipsis());
        assert!(!window.show_trailing_ellipsis());
    }

    #[test]
    fn test_window_near_start_does_not_underflow() {
        let window = PaginationConfig::default().window(100, 1);
        assert_eq!(window.pages(), 0..5);
    }

    #[test]
    fn test_window_always_full_width_when_many_pages() {
        let config = PaginationConfig::default();
        for current in 0..20 {
            let window = config.window(100, current);
            assert_eq!(window.len(), 5);
            assert!(window.pages().contains(&current));
        }
    }

    #[test]
    fn test_index_past_end_is_clamped() {
        let window = PaginationConfig::default().window(100, 42);
        assert_eq!(window.current, 19);
        assert_eq!(window.pages(), 15..20);
    }

    #[test]
    fn test_previous_next() {
        let config = PaginationConfig::default();

        let first = config.window(100, 0);
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Some(1));

        let last = config.window(100, 19);
        assert_eq!(last.previous(), Some(18));
        assert_eq!(last.next(), None);
    }

    #[test]
    fn test_custom_handle_count() {
        let config = PaginationConfig::new(10, 7).unwrap();
        assert_eq!(config.side(), 3);

        let window = config.window(500, 25);
        assert_eq!(window.pages(), 22..29);
    }
}
