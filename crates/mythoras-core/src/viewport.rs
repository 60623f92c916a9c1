#![forbid(unsafe_code)]

//! Viewport bounds derived from window size and sidebar state.
//!
//! Bounds are never cached: callers recompute them from the current window
//! size and sidebar flag whenever either changes, so they cannot go stale.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::metrics::LayoutMetrics;

/// Outer window size in pixels, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

impl WindowSize {
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(1280, 800)
    }
}

/// Space available for panels, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub width: i32,
    pub height: i32,
}

impl ViewportBounds {
    /// Bounds with explicit extents (no chrome subtracted, no floor applied).
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Subtract the header (and the sidebar when open) from the window, then
    /// floor both extents at `metrics.min_viewport`.
    #[must_use]
    pub fn compute(window: WindowSize, sidebar_open: bool, metrics: &LayoutMetrics) -> Self {
        let sidebar = if sidebar_open {
            metrics.sidebar_width
        } else {
            0
        };
        let width = window.width.saturating_sub(sidebar);
        let height = window.height.saturating_sub(metrics.header_height);
        Self {
            width: width.max(metrics.min_viewport),
            height: height.max(metrics.min_viewport),
        }
    }

    /// The whole viewport as a rectangle at the origin.
    #[inline]
    pub const fn rect(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Whether `rect` lies fully inside the viewport.
    #[inline]
    pub const fn contains_rect(&self, rect: Rect) -> bool {
        rect.x >= 0 && rect.y >= 0 && rect.right() <= self.width && rect.bottom() <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtracts_header_and_closed_sidebar() {
        let bounds = ViewportBounds::compute(
            WindowSize::new(1280, 856),
            false,
            &LayoutMetrics::DEFAULT,
        );
        assert_eq!(bounds, ViewportBounds::new(1280, 800));
    }

    #[test]
    fn open_sidebar_narrows_width() {
        let bounds =
            ViewportBounds::compute(WindowSize::new(1280, 856), true, &LayoutMetrics::DEFAULT);
        assert_eq!(bounds.width, 1000);
        assert_eq!(bounds.height, 800);
    }

    #[test]
    fn tiny_window_is_floored() {
        let bounds = ViewportBounds::compute(WindowSize::new(200, 90), true, &LayoutMetrics::DEFAULT);
        assert_eq!(bounds, ViewportBounds::new(100, 100));
    }

    #[test]
    fn contains_rect_checks_all_edges() {
        let bounds = ViewportBounds::new(1000, 800);
        assert!(bounds.contains_rect(Rect::new(0, 0, 1000, 800)));
        assert!(!bounds.contains_rect(Rect::new(1, 0, 1000, 800)));
        assert!(!bounds.contains_rect(Rect::new(-1, 0, 10, 10)));
        assert!(!bounds.contains_rect(Rect::new(0, 700, 10, 101)));
    }
}
