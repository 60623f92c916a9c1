#![forbid(unsafe_code)]

//! Layout metrics: the snapping grid and the chrome that surrounds the canvas.

use serde::{Deserialize, Serialize};

use crate::geometry::snap_to_grid;

/// Default grid cell in pixels.
pub const GRID_SIZE: i32 = 20;
/// Default header bar height in pixels.
pub const HEADER_HEIGHT: i32 = 56;
/// Default sidebar width in pixels (subtracted only while the sidebar is open).
pub const SIDEBAR_WIDTH: i32 = 280;
/// Default minimum gap kept between panels by automatic placement.
pub const MIN_PANEL_GAP: i32 = 8;
/// Floor for the available width/height so the canvas never degenerates.
pub const MIN_VIEWPORT_EXTENT: i32 = 100;

/// Grid and chrome configuration shared by placement and interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub grid_size: i32,
    pub header_height: i32,
    pub sidebar_width: i32,
    pub min_panel_gap: i32,
    pub min_viewport: i32,
}

impl LayoutMetrics {
    pub const DEFAULT: Self = Self {
        grid_size: GRID_SIZE,
        header_height: HEADER_HEIGHT,
        sidebar_width: SIDEBAR_WIDTH,
        min_panel_gap: MIN_PANEL_GAP,
        min_viewport: MIN_VIEWPORT_EXTENT,
    };

    /// Snap a coordinate or extent to this grid.
    #[inline]
    #[must_use]
    pub fn snap(&self, value: i32) -> i32 {
        snap_to_grid(value, self.grid_size)
    }

    /// Step used when scanning candidate positions. Never zero.
    #[inline]
    #[must_use]
    pub fn scan_step(&self) -> i32 {
        self.grid_size.max(1)
    }

    /// Validate ranges. An empty list means the metrics are usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.grid_size <= 0 {
            errors.push(format!("layout.grid_size must be > 0, got {}", self.grid_size));
        }
        if self.header_height < 0 {
            errors.push(format!(
                "layout.header_height must be >= 0, got {}",
                self.header_height
            ));
        }
        if self.sidebar_width < 0 {
            errors.push(format!(
                "layout.sidebar_width must be >= 0, got {}",
                self.sidebar_width
            ));
        }
        if self.min_panel_gap < 0 {
            errors.push(format!(
                "layout.min_panel_gap must be >= 0, got {}",
                self.min_panel_gap
            ));
        }
        if self.min_viewport <= 0 {
            errors.push(format!(
                "layout.min_viewport must be > 0, got {}",
                self.min_viewport
            ));
        }
        errors
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}
