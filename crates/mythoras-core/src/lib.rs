#![forbid(unsafe_code)]

//! Core: geometry, grid snapping and viewport metrics.
//!
//! # Role in Mythoras
//! `mythoras-core` is the leaf of the workspace. It owns the pixel geometry
//! that every other crate speaks: rectangles and points, the snapping grid,
//! the chrome metrics (header height, sidebar width, inter-panel gap) and the
//! viewport bounds derived from window size and sidebar state.
//!
//! # How it fits in the system
//! `mythoras-layout` consumes these types for placement, collision checks and
//! drag/resize clamping. Nothing here holds state; every function is pure.

pub mod geometry;
pub mod metrics;
pub mod viewport;

pub use geometry::{Point, Rect, snap_to_grid};
pub use metrics::{
    GRID_SIZE, HEADER_HEIGHT, LayoutMetrics, MIN_PANEL_GAP, MIN_VIEWPORT_EXTENT, SIDEBAR_WIDTH,
};
pub use viewport::{ViewportBounds, WindowSize};
