//! Initial placement for newly added panels.
//!
//! # Algorithm
//!
//! 1. Unknown type: [`FALLBACK_PANEL_SIZE`] at the origin.
//! 2. Adjacency: when a main-view panel exists and the new panel is not itself
//!    a main view, try the slot immediately to its right, one gap away. The
//!    slot must lie inside the viewport and keep the gap to every panel.
//! 3. Grid scan: row-major over grid-aligned top-left corners, first
//!    candidate that keeps the gap to every existing panel wins.
//! 4. Fallback: the origin, overlapping if it must.
//!
//! New panels always start at their registry minimum size.
//!
//! # Invariants
//!
//! Two panels placed back to back by steps 2 or 3 never violate the gap
//! predicate of [`collides`]. Step 4 explicitly waives this.

use mythoras_core::geometry::Rect;
use mythoras_core::metrics::LayoutMetrics;
use mythoras_core::viewport::ViewportBounds;
use serde::{Deserialize, Serialize};

use crate::panel::{Panel, PanelId};
use crate::registry::PanelRegistry;

/// Size given to panels whose type the registry does not know.
pub const FALLBACK_PANEL_SIZE: (i32, i32) = (320, 200);

/// Which step of the algorithm produced a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    UnknownType,
    AdjacentToMainView,
    GridScan,
    OriginFallback,
}

/// Result of [`place`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub rect: Rect,
    pub strategy: PlacementStrategy,
}

/// Gap-padded overlap test.
///
/// `a` and `b` are clear of each other only when fully separated by at least
/// `gap` pixels along one axis.
#[inline]
#[must_use]
pub fn collides(a: Rect, b: Rect, gap: i32) -> bool {
    !(a.x >= b.right().saturating_add(gap)
        || a.right() <= b.x.saturating_sub(gap)
        || a.y >= b.bottom().saturating_add(gap)
        || a.bottom() <= b.y.saturating_sub(gap))
}

/// Whether `candidate` collides with any panel except `exclude`.
#[must_use]
pub fn has_collision(
    candidate: Rect,
    panels: &[Panel],
    exclude: Option<&PanelId>,
    gap: i32,
) -> bool {
    panels
        .iter()
        .filter(|panel| Some(&panel.id) != exclude)
        .any(|panel| collides(candidate, panel.rect(), gap))
}

/// Compute the initial rectangle for a new panel of type `kind`.
#[must_use]
pub fn place(
    kind: &str,
    existing: &[Panel],
    registry: &PanelRegistry,
    bounds: ViewportBounds,
    metrics: &LayoutMetrics,
) -> Placement {
    let Some(config) = registry.get(kind) else {
        let (width, height) = FALLBACK_PANEL_SIZE;
        return Placement {
            rect: Rect::from_size(width, height),
            strategy: PlacementStrategy::UnknownType,
        };
    };
    let gap = metrics.min_panel_gap;
    let (min_width, min_height) = (config.min_width, config.min_height);

    if !config.is_main_view
        && let Some(main) = existing
            .iter()
            .find(|panel| registry.is_main_view(&panel.kind))
    {
        let candidate = Rect::new(
            main.x.saturating_add(main.width).saturating_add(gap),
            main.y,
            min_width,
            min_height,
        );
        if bounds.contains_rect(candidate) && !has_collision(candidate, existing, None, gap) {
            return Placement {
                rect: candidate,
                strategy: PlacementStrategy::AdjacentToMainView,
            };
        }
    }

    let step = metrics.scan_step();
    let max_y = bounds.height.saturating_sub(min_height);
    let max_x = bounds.width.saturating_sub(min_width);
    let mut y = 0;
    while y <= max_y {
        let mut x = 0;
        while x <= max_x {
            let candidate = Rect::new(x, y, min_width, min_height);
            if !has_collision(candidate, existing, None, gap) {
                return Placement {
                    rect: candidate,
                    strategy: PlacementStrategy::GridScan,
                };
            }
            x = x.saturating_add(step);
        }
        y = y.saturating_add(step);
    }

    tracing::debug!(
        target: "mythoras.layout",
        kind,
        existing = existing.len(),
        "no free grid cell; placing at origin"
    );
    Placement {
        rect: Rect::from_size(min_width, min_height),
        strategy: PlacementStrategy::OriginFallback,
    }
}
