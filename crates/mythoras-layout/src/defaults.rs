#![forbid(unsafe_code)]

//! Default/reset layout builder.
//!
//! [`build_default`] depends only on the viewport bounds, the chosen policy
//! and the registry titles. Calling it twice with the same inputs yields the
//! same panels.
//!
//! The full-viewport main view may exceed the registry maximum; maxima bound
//! resize gestures, not the seeded layout.

use mythoras_core::geometry::Rect;
use mythoras_core::metrics::LayoutMetrics;
use mythoras_core::viewport::ViewportBounds;
use serde::{Deserialize, Serialize};

use crate::breakpoint::Breakpoint;
use crate::panel::Panel;
use crate::registry::{PanelRegistry, panel_types};

/// Id of the main view seeded by every default layout.
pub const MAIN_PANEL_ID: &str = "main-game";

/// Share of the viewport width given to the main view in the split layout.
const MAIN_WIDTH_PERCENT: i32 = 65;
/// Share of the viewport height given to the top row in the split layout.
const TOP_ROW_PERCENT: i32 = 60;

/// Shape of the seeded layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultLayoutPolicy {
    /// One locked main view filling the viewport.
    #[default]
    SingleMainView,
    /// Main view plus chat on top, squad/inventory/world map below.
    ///
    /// Falls back to [`SingleMainView`](Self::SingleMainView) below the `Md`
    /// breakpoint.
    MainWithAuxiliary,
}

/// `extent * numerator / denominator` without intermediate overflow.
fn share(extent: i32, numerator: i32, denominator: i32) -> i32 {
    (i64::from(extent) * i64::from(numerator) / i64::from(denominator)) as i32
}

fn titled(registry: &PanelRegistry, id: &str, kind: &str, rect: Rect) -> Panel {
    let title = registry.resolve(kind).title.clone();
    Panel::new(id, kind, rect, title)
}

fn single_main_view(bounds: ViewportBounds, registry: &PanelRegistry) -> Vec<Panel> {
    vec![titled(registry, MAIN_PANEL_ID, panel_types::GAME_VIEW, bounds.rect()).with_locked(true)]
}

fn main_with_auxiliary(
    bounds: ViewportBounds,
    registry: &PanelRegistry,
    metrics: &LayoutMetrics,
) -> Vec<Panel> {
    let gap = metrics.min_panel_gap;
    let (width, height) = (bounds.width, bounds.height);

    // Split lines sit on the grid; the gap is taken out of the panel before each line.
    let column = metrics.snap(share(width, MAIN_WIDTH_PERCENT, 100));
    let row = metrics.snap(share(height, TOP_ROW_PERCENT, 100));
    let top_height = (row - gap).max(0);
    let bottom_height = height - row;

    let mut panels = vec![
        titled(
            registry,
            MAIN_PANEL_ID,
            panel_types::GAME_VIEW,
            Rect::new(0, 0, (column - gap).max(0), top_height),
        )
        .with_locked(true),
        titled(
            registry,
            "chat-dock",
            panel_types::CHAT,
            Rect::new(column, 0, width - column, top_height),
        ),
    ];

    let bottom = [
        ("squad-ribbon", panel_types::SQUAD),
        ("inventory-dock", panel_types::INVENTORY),
        ("worldmap-dock", panel_types::WORLD_MAP),
    ];
    let count = bottom.len() as i32;
    let lines: Vec<i32> = (0..count)
        .map(|i| metrics.snap(share(width, i, count)))
        .chain(std::iter::once(width.saturating_add(gap)))
        .collect();
    for (slot, (id, kind)) in bottom.into_iter().enumerate() {
        let x = lines[slot];
        let panel_width = (lines[slot + 1] - gap - x).max(0);
        panels.push(titled(
            registry,
            id,
            kind,
            Rect::new(x, row, panel_width, bottom_height),
        ));
    }
    panels
}

/// Build the starting arrangement for `bounds`.
#[must_use]
pub fn build_default(
    bounds: ViewportBounds,
    policy: DefaultLayoutPolicy,
    registry: &PanelRegistry,
    metrics: &LayoutMetrics,
) -> Vec<Panel> {
    let breakpoint = Breakpoint::classify(bounds.width);
    let panels = match policy {
        DefaultLayoutPolicy::MainWithAuxiliary if breakpoint >= Breakpoint::Md => {
            main_with_auxiliary(bounds, registry, metrics)
        }
        DefaultLayoutPolicy::MainWithAuxiliary | DefaultLayoutPolicy::SingleMainView => {
            single_main_view(bounds, registry)
        }
    };
    tracing::debug!(
        target: "mythoras.layout",
        ?policy,
        %breakpoint,
        width = bounds.width,
        height = bounds.height,
        panels = panels.len(),
        "built default layout"
    );
    panels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::collides;

    #[test]
    fn single_main_view_fills_viewport() {
        let panels = build_default(
            ViewportBounds::new(1280, 744),
            DefaultLayoutPolicy::SingleMainView,
            &PanelRegistry::builtin(),
            &LayoutMetrics::DEFAULT,
        );
        assert_eq!(panels.len(), 1);
        let main = &panels[0];
        assert_eq!(main.id.as_str(), MAIN_PANEL_ID);
        assert_eq!(main.kind, panel_types::GAME_VIEW);
        assert_eq!(main.title, "Game View");
        assert_eq!(main.rect(), Rect::new(0, 0, 1280, 744));
        assert!(main.locked);
    }

    #[test]
    fn split_layout_is_gapped_and_in_bounds() {
        let bounds = ViewportBounds::new(1400, 844);
        let panels = build_default(
            bounds,
            DefaultLayoutPolicy::MainWithAuxiliary,
            &PanelRegistry::builtin(),
            &LayoutMetrics::DEFAULT,
        );
        assert_eq!(panels.len(), 5);
        assert!(panels[0].locked);
        assert!(panels[1..].iter().all(|panel| !panel.locked));
        for (i, a) in panels.iter().enumerate() {
            assert!(bounds.contains_rect(a.rect()), "{} out of bounds", a.id);
            for b in &panels[i + 1..] {
                assert!(!collides(a.rect(), b.rect(), 0), "{} overlaps {}", a.id, b.id);
            }
        }
        let main = &panels[0];
        assert_eq!(main.rect(), Rect::new(0, 0, 912, 492));
        let chat = &panels[1];
        assert_eq!(chat.rect(), Rect::new(920, 0, 480, 492));
        let last = &panels[4];
        assert_eq!(last.rect().right(), 1400);
        assert_eq!(last.rect().bottom(), 844);
    }

    #[test]
    fn split_layout_degrades_below_md() {
        let panels = build_default(
            ViewportBounds::new(1000, 700),
            DefaultLayoutPolicy::MainWithAuxiliary,
            &PanelRegistry::builtin(),
            &LayoutMetrics::DEFAULT,
        );
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].rect(), Rect::new(0, 0, 1000, 700));
    }

    #[test]
    fn deterministic_for_same_bounds() {
        let registry = PanelRegistry::builtin();
        let bounds = ViewportBounds::new(1700, 900);
        let first = build_default(
            bounds,
            DefaultLayoutPolicy::MainWithAuxiliary,
            &registry,
            &LayoutMetrics::DEFAULT,
        );
        let second = build_default(
            bounds,
            DefaultLayoutPolicy::MainWithAuxiliary,
            &registry,
            &LayoutMetrics::DEFAULT,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn policy_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&DefaultLayoutPolicy::MainWithAuxiliary).unwrap(),
            "\"main_with_auxiliary\""
        );
    }
}
