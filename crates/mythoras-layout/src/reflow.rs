#![forbid(unsafe_code)]

//! Repositioning after the viewport changes (window resize, sidebar toggle).

use mythoras_core::viewport::ViewportBounds;

use crate::panel::Panel;
use crate::registry::PanelRegistry;

/// Bring panels back inside `next` after the viewport changed from `previous`.
///
/// A main-view panel that exactly filled `previous` is resized to fill `next`,
/// locked or not. Other unlocked panels whose right or bottom edge now lies
/// past the viewport are shifted left/up (never below zero); their size is
/// kept. Locked panels are left alone.
///
/// Returns how many panels changed.
pub fn reflow_panels(
    panels: &mut [Panel],
    previous: ViewportBounds,
    next: ViewportBounds,
    registry: &PanelRegistry,
) -> usize {
    let mut changed = 0;
    for panel in panels.iter_mut() {
        let before = panel.rect();
        if registry.is_main_view(&panel.kind) && before == previous.rect() {
            panel.set_rect(next.rect());
        } else if !panel.locked {
            let mut rect = before;
            if rect.right() > next.width {
                rect.x = next.width.saturating_sub(rect.width).max(0);
            }
            if rect.bottom() > next.height {
                rect.y = next.height.saturating_sub(rect.height).max(0);
            }
            panel.set_rect(rect);
        }
        if panel.rect() != before {
            changed += 1;
        }
    }
    if changed > 0 {
        tracing::debug!(
            target: "mythoras.layout",
            changed,
            width = next.width,
            height = next.height,
            "reflowed panels for new viewport"
        );
    }
    changed
}
