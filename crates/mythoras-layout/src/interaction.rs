#![forbid(unsafe_code)]

//! Pointer-driven drag/resize state machine.
//!
//! ```text
//! Idle -> Dragging -> Idle
//!    \--> Resizing -> Idle
//! ```
//!
//! One gesture is active at a time across all panels. Every entry point
//! returns a [`GestureTransition`]; inputs that are safely ignored produce an
//! explicit [`GestureEffect::Noop`] with a reason instead of an error.
//!
//! Geometry is computed by the pure step functions [`drag_step`] and
//! [`resize_step`]; the machine only routes pointer events to them and writes
//! the result back into the [`PanelStore`].

use mythoras_core::geometry::{Point, Rect};
use mythoras_core::metrics::LayoutMetrics;
use mythoras_core::viewport::ViewportBounds;
use serde::{Deserialize, Serialize};

use crate::panel::PanelId;
use crate::registry::{PanelConfig, PanelRegistry};
use crate::store::PanelStore;

/// Which part of the panel chrome received the pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureHandle {
    /// Title bar: moves the panel.
    Drag,
    /// Bottom-right grip: resizes the panel.
    Resize,
}

/// Gesture lifecycle state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        panel: PanelId,
        /// Pointer position relative to the panel's top-left corner.
        pointer_offset: Point,
    },
    Resizing {
        panel: PanelId,
        /// Reference point for the next incremental delta.
        last_pointer: Point,
    },
}

impl GestureState {
    /// Target panel of the active gesture.
    #[must_use]
    pub fn panel(&self) -> Option<&PanelId> {
        match self {
            Self::Idle => None,
            Self::Dragging { panel, .. } | Self::Resizing { panel, .. } => Some(panel),
        }
    }
}

/// Why an input was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureNoopReason {
    IdleWithoutGesture,
    GestureAlreadyActive,
    PanelMissing,
    PanelLocked,
    ResizeDisabled,
}

/// Effect emitted by one transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum GestureEffect {
    DragStarted {
        panel: PanelId,
        pointer_offset: Point,
    },
    ResizeStarted {
        panel: PanelId,
        origin: Point,
    },
    Moved {
        panel: PanelId,
        rect: Rect,
    },
    Resized {
        panel: PanelId,
        rect: Rect,
        /// The viewport could not honor the registry minimum.
        degraded: bool,
    },
    Ended {
        panel: PanelId,
    },
    Canceled {
        panel: PanelId,
    },
    Noop {
        reason: GestureNoopReason,
    },
}

/// One state-machine step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureTransition {
    pub sequence: u64,
    pub from: GestureState,
    pub to: GestureState,
    pub effect: GestureEffect,
}

impl GestureTransition {
    /// Whether the input was ignored.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self.effect, GestureEffect::Noop { .. })
    }
}

/// Read-only inputs a gesture step needs besides the store.
#[derive(Debug, Clone, Copy)]
pub struct InteractionContext<'a> {
    pub registry: &'a PanelRegistry,
    pub bounds: ViewportBounds,
    pub metrics: LayoutMetrics,
}

/// Result of one resize step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOutcome {
    pub rect: Rect,
    pub degraded: bool,
}

/// New position of a dragged panel.
///
/// The raw position is clamped into the viewport, snapped, then clamped
/// again so the snapped value never leaves `[0, available - size]`.
#[must_use]
pub fn drag_step(
    rect: Rect,
    pointer: Point,
    pointer_offset: Point,
    bounds: ViewportBounds,
    metrics: &LayoutMetrics,
) -> Rect {
    let target = pointer.offset_from(pointer_offset);
    let max_x = bounds.width.saturating_sub(rect.width).max(0);
    let max_y = bounds.height.saturating_sub(rect.height).max(0);
    let x = metrics.snap(target.x.clamp(0, max_x)).clamp(0, max_x);
    let y = metrics.snap(target.y.clamp(0, max_y)).clamp(0, max_y);
    rect.with_origin(x, y)
}

/// Fit one extent. Returns the new extent and whether the fit is degraded.
fn fit_extent(
    current: i32,
    delta: i32,
    origin: i32,
    available: i32,
    min: i32,
    max: Option<i32>,
    metrics: &LayoutMetrics,
) -> (i32, bool) {
    let tentative = current.saturating_add(delta);
    let space = available.saturating_sub(origin).max(0);
    let upper = max.map_or(space, |max| max.min(space));
    if upper < min {
        return (upper.max(0), true);
    }
    let clamped = tentative.clamp(min, upper);
    (metrics.snap(clamped).clamp(min, upper), false)
}

/// New bounds of a panel resized by `delta` since the previous move.
///
/// When the viewport cannot hold the registry minimum the extent shrinks to
/// exactly the space left of (or below) the fixed corner and is not snapped.
#[must_use]
pub fn resize_step(
    rect: Rect,
    delta: Point,
    config: &PanelConfig,
    bounds: ViewportBounds,
    metrics: &LayoutMetrics,
) -> ResizeOutcome {
    let (width, width_degraded) = fit_extent(
        rect.width,
        delta.x,
        rect.x,
        bounds.width,
        config.min_width,
        config.max_width,
        metrics,
    );
    let (height, height_degraded) = fit_extent(
        rect.height,
        delta.y,
        rect.y,
        bounds.height,
        config.min_height,
        config.max_height,
        metrics,
    );

    let mut x = rect.x;
    if x.saturating_add(width) > bounds.width {
        x = bounds.width.saturating_sub(width).max(0);
    }
    if !width_degraded {
        let max_x = bounds.width.saturating_sub(width).max(0);
        x = metrics.snap(x).clamp(0, max_x);
    }

    ResizeOutcome {
        rect: Rect::new(x, rect.y, width, height),
        degraded: width_degraded || height_degraded,
    }
}

/// The single global gesture machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GestureMachine {
    state: GestureState,
    sequence: u64,
}

impl GestureMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    fn emit(&mut self, from: GestureState, effect: GestureEffect) -> GestureTransition {
        self.sequence = self.sequence.saturating_add(1);
        GestureTransition {
            sequence: self.sequence,
            from,
            to: self.state.clone(),
            effect,
        }
    }

    fn noop(&mut self, reason: GestureNoopReason) -> GestureTransition {
        let from = self.state.clone();
        self.emit(from, GestureEffect::Noop { reason })
    }

    /// Begin a gesture on `id`.
    ///
    /// Ignored while another gesture is active, and for missing or locked
    /// panels. A resize is also ignored when the panel type disallows it.
    pub fn pointer_down(
        &mut self,
        store: &PanelStore,
        ctx: &InteractionContext<'_>,
        id: &PanelId,
        handle: GestureHandle,
        pointer: Point,
    ) -> GestureTransition {
        if self.is_active() {
            return self.noop(GestureNoopReason::GestureAlreadyActive);
        }
        let Some(panel) = store.get(id) else {
            return self.noop(GestureNoopReason::PanelMissing);
        };
        if panel.locked {
            return self.noop(GestureNoopReason::PanelLocked);
        }

        let from = self.state.clone();
        let effect = match handle {
            GestureHandle::Drag => {
                let pointer_offset = pointer.offset_from(panel.rect().origin());
                self.state = GestureState::Dragging {
                    panel: id.clone(),
                    pointer_offset,
                };
                GestureEffect::DragStarted {
                    panel: id.clone(),
                    pointer_offset,
                }
            }
            GestureHandle::Resize => {
                if !ctx.registry.resolve(&panel.kind).can_resize {
                    return self.noop(GestureNoopReason::ResizeDisabled);
                }
                self.state = GestureState::Resizing {
                    panel: id.clone(),
                    last_pointer: pointer,
                };
                GestureEffect::ResizeStarted {
                    panel: id.clone(),
                    origin: pointer,
                }
            }
        };
        tracing::debug!(
            target: "mythoras.gesture",
            panel = %id,
            ?handle,
            x = pointer.x,
            y = pointer.y,
            "gesture started"
        );
        self.emit(from, effect)
    }

    /// Apply one pointer-move to the active gesture.
    ///
    /// If the target panel vanished or became locked the move is ignored but
    /// the gesture stays active until the next pointer-up.
    pub fn pointer_move(
        &mut self,
        store: &mut PanelStore,
        ctx: &InteractionContext<'_>,
        pointer: Point,
    ) -> GestureTransition {
        let from = self.state.clone();
        match from.clone() {
            GestureState::Idle => self.noop(GestureNoopReason::IdleWithoutGesture),
            GestureState::Dragging {
                panel: id,
                pointer_offset,
            } => {
                let Some(panel) = store.get_mut(&id) else {
                    return self.noop(GestureNoopReason::PanelMissing);
                };
                if panel.locked {
                    return self.noop(GestureNoopReason::PanelLocked);
                }
                let rect = drag_step(
                    panel.rect(),
                    pointer,
                    pointer_offset,
                    ctx.bounds,
                    &ctx.metrics,
                );
                panel.set_rect(rect);
                tracing::trace!(
                    target: "mythoras.gesture",
                    panel = %id,
                    x = rect.x,
                    y = rect.y,
                    "drag step"
                );
                let effect = GestureEffect::Moved {
                    panel: id.clone(),
                    rect,
                };
                self.emit(from, effect)
            }
            GestureState::Resizing {
                panel: id,
                last_pointer,
            } => {
                let Some(panel) = store.get_mut(&id) else {
                    return self.noop(GestureNoopReason::PanelMissing);
                };
                if panel.locked {
                    return self.noop(GestureNoopReason::PanelLocked);
                }
                let delta = pointer.offset_from(last_pointer);
                let config = ctx.registry.resolve(&panel.kind);
                let outcome = resize_step(panel.rect(), delta, &config, ctx.bounds, &ctx.metrics);
                panel.set_rect(outcome.rect);
                if outcome.degraded {
                    tracing::debug!(
                        target: "mythoras.gesture",
                        panel = %id,
                        width = outcome.rect.width,
                        height = outcome.rect.height,
                        "viewport smaller than panel minimum; degraded fit"
                    );
                } else {
                    tracing::trace!(
                        target: "mythoras.gesture",
                        panel = %id,
                        width = outcome.rect.width,
                        height = outcome.rect.height,
                        "resize step"
                    );
                }
                self.state = GestureState::Resizing {
                    panel: id.clone(),
                    last_pointer: pointer,
                };
                let effect = GestureEffect::Resized {
                    panel: id.clone(),
                    rect: outcome.rect,
                    degraded: outcome.degraded,
                };
                self.emit(from, effect)
            }
        }
    }

    /// End the active gesture, wherever the pointer is.
    pub fn pointer_up(&mut self) -> GestureTransition {
        let from = std::mem::take(&mut self.state);
        match from.panel().cloned() {
            Some(panel) => {
                tracing::debug!(target: "mythoras.gesture", panel = %panel, "gesture ended");
                self.emit(from, GestureEffect::Ended { panel })
            }
            None => self.emit(
                from,
                GestureEffect::Noop {
                    reason: GestureNoopReason::IdleWithoutGesture,
                },
            ),
        }
    }

    /// Reset to Idle when the pointer listeners are torn down.
    ///
    /// Returns `None` if no gesture was active.
    pub fn force_cancel(&mut self) -> Option<GestureTransition> {
        let panel = self.state.panel()?.clone();
        let from = std::mem::take(&mut self.state);
        tracing::debug!(target: "mythoras.gesture", panel = %panel, "gesture canceled");
        Some(self.emit(from, GestureEffect::Canceled { panel }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::Panel;
    use crate::registry::panel_types;
    use proptest::prelude::*;

    fn ctx(registry: &PanelRegistry, width: i32, height: i32) -> InteractionContext<'_> {
        InteractionContext {
            registry,
            bounds: ViewportBounds::new(width, height),
            metrics: LayoutMetrics::DEFAULT,
        }
    }

    fn store_with(panel: Panel) -> PanelStore {
        PanelStore::from_panels(vec![panel])
    }

    #[test]
    fn drag_snaps_pointer_target() {
        let registry = PanelRegistry::builtin();
        let ctx = ctx(&registry, 1000, 800);
        let mut store = store_with(Panel::new(
            "p",
            panel_types::CHAT,
            Rect::new(100, 100, 300, 200),
            "Chat",
        ));
        let id = PanelId::from("p");
        let mut machine = GestureMachine::new();

        let start = machine.pointer_down(&store, &ctx, &id, GestureHandle::Drag, Point::new(110, 110));
        assert_eq!(
            start.effect,
            GestureEffect::DragStarted {
                panel: id.clone(),
                pointer_offset: Point::new(10, 10)
            }
        );

        machine.pointer_move(&mut store, &ctx, Point::new(500, 50));
        assert_eq!(store.get(&id).unwrap().rect(), Rect::new(500, 40, 300, 200));

        let end = machine.pointer_up();
        assert_eq!(end.effect, GestureEffect::Ended { panel: id });
        assert_eq!(end.to, GestureState::Idle);
    }

    #[test]
    fn drag_clamps_past_edges() {
        let registry = PanelRegistry::builtin();
        let ctx = ctx(&registry, 1000, 800);
        let mut store = store_with(Panel::new(
            "p",
            panel_types::CHAT,
            Rect::new(0, 0, 290, 150),
            "Chat",
        ));
        let id = PanelId::from("p");
        let mut machine = GestureMachine::new();
        machine.pointer_down(&store, &ctx, &id, GestureHandle::Drag, Point::new(5, 5));

        machine.pointer_move(&mut store, &ctx, Point::new(5000, 5000));
        let rect = store.get(&id).unwrap().rect();
        assert_eq!((rect.x, rect.y), (710, 650));
        assert!(ViewportBounds::new(1000, 800).contains_rect(rect));

        machine.pointer_move(&mut store, &ctx, Point::new(-400, -3));
        assert_eq!(store.get(&id).unwrap().rect().origin(), Point::ORIGIN);
    }

    #[test]
    fn locked_panel_rejects_both_gestures() {
        let registry = PanelRegistry::builtin();
        let ctx = ctx(&registry, 1000, 800);
        let store = store_with(
            Panel::new("p", panel_types::CHAT, Rect::new(0, 0, 300, 200), "Chat").with_locked(true),
        );
        let id = PanelId::from("p");
        let mut machine = GestureMachine::new();
        for handle in [GestureHandle::Drag, GestureHandle::Resize] {
            let transition = machine.pointer_down(&store, &ctx, &id, handle, Point::new(1, 1));
            assert_eq!(
                transition.effect,
                GestureEffect::Noop {
                    reason: GestureNoopReason::PanelLocked
                }
            );
            assert!(!machine.is_active());
        }
    }

    #[test]
    fn resize_disabled_type_is_ignored() {
        let mut registry = PanelRegistry::builtin();
        registry.register(
            "clock",
            PanelConfig::new("Clock", 100, 100).with_resize(false),
        );
        let ctx = ctx(&registry, 1000, 800);
        let store = store_with(Panel::new("c", "clock", Rect::new(0, 0, 100, 100), "Clock"));
        let mut machine = GestureMachine::new();
        let transition = machine.pointer_down(
            &store,
            &ctx,
            &PanelId::from("c"),
            GestureHandle::Resize,
            Point::new(100, 100),
        );
        assert_eq!(
            transition.effect,
            GestureEffect::Noop {
                reason: GestureNoopReason::ResizeDisabled
            }
        );
    }

    #[test]
    fn second_pointer_down_is_ignored() {
        let registry = PanelRegistry::builtin();
        let ctx = ctx(&registry, 1000, 800);
        let store = PanelStore::from_panels(vec![
            Panel::new("a", panel_types::CHAT, Rect::new(0, 0, 300, 200), "Chat"),
            Panel::new("b", panel_types::INBOX, Rect::new(400, 0, 350, 400), "Inbox"),
        ]);
        let mut machine = GestureMachine::new();
        machine.pointer_down(&store, &ctx, &PanelId::from("a"), GestureHandle::Drag, Point::ORIGIN);
        let second = machine.pointer_down(
            &store,
            &ctx,
            &PanelId::from("b"),
            GestureHandle::Drag,
            Point::new(400, 0),
        );
        assert!(second.is_noop());
        assert_eq!(machine.state().panel(), Some(&PanelId::from("a")));
    }

    #[test]
    fn resize_uses_incremental_deltas() {
        let registry = PanelRegistry::builtin();
        let ctx = ctx(&registry, 1200, 800);
        let mut store = store_with(Panel::new(
            "c",
            panel_types::CHAT,
            Rect::new(0, 0, 280, 150),
            "Chat",
        ));
        let id = PanelId::from("c");
        let mut machine = GestureMachine::new();
        machine.pointer_down(&store, &ctx, &id, GestureHandle::Resize, Point::new(280, 150));

        machine.pointer_move(&mut store, &ctx, Point::new(400, 250));
        assert_eq!(store.get(&id).unwrap().rect(), Rect::new(0, 0, 400, 260));

        machine.pointer_move(&mut store, &ctx, Point::new(420, 270));
        assert_eq!(store.get(&id).unwrap().rect(), Rect::new(0, 0, 420, 280));
    }

    #[test]
    fn resize_respects_registry_maximum() {
        let registry = PanelRegistry::builtin();
        let ctx = ctx(&registry, 1600, 1000);
        let mut store = store_with(Panel::new(
            "c",
            panel_types::CHAT,
            Rect::new(0, 0, 280, 150),
            "Chat",
        ));
        let id = PanelId::from("c");
        let mut machine = GestureMachine::new();
        machine.pointer_down(&store, &ctx, &id, GestureHandle::Resize, Point::ORIGIN);
        machine.pointer_move(&mut store, &ctx, Point::new(50, 900));
        let rect = store.get(&id).unwrap().rect();
        assert_eq!(rect.height, 400);
        assert_eq!(rect.width, 340);

        machine.pointer_move(&mut store, &ctx, Point::new(-500, 0));
        assert_eq!(store.get(&id).unwrap().rect().width, 280);
    }

    #[test]
    fn degraded_fit_fills_remaining_width_exactly() {
        let registry = PanelRegistry::builtin();
        let config = registry.get(panel_types::GAME_VIEW).unwrap();
        let outcome = resize_step(
            Rect::new(130, 0, 370, 400),
            Point::new(40, 0),
            config,
            ViewportBounds::new(500, 700),
            &LayoutMetrics::DEFAULT,
        );
        assert!(outcome.degraded);
        assert_eq!(outcome.rect.x, 130);
        assert_eq!(outcome.rect.width, 370);
    }

    #[test]
    fn resize_shifts_overflowing_panel_left() {
        let config = PanelConfig::new("Wide", 200, 100);
        let outcome = resize_step(
            Rect::new(-100, 0, 200, 100),
            Point::ORIGIN,
            &config,
            ViewportBounds::new(300, 300),
            &LayoutMetrics::DEFAULT,
        );
        assert!(!outcome.degraded);
        assert!(outcome.rect.x >= 0);
        assert!(outcome.rect.right() <= 300);
    }

    #[test]
    fn removed_panel_makes_moves_noop_until_pointer_up() {
        let registry = PanelRegistry::builtin();
        let ctx = ctx(&registry, 1000, 800);
        let mut store = store_with(Panel::new(
            "p",
            panel_types::CHAT,
            Rect::new(0, 0, 300, 200),
            "Chat",
        ));
        let id = PanelId::from("p");
        let mut machine = GestureMachine::new();
        machine.pointer_down(&store, &ctx, &id, GestureHandle::Resize, Point::ORIGIN);
        store.remove_panel(&id);

        let moved = machine.pointer_move(&mut store, &ctx, Point::new(40, 40));
        assert_eq!(
            moved.effect,
            GestureEffect::Noop {
                reason: GestureNoopReason::PanelMissing
            }
        );
        assert!(machine.is_active());
        assert!(!machine.pointer_up().is_noop());
        assert!(!machine.is_active());
    }

    #[test]
    fn lock_mid_gesture_freezes_panel() {
        let registry = PanelRegistry::builtin();
        let ctx = ctx(&registry, 1000, 800);
        let mut store = store_with(Panel::new(
            "p",
            panel_types::CHAT,
            Rect::new(0, 0, 300, 200),
            "Chat",
        ));
        let id = PanelId::from("p");
        let mut machine = GestureMachine::new();
        machine.pointer_down(&store, &ctx, &id, GestureHandle::Drag, Point::ORIGIN);
        store.toggle_panel_lock(&id);
        let moved = machine.pointer_move(&mut store, &ctx, Point::new(200, 200));
        assert!(moved.is_noop());
        assert_eq!(store.get(&id).unwrap().rect(), Rect::new(0, 0, 300, 200));
    }

    #[test]
    fn idle_inputs_are_noops() {
        let registry = PanelRegistry::builtin();
        let ctx = ctx(&registry, 1000, 800);
        let mut store = PanelStore::new();
        let mut machine = GestureMachine::new();
        assert!(machine.pointer_move(&mut store, &ctx, Point::ORIGIN).is_noop());
        assert!(machine.pointer_up().is_noop());
        assert!(machine.force_cancel().is_none());
    }

    #[test]
    fn force_cancel_returns_to_idle() {
        let registry = PanelRegistry::builtin();
        let ctx = ctx(&registry, 1000, 800);
        let store = store_with(Panel::new("p", "chat", Rect::new(0, 0, 300, 200), "Chat"));
        let id = PanelId::from("p");
        let mut machine = GestureMachine::new();
        machine.pointer_down(&store, &ctx, &id, GestureHandle::Drag, Point::ORIGIN);
        let transition = machine.force_cancel().unwrap();
        assert_eq!(transition.effect, GestureEffect::Canceled { panel: id });
        assert_eq!(machine.state(), &GestureState::Idle);
    }

    #[test]
    fn sequence_increments_per_transition() {
        let mut machine = GestureMachine::new();
        assert_eq!(machine.pointer_up().sequence, 1);
        assert_eq!(machine.pointer_up().sequence, 2);
    }

    #[test]
    fn transition_serializes_with_tags() {
        let transition = GestureTransition {
            sequence: 3,
            from: GestureState::Idle,
            to: GestureState::Dragging {
                panel: PanelId::from("p"),
                pointer_offset: Point::new(1, 2),
            },
            effect: GestureEffect::DragStarted {
                panel: PanelId::from("p"),
                pointer_offset: Point::new(1, 2),
            },
        };
        let json = serde_json::to_value(&transition).unwrap();
        assert_eq!(json["to"]["state"], "dragging");
        assert_eq!(json["effect"]["effect"], "drag_started");
    }

    proptest! {
        #[test]
        fn drag_never_leaves_viewport(
            width in 10i32..400,
            height in 10i32..400,
            moves in prop::collection::vec((-2000i32..3000, -2000i32..3000), 1..20),
        ) {
            let bounds = ViewportBounds::new(1000, 800);
            let mut rect = Rect::new(0, 0, width, height);
            for (px, py) in moves {
                rect = drag_step(rect, Point::new(px, py), Point::new(5, 5), bounds, &LayoutMetrics::DEFAULT);
                prop_assert!(rect.x >= 0 && rect.x <= bounds.width - width);
                prop_assert!(rect.y >= 0 && rect.y <= bounds.height - height);
            }
        }

        #[test]
        fn resize_honors_constraints(
            x in 0i32..900,
            dx in -800i32..800,
            dy in -800i32..800,
        ) {
            let config = PanelConfig::new("Panel", 300, 200).with_max_width(700).with_max_height(500);
            let bounds = ViewportBounds::new(1000, 800);
            let rect = Rect::new(x, 0, 300, 200);
            let outcome = resize_step(rect, Point::new(dx, dy), &config, bounds, &LayoutMetrics::DEFAULT);
            let space = bounds.width - x;
            if space < config.min_width {
                prop_assert!(outcome.degraded);
                prop_assert_eq!(outcome.rect.width, bounds.width - outcome.rect.x);
            } else {
                prop_assert!(outcome.rect.width >= 300 && outcome.rect.width <= 700);
                prop_assert!(outcome.rect.right() <= bounds.width);
            }
            prop_assert!(outcome.rect.height >= 200 && outcome.rect.height <= 500);
        }
    }
}
