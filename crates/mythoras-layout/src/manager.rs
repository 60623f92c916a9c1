#![forbid(unsafe_code)]

//! UI-facing panel manager.
//!
//! [`PanelManager`] owns the panel store, the gesture machine and the current
//! window/sidebar state, and funnels every mutation through the store's
//! operations. Viewport bounds are recomputed from window size and sidebar
//! state on every call, never cached.

use mythoras_core::geometry::Point;
use mythoras_core::metrics::LayoutMetrics;
use mythoras_core::viewport::{ViewportBounds, WindowSize};

use crate::breakpoint::Breakpoint;
use crate::defaults::{DefaultLayoutPolicy, build_default};
use crate::document::{LayoutDocumentError, validate_panels};
use crate::interaction::{
    GestureHandle, GestureMachine, GestureState, GestureTransition, InteractionContext,
};
use crate::panel::{Panel, PanelId, PanelIdAllocator};
use crate::placement::{Placement, place};
use crate::reflow::reflow_panels;
use crate::registry::PanelRegistry;
use crate::store::PanelStore;

/// Result of [`PanelManager::add_panel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddPanelOutcome {
    Added { id: PanelId, placement: Placement },
    /// A main-view panel is already live; nothing was added.
    MainViewExists { existing: PanelId },
}

impl AddPanelOutcome {
    /// Id of the newly added panel, if any.
    #[must_use]
    pub fn added_id(&self) -> Option<&PanelId> {
        match self {
            Self::Added { id, .. } => Some(id),
            Self::MainViewExists { .. } => None,
        }
    }
}

/// Panel layout state plus the operations the UI layer calls.
#[derive(Debug, Clone)]
pub struct PanelManager {
    registry: PanelRegistry,
    metrics: LayoutMetrics,
    window: WindowSize,
    sidebar_open: bool,
    policy: DefaultLayoutPolicy,
    store: PanelStore,
    gestures: GestureMachine,
    ids: PanelIdAllocator,
}

impl PanelManager {
    /// Empty manager with the default window size and the sidebar closed.
    #[must_use]
    pub fn new(registry: PanelRegistry, metrics: LayoutMetrics) -> Self {
        Self {
            registry,
            metrics,
            window: WindowSize::default(),
            sidebar_open: false,
            policy: DefaultLayoutPolicy::default(),
            store: PanelStore::new(),
            gestures: GestureMachine::new(),
            ids: PanelIdAllocator::default(),
        }
    }

    #[must_use]
    pub fn with_window(mut self, window: WindowSize, sidebar_open: bool) -> Self {
        self.window = window;
        self.sidebar_open = sidebar_open;
        self
    }

    #[must_use]
    pub fn with_default_policy(mut self, policy: DefaultLayoutPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        self.store.panels()
    }

    #[must_use]
    pub fn store(&self) -> &PanelStore {
        &self.store
    }

    #[must_use]
    pub fn panel(&self, id: &PanelId) -> Option<&Panel> {
        self.store.get(id)
    }

    #[must_use]
    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    #[must_use]
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn window(&self) -> WindowSize {
        self.window
    }

    #[must_use]
    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    #[must_use]
    pub fn default_policy(&self) -> DefaultLayoutPolicy {
        self.policy
    }

    #[must_use]
    pub fn gesture_state(&self) -> &GestureState {
        self.gestures.state()
    }

    /// Current viewport bounds.
    #[must_use]
    pub fn bounds(&self) -> ViewportBounds {
        ViewportBounds::compute(self.window, self.sidebar_open, &self.metrics)
    }

    #[must_use]
    pub fn available_width(&self) -> i32 {
        self.bounds().width
    }

    #[must_use]
    pub fn available_height(&self) -> i32 {
        self.bounds().height
    }

    #[must_use]
    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::classify(self.available_width())
    }

    /// Place and append a new panel of type `kind`.
    ///
    /// Refused when `kind` is a main-view type and a main view is already
    /// live. Unknown types are added with the fallback size.
    pub fn add_panel(&mut self, kind: &str) -> AddPanelOutcome {
        if self.registry.is_main_view(kind)
            && let Some(existing) = self.store.main_view(&self.registry)
        {
            tracing::debug!(
                target: "mythoras.layout",
                kind,
                existing = %existing.id,
                "main view already present; add refused"
            );
            return AddPanelOutcome::MainViewExists {
                existing: existing.id.clone(),
            };
        }

        let placement = place(
            kind,
            self.store.panels(),
            &self.registry,
            self.bounds(),
            &self.metrics,
        );
        let store = &self.store;
        let id = self.ids.allocate(|candidate| store.contains(candidate));
        let title = self.registry.resolve(kind).title.clone();
        self.store
            .add_panel(Panel::new(id.clone(), kind, placement.rect, title));
        tracing::debug!(
            target: "mythoras.layout",
            panel = %id,
            kind,
            strategy = ?placement.strategy,
            x = placement.rect.x,
            y = placement.rect.y,
            "panel added"
        );
        AddPanelOutcome::Added { id, placement }
    }

    pub fn remove_panel(&mut self, id: &PanelId) -> bool {
        self.store.remove_panel(id)
    }

    pub fn toggle_panel_lock(&mut self, id: &PanelId) -> Option<bool> {
        self.store.toggle_panel_lock(id)
    }

    /// Replace the live set without validation.
    pub fn set_panels(&mut self, panels: Vec<Panel>) {
        self.store.set_panels(panels);
    }

    /// Validate a persisted panel list, then replace the live set with it.
    pub fn load_panels(&mut self, name: &str, panels: Vec<Panel>) -> Result<(), LayoutDocumentError> {
        validate_panels(name, &panels)?;
        self.store.set_panels(panels);
        Ok(())
    }

    /// Current panels, for saving.
    #[must_use]
    pub fn snapshot_panels(&self) -> Vec<Panel> {
        self.store.panels().to_vec()
    }

    /// Replace the live set with the default layout for the current bounds.
    pub fn reset_layout(&mut self) {
        let panels = build_default(self.bounds(), self.policy, &self.registry, &self.metrics);
        self.store.reset_layout(panels);
    }

    /// Seed the default layout when the store is empty. Returns whether it did.
    pub fn seed_default_if_empty(&mut self) -> bool {
        if !self.store.is_empty() {
            return false;
        }
        self.reset_layout();
        true
    }

    fn context(&self) -> (ViewportBounds, LayoutMetrics) {
        (self.bounds(), self.metrics)
    }

    pub fn pointer_down(
        &mut self,
        id: &PanelId,
        handle: GestureHandle,
        pointer: Point,
    ) -> GestureTransition {
        let (bounds, metrics) = self.context();
        let ctx = InteractionContext {
            registry: &self.registry,
            bounds,
            metrics,
        };
        self.gestures
            .pointer_down(&self.store, &ctx, id, handle, pointer)
    }

    pub fn pointer_move(&mut self, pointer: Point) -> GestureTransition {
        let (bounds, metrics) = self.context();
        let ctx = InteractionContext {
            registry: &self.registry,
            bounds,
            metrics,
        };
        self.gestures.pointer_move(&mut self.store, &ctx, pointer)
    }

    pub fn pointer_up(&mut self) -> GestureTransition {
        self.gestures.pointer_up()
    }

    /// Drop the active gesture without a pointer-up.
    pub fn cancel_gesture(&mut self) -> Option<GestureTransition> {
        self.gestures.force_cancel()
    }

    /// Apply a new window size and reflow. Returns how many panels moved.
    pub fn set_window_size(&mut self, window: WindowSize) -> usize {
        let previous = self.bounds();
        self.window = window;
        self.reflow_from(previous)
    }

    /// Open or close the sidebar and reflow. Returns how many panels moved.
    pub fn set_sidebar_open(&mut self, open: bool) -> usize {
        let previous = self.bounds();
        self.sidebar_open = open;
        self.reflow_from(previous)
    }

    fn reflow_from(&mut self, previous: ViewportBounds) -> usize {
        let next = self.bounds();
        if next == previous {
            return 0;
        }
        let mut panels = std::mem::take(&mut self.store).into_panels();
        let changed = reflow_panels(&mut panels, previous, next, &self.registry);
        self.store.set_panels(panels);
        changed
    }
}
