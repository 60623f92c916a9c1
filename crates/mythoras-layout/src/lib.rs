#![forbid(unsafe_code)]

//! Panel layout engine: registry, store, placement, drag/resize and persisted
//! layout documents.

pub mod breakpoint;
pub mod defaults;
pub mod document;
pub mod interaction;
pub mod manager;
pub mod panel;
pub mod placement;
pub mod reflow;
pub mod registry;
pub mod store;

pub use breakpoint::Breakpoint;
pub use defaults::{DefaultLayoutPolicy, MAIN_PANEL_ID, build_default};
pub use document::{
    LAYOUT_DOCUMENT_SCHEMA_VERSION, LEGACY_SCHEMA_VERSION, LayoutDocument, LayoutDocumentError,
    MigrationResult, migrate_value, needs_migration, validate_panels,
};
pub use interaction::{
    GestureEffect, GestureHandle, GestureMachine, GestureNoopReason, GestureState,
    GestureTransition, InteractionContext, ResizeOutcome, drag_step, resize_step,
};
pub use manager::{AddPanelOutcome, PanelManager};
pub use mythoras_core::geometry::{Point, Rect};
pub use mythoras_core::metrics::LayoutMetrics;
pub use mythoras_core::viewport::{ViewportBounds, WindowSize};
pub use panel::{Panel, PanelId, PanelIdAllocator};
pub use placement::{
    FALLBACK_PANEL_SIZE, Placement, PlacementStrategy, collides, has_collision, place,
};
pub use reflow::reflow_panels;
pub use registry::{PanelConfig, PanelRegistry, panel_types};
pub use store::PanelStore;
