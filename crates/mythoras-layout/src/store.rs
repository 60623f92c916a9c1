//! Panel store: the authoritative collection of live panels.
//!
//! All mutation goes through the operations below. The store performs no
//! validation and no persistence; callers (placement, the default layout
//! builder, layout loaders) are responsible for the shape of what they hand in.

use crate::panel::{Panel, PanelId};
use crate::registry::PanelRegistry;

/// Ordered collection of live panels (render order = insertion order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelStore {
    panels: Vec<Panel>,
}

impl PanelStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_panels(panels: Vec<Panel>) -> Self {
        Self { panels }
    }

    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &PanelId) -> Option<&Panel> {
        self.panels.iter().find(|panel| &panel.id == id)
    }

    #[must_use]
    pub fn get_mut(&mut self, id: &PanelId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|panel| &panel.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &PanelId) -> bool {
        self.get(id).is_some()
    }

    /// First panel whose type is registered as the main view.
    #[must_use]
    pub fn main_view(&self, registry: &PanelRegistry) -> Option<&Panel> {
        self.panels
            .iter()
            .find(|panel| registry.is_main_view(&panel.kind))
    }

    /// Replace the whole live set.
    pub fn set_panels(&mut self, panels: Vec<Panel>) {
        self.panels = panels;
    }

    /// Replace the whole live set with a freshly built default layout.
    pub fn reset_layout(&mut self, panels: Vec<Panel>) {
        self.set_panels(panels);
    }

    /// Append one fully formed panel.
    pub fn add_panel(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    /// Remove by id. Returns whether a panel was removed.
    pub fn remove_panel(&mut self, id: &PanelId) -> bool {
        let before = self.panels.len();
        self.panels.retain(|panel| &panel.id != id);
        self.panels.len() != before
    }

    /// Flip the lock flag. Returns the new flag, or `None` if absent.
    pub fn toggle_panel_lock(&mut self, id: &PanelId) -> Option<bool> {
        let panel = self.get_mut(id)?;
        panel.locked = !panel.locked;
        Some(panel.locked)
    }


    #[must_use]
    pub fn into_panels(self) -> Vec<Panel> {
        self.panels
    }
}
