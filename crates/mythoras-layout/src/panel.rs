//! Panel model: identity, geometry and lock state of one placed panel.

use std::fmt;

use mythoras_core::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Opaque, stable panel identifier.
///
/// Ids are plain strings so layouts saved by older builds (which used
/// timestamps and hand-written names such as `main-game`) load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(String);

impl PanelId {
    /// Wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PanelId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PanelId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// A placed, live panel instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub id: PanelId,
    /// Registry key; determines default title and size constraints.
    #[serde(rename = "type")]
    pub kind: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub title: String,
    /// Locked panels ignore drag, resize and automatic repositioning.
    #[serde(default)]
    pub locked: bool,
}

impl Panel {
    /// Build an unlocked panel occupying `rect`.
    pub fn new(
        id: impl Into<PanelId>,
        kind: impl Into<String>,
        rect: Rect,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            title: title.into(),
            locked: false,
        }
    }

    /// Set the lock flag (builder pattern).
    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Current bounds.
    #[inline]
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Overwrite position and size.
    #[inline]
    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }
}

/// Deterministic allocator for fresh panel ids (`panel-1`, `panel-2`, ...).
///
/// Allocation skips any id the caller reports as taken, so ids stay unique
/// after a persisted layout with arbitrary ids has been loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelIdAllocator {
    next: u64,
}

impl PanelIdAllocator {
    const PREFIX: &'static str = "panel";

    /// Allocate the next id that `in_use` does not claim.
    pub fn allocate(&mut self, in_use: impl Fn(&PanelId) -> bool) -> PanelId {
        loop {
            let candidate = PanelId(format!("{}-{}", Self::PREFIX, self.next));
            self.next = self.next.wrapping_add(1);
            if !in_use(&candidate) {
                return candidate;
            }
        }
    }
}

impl Default for PanelIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_key() {
        let panel = Panel::new("p1", "chat", Rect::new(20, 40, 280, 150), "Chat");
        let json = serde_json::to_value(&panel).unwrap();
        assert_eq!(json["type"], "chat");
        assert_eq!(json["id"], "p1");
        assert_eq!(json["locked"], false);
    }

    #[test]
    fn missing_locked_defaults_to_false() {
        let panel: Panel = serde_json::from_str(
            r#"{"id":"main-game","type":"gameview","x":0,"y":0,"width":800,"height":450,"title":"Game View"}"#,
        )
        .unwrap();
        assert!(!panel.locked);
        assert_eq!(panel.rect(), Rect::new(0, 0, 800, 450));
    }

    #[test]
    fn set_rect_overwrites_geometry() {
        let mut panel = Panel::new("p1", "chat", Rect::new(0, 0, 10, 10), "Chat").with_locked(true);
        panel.set_rect(Rect::new(5, 6, 7, 8));
        assert_eq!(panel.rect(), Rect::new(5, 6, 7, 8));
        assert!(panel.locked);
    }

    #[test]
    fn allocator_is_sequential() {
        let mut ids = PanelIdAllocator::default();
        assert_eq!(ids.allocate(|_| false).as_str(), "panel-1");
        assert_eq!(ids.allocate(|_| false).as_str(), "panel-2");
        assert_eq!(ids.allocate(|_| false).as_str(), "panel-3");
    }

    #[test]
    fn allocator_skips_taken_ids() {
        let mut ids = PanelIdAllocator::default();
        let taken = [PanelId::from("panel-1"), PanelId::from("panel-2")];
        let id = ids.allocate(|candidate| taken.contains(candidate));
        assert_eq!(id.as_str(), "panel-3");
    }
}
