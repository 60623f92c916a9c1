//! Panel registry: static display metadata and size constraints per panel type.
//!
//! The registry is read-only once a [`PanelManager`](crate::PanelManager) is
//! built. A lookup miss is treated leniently: [`PanelRegistry::resolve`]
//! returns an unconstrained, resizable entry titled after the type instead of
//! failing, and placement falls back to a small fixed size.

use std::borrow::Cow;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Type keys of the built-in panels.
pub mod panel_types {
    pub const GAME_VIEW: &str = "gameview";
    pub const INVENTORY: &str = "inventory";
    pub const WORLD_MAP: &str = "worldmap";
    pub const CHAT: &str = "chat";
    pub const PASSIVE_TREE: &str = "passivetree";
    pub const CREATURES: &str = "creatures";
    pub const SQUAD: &str = "squad";
    pub const SCOUTING: &str = "scouting";
    pub const COMPETITIONS: &str = "competitions";
    pub const INBOX: &str = "inbox";
}

fn default_true() -> bool {
    true
}

/// Registry entry for one panel type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub title: String,
    /// Icon key understood by the host UI.
    #[serde(default)]
    pub icon: String,
    pub min_width: i32,
    pub min_height: i32,
    #[serde(default)]
    pub max_width: Option<i32>,
    #[serde(default)]
    pub max_height: Option<i32>,
    /// Marks the singleton primary panel used as the adjacency anchor.
    #[serde(default)]
    pub is_main_view: bool,
    #[serde(default = "default_true")]
    pub can_resize: bool,
}

impl PanelConfig {
    /// Resizable, unbounded entry with the given minimum size.
    pub fn new(title: impl Into<String>, min_width: i32, min_height: i32) -> Self {
        Self {
            title: title.into(),
            icon: String::new(),
            min_width,
            min_height,
            max_width: None,
            max_height: None,
            is_main_view: false,
            can_resize: true,
        }
    }

    /// Entry used for types the registry does not know.
    #[must_use]
    pub fn unconstrained(kind: &str) -> Self {
        Self::new(kind, 0, 0)
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    #[must_use]
    pub fn with_max_width(mut self, max_width: i32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    #[must_use]
    pub fn with_max_height(mut self, max_height: i32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    #[must_use]
    pub fn main_view(mut self) -> Self {
        self.is_main_view = true;
        self
    }

    #[must_use]
    pub fn with_resize(mut self, can_resize: bool) -> Self {
        self.can_resize = can_resize;
        self
    }

    /// Validate ranges for the entry registered under `kind`.
    #[must_use]
    pub fn validate(&self, kind: &str) -> Vec<String> {
        let mut errors = Vec::new();
        if self.min_width < 0 || self.min_height < 0 {
            errors.push(format!(
                "panels.{kind}: minimum size must be non-negative, got {}x{}",
                self.min_width, self.min_height
            ));
        }
        if let Some(max_width) = self.max_width
            && max_width < self.min_width
        {
            errors.push(format!(
                "panels.{kind}: max_width {max_width} is below min_width {}",
                self.min_width
            ));
        }
        if let Some(max_height) = self.max_height
            && max_height < self.min_height
        {
            errors.push(format!(
                "panels.{kind}: max_height {max_height} is below min_height {}",
                self.min_height
            ));
        }
        errors
    }
}

/// Read-only mapping from panel type to [`PanelConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelRegistry {
    entries: FxHashMap<String, PanelConfig>,
}

impl PanelRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The ten panel types shipped with the shell.
    #[must_use]
    pub fn builtin() -> Self {
        use panel_types::*;

        let mut registry = Self::new();
        registry.register(
            GAME_VIEW,
            PanelConfig::new("Game View", 600, 400)
                .with_icon("monitor")
                .with_max_width(1200)
                .with_max_height(800)
                .main_view(),
        );
        registry.register(
            INVENTORY,
            PanelConfig::new("Inventory", 380, 420)
                .with_icon("package")
                .with_max_width(600)
                .with_max_height(650),
        );
        registry.register(
            WORLD_MAP,
            PanelConfig::new("World Map", 450, 400)
                .with_icon("map")
                .with_max_width(800)
                .with_max_height(700),
        );
        registry.register(
            CHAT,
            PanelConfig::new("Chat", 280, 150)
                .with_icon("message-square")
                .with_max_height(400),
        );
        registry.register(
            PASSIVE_TREE,
            PanelConfig::new("Passive Tree", 500, 400).with_icon("git-branch"),
        );
        registry.register(
            CREATURES,
            PanelConfig::new("Creatures", 320, 400).with_icon("users"),
        );
        registry.register(SQUAD, PanelConfig::new("Squad", 350, 300).with_icon("users"));
        registry.register(
            SCOUTING,
            PanelConfig::new("Scouting", 350, 400).with_icon("search"),
        );
        registry.register(
            COMPETITIONS,
            PanelConfig::new("Competitions", 380, 450)
                .with_icon("trophy")
                .with_max_width(600)
                .with_max_height(700),
        );
        registry.register(INBOX, PanelConfig::new("Inbox", 350, 400).with_icon("inbox"));
        registry
    }

    /// Add or replace an entry, returning the previous one.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        config: PanelConfig,
    ) -> Option<PanelConfig> {
        self.entries.insert(kind.into(), config)
    }

    /// Exact lookup.
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&PanelConfig> {
        self.entries.get(kind)
    }

    /// Lookup with the lenient fallback for unknown types.
    #[must_use]
    pub fn resolve(&self, kind: &str) -> Cow<'_, PanelConfig> {
        match self.entries.get(kind) {
            Some(config) => Cow::Borrowed(config),
            None => Cow::Owned(PanelConfig::unconstrained(kind)),
        }
    }

    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    /// Whether `kind` is registered as a main-view type.
    #[must_use]
    pub fn is_main_view(&self, kind: &str) -> bool {
        self.entries.get(kind).is_some_and(|config| config.is_main_view)
    }

    /// Registered type keys, sorted for deterministic iteration.
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validation messages for every entry, in type order.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        self.kinds()
            .into_iter()
            .flat_map(|kind| self.entries[kind].validate(kind))
            .collect()
    }
}
