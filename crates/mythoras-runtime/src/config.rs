#![forbid(unsafe_code)]

//! Shell configuration loaded from TOML or JSON at startup.
//!
//! ```toml
//! # mythoras.toml
//! [layout]
//! grid_size = 20
//! header_height = 56
//!
//! [window]
//! width = 1600
//! height = 900
//!
//! [default_layout]
//! policy = "main_with_auxiliary"
//!
//! [simulation]
//! tick_ms = 50
//!
//! [logging]
//! level = "info,mythoras.gesture=debug"
//! format = "json"
//!
//! [panels.roster]
//! title = "Roster"
//! min_width = 300
//! min_height = 200
//! ```
//!
//! Every section is optional and defaults to the built-in values, so
//! `ShellConfig::default()` behaves exactly like an empty file. Entries under
//! `[panels.<type>]` replace or extend the built-in panel registry.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mythoras_layout::{
    DefaultLayoutPolicy, LayoutMetrics, PanelConfig, PanelManager, PanelRegistry, WindowSize,
};
use serde::{Deserialize, Serialize};

use crate::library::DEFAULT_LAYOUT_KEY;
use crate::logging::LoggingConfig;
use crate::simulation::DEFAULT_TICK_MS;

/// Top-level shell configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub layout: LayoutMetrics,
    pub window: WindowConfig,
    pub default_layout: DefaultLayoutConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
    pub persistence: PersistenceConfig,
    /// Registry overrides and additions keyed by panel type.
    pub panels: BTreeMap<String, PanelConfig>,
}

/// Initial window state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub sidebar_open: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        let window = WindowSize::default();
        Self {
            width: window.width,
            height: window.height,
            sidebar_open: false,
        }
    }
}

impl WindowConfig {
    #[must_use]
    pub const fn size(&self) -> WindowSize {
        WindowSize::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultLayoutConfig {
    pub policy: DefaultLayoutPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Step interval in milliseconds.
    pub tick_ms: u64,
    /// Start the engine as soon as the shell is built.
    pub autostart: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            autostart: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Key the layout document is stored under.
    pub storage_key: String,
    /// Directory for file-backed storage. `None` keeps layouts in memory.
    pub directory: Option<PathBuf>,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_LAYOUT_KEY.to_owned(),
            directory: None,
        }
    }
}

impl ShellConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load a file, choosing the parser by extension (`.json`, else TOML),
    /// and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path)?,
            _ => Self::from_toml_file(path)?,
        };
        config.validated()
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.layout.validate();

        if self.window.width <= 0 || self.window.height <= 0 {
            errors.push(format!(
                "window size must be positive, got {}x{}",
                self.window.width, self.window.height
            ));
        }

        if self.simulation.tick_ms == 0 {
            errors.push("simulation.tick_ms must be > 0".into());
        }

        errors.extend(self.logging.validate());

        if self.persistence.storage_key.trim().is_empty() {
            errors.push("persistence.storage_key must not be empty".into());
        }

        for (kind, config) in &self.panels {
            if kind.trim().is_empty() {
                errors.push("panels: type name must not be empty".into());
            }
            errors.extend(config.validate(kind));
        }

        let registry = self.build_registry();
        let main_views: Vec<&str> = registry
            .kinds()
            .into_iter()
            .filter(|kind| registry.is_main_view(kind))
            .collect();
        if main_views.len() > 1 {
            errors.push(format!(
                "at most one panel type may be the main view, got {}",
                main_views.join(", ")
            ));
        }

        errors
    }

    /// `self` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Built-in registry with `[panels]` entries applied on top.
    #[must_use]
    pub fn build_registry(&self) -> PanelRegistry {
        let mut registry = PanelRegistry::builtin();
        for (kind, config) in &self.panels {
            registry.register(kind.clone(), config.clone());
        }
        registry
    }

    /// Panel manager configured from the layout, window and default-layout
    /// sections. The store starts empty.
    #[must_use]
    pub fn build_manager(&self) -> PanelManager {
        PanelManager::new(self.build_registry(), self.layout)
            .with_window(self.window.size(), self.window.sidebar_open)
            .with_default_policy(self.default_layout.policy)
    }
}

/// Errors that can occur when loading a shell configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
