//! Persisted layout document: named layouts with a schema version.
//!
//! A [`LayoutDocument`] maps layout names to panel lists and is stored as a
//! single JSON value. Everything loaded from storage passes through
//! [`LayoutDocument::from_json_str`], which migrates and validates it, so the
//! panel store never sees a malformed list.
//!
//! # Schema Versioning Policy
//!
//! - Version 0 is the unversioned `{ "<name>": Panel[] }` map written by
//!   earlier builds. It migrates to v1; entries that are not panel arrays are
//!   dropped with a warning.
//! - Breaking changes require incrementing [`LAYOUT_DOCUMENT_SCHEMA_VERSION`]
//!   and adding a migration path. Newer versions are rejected.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::panel::{Panel, PanelId};

/// Current layout document schema version.
pub const LAYOUT_DOCUMENT_SCHEMA_VERSION: u16 = 1;

/// Version assigned to the unversioned legacy map.
pub const LEGACY_SCHEMA_VERSION: u16 = 0;

const SCHEMA_VERSION_KEY: &str = "schema_version";

fn default_schema_version() -> u16 {
    LAYOUT_DOCUMENT_SCHEMA_VERSION
}

/// Named layouts, ordered by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDocument {
    #[serde(default = "default_schema_version")]
    pub schema_version: u16,
    #[serde(default)]
    pub layouts: BTreeMap<String, Vec<Panel>>,
}

impl Default for LayoutDocument {
    fn default() -> Self {
        Self {
            schema_version: LAYOUT_DOCUMENT_SCHEMA_VERSION,
            layouts: BTreeMap::new(),
        }
    }
}

/// Errors from loading, migrating or validating a layout document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutDocumentError {
    /// Version is newer than this build understands.
    UnsupportedVersion { found: u16, expected: u16 },
    /// No migration is implemented from the given version.
    NoMigrationPath { from: u16, to: u16 },
    /// The JSON could not be parsed or produced.
    Json { reason: String },
    /// The top-level JSON value is not an object.
    NotAnObject,
    /// A layout name is empty or whitespace.
    EmptyLayoutName,
    EmptyPanelId { layout: String },
    DuplicatePanelId { layout: String, id: PanelId },
    NegativeSize {
        layout: String,
        id: PanelId,
        width: i32,
        height: i32,
    },
}

impl fmt::Display for LayoutDocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, expected } => write!(
                f,
                "unsupported layout schema version {found} (expected {expected})"
            ),
            Self::NoMigrationPath { from, to } => {
                write!(f, "no migration path from v{from} to v{to}")
            }
            Self::Json { reason } => write!(f, "layout document JSON error: {reason}"),
            Self::NotAnObject => write!(f, "layout document must be a JSON object"),
            Self::EmptyLayoutName => write!(f, "layout name must not be empty"),
            Self::EmptyPanelId { layout } => {
                write!(f, "layout {layout:?} contains a panel with an empty id")
            }
            Self::DuplicatePanelId { layout, id } => {
                write!(f, "layout {layout:?} contains duplicate panel id {id}")
            }
            Self::NegativeSize {
                layout,
                id,
                width,
                height,
            } => write!(
                f,
                "layout {layout:?} panel {id} has negative size {width}x{height}"
            ),
        }
    }
}

impl std::error::Error for LayoutDocumentError {}

impl From<serde_json::Error> for LayoutDocumentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            reason: err.to_string(),
        }
    }
}

/// Check the shape of one panel list before it reaches the store.
pub fn validate_panels(layout: &str, panels: &[Panel]) -> Result<(), LayoutDocumentError> {
    let mut seen = HashSet::with_capacity(panels.len());
    for panel in panels {
        if panel.id.as_str().is_empty() {
            return Err(LayoutDocumentError::EmptyPanelId {
                layout: layout.to_owned(),
            });
        }
        if !seen.insert(&panel.id) {
            return Err(LayoutDocumentError::DuplicatePanelId {
                layout: layout.to_owned(),
                id: panel.id.clone(),
            });
        }
        if panel.width < 0 || panel.height < 0 {
            return Err(LayoutDocumentError::NegativeSize {
                layout: layout.to_owned(),
                id: panel.id.clone(),
                width: panel.width,
                height: panel.height,
            });
        }
    }
    Ok(())
}

/// A document brought to the current schema version.
#[derive(Debug, Clone)]
pub struct MigrationResult {
    pub document: LayoutDocument,
    pub from_version: u16,
    pub to_version: u16,
    /// Entries dropped or adjusted along the way.
    pub warnings: Vec<String>,
}

impl LayoutDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Panel]> {
        self.layouts.get(name).map(Vec::as_slice)
    }

    /// Store `panels` under `name`, returning the layout it replaced.
    ///
    /// Blank names and malformed panel lists are rejected.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        panels: Vec<Panel>,
    ) -> Result<Option<Vec<Panel>>, LayoutDocumentError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LayoutDocumentError::EmptyLayoutName);
        }
        validate_panels(&name, &panels)?;
        Ok(self.layouts.insert(name, panels))
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<Panel>> {
        self.layouts.remove(name)
    }

    /// Layout names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.layouts.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Validate the version and every layout.
    pub fn validate(&self) -> Result<(), LayoutDocumentError> {
        if self.schema_version != LAYOUT_DOCUMENT_SCHEMA_VERSION {
            return Err(LayoutDocumentError::UnsupportedVersion {
                found: self.schema_version,
                expected: LAYOUT_DOCUMENT_SCHEMA_VERSION,
            });
        }
        for (name, panels) in &self.layouts {
            if name.trim().is_empty() {
                return Err(LayoutDocumentError::EmptyLayoutName);
            }
            validate_panels(name, panels)?;
        }
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String, LayoutDocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse, migrate and validate a stored document.
    pub fn from_json_str(raw: &str) -> Result<MigrationResult, LayoutDocumentError> {
        let value: Value = serde_json::from_str(raw)?;
        migrate_value(value)
    }
}

/// Bring a raw JSON value to the current schema and validate it.
pub fn migrate_value(value: Value) -> Result<MigrationResult, LayoutDocumentError> {
    let Value::Object(map) = value else {
        return Err(LayoutDocumentError::NotAnObject);
    };

    let Some(version) = map.get(SCHEMA_VERSION_KEY) else {
        return migrate_legacy(map);
    };
    let version = version
        .as_u64()
        .and_then(|v| u16::try_from(v).ok())
        .ok_or_else(|| LayoutDocumentError::Json {
            reason: format!("{SCHEMA_VERSION_KEY} must be an unsigned 16-bit integer"),
        })?;

    match version {
        LAYOUT_DOCUMENT_SCHEMA_VERSION => {
            let document: LayoutDocument = serde_json::from_value(Value::Object(map))?;
            document.validate()?;
            Ok(MigrationResult {
                document,
                from_version: LAYOUT_DOCUMENT_SCHEMA_VERSION,
                to_version: LAYOUT_DOCUMENT_SCHEMA_VERSION,
                warnings: Vec::new(),
            })
        }
        v if v > LAYOUT_DOCUMENT_SCHEMA_VERSION => Err(LayoutDocumentError::UnsupportedVersion {
            found: v,
            expected: LAYOUT_DOCUMENT_SCHEMA_VERSION,
        }),
        v => Err(LayoutDocumentError::NoMigrationPath {
            from: v,
            to: LAYOUT_DOCUMENT_SCHEMA_VERSION,
        }),
    }
}

fn migrate_legacy(
    map: serde_json::Map<String, Value>,
) -> Result<MigrationResult, LayoutDocumentError> {
    let mut document = LayoutDocument::new();
    let mut warnings = Vec::new();
    for (name, entry) in map {
        if name.trim().is_empty() {
            warnings.push("skipped layout with an empty name".to_owned());
            continue;
        }
        if !entry.is_array() {
            warnings.push(format!("skipped layout {name:?}: not a panel list"));
            continue;
        }
        let panels: Vec<Panel> = match serde_json::from_value(entry) {
            Ok(panels) => panels,
            Err(err) => {
                warnings.push(format!("skipped layout {name:?}: {err}"));
                continue;
            }
        };
        if let Err(err) = validate_panels(&name, &panels) {
            warnings.push(format!("skipped layout {name:?}: {err}"));
            continue;
        }
        document.layouts.insert(name, panels);
    }
    for warning in &warnings {
        tracing::warn!(target: "mythoras.storage", %warning, "legacy layout migration");
    }
    Ok(MigrationResult {
        document,
        from_version: LEGACY_SCHEMA_VERSION,
        to_version: LAYOUT_DOCUMENT_SCHEMA_VERSION,
        warnings,
    })
}

/// Whether a document is behind the current schema.
#[must_use]
pub fn needs_migration(document: &LayoutDocument) -> bool {
    document.schema_version != LAYOUT_DOCUMENT_SCHEMA_VERSION
}
