#![forbid(unsafe_code)]

//! Named layouts persisted as one [`LayoutDocument`] under a storage key.
//!
//! Every read goes through [`LayoutDocument::from_json_str`], so legacy
//! documents are migrated and malformed ones are rejected here rather than
//! inside the panel store. Writes always produce the current schema version.

use std::fmt;

use mythoras_layout::{LayoutDocument, LayoutDocumentError, Panel};

use crate::storage::{StorageBackend, StorageError};

/// Storage key used for the layout document.
pub const DEFAULT_LAYOUT_KEY: &str = "mythoras-layouts";

#[derive(Debug)]
pub enum LibraryError {
    Storage(StorageError),
    Document(LayoutDocumentError),
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "layout storage error: {e}"),
            Self::Document(e) => write!(f, "layout document error: {e}"),
        }
    }
}

impl std::error::Error for LibraryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e),
            Self::Document(e) => Some(e),
        }
    }
}

impl From<StorageError> for LibraryError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<LayoutDocumentError> for LibraryError {
    fn from(e: LayoutDocumentError) -> Self {
        Self::Document(e)
    }
}

pub type LibraryResult<T> = Result<T, LibraryError>;

/// Save/load named layouts through a [`StorageBackend`].
#[derive(Debug)]
pub struct LayoutLibrary<S> {
    storage: S,
    key: String,
}

impl<S: StorageBackend> LayoutLibrary<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_LAYOUT_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Current document. A missing key is an empty document.
    pub fn document(&self) -> LibraryResult<LayoutDocument> {
        let Some(raw) = self.storage.load(&self.key)? else {
            return Ok(LayoutDocument::new());
        };
        let migrated = LayoutDocument::from_json_str(&raw)?;
        if migrated.from_version != migrated.to_version {
            tracing::info!(
                target: "mythoras.storage",
                key = %self.key,
                from = migrated.from_version,
                to = migrated.to_version,
                dropped = migrated.warnings.len(),
                "layout document migrated"
            );
        }
        Ok(migrated.document)
    }

    fn write(&mut self, document: &LayoutDocument) -> LibraryResult<()> {
        let raw = document.to_json_string()?;
        self.storage.save(&self.key, &raw)?;
        Ok(())
    }

    /// Store `panels` under `name`, replacing any layout of that name.
    pub fn save_layout(&mut self, name: &str, panels: &[Panel]) -> LibraryResult<()> {
        let mut document = self.document()?;
        let replaced = document.insert(name, panels.to_vec())?;
        self.write(&document)?;
        tracing::debug!(
            target: "mythoras.storage",
            backend = self.storage.name(),
            layout = name,
            panels = panels.len(),
            replaced = replaced.is_some(),
            "layout saved"
        );
        Ok(())
    }

    /// Panels saved under `name`, if any.
    pub fn load_layout(&self, name: &str) -> LibraryResult<Option<Vec<Panel>>> {
        let mut document = self.document()?;
        Ok(document.remove(name))
    }

    /// Returns whether a layout was removed.
    pub fn delete_layout(&mut self, name: &str) -> LibraryResult<bool> {
        let mut document = self.document()?;
        if document.remove(name).is_none() {
            return Ok(false);
        }
        self.write(&document)?;
        Ok(true)
    }

    /// Saved layout names, sorted.
    pub fn names(&self) -> LibraryResult<Vec<String>> {
        Ok(self
            .document()?
            .names()
            .into_iter()
            .map(str::to_owned)
            .collect())
    }
}
