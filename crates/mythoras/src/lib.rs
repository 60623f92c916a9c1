#![forbid(unsafe_code)]

//! Mythoras shell public facade.
//!
//! Re-exports the layout engine and runtime services and offers [`Shell`],
//! which wires configuration, the panel manager, the layout library and the
//! simulation engine together.

use std::fmt;

pub mod shell;

// --- Core re-exports -------------------------------------------------------

pub use mythoras_core::{LayoutMetrics, Point, Rect, ViewportBounds, WindowSize, snap_to_grid};

// --- Layout re-exports -----------------------------------------------------

pub use mythoras_layout::{
    AddPanelOutcome, Breakpoint, DefaultLayoutPolicy, GestureEffect, GestureHandle,
    GestureNoopReason, GestureState, GestureTransition, LayoutDocument, LayoutDocumentError,
    Panel, PanelConfig, PanelId, PanelManager, PanelRegistry, Placement, PlacementStrategy,
    panel_types,
};

// --- Runtime re-exports ----------------------------------------------------

pub use mythoras_runtime::{
    Command, ConfigError, FileStorage, LayoutLibrary, LibraryError, LogFormat, LoggingConfig,
    LoggingError, MemoryStorage, ShellConfig, SimulationEngine, SimulationError, Snapshot,
    StorageBackend, StorageError, command_types,
};
pub use mythoras_runtime::logging::init as init_logging;

pub use shell::Shell;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for the shell.
#[derive(Debug)]
pub enum Error {
    Config(ConfigError),
    Library(LibraryError),
    Layout(LayoutDocumentError),
    Simulation(SimulationError),
    Logging(LoggingError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Library(err) => write!(f, "{err}"),
            Self::Layout(err) => write!(f, "{err}"),
            Self::Simulation(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Library(err) => Some(err),
            Self::Layout(err) => Some(err),
            Self::Simulation(err) => Some(err),
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<LibraryError> for Error {
    fn from(err: LibraryError) -> Self {
        Self::Library(err)
    }
}

impl From<LayoutDocumentError> for Error {
    fn from(err: LayoutDocumentError) -> Self {
        Self::Layout(err)
    }
}

impl From<SimulationError> for Error {
    fn from(err: SimulationError) -> Self {
        Self::Simulation(err)
    }
}

impl From<LoggingError> for Error {
    fn from(err: LoggingError) -> Self {
        Self::Logging(err)
    }
}

/// Standard result type for shell APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Command, Error, GestureHandle, Panel, PanelId, PanelManager, Point, Rect, Result, Shell,
        ShellConfig, SimulationEngine, panel_types,
    };

    pub use crate::{core, layout, runtime};
}

pub use mythoras_core as core;
pub use mythoras_layout as layout;
pub use mythoras_runtime as runtime;
