#![forbid(unsafe_code)]

//! Runtime services around the layout engine: the tick simulation, layout
//! storage, configuration and logging setup.

pub mod config;
pub mod library;
pub mod logging;
pub mod simulation;
pub mod storage;

pub use config::{
    ConfigError, DefaultLayoutConfig, PersistenceConfig, ShellConfig, SimulationConfig,
    WindowConfig,
};
pub use library::{DEFAULT_LAYOUT_KEY, LayoutLibrary, LibraryError, LibraryResult};
pub use logging::{LogFormat, LoggingConfig, LoggingError};
pub use simulation::{
    Command, DEFAULT_TICK_MS, MAX_STEPS_PER_ADVANCE, Reducer, SimulationEngine, SimulationError,
    Snapshot, StateMap, command_types,
};
pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageError, StorageResult};
