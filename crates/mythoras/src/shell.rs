#![forbid(unsafe_code)]

//! The assembled shell: one panel manager, one layout library and one
//! simulation engine built from a [`ShellConfig`].

use std::time::Duration;

use mythoras_layout::PanelManager;
use mythoras_runtime::{
    ConfigError, FileStorage, LayoutLibrary, MemoryStorage, ShellConfig, SimulationEngine,
    StorageBackend,
};

use crate::Result;

/// Panel manager, layout library and simulation built from one config.
#[derive(Debug)]
pub struct Shell<S> {
    config: ShellConfig,
    panels: PanelManager,
    library: LayoutLibrary<S>,
    simulation: SimulationEngine,
    active_layout: Option<String>,
}

impl Shell<MemoryStorage> {
    /// Shell whose saved layouts live only as long as the process.
    pub fn in_memory(config: ShellConfig) -> Result<Self> {
        Self::new(config, MemoryStorage::new())
    }
}

impl Shell<FileStorage> {
    /// Shell storing layouts under `persistence.directory`.
    pub fn open(config: ShellConfig) -> Result<Self> {
        let Some(directory) = config.persistence.directory.clone() else {
            return Err(ConfigError::Validation(vec![
                "persistence.directory must be set for file storage".to_owned(),
            ])
            .into());
        };
        Self::new(config, FileStorage::new(directory))
    }
}

impl<S: StorageBackend> Shell<S> {
    /// Validate `config` and build the shell. The panel store is seeded with
    /// the default layout, and the simulation starts if `autostart` is set.
    pub fn new(config: ShellConfig, storage: S) -> Result<Self> {
        let config = config.validated()?;
        let mut panels = config.build_manager();
        panels.seed_default_if_empty();

        let library = LayoutLibrary::with_key(storage, config.persistence.storage_key.clone());

        let mut simulation = SimulationEngine::default();
        if config.simulation.autostart {
            simulation.start(config.simulation.tick_ms);
        }

        tracing::info!(
            target: "mythoras.layout",
            backend = library.storage().name(),
            panels = panels.panels().len(),
            policy = ?config.default_layout.policy,
            "shell ready"
        );

        Ok(Self {
            config,
            panels,
            library,
            simulation,
            active_layout: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    #[must_use]
    pub fn panels(&self) -> &PanelManager {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut PanelManager {
        &mut self.panels
    }

    #[must_use]
    pub fn simulation(&self) -> &SimulationEngine {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut SimulationEngine {
        &mut self.simulation
    }

    pub fn library(&self) -> &LayoutLibrary<S> {
        &self.library
    }

    /// Name of the layout most recently saved or loaded.
    #[must_use]
    pub fn active_layout(&self) -> Option<&str> {
        self.active_layout.as_deref()
    }

    /// Start the simulation at the configured interval.
    pub fn start_simulation(&mut self) {
        self.simulation.start(self.config.simulation.tick_ms);
    }

    pub fn stop_simulation(&mut self) {
        self.simulation.stop();
    }

    /// Feed frame time to the simulation. Returns the number of steps run.
    pub fn tick(&mut self, elapsed: Duration) -> u32 {
        self.simulation.advance(elapsed)
    }

    /// Save the current panels under `name`.
    pub fn save_layout(&mut self, name: &str) -> Result<()> {
        self.library.save_layout(name, self.panels.panels())?;
        self.active_layout = Some(name.to_owned());
        Ok(())
    }

    /// Replace the live panels with the layout saved under `name`.
    ///
    /// Any active gesture is cancelled once the new panels are in place.
    /// Returns `false` when no such layout exists; on `false` or an error the
    /// panels and the gesture are left untouched.
    pub fn load_layout(&mut self, name: &str) -> Result<bool> {
        let Some(panels) = self.library.load_layout(name)? else {
            return Ok(false);
        };
        self.panels.load_panels(name, panels)?;
        self.panels.cancel_gesture();
        self.active_layout = Some(name.to_owned());
        Ok(true)
    }

    pub fn delete_layout(&mut self, name: &str) -> Result<bool> {
        let removed = self.library.delete_layout(name)?;
        if removed && self.active_layout.as_deref() == Some(name) {
            self.active_layout = None;
        }
        Ok(removed)
    }

    /// Saved layout names, sorted.
    pub fn layout_names(&self) -> Result<Vec<String>> {
        Ok(self.library.names()?)
    }

    /// Discard the live panels and rebuild the default layout.
    pub fn reset_layout(&mut self) {
        self.panels.cancel_gesture();
        self.panels.reset_layout();
        self.active_layout = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use mythoras_core::Point;
    use mythoras_layout::{GestureHandle, GestureState, MAIN_PANEL_ID, panel_types};
    use mythoras_runtime::StorageBackend;

    #[test]
    fn new_seeds_default_layout() {
        let shell = Shell::in_memory(ShellConfig::default()).unwrap();
        let panels = shell.panels().panels();
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].id.as_str(), MAIN_PANEL_ID);
        assert!(!shell.simulation().is_running());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = ShellConfig::default();
        config.simulation.tick_ms = 0;
        let err = Shell::in_memory(config).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Validation(_))));
    }

    #[test]
    fn open_requires_directory() {
        let err = Shell::open(ShellConfig::default()).unwrap_err();
        assert!(err.to_string().contains("persistence.directory"));
    }

    #[test]
    fn autostart_runs_ticks() {
        let mut config = ShellConfig::default();
        config.simulation.autostart = true;
        config.simulation.tick_ms = 10;
        let mut shell = Shell::in_memory(config).unwrap();
        assert_eq!(shell.tick(Duration::from_millis(35)), 3);
        assert_eq!(shell.simulation().tick(), 30);
        shell.stop_simulation();
        assert_eq!(shell.tick(Duration::from_millis(35)), 0);
    }

    #[test]
    fn missing_layout_leaves_panels() {
        let mut shell = Shell::in_memory(ShellConfig::default()).unwrap();
        let before = shell.panels().snapshot_panels();
        assert!(!shell.load_layout("nope").unwrap());
        assert_eq!(shell.panels().panels(), before.as_slice());
        assert_eq!(shell.active_layout(), None);
    }

    #[test]
    fn failed_load_keeps_active_gesture() {
        let mut storage = MemoryStorage::new();
        let duplicate = serde_json::json!({
            "schema_version": 1,
            "layouts": {
                "broken": [
                    { "id": "p", "type": "chat", "x": 0, "y": 0, "width": 300, "height": 200, "title": "Chat" },
                    { "id": "p", "type": "chat", "x": 400, "y": 0, "width": 300, "height": 200, "title": "Chat" }
                ]
            }
        });
        storage
            .save("mythoras-layouts", &duplicate.to_string())
            .unwrap();
        let mut shell = Shell::new(ShellConfig::default(), storage).unwrap();

        let chat = shell
            .panels_mut()
            .add_panel(panel_types::CHAT)
            .added_id()
            .cloned()
            .unwrap();
        shell
            .panels_mut()
            .pointer_down(&chat, GestureHandle::Drag, Point::new(10, 10));
        let before = shell.panels().snapshot_panels();

        assert!(shell.load_layout("broken").is_err());
        assert!(matches!(
            shell.panels().gesture_state(),
            GestureState::Dragging { panel, .. } if *panel == chat
        ));
        assert_eq!(shell.panels().panels(), before.as_slice());
        assert_eq!(shell.active_layout(), None);
    }

    #[test]
    fn load_cancels_gesture_after_replacing_panels() {
        let mut shell = Shell::in_memory(ShellConfig::default()).unwrap();
        shell.save_layout("solo").unwrap();

        let chat = shell
            .panels_mut()
            .add_panel(panel_types::CHAT)
            .added_id()
            .cloned()
            .unwrap();
        shell
            .panels_mut()
            .pointer_down(&chat, GestureHandle::Drag, Point::new(10, 10));
        assert!(shell.load_layout("solo").unwrap());
        assert_eq!(shell.panels().gesture_state(), &GestureState::Idle);
        assert_eq!(shell.active_layout(), Some("solo"));
    }
}
