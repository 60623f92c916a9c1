//! Named layouts persisted through file storage and reloaded into a manager.

use mythoras_layout::{
    DefaultLayoutPolicy, GestureHandle, LayoutDocumentError, Panel, PanelId, Point, Rect,
    panel_types,
};
use mythoras_runtime::{
    DEFAULT_LAYOUT_KEY, FileStorage, LayoutLibrary, LibraryError, ShellConfig, StorageBackend,
};

fn wide_config() -> ShellConfig {
    let mut config = ShellConfig::default();
    config.window.width = 1600;
    config.window.height = 956;
    config.default_layout.policy = DefaultLayoutPolicy::MainWithAuxiliary;
    config
}

#[test]
fn saved_layout_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = wide_config();

    let mut manager = config.build_manager();
    manager.reset_layout();
    let chat = manager
        .panels()
        .iter()
        .find(|p| p.kind == panel_types::CHAT)
        .map(|p| p.id.clone())
        .unwrap();
    let origin = manager.panel(&chat).unwrap().rect();
    manager.pointer_down(&chat, GestureHandle::Drag, Point::new(origin.x + 5, origin.y + 5));
    manager.pointer_move(Point::new(origin.x + 5, origin.y + 205));
    manager.pointer_up();
    let saved = manager.snapshot_panels();

    let mut library = LayoutLibrary::new(FileStorage::new(dir.path()));
    library.save_layout("raid", &saved).unwrap();
    drop(library);

    let library = LayoutLibrary::new(FileStorage::new(dir.path()));
    assert_eq!(library.names().unwrap(), vec!["raid"]);
    let panels = library.load_layout("raid").unwrap().unwrap();

    let mut restored = config.build_manager();
    restored.load_panels("raid", panels).unwrap();
    assert_eq!(restored.panels(), saved.as_slice());
}

#[test]
fn newer_schema_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path());
    storage
        .save(DEFAULT_LAYOUT_KEY, r#"{"schema_version": 9, "layouts": {}}"#)
        .unwrap();

    let library = LayoutLibrary::new(storage);
    let err = library.names().unwrap_err();
    assert!(matches!(
        err,
        LibraryError::Document(LayoutDocumentError::UnsupportedVersion { found: 9, .. })
    ));
}

#[test]
fn legacy_file_from_earlier_builds_loads() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path());
    let legacy = serde_json::json!({
        "default": [{
            "id": "main-game",
            "type": "gameview",
            "x": 0, "y": 0, "width": 1280, "height": 744,
            "title": "Game View"
        }]
    });
    storage.save(DEFAULT_LAYOUT_KEY, &legacy.to_string()).unwrap();

    let library = LayoutLibrary::new(storage);
    let panels = library.load_layout("default").unwrap().unwrap();
    assert_eq!(panels.len(), 1);
    assert_eq!(panels[0].id, PanelId::from("main-game"));
    assert!(!panels[0].locked);
}

#[test]
fn manager_refuses_malformed_lists() {
    let config = ShellConfig::default();
    let mut manager = config.build_manager();
    manager.reset_layout();
    let before = manager.snapshot_panels();

    let dup = Panel::new("x", panel_types::CHAT, Rect::new(0, 0, 280, 150), "Chat");
    let err = manager.load_panels("bad", vec![dup.clone(), dup]).unwrap_err();
    assert!(matches!(err, LayoutDocumentError::DuplicatePanelId { .. }));
    assert_eq!(manager.panels(), before.as_slice());
}
