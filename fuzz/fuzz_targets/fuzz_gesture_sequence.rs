#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mythoras_layout::{
    GestureHandle, GestureState, LayoutMetrics, PanelId, PanelManager, PanelRegistry, Point,
    WindowSize, panel_types,
};

const KINDS: [&str; 5] = [
    panel_types::CHAT,
    panel_types::INBOX,
    panel_types::SQUAD,
    panel_types::WORLD_MAP,
    "unknown",
];

#[derive(Debug, Arbitrary)]
enum Op {
    Add(u8),
    Remove(u8),
    Lock(u8),
    Down { panel: u8, resize: bool, x: i16, y: i16 },
    Move { x: i16, y: i16 },
    Up,
    Cancel,
    Window { width: u16, height: u16 },
    Sidebar(bool),
    Reset,
}

#[derive(Debug, Arbitrary)]
struct Input {
    width: u16,
    height: u16,
    ops: Vec<Op>,
}

fn pick(manager: &PanelManager, index: u8) -> Option<PanelId> {
    let panels = manager.panels();
    if panels.is_empty() {
        return None;
    }
    Some(panels[usize::from(index) % panels.len()].id.clone())
}

fuzz_target!(|input: Input| {
    let mut manager = PanelManager::new(PanelRegistry::builtin(), LayoutMetrics::DEFAULT)
        .with_window(
            WindowSize::new(i32::from(input.width), i32::from(input.height)),
            false,
        );

    for op in input.ops.into_iter().take(256) {
        let dragging = matches!(
            manager.gesture_state(),
            GestureState::Dragging { .. }
        );
        match op {
            Op::Add(k) => {
                manager.add_panel(KINDS[usize::from(k) % KINDS.len()]);
            }
            Op::Remove(i) => {
                if let Some(id) = pick(&manager, i) {
                    manager.remove_panel(&id);
                }
            }
            Op::Lock(i) => {
                if let Some(id) = pick(&manager, i) {
                    manager.toggle_panel_lock(&id);
                }
            }
            Op::Down { panel, resize, x, y } => {
                if let Some(id) = pick(&manager, panel) {
                    let handle = if resize {
                        GestureHandle::Resize
                    } else {
                        GestureHandle::Drag
                    };
                    manager.pointer_down(&id, handle, Point::new(i32::from(x), i32::from(y)));
                }
            }
            Op::Move { x, y } => {
                manager.pointer_move(Point::new(i32::from(x), i32::from(y)));
                if dragging {
                    // A dragged, unlocked panel always ends up inside the viewport.
                    let bounds = manager.bounds();
                    if let GestureState::Dragging { panel, .. } =
                        manager.gesture_state()
                        && let Some(p) = manager.panel(panel)
                        && !p.locked
                        && p.width <= bounds.width
                        && p.height <= bounds.height
                    {
                        assert!(bounds.contains_rect(p.rect()), "{p:?} escaped {bounds:?}");
                    }
                }
            }
            Op::Up => {
                manager.pointer_up();
            }
            Op::Cancel => {
                manager.cancel_gesture();
            }
            Op::Window { width, height } => {
                manager.set_window_size(WindowSize::new(i32::from(width), i32::from(height)));
            }
            Op::Sidebar(open) => {
                manager.set_sidebar_open(open);
            }
            Op::Reset => manager.reset_layout(),
        }
    }

    let mut ids: Vec<&PanelId> = manager.panels().iter().map(|p| &p.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), manager.panels().len(), "duplicate panel ids");
});
