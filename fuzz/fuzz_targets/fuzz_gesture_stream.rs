#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use paneltree_core::geometry::{Point, Rect};
use paneltree_core::input::{PointerSample, TouchSample};
use paneltree_layout::{Node, Orientation};
use paneltree_web::{HostCommand, ListenerScope, SessionController, SessionUpdate};

#[derive(Debug, Arbitrary)]
enum Input {
    MouseStart { panel: u8 },
    MouseOver { panel: u8, x: u16, y: u16 },
    MouseLeave { panel: u8 },
    MouseDrop,
    MouseEnd,
    TouchStart { panel: u8, finger: u8, x: u16, y: u16 },
    TouchMove { finger: u8, x: u16, y: u16 },
    TouchTick,
    TouchEnd { finger: u8, x: u16, y: u16 },
    TouchCancel { finger: u8 },
    DividerDown { split: u8 },
    DividerMove { x: u16, y: u16 },
    DividerUp,
    Advance { ms: u16 },
}

#[derive(Default)]
struct Listeners {
    touch: i32,
    resize: i32,
}

impl Listeners {
    fn apply(&mut self, update: &SessionUpdate) {
        for command in &update.commands {
            let (scope, delta) = match command {
                HostCommand::AttachListeners { scope } => (*scope, 1),
                HostCommand::DetachListeners { scope } => (*scope, -1),
                _ => continue,
            };
            let slot = match scope {
                ListenerScope::Touch => &mut self.touch,
                ListenerScope::Resize => &mut self.resize,
            };
            *slot += delta;
            assert!((0..=1).contains(slot), "listener count out of range: {slot}");
        }
    }
}

fn pick(tree: &Node, byte: u8, panels: bool) -> String {
    let ids: Vec<String> = tree
        .ids()
        .into_iter()
        .filter(|id| tree.find(id.as_str()).is_some_and(Node::is_panel) == panels)
        .map(|id| id.as_str().to_owned())
        .collect();
    if ids.is_empty() {
        return String::new();
    }
    ids[usize::from(byte) % ids.len()].clone()
}

fn point(x: u16, y: u16) -> Point {
    Point::new(f64::from(x % 900), f64::from(y % 700))
}

fuzz_target!(|inputs: Vec<Input>| {
    let initial = Node::split(
        "split-1",
        Orientation::Vertical,
        0.5,
        Node::panel("panel-1"),
        Node::split(
            "split-2",
            Orientation::Horizontal,
            0.5,
            Node::panel("panel-2"),
            Node::panel("panel-3"),
        ),
    );
    let Ok(mut session) = SessionController::new(initial) else {
        return;
    };
    session.set_viewport(Rect::from_size(800.0, 600.0));
    let mut listeners = Listeners::default();
    let mut now = Duration::ZERO;

    for input in inputs.into_iter().take(256) {
        let tree = session.tree().clone();
        let update = match input {
            Input::MouseStart { panel } => {
                session.mouse_drag_start(&pick(&tree, panel, true), None)
            }
            Input::MouseOver { panel, x, y } => {
                let id = pick(&tree, panel, true);
                let bounds = session.layout().rect(&id).unwrap_or_default();
                session.mouse_drag_over(&id, bounds, PointerSample::new(point(x, y), now))
            }
            Input::MouseLeave { panel } => session.mouse_drag_leave(&pick(&tree, panel, true)),
            Input::MouseDrop => session.mouse_drop(),
            Input::MouseEnd => session.mouse_drag_end(),
            Input::TouchStart { panel, finger, x, y } => session.touch_start(
                &pick(&tree, panel, true),
                TouchSample::new(u32::from(finger % 3), point(x, y), now),
            ),
            Input::TouchMove { finger, x, y } => {
                session.touch_move(TouchSample::new(u32::from(finger % 3), point(x, y), now))
            }
            Input::TouchTick => session.touch_tick(now),
            Input::TouchEnd { finger, x, y } => {
                session.touch_end(TouchSample::new(u32::from(finger % 3), point(x, y), now))
            }
            Input::TouchCancel { finger } => session.touch_cancel(u32::from(finger % 3)),
            Input::DividerDown { split } => session.divider_pointer_down(&pick(&tree, split, false)),
            Input::DividerMove { x, y } => session.divider_pointer_move(point(x, y)),
            Input::DividerUp => session.divider_pointer_up(),
            Input::Advance { ms } => {
                now += Duration::from_millis(u64::from(ms));
                continue;
            }
        };
        listeners.apply(&update);
        assert!(session.tree().validate().is_ok(), "session produced invalid tree");
        assert_eq!(session.tree().panel_count(), 3, "panel lost or duplicated");
        if update.tree_changed {
            assert_ne!(session.tree(), &tree, "tree_changed without a change");
        }
    }

    let reset = session.on_reset();
    listeners.apply(&reset);
    assert_eq!((listeners.touch, listeners.resize), (0, 0), "listeners leaked past reset");
    assert!(!session.drag_session().active);
});
