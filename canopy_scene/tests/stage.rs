// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `Stage` input routing.
//!
//! Each test drives the stage with whole input frames, the way a platform event loop
//! would, and inspects the events that reached listeners.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use canopy_scene::{
    EventData, EventKind, InputFrame, MouseButtons, NodeId, Stage, StageConfig,
};
use kurbo::{Point, Size};

const DT: Duration = Duration::from_millis(16);

type Log = Rc<RefCell<Vec<&'static str>>>;

struct Fixture {
    stage: Stage,
    parent: NodeId,
    child: NodeId,
    log: Log,
}

/// A parent at (10, 10) sized 100×100 with a 20×20 child at (10, 10) inside it.
fn fixture() -> Fixture {
    let mut stage = Stage::new(StageConfig {
        size: Size::new(400.0, 300.0),
        ..StageConfig::default()
    });
    let scene = stage.scene_mut();
    let root = scene.root();
    let parent = scene.create_named("parent");
    let child = scene.create_named("child");
    scene.add_child(root, parent).unwrap();
    scene.add_child(parent, child).unwrap();
    scene.set_position(parent, Point::new(10.0, 10.0));
    scene.set_size(parent, Size::new(100.0, 100.0));
    scene.set_position(child, Point::new(10.0, 10.0));
    scene.set_size(child, Size::new(20.0, 20.0));
    Fixture {
        stage,
        parent,
        child,
        log: Rc::default(),
    }
}

impl Fixture {
    fn listen(&mut self, node: NodeId, kind: EventKind, label: &'static str) {
        let log = Rc::clone(&self.log);
        self.stage
            .scene_mut()
            .on(node, kind, move |_, _| log.borrow_mut().push(label))
            .unwrap();
    }

    fn frame(&mut self, x: f64, y: f64, buttons: MouseButtons) {
        let input = InputFrame::mouse_at(Point::new(x, y)).with_buttons(buttons);
        self.stage.update(DT, &input);
    }
}

#[test]
fn press_release_click_order() {
    let mut f = fixture();
    let root = f.stage.root();
    let (parent, child) = (f.parent, f.child);
    f.listen(child, EventKind::MouseDown, "child-down");
    f.listen(parent, EventKind::MouseDown, "parent-down");
    f.listen(root, EventKind::StageMouseDown, "stage-down");
    f.listen(child, EventKind::MouseUp, "child-up");
    f.listen(parent, EventKind::MouseUp, "parent-up");
    f.listen(child, EventKind::Click, "child-click");
    f.listen(parent, EventKind::Click, "parent-click");
    f.listen(root, EventKind::StageMouseUp, "stage-up");

    f.frame(25.0, 25.0, MouseButtons::empty());
    f.frame(25.0, 25.0, MouseButtons::PRIMARY);
    f.frame(25.0, 25.0, MouseButtons::empty());

    assert_eq!(
        *f.log.borrow(),
        [
            "child-down",
            "parent-down",
            "stage-down",
            "child-up",
            "parent-up",
            "child-click",
            "parent-click",
            "stage-up",
        ]
    );
}

#[test]
fn stage_events_report_the_hit_node() {
    let mut f = fixture();
    let root = f.stage.root();
    let targets = Rc::new(RefCell::new(Vec::new()));
    {
        let targets = Rc::clone(&targets);
        f.stage
            .scene_mut()
            .on(root, EventKind::StageMouseDown, move |_, e| {
                let EventData::Pointer(p) = e.data else {
                    panic!("stage pointer events carry pointer data");
                };
                targets.borrow_mut().push((e.target, p.position, p.touch_id));
            })
            .unwrap();
    }
    f.frame(25.0, 25.0, MouseButtons::PRIMARY);
    assert_eq!(
        *targets.borrow(),
        [(Some(f.child), Point::new(25.0, 25.0), Some(0))]
    );
}

#[test]
fn hover_moves_between_siblings() {
    let mut f = fixture();
    let (parent, child) = (f.parent, f.child);
    f.listen(child, EventKind::RollOver, "child-over");
    f.listen(child, EventKind::RollOut, "child-out");
    f.listen(parent, EventKind::RollOver, "parent-over");
    f.listen(parent, EventKind::RollOut, "parent-out");

    f.frame(25.0, 25.0, MouseButtons::empty());
    f.frame(90.0, 90.0, MouseButtons::empty());

    // RollOver and RollOut bubble, so the parent hears about its child too.
    assert_eq!(
        *f.log.borrow(),
        [
            "child-over",
            "parent-over",
            "child-out",
            "parent-out",
            "parent-over",
        ]
    );
    assert_eq!(f.stage.scene().hover(), Some(parent));
}

#[test]
fn destroying_the_pressed_node_mid_gesture() {
    let mut f = fixture();
    let (parent, child) = (f.parent, f.child);
    f.listen(parent, EventKind::MouseUp, "parent-up");
    f.listen(parent, EventKind::Click, "parent-click");

    f.frame(25.0, 25.0, MouseButtons::PRIMARY);
    assert_eq!(f.stage.scene().pressed(), Some(child));
    assert!(f.stage.scene_mut().destroy(child));
    assert_eq!(f.stage.scene().pressed(), None);
    assert_eq!(f.stage.scene().hover(), None);

    // The release falls back to the node now under the pointer, which is the parent.
    f.frame(25.0, 25.0, MouseButtons::empty());
    assert_eq!(*f.log.borrow(), ["parent-up", "parent-click"]);
}

#[test]
fn focus_follows_handlers() {
    let mut f = fixture();
    let child = f.child;
    // Clicking the child focuses it from inside a listener.
    f.stage
        .scene_mut()
        .on(child, EventKind::Click, |scene, e| {
            scene.set_focus(e.current_target);
        })
        .unwrap();
    f.listen(child, EventKind::FocusIn, "focus-in");
    f.listen(child, EventKind::KeyDown, "key-down");

    f.frame(25.0, 25.0, MouseButtons::PRIMARY);
    f.frame(25.0, 25.0, MouseButtons::empty());
    let keys = InputFrame::mouse_at(Point::new(25.0, 25.0))
        .with_key(canopy_scene::KeyboardEvent::down(13));
    f.stage.update(DT, &keys);

    assert_eq!(*f.log.borrow(), ["focus-in", "key-down"]);
    assert_eq!(f.stage.scene().focus(), Some(child));
}
