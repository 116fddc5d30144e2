// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stage: per-frame input routing over a [`Scene`].

use core::time::Duration;

use kurbo::{Point, Size, Vec2};

use crate::event::{Event, EventData, EventKind, PointerData};
use crate::input::{InputFrame, Modifiers, MouseButtons, TouchPhase};
use crate::scene::Scene;
use crate::types::NodeId;

/// Stage configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageConfig {
    /// Initial size of the root node.
    pub size: Size,
    /// Mirror primary-button input as touch events.
    pub emit_touch_events: bool,
    /// Upper bound on the delta handed to the scheduler per update.
    pub max_delta: Option<Duration>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            size: Size::ZERO,
            emit_touch_events: true,
            max_delta: None,
        }
    }
}

/// Per-button press/release/click event kinds.
#[derive(Clone, Copy)]
struct ButtonKinds {
    flag: MouseButtons,
    slot: usize,
    down: EventKind,
    up: EventKind,
    click: EventKind,
}

const SECONDARY: ButtonKinds = ButtonKinds {
    flag: MouseButtons::SECONDARY,
    slot: 1,
    down: EventKind::RightMouseDown,
    up: EventKind::RightMouseUp,
    click: EventKind::RightClick,
};

const MIDDLE: ButtonKinds = ButtonKinds {
    flag: MouseButtons::MIDDLE,
    slot: 2,
    down: EventKind::MiddleMouseDown,
    up: EventKind::MiddleMouseUp,
    click: EventKind::MiddleClick,
};

/// The logical pointer for one frame, after folding in the primary touch.
#[derive(Clone, Copy, Debug)]
struct Pointer {
    position: Point,
    buttons: MouseButtons,
    wheel: Vec2,
    modifiers: Modifiers,
    /// The primary button went up because the platform abandoned the touch.
    cancelled: bool,
}

impl Pointer {
    fn resolve(input: &InputFrame) -> Self {
        let mut pointer = Self {
            position: input.mouse.position,
            buttons: input.mouse.buttons,
            wheel: input.mouse.wheel,
            modifiers: input.mouse.modifiers,
            cancelled: false,
        };
        if let Some(touch) = input.touches.iter().find(|t| t.is_primary) {
            pointer.position = touch.position;
            let down = matches!(touch.phase, TouchPhase::Began | TouchPhase::Moved);
            pointer.buttons.set(MouseButtons::PRIMARY, down);
            pointer.cancelled = touch.phase == TouchPhase::Cancelled;
        }
        pointer
    }
}

/// Owner of a [`Scene`] that turns raw per-frame input into scene events.
///
/// ## Frame order
///
/// Each [`update`](Self::update) runs, in order:
///
/// 1. Due timers.
/// 2. A hit test at the pointer. The pointer target is the capture node if set, else the
///    hit node. Stage-level events always report the hit node as their target.
/// 3. Hover changes: `RollOut` on the old target, then `RollOver` on the new one.
/// 4. Movement: `MouseMove` (and `TouchMove` during a press), then `StageMouseMove`
///    (and `StageTouchMove`) on the root.
/// 5. Primary press: `MouseDown` and `TouchBegin`, then the stage variants.
/// 6. Primary release: `MouseUp` and `TouchEnd` on the press target, `Click` if the
///    pointer target is still the press target, then the stage variants.
/// 7. Secondary and middle buttons: down, up and click, by the same rule.
/// 8. Wheel: `MouseWheel`, then `StageMouseWheel` on the root.
/// 9. Keys: `KeyDown` / `KeyUp` on the focus target.
///
/// Node-level events bubble to the root; stage-level events are delivered to the root
/// only.
///
/// A touch marked primary drives the pointer for its frame. Other touches are ignored.
#[derive(Debug)]
pub struct Stage {
    scene: Scene,
    config: StageConfig,
    last_position: Option<Point>,
    buttons: MouseButtons,
    next_touch_id: u32,
    touch_id: Option<u32>,
}

impl Stage {
    /// Create a stage with an empty scene sized by `config`.
    pub fn new(config: StageConfig) -> Self {
        Self {
            scene: Scene::new(config.size),
            config,
            last_position: None,
            buttons: MouseButtons::empty(),
            next_touch_id: 0,
            touch_id: None,
        }
    }

    /// The scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, mutably.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The scene's root node.
    pub fn root(&self) -> NodeId {
        self.scene.root()
    }

    /// Current configuration.
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Resize the root node and record the new size.
    pub fn resize(&mut self, size: Size) {
        self.config.size = size;
        let root = self.scene.root();
        self.scene.set_size(root, size);
    }

    /// Pointer position seen by the last update.
    pub fn pointer(&self) -> Option<Point> {
        self.last_position
    }

    /// Id of the touch in progress, if the primary button is held.
    pub fn touch_id(&self) -> Option<u32> {
        self.touch_id
    }

    /// Advance timers by `delta` and route one frame of input.
    pub fn update(&mut self, delta: Duration, input: &InputFrame) {
        let delta = self.config.max_delta.map_or(delta, |max| delta.min(max));
        self.scene.advance_timers(delta);

        let pointer = Pointer::resolve(input);
        let root = self.scene.root();
        let hit = self.scene.hit_test(root, pointer.position);
        let target = self.scene.capture().or(hit);

        self.update_hover(target, &pointer);

        let moved = self.last_position != Some(pointer.position);
        self.last_position = Some(pointer.position);
        if moved {
            self.pointer_moved(target, hit, &pointer);
        }

        let was = self.buttons;
        let now = pointer.buttons;
        if now.contains(MouseButtons::PRIMARY) && !was.contains(MouseButtons::PRIMARY) {
            self.primary_down(target, hit, &pointer);
        } else if !now.contains(MouseButtons::PRIMARY) && was.contains(MouseButtons::PRIMARY) {
            self.primary_up(target, hit, &pointer);
        }
        for kinds in [SECONDARY, MIDDLE] {
            if now.contains(kinds.flag) && !was.contains(kinds.flag) {
                self.scene.targets.pressed[kinds.slot] = target;
                self.bubble(target, kinds.down, &pointer);
            } else if !now.contains(kinds.flag) && was.contains(kinds.flag) {
                let pressed = self.scene.targets.pressed[kinds.slot].take();
                let release = pressed.or(target);
                self.bubble(release, kinds.up, &pointer);
                if release.is_some() && release == target {
                    self.bubble(release, kinds.click, &pointer);
                }
            }
        }
        self.buttons = now;

        if pointer.wheel != Vec2::ZERO {
            let data = EventData::Wheel {
                position: pointer.position,
                delta: pointer.wheel,
                modifiers: pointer.modifiers,
            };
            if let Some(t) = target {
                self.scene
                    .bubble(t, &mut Event::new(EventKind::MouseWheel, Some(t), data));
            }
            self.stage_event(EventKind::StageMouseWheel, hit, data);
        }

        for key in &input.keys {
            let Some(focus) = self.scene.focus() else {
                break;
            };
            let kind = if key.pressed {
                EventKind::KeyDown
            } else {
                EventKind::KeyUp
            };
            self.scene
                .bubble(focus, &mut Event::new(kind, Some(focus), EventData::Key(*key)));
        }
    }

    fn update_hover(&mut self, target: Option<NodeId>, pointer: &Pointer) {
        let old = self.scene.targets.hover;
        if old == target {
            return;
        }
        tracing::trace!(?old, new = ?target, "hover changed");
        self.scene.targets.hover = target;
        self.bubble(old, EventKind::RollOut, pointer);
        self.bubble(target, EventKind::RollOver, pointer);
    }

    fn pointer_moved(&mut self, target: Option<NodeId>, hit: Option<NodeId>, pointer: &Pointer) {
        let touching = self.touch_id.is_some() && self.config.emit_touch_events;
        self.bubble(target, EventKind::MouseMove, pointer);
        if touching {
            self.bubble(target, EventKind::TouchMove, pointer);
        }
        let data = self.pointer_data(pointer);
        self.stage_event(EventKind::StageMouseMove, hit, data);
        if touching {
            self.stage_event(EventKind::StageTouchMove, hit, data);
        }
    }

    fn primary_down(&mut self, target: Option<NodeId>, hit: Option<NodeId>, pointer: &Pointer) {
        self.scene.targets.pressed[0] = target;
        self.touch_id = Some(self.next_touch_id);
        self.next_touch_id = self.next_touch_id.wrapping_add(1);
        tracing::trace!(?target, touch_id = ?self.touch_id, "primary pressed");

        let touch = self.config.emit_touch_events;
        self.bubble(target, EventKind::MouseDown, pointer);
        if touch {
            self.bubble(target, EventKind::TouchBegin, pointer);
        }
        let data = self.pointer_data(pointer);
        self.stage_event(EventKind::StageMouseDown, hit, data);
        if touch {
            self.stage_event(EventKind::StageTouchBegin, hit, data);
        }
    }

    fn primary_up(&mut self, target: Option<NodeId>, hit: Option<NodeId>, pointer: &Pointer) {
        let release = self.scene.targets.pressed[0].or(target);
        tracing::trace!(?release, cancelled = pointer.cancelled, "primary released");

        let touch = self.config.emit_touch_events;
        self.bubble(release, EventKind::MouseUp, pointer);
        if touch {
            self.bubble(release, EventKind::TouchEnd, pointer);
        }
        if !pointer.cancelled && release.is_some() && release == target {
            self.bubble(release, EventKind::Click, pointer);
        }
        let data = self.pointer_data(pointer);
        self.stage_event(EventKind::StageMouseUp, hit, data);
        if touch {
            self.stage_event(EventKind::StageTouchEnd, hit, data);
        }
        self.scene.targets.pressed[0] = None;
        self.touch_id = None;
    }

    fn pointer_data(&self, pointer: &Pointer) -> EventData {
        EventData::Pointer(PointerData {
            position: pointer.position,
            buttons: pointer.buttons,
            modifiers: pointer.modifiers,
            touch_id: self.touch_id,
        })
    }

    /// Bubble a pointer event from `target`, if there is one.
    fn bubble(&mut self, target: Option<NodeId>, kind: EventKind, pointer: &Pointer) {
        let Some(target) = target else {
            return;
        };
        let data = self.pointer_data(pointer);
        self.scene
            .bubble(target, &mut Event::new(kind, Some(target), data));
    }

    /// Deliver a stage-level event to the root only, reporting `hit` as its target.
    fn stage_event(&mut self, kind: EventKind, hit: Option<NodeId>, data: EventData) {
        let root = self.scene.root();
        self.scene.emit(root, &mut Event::new(kind, hit, data));
    }
}
