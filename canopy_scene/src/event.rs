// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene events and their payloads.

use kurbo::{Point, Vec2};

use crate::input::{KeyboardEvent, Modifiers, MouseButtons};
use crate::types::NodeId;

/// The type of a scene event, used as the listener key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A child was attached to the receiving node.
    Added,
    /// A child was detached from the receiving node.
    Removed,
    /// The node's reported position changed.
    XyChanged,
    /// The node's size changed.
    SizeChanged,
    /// The pointer entered the node.
    RollOver,
    /// The pointer left the node.
    RollOut,
    /// The pointer moved over the node.
    MouseMove,
    /// Primary button pressed over the node.
    MouseDown,
    /// Primary button released.
    MouseUp,
    /// Primary press and release on the same node.
    Click,
    /// Right button pressed.
    RightMouseDown,
    /// Right button released.
    RightMouseUp,
    /// Right press and release on the same node.
    RightClick,
    /// Middle button pressed.
    MiddleMouseDown,
    /// Middle button released.
    MiddleMouseUp,
    /// Middle press and release on the same node.
    MiddleClick,
    /// Wheel scrolled over the node.
    MouseWheel,
    /// Touch started on the node.
    TouchBegin,
    /// Active touch moved.
    TouchMove,
    /// Active touch ended.
    TouchEnd,
    /// Pointer moved anywhere on the stage.
    StageMouseMove,
    /// Primary button pressed anywhere on the stage.
    StageMouseDown,
    /// Primary button released anywhere on the stage.
    StageMouseUp,
    /// Wheel scrolled anywhere on the stage.
    StageMouseWheel,
    /// Touch started anywhere on the stage.
    StageTouchBegin,
    /// Active touch moved anywhere on the stage.
    StageTouchMove,
    /// Active touch ended anywhere on the stage.
    StageTouchEnd,
    /// Key pressed while the node had focus.
    KeyDown,
    /// Key released while the node had focus.
    KeyUp,
    /// The node gained focus.
    FocusIn,
    /// The node lost focus.
    FocusOut,
    /// Application-defined event.
    Custom(u32),
}

/// Pointer payload.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerData {
    /// Pointer position in stage coordinates.
    pub position: Point,
    /// Buttons held after this frame's changes.
    pub buttons: MouseButtons,
    /// Keyboard modifiers.
    pub modifiers: Modifiers,
    /// Active touch id, if a press is in progress.
    pub touch_id: Option<u32>,
}

/// Event payload.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum EventData {
    /// No payload.
    #[default]
    None,
    /// The child that was added or removed.
    Child(NodeId),
    /// Pointer state.
    Pointer(PointerData),
    /// Wheel scroll.
    Wheel {
        /// Pointer position in stage coordinates.
        position: Point,
        /// Scroll amount.
        delta: Vec2,
        /// Keyboard modifiers.
        modifiers: Modifiers,
    },
    /// Keyboard input.
    Key(KeyboardEvent),
    /// The node on the other side of a focus change.
    Focus {
        /// Node losing focus for `FocusIn`, gaining it for `FocusOut`.
        related: Option<NodeId>,
    },
}

/// An event as seen by a listener.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Event type.
    pub kind: EventKind,
    /// The node the event is about.
    pub target: Option<NodeId>,
    /// The node whose listener is running.
    pub current_target: Option<NodeId>,
    /// Payload.
    pub data: EventData,
    propagation_stopped: bool,
    immediate_stopped: bool,
}

impl Event {
    /// A fresh event with no current target.
    pub fn new(kind: EventKind, target: Option<NodeId>, data: EventData) -> Self {
        Self {
            kind,
            target,
            current_target: None,
            data,
            propagation_stopped: false,
            immediate_stopped: false,
        }
    }

    /// Stop bubbling after the listeners of the current node.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop bubbling and skip the remaining listeners of the current node.
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_stopped = true;
    }

    /// Returns `true` once [`stop_propagation`](Self::stop_propagation) was called.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Returns `true` once [`stop_immediate_propagation`](Self::stop_immediate_propagation)
    /// was called.
    pub fn is_immediate_propagation_stopped(&self) -> bool {
        self.immediate_stopped
    }

    /// Stage position of a pointer or wheel event.
    pub fn position(&self) -> Option<Point> {
        match self.data {
            EventData::Pointer(p) => Some(p.position),
            EventData::Wheel { position, .. } => Some(position),
            _ => None,
        }
    }
}
