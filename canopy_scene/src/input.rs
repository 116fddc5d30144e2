// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw per-frame input consumed by [`Stage::update`](crate::Stage::update).

use alloc::vec::Vec;
use kurbo::{Point, Vec2};

bitflags::bitflags! {
    /// Mouse buttons currently held.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        /// Primary (usually left) button.
        const PRIMARY   = 0b0000_0001;
        /// Secondary (usually right) button.
        const SECONDARY = 0b0000_0010;
        /// Middle button.
        const MIDDLE    = 0b0000_0100;
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Windows.
        const META  = 0b0000_1000;
    }
}

/// Mouse state sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MouseState {
    /// Position in stage coordinates.
    pub position: Point,
    /// Buttons held.
    pub buttons: MouseButtons,
    /// Wheel scroll accumulated since the previous frame.
    pub wheel: Vec2,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

/// Lifecycle of a touch point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger went down.
    Began,
    /// Finger moved.
    Moved,
    /// Finger lifted.
    Ended,
    /// The platform abandoned the touch.
    Cancelled,
}

/// One touch point reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchInput {
    /// Platform id, stable for the life of the touch.
    pub id: u64,
    /// Position in stage coordinates.
    pub position: Point,
    /// Phase this frame.
    pub phase: TouchPhase,
    /// Whether this touch drives the logical pointer.
    pub is_primary: bool,
}

/// A key transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyboardEvent {
    /// Platform key code.
    pub key_code: u32,
    /// Character produced by the key, if any.
    pub char: Option<char>,
    /// Pressed (`true`) or released (`false`).
    pub pressed: bool,
    /// Auto-repeat.
    pub repeat: bool,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// A key press.
    pub fn down(key_code: u32) -> Self {
        Self {
            key_code,
            char: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::empty(),
        }
    }

    /// A key release.
    pub fn up(key_code: u32) -> Self {
        Self {
            pressed: false,
            ..Self::down(key_code)
        }
    }

    /// Set the character the key produces.
    pub fn with_char(mut self, char: char) -> Self {
        self.char = Some(char);
        self
    }

    /// Set the modifiers held.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Everything the stage needs for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Mouse state.
    pub mouse: MouseState,
    /// Touch points.
    pub touches: Vec<TouchInput>,
    /// Key transitions in arrival order.
    pub keys: Vec<KeyboardEvent>,
}

impl InputFrame {
    /// A frame with the mouse at `position` and no buttons held.
    pub fn mouse_at(position: Point) -> Self {
        Self {
            mouse: MouseState {
                position,
                ..MouseState::default()
            },
            ..Self::default()
        }
    }

    /// Set the held buttons.
    pub fn with_buttons(mut self, buttons: MouseButtons) -> Self {
        self.mouse.buttons = buttons;
        self
    }

    /// Set the wheel delta.
    pub fn with_wheel(mut self, wheel: Vec2) -> Self {
        self.mouse.wheel = wheel;
        self
    }

    /// Append a touch point.
    pub fn with_touch(mut self, touch: TouchInput) -> Self {
        self.touches.push(touch);
        self
    }

    /// Append a key transition.
    pub fn with_key(mut self, key: KeyboardEvent) -> Self {
        self.keys.push(key);
        self
    }
}
