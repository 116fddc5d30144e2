// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Scene: a retained 2D scene graph with pivot-aware transforms, bubbling events,
//! hit testing and a per-frame input stage.
//!
//! ## Overview
//!
//! A [`Scene`] is an arena of nodes addressed by generational [`NodeId`]s. Every scene
//! has a root; nodes are created detached and attached with [`Scene::add_child`].
//! Each node carries:
//!
//! - Local [`Geometry`]: position, size, scale, rotation, skew and a normalized pivot.
//! - Visual state: visibility, alpha, blend mode, [`ColorEffect`], scroll rect.
//! - Extensibility: an [`Owner`] back-reference, a custom hit tester, a
//!   [`HitArea`](canopy_graphics::HitArea) and a [`Graphics`](canopy_graphics::Graphics) log.
//! - Its own event listeners, keyed by [`EventKind`].
//!
//! A [`Stage`] owns a scene and turns raw [`InputFrame`]s into hover, press, click, wheel,
//! touch and key events, and ticks the scene's timers.
//!
//! ## Pivots
//!
//! The pivot is the center of scale, rotation and skew. With `pivot_as_anchor` the
//! position addresses the pivot itself, so rotating keeps it in place:
//!
//! ```
//! use canopy_scene::Scene;
//! use kurbo::{Point, Size, Vec2};
//!
//! let mut scene = Scene::new(Size::new(800.0, 600.0));
//! let card = scene.create_node();
//! scene.add_child(scene.root(), card).unwrap();
//! scene.set_size(card, Size::new(100.0, 50.0));
//! scene.set_pivot(card, Vec2::new(0.5, 0.5), true);
//! scene.set_position(card, Point::new(200.0, 300.0));
//! scene.set_rotation(card, 1.0);
//!
//! let center = scene.local_to_global(card, Point::new(50.0, 25.0)).unwrap();
//! assert!((center - Point::new(200.0, 300.0)).hypot() < 1e-9);
//! ```
//!
//! ## Events
//!
//! Listeners receive `&mut Scene` and the [`Event`]. Node events bubble from the target
//! to the root; handlers may stop them with [`Event::stop_propagation`]. Dispatch iterates
//! a snapshot, so handlers can add or remove listeners and restructure the tree freely.
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use canopy_scene::{Event, EventData, EventKind, Scene};
//!
//! let mut scene = Scene::default();
//! let button = scene.create_node();
//! scene.add_child(scene.root(), button).unwrap();
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! for node in [button, scene.root()] {
//!     let seen = Rc::clone(&seen);
//!     scene.on(node, EventKind::Click, move |_, e| {
//!         seen.borrow_mut().push(e.current_target);
//!     });
//! }
//!
//! let mut click = Event::new(EventKind::Click, Some(button), EventData::None);
//! scene.bubble(button, &mut click);
//! assert_eq!(*seen.borrow(), [Some(button), Some(scene.root())]);
//! ```
//!
//! ## Targets
//!
//! The scene tracks hover, press, capture and focus targets. They always refer to live
//! nodes on the stage: detaching or destroying a node clears any target inside it.
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo and Peniko.
//! - `libm`: float math for `no_std` targets.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod effect;
mod error;
mod event;
mod hit;
mod input;
mod matrix;
mod node;
mod scene;
mod stage;
mod transform;
mod types;

pub use canopy_timer::TimerId;
pub use effect::{ColorEffect, ColorMatrix};
pub use error::SceneError;
pub use event::{Event, EventData, EventKind, PointerData};
pub use input::{
    InputFrame, KeyboardEvent, Modifiers, MouseButtons, MouseState, TouchInput, TouchPhase,
};
pub use matrix::{Geometry, SINGULAR_EPSILON, try_invert};
pub use scene::Scene;
pub use stage::{Stage, StageConfig};
pub use types::{NodeFlags, NodeId, Owner, OwnerTag, Subscription};
