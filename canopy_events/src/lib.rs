// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Events: per-type listener registries with snapshot dispatch.
//!
//! ## Overview
//!
//! An [`EventDispatcher`] maps an event type key to an ordered list of listeners.
//! Each registration returns a [`ListenerId`] token; [`EventDispatcher::off`] consumes
//! the token instead of comparing closures.
//!
//! Dispatch always runs from a [`Snapshot`] of the listener list taken before the first
//! handler is invoked. Handlers may therefore add or remove listeners, or dispatch
//! further events, without corrupting the pass in progress:
//!
//! - Listeners added during a pass are not invoked until the next pass.
//! - Listeners removed during a pass are not invoked for the remainder of that pass.
//! - `once` listeners stay registered until they are invoked. A pass that stops early
//!   leaves them for the next pass, and a nested dispatch of the same type cannot fire
//!   them twice.
//!
//! ## Context
//!
//! Handlers receive a mutable context `C` alongside the event `E`. When the dispatcher
//! lives outside the context, use [`EventDispatcher::emit`]. When the dispatcher is owned
//! by the context itself (for example a node stored in a scene that handlers mutate),
//! take a [`Snapshot`] with [`EventDispatcher::snapshot`], release the borrow, and run it
//! against the context:
//!
//! ```
//! use canopy_events::EventDispatcher;
//!
//! struct World {
//!     log: Vec<&'static str>,
//!     dispatcher: EventDispatcher<u8, World, ()>,
//! }
//!
//! let mut world = World { log: Vec::new(), dispatcher: EventDispatcher::new() };
//! world.dispatcher.on(1, |w: &mut World, _: &mut ()| w.log.push("first"));
//! world.dispatcher.once(1, |w: &mut World, _: &mut ()| w.log.push("once"));
//!
//! let snapshot = world.dispatcher.snapshot(&1);
//! snapshot.run(&mut world, &mut ());
//! let snapshot = world.dispatcher.snapshot(&1);
//! snapshot.run(&mut world, &mut ());
//!
//! assert_eq!(world.log, ["first", "once", "first"]);
//! ```
//!
//! ## Bubbling
//!
//! Bubbling is not part of the dispatcher. Callers walk from a target towards the root
//! and dispatch on each node in turn.
//!
//! ## Threading
//!
//! Listeners are reference counted with `Rc` and guarded with `RefCell`; the dispatcher is
//! neither `Send` nor `Sync` and assumes a single cooperative thread.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dispatcher;

pub use dispatcher::{EventDispatcher, ListenerId, Snapshot};
