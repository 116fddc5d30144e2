// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Graphics: vector draw-command logs and shape-level hit areas.
//!
//! ## Overview
//!
//! A [`Graphics`] value is an ordered, append-only log of [`DrawCommand`]s in a node's local
//! coordinate space. It does not rasterize anything; a renderer walks
//! [`Graphics::commands`] and paints them in order.
//!
//! Every structural change bumps [`Graphics::version`]. Dependent caches (the log's own
//! bounds, a [`HitArea`] built on top of it) compare versions instead of diffing commands.
//! [`Graphics::clear`] only bumps the version when there was something to clear.
//!
//! ## Hit testing
//!
//! [`HitArea`] answers "does this local point hit the shape?" from two logs:
//! `hit` (regions that accept) and `un_hit` (regions carved out of them). Containment is
//! shape-specific:
//!
//! - Rectangles, with optional per-corner radii.
//! - Ellipses.
//! - Polygons, by even-odd ray casting.
//! - Paths, approximated by their bounding box.
//! - Lines, by distance from the segment compared with half the stroke width.
//! - Pies, by radius and angle range, wrapping when the start angle exceeds the end.
//! - Textures, by their destination rectangle.
//!
//! ```
//! use canopy_graphics::{DrawStyle, Graphics, HitArea};
//! use kurbo::{Point, Rect};
//! use peniko::Color;
//!
//! let mut area = HitArea::default();
//! area.hit.draw_rect(Rect::new(0.0, 0.0, 100.0, 100.0), DrawStyle::fill(Color::BLACK));
//! area.un_hit.draw_circle(Point::new(50.0, 50.0), 10.0, DrawStyle::fill(Color::BLACK));
//!
//! assert!(area.contains(Point::new(5.0, 5.0)));
//! assert!(!area.contains(Point::new(50.0, 50.0)));
//! assert!(!area.contains(Point::new(150.0, 50.0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod command;
mod contains;
mod graphics;
mod hit_area;

pub use command::{DrawCommand, DrawStyle, Stroke, TextureId};
pub use graphics::Graphics;
pub use hit_area::HitArea;
