// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape-based hit regions.

use kurbo::{Point, Rect};

use crate::graphics::Graphics;

/// A hit region described by draw commands.
///
/// A point hits when it lies in any `hit` command and in no `un_hit` command.
/// The bounds of `hit` act as a cheap reject before any per-shape test.
#[derive(Clone, Debug, Default)]
pub struct HitArea {
    /// Regions that accept a point.
    pub hit: Graphics,
    /// Regions carved out of `hit`.
    pub un_hit: Graphics,
}

impl HitArea {
    /// A hit area accepting exactly the shapes of `hit`.
    pub fn new(hit: Graphics) -> Self {
        Self {
            hit,
            un_hit: Graphics::new(),
        }
    }

    /// Bounds of the accepting region, or `None` when it is empty.
    pub fn bounds(&self) -> Option<Rect> {
        self.hit.bounds()
    }

    /// Returns `true` if the local point `pt` hits this area.
    pub fn contains(&self, pt: Point) -> bool {
        let Some(bounds) = self.hit.bounds() else {
            return false;
        };
        if !contains_closed(bounds, pt) {
            return false;
        }
        self.hit.contains(pt) && !self.un_hit.contains(pt)
    }
}

// The reject test includes the far edges so it never rejects a point a shape accepts.
fn contains_closed(r: Rect, pt: Point) -> bool {
    pt.x >= r.x0 && pt.x <= r.x1 && pt.y >= r.y0 && pt.y <= r.y1
}
