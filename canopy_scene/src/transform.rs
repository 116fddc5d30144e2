// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node geometry, matrices and coordinate conversion.

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::event::{EventData, EventKind};
use crate::matrix::{Geometry, try_invert};
use crate::scene::Scene;
use crate::types::NodeId;

impl Scene {
    /// The node's full local geometry.
    pub fn geometry(&self, id: NodeId) -> Option<Geometry> {
        Some(self.node_opt(id)?.geometry)
    }

    /// Where the node's local origin lands in its parent.
    ///
    /// Equal to [`raw_position`](Self::raw_position) unless the pivot is an anchor, in which
    /// case the pivot offset is added.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        let n = self.node_opt(id)?;
        Some(n.geometry.position + n.pivot_offset)
    }

    /// The position as set, before the pivot offset.
    pub fn raw_position(&self, id: NodeId) -> Option<Point> {
        Some(self.node_opt(id)?.geometry.position)
    }

    /// Offset from the raw position to [`position`](Self::position).
    pub fn pivot_offset(&self, id: NodeId) -> Option<Vec2> {
        Some(self.node_opt(id)?.pivot_offset)
    }

    /// The node's size.
    pub fn size(&self, id: NodeId) -> Option<Size> {
        Some(self.node_opt(id)?.geometry.size)
    }

    /// The node's scale factors.
    pub fn scale(&self, id: NodeId) -> Option<Vec2> {
        Some(self.node_opt(id)?.geometry.scale)
    }

    /// The node's rotation in radians.
    pub fn rotation(&self, id: NodeId) -> Option<f64> {
        Some(self.node_opt(id)?.geometry.rotation)
    }

    /// The node's skew angles in radians.
    pub fn skew(&self, id: NodeId) -> Option<Vec2> {
        Some(self.node_opt(id)?.geometry.skew)
    }

    /// The normalized pivot and whether it is an anchor.
    pub fn pivot(&self, id: NodeId) -> Option<(Vec2, bool)> {
        let g = &self.node_opt(id)?.geometry;
        Some((g.pivot, g.pivot_as_anchor))
    }

    /// Set the raw position.
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        self.update_geometry(id, |g| g.position = position);
    }

    /// Set the scale factors.
    pub fn set_scale(&mut self, id: NodeId, scale: Vec2) {
        self.update_geometry(id, |g| g.scale = scale);
    }

    /// Set the rotation in radians.
    pub fn set_rotation(&mut self, id: NodeId, rotation: f64) {
        self.update_geometry(id, |g| g.rotation = rotation);
    }

    /// Set the skew angles in radians.
    pub fn set_skew(&mut self, id: NodeId, skew: Vec2) {
        self.update_geometry(id, |g| g.skew = skew);
    }

    /// Set the size, emitting [`EventKind::SizeChanged`] if it changed.
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        let Some(before) = self.size(id) else {
            return;
        };
        self.update_geometry(id, |g| g.size = size);
        if before != size {
            self.notify(id, EventKind::SizeChanged, EventData::None);
        }
    }

    /// Set the normalized pivot and whether the position addresses it.
    pub fn set_pivot(&mut self, id: NodeId, pivot: Vec2, as_anchor: bool) {
        self.update_geometry(id, |g| {
            g.pivot = pivot;
            g.pivot_as_anchor = as_anchor;
        });
    }

    /// Apply `edit` to the geometry, refresh the pivot offset, and emit
    /// [`EventKind::XyChanged`] if the reported position moved.
    fn update_geometry(&mut self, id: NodeId, edit: impl FnOnce(&mut Geometry)) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        let old = n.geometry;
        edit(&mut n.geometry);
        if n.geometry == old {
            return;
        }
        let before = old.position + n.pivot_offset;
        n.pivot_offset = n.geometry.pivot_offset();
        let after = n.geometry.position + n.pivot_offset;
        if after != before {
            tracing::trace!(?id, x = after.x, y = after.y, "position changed");
            self.notify(id, EventKind::XyChanged, EventData::None);
        }
    }

    /// Matrix from the node's space to its parent's.
    pub fn local_matrix(&self, id: NodeId) -> Option<Affine> {
        Some(self.node_opt(id)?.geometry.local_matrix())
    }

    /// Matrix from the node's space to the space of the top of its tree.
    pub fn world_matrix(&self, id: NodeId) -> Option<Affine> {
        let mut m = self.local_matrix(id)?;
        let mut cur = self.parent_of(id);
        while let Some(p) = cur {
            m = self.local_matrix(p)? * m;
            cur = self.parent_of(p);
        }
        Some(m)
    }

    /// Map a local point to global (root) coordinates.
    pub fn local_to_global(&self, id: NodeId, local: Point) -> Option<Point> {
        Some(self.world_matrix(id)? * local)
    }

    /// Map a global point into the node's space.
    ///
    /// Returns the origin when the world matrix is singular.
    pub fn global_to_local(&self, id: NodeId, global: Point) -> Option<Point> {
        let world = self.world_matrix(id)?;
        Some(try_invert(world).map_or(Point::ZERO, |inv| inv * global))
    }

    /// Map a point from `from`'s space into `to`'s space.
    pub fn local_to_local(&self, from: NodeId, to: NodeId, p: Point) -> Option<Point> {
        let global = self.local_to_global(from, p)?;
        self.global_to_local(to, global)
    }

    /// Global axis-aligned bounds of the node's `(0, 0, w, h)` box.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        let world = self.world_matrix(id)?;
        let size = self.size(id)?;
        Some(world.transform_rect_bbox(Rect::from_origin_size(Point::ZERO, size)))
    }
}
