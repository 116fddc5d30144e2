// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point hit testing.

use kurbo::{Affine, Point, Rect};

use crate::matrix::try_invert;
use crate::node::Node;
use crate::scene::Scene;
use crate::types::{NodeFlags, NodeId};

impl Scene {
    /// Find the topmost node under the global point `global` in the subtree of `id`.
    ///
    /// ## Semantics
    ///
    /// - Invisible nodes and their subtrees never hit.
    /// - A scroll rect rejects points outside it before any child is tested.
    /// - Children are tested before their parent, last child first.
    /// - A node with zero size hits only through a custom tester or hit area.
    /// - Within a non-zero size, a custom tester decides alone; otherwise the hit area, if
    ///   any, must contain the point.
    /// - A node is returned only if it is mouse-enabled and not mouse-through; its children
    ///   are tested either way.
    pub fn hit_test(&self, id: NodeId, global: Point) -> Option<NodeId> {
        let world = self.world_matrix(id)?;
        self.hit_test_in(id, world, global)
    }

    fn hit_test_in(&self, id: NodeId, world: Affine, global: Point) -> Option<NodeId> {
        let node = self.node_opt(id)?;
        if !node.flags.contains(NodeFlags::VISIBLE) {
            return None;
        }
        // A collapsed node has no local space to test in.
        let local = try_invert(world)? * global;
        if let Some(clip) = node.scroll_rect
            && !clip.contains(local)
        {
            return None;
        }
        for &child in node.children.iter().rev() {
            let Some(c) = self.node_opt(child) else {
                continue;
            };
            let child_world = world * c.geometry.local_matrix();
            if let Some(hit) = self.hit_test_in(child, child_world, global) {
                return Some(hit);
            }
        }
        hits_self(node, local).then_some(id)
    }
}

fn hits_self(node: &Node, local: Point) -> bool {
    if !node.flags.contains(NodeFlags::MOUSE_ENABLED)
        || node.flags.contains(NodeFlags::MOUSE_THROUGH)
    {
        return false;
    }
    let size = node.geometry.size;
    let zero = size.width == 0.0 && size.height == 0.0;
    if zero {
        if node.hit_tester.is_none() && node.hit_area.is_none() {
            return false;
        }
    } else if !Rect::from_origin_size(Point::ZERO, size).contains(local) {
        return false;
    }
    if let Some(tester) = &node.hit_tester {
        return tester(local);
    }
    node.hit_area
        .as_ref()
        .is_none_or(|area| area.contains(local))
}
