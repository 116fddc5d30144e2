// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node storage and the non-geometric node state.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use canopy_events::EventDispatcher;
use canopy_graphics::{Graphics, HitArea};
use kurbo::{Point, Rect, Vec2};
use peniko::BlendMode;

use crate::effect::ColorEffect;
use crate::event::{Event, EventKind};
use crate::matrix::Geometry;
use crate::scene::Scene;
use crate::types::{NodeFlags, NodeId, Owner};

/// Custom hit predicate over local coordinates.
pub(crate) type HitTester = Box<dyn Fn(Point) -> bool>;

pub(crate) struct Node {
    pub(crate) generation: u32,
    pub(crate) name: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) geometry: Geometry,
    pub(crate) pivot_offset: Vec2,
    pub(crate) flags: NodeFlags,
    pub(crate) alpha: f32,
    pub(crate) scroll_rect: Option<Rect>,
    pub(crate) blend_mode: BlendMode,
    pub(crate) color_effect: ColorEffect,
    pub(crate) owner: Option<Owner>,
    pub(crate) hit_tester: Option<HitTester>,
    pub(crate) hit_area: Option<HitArea>,
    pub(crate) graphics: Option<Graphics>,
    pub(crate) dispatcher: EventDispatcher<EventKind, Scene, Event>,
}

impl Node {
    pub(crate) fn new(generation: u32) -> Self {
        Self {
            generation,
            name: None,
            parent: None,
            children: Vec::new(),
            geometry: Geometry::default(),
            pivot_offset: Vec2::ZERO,
            flags: NodeFlags::default(),
            alpha: 1.0,
            scroll_rect: None,
            blend_mode: BlendMode::default(),
            color_effect: ColorEffect::None,
            owner: None,
            hit_tester: None,
            hit_area: None,
            graphics: None,
            dispatcher: EventDispatcher::new(),
        }
    }

    pub(crate) fn set_flag(&mut self, flag: NodeFlags, on: bool) {
        self.flags.set(flag, on);
    }
}

impl Scene {
    /// The node's name.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id)?.name.as_deref()
    }

    /// Set or clear the node's name.
    pub fn set_name(&mut self, id: NodeId, name: Option<String>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.name = name;
        }
    }

    /// All flags of the node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        Some(self.node_opt(id)?.flags)
    }

    /// Whether the node and its subtree are drawn and hit-testable.
    pub fn visible(&self, id: NodeId) -> bool {
        self.node_opt(id)
            .is_some_and(|n| n.flags.contains(NodeFlags::VISIBLE))
    }

    /// Show or hide the node.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.set_flag(NodeFlags::VISIBLE, visible);
        }
    }

    /// Whether the node itself can become a pointer target.
    pub fn mouse_enabled(&self, id: NodeId) -> bool {
        self.node_opt(id)
            .is_some_and(|n| n.flags.contains(NodeFlags::MOUSE_ENABLED))
    }

    /// Allow or forbid the node itself from becoming a pointer target.
    pub fn set_mouse_enabled(&mut self, id: NodeId, enabled: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.set_flag(NodeFlags::MOUSE_ENABLED, enabled);
        }
    }

    /// Whether the pointer passes through the node to its children.
    pub fn mouse_through(&self, id: NodeId) -> bool {
        self.node_opt(id)
            .is_some_and(|n| n.flags.contains(NodeFlags::MOUSE_THROUGH))
    }

    /// Let the pointer pass through the node; its children remain hittable.
    pub fn set_mouse_through(&mut self, id: NodeId, through: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.set_flag(NodeFlags::MOUSE_THROUGH, through);
        }
    }

    /// Opacity in `0.0..=1.0`.
    pub fn alpha(&self, id: NodeId) -> Option<f32> {
        Some(self.node_opt(id)?.alpha)
    }

    /// Set opacity, clamped to `0.0..=1.0`.
    pub fn set_alpha(&mut self, id: NodeId, alpha: f32) {
        if let Some(n) = self.node_opt_mut(id) {
            n.alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        }
    }

    /// Local clip rectangle, if any.
    pub fn scroll_rect(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id)?.scroll_rect
    }

    /// Set the local clip rectangle. Points outside it hit neither the node nor its
    /// children.
    pub fn set_scroll_rect(&mut self, id: NodeId, rect: Option<Rect>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.scroll_rect = rect;
        }
    }

    /// How the node composites onto what is beneath it.
    pub fn blend_mode(&self, id: NodeId) -> Option<BlendMode> {
        Some(self.node_opt(id)?.blend_mode)
    }

    /// Set the blend mode.
    pub fn set_blend_mode(&mut self, id: NodeId, mode: BlendMode) {
        if let Some(n) = self.node_opt_mut(id) {
            n.blend_mode = mode;
        }
    }

    /// The node's color effect.
    pub fn color_effect(&self, id: NodeId) -> Option<ColorEffect> {
        Some(self.node_opt(id)?.color_effect)
    }

    /// Replace the node's color effect.
    pub fn set_color_effect(&mut self, id: NodeId, effect: ColorEffect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.color_effect = effect;
        }
    }

    /// The higher-level object that owns the node.
    pub fn owner(&self, id: NodeId) -> Option<Owner> {
        self.node_opt(id)?.owner
    }

    /// Record or clear the node's owner.
    pub fn set_owner(&mut self, id: NodeId, owner: Option<Owner>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.owner = owner;
        }
    }

    /// Install a custom hit predicate over local coordinates.
    ///
    /// When present it decides alone whether a point inside the node's size hits the node
    /// itself; the [`HitArea`] is not consulted.
    pub fn set_hit_tester(&mut self, id: NodeId, tester: impl Fn(Point) -> bool + 'static) {
        if let Some(n) = self.node_opt_mut(id) {
            n.hit_tester = Some(Box::new(tester));
        }
    }

    /// Remove the custom hit predicate.
    pub fn clear_hit_tester(&mut self, id: NodeId) {
        if let Some(n) = self.node_opt_mut(id) {
            n.hit_tester = None;
        }
    }

    /// The node's shape-based hit region.
    pub fn hit_area(&self, id: NodeId) -> Option<&HitArea> {
        self.node_opt(id)?.hit_area.as_ref()
    }

    /// Set or clear the node's shape-based hit region.
    pub fn set_hit_area(&mut self, id: NodeId, area: Option<HitArea>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.hit_area = area;
        }
    }

    /// The node's draw-command log, if one was created.
    pub fn graphics(&self, id: NodeId) -> Option<&Graphics> {
        self.node_opt(id)?.graphics.as_ref()
    }

    /// The node's draw-command log, created on first access.
    pub fn graphics_mut(&mut self, id: NodeId) -> Option<&mut Graphics> {
        Some(self.node_opt_mut(id)?.graphics.get_or_insert_with(Graphics::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_graphics::DrawStyle;
    use peniko::{Color, Compose, Mix};

    #[test]
    fn alpha_is_clamped() {
        let mut s = Scene::default();
        let n = s.create_node();
        s.set_alpha(n, 1.5);
        assert_eq!(s.alpha(n), Some(1.0));
        s.set_alpha(n, -0.5);
        assert_eq!(s.alpha(n), Some(0.0));
        s.set_alpha(n, f32::NAN);
        assert_eq!(s.alpha(n), Some(0.0));
    }

    #[test]
    fn flags_toggle_independently() {
        let mut s = Scene::default();
        let n = s.create_node();
        assert!(s.visible(n) && s.mouse_enabled(n) && !s.mouse_through(n));
        s.set_visible(n, false);
        s.set_mouse_through(n, true);
        assert_eq!(
            s.flags(n),
            Some(NodeFlags::MOUSE_ENABLED | NodeFlags::MOUSE_THROUGH)
        );
    }

    #[test]
    fn graphics_are_created_lazily() {
        let mut s = Scene::default();
        let n = s.create_node();
        assert!(s.graphics(n).is_none());
        s.graphics_mut(n)
            .unwrap()
            .draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0), DrawStyle::fill(Color::WHITE));
        assert_eq!(s.graphics(n).map(Graphics::len), Some(1));
    }

    #[test]
    fn render_state_round_trips() {
        let mut s = Scene::default();
        let n = s.create_node();
        let mode = BlendMode::new(Mix::Multiply, Compose::SrcOver);
        s.set_blend_mode(n, mode);
        s.set_color_effect(n, ColorEffect::Grayscale);
        s.set_name(n, Some("thumb".into()));
        assert_eq!(s.blend_mode(n), Some(mode));
        assert_eq!(s.color_effect(n), Some(ColorEffect::Grayscale));
        assert_eq!(s.name(n), Some("thumb"));
    }
}
