// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The draw-command log.

use alloc::vec::Vec;
use core::cell::Cell;

use kurbo::{BezPath, Ellipse, Line, Point, Rect, RoundedRectRadii, Vec2};

use crate::command::{DrawCommand, DrawStyle, Stroke, TextureId};

/// Ordered, append-only log of [`DrawCommand`]s.
///
/// ## Versioning
///
/// - Every append bumps [`version`](Self::version).
/// - [`clear`](Self::clear) bumps it only when the log was non-empty.
/// - [`bounds`](Self::bounds) is cached and recomputed lazily when the version moved.
#[derive(Clone, Debug, Default)]
pub struct Graphics {
    commands: Vec<DrawCommand>,
    version: u64,
    bounds_cache: Cell<Option<(u64, Option<Rect>)>>,
}

impl Graphics {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic change counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Commands in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns `true` if the log has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Remove every command.
    pub fn clear(&mut self) {
        if self.commands.is_empty() {
            return;
        }
        self.commands.clear();
        self.version += 1;
    }

    /// Append a command.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
        self.version += 1;
    }

    /// Append a sharp rectangle.
    pub fn draw_rect(&mut self, rect: Rect, style: DrawStyle) {
        self.push(DrawCommand::Rect {
            rect,
            radii: RoundedRectRadii::from_single_radius(0.0),
            style,
        });
    }

    /// Append a rectangle with per-corner radii.
    pub fn draw_rounded_rect(
        &mut self,
        rect: Rect,
        radii: impl Into<RoundedRectRadii>,
        style: DrawStyle,
    ) {
        self.push(DrawCommand::Rect {
            rect,
            radii: radii.into(),
            style,
        });
    }

    /// Append a circle.
    pub fn draw_circle(&mut self, center: Point, radius: f64, style: DrawStyle) {
        self.draw_ellipse(center, Vec2::new(radius, radius), style);
    }

    /// Append an axis-aligned ellipse.
    pub fn draw_ellipse(&mut self, center: Point, radii: Vec2, style: DrawStyle) {
        self.push(DrawCommand::Ellipse {
            ellipse: Ellipse::new(center, radii, 0.0),
            style,
        });
    }

    /// Append a closed polygon.
    pub fn draw_polygon(&mut self, points: impl IntoIterator<Item = Point>, style: DrawStyle) {
        self.push(DrawCommand::Polygon {
            points: points.into_iter().collect(),
            style,
        });
    }

    /// Append a Bézier path.
    pub fn draw_path(&mut self, path: BezPath, style: DrawStyle) {
        self.push(DrawCommand::Path { path, style });
    }

    /// Append a stroked line segment.
    pub fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.push(DrawCommand::Line {
            line: Line::new(from, to),
            stroke,
        });
    }

    /// Append a circular sector from `start_angle` to `end_angle` (radians).
    pub fn draw_pie(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        style: DrawStyle,
    ) {
        self.push(DrawCommand::Pie {
            center,
            radius,
            start_angle,
            end_angle,
            style,
        });
    }

    /// Append a texture blit.
    pub fn draw_texture(&mut self, texture: TextureId, rect: Rect, alpha: f32) {
        self.push(DrawCommand::Texture {
            texture,
            rect,
            alpha,
        });
    }

    /// Union of all command bounds, or `None` for an empty log.
    pub fn bounds(&self) -> Option<Rect> {
        if let Some((version, bounds)) = self.bounds_cache.get()
            && version == self.version
        {
            return bounds;
        }
        let mut it = self.commands.iter().map(DrawCommand::bounds);
        let bounds = it.next().map(|first| it.fold(first, |acc, r| acc.union(r)));
        self.bounds_cache.set(Some((self.version, bounds)));
        bounds
    }

    /// Returns `true` if any command contains the local point `pt`.
    pub fn contains(&self, pt: Point) -> bool {
        self.commands.iter().any(|c| c.contains(pt))
    }
}
