// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw commands and their styles.

use alloc::vec::Vec;
use kurbo::{BezPath, Ellipse, Line, Point, Rect, RoundedRectRadii, Shape};
use peniko::Color;

use crate::contains;

/// Opaque handle to a texture owned by an external atlas or cache.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// A colored outline.
///
/// Width, joins, caps and dashes come from [`kurbo::Stroke`]; only the width affects
/// bounds and hit testing.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Geometric stroke parameters, in local units.
    pub style: kurbo::Stroke,
}

impl Stroke {
    /// A stroke of `width` in `color` with Kurbo's default joins and caps.
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            style: kurbo::Stroke::new(width),
        }
    }

    /// A stroke in `color` using an existing Kurbo style.
    pub fn with_style(color: Color, style: kurbo::Stroke) -> Self {
        Self { color, style }
    }

    /// Full stroke width.
    pub fn width(&self) -> f64 {
        self.style.width
    }

    /// Half of the stroke width, never negative.
    pub fn half_width(&self) -> f64 {
        self.style.width.max(0.0) * 0.5
    }
}

/// Fill and stroke applied to a closed shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawStyle {
    /// Fill color, if the shape is filled.
    pub fill: Option<Color>,
    /// Outline, if the shape is stroked.
    pub stroke: Option<Stroke>,
}

impl DrawStyle {
    /// Fill only.
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Stroke only.
    pub fn stroke(stroke: Stroke) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
        }
    }

    /// Fill and stroke.
    pub fn fill_and_stroke(color: Color, stroke: Stroke) -> Self {
        Self {
            fill: Some(color),
            stroke: Some(stroke),
        }
    }

    fn outset(&self) -> f64 {
        self.stroke.as_ref().map_or(0.0, Stroke::half_width)
    }
}

/// One entry of a [`Graphics`](crate::Graphics) log.
///
/// All geometry is in the owning node's local coordinate space. Angles are in radians,
/// measured clockwise from the positive x axis in y-down space.
#[derive(Clone, Debug)]
pub enum DrawCommand {
    /// Axis-aligned rectangle; non-zero `radii` round its corners.
    Rect {
        /// Rectangle.
        rect: Rect,
        /// Corner radii (all zero for a sharp rectangle).
        radii: RoundedRectRadii,
        /// Fill and stroke.
        style: DrawStyle,
    },
    /// Ellipse (circles included).
    Ellipse {
        /// Ellipse geometry.
        ellipse: Ellipse,
        /// Fill and stroke.
        style: DrawStyle,
    },
    /// Closed polygon.
    Polygon {
        /// Vertices; the last one connects back to the first.
        points: Vec<Point>,
        /// Fill and stroke.
        style: DrawStyle,
    },
    /// Arbitrary Bézier path.
    Path {
        /// Path geometry.
        path: BezPath,
        /// Fill and stroke.
        style: DrawStyle,
    },
    /// Straight stroked segment.
    Line {
        /// Centerline.
        line: Line,
        /// Stroke; its width also defines the hit tolerance.
        stroke: Stroke,
    },
    /// Circular sector.
    Pie {
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
        /// Start angle in radians.
        start_angle: f64,
        /// End angle in radians.
        end_angle: f64,
        /// Fill and stroke.
        style: DrawStyle,
    },
    /// Texture blitted into a destination rectangle.
    Texture {
        /// Texture handle resolved by the renderer.
        texture: TextureId,
        /// Destination rectangle.
        rect: Rect,
        /// Opacity multiplier.
        alpha: f32,
    },
}

impl DrawCommand {
    /// Conservative local-space bounds, including half of any stroke width.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect { rect, style, .. } => outset(*rect, style.outset()),
            Self::Ellipse { ellipse, style } => outset(ellipse.bounding_box(), style.outset()),
            Self::Polygon { points, style } => {
                let mut it = points.iter().copied();
                let Some(first) = it.next() else {
                    return Rect::ZERO;
                };
                let r = it.fold(Rect::from_points(first, first), |acc, p| {
                    acc.union_pt(p)
                });
                outset(r, style.outset())
            }
            Self::Path { path, style } => outset(path.bounding_box(), style.outset()),
            Self::Line { line, stroke } => outset(line.bounding_box(), stroke.half_width()),
            Self::Pie {
                center,
                radius,
                style,
                ..
            } => outset(
                Rect::from_center_size(*center, (radius * 2.0, radius * 2.0)),
                style.outset(),
            ),
            Self::Texture { rect, .. } => *rect,
        }
    }

    /// Returns `true` if the local point `pt` lies on this command's shape.
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Rect { rect, radii, .. } => contains::rect(*rect, *radii, pt),
            Self::Ellipse { ellipse, .. } => ellipse.contains(pt),
            Self::Polygon { points, .. } => contains::polygon(points, pt),
            Self::Path { path, .. } => path.bounding_box().contains(pt),
            Self::Line { line, stroke } => contains::line(*line, stroke.half_width(), pt),
            Self::Pie {
                center,
                radius,
                start_angle,
                end_angle,
                ..
            } => contains::pie(*center, *radius, *start_angle, *end_angle, pt),
            Self::Texture { rect, .. } => rect.contains(pt),
        }
    }
}

fn outset(rect: Rect, by: f64) -> Rect {
    if by > 0.0 { rect.inflate(by, by) } else { rect }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Cap, Join};

    #[test]
    fn stroke_keeps_kurbo_style() {
        let style = kurbo::Stroke::new(3.0)
            .with_join(Join::Round)
            .with_caps(Cap::Square);
        let stroke = Stroke::with_style(Color::BLACK, style);
        assert_eq!(stroke.width(), 3.0);
        assert_eq!(stroke.half_width(), 1.5);
        assert_eq!(stroke.style.join, Join::Round);
        assert_eq!(stroke.style.start_cap, Cap::Square);

        let cmd = DrawCommand::Rect {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            radii: RoundedRectRadii::from_single_radius(0.0),
            style: DrawStyle::stroke(stroke),
        };
        assert_eq!(cmd.bounds(), Rect::new(-1.5, -1.5, 11.5, 11.5));
    }

    #[test]
    fn negative_width_does_not_shrink_bounds() {
        let line = DrawCommand::Line {
            line: Line::new((0.0, 0.0), (4.0, 0.0)),
            stroke: Stroke::new(Color::BLACK, -2.0),
        };
        assert_eq!(line.bounds(), Rect::new(0.0, 0.0, 4.0, 0.0));
    }
}
