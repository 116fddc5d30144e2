// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape-specific point containment.
//!
//! These are deliberately small predicates. Fill rules, joins and caps are not modeled;
//! lines use a flat distance test against half the stroke width.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Line, ParamCurveNearest, Point, Rect, RoundedRect, RoundedRectRadii, Shape};

use core::f64::consts::TAU;

pub(crate) fn rect(rect: Rect, radii: RoundedRectRadii, pt: Point) -> bool {
    if !rect.contains(pt) {
        return false;
    }
    if radii.as_single_radius() == Some(0.0) {
        return true;
    }
    RoundedRect::from_rect(rect, radii).contains(pt)
}

/// Even-odd ray casting towards +x.
pub(crate) fn polygon(points: &[Point], pt: Point) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > pt.y) != (b.y > pt.y) {
            let x_cross = (b.x - a.x) * (pt.y - a.y) / (b.y - a.y) + a.x;
            if pt.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

pub(crate) fn line(line: Line, half_width: f64, pt: Point) -> bool {
    let dist = line.nearest(pt, 0.).distance_sq.sqrt();
    dist <= half_width
}

pub(crate) fn pie(center: Point, radius: f64, start: f64, end: f64, pt: Point) -> bool {
    let v = pt - center;
    if v.hypot2() > radius * radius {
        return false;
    }
    if (end - start).abs() >= TAU {
        return true;
    }
    let angle = normalize(v.y.atan2(v.x));
    let (start, end) = (normalize(start), normalize(end));
    if start <= end {
        angle >= start && angle <= end
    } else {
        angle >= start || angle <= end
    }
}

fn normalize(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a < 0.0 {
        a += TAU;
    }
    // Adding TAU to a tiny negative remainder can round up to exactly TAU.
    if a >= TAU { 0.0 } else { a }
}
