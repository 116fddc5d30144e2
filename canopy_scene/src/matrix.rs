// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Local geometry and the pivot-aware matrix built from it.
//!
//! Matrices are [`kurbo::Affine`] with coefficients `[a, b, c, d, e, f]`, mapping
//! `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Size, Vec2};

/// Determinant magnitude below which a matrix is treated as non-invertible.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Invert `m`, or return `None` when it is singular.
///
/// Unlike [`Affine::inverse`], this never produces infinities or NaNs.
pub fn try_invert(m: Affine) -> Option<Affine> {
    if m.determinant().abs() < SINGULAR_EPSILON {
        return None;
    }
    Some(m.inverse())
}

/// Local geometry of a node.
///
/// The pivot is a normalized point within `size`; `(0.5, 0.5)` is the center.
/// Scale, rotation and skew happen around it.
///
/// - In anchor mode, `position` is where the pivot lands in the parent, so changing scale or
///   rotation keeps the pivot fixed there.
/// - Otherwise `position` is where the untransformed top-left corner lands.
///
/// Angles are in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Raw position in parent space.
    pub position: Point,
    /// Size of the node's local box.
    pub size: Size,
    /// Scale factors.
    pub scale: Vec2,
    /// Rotation.
    pub rotation: f64,
    /// Skew angles around x and y.
    pub skew: Vec2,
    /// Normalized pivot.
    pub pivot: Vec2,
    /// Whether `position` addresses the pivot rather than the corner.
    pub pivot_as_anchor: bool,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            size: Size::ZERO,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            skew: Vec2::ZERO,
            pivot: Vec2::ZERO,
            pivot_as_anchor: false,
        }
    }
}

impl Geometry {
    /// The pivot in local units.
    pub fn pivot_point(&self) -> Point {
        Point::new(
            self.pivot.x * self.size.width,
            self.pivot.y * self.size.height,
        )
    }

    /// The scale/rotation/skew part of the local matrix, without translation.
    pub fn linear(&self) -> Affine {
        let (sx, sy) = (self.scale.x, self.scale.y);
        let (kx, ky) = (self.skew.x, self.skew.y);
        let r = self.rotation;
        Affine::new([
            (r + ky).cos() * sx,
            (r + ky).sin() * sx,
            -(r - kx).sin() * sy,
            (r - kx).cos() * sy,
            0.0,
            0.0,
        ])
    }

    /// The parent-space matrix for this geometry.
    pub fn local_matrix(&self) -> Affine {
        let linear = self.linear();
        let p = self.pivot_point().to_vec2();
        let lp = (linear * p.to_point()).to_vec2();
        let mut t = self.position.to_vec2() - lp;
        if !self.pivot_as_anchor {
            t += p;
        }
        linear.then_translate(t)
    }

    /// Offset from the raw position to the reported position.
    ///
    /// In anchor mode the reported position is the top-left corner, which sits at
    /// `-L·P` from the pivot. Otherwise the two coincide.
    pub fn pivot_offset(&self) -> Vec2 {
        if !self.pivot_as_anchor {
            return Vec2::ZERO;
        }
        -(self.linear() * self.pivot_point()).to_vec2()
    }
}
