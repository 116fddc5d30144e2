// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color effects applied by the renderer when compositing a node.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// A 4×5 color matrix, row-major.
///
/// Row `i` computes output channel `i` (RGBA) as a weighted sum of the input channels plus
/// the fifth column as an offset. Channels are normalized to `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix(pub [f32; 20]);

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ColorMatrix {
    /// The matrix that leaves colors unchanged.
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    /// Luma-weighted grayscale.
    pub const GRAYSCALE: Self = Self([
        LUMA_R, LUMA_G, LUMA_B, 0.0, 0.0, //
        LUMA_R, LUMA_G, LUMA_B, 0.0, 0.0, //
        LUMA_R, LUMA_G, LUMA_B, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    /// Build a matrix from adjustments, each in `-1.0..=1.0` with `0.0` meaning unchanged.
    ///
    /// Adjustments apply in the order hue, contrast, brightness, saturation.
    pub fn adjust(brightness: f32, contrast: f32, saturation: f32, hue: f32) -> Self {
        Self::hue(hue)
            .then(&Self::contrast(contrast))
            .then(&Self::brightness(brightness))
            .then(&Self::saturation(saturation))
    }

    /// Add `amount` to the color channels.
    pub fn brightness(amount: f32) -> Self {
        let mut m = Self::IDENTITY;
        for row in 0..3 {
            m.0[row * 5 + 4] = amount;
        }
        m
    }

    /// Scale the color channels away from mid gray.
    pub fn contrast(amount: f32) -> Self {
        let s = amount + 1.0;
        let o = 128.0 / 255.0 * (1.0 - s);
        Self([
            s, 0.0, 0.0, 0.0, o, //
            0.0, s, 0.0, 0.0, o, //
            0.0, 0.0, s, 0.0, o, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Interpolate between grayscale (`-1.0`) and doubled saturation (`1.0`).
    pub fn saturation(amount: f32) -> Self {
        let s = amount + 1.0;
        let inv = 1.0 - s;
        let (r, g, b) = (inv * LUMA_R, inv * LUMA_G, inv * LUMA_B);
        Self([
            r + s, g, b, 0.0, 0.0, //
            r, g + s, b, 0.0, 0.0, //
            r, g, b + s, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Rotate hue by `amount · π` radians.
    pub fn hue(amount: f32) -> Self {
        let angle = f64::from(amount) * core::f64::consts::PI;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Color matrices are single precision."
        )]
        let (sin, cos) = (angle.sin() as f32, angle.cos() as f32);
        Self([
            LUMA_R + cos * (1.0 - LUMA_R) - sin * LUMA_R,
            LUMA_G - cos * LUMA_G - sin * LUMA_G,
            LUMA_B - cos * LUMA_B + sin * (1.0 - LUMA_B),
            0.0,
            0.0,
            LUMA_R - cos * LUMA_R + sin * 0.143,
            LUMA_G + cos * (1.0 - LUMA_G) + sin * 0.140,
            LUMA_B - cos * LUMA_B - sin * 0.283,
            0.0,
            0.0,
            LUMA_R - cos * LUMA_R - sin * (1.0 - LUMA_R),
            LUMA_G - cos * LUMA_G + sin * LUMA_G,
            LUMA_B + cos * (1.0 - LUMA_B) + sin * LUMA_B,
            0.0,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
            0.0,
        ])
    }

    /// The matrix applying `self` first and `next` second.
    pub fn then(&self, next: &Self) -> Self {
        let (a, b) = (&self.0, &next.0);
        let mut out = [0.0_f32; 20];
        for i in 0..4 {
            for j in 0..5 {
                let mut v = (0..4).map(|k| b[i * 5 + k] * a[k * 5 + j]).sum::<f32>();
                if j == 4 {
                    v += b[i * 5 + 4];
                }
                out[i * 5 + j] = v;
            }
        }
        Self(out)
    }

    /// Apply to a straight-alpha RGBA color, clamping the result.
    pub fn apply(&self, rgba: [f32; 4]) -> [f32; 4] {
        let m = &self.0;
        core::array::from_fn(|i| {
            let row = &m[i * 5..i * 5 + 5];
            let v = row[0] * rgba[0] + row[1] * rgba[1] + row[2] * rgba[2] + row[3] * rgba[3];
            (v + row[4]).clamp(0.0, 1.0)
        })
    }
}

/// The color effect of a node.
///
/// Grayscale and a custom matrix are mutually exclusive; choosing one replaces the other.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ColorEffect {
    /// Colors are drawn unchanged.
    #[default]
    None,
    /// Colors are reduced to luma.
    Grayscale,
    /// Colors are transformed by a matrix.
    Matrix(ColorMatrix),
}

impl ColorEffect {
    /// Returns `true` unless this is [`ColorEffect::None`].
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// The matrix a renderer should apply, if any.
    pub fn matrix(&self) -> Option<[f32; 20]> {
        match self {
            Self::None => None,
            Self::Grayscale => Some(ColorMatrix::GRAYSCALE.0),
            Self::Matrix(m) => Some(m.0),
        }
    }
}
