//! CSS Color values
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use serde::{Deserialize, Serialize};

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as straight (non-premultiplied) RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// [§ 6.1.1 The transparent keyword](https://www.w3.org/TR/css-color-4/#transparent-color)
    ///
    /// "fully transparent ... black with a zero alpha"
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color with explicit alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether painting this color has no visible effect.
    #[must_use]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Components as premultiplied `[r, g, b, a]` in `0.0..=1.0`.
    ///
    /// [§ 12.3 Interpolating with Alpha](https://www.w3.org/TR/css-color-4/#interpolation-alpha)
    #[must_use]
    pub fn to_premultiplied(self) -> [f32; 4] {
        let a = f32::from(self.a) / 255.0;
        [
            f32::from(self.r) / 255.0 * a,
            f32::from(self.g) / 255.0 * a,
            f32::from(self.b) / 255.0 * a,
            a,
        ]
    }

    /// Inverse of [`ColorValue::to_premultiplied`], rounding to the nearest channel value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_premultiplied(px: [f32; 4]) -> Self {
        let a = px[3].clamp(0.0, 1.0);
        if a <= 0.0 {
            return Self::TRANSPARENT;
        }
        let channel = |v: f32| ((v / a).clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: channel(px[0]),
            g: channel(px[1]),
            b: channel(px[2]),
            a: (a * 255.0).round() as u8,
        }
    }
}

impl Default for ColorValue {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}
