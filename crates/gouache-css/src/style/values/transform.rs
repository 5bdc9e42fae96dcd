//! CSS Transform values
//!
//! [CSS Transforms Level 1](https://www.w3.org/TR/css-transforms-1/)

use serde::{Deserialize, Serialize};

use super::length::LengthPercentage;

/// [§ 13 The Transform Functions](https://www.w3.org/TR/css-transforms-1/#transform-functions)
///
/// Angles are in degrees. Order in a list is significant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransformFunction {
    /// `translate(<length-percentage>, <length-percentage>?)`
    Translate(LengthPercentage, LengthPercentage),
    /// `translateX(<length-percentage>)`
    TranslateX(LengthPercentage),
    /// `translateY(<length-percentage>)`
    TranslateY(LengthPercentage),
    /// `scale(<number>, <number>?)`
    Scale(f32, f32),
    /// `scaleX(<number>)`
    ScaleX(f32),
    /// `scaleY(<number>)`
    ScaleY(f32),
    /// `rotate(<angle>)`
    Rotate(f32),
    /// `skew(<angle>, <angle>?)`
    Skew(f32, f32),
    /// `skewX(<angle>)`
    SkewX(f32),
    /// `skewY(<angle>)`
    SkewY(f32),
    /// `matrix(a, b, c, d, e, f)`
    Matrix([f32; 6]),
}

/// [§ 5 The 'transform-origin' Property](https://www.w3.org/TR/css-transforms-1/#transform-origin-property)
///
/// Percentages resolve against the border box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformOrigin {
    /// Horizontal offset from the border box's left edge.
    pub x: LengthPercentage,
    /// Vertical offset from the border box's top edge.
    pub y: LengthPercentage,
}

impl TransformOrigin {
    /// An origin from two offsets.
    #[must_use]
    pub const fn new(x: LengthPercentage, y: LengthPercentage) -> Self {
        Self { x, y }
    }
}

impl Default for TransformOrigin {
    /// Initial value: `50% 50%`.
    fn default() -> Self {
        Self {
            x: LengthPercentage::CENTER,
            y: LengthPercentage::CENTER,
        }
    }
}
