//! CSS Gradient values
//!
//! [CSS Images Level 3 § 3 Gradients](https://www.w3.org/TR/css-images-3/#gradients)

use serde::{Deserialize, Serialize};

use super::color::ColorValue;
use super::length::LengthPercentage;

/// [§ 3.4.2 Color Stop Lists](https://www.w3.org/TR/css-images-3/#color-stop-syntax)
///
/// `<linear-color-stop> = <color> <length-percentage>?`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// The stop's color.
    pub color: ColorValue,
    /// Explicit position; `None` means "auto", fixed up during normalization.
    pub position: Option<LengthPercentage>,
}

impl ColorStop {
    /// A stop whose position is filled in automatically.
    #[must_use]
    pub const fn auto(color: ColorValue) -> Self {
        Self {
            color,
            position: None,
        }
    }

    /// A stop at a percentage of the gradient length.
    #[must_use]
    pub const fn percent(color: ColorValue, pct: f32) -> Self {
        Self {
            color,
            position: Some(LengthPercentage::Percent(pct)),
        }
    }

    /// A stop at an absolute distance along the gradient.
    #[must_use]
    pub const fn px(color: ColorValue, px: f32) -> Self {
        Self {
            color,
            position: Some(LengthPercentage::Px(px)),
        }
    }
}

/// [§ 3.2.1 radial-gradient() Syntax](https://www.w3.org/TR/css-images-3/#radial-shape)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadialShape {
    /// "The gradient's shape is a circle with constant radius."
    Circle,
    /// "The gradient's shape is an axis-aligned ellipse."
    #[default]
    Ellipse,
}

/// [§ 3.2.2 Size of a radial gradient](https://www.w3.org/TR/css-images-3/#radial-size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RadialSize {
    /// Explicit radii. A circle uses `rx` only.
    Explicit {
        /// Horizontal radius; percentages resolve against the box width.
        rx: LengthPercentage,
        /// Vertical radius; percentages resolve against the box height.
        ry: LengthPercentage,
    },
    /// "The ending shape is sized so that it exactly meets the side of the
    /// gradient box closest to the gradient's center."
    ClosestSide,
    /// "Same as closest-side, except the ending shape is sized based on the
    /// farthest side(s)."
    FarthestSide,
    /// "The ending shape is sized so that it passes through the corner of
    /// the gradient box closest to the gradient's center."
    ClosestCorner,
    /// "Same as closest-corner, except the ending shape is sized based on
    /// the farthest corner."
    #[default]
    FarthestCorner,
}

/// Geometry of a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    /// [§ 3.1 Linear Gradients](https://www.w3.org/TR/css-images-3/#linear-gradients)
    Linear {
        /// Degrees; 0 points up (toward the top), positive angles turn
        /// clockwise. `to <side>` keywords are already converted.
        angle: f32,
    },
    /// [§ 3.2 Radial Gradients](https://www.w3.org/TR/css-images-3/#radial-gradients)
    Radial {
        /// Circle or ellipse.
        shape: RadialShape,
        /// Ending-shape size.
        size: RadialSize,
        /// Center relative to the layer box.
        center: (LengthPercentage, LengthPercentage),
    },
}

/// A computed `linear-gradient()` / `radial-gradient()` (or a repeating one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientSpec {
    /// Geometry.
    pub kind: GradientKind,
    /// [§ 3.5 Repeating Gradients](https://www.w3.org/TR/css-images-3/#repeating-gradients)
    pub repeating: bool,
    /// Color stops in declaration order.
    pub stops: Vec<ColorStop>,
}

impl GradientSpec {
    /// [§ 3.1.1](https://www.w3.org/TR/css-images-3/#linear-gradient-syntax)
    ///
    /// "If the argument is omitted, it defaults to `to bottom`", which is 180deg.
    pub const DEFAULT_LINEAR_ANGLE: f32 = 180.0;

    /// A non-repeating linear gradient.
    #[must_use]
    pub const fn linear(angle: f32, stops: Vec<ColorStop>) -> Self {
        Self {
            kind: GradientKind::Linear { angle },
            repeating: false,
            stops,
        }
    }

    /// A non-repeating radial gradient.
    #[must_use]
    pub const fn radial(
        shape: RadialShape,
        size: RadialSize,
        center: (LengthPercentage, LengthPercentage),
        stops: Vec<ColorStop>,
    ) -> Self {
        Self {
            kind: GradientKind::Radial {
                shape,
                size,
                center,
            },
            repeating: false,
            stops,
        }
    }

    /// The same gradient with the stop pattern tiled beyond its span.
    #[must_use]
    pub fn into_repeating(self) -> Self {
        Self {
            repeating: true,
            ..self
        }
    }
}
