//! The per-element style snapshot read by the painter.
//!
//! [CSS Cascading Level 4 § 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//!
//! Style and layout build one [`ElementPaintStyle`] per element per paint
//! pass. The painter reads it and never mutates it.

use super::values::{
    BackgroundLayer, BorderSides, ColorValue, TransformFunction, TransformOrigin,
};
use crate::layout::Rect;

/// [CSS Display § 2](https://www.w3.org/TR/css-display-3/#outer-role)
///
/// The part of the box type that matters for painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxKind {
    /// Block-level box.
    #[default]
    Block,
    /// Inline-level, non-replaced box.
    Inline,
    /// Replaced element (`<img>`, `<iframe>`, ...).
    Replaced,
}

impl BoxKind {
    /// [CSS Transforms § 3](https://www.w3.org/TR/css-transforms-1/#transformable-element)
    ///
    /// Only block-level and replaced boxes are transformable here.
    #[must_use]
    pub const fn is_transformable(self) -> bool {
        matches!(self, Self::Block | Self::Replaced)
    }
}

/// Resolved values needed to paint one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPaintStyle {
    /// Box type, for transform eligibility.
    pub box_kind: BoxKind,
    /// Border widths, styles and colors.
    pub border: BorderSides,
    /// [§ 3.2 'background-color'](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    /// `None` paints as transparent.
    pub background_color: Option<ColorValue>,
    /// Background layers, bottom-most first.
    pub background_layers: Vec<BackgroundLayer>,
    /// [§ 6 'transform'](https://www.w3.org/TR/css-transforms-1/#transform-property)
    pub transform: Vec<TransformFunction>,
    /// `None` means the initial `50% 50%`.
    pub transform_origin: Option<TransformOrigin>,
    /// Absolute border box.
    pub border_box: Rect,
    /// Absolute clip for this element and its subtree; `None` is unclipped.
    pub clip: Option<Rect>,
}

impl ElementPaintStyle {
    /// A style with nothing but a border box.
    #[must_use]
    pub fn with_box(border_box: Rect) -> Self {
        Self {
            border_box,
            ..Self::default()
        }
    }

    /// Whether the background has anything to show.
    #[must_use]
    pub fn has_background(&self) -> bool {
        self.background_color.is_some_and(|c| !c.is_transparent())
            || !self.background_layers.is_empty()
    }
}
