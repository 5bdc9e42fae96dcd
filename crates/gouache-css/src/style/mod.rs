//! Computed, paint-ready style values.
//!
//! This module implements the value types the painter reads per:
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//! - [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)
//! - [CSS Images Level 3](https://www.w3.org/TR/css-images-3/)
//! - [CSS Transforms Level 1](https://www.w3.org/TR/css-transforms-1/)
//!
//! Everything here is already cascaded and computed; the painter never
//! parses CSS.

pub mod paint_style;
mod values;

// Re-export all public types
pub use paint_style::{BoxKind, ElementPaintStyle};
pub use values::{
    BackgroundLayer, BackgroundSource, BorderSegment, BorderSide, BorderSides, BorderStyle,
    ColorStop, ColorValue, GradientKind, GradientSpec, ImageHandle, LengthPercentage,
    PhysicalSide, RadialShape, RadialSize, TransformFunction, TransformOrigin,
};
