//! Paint-ready style model and geometry for the Gouache painting core.
//!
//! # Scope
//!
//! This crate implements:
//! - **Style Snapshot** ([CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/))
//!   - Colors, lengths, border sides, background layers
//!   - Gradient and transform function values
//!   - The per-element [`ElementPaintStyle`]
//!
//! - **Transform Resolution** ([CSS Transforms Level 1](https://www.w3.org/TR/css-transforms-1/))
//!   - Transform origin resolution
//!   - Composition of a transform function list into one affine [`Matrix`]
//!
//! - **Gradients** ([CSS Images Level 3](https://www.w3.org/TR/css-images-3/#gradients))
//!   - Color stop fixup
//!   - Linear and radial sampling, repeating variants
//!
//! - **Border Geometry** ([CSS Backgrounds § 4.2](https://www.w3.org/TR/css-backgrounds-3/#border-style))
//!   - solid, dotted, dashed and double border sides as axis-aligned rectangles
//!
//! # Not Implemented
//!
//! - CSS parsing and the cascade: styles arrive already computed.
//! - Rasterization: see the `gouache-render` crate.

/// Box geometry shared by all painting stages.
pub mod layout;
/// Transform resolution, gradient sampling and border geometry.
pub mod paint;
/// Computed, paint-ready style values.
pub mod style;

pub use layout::{Point, Rect};
pub use paint::{
    AXIS_ALIGNMENT_TOLERANCE, GradientSampler, Matrix, ResolvedStop, normalize_stops,
    paint_border_side, resolve_element_transform, resolve_transform, sample_gradient,
    stroke_segment,
};
pub use style::{
    BackgroundLayer, BackgroundSource, BorderSegment, BorderSide, BorderSides, BorderStyle,
    BoxKind, ColorStop, ColorValue, ElementPaintStyle, GradientKind, GradientSpec, ImageHandle,
    LengthPercentage, PhysicalSide, RadialShape, RadialSize, TransformFunction, TransformOrigin,
};
