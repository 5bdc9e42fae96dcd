//! CSS Value types
//!
//! - [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//! - [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)
//! - [CSS Images Level 3](https://www.w3.org/TR/css-images-3/)
//! - [CSS Transforms Level 1](https://www.w3.org/TR/css-transforms-1/)

mod background;
mod border;
mod color;
mod gradient;
mod length;
mod transform;

pub use background::{BackgroundLayer, BackgroundSource, ImageHandle};
pub use border::{BorderSegment, BorderSide, BorderSides, BorderStyle, PhysicalSide};
pub use color::ColorValue;
pub use gradient::{ColorStop, GradientKind, GradientSpec, RadialShape, RadialSize};
pub use length::LengthPercentage;
pub use transform::{TransformFunction, TransformOrigin};
