//! CSS Painting geometry
//!
//! [CSS 2.1 Appendix E - Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! The pure half of painting: everything here is a function of its inputs
//! and produces geometry or colors, never pixels.
//!
//! # Architecture
//!
//! ```text
//! Style → Layout → Paint geometry → Raster
//!                    ↓
//!        Matrix / GradientSampler / Vec<Rect>
//! ```
//!
//! - [`transform`] - transform list + origin → one affine [`Matrix`]
//! - [`gradient`] - gradient value + box → [`GradientSampler`]
//! - [`border`] - one border side → axis-aligned rectangles

pub mod border;
pub mod gradient;
pub mod transform;

pub use border::{AXIS_ALIGNMENT_TOLERANCE, paint_border_side, stroke_segment};
pub use gradient::{GradientSampler, ResolvedStop, normalize_stops, sample_gradient};
pub use transform::{Matrix, resolve_element_transform, resolve_transform};
