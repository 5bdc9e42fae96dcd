//! Box geometry consumed by the painter.
//!
//! # Relevant Specifications
//!
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! # Module Structure
//!
//! - [`box_model`] - Points and rectangles

pub mod box_model;

pub use box_model::{Point, Rect};
