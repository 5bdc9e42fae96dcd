//! Rasterization for the Gouache painting core.
//!
//! # Scope
//!
//! This crate provides:
//! - **Surfaces** - owned RGBA rasters backed by `tiny-skia`
//! - **Canvas** - transform and clip state scoped to element subtrees
//! - **Image Decoding** - raster and SVG bytes to pixels
//! - **Background Compositing** - color, image and gradient layers with tiling
//! - **Paint Orchestration** - depth-first painting of an element tree
//!
//! Geometry (transforms, gradients, border strokes) lives in `gouache-css`
//! and is re-exported here for convenience.
//!
//! # Not Implemented
//!
//! - Fetching image bytes: callers hand over bytes they already have.
//! - Font loading and shaping: text goes through a [`TextRasterizer`].
//! - Rounded corners, box shadows and filters.

pub mod background;
pub mod canvas;
pub mod error;
pub mod image_loader;
pub mod options;
pub mod painter;
pub mod surface;

pub use gouache_css as css;

pub use background::{
    BackgroundRaster, paint_background_within, paint_element_background,
    paint_element_background_with, tile_positions,
};
pub use canvas::{Canvas, SubtreeScope};
pub use error::PaintError;
pub use gouache_css::{paint_border_side, resolve_transform, sample_gradient};
pub use image_loader::{
    ImageDecoder, ImageFormat, ImageLoaderPipeline, RasterDecoder, SvgDecoder, decode_image,
    detect_format,
};
pub use options::PaintOptions;
pub use painter::{
    AbortedSubtree, GlyphCoverage, PaintNode, PaintableContent, PaintedFrame, Painter,
    TextRasterizer, TextRun,
};
pub use surface::{MAX_SURFACE_PIXELS, Surface};
