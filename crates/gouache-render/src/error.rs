//! Errors raised while painting.

use thiserror::Error;

/// Everything that can go wrong in the painting core.
///
/// Only [`PaintError::SurfaceAllocation`] aborts painting, and then only for
/// the element whose raster could not be allocated. Decode failures are
/// reported to callers that ask for them but never stop a paint pass.
#[derive(Debug, Error)]
pub enum PaintError {
    /// A raster of the requested size could not be created.
    #[error("cannot allocate a {width}x{height} surface")]
    SurfaceAllocation {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// Image bytes could not be turned into pixels.
    #[error("could not decode image: {0}")]
    ImageDecode(String),

    /// Paint options were not valid JSON for [`crate::PaintOptions`].
    #[error("invalid paint options: {0}")]
    Config(#[from] serde_json::Error),
}
