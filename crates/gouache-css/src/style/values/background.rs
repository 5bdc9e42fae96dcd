//! CSS Background layers
//!
//! [CSS Backgrounds and Borders Level 3 § 3](https://www.w3.org/TR/css-backgrounds-3/#backgrounds)

use std::sync::Arc;

use gouache_common::image::LoadedImage;

use super::gradient::GradientSpec;
use crate::layout::Rect;

/// The outcome of decoding a background image.
///
/// [§ 3.3 'background-image'](https://www.w3.org/TR/css-backgrounds-3/#background-image)
///
/// "A value of none counts as an image layer but draws nothing. An image
/// that is empty (zero width or zero height), that fails to download, or
/// that cannot be displayed ... still counts as an image layer but draws
/// nothing."
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageHandle {
    /// Decoded pixels.
    Ready(Arc<LoadedImage>),
    /// The bytes could not be decoded; the message says why.
    Failed(String),
}

impl ImageHandle {
    /// Wrap decoded pixels.
    #[must_use]
    pub fn ready(image: LoadedImage) -> Self {
        Self::Ready(Arc::new(image))
    }

    /// The decoded image, if decoding succeeded and it has pixels.
    #[must_use]
    pub fn image(&self) -> Option<&LoadedImage> {
        match self {
            Self::Ready(image) if !image.is_empty() => Some(image),
            Self::Ready(_) | Self::Failed(_) => None,
        }
    }
}

/// What a background layer draws.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundSource {
    /// A decoded (or failed) image.
    Image(ImageHandle),
    /// [CSS Images § 3](https://www.w3.org/TR/css-images-3/#gradients)
    /// A generated gradient image.
    Gradient(GradientSpec),
}

/// One entry of `background-image` with its computed position and repeat.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundLayer {
    /// What to draw.
    pub source: BackgroundSource,
    /// [§ 3.6 'background-position'](https://www.w3.org/TR/css-backgrounds-3/#background-position)
    /// and [§ 3.9 'background-size'](https://www.w3.org/TR/css-backgrounds-3/#background-size)
    ///
    /// The first tile's rectangle in absolute device units.
    pub position: Rect,
    /// [§ 3.4 'background-repeat'](https://www.w3.org/TR/css-backgrounds-3/#background-repeat)
    pub repeat_x: bool,
    /// [§ 3.4 'background-repeat'](https://www.w3.org/TR/css-backgrounds-3/#background-repeat)
    pub repeat_y: bool,
}

impl BackgroundLayer {
    /// A layer drawn once at `position`.
    #[must_use]
    pub const fn new(source: BackgroundSource, position: Rect) -> Self {
        Self {
            source,
            position,
            repeat_x: false,
            repeat_y: false,
        }
    }

    /// The same layer with the given repeat flags.
    #[must_use]
    pub fn with_repeat(self, repeat_x: bool, repeat_y: bool) -> Self {
        Self {
            repeat_x,
            repeat_y,
            ..self
        }
    }
}
