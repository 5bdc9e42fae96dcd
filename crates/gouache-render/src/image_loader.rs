//! Image decoding pipeline: detect format, then decode.
//!
//! [CSS Backgrounds § 3.3 'background-image'](https://www.w3.org/TR/css-backgrounds-3/#background-image)
//!
//! Bytes arrive already fetched. The pipeline has two steps:
//!
//! 1. [`detect_format()`] picks SVG or raster from an optional name or MIME
//!    hint, falling back to sniffing the first bytes.
//! 2. The first [`ImageDecoder`] that supports the format decodes it:
//!    [`SvgDecoder`] or [`RasterDecoder`] unless the caller adds its own.
//!
//! [`decode_image()`] wraps the outcome in an [`ImageHandle`], so a failure
//! becomes a layer that draws nothing rather than an error.

use gouache_common::image::LoadedImage;
use gouache_css::ImageHandle;

use crate::error::PaintError;

/// Detected image format. The `image` crate tells raster formats apart
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// SVG vector image (decoded via usvg + resvg).
    Svg,
    /// PNG, JPEG, GIF, WebP and the rest, via the `image` crate.
    Raster,
}

/// Whether `bytes` hold an SVG or a raster image.
///
/// A `.svg` name or an `image/svg*` MIME hint wins. Otherwise the bytes are
/// SVG if they start with `<?xml` or `<svg` after leading whitespace, and
/// raster in every other case.
#[must_use]
pub fn detect_format(hint: Option<&str>, bytes: &[u8]) -> ImageFormat {
    if let Some(hint) = hint {
        let is_svg_name = std::path::Path::new(hint)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        let is_svg_mime = hint
            .get(..9)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/svg"));
        if is_svg_name || is_svg_mime {
            return ImageFormat::Svg;
        }
    }

    let trimmed = bytes
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take(256)
        .copied()
        .collect::<Vec<u8>>();

    if trimmed.starts_with(b"<?xml") || trimmed.starts_with(b"<svg") {
        return ImageFormat::Svg;
    }

    ImageFormat::Raster
}

/// A decoder that can turn raw bytes into a [`LoadedImage`].
pub trait ImageDecoder {
    /// Human-readable name (for diagnostics).
    fn name(&self) -> &'static str;

    /// Whether this decoder handles the given format.
    fn supports(&self, format: ImageFormat) -> bool;

    /// Attempt to decode `bytes` into a [`LoadedImage`].
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::ImageDecode`] if the bytes cannot be decoded by
    /// this decoder.
    fn decode(&self, bytes: &[u8]) -> Result<LoadedImage, PaintError>;
}

/// Decodes SVG images via usvg → resvg rasterization at their intrinsic size.
pub struct SvgDecoder;

impl ImageDecoder for SvgDecoder {
    fn name(&self) -> &'static str {
        "SVG (resvg)"
    }

    fn supports(&self, format: ImageFormat) -> bool {
        format == ImageFormat::Svg
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn decode(&self, bytes: &[u8]) -> Result<LoadedImage, PaintError> {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(bytes, &opts)
            .map_err(|e| PaintError::ImageDecode(format!("failed to parse SVG: {e}")))?;

        let size = tree.size();
        let (w, h) = (size.width().ceil() as u32, size.height().ceil() as u32);
        if w == 0 || h == 0 {
            return Err(PaintError::ImageDecode(
                "SVG has zero-size dimensions".to_string(),
            ));
        }

        let mut pixmap = tiny_skia::Pixmap::new(w, h)
            .ok_or(PaintError::SurfaceAllocation { width: w, height: h })?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        // resvg renders premultiplied; LoadedImage holds straight RGBA.
        let rgba = pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let px = px.demultiply();
                [px.red(), px.green(), px.blue(), px.alpha()]
            })
            .collect();
        LoadedImage::new(w, h, rgba)
            .ok_or_else(|| PaintError::ImageDecode("SVG raster has unexpected size".to_string()))
    }
}

/// Decodes raster images (PNG, JPEG, GIF, WebP, …) via the `image` crate.
pub struct RasterDecoder;

impl ImageDecoder for RasterDecoder {
    fn name(&self) -> &'static str {
        "Raster (image crate)"
    }

    fn supports(&self, format: ImageFormat) -> bool {
        format == ImageFormat::Raster
    }

    fn decode(&self, bytes: &[u8]) -> Result<LoadedImage, PaintError> {
        let dynamic_img = image::load_from_memory(bytes)
            .map_err(|e| PaintError::ImageDecode(format!("could not decode image ({e})")))?;
        let rgba = dynamic_img.to_rgba8();
        let (w, h) = rgba.dimensions();
        LoadedImage::new(w, h, rgba.into_raw()).ok_or_else(|| {
            PaintError::ImageDecode("decoded buffer has unexpected size".to_string())
        })
    }
}

/// Image decoding pipeline that detects format and dispatches to the
/// appropriate decoder.
pub struct ImageLoaderPipeline {
    decoders: Vec<Box<dyn ImageDecoder>>,
}

impl ImageLoaderPipeline {
    /// Create a pipeline with the default decoders (SVG + raster).
    #[must_use]
    pub fn new() -> Self {
        Self {
            decoders: vec![Box::new(SvgDecoder), Box::new(RasterDecoder)],
        }
    }

    /// Add a decoder, consulted before the existing ones.
    #[must_use]
    pub fn with_decoder(mut self, decoder: Box<dyn ImageDecoder>) -> Self {
        self.decoders.insert(0, decoder);
        self
    }

    /// Detect the image format and decode `bytes` into a [`LoadedImage`].
    ///
    /// `hint` is a file name or MIME type, when the caller knows one.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::ImageDecode`] if no decoder supports the
    /// detected format or if decoding fails.
    pub fn decode(&self, bytes: &[u8], hint: Option<&str>) -> Result<LoadedImage, PaintError> {
        let format = detect_format(hint, bytes);

        let decoder = self
            .decoders
            .iter()
            .find(|decoder| decoder.supports(format))
            .ok_or_else(|| {
                PaintError::ImageDecode(format!("no decoder available for format {format:?}"))
            })?;
        tracing::trace!(decoder = decoder.name(), ?format, len = bytes.len(), "decoding image");
        decoder.decode(bytes)
    }

    /// Decode `bytes` into a handle the compositor can draw or skip.
    #[must_use]
    pub fn decode_handle(&self, bytes: &[u8], hint: Option<&str>) -> ImageHandle {
        match self.decode(bytes, hint) {
            Ok(image) => ImageHandle::ready(image),
            Err(err) => {
                tracing::debug!(%err, "image decode failed");
                ImageHandle::Failed(err.to_string())
            }
        }
    }
}

impl Default for ImageLoaderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode `bytes` with the default pipeline.
///
/// Failure is not an error: the handle is [`ImageHandle::Failed`] and the
/// compositor skips the layer.
#[must_use]
pub fn decode_image(bytes: &[u8]) -> ImageHandle {
    ImageLoaderPipeline::new().decode_handle(bytes, None)
}
