//! Owned RGBA rasters.
//!
//! A [`Surface`] wraps a premultiplied `tiny_skia::Pixmap`. Everything that
//! crosses the API boundary (colors, images, PNG output) is straight RGBA;
//! premultiplication stays inside this module and the canvas.

use std::path::Path;

use anyhow::Result;
use gouache_common::image::LoadedImage;
use gouache_css::{ColorValue, Rect};
use image::RgbaImage;
use tiny_skia::{
    ColorU8, FilterQuality, Paint, Pixmap, PixmapPaint, PremultipliedColorU8, Transform,
};

use crate::error::PaintError;

/// Largest number of pixels a surface may hold (1 GiB of RGBA).
pub const MAX_SURFACE_PIXELS: u64 = 1 << 28;

/// A raster in device pixels, initially fully transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// Allocate a transparent surface.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::SurfaceAllocation`] if either dimension is zero,
    /// the area exceeds [`MAX_SURFACE_PIXELS`], or the backend refuses it.
    pub fn new(width: u32, height: u32) -> Result<Self, PaintError> {
        if u64::from(width) * u64::from(height) > MAX_SURFACE_PIXELS {
            return Err(PaintError::SurfaceAllocation { width, height });
        }
        let pixmap =
            Pixmap::new(width, height).ok_or(PaintError::SurfaceAllocation { width, height })?;
        Ok(Self { pixmap })
    }

    /// A surface whose every pixel comes from `color_at(x, y)`.
    ///
    /// # Errors
    ///
    /// Fails like [`Surface::new`].
    pub fn from_fn(
        width: u32,
        height: u32,
        color_at: impl Fn(u32, u32) -> ColorValue,
    ) -> Result<Self, PaintError> {
        let mut surface = Self::new(width, height)?;
        let row = width as usize;
        for (index, pixel) in surface.pixmap.pixels_mut().iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let (x, y) = ((index % row) as u32, (index / row) as u32);
            *pixel = premultiply(color_at(x, y));
        }
        Ok(surface)
    }

    /// `image` scaled to `width` x `height` with nearest-neighbor sampling.
    ///
    /// # Errors
    ///
    /// Fails like [`Surface::new`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_image_scaled(
        image: &LoadedImage,
        width: u32,
        height: u32,
    ) -> Result<Self, PaintError> {
        let (src_w, src_h) = (image.width(), image.height());
        if src_w == 0 || src_h == 0 {
            return Self::new(width, height);
        }
        Self::from_fn(width, height, |dx, dy| {
            let sx = ((u64::from(dx) * u64::from(src_w)) / u64::from(width))
                .min(u64::from(src_w) - 1) as u32;
            let sy = ((u64::from(dy) * u64::from(src_h)) / u64::from(height))
                .min(u64::from(src_h) - 1) as u32;
            image
                .pixel(sx, sy)
                .map_or(ColorValue::TRANSPARENT, |[r, g, b, a]| {
                    ColorValue::rgba(r, g, b, a)
                })
        })
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The straight RGBA color at `(x, y)`, or `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<ColorValue> {
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some(ColorValue::rgba(px.red(), px.green(), px.blue(), px.alpha()))
    }

    /// Whether every pixel is fully transparent.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.pixmap.pixels().iter().all(|px| px.alpha() == 0)
    }

    /// Replace every pixel with `color`.
    pub fn fill(&mut self, color: ColorValue) {
        self.pixmap.fill(to_skia_color(color));
    }

    /// Alpha-blend `color` over `rect`, in surface coordinates.
    pub fn fill_rect(&mut self, rect: &Rect, color: ColorValue, anti_alias: bool) {
        let Some(rect) = to_skia_rect(rect) else {
            return;
        };
        self.pixmap.fill_rect(
            rect,
            &solid_paint(color, anti_alias),
            Transform::identity(),
            None,
        );
    }

    /// Alpha-blend `source` with its top-left corner at `(x, y)`.
    pub fn draw_surface(&mut self, source: &Self, x: f32, y: f32) {
        self.pixmap.draw_pixmap(
            0,
            0,
            source.pixmap.as_ref(),
            &pixmap_paint(),
            Transform::from_translate(x, y),
            None,
        );
    }

    /// Make every pixel whose center lies outside `keep` transparent.
    pub fn clear_outside(&mut self, keep: &Rect) {
        let row = self.pixmap.width() as usize;
        for (index, pixel) in self.pixmap.pixels_mut().iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let (cx, cy) = ((index % row) as f32 + 0.5, (index / row) as f32 + 0.5);
            let inside = cx >= keep.x && cx < keep.right() && cy >= keep.y && cy < keep.bottom();
            if !inside {
                *pixel = PremultipliedColorU8::TRANSPARENT;
            }
        }
    }

    /// Straight RGBA bytes, row-major.
    #[must_use]
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let px = px.demultiply();
                [px.red(), px.green(), px.blue(), px.alpha()]
            })
            .collect()
    }

    /// Write the surface to `path` as a PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be saved to the given path.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let buffer = RgbaImage::from_raw(self.width(), self.height(), self.to_rgba())
            .ok_or_else(|| anyhow::anyhow!("surface buffer does not match its size"))?;
        buffer.save_with_format(path, image::ImageFormat::Png).map_err(|e| {
            anyhow::anyhow!("failed to save surface to '{}': {e}", path.display())
        })?;
        Ok(())
    }

    pub(crate) const fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }
}

/// A device length rounded to whole pixels. Negative and non-finite
/// lengths are zero; huge ones saturate and fail allocation later.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn device_pixels(length: f32) -> u32 {
    if length.is_finite() && length > 0.0 {
        length.round() as u32
    } else {
        0
    }
}

/// Straight RGBA to tiny-skia's storage format.
pub(crate) fn premultiply(color: ColorValue) -> PremultipliedColorU8 {
    ColorU8::from_rgba(color.r, color.g, color.b, color.a).premultiply()
}

pub(crate) fn to_skia_color(color: ColorValue) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// `None` for empty or non-finite rectangles, which paint nothing.
pub(crate) fn to_skia_rect(rect: &Rect) -> Option<tiny_skia::Rect> {
    if rect.is_empty() {
        return None;
    }
    tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
}

pub(crate) fn solid_paint(color: ColorValue, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = anti_alias;
    paint
}

/// Source-over with nearest sampling, so integer offsets copy pixels exactly.
pub(crate) fn pixmap_paint() -> PixmapPaint {
    PixmapPaint {
        quality: FilterQuality::Nearest,
        ..PixmapPaint::default()
    }
}
