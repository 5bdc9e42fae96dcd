//! The frame being painted, with scoped transform and clip state.
//!
//! [CSS Transforms § 6](https://www.w3.org/TR/css-transforms-1/#transform-rendering)
//! and [CSS Overflow § 3](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
//!
//! Drawing goes through the current transform and clip. Entering an
//! element's subtree saves the state and returns a [`SubtreeScope`]; the
//! state comes back when the scope is dropped, however the subtree exits.

use std::ops::{Deref, DerefMut};

use gouache_common::image::LoadedImage;
use gouache_common::warning::warn_once;
use gouache_css::{ColorValue, Matrix, Rect};
use tiny_skia::{FillRule, Mask, PathBuilder, Transform};

use crate::error::PaintError;
use crate::options::PaintOptions;
use crate::painter::GlyphCoverage;
use crate::surface::{Surface, device_pixels, pixmap_paint, solid_paint, to_skia_rect};

/// Transform and clip in effect for drawing.
#[derive(Clone, Default)]
struct CanvasState {
    /// Maps absolute layout coordinates to device pixels.
    transform: Matrix,
    /// Coverage of the active clip; `None` is unclipped.
    clip: Option<Mask>,
}

/// A frame surface plus a stack of saved transform/clip states.
pub struct Canvas {
    surface: Surface,
    anti_alias: bool,
    state: CanvasState,
    saved: Vec<CanvasState>,
}

impl Canvas {
    /// A `width` x `height` frame filled with the options' canvas color.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::SurfaceAllocation`] if the frame cannot be allocated.
    pub fn new(width: u32, height: u32, options: &PaintOptions) -> Result<Self, PaintError> {
        let mut surface = Surface::new(width, height)?;
        surface.fill(options.canvas_color);
        Ok(Self {
            surface,
            anti_alias: options.anti_alias,
            state: CanvasState::default(),
            saved: Vec::new(),
        })
    }

    /// Number of saved states, one per open [`SubtreeScope`].
    #[must_use]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// The current transform.
    #[must_use]
    pub const fn transform(&self) -> Matrix {
        self.state.transform
    }

    /// Whether a clip is active.
    #[must_use]
    pub const fn is_clipped(&self) -> bool {
        self.state.clip.is_some()
    }

    /// Save the state, then concatenate `transform` and intersect `clip`.
    ///
    /// The transform applies before the enclosing one. `clip` is given in the
    /// same coordinates as the element's border box and is mapped through the
    /// new transform, so it turns with the element. Passing neither still
    /// opens a scope.
    pub fn enter_subtree(
        &mut self,
        transform: Option<Matrix>,
        clip: Option<Rect>,
    ) -> SubtreeScope<'_> {
        let depth = self.saved.len();
        self.saved.push(self.state.clone());
        if let Some(matrix) = transform {
            self.state.transform = self.state.transform.multiply(&matrix);
        }
        if let Some(rect) = clip {
            self.intersect_clip(&rect);
        }
        SubtreeScope {
            canvas: self,
            depth,
        }
    }

    /// The frame's area in the current coordinate space, padded by one
    /// unit, or `None` if the transform collapses the plane.
    #[must_use]
    pub fn visible_bounds(&self) -> Option<Rect> {
        let inverse = self.state.transform.invert()?;
        #[allow(clippy::cast_precision_loss)]
        let frame = Rect::new(
            -1.0,
            -1.0,
            self.surface.width() as f32 + 2.0,
            self.surface.height() as f32 + 2.0,
        );
        Some(inverse.map_rect(&frame))
    }

    /// Pop back to the state saved when the stack was `depth` deep.
    fn restore_to(&mut self, depth: usize) {
        if depth >= self.saved.len() {
            return;
        }
        self.saved.truncate(depth + 1);
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn intersect_clip(&mut self, rect: &Rect) {
        let Some(mut mask) = Mask::new(self.surface.width(), self.surface.height()) else {
            return;
        };
        // An empty rect leaves the mask all zero: nothing draws.
        if let Some(rect) = to_skia_rect(rect) {
            mask.fill_path(
                &PathBuilder::from_rect(rect),
                FillRule::Winding,
                self.anti_alias,
                to_transform(&self.state.transform),
            );
        }
        if let Some(outer) = &self.state.clip {
            intersect_masks(&mut mask, outer);
        }
        self.state.clip = Some(mask);
    }

    /// Fill `rect` with `color` through the current transform and clip.
    pub fn fill_rect(&mut self, rect: &Rect, color: ColorValue) {
        if color.is_transparent() {
            return;
        }
        let Some(rect) = to_skia_rect(rect) else {
            return;
        };
        self.surface.pixmap_mut().fill_rect(
            rect,
            &solid_paint(color, self.anti_alias),
            to_transform(&self.state.transform),
            self.state.clip.as_ref(),
        );
    }

    /// Composite `source` with its top-left corner at `(x, y)`.
    pub fn draw_surface(&mut self, source: &Surface, x: f32, y: f32) {
        self.surface.pixmap_mut().draw_pixmap(
            0,
            0,
            source.pixmap().as_ref(),
            &pixmap_paint(),
            to_transform(&self.state.transform).pre_translate(x, y),
            self.state.clip.as_ref(),
        );
    }

    /// Draw `image` stretched over `rect`.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::SurfaceAllocation`] if the scaled image cannot be
    /// allocated.
    pub fn draw_image(&mut self, image: &LoadedImage, rect: &Rect) -> Result<(), PaintError> {
        let (width, height) = (device_pixels(rect.width), device_pixels(rect.height));
        if width == 0 || height == 0 || image.is_empty() {
            return Ok(());
        }
        let scaled = Surface::from_image_scaled(image, width, height)?;
        self.draw_surface(&scaled, rect.x, rect.y);
        Ok(())
    }

    /// Fill `color` through a glyph coverage bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::SurfaceAllocation`] if the tinted bitmap cannot
    /// be allocated.
    pub fn fill_coverage(
        &mut self,
        coverage: &GlyphCoverage,
        color: ColorValue,
    ) -> Result<(), PaintError> {
        if coverage.width == 0 || coverage.height == 0 || color.is_transparent() {
            return Ok(());
        }
        let row = coverage.width as usize;
        if coverage.alpha.len() != row * coverage.height as usize {
            warn_once("text", "glyph coverage does not match its size; run skipped");
            return Ok(());
        }
        let tinted = Surface::from_fn(coverage.width, coverage.height, |x, y| {
            let covered = coverage
                .alpha
                .get(y as usize * row + x as usize)
                .copied()
                .unwrap_or(0);
            ColorValue {
                a: scale_alpha(color.a, covered),
                ..color
            }
        })?;
        self.draw_surface(&tinted, coverage.origin.x, coverage.origin.y);
        Ok(())
    }

    /// The frame as painted so far.
    #[must_use]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Finish painting and keep the frame.
    #[must_use]
    pub fn into_surface(self) -> Surface {
        self.surface
    }
}

/// Restores the canvas state saved by [`Canvas::enter_subtree`] when dropped.
///
/// Dereferences to the canvas, so painting continues through the scope.
pub struct SubtreeScope<'a> {
    canvas: &'a mut Canvas,
    depth: usize,
}

impl Deref for SubtreeScope<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for SubtreeScope<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for SubtreeScope<'_> {
    fn drop(&mut self) {
        self.canvas.restore_to(self.depth);
    }
}

pub(crate) fn to_transform(m: &Matrix) -> Transform {
    Transform::from_row(m.a, m.b, m.c, m.d, m.e, m.f)
}

/// Intersect two masks by taking the minimum coverage of each pixel.
fn intersect_masks(dst: &mut Mask, src: &Mask) {
    for (d, s) in dst.data_mut().iter_mut().zip(src.data()) {
        *d = (*d).min(*s);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn scale_alpha(alpha: u8, coverage: u8) -> u8 {
    ((u16::from(alpha) * u16::from(coverage) + 127) / 255) as u8
}
