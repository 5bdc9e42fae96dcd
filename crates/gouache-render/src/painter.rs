//! Paint orchestration
//!
//! [CSS 2.1 Appendix E: Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! Walks the element tree depth-first in document order. For each element:
//!
//! 1. Enter its subtree: push its transform and clip.
//! 2. Background (color, then layers).
//! 3. Border sides: top, right, bottom, left.
//! 4. Content: text run, replaced image, or replaced subtree.
//! 5. Children, in order.
//! 6. Leave the subtree (the scope guard restores the state).
//!
//! Later siblings and descendants composite over earlier ones. A surface
//! failure aborts the failing element's subtree only; painting resumes with
//! its next sibling.

use gouache_common::warning::{clear_warnings, warn_once};
use gouache_css::{
    ColorValue, ElementPaintStyle, ImageHandle, Matrix, Point, Rect, paint_border_side,
    resolve_element_transform,
};

use crate::background::paint_background_within;
use crate::canvas::Canvas;
use crate::error::PaintError;
use crate::options::PaintOptions;
use crate::surface::Surface;

/// An element as the painter sees it. Implemented by the layout tree.
///
/// Everything is pulled on demand; nothing is cached between passes.
pub trait PaintNode {
    /// Computed style for this paint pass.
    fn paint_style(&self) -> ElementPaintStyle;

    /// Border box in absolute coordinates.
    fn absolute_border_box(&self) -> Rect;

    /// Clip for this element and its subtree, in absolute coordinates.
    fn clip_region(&self) -> Option<Rect> {
        None
    }

    /// What the element draws besides its background and borders.
    fn content(&self) -> PaintableContent<'_> {
        PaintableContent::Empty
    }

    /// Children in document order.
    fn children(&self) -> Vec<&dyn PaintNode> {
        Vec::new()
    }
}

/// An element's own content.
pub enum PaintableContent<'a> {
    /// Background and borders only.
    Empty,
    /// A run of text.
    Text(TextRun),
    /// [HTML § 4.8.3 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
    ReplacedImage {
        /// Decoded (or failed) image.
        image: ImageHandle,
        /// Where to draw it, in absolute coordinates.
        rect: Rect,
    },
    /// A nested document (an iframe, an embedded SVG document, ...) painted
    /// into `rect`. The subtree's own coordinates start at `(0, 0)`.
    ReplacedSubtree {
        /// Root of the nested tree.
        root: &'a dyn PaintNode,
        /// Viewport in the outer document, in absolute coordinates.
        rect: Rect,
    },
}

/// Text ready for rasterization.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// The characters.
    pub text: String,
    /// Top-left of the run's line box, in absolute coordinates.
    pub origin: Point,
    /// Font size in device units.
    pub font_size: f32,
    /// Fill color.
    pub color: ColorValue,
}

/// An 8-bit coverage bitmap for a text run.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphCoverage {
    /// Where the bitmap's top-left pixel goes, in absolute coordinates.
    pub origin: Point,
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Row-major coverage, `width * height` bytes.
    pub alpha: Vec<u8>,
}

/// Turns text runs into coverage. Font handling lives behind this seam.
pub trait TextRasterizer {
    /// Coverage for `run`, or `None` if it draws nothing.
    fn rasterize(&self, run: &TextRun) -> Option<GlyphCoverage>;
}

/// A subtree that was not painted because of a surface failure.
#[derive(Debug)]
pub struct AbortedSubtree {
    /// Border box of the element whose paint failed.
    pub border_box: Rect,
    /// What went wrong.
    pub error: PaintError,
}

/// The result of a paint pass.
#[derive(Debug)]
pub struct PaintedFrame {
    /// The painted frame.
    pub surface: Surface,
    /// Subtrees skipped after a surface failure, in paint order.
    pub aborted: Vec<AbortedSubtree>,
}

impl PaintedFrame {
    /// Whether every element painted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.aborted.is_empty()
    }
}

/// Paints element trees into frames.
pub struct Painter<'r> {
    options: PaintOptions,
    text: Option<&'r dyn TextRasterizer>,
}

impl<'r> Painter<'r> {
    /// A painter without text support.
    #[must_use]
    pub const fn new(options: PaintOptions) -> Self {
        Self {
            options,
            text: None,
        }
    }

    /// Rasterize text runs with `rasterizer`.
    #[must_use]
    pub fn with_text_rasterizer(mut self, rasterizer: &'r dyn TextRasterizer) -> Self {
        self.text = Some(rasterizer);
        self
    }

    /// The options this painter was built with.
    #[must_use]
    pub const fn options(&self) -> &PaintOptions {
        &self.options
    }

    /// Paint the tree under `root` into a `width` x `height` frame.
    ///
    /// Element failures do not fail the pass; they are listed in
    /// [`PaintedFrame::aborted`].
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::SurfaceAllocation`] if the frame itself cannot
    /// be allocated.
    #[tracing::instrument(skip(self, root))]
    pub fn paint(
        &self,
        root: &dyn PaintNode,
        width: u32,
        height: u32,
    ) -> Result<PaintedFrame, PaintError> {
        clear_warnings();
        let mut canvas = Canvas::new(width, height, &self.options)?;
        let mut aborted = Vec::new();
        self.paint_child(&mut canvas, root, &mut aborted);
        if !aborted.is_empty() {
            tracing::debug!(aborted = aborted.len(), "paint pass finished with aborted subtrees");
        }
        Ok(PaintedFrame {
            surface: canvas.into_surface(),
            aborted,
        })
    }

    /// Paint `node` onto an existing canvas, under its current state.
    ///
    /// # Errors
    ///
    /// Returns the first surface failure of `node` itself. Failures of its
    /// descendants are collected in `aborted` instead.
    pub fn paint_node(
        &self,
        canvas: &mut Canvas,
        node: &dyn PaintNode,
        aborted: &mut Vec<AbortedSubtree>,
    ) -> Result<(), PaintError> {
        let mut style = node.paint_style();
        style.border_box = node.absolute_border_box();
        if let Some(clip) = node.clip_region() {
            style.clip = Some(clip);
        }
        let rect = style.border_box;
        tracing::debug!(
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            layers = style.background_layers.len(),
            "painting element"
        );

        let mut scope = canvas.enter_subtree(resolve_element_transform(&style), style.clip);

        if style.has_background()
            && let Some(visible) = scope.visible_bounds()
            && let Some(background) = paint_background_within(
                &style,
                &rect,
                style.clip.as_ref(),
                &visible,
                &self.options,
            )?
        {
            scope.draw_surface(&background.surface, background.origin.x, background.origin.y);
        }

        paint_borders(&mut scope, &style);

        match node.content() {
            PaintableContent::Empty => {}
            PaintableContent::Text(run) => self.paint_text(&mut scope, &run)?,
            PaintableContent::ReplacedImage { image, rect } => match image.image() {
                Some(pixels) => scope.draw_image(pixels, &rect)?,
                None => {
                    if let ImageHandle::Failed(reason) = &image {
                        warn_once("image", &format!("replaced image skipped: {reason}"));
                    }
                }
            },
            PaintableContent::ReplacedSubtree { root, rect } => {
                let mut nested = scope.enter_subtree(
                    Some(Matrix::translate(rect.x, rect.y)),
                    Some(Rect::new(0.0, 0.0, rect.width, rect.height)),
                );
                self.paint_child(&mut nested, root, aborted);
            }
        }

        for child in node.children() {
            self.paint_child(&mut scope, child, aborted);
        }
        Ok(())
    }

    /// Paint `node`, recording a failure instead of returning it.
    fn paint_child(
        &self,
        canvas: &mut Canvas,
        node: &dyn PaintNode,
        aborted: &mut Vec<AbortedSubtree>,
    ) {
        if let Err(error) = self.paint_node(canvas, node, aborted) {
            let border_box = node.absolute_border_box();
            tracing::error!(
                %error,
                x = border_box.x,
                y = border_box.y,
                width = border_box.width,
                height = border_box.height,
                "element subtree aborted"
            );
            aborted.push(AbortedSubtree { border_box, error });
        }
    }

    fn paint_text(&self, canvas: &mut Canvas, run: &TextRun) -> Result<(), PaintError> {
        let Some(rasterizer) = self.text else {
            warn_once("text", "no text rasterizer configured; text runs are skipped");
            return Ok(());
        };
        match rasterizer.rasterize(run) {
            Some(coverage) => canvas.fill_coverage(&coverage, run.color),
            None => Ok(()),
        }
    }
}

impl Default for Painter<'_> {
    fn default() -> Self {
        Self::new(PaintOptions::default())
    }
}

/// [CSS Backgrounds § 4](https://www.w3.org/TR/css-backgrounds-3/#borders)
///
/// The four sides in order top, right, bottom, left, each along the outer
/// edge of the border box.
fn paint_borders(canvas: &mut Canvas, style: &ElementPaintStyle) {
    for segment in style.border.segments(&style.border_box) {
        let Some(color) = segment.border.paint_color() else {
            continue;
        };
        let rects = paint_border_side(
            segment.start,
            segment.end,
            segment.border.width,
            segment.border.style,
            Some(color),
            segment.reverse,
        );
        tracing::trace!(side = %segment.side, rects = rects.len(), "painting border side");
        for rect in &rects {
            canvas.fill_rect(rect, color);
        }
    }
}
