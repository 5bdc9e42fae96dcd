//! Background compositing
//!
//! [CSS Backgrounds and Borders § 3](https://www.w3.org/TR/css-backgrounds-3/#backgrounds)
//!
//! Produces one raster for an element's background: the color first, then
//! each layer in list order, tiled per its repeat flags.

use gouache_common::warning::warn_once;
use gouache_css::{
    BackgroundLayer, BackgroundSource, ElementPaintStyle, GradientSpec, ImageHandle, Point, Rect,
    sample_gradient,
};

use crate::error::PaintError;
use crate::options::PaintOptions;
use crate::surface::{Surface, device_pixels};

/// A background raster and where it goes.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundRaster {
    /// The composited pixels.
    pub surface: Surface,
    /// Absolute position of the surface's `(0, 0)`. Always a whole number of
    /// pixels away from the border box's top-left corner.
    pub origin: Point,
}

/// [§ 3.10 Backgrounds Painting Area](https://www.w3.org/TR/css-backgrounds-3/#background-painting-area)
///
/// Composite `style`'s background over a surface the size of `rect`. The
/// surface's `(0, 0)` is `rect`'s top-left corner. Pixels outside `clip`
/// (absolute coordinates, like `rect`) are left transparent.
///
/// Returns `Ok(None)` when there is nothing to paint: no visible color and
/// no layers, or a box that rounds to zero pixels.
///
/// # Errors
///
/// Returns [`PaintError::SurfaceAllocation`] if a raster for the box or one
/// of its tiles cannot be allocated.
pub fn paint_element_background(
    style: &ElementPaintStyle,
    rect: &Rect,
    clip: Option<&Rect>,
) -> Result<Option<Surface>, PaintError> {
    paint_element_background_with(style, rect, clip, &PaintOptions::default())
}

/// [`paint_element_background`] with explicit options.
///
/// # Errors
///
/// See [`paint_element_background`].
pub fn paint_element_background_with(
    style: &ElementPaintStyle,
    rect: &Rect,
    clip: Option<&Rect>,
    options: &PaintOptions,
) -> Result<Option<Surface>, PaintError> {
    Ok(composite(style, rect, clip, None, options)?.map(|raster| raster.surface))
}

/// The part of the background that can show through `clip` and `visible`.
///
/// The raster covers the whole pixels of `rect` that overlap both, so a
/// border box far larger than the frame costs only what is on screen. Its
/// pixels match the same area of [`paint_element_background_with`]'s output.
///
/// Returns `Ok(None)` when nothing can show.
///
/// # Errors
///
/// Returns [`PaintError::SurfaceAllocation`] if the raster or one of the
/// layer tiles cannot be allocated.
pub fn paint_background_within(
    style: &ElementPaintStyle,
    rect: &Rect,
    clip: Option<&Rect>,
    visible: &Rect,
    options: &PaintOptions,
) -> Result<Option<BackgroundRaster>, PaintError> {
    let limit = match clip {
        Some(clip) => visible.intersection(clip),
        None => Some(*visible),
    };
    match limit {
        Some(limit) => composite(style, rect, clip, Some(&limit), options),
        None => Ok(None),
    }
}

fn composite(
    style: &ElementPaintStyle,
    rect: &Rect,
    clip: Option<&Rect>,
    limit: Option<&Rect>,
    options: &PaintOptions,
) -> Result<Option<BackgroundRaster>, PaintError> {
    let color = style.background_color.filter(|c| !c.is_transparent());
    if color.is_none() && style.background_layers.is_empty() {
        return Ok(None);
    }
    let Some(window) = pixel_window(rect, limit) else {
        return Ok(None);
    };
    let origin = Point::new(window.x, window.y);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut surface = Surface::new(window.width as u32, window.height as u32)?;
    if let Some(color) = color {
        surface.fill(color);
    }

    let cull = if options.cull_tiles {
        clip.map_or(Some(window), |clip| window.intersection(clip))
    } else {
        None
    };
    // With culling on and no visible area left, every tile would be dropped.
    if !options.cull_tiles || cull.is_some() {
        for (index, layer) in style.background_layers.iter().enumerate() {
            let Some(tile) = layer_tile(layer)? else {
                tracing::trace!(index, "background layer has nothing to draw");
                continue;
            };
            let positions = tile_positions(layer, rect, cull.as_ref());
            tracing::trace!(index, tiles = positions.len(), "compositing background layer");

            let mut layer_surface = Surface::new(surface.width(), surface.height())?;
            for position in positions {
                layer_surface.draw_surface(&tile, position.x - origin.x, position.y - origin.y);
            }
            surface.draw_surface(&layer_surface, 0.0, 0.0);
        }
    }

    if let Some(clip) = clip {
        surface.clear_outside(&clip.translate(-origin.x, -origin.y));
    }
    Ok(Some(BackgroundRaster { surface, origin }))
}

/// Whole pixels of `rect`'s raster that overlap `limit`, in absolute
/// coordinates. Without a limit this is the full box.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn pixel_window(rect: &Rect, limit: Option<&Rect>) -> Option<Rect> {
    let (width, height) = (device_pixels(rect.width), device_pixels(rect.height));
    if width == 0 || height == 0 {
        return None;
    }
    let full = Rect::new(rect.x, rect.y, width as f32, height as f32);
    let Some(limit) = limit else {
        return Some(full);
    };
    let area = full.intersection(limit)?;
    let snap = |start: f32, end: f32, size: u32| {
        let lo = (start.floor().max(0.0) as u32).min(size);
        let hi = (end.ceil().max(0.0) as u32).min(size);
        (hi > lo).then_some((lo, hi - lo))
    };
    let (x0, w) = snap(area.x - rect.x, area.right() - rect.x, width)?;
    let (y0, h) = snap(area.y - rect.y, area.bottom() - rect.y, height)?;
    Some(Rect::new(
        rect.x + x0 as f32,
        rect.y + y0 as f32,
        w as f32,
        h as f32,
    ))
}

/// One tile of `layer`, or `None` if the layer draws nothing.
fn layer_tile(layer: &BackgroundLayer) -> Result<Option<Surface>, PaintError> {
    let (width, height) = (
        device_pixels(layer.position.width),
        device_pixels(layer.position.height),
    );
    if width == 0 || height == 0 {
        return Ok(None);
    }
    match &layer.source {
        BackgroundSource::Image(handle) => image_tile(handle, width, height),
        BackgroundSource::Gradient(spec) => gradient_tile(spec, &layer.position, width, height),
    }
}

/// [§ 3.3](https://www.w3.org/TR/css-backgrounds-3/#background-image)
/// "an image that ... cannot be displayed ... still counts as an image layer
/// but draws nothing"
fn image_tile(
    handle: &ImageHandle,
    width: u32,
    height: u32,
) -> Result<Option<Surface>, PaintError> {
    match handle {
        ImageHandle::Failed(reason) => {
            warn_once("image", &format!("background layer skipped: {reason}"));
            Ok(None)
        }
        ImageHandle::Ready(_) => match handle.image() {
            Some(image) => Surface::from_image_scaled(image, width, height).map(Some),
            None => Ok(None),
        },
    }
}

/// The gradient sampled at pixel centers over the layer rectangle.
fn gradient_tile(
    spec: &GradientSpec,
    position: &Rect,
    width: u32,
    height: u32,
) -> Result<Option<Surface>, PaintError> {
    let sampler = sample_gradient(spec, position);
    if sampler.is_degenerate() {
        return Ok(None);
    }
    #[allow(clippy::cast_precision_loss)]
    let tile = Surface::from_fn(width, height, |x, y| {
        sampler.color_at(x as f32 + 0.5, y as f32 + 0.5)
    })?;
    Ok(Some(tile))
}

/// [§ 3.4 'background-repeat'](https://www.w3.org/TR/css-backgrounds-3/#background-repeat)
///
/// Absolute top-left corners of every tile of `layer` over `rect`.
///
/// Along a repeated axis, tiles step forward from the layer position while
/// the tile starts before the box's far edge, then backward while the
/// tile's last pixel (`start + size - 1`) is at or past the box's near edge.
/// Forward positions come first. An axis without repeat has the single
/// layer position.
///
/// With a `clip`, tiles that do not intersect it are dropped.
#[must_use]
pub fn tile_positions(layer: &BackgroundLayer, rect: &Rect, clip: Option<&Rect>) -> Vec<Point> {
    let tile = &layer.position;
    if tile.width <= 0.0 || tile.height <= 0.0 {
        return Vec::new();
    }
    let xs = axis_positions(layer.repeat_x, tile.x, tile.width, rect.x, rect.right());
    let ys = axis_positions(layer.repeat_y, tile.y, tile.height, rect.y, rect.bottom());

    ys.iter()
        .flat_map(|&y| xs.iter().map(move |&x| Point::new(x, y)))
        .filter(|p| {
            clip.is_none_or(|clip| {
                Rect::new(p.x, p.y, tile.width, tile.height).intersects(clip)
            })
        })
        .collect()
}

fn axis_positions(repeat: bool, start: f32, size: f32, near: f32, far: f32) -> Vec<f32> {
    let bounded = [start, size, near, far].iter().all(|v| v.is_finite()) && size > 0.0;
    if !repeat || !bounded {
        return vec![start];
    }
    let mut positions = Vec::new();
    let mut step = 0_u32;
    loop {
        #[allow(clippy::cast_precision_loss)]
        let pos = size.mul_add(step as f32, start);
        if pos >= far {
            break;
        }
        positions.push(pos);
        step += 1;
    }
    let mut step = 1_u32;
    loop {
        #[allow(clippy::cast_precision_loss)]
        let pos = size.mul_add(-(step as f32), start);
        if pos + size - 1.0 < near {
            break;
        }
        positions.push(pos);
        step += 1;
    }
    positions
}
