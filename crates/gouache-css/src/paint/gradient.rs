//! Gradient sampling
//!
//! [CSS Images Level 3 § 3 Gradients](https://www.w3.org/TR/css-images-3/#gradients)
//!
//! A [`GradientSpec`] plus the size of its layer box becomes a
//! [`GradientSampler`]: a deterministic `color_at(x, y)` over the box.
//! Stop positions are kept as normalized offsets, where `1.0` is the
//! gradient length (the axis length for linear gradients, the horizontal
//! radius for radial ones).
//!
//! Colors interpolate linearly in premultiplied RGBA.

use crate::layout::{Point, Rect};
use crate::style::{
    ColorStop, ColorValue, GradientKind, GradientSpec, LengthPercentage, RadialShape, RadialSize,
};

/// Lengths and radii at or below this are degenerate and paint nothing.
const DEGENERATE_LENGTH: f32 = 1e-6;

/// A color stop after position fixup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStop {
    /// Offset along the gradient; `0.0` is the start, `1.0` the gradient length.
    pub offset: f32,
    /// Straight RGBA color.
    pub color: ColorValue,
}

/// [§ 3.4.3 Color Stop "Fixup"](https://www.w3.org/TR/css-images-3/#color-stop-fixup)
///
/// Resolves every stop to a normalized offset:
///
/// 1. A missing first position becomes 0%, a missing last position 100%.
/// 2. Runs of positionless stops are spread evenly between the nearest
///    positioned stops on either side.
/// 3. Any position smaller than its predecessor's is raised to it.
///
/// Percentages are fractions of `length`; absolute lengths are divided by
/// it. A non-positive `length` puts every absolute stop at 0.
#[must_use]
pub fn normalize_stops(stops: &[ColorStop], length: f32) -> Vec<ResolvedStop> {
    let Some(last_index) = stops.len().checked_sub(1) else {
        return Vec::new();
    };

    let mut offsets: Vec<Option<f32>> = stops
        .iter()
        .map(|stop| {
            stop.position.map(|pos| match pos {
                LengthPercentage::Percent(pct) => pct / 100.0,
                LengthPercentage::Px(px) if length > DEGENERATE_LENGTH => px / length,
                LengthPercentage::Px(_) => 0.0,
            })
        })
        .collect();

    // STEP 1: boundaries
    if offsets[last_index].is_none() && last_index > 0 {
        offsets[last_index] = Some(1.0);
    }
    if offsets[0].is_none() {
        offsets[0] = Some(0.0);
    }

    // STEP 2: spread runs of auto stops
    let mut known = 0;
    for index in 1..=last_index {
        let Some(end_offset) = offsets[index] else {
            continue;
        };
        let gap = index - known;
        if gap > 1 {
            let start_offset = offsets[known].unwrap_or(0.0);
            for step in 1..gap {
                #[allow(clippy::cast_precision_loss)]
                let fraction = step as f32 / gap as f32;
                offsets[known + step] =
                    Some(start_offset + (end_offset - start_offset) * fraction);
            }
        }
        known = index;
    }

    // STEP 3: monotonic clamp
    let mut floor = f32::NEG_INFINITY;
    stops
        .iter()
        .zip(offsets)
        .map(|(stop, offset)| {
            let offset = offset.unwrap_or(0.0).max(floor);
            floor = offset;
            ResolvedStop {
                offset,
                color: stop.color,
            }
        })
        .collect()
}

/// How a point maps to a gradient offset.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Geometry {
    /// Signed projection onto the axis from `start` along unit `direction`.
    Linear {
        start: Point,
        direction: Point,
        length: f32,
    },
    /// Elliptical distance from `center`.
    Radial { center: Point, rx: f32, ry: f32 },
    /// Zero-length axis or zero radius: every sample is transparent.
    Degenerate,
}

/// A gradient resolved against its layer box.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSampler {
    geometry: Geometry,
    stops: Vec<ResolvedStop>,
    repeating: bool,
}

/// Build the sampler for `spec` over a layer box of `rect`'s size.
///
/// Sample coordinates passed to [`GradientSampler::color_at`] are local to
/// the box: `(0, 0)` is its top-left corner.
#[must_use]
pub fn sample_gradient(spec: &GradientSpec, rect: &Rect) -> GradientSampler {
    let (geometry, length) = match spec.kind {
        GradientKind::Linear { angle } => linear_geometry(angle, rect.width, rect.height),
        GradientKind::Radial {
            shape,
            size,
            center,
        } => radial_geometry(shape, size, center, rect.width, rect.height),
    };
    GradientSampler {
        geometry,
        stops: normalize_stops(&spec.stops, length),
        repeating: spec.repeating,
    }
}

/// [§ 3.1.1 linear-gradient() syntax](https://www.w3.org/TR/css-images-3/#linear-gradient-syntax)
///
/// "The gradient line's length is ... `abs(W * sin(A)) + abs(H * cos(A))`"
/// and the line passes through the center of the box. This makes the
/// 0% and 100% lines touch the box's "magic corners".
fn linear_geometry(angle: f32, width: f32, height: f32) -> (Geometry, f32) {
    let (sin, cos) = angle.to_radians().sin_cos();
    let length = (width * sin).abs() + (height * cos).abs();
    if length <= DEGENERATE_LENGTH {
        return (Geometry::Degenerate, 0.0);
    }
    // 0deg points up; y grows downward.
    let direction = Point::new(sin, -cos);
    let start = Point::new(
        width / 2.0 - direction.x * length / 2.0,
        height / 2.0 - direction.y * length / 2.0,
    );
    (
        Geometry::Linear {
            start,
            direction,
            length,
        },
        length,
    )
}

/// [§ 3.2.2 Size of a radial gradient](https://www.w3.org/TR/css-images-3/#radial-size)
fn radial_geometry(
    shape: RadialShape,
    size: RadialSize,
    center: (LengthPercentage, LengthPercentage),
    width: f32,
    height: f32,
) -> (Geometry, f32) {
    let center = Point::new(center.0.resolve(width), center.1.resolve(height));

    let dx_near = center.x.abs().min((width - center.x).abs());
    let dx_far = center.x.abs().max((width - center.x).abs());
    let dy_near = center.y.abs().min((height - center.y).abs());
    let dy_far = center.y.abs().max((height - center.y).abs());

    let corners = [
        Point::new(center.x, center.y),
        Point::new(width - center.x, center.y),
        Point::new(center.x, height - center.y),
        Point::new(width - center.x, height - center.y),
    ];
    let corner_distance = |p: &Point| p.x.hypot(p.y);
    let pick_corner = |farthest: bool| {
        corners
            .iter()
            .copied()
            .reduce(|best, candidate| {
                let better = if farthest {
                    corner_distance(&candidate) > corner_distance(&best)
                } else {
                    corner_distance(&candidate) < corner_distance(&best)
                };
                if better { candidate } else { best }
            })
            .unwrap_or_default()
    };

    let (rx, ry) = match (shape, size) {
        (RadialShape::Circle, RadialSize::Explicit { rx, .. }) => {
            let r = rx.resolve(width);
            (r, r)
        }
        (RadialShape::Ellipse, RadialSize::Explicit { rx, ry }) => {
            (rx.resolve(width), ry.resolve(height))
        }
        (RadialShape::Circle, RadialSize::ClosestSide) => {
            let r = dx_near.min(dy_near);
            (r, r)
        }
        (RadialShape::Circle, RadialSize::FarthestSide) => {
            let r = dx_far.max(dy_far);
            (r, r)
        }
        (RadialShape::Ellipse, RadialSize::ClosestSide) => (dx_near, dy_near),
        (RadialShape::Ellipse, RadialSize::FarthestSide) => (dx_far, dy_far),
        (RadialShape::Circle, RadialSize::ClosestCorner | RadialSize::FarthestCorner) => {
            let r = corner_distance(&pick_corner(size == RadialSize::FarthestCorner));
            (r, r)
        }
        (RadialShape::Ellipse, RadialSize::ClosestCorner | RadialSize::FarthestCorner) => {
            // "the ending shape ... has the same aspect-ratio it would have
            // if closest-side [farthest-side] were specified"
            let farthest = size == RadialSize::FarthestCorner;
            let (side_x, side_y) = if farthest {
                (dx_far, dy_far)
            } else {
                (dx_near, dy_near)
            };
            if side_x <= DEGENERATE_LENGTH || side_y <= DEGENERATE_LENGTH {
                (0.0, 0.0)
            } else {
                let corner = pick_corner(farthest);
                let ratio = side_y / side_x;
                let rx = corner.x.hypot(corner.y / ratio);
                (rx, rx * ratio)
            }
        }
    };

    if rx <= DEGENERATE_LENGTH || ry <= DEGENERATE_LENGTH {
        return (Geometry::Degenerate, 0.0);
    }
    (Geometry::Radial { center, rx, ry }, rx)
}

impl GradientSampler {
    /// The resolved stops, in order.
    #[must_use]
    pub fn stops(&self) -> &[ResolvedStop] {
        &self.stops
    }

    /// Whether every sample is transparent.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.geometry == Geometry::Degenerate || self.stops.is_empty()
    }

    /// Distance between the first and last stop offsets.
    #[must_use]
    pub fn span(&self) -> f32 {
        match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => last.offset - first.offset,
            _ => 0.0,
        }
    }

    /// The normalized gradient offset of a box-local point.
    #[must_use]
    pub fn offset_at(&self, x: f32, y: f32) -> Option<f32> {
        match self.geometry {
            Geometry::Linear {
                start,
                direction,
                length,
            } => Some(((x - start.x) * direction.x + (y - start.y) * direction.y) / length),
            Geometry::Radial { center, rx, ry } => {
                Some(((x - center.x) / rx).hypot((y - center.y) / ry))
            }
            Geometry::Degenerate => None,
        }
    }

    /// The color at box-local `(x, y)`.
    #[must_use]
    pub fn color_at(&self, x: f32, y: f32) -> ColorValue {
        self.offset_at(x, y)
            .map_or(ColorValue::TRANSPARENT, |t| self.color_at_offset(t))
    }

    /// [§ 3.4 Gradient Color Stops](https://www.w3.org/TR/css-images-3/#color-stop-syntax)
    ///
    /// The color at normalized offset `t`. Before the first stop the first
    /// color is used, after the last stop the last one. At a hard stop
    /// (two stops at the same offset) the later stop wins.
    ///
    /// For repeating gradients `t` first wraps into `[first, first + span)`.
    /// A zero span leaves `t` alone.
    #[must_use]
    pub fn color_at_offset(&self, t: f32) -> ColorValue {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return ColorValue::TRANSPARENT;
        };

        let span = last.offset - first.offset;
        let t = if self.repeating && span > DEGENERATE_LENGTH {
            first.offset + (t - first.offset).rem_euclid(span)
        } else {
            t
        };

        let after = self.stops.partition_point(|stop| stop.offset <= t);
        if after == 0 {
            return first.color;
        }
        if after == self.stops.len() {
            return last.color;
        }
        let lo = &self.stops[after - 1];
        let hi = &self.stops[after];
        let fraction = (t - lo.offset) / (hi.offset - lo.offset);
        interpolate(lo.color, hi.color, fraction)
    }
}

/// [CSS Images § 3.4.4](https://www.w3.org/TR/css-images-3/#coloring-gradient-line)
///
/// "colors are interpolated in premultiplied color space"
fn interpolate(from: ColorValue, to: ColorValue, fraction: f32) -> ColorValue {
    let from = from.to_premultiplied();
    let to = to.to_premultiplied();
    let mut mixed = [0.0; 4];
    for (out, (a, b)) in mixed.iter_mut().zip(from.iter().zip(to.iter())) {
        *out = a + (b - a) * fraction;
    }
    ColorValue::from_premultiplied(mixed)
}
