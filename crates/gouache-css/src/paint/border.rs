//! Border stroke geometry
//!
//! [CSS Backgrounds and Borders § 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
//!
//! Turns one border side into axis-aligned filled rectangles. Sides are
//! independent; corners are not mitered. Rotation is the transform's job,
//! so segments here are always horizontal or vertical.
//!
//! A segment lies on the outer border edge. Its thickness grows toward +y
//! (horizontal) or +x (vertical), or the opposite way when `reverse` is set,
//! which is how right and bottom sides reach back into the box.

use crate::layout::{Point, Rect};
use crate::style::{BorderSide, BorderStyle, ColorValue};

/// Two coordinates closer than this are treated as equal when deciding
/// whether a segment is horizontal or vertical, and when deciding whether a
/// dash still fits before the segment end.
pub const AXIS_ALIGNMENT_TOLERANCE: f32 = 1e-3;

/// [§ 4.2](https://www.w3.org/TR/css-backgrounds-3/#border-style)
///
/// Geometry for one side running from `p1` to `p2`.
///
/// Returns no rectangles when the side would not show: non-positive width,
/// `none`/`hidden`, or a missing or fully transparent color.
#[must_use]
pub fn paint_border_side(
    p1: Point,
    p2: Point,
    width: f32,
    style: BorderStyle,
    color: Option<ColorValue>,
    reverse: bool,
) -> Vec<Rect> {
    let side = BorderSide {
        width,
        style,
        color,
    };
    if side.paint_color().is_none() {
        return Vec::new();
    }
    stroke_segment(p1, p2, width, style, reverse)
}

/// Which way a segment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// A segment expressed along its axis.
struct AxisSegment {
    axis: Axis,
    /// Along-axis coordinate of `p1`.
    start: f32,
    /// `+1` or `-1`: direction from `p1` to `p2`.
    direction: f32,
    /// Along-axis distance from `p1` to `p2`.
    length: f32,
    /// Cross-axis coordinate of the outer edge.
    edge: f32,
    /// `+1` or `-1`: direction the thickness grows.
    inward: f32,
}

impl AxisSegment {
    /// The rectangle covering `[offset, offset + len]` along the segment and
    /// `[depth, depth + thickness]` inward from the outer edge.
    fn piece(&self, offset: f32, len: f32, depth: f32, thickness: f32) -> Rect {
        let along_a = self.start + self.direction * offset;
        let along_b = along_a + self.direction * len;
        let cross_a = self.edge + self.inward * depth;
        let cross_b = cross_a + self.inward * thickness;
        let (a, b) = match self.axis {
            Axis::Horizontal => (Point::new(along_a, cross_a), Point::new(along_b, cross_b)),
            Axis::Vertical => (Point::new(cross_a, along_a), Point::new(cross_b, along_b)),
        };
        Rect::from_corners(a, b)
    }
}

/// Geometry for a visible side, without the visibility checks of
/// [`paint_border_side`].
///
/// Styles without dedicated geometry (`groove`, `ridge`, `inset`,
/// `outset`) and segments that are neither horizontal nor vertical fall
/// back to one full-length rectangle.
#[must_use]
pub fn stroke_segment(
    p1: Point,
    p2: Point,
    width: f32,
    style: BorderStyle,
    reverse: bool,
) -> Vec<Rect> {
    if width <= 0.0 || style.is_suppressed() {
        return Vec::new();
    }

    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let horizontal = dy.abs() <= AXIS_ALIGNMENT_TOLERANCE;
    let vertical = dx.abs() <= AXIS_ALIGNMENT_TOLERANCE;

    let axis = match (horizontal, vertical) {
        (true, true) => return Vec::new(),
        (true, false) => Axis::Horizontal,
        (false, true) => Axis::Vertical,
        (false, false) => {
            // Square-ended stroke: the segment's bounds grown by half the width.
            let half = width / 2.0;
            let bounds = Rect::from_corners(p1, p2);
            return vec![Rect::new(
                bounds.x - half,
                bounds.y - half,
                bounds.width + width,
                bounds.height + width,
            )];
        }
    };

    let (start, delta, edge) = match axis {
        Axis::Horizontal => (p1.x, dx, (p1.y + p2.y) / 2.0),
        Axis::Vertical => (p1.y, dy, (p1.x + p2.x) / 2.0),
    };
    let segment = AxisSegment {
        axis,
        start,
        direction: delta.signum(),
        length: delta.abs(),
        edge,
        inward: if reverse { -1.0 } else { 1.0 },
    };

    match style {
        BorderStyle::Dotted => dashes(&segment, width, width, width),
        BorderStyle::Dashed => dashes(&segment, width * 3.0, width, width),
        BorderStyle::Double if width >= 3.0 => double(&segment, width, reverse),
        BorderStyle::Double
        | BorderStyle::Solid
        | BorderStyle::Groove
        | BorderStyle::Ridge
        | BorderStyle::Inset
        | BorderStyle::Outset
        | BorderStyle::None
        | BorderStyle::Hidden => vec![segment.piece(0.0, segment.length, 0.0, width)],
    }
}

/// Dashes of `dash` length separated by `gap`, starting at `p1`. The last
/// dash is cut exactly at the segment end.
fn dashes(segment: &AxisSegment, dash: f32, gap: f32, width: f32) -> Vec<Rect> {
    let period = dash + gap;
    let mut rects = Vec::new();
    let mut index = 0_u32;
    loop {
        // Offsets come from the index, not a running sum, so they do not drift.
        #[allow(clippy::cast_precision_loss)]
        let offset = index as f32 * period;
        let remaining = segment.length - offset;
        if remaining <= AXIS_ALIGNMENT_TOLERANCE {
            break;
        }
        rects.push(segment.piece(offset, dash.min(remaining), 0.0, width));
        index += 1;
    }
    rects
}

/// [§ 4.2](https://www.w3.org/TR/css-backgrounds-3/#border-style)
/// "Two parallel solid lines with some space between them."
///
/// Each line is `floor((width + 2) / 3)` thick: one flush with the outer
/// edge, one flush with the inner edge. Reversed sides emit the inner
/// (far) line first.
fn double(segment: &AxisSegment, width: f32, reverse: bool) -> Vec<Rect> {
    let band = ((width + 2.0) / 3.0).floor();
    let near = segment.piece(0.0, segment.length, 0.0, band);
    let far = segment.piece(0.0, segment.length, width - band, band);
    if reverse {
        vec![far, near]
    } else {
        vec![near, far]
    }
}
