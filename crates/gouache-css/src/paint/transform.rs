//! Transform resolution
//!
//! [CSS Transforms Level 1](https://www.w3.org/TR/css-transforms-1/)
//!
//! Folds an element's `transform` list and `transform-origin` into a single
//! 2D affine matrix in absolute device coordinates.

use crate::layout::{Point, Rect};
use crate::style::{ElementPaintStyle, TransformFunction, TransformOrigin};

/// [§ 7.1 Mathematical Description](https://www.w3.org/TR/css-transforms-1/#mathematical-description)
///
/// A 2D affine matrix in `matrix(a, b, c, d, e, f)` order:
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    /// Row 1, column 1.
    pub a: f32,
    /// Row 2, column 1.
    pub b: f32,
    /// Row 1, column 2.
    pub c: f32,
    /// Row 2, column 2.
    pub d: f32,
    /// Horizontal translation.
    pub e: f32,
    /// Vertical translation.
    pub f: f32,
}

impl Matrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// A matrix from its six coefficients.
    #[must_use]
    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// [§ 13.1 translate()](https://www.w3.org/TR/css-transforms-1/#funcdef-transform-translate)
    #[must_use]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// [§ 13.1 scale()](https://www.w3.org/TR/css-transforms-1/#funcdef-transform-scale)
    #[must_use]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// [§ 13.1 rotate()](https://www.w3.org/TR/css-transforms-1/#funcdef-transform-rotate)
    ///
    /// Positive angles turn clockwise on a y-down surface.
    #[must_use]
    pub fn rotate(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// [§ 13.1 skew()](https://www.w3.org/TR/css-transforms-1/#funcdef-transform-skew)
    #[must_use]
    pub fn skew(ax_degrees: f32, ay_degrees: f32) -> Self {
        Self::new(
            1.0,
            ay_degrees.to_radians().tan(),
            ax_degrees.to_radians().tan(),
            1.0,
            0.0,
            0.0,
        )
    }

    /// `self × other`: the result applies `other` first, then `self`.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// `self` followed by `next`: the same as `next.multiply(self)`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        next.multiply(self)
    }

    /// Map a point through the matrix.
    #[must_use]
    pub fn transform_point(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// `ad - bc`; zero when the transform collapses the plane.
    #[must_use]
    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// The inverse transform, or `None` when the matrix collapses the plane.
    #[must_use]
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() <= f32::EPSILON {
            return None;
        }
        Some(Self {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    /// The axis-aligned bounding box of `rect` after mapping its corners.
    #[must_use]
    pub fn map_rect(&self, rect: &Rect) -> Rect {
        let corners = [
            Point::new(rect.x, rect.y),
            Point::new(rect.right(), rect.y),
            Point::new(rect.x, rect.bottom()),
            Point::new(rect.right(), rect.bottom()),
        ]
        .map(|p| self.transform_point(p));
        let (mut min, mut max) = (corners[0], corners[0]);
        for p in &corners[1..] {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Rect::from_corners(min, max)
    }

    /// Whether the matrix is exactly the identity.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The elementary matrix of one transform function.
///
/// Percentages in translations resolve against the border box size.
fn function_matrix(function: &TransformFunction, rect: &Rect) -> Matrix {
    match *function {
        TransformFunction::Translate(x, y) => {
            Matrix::translate(x.resolve(rect.width), y.resolve(rect.height))
        }
        TransformFunction::TranslateX(x) => Matrix::translate(x.resolve(rect.width), 0.0),
        TransformFunction::TranslateY(y) => Matrix::translate(0.0, y.resolve(rect.height)),
        TransformFunction::Scale(sx, sy) => Matrix::scale(sx, sy),
        TransformFunction::ScaleX(sx) => Matrix::scale(sx, 1.0),
        TransformFunction::ScaleY(sy) => Matrix::scale(1.0, sy),
        TransformFunction::Rotate(angle) => Matrix::rotate(angle),
        TransformFunction::Skew(ax, ay) => Matrix::skew(ax, ay),
        TransformFunction::SkewX(ax) => Matrix::skew(ax, 0.0),
        TransformFunction::SkewY(ay) => Matrix::skew(0.0, ay),
        TransformFunction::Matrix([a, b, c, d, e, f]) => Matrix::new(a, b, c, d, e, f),
    }
}

/// [§ 6.1 The Transform Rendering Model](https://www.w3.org/TR/css-transforms-1/#transform-rendering)
///
/// "The transformation matrix is computed from the transform and
/// transform-origin properties as follows:
///
/// 1. Start with the identity matrix.
/// 2. Translate by the computed X and Y of transform-origin
/// 3. Multiply by each of the transform functions in transform property
///    from left to right
/// 4. Translate by the negated computed X and Y values of transform-origin"
///
/// The origin is placed at `rect`'s position plus the resolved offsets, so
/// the result maps absolute coordinates to absolute coordinates. An empty
/// list means no transform. Arguments are not clamped: zero or negative
/// scales are allowed.
#[must_use]
pub fn resolve_transform(
    functions: &[TransformFunction],
    origin: Option<TransformOrigin>,
    rect: &Rect,
) -> Option<Matrix> {
    if functions.is_empty() {
        return None;
    }

    let origin = origin.unwrap_or_default();
    let ox = rect.x + origin.x.resolve(rect.width);
    let oy = rect.y + origin.y.resolve(rect.height);

    let folded = functions
        .iter()
        .fold(Matrix::translate(ox, oy), |acc, function| {
            acc.multiply(&function_matrix(function, rect))
        });
    Some(folded.multiply(&Matrix::translate(-ox, -oy)))
}

/// [§ 3 The Transform Rendering Model](https://www.w3.org/TR/css-transforms-1/#transformable-element)
///
/// The transform an element actually carries: inline boxes never do.
#[must_use]
pub fn resolve_element_transform(style: &ElementPaintStyle) -> Option<Matrix> {
    if !style.box_kind.is_transformable() {
        return None;
    }
    resolve_transform(&style.transform, style.transform_origin, &style.border_box)
}
