//! CSS Border values
//!
//! [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::color::ColorValue;
use crate::layout::{Point, Rect};

/// [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
///
/// The keyword round-trips through `FromStr` / `Display` in lowercase, which
/// is how style dumps and fixtures spell it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// "No border. Color and width are ignored"
    #[default]
    None,
    /// "Same as none, but has different behavior in the border conflict
    /// resolution for table elements"
    Hidden,
    /// "A single line segment."
    Solid,
    /// "A series of square-ended dashes."
    Dashed,
    /// "A series of round dots." Painted as squares here.
    Dotted,
    /// "Two parallel solid lines with some space between them."
    Double,
    /// "Looks as if it were carved in the canvas."
    Groove,
    /// "Looks as if it were coming out of the canvas."
    Ridge,
    /// "Looks as if the content on the inside of the border is sunken into the canvas."
    Inset,
    /// "Looks as if the content on the inside of the border is coming out of the canvas."
    Outset,
}

impl BorderStyle {
    /// `none` and `hidden` suppress the border regardless of width.
    #[must_use]
    pub const fn is_suppressed(self) -> bool {
        matches!(self, Self::None | Self::Hidden)
    }
}

/// A physical side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PhysicalSide {
    /// The top edge.
    Top,
    /// The right edge.
    Right,
    /// The bottom edge.
    Bottom,
    /// The left edge.
    Left,
}

/// [§ 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
///
/// One side's computed width, style, and color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BorderSide {
    /// [§ 4.3 'border-width'](https://www.w3.org/TR/css-backgrounds-3/#border-width)
    pub width: f32,
    /// [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
    pub style: BorderStyle,
    /// [§ 4.1 'border-color'](https://www.w3.org/TR/css-backgrounds-3/#border-color)
    ///
    /// `None` paints as transparent.
    pub color: Option<ColorValue>,
}

impl BorderSide {
    /// A side with all three values set.
    #[must_use]
    pub const fn new(width: f32, style: BorderStyle, color: ColorValue) -> Self {
        Self {
            width,
            style,
            color: Some(color),
        }
    }

    /// The color to paint with, if painting this side would show anything.
    ///
    /// A side needs a positive width, a style other than `none`/`hidden`,
    /// and a color that is not fully transparent.
    #[must_use]
    pub fn paint_color(&self) -> Option<ColorValue> {
        if self.width <= 0.0 || self.style.is_suppressed() {
            return None;
        }
        self.color.filter(|c| !c.is_transparent())
    }
}

/// The four border sides of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BorderSides {
    /// Top side.
    pub top: BorderSide,
    /// Right side.
    pub right: BorderSide,
    /// Bottom side.
    pub bottom: BorderSide,
    /// Left side.
    pub left: BorderSide,
}

/// One side positioned on a border box, ready for the stroke generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderSegment {
    /// Which side this is.
    pub side: PhysicalSide,
    /// Start point on the outer border edge.
    pub start: Point,
    /// End point on the outer border edge.
    pub end: Point,
    /// Thickness grows toward negative x / y (right and bottom sides).
    pub reverse: bool,
    /// The side's computed values.
    pub border: BorderSide,
}

impl BorderSides {
    /// The same side on all four edges.
    #[must_use]
    pub const fn uniform(side: BorderSide) -> Self {
        Self {
            top: side,
            right: side,
            bottom: side,
            left: side,
        }
    }

    /// The four sides laid along the outer edge of `border_box`, in paint
    /// order: top, right, bottom, left.
    ///
    /// Every segment spans the full edge. Right and bottom are `reverse`, so
    /// their thickness grows back into the box.
    #[must_use]
    pub fn segments(&self, border_box: &Rect) -> [BorderSegment; 4] {
        let (l, t, r, b) = (
            border_box.x,
            border_box.y,
            border_box.right(),
            border_box.bottom(),
        );
        [
            BorderSegment {
                side: PhysicalSide::Top,
                start: Point::new(l, t),
                end: Point::new(r, t),
                reverse: false,
                border: self.top,
            },
            BorderSegment {
                side: PhysicalSide::Right,
                start: Point::new(r, t),
                end: Point::new(r, b),
                reverse: true,
                border: self.right,
            },
            BorderSegment {
                side: PhysicalSide::Bottom,
                start: Point::new(l, b),
                end: Point::new(r, b),
                reverse: true,
                border: self.bottom,
            },
            BorderSegment {
                side: PhysicalSide::Left,
                start: Point::new(l, t),
                end: Point::new(l, b),
                reverse: false,
                border: self.left,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_side_has_no_paint_color() {
        let side = BorderSide::new(4.0, BorderStyle::Hidden, ColorValue::BLACK);
        assert_eq!(side.paint_color(), None);
    }

    #[test]
    fn transparent_side_has_no_paint_color() {
        let side = BorderSide::new(4.0, BorderStyle::Solid, ColorValue::TRANSPARENT);
        assert_eq!(side.paint_color(), None);
        let unset = BorderSide {
            color: None,
            ..side
        };
        assert_eq!(unset.paint_color(), None);
    }

    #[test]
    fn keywords_round_trip() {
        assert_eq!("double".parse::<BorderStyle>(), Ok(BorderStyle::Double));
        assert_eq!(BorderStyle::Dashed.to_string(), "dashed");
        assert!("wavy".parse::<BorderStyle>().is_err());
    }

    #[test]
    fn right_and_bottom_segments_are_reversed() {
        let sides =
            BorderSides::uniform(BorderSide::new(1.0, BorderStyle::Solid, ColorValue::BLACK));
        let segs = sides.segments(&Rect::new(0.0, 0.0, 10.0, 20.0));
        let reversed: Vec<_> = segs.iter().map(|s| s.reverse).collect();
        assert_eq!(reversed, vec![false, true, true, false]);
        assert_eq!(segs[1].start, Point::new(10.0, 0.0));
        assert_eq!(segs[2].end, Point::new(10.0, 20.0));
    }
}
