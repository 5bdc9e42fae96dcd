//! Integration tests for border stroke geometry.

use gouache_css::{
    AXIS_ALIGNMENT_TOLERANCE, BorderSide, BorderSides, BorderStyle, ColorValue, PhysicalSide,
    Point, Rect, paint_border_side, stroke_segment,
};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

const BLACK: Option<ColorValue> = Some(ColorValue::BLACK);

fn horizontal(length: f32, width: f32, style: BorderStyle) -> Vec<Rect> {
    paint_border_side(
        Point::new(0.0, 0.0),
        Point::new(length, 0.0),
        width,
        style,
        BLACK,
        false,
    )
}

#[test]
fn test_solid_is_one_rect() {
    let rects = horizontal(100.0, 4.0, BorderStyle::Solid);
    assert_eq!(rects, vec![Rect::new(0.0, 0.0, 100.0, 4.0)]);
}

#[test]
fn test_invisible_sides_paint_nothing() {
    assert!(horizontal(100.0, 4.0, BorderStyle::None).is_empty());
    assert!(horizontal(100.0, 4.0, BorderStyle::Hidden).is_empty());
    assert!(horizontal(100.0, 0.0, BorderStyle::Solid).is_empty());
    assert!(horizontal(100.0, -2.0, BorderStyle::Solid).is_empty());

    let transparent = paint_border_side(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        4.0,
        BorderStyle::Solid,
        Some(ColorValue::TRANSPARENT),
        false,
    );
    assert!(transparent.is_empty());
    let unset = paint_border_side(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        4.0,
        BorderStyle::Solid,
        None,
        false,
    );
    assert!(unset.is_empty());
}

#[test]
fn test_zero_length_segment_is_empty() {
    let p = Point::new(7.0, 7.0);
    assert!(paint_border_side(p, p, 3.0, BorderStyle::Solid, BLACK, false).is_empty());
}

#[test]
fn test_dotted_squares_with_gaps() {
    let rects = horizontal(10.0, 2.0, BorderStyle::Dotted);
    assert_eq!(
        rects,
        vec![
            Rect::new(0.0, 0.0, 2.0, 2.0),
            Rect::new(4.0, 0.0, 2.0, 2.0),
            Rect::new(8.0, 0.0, 2.0, 2.0),
        ]
    );
}

#[test]
fn test_dashed_last_dash_is_clipped() {
    // period 8: dashes at 0, 8, 16; the third is cut from 6 to 4.
    let rects = horizontal(20.0, 2.0, BorderStyle::Dashed);
    assert_eq!(
        rects,
        vec![
            Rect::new(0.0, 0.0, 6.0, 2.0),
            Rect::new(8.0, 0.0, 6.0, 2.0),
            Rect::new(16.0, 0.0, 4.0, 2.0),
        ]
    );
}

#[test]
fn test_vertical_dashes() {
    let rects = stroke_segment(
        Point::new(5.0, 0.0),
        Point::new(5.0, 12.0),
        1.0,
        BorderStyle::Dashed,
        false,
    );
    assert_eq!(
        rects,
        vec![
            Rect::new(5.0, 0.0, 1.0, 3.0),
            Rect::new(5.0, 4.0, 1.0, 3.0),
            Rect::new(5.0, 8.0, 1.0, 3.0),
        ]
    );
}

#[quickcheck]
fn prop_dashes_stay_inside_segment(length: u16, width: u8, dotted: bool) -> TestResult {
    if width == 0 || length == 0 {
        return TestResult::discard();
    }
    let length = f32::from(length % 2000) + 1.0;
    let width = f32::from(width % 20) + 1.0;
    let style = if dotted {
        BorderStyle::Dotted
    } else {
        BorderStyle::Dashed
    };
    let dash = if dotted { width } else { width * 3.0 };

    let rects = horizontal(length, width, style);
    let Some(last) = rects.last() else {
        return TestResult::failed();
    };
    let inside = rects
        .iter()
        .all(|r| r.x >= 0.0 && r.right() <= length + AXIS_ALIGNMENT_TOLERANCE);
    let full_dashes = rects[..rects.len() - 1]
        .iter()
        .all(|r| (r.width - dash).abs() < AXIS_ALIGNMENT_TOLERANCE);
    let last_fits = last.width <= dash + AXIS_ALIGNMENT_TOLERANCE;
    // The last dash ends at the segment end, or a full dash (and its gap) fit before it.
    let clipped_exactly = (last.right() - length).abs() < AXIS_ALIGNMENT_TOLERANCE
        || (last.width - dash).abs() < AXIS_ALIGNMENT_TOLERANCE;
    TestResult::from_bool(inside && full_dashes && last_fits && clipped_exactly)
}

#[test]
fn test_double_splits_into_bands() {
    // band = floor((6 + 2) / 3) = 2
    let rects = horizontal(50.0, 6.0, BorderStyle::Double);
    assert_eq!(
        rects,
        vec![
            Rect::new(0.0, 0.0, 50.0, 2.0),
            Rect::new(0.0, 4.0, 50.0, 2.0),
        ]
    );
}

#[test]
fn test_double_reverse_draws_far_band_first() {
    let rects = paint_border_side(
        Point::new(0.0, 30.0),
        Point::new(50.0, 30.0),
        6.0,
        BorderStyle::Double,
        BLACK,
        true,
    );
    assert_eq!(
        rects,
        vec![
            Rect::new(0.0, 24.0, 50.0, 2.0),
            Rect::new(0.0, 28.0, 50.0, 2.0),
        ]
    );
}

#[test]
fn test_double_band_width_at_seam_prone_widths() {
    // width 4: band = floor(6 / 3) = 2, gap 0
    let rects = horizontal(10.0, 4.0, BorderStyle::Double);
    assert_eq!(
        rects,
        vec![Rect::new(0.0, 0.0, 10.0, 2.0), Rect::new(0.0, 2.0, 10.0, 2.0)]
    );
    // width 5: band = floor(7 / 3) = 2, gap 1
    let rects = horizontal(10.0, 5.0, BorderStyle::Double);
    assert_eq!(
        rects,
        vec![Rect::new(0.0, 0.0, 10.0, 2.0), Rect::new(0.0, 3.0, 10.0, 2.0)]
    );
}

#[test]
fn test_double_band_uses_unrounded_width() {
    // width 3.6: band = floor(5.6 / 3) = 1; rounding first would give 2.
    let rects = horizontal(10.0, 3.6, BorderStyle::Double);
    assert_eq!(
        rects,
        vec![Rect::new(0.0, 0.0, 10.0, 1.0), Rect::new(0.0, 2.6, 10.0, 1.0)]
    );
}

#[quickcheck]
fn prop_thin_double_matches_solid(width_hundredths: u16, reverse: bool) -> TestResult {
    let width = f32::from(width_hundredths % 300) / 100.0;
    if width <= 0.0 {
        return TestResult::discard();
    }
    let p1 = Point::new(3.0, 8.0);
    let p2 = Point::new(3.0, 58.0);
    let double = paint_border_side(p1, p2, width, BorderStyle::Double, BLACK, reverse);
    let solid = paint_border_side(p1, p2, width, BorderStyle::Solid, BLACK, reverse);
    TestResult::from_bool(double.len() == 1 && double == solid)
}

#[test]
fn test_unsupported_styles_fall_back_to_solid() {
    let solid = horizontal(30.0, 3.0, BorderStyle::Solid);
    for style in [
        BorderStyle::Groove,
        BorderStyle::Ridge,
        BorderStyle::Inset,
        BorderStyle::Outset,
    ] {
        assert_eq!(horizontal(30.0, 3.0, style), solid, "{style}");
    }
}

#[test]
fn test_diagonal_segment_uses_bounds() {
    let rects = stroke_segment(
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        2.0,
        BorderStyle::Solid,
        false,
    );
    assert_eq!(rects, vec![Rect::new(-1.0, -1.0, 12.0, 12.0)]);
}

#[test]
fn test_box_sides_stay_inside_border_box() {
    let border_box = Rect::new(10.0, 20.0, 100.0, 50.0);
    let sides = BorderSides::uniform(BorderSide::new(5.0, BorderStyle::Solid, ColorValue::BLACK));
    let rects: Vec<(PhysicalSide, Vec<Rect>)> = sides
        .segments(&border_box)
        .iter()
        .map(|seg| {
            (
                seg.side,
                paint_border_side(
                    seg.start,
                    seg.end,
                    seg.border.width,
                    seg.border.style,
                    seg.border.color,
                    seg.reverse,
                ),
            )
        })
        .collect();

    assert_eq!(
        rects,
        vec![
            (PhysicalSide::Top, vec![Rect::new(10.0, 20.0, 100.0, 5.0)]),
            (PhysicalSide::Right, vec![Rect::new(105.0, 20.0, 5.0, 50.0)]),
            (PhysicalSide::Bottom, vec![Rect::new(10.0, 65.0, 100.0, 5.0)]),
            (PhysicalSide::Left, vec![Rect::new(10.0, 20.0, 5.0, 50.0)]),
        ]
    );
}

#[test]
fn test_style_keywords_deserialize() {
    let style: BorderStyle = serde_json::from_str("\"dotted\"").unwrap();
    assert_eq!(style, BorderStyle::Dotted);
    let side: BorderSide =
        serde_json::from_str(r#"{"width": 2.0, "style": "double", "color": null}"#).unwrap();
    assert_eq!(side.style, BorderStyle::Double);
    assert_eq!(side.paint_color(), None);
}

#[test]
fn test_style_keywords_round_trip() {
    for style in [
        BorderStyle::None,
        BorderStyle::Hidden,
        BorderStyle::Solid,
        BorderStyle::Dashed,
        BorderStyle::Dotted,
        BorderStyle::Double,
        BorderStyle::Groove,
        BorderStyle::Ridge,
        BorderStyle::Inset,
        BorderStyle::Outset,
    ] {
        assert_eq!(style.to_string().parse::<BorderStyle>(), Ok(style));
    }
    assert_eq!(BorderStyle::Groove.to_string(), "groove");
    assert!("wavy".parse::<BorderStyle>().is_err());
}
