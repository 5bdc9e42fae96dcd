//! Integration tests for gradient stop fixup and sampling.

use gouache_css::{
    ColorStop, ColorValue, GradientKind, GradientSpec, LengthPercentage, RadialShape, RadialSize,
    Rect, normalize_stops, sample_gradient,
};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

const RED: ColorValue = ColorValue::rgb(255, 0, 0);
const GREEN: ColorValue = ColorValue::rgb(0, 255, 0);
const BLUE: ColorValue = ColorValue::rgb(0, 0, 255);

fn palette(index: usize) -> ColorValue {
    [RED, GREEN, BLUE, ColorValue::BLACK, ColorValue::WHITE][index % 5]
}

fn channel_distance(a: ColorValue, b: ColorValue) -> u8 {
    [
        a.r.abs_diff(b.r),
        a.g.abs_diff(b.g),
        a.b.abs_diff(b.b),
        a.a.abs_diff(b.a),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

// Stop fixup

#[test]
fn test_missing_boundaries_default_to_ends() {
    let stops = normalize_stops(&[ColorStop::auto(RED), ColorStop::auto(BLUE)], 100.0);
    let offsets: Vec<f32> = stops.iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.0, 1.0]);
}

#[test]
fn test_auto_stops_spread_evenly() {
    let stops = normalize_stops(
        &[
            ColorStop::auto(RED),
            ColorStop::auto(GREEN),
            ColorStop::auto(BLUE),
            ColorStop::percent(RED, 60.0),
            ColorStop::auto(GREEN),
        ],
        100.0,
    );
    let offsets: Vec<f32> = stops.iter().map(|s| s.offset).collect();
    assert_eq!(offsets.len(), 5);
    assert!((offsets[1] - 0.2).abs() < 1e-6);
    assert!((offsets[2] - 0.4).abs() < 1e-6);
    assert!((offsets[3] - 0.6).abs() < 1e-6);
    assert!((offsets[4] - 1.0).abs() < 1e-6);
}

#[test]
fn test_decreasing_positions_are_raised() {
    let stops = normalize_stops(
        &[
            ColorStop::percent(RED, 50.0),
            ColorStop::percent(GREEN, 20.0),
            ColorStop::percent(BLUE, 80.0),
        ],
        100.0,
    );
    let offsets: Vec<f32> = stops.iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.5, 0.5, 0.8]);
}

#[test]
fn test_auto_stops_spread_before_raising() {
    // The auto stop sits halfway between its declared neighbors (10% and
    // 90%), and only then is the 10% stop raised to 50%.
    let stops = normalize_stops(
        &[
            ColorStop::percent(RED, 50.0),
            ColorStop::percent(GREEN, 10.0),
            ColorStop::auto(BLUE),
            ColorStop::percent(RED, 90.0),
        ],
        100.0,
    );
    let offsets: Vec<f32> = stops.iter().map(|s| s.offset).collect();
    assert_eq!(offsets.len(), 4);
    assert!((offsets[0] - 0.5).abs() < 1e-6);
    assert!((offsets[1] - 0.5).abs() < 1e-6);
    assert!((offsets[2] - 0.5).abs() < 1e-6);
    assert!((offsets[3] - 0.9).abs() < 1e-6);
}

#[test]
fn test_absolute_stops_divide_by_length() {
    let stops = normalize_stops(
        &[ColorStop::px(RED, 25.0), ColorStop::px(BLUE, 150.0)],
        200.0,
    );
    assert!((stops[0].offset - 0.125).abs() < 1e-6);
    assert!((stops[1].offset - 0.75).abs() < 1e-6);
}

#[test]
fn test_empty_stop_list() {
    assert!(normalize_stops(&[], 100.0).is_empty());
    let sampler = sample_gradient(
        &GradientSpec::linear(GradientSpec::DEFAULT_LINEAR_ANGLE, Vec::new()),
        &Rect::new(0.0, 0.0, 10.0, 10.0),
    );
    assert!(sampler.is_degenerate());
    assert_eq!(sampler.color_at(5.0, 5.0), ColorValue::TRANSPARENT);
}

#[quickcheck]
fn prop_fixup_is_monotonic_with_fixed_ends(positions: Vec<Option<u8>>) -> TestResult {
    if positions.len() < 2 {
        return TestResult::discard();
    }
    let count = positions.len();
    let stops: Vec<ColorStop> = positions
        .iter()
        .enumerate()
        .map(|(index, position)| {
            // Interior stops may carry a position; the boundaries are left to fixup.
            let position = if index == 0 || index == count - 1 {
                None
            } else {
                position.map(|p| LengthPercentage::Percent(f32::from(p % 101)))
            };
            ColorStop {
                color: palette(index),
                position,
            }
        })
        .collect();

    let resolved = normalize_stops(&stops, 100.0);
    let non_decreasing = resolved.windows(2).all(|w| w[0].offset <= w[1].offset);
    let first_is_zero = resolved.first().is_some_and(|s| s.offset == 0.0);
    // The last stop may be raised past 100% by an earlier stop, never below.
    let last_at_least_one = resolved.last().is_some_and(|s| s.offset >= 1.0);
    TestResult::from_bool(
        resolved.len() == count && non_decreasing && first_is_zero && last_at_least_one,
    )
}

// Sampling

#[test]
fn test_default_linear_runs_top_to_bottom() {
    let spec = GradientSpec::linear(
        GradientSpec::DEFAULT_LINEAR_ANGLE,
        vec![ColorStop::auto(RED), ColorStop::auto(BLUE)],
    );
    let sampler = sample_gradient(&spec, &Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(sampler.color_at(50.0, 0.0), RED);
    assert_eq!(sampler.color_at(50.0, 100.0), BLUE);
    // Horizontal position does not matter.
    assert_eq!(sampler.color_at(0.0, 30.0), sampler.color_at(100.0, 30.0));
}

#[test]
fn test_zero_degrees_points_up() {
    let spec = GradientSpec::linear(0.0, vec![ColorStop::auto(RED), ColorStop::auto(BLUE)]);
    let sampler = sample_gradient(&spec, &Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(sampler.color_at(50.0, 100.0), RED);
    assert_eq!(sampler.color_at(50.0, 0.0), BLUE);
}

#[test]
fn test_diagonal_reaches_magic_corners() {
    let spec = GradientSpec::linear(45.0, vec![ColorStop::auto(RED), ColorStop::auto(BLUE)]);
    let sampler = sample_gradient(&spec, &Rect::new(0.0, 0.0, 200.0, 100.0));
    let start = sampler.offset_at(0.0, 100.0).unwrap();
    let end = sampler.offset_at(200.0, 0.0).unwrap();
    assert!(start.abs() < 1e-4, "bottom-left corner sits at 0%: {start}");
    assert!((end - 1.0).abs() < 1e-4, "top-right corner sits at 100%: {end}");
}

#[test]
fn test_hard_stop_later_color_wins() {
    let spec = GradientSpec::linear(
        90.0,
        vec![
            ColorStop::percent(RED, 0.0),
            ColorStop::percent(RED, 50.0),
            ColorStop::percent(BLUE, 50.0),
            ColorStop::percent(BLUE, 100.0),
        ],
    );
    let sampler = sample_gradient(&spec, &Rect::new(0.0, 0.0, 100.0, 10.0));
    assert_eq!(sampler.color_at_offset(0.5), BLUE);
    assert_eq!(sampler.color_at_offset(0.499), RED);
}

#[test]
fn test_colors_clamp_outside_stops() {
    let spec = GradientSpec::linear(
        90.0,
        vec![ColorStop::percent(RED, 20.0), ColorStop::percent(BLUE, 80.0)],
    );
    let sampler = sample_gradient(&spec, &Rect::new(0.0, 0.0, 100.0, 10.0));
    assert_eq!(sampler.color_at(5.0, 5.0), RED);
    assert_eq!(sampler.color_at(95.0, 5.0), BLUE);
    assert_eq!(sampler.color_at_offset(-3.0), RED);
    assert_eq!(sampler.color_at_offset(7.0), BLUE);
}

#[test]
fn test_zero_size_box_is_transparent() {
    let spec = GradientSpec::linear(90.0, vec![ColorStop::auto(RED), ColorStop::auto(BLUE)]);
    let sampler = sample_gradient(&spec, &Rect::new(0.0, 0.0, 0.0, 0.0));
    assert!(sampler.is_degenerate());
    assert_eq!(sampler.color_at(0.0, 0.0), ColorValue::TRANSPARENT);
}

#[test]
fn test_radial_center_and_edge() {
    let spec = GradientSpec::radial(
        RadialShape::Circle,
        RadialSize::ClosestSide,
        (LengthPercentage::CENTER, LengthPercentage::CENTER),
        vec![ColorStop::auto(RED), ColorStop::auto(BLUE)],
    );
    let sampler = sample_gradient(&spec, &Rect::new(0.0, 0.0, 100.0, 60.0));
    assert_eq!(sampler.color_at(50.0, 30.0), RED);
    // Closest side is 30px away vertically; the circle ends there.
    assert!((sampler.offset_at(50.0, 0.0).unwrap() - 1.0).abs() < 1e-5);
    assert!((sampler.offset_at(80.0, 30.0).unwrap() - 1.0).abs() < 1e-5);
}

#[test]
fn test_radial_farthest_corner_ellipse_passes_through_corner() {
    let spec = GradientSpec::radial(
        RadialShape::Ellipse,
        RadialSize::FarthestCorner,
        (LengthPercentage::Percent(25.0), LengthPercentage::CENTER),
        vec![ColorStop::auto(RED), ColorStop::auto(BLUE)],
    );
    let sampler = sample_gradient(&spec, &Rect::new(0.0, 0.0, 200.0, 100.0));
    let corner = sampler.offset_at(200.0, 100.0).unwrap();
    assert!((corner - 1.0).abs() < 1e-4, "farthest corner at {corner}");
}

/// Offset at `(x, y)` of a radial gradient centered at (50, 50) in a 200x100 box.
fn off_center_offset(shape: RadialShape, size: RadialSize, x: f32, y: f32) -> f32 {
    let spec = GradientSpec::radial(
        shape,
        size,
        (LengthPercentage::Percent(25.0), LengthPercentage::CENTER),
        vec![ColorStop::auto(RED), ColorStop::auto(BLUE)],
    );
    sample_gradient(&spec, &Rect::new(0.0, 0.0, 200.0, 100.0))
        .offset_at(x, y)
        .unwrap()
}

#[test]
fn test_radial_circle_farthest_side() {
    // The right edge is 150px away, farther than either vertical edge.
    let t = off_center_offset(RadialShape::Circle, RadialSize::FarthestSide, 150.0, 50.0);
    assert!((t - 2.0 / 3.0).abs() < 1e-4, "{t}");
    let t = off_center_offset(RadialShape::Circle, RadialSize::FarthestSide, 200.0, 50.0);
    assert!((t - 1.0).abs() < 1e-4, "{t}");
}

#[test]
fn test_radial_circle_closest_corner() {
    for (x, y) in [(0.0, 0.0), (0.0, 100.0)] {
        let t = off_center_offset(RadialShape::Circle, RadialSize::ClosestCorner, x, y);
        assert!((t - 1.0).abs() < 1e-4, "({x}, {y}): {t}");
    }
    let t = off_center_offset(RadialShape::Circle, RadialSize::ClosestCorner, 200.0, 0.0);
    assert!(t > 1.0, "{t}");
}

#[test]
fn test_radial_ellipse_farthest_side() {
    for (x, y) in [(200.0, 50.0), (50.0, 100.0), (50.0, 0.0)] {
        let t = off_center_offset(RadialShape::Ellipse, RadialSize::FarthestSide, x, y);
        assert!((t - 1.0).abs() < 1e-4, "({x}, {y}): {t}");
    }
    let t = off_center_offset(RadialShape::Ellipse, RadialSize::FarthestSide, 125.0, 50.0);
    assert!((t - 0.5).abs() < 1e-4, "{t}");
}

#[test]
fn test_radial_ellipse_closest_side() {
    for (x, y) in [(0.0, 50.0), (100.0, 50.0), (50.0, 0.0)] {
        let t = off_center_offset(RadialShape::Ellipse, RadialSize::ClosestSide, x, y);
        assert!((t - 1.0).abs() < 1e-4, "({x}, {y}): {t}");
    }
}

#[test]
fn test_radial_ellipse_closest_corner() {
    // Closest sides are both 50px away, so the ellipse is a circle through (0, 0).
    let t = off_center_offset(RadialShape::Ellipse, RadialSize::ClosestCorner, 0.0, 0.0);
    assert!((t - 1.0).abs() < 1e-4, "{t}");
    let t = off_center_offset(RadialShape::Ellipse, RadialSize::ClosestCorner, 0.0, 50.0);
    assert!((t - 50.0 / 50.0_f32.hypot(50.0)).abs() < 1e-4, "{t}");
}

#[test]
fn test_zero_radius_is_transparent() {
    let spec = GradientSpec::radial(
        RadialShape::Circle,
        RadialSize::Explicit {
            rx: LengthPercentage::ZERO,
            ry: LengthPercentage::ZERO,
        },
        (LengthPercentage::CENTER, LengthPercentage::CENTER),
        vec![ColorStop::auto(RED), ColorStop::auto(BLUE)],
    );
    let sampler = sample_gradient(&spec, &Rect::new(0.0, 0.0, 50.0, 50.0));
    assert!(sampler.is_degenerate());
    assert_eq!(sampler.color_at(25.0, 25.0), ColorValue::TRANSPARENT);
}

#[test]
fn test_spec_serializes_as_json() {
    let spec = GradientSpec::linear(45.0, vec![ColorStop::auto(RED), ColorStop::px(BLUE, 10.0)])
        .into_repeating();
    let json = serde_json::to_string(&spec).unwrap();
    let back: GradientSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back, spec);
    assert!(
        matches!(back.kind, GradientKind::Linear { angle } if (angle - 45.0).abs() < f32::EPSILON)
    );
}

#[quickcheck]
fn prop_continuous_between_stops(t: u16) -> bool {
    let spec = GradientSpec::linear(
        90.0,
        vec![
            ColorStop::percent(RED, 10.0),
            ColorStop::percent(GREEN, 40.0),
            ColorStop::percent(BLUE, 90.0),
        ],
    );
    let sampler = sample_gradient(&spec, &Rect::new(0.0, 0.0, 100.0, 10.0));
    // Strictly inside [0.1, 0.9), away from the stop at 0.4.
    let t = 0.1 + f32::from(t % 800) / 1000.0;
    if (t - 0.4).abs() < 1e-3 {
        return true;
    }
    let epsilon = 1e-4;
    channel_distance(
        sampler.color_at_offset(t),
        sampler.color_at_offset(t + epsilon),
    ) <= 1
}

#[quickcheck]
fn prop_repeating_is_periodic(t: i16) -> bool {
    let spec = GradientSpec::linear(
        90.0,
        vec![
            ColorStop::px(RED, 10.0),
            ColorStop::px(BLUE, 30.0),
            ColorStop::px(RED, 50.0),
        ],
    )
    .into_repeating();
    let sampler = sample_gradient(&spec, &Rect::new(0.0, 0.0, 100.0, 10.0));
    let span = sampler.span();
    let t = f32::from(t % 400) / 4.0;
    channel_distance(
        sampler.color_at_offset(t),
        sampler.color_at_offset(t + span),
    ) <= 1
}

#[test]
fn test_repeating_tiles_past_last_stop() {
    let spec = GradientSpec::linear(
        90.0,
        vec![ColorStop::px(RED, 0.0), ColorStop::px(BLUE, 20.0)],
    )
    .into_repeating();
    let sampler = sample_gradient(&spec, &Rect::new(0.0, 0.0, 100.0, 10.0));
    let first_tile = sampler.color_at(10.0, 5.0);
    assert!(channel_distance(first_tile, sampler.color_at(50.0, 5.0)) <= 1);
    assert!(channel_distance(first_tile, sampler.color_at(90.0, 5.0)) <= 1);
    assert_ne!(first_tile, RED);
    assert_ne!(first_tile, BLUE);
}
