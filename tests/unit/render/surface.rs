use super::*;
use crate::render::text::TextStyle;

fn surface() -> Surface {
    Surface::new(IconSize::new(32).unwrap())
}

fn bar() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((8.0, 2.0));
    p.line_to((8.0, 14.0));
    p
}

fn square() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((4.0, 4.0));
    p.line_to((12.0, 4.0));
    p.line_to((12.0, 12.0));
    p.line_to((4.0, 12.0));
    p.close_path();
    p
}

#[test]
fn new_surface_is_transparent() {
    let s = surface();
    let f = s.snapshot();
    assert_eq!((f.width, f.height), (32, 32));
    assert!(f.is_blank());
    assert!(f.premultiplied);
}

#[test]
fn scaled_fill_lands_in_pixel_space() {
    let mut s = surface();
    s.scale(2.0);
    s.fill_path(&square(), &Paint::Solid(Rgba::rgb(255, 0, 0)))
        .unwrap();
    let f = s.snapshot();
    let inside = f.pixel(16, 16).unwrap();
    assert_eq!(inside.a, 255);
    assert_eq!(inside.r, 255);
    assert_eq!(f.pixel(2, 2).unwrap().a, 0);
    assert_eq!(f.pixel(28, 28).unwrap().a, 0);
}

#[test]
fn stroke_uses_line_width() {
    let mut thin = surface();
    thin.scale(2.0);
    thin.set_line_width(0.5);
    thin.stroke_path(&bar(), &Paint::Solid(Rgba::rgb(0, 0, 255)))
        .unwrap();

    let mut thick = surface();
    thick.scale(2.0);
    thick.set_line_width(3.0);
    thick
        .stroke_path(&bar(), &Paint::Solid(Rgba::rgb(0, 0, 255)))
        .unwrap();

    assert!(thick.snapshot().alpha_sum() > thin.snapshot().alpha_sum());
}

#[test]
fn global_alpha_scales_coverage() {
    let mut full = surface();
    full.scale(2.0);
    full.fill_path(&square(), &Paint::Solid(Rgba::rgb(0, 200, 0)))
        .unwrap();

    let mut half = surface();
    half.scale(2.0);
    half.set_global_alpha(0.5);
    half.fill_path(&square(), &Paint::Solid(Rgba::rgb(0, 200, 0)))
        .unwrap();

    let mut none = surface();
    none.set_global_alpha(0.0);
    none.fill_path(&square(), &Paint::Solid(Rgba::rgb(0, 200, 0)))
        .unwrap();

    assert_eq!(half.snapshot().pixel(16, 16).unwrap().a, 128);
    assert_eq!(full.snapshot().pixel(16, 16).unwrap().a, 255);
    assert!(none.snapshot().is_blank());
}

#[test]
fn save_restore_round_trips_state() {
    let mut s = surface();
    s.set_global_alpha(0.4);
    s.set_line_width(2.5);
    s.save();
    s.scale(2.0);
    s.translate(1.0, 1.0);
    s.set_global_alpha(1.0);
    s.set_line_cap(LineCap::Round);
    s.set_shadow(Shadow::new(Rgba::rgba(0, 0, 0, 0.3), 1.0));
    assert_eq!(s.depth(), 1);
    s.restore();
    assert_eq!(s.depth(), 0);
    assert_eq!(s.global_alpha(), 0.4);
    assert_eq!(s.transform(), Affine::IDENTITY);
    assert_eq!(s.stroke_style().width, 2.5);
    assert_eq!(s.stroke_style().cap, LineCap::Butt);

    // Unbalanced restore is harmless.
    s.restore();
    assert_eq!(s.global_alpha(), 0.4);
}

#[test]
fn shadow_adds_soft_ink_around_shape() {
    let mut plain = surface();
    plain.scale(2.0);
    plain.set_line_width(2.0);
    plain
        .stroke_path(&bar(), &Paint::Solid(Rgba::rgb(33, 150, 243)))
        .unwrap();

    let mut shadowed = surface();
    shadowed.scale(2.0);
    shadowed.set_line_width(2.0);
    shadowed.set_shadow(Shadow::new(Rgba::rgba(33, 150, 243, 0.6), 2.0));
    shadowed
        .stroke_path(&bar(), &Paint::Solid(Rgba::rgb(33, 150, 243)))
        .unwrap();

    let plain = plain.snapshot();
    let shadowed = shadowed.snapshot();
    let covered = |f: &FrameRGBA| f.data.chunks_exact(4).filter(|px| px[3] > 0).count();
    assert!(covered(&shadowed) > covered(&plain));
}

#[test]
fn linear_gradient_varies_along_axis() {
    let mut s = surface();
    s.scale(2.0);
    let mut full = BezPath::new();
    full.move_to((0.0, 0.0));
    full.line_to((16.0, 0.0));
    full.line_to((16.0, 16.0));
    full.line_to((0.0, 16.0));
    full.close_path();
    let paint = Paint::linear(
        (8.0, 0.0),
        (8.0, 16.0),
        &[(0.0, Rgba::rgb(255, 0, 0)), (1.0, Rgba::rgb(0, 0, 255))],
    );
    s.fill_path(&full, &paint).unwrap();
    let f = s.snapshot();
    let top = f.pixel(16, 1).unwrap();
    let bottom = f.pixel(16, 30).unwrap();
    assert!(top.r > top.b);
    assert!(bottom.b > bottom.r);
}

#[test]
fn clear_resets_pixels_and_state() {
    let mut s = surface();
    s.scale(2.0);
    s.save();
    s.fill_path(&square(), &Paint::Solid(Rgba::rgb(1, 2, 3)))
        .unwrap();
    assert!(!s.snapshot().is_blank());
    s.clear();
    assert!(s.snapshot().is_blank());
    assert_eq!(s.depth(), 0);
    assert_eq!(s.transform(), Affine::IDENTITY);
}

#[test]
fn text_draws_glyphs_and_skips_whitespace() {
    let mut s = surface();
    s.scale(2.0);
    s.fill_text(
        "42",
        Point::new(8.0, 8.0),
        &TextStyle::new(9.0).bold(),
        &Paint::Solid(Rgba::rgb(8, 48, 168)),
    )
    .unwrap();
    assert!(!s.snapshot().is_blank());

    let mut blank = surface();
    blank
        .fill_text(
            "   ",
            Point::new(8.0, 8.0),
            &TextStyle::new(9.0),
            &Paint::Solid(Rgba::rgb(8, 48, 168)),
        )
        .unwrap();
    assert!(blank.snapshot().is_blank());
}

#[test]
fn clip_limits_drawing_until_restore() {
    let mut s = surface();
    s.scale(2.0);
    s.save();
    let mut left_half = BezPath::new();
    left_half.move_to((0.0, 0.0));
    left_half.line_to((8.0, 0.0));
    left_half.line_to((8.0, 16.0));
    left_half.line_to((0.0, 16.0));
    left_half.close_path();
    s.clip(&left_half).unwrap();
    assert!(s.is_clipped());

    s.fill_path(&square(), &Paint::Solid(Rgba::rgb(255, 0, 0)))
        .unwrap();
    let f = s.snapshot();
    assert_eq!(f.pixel(12, 16).unwrap().a, 255);
    assert_eq!(f.pixel(20, 16).unwrap().a, 0);

    s.restore();
    assert!(!s.is_clipped());
    s.fill_path(&square(), &Paint::Solid(Rgba::rgb(255, 0, 0)))
        .unwrap();
    assert_eq!(s.snapshot().pixel(20, 16).unwrap().a, 255);
}

#[test]
fn conic_gradient_starts_at_its_start_angle() {
    let mut s = surface();
    s.scale(2.0);
    let mut full = BezPath::new();
    full.move_to((0.0, 0.0));
    full.line_to((16.0, 0.0));
    full.line_to((16.0, 16.0));
    full.line_to((0.0, 16.0));
    full.close_path();
    let paint = Paint::conic(
        (8.0, 8.0),
        -std::f64::consts::FRAC_PI_2,
        &[(0.0, Rgba::rgb(255, 0, 0)), (1.0, Rgba::rgb(0, 0, 255))],
    );
    s.fill_path(&full, &paint).unwrap();
    let f = s.snapshot();

    // Just clockwise of twelve o'clock the ramp has barely begun.
    let after_twelve = f.pixel(17, 1).unwrap();
    assert!(after_twelve.r > 230, "{after_twelve:?}");
    assert!(after_twelve.b < 30, "{after_twelve:?}");

    // A quarter turn later it is a quarter of the way along.
    let three = f.pixel(30, 16).unwrap();
    assert!((170..=210).contains(&three.r), "{three:?}");
    assert!((45..=85).contains(&three.b), "{three:?}");

    let nine = f.pixel(1, 16).unwrap();
    assert!(nine.b > nine.r, "{nine:?}");

    // Just counter-clockwise of twelve the turn is nearly complete.
    let before_twelve = f.pixel(14, 1).unwrap();
    assert!(before_twelve.b > 230, "{before_twelve:?}");
    assert!(before_twelve.r < 30, "{before_twelve:?}");
}
