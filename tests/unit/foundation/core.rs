use super::*;

#[test]
fn icon_size_bounds_are_enforced() {
    assert!(IconSize::new(8).is_err());
    assert!(IconSize::new(512).is_err());
    let s = IconSize::new(32).unwrap();
    assert_eq!(s.scale_factor(), 2.0);
    assert_eq!(s.byte_len(), 32 * 32 * 4);
}

#[test]
fn transparent_frame_is_blank() {
    let f = FrameRGBA::transparent(IconSize::new(16).unwrap());
    assert!(f.is_blank());
    assert_eq!(f.alpha_sum(), 0);
    assert_eq!(f.pixel(15, 15), Some(Rgba8Premul::transparent()));
    assert_eq!(f.pixel(16, 0), None);
}

#[test]
fn straight_conversion_inverts_premultiply() {
    let p = Rgba8Premul::from_straight_rgba(200, 100, 50, 128);
    let [r, g, b, a] = p.to_straight();
    assert_eq!(a, 128);
    assert!((i32::from(r) - 200).abs() <= 2);
    assert!((i32::from(g) - 100).abs() <= 2);
    assert!((i32::from(b) - 50).abs() <= 2);
    assert_eq!(Rgba8Premul::transparent().to_straight(), [0, 0, 0, 0]);
}
