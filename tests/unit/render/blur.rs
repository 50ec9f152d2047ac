use super::*;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn blur_params_follow_canvas_convention() {
    assert_eq!(blur_params(0.0), None);
    assert_eq!(blur_params(f64::NAN), None);
    let (radius, sigma) = blur_params(4.0).unwrap();
    assert_eq!(sigma, 2.0);
    assert_eq!(radius, 6);
}

#[test]
fn blur_rejects_wrong_length() {
    assert!(blur_rgba8_premul(&[0u8; 12], 2, 2, 1, 1.0).is_err());
}

#[test]
fn kernel_is_normalized_and_symmetric() {
    let k = Kernel::gaussian(3, 1.5).unwrap();
    assert_eq!(k.taps.len(), 7);
    assert_eq!(k.radius(), 3);
    let sum: f32 = k.taps.iter().sum();
    assert!((sum - 1.0).abs() < 1e-5);
    assert_eq!(k.taps[0], k.taps[6]);
    assert!(k.taps[3] > k.taps[2]);
    assert!(Kernel::gaussian(2, 0.0).is_err());
}

#[test]
fn uniform_buffer_is_a_fixed_point() {
    let src: Vec<u8> = std::iter::repeat_n([40u8, 80, 120, 160], 16)
        .flatten()
        .collect();
    let out = blur_rgba8_premul(&src, 4, 4, 2, 1.0).unwrap();
    assert_eq!(out, src);
}
