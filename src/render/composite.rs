use crate::foundation::{
    error::{DlIconError, DlIconResult},
    math::mul_div255_u8,
};

pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra layer opacity:
/// `out = src * op + dst * (1 - src.a * op)`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = (opacity.clamp(0.0, 1.0) * 255.0).round() as u16;
    let src_a = mul_div255_u8(u16::from(src[3]), op);
    if src_a == 0 {
        return dst;
    }
    let keep = 255 - u16::from(src_a);

    let mut out = dst;
    for (o, (&d, &s)) in out.iter_mut().zip(dst.iter().zip(&src)).take(3) {
        *o = mul_div255_u8(u16::from(s), op).saturating_add(mul_div255_u8(u16::from(d), keep));
    }
    out[3] = src_a.saturating_add(mul_div255_u8(u16::from(dst[3]), keep));
    out
}

/// Composite a whole layer over `dst`. Both buffers must be RGBA8 of the
/// same size.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> DlIconResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(DlIconError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    if opacity.is_nan() || opacity <= 0.0 {
        return Ok(());
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
