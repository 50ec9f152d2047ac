use crate::foundation::error::{DlIconError, DlIconResult};

/// Normalized 1-D gaussian taps, `2 * radius + 1` long.
#[derive(Clone, Debug, PartialEq)]
struct Kernel {
    taps: Vec<f32>,
}

impl Kernel {
    fn gaussian(radius: u32, sigma: f32) -> DlIconResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(DlIconError::render("blur sigma must be > 0"));
        }
        let r = radius as i32;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut taps: Vec<f32> = (-r..=r)
            .map(|i| (-((i * i) as f32) / two_sigma_sq).exp())
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Ok(Self { taps })
    }

    fn radius(&self) -> i32 {
        (self.taps.len() / 2) as i32
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Separable gaussian blur of a premultiplied RGBA8 buffer with clamped
/// edges. Radius 0 returns the input unchanged.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> DlIconResult<Vec<u8>> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| DlIconError::render("blur buffer size overflow"))?;
    if src.len() != expected {
        return Err(DlIconError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected == 0 {
        return Ok(src.to_vec());
    }

    let kernel = Kernel::gaussian(radius, sigma)?;
    let mut tmp = vec![0u8; expected];
    let mut out = vec![0u8; expected];
    convolve(src, &mut tmp, width as i32, height as i32, &kernel, Axis::Horizontal);
    convolve(&tmp, &mut out, width as i32, height as i32, &kernel, Axis::Vertical);
    Ok(out)
}

/// Map a canvas-style blur amount (in pixels) to `(radius, sigma)`.
pub fn blur_params(blur_px: f64) -> Option<(u32, f32)> {
    if !blur_px.is_finite() || blur_px <= 0.0 {
        return None;
    }
    let sigma = (blur_px / 2.0).max(0.25);
    let radius = (sigma * 3.0).ceil().max(1.0) as u32;
    Some((radius, sigma as f32))
}

fn convolve(src: &[u8], dst: &mut [u8], w: i32, h: i32, kernel: &Kernel, axis: Axis) {
    let r = kernel.radius();
    let sample = |x: i32, y: i32, k: i32| -> usize {
        let (sx, sy) = match axis {
            Axis::Horizontal => ((x + k).clamp(0, w - 1), y),
            Axis::Vertical => (x, (y + k).clamp(0, h - 1)),
        };
        ((sy * w + sx) as usize) * 4
    };

    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for (k, &tap) in (-r..=r).zip(&kernel.taps) {
                let idx = sample(x, y, k);
                for (a, &c) in acc.iter_mut().zip(&src[idx..idx + 4]) {
                    *a += tap * f32::from(c);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for (d, a) in dst[out..out + 4].iter_mut().zip(acc) {
                *d = a.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
