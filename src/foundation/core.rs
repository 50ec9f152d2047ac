use crate::foundation::error::{DlIconError, DlIconResult};

pub use kurbo::{Affine, BezPath, Point, Vec2};

/// Side length of the logical drawing space. Every renderer draws in
/// `[0, LOGICAL_SIZE]²` and the surface scales to pixels.
pub const LOGICAL_SIZE: f64 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IconSize {
    pub px: u16,
}

impl IconSize {
    pub const MIN_PX: u16 = 16;
    pub const MAX_PX: u16 = 256;

    pub fn new(px: u16) -> DlIconResult<Self> {
        if !(Self::MIN_PX..=Self::MAX_PX).contains(&px) {
            return Err(DlIconError::validation(format!(
                "icon size must be within {}..={} px, got {px}",
                Self::MIN_PX,
                Self::MAX_PX
            )));
        }
        Ok(Self { px })
    }

    /// Pixels per logical unit.
    pub fn scale_factor(self) -> f64 {
        f64::from(self.px) / LOGICAL_SIZE
    }

    pub fn byte_len(self) -> usize {
        usize::from(self.px) * usize::from(self.px) * 4
    }
}

impl Default for IconSize {
    fn default() -> Self {
        Self { px: 32 }
    }
}

/// One finished bitmap, RGBA8 row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn transparent(size: IconSize) -> Self {
        Self {
            width: u32::from(size.px),
            height: u32::from(size.px),
            data: vec![0; size.byte_len()],
            premultiplied: true,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) as usize) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some(Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }

    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    pub fn alpha_sum(&self) -> u64 {
        self.data.chunks_exact(4).map(|px| u64::from(px[3])).sum()
    }

    /// Straight-alpha copy, which is what image encoders and icon APIs expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let straight = Rgba8Premul {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
            .to_straight();
            out.extend_from_slice(&straight);
        }
        out
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_straight(self) -> [u8; 4] {
        if self.a == 0 {
            return [0, 0, 0, 0];
        }
        let a = u32::from(self.a);
        let unpremul = |c: u8| -> u8 { ((u32::from(c) * 255 + a / 2) / a).min(255) as u8 };
        [unpremul(self.r), unpremul(self.g), unpremul(self.b), self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
