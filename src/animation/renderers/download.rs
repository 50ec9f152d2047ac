use std::f64::consts::TAU;

use kurbo::BezPath;

use crate::{
    foundation::error::DlIconResult,
    render::{
        paint::{Paint, Ramp, Rgba},
        surface::{Shadow, Surface},
    },
};

use super::FrameRenderer;

pub(crate) const BLUE: Ramp = [
    (0.0, Rgba::hex(0x4FC3F7)),
    (0.5, Rgba::hex(0x2196F3)),
    (1.0, Rgba::hex(0x1976D2)),
];
pub(crate) const BLUE_SHADOW: Rgba = Rgba::rgba(33, 150, 243, 0.3);

/// Bouncing down arrow.
#[derive(Clone, Debug, Default)]
pub struct DownloadRenderer;

impl DownloadRenderer {
    pub fn bounce_offset(phase: f64) -> f64 {
        (phase * TAU).sin() * 2.0 + 2.0
    }

    pub(crate) fn arrow_path(offset: f64) -> BezPath {
        let mut p = BezPath::new();
        p.move_to((8.0, offset));
        p.line_to((8.0, offset + 12.0));
        p.move_to((4.0, offset + 9.0));
        p.line_to((8.0, offset + 12.0));
        p.line_to((12.0, offset + 9.0));
        p
    }
}

impl FrameRenderer for DownloadRenderer {
    fn render(&mut self, surface: &mut Surface, phase: f64) -> DlIconResult<()> {
        let offset = Self::bounce_offset(phase);
        surface.set_shadow(Shadow::new(BLUE_SHADOW, 2.0));
        surface.set_line_width(2.5);
        let paint = Paint::linear((8.0, 0.0), (8.0, 16.0), &BLUE);
        surface.stroke_path(&Self::arrow_path(offset), &paint)
    }
}
