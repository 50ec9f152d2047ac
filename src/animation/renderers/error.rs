use std::f64::consts::TAU;

use kurbo::BezPath;

use crate::{
    foundation::error::DlIconResult,
    render::{
        paint::{Paint, Ramp, Rgba, ramp_with_alpha},
        surface::{Shadow, Surface},
    },
};

use super::FrameRenderer;

const RED: Ramp = [
    (0.0, Rgba::hex(0xFF5252)),
    (0.5, Rgba::hex(0xF44336)),
    (1.0, Rgba::hex(0xD32F2F)),
];

/// Breathing X.
#[derive(Clone, Debug, Default)]
pub struct ErrorRenderer;

impl ErrorRenderer {
    pub fn breath_scale(phase: f64) -> f64 {
        1.0 + (phase * TAU).sin() * 0.15
    }

    pub fn pulse_alpha(phase: f64) -> f64 {
        0.7 + (phase * TAU).sin() * 0.3
    }
}

impl FrameRenderer for ErrorRenderer {
    fn render(&mut self, surface: &mut Surface, phase: f64) -> DlIconResult<()> {
        let scale = Self::breath_scale(phase);
        let alpha = Self::pulse_alpha(phase) as f32;

        surface.save();
        surface.translate(8.0, 8.0);
        surface.scale(scale);
        surface.translate(-8.0, -8.0);

        let paint = Paint::linear((4.0, 4.0), (12.0, 12.0), &ramp_with_alpha(&RED, alpha));
        surface.set_shadow(Shadow::new(Rgba::rgba(255, 0, 0, 0.4), 3.0));
        surface.set_line_width(3.0);

        let mut a = BezPath::new();
        a.move_to((4.0, 4.0));
        a.quad_to((8.0, 8.0), (13.0, 13.0));
        surface.stroke_path(&a, &paint)?;

        let mut b = BezPath::new();
        b.move_to((13.0, 4.0));
        b.quad_to((8.0, 8.0), (4.0, 13.0));
        surface.stroke_path(&b, &paint)?;

        surface.restore();
        Ok(())
    }
}
