use kurbo::{BezPath, Point};

use crate::{
    foundation::error::DlIconResult,
    render::{
        paint::{Paint, Ramp, Rgba},
        surface::{Shadow, Surface},
    },
};

use super::FrameRenderer;

const GREEN: Ramp = [
    (0.0, Rgba::hex(0x64DD17)),
    (0.5, Rgba::hex(0x4CAF50)),
    (1.0, Rgba::hex(0x388E3C)),
];

pub(crate) const CHECK: [Point; 3] = [
    Point::new(2.0, 8.0),
    Point::new(7.0, 14.0),
    Point::new(15.0, 4.0),
];

/// Checkmark drawn progressively over the first two thirds of the loop.
#[derive(Clone, Debug, Default)]
pub struct CompleteRenderer;

impl CompleteRenderer {
    pub fn draw_progress(phase: f64) -> f64 {
        (phase * 1.5).min(1.0)
    }

    /// Points of the partially drawn checkmark at `draw_progress`.
    pub fn visible_points(draw_progress: f64) -> Vec<Point> {
        let [p0, p1, p2] = CHECK;
        if draw_progress <= 0.5 {
            let t = draw_progress * 2.0;
            vec![p0, p0.lerp(p1, t)]
        } else {
            let t = (draw_progress - 0.5) * 2.0;
            vec![p0, p1, p1.lerp(p2, t)]
        }
    }
}

impl FrameRenderer for CompleteRenderer {
    fn render(&mut self, surface: &mut Surface, phase: f64) -> DlIconResult<()> {
        let points = Self::visible_points(Self::draw_progress(phase));

        surface.set_shadow(Shadow::new(Rgba::rgba(76, 175, 80, 0.3), 2.0));
        surface.set_line_width(2.5);
        let paint = Paint::linear(CHECK[0], CHECK[2], &GREEN);

        let mut path = BezPath::new();
        path.move_to(points[0]);
        for &p in &points[1..] {
            path.line_to(p);
        }
        surface.stroke_path(&path, &paint)
    }
}
