use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Arc, BezPath, Circle, Point, Shape as _, Vec2};

use crate::{
    animation::easing::ProgressEasing,
    foundation::error::DlIconResult,
    render::{
        paint::{Paint, Rgba},
        surface::{Shadow, Surface},
    },
};

use super::{
    FrameRenderer,
    download::{BLUE, BLUE_SHADOW},
};

const CENTER: Point = Point::new(8.0, 8.0);
const RADIUS: f64 = 7.0;
const TOLERANCE: f64 = 0.01;

/// Ring that sweeps clockwise from twelve o'clock, with a static arrow.
#[derive(Clone, Debug, Default)]
pub struct ProgressArcRenderer {
    easing: ProgressEasing,
}

impl ProgressArcRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_progress(&mut self, target: f64) {
        self.easing.set_target(target);
    }

    pub fn easing(&self) -> &ProgressEasing {
        &self.easing
    }

    /// `(start, end)` angles of the progress sweep.
    pub fn sweep(progress: f64) -> (f64, f64) {
        let start = -FRAC_PI_2;
        (start, start + progress * TAU)
    }

    fn draw_ring(&self, surface: &mut Surface) -> DlIconResult<()> {
        let progress = self.easing.current();

        let background = Circle::new(CENTER, RADIUS).to_path(TOLERANCE);
        surface.stroke_path(
            &background,
            &Paint::Solid(Rgba::rgba(33, 150, 243, 0.2)),
        )?;

        if progress <= 0.0 {
            return Ok(());
        }
        let (start, end) = Self::sweep(progress);
        let arc = Arc::new(CENTER, Vec2::new(RADIUS, RADIUS), start, end - start, 0.0);
        let paint = Paint::conic(
            CENTER,
            start,
            &[
                (0.0, BLUE[0].1),
                (progress as f32, BLUE[2].1),
                (1.0, BLUE[0].1),
            ],
        );
        surface.stroke_path(&arc.to_path(TOLERANCE), &paint)
    }

    fn draw_arrow(&self, surface: &mut Surface) -> DlIconResult<()> {
        let mut p = BezPath::new();
        p.move_to((8.0, 4.0));
        p.line_to((8.0, 12.0));
        p.line_to((5.0, 9.0));
        p.move_to((8.0, 12.0));
        p.line_to((11.0, 9.0));
        surface.stroke_path(&p, &Paint::linear((8.0, 0.0), (8.0, 16.0), &BLUE))
    }
}

impl FrameRenderer for ProgressArcRenderer {
    fn render(&mut self, surface: &mut Surface, _phase: f64) -> DlIconResult<()> {
        surface.set_shadow(Shadow::new(BLUE_SHADOW, 2.0));
        surface.set_line_width(1.5);
        self.easing.step();
        self.draw_ring(surface)?;
        self.draw_arrow(surface)
    }
}
