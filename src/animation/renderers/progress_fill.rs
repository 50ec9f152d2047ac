use std::f64::consts::TAU;

use kurbo::{BezPath, Point};

use crate::{
    animation::{
        easing::ProgressEasing,
        particles::{ParticleField, SPAWN_CEILING},
    },
    foundation::{core::LOGICAL_SIZE, error::DlIconResult},
    render::{
        paint::{Paint, Ramp, Rgba},
        surface::{Shadow, Surface},
        text::TextStyle,
    },
};

use super::FrameRenderer;

const WATER: Ramp = [
    (0.0, Rgba::rgb(145, 195, 242)),
    (0.5, Rgba::rgb(129, 183, 250)),
    (1.0, Rgba::rgb(79, 138, 247)),
];
const LABEL: Rgba = Rgba::rgb(8, 48, 168);

const WAVE_AMPLITUDE: f64 = 0.5;
const WAVE_FREQUENCY: f64 = 0.8;
const WAVE_SPEED: f64 = 0.2;
const CORNER_RADIUS: f64 = 3.0;
const WAVE_SAMPLE: f64 = 0.5;
const REFLECTION_SPACING: f64 = 4.0;
const REFLECTION_LENGTH: f64 = 2.0;

/// Liquid fill with a wavy surface, digit rain and a percentage label.
#[derive(Clone, Debug)]
pub struct ProgressFillRenderer {
    easing: ProgressEasing,
    wave_offset: f64,
    particles: ParticleField,
}

impl ProgressFillRenderer {
    pub fn new(seed: u64) -> Self {
        Self {
            easing: ProgressEasing::default(),
            wave_offset: 0.0,
            particles: ParticleField::new(seed),
        }
    }

    pub fn set_progress(&mut self, target: f64) {
        self.easing.set_target(target);
    }

    pub fn easing(&self) -> &ProgressEasing {
        &self.easing
    }

    pub fn wave_offset(&self) -> f64 {
        self.wave_offset
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn shows_particles(&self) -> bool {
        self.easing.target() < SPAWN_CEILING
    }

    /// Vertical displacement of the water surface at `x` (two summed sines).
    pub fn wave(x: f64, offset: f64) -> f64 {
        ((x + offset) * WAVE_FREQUENCY).sin() * WAVE_AMPLITUDE
            + ((x - offset * 0.5) * (WAVE_FREQUENCY * 0.5)).sin() * (WAVE_AMPLITUDE * 0.5)
    }

    fn advance(&mut self) {
        self.easing.step();
        self.wave_offset = (self.wave_offset + WAVE_SPEED) % TAU;
    }

    fn water_path(&self, height: f64) -> BezPath {
        let s = LOGICAL_SIZE;
        let r = CORNER_RADIUS;
        let level = s - height;

        let mut p = BezPath::new();
        p.move_to((0.0, s - r));
        p.quad_to((0.0, s), (r, s));
        p.line_to((s - r, s));
        p.quad_to((s, s), (s, s - r));
        p.line_to((s, level));

        let samples = (s / WAVE_SAMPLE).round() as usize;
        for i in 0..=samples {
            let x = s - i as f64 * WAVE_SAMPLE;
            p.line_to((x, level + Self::wave(x, self.wave_offset)));
        }
        p.close_path();
        p
    }

    fn reflection_path(&self, height: f64) -> BezPath {
        let level = LOGICAL_SIZE - height;
        let mut p = BezPath::new();
        let dashes = (LOGICAL_SIZE / REFLECTION_SPACING).round() as usize;
        for i in 0..=dashes {
            let x = i as f64 * REFLECTION_SPACING;
            let y = level + Self::wave(x, self.wave_offset);
            p.move_to((x, y));
            p.line_to((x + REFLECTION_LENGTH, y));
        }
        p
    }

    fn draw_water(&self, surface: &mut Surface, height: f64) -> DlIconResult<()> {
        let paint = Paint::linear((8.0, LOGICAL_SIZE - height), (8.0, LOGICAL_SIZE), &WATER);
        surface.set_shadow(Shadow::new(Rgba::rgba(41, 182, 246, 0.2), 1.5));
        surface.fill_path(&self.water_path(height), &paint)?;

        surface.set_line_width(0.5);
        surface.stroke_path(
            &self.reflection_path(height),
            &Paint::Solid(Rgba::rgba(255, 255, 255, 0.3)),
        )
    }

    fn draw_label(&self, surface: &mut Surface) -> DlIconResult<()> {
        let percent = (self.easing.current() * 100.0).round() as u32;
        surface.save();
        surface.fill_text(
            &percent.to_string(),
            Point::new(8.0, 8.0),
            &TextStyle::new(9.0).bold(),
            &Paint::Solid(LABEL),
        )?;
        surface.restore();
        Ok(())
    }
}

impl FrameRenderer for ProgressFillRenderer {
    fn render(&mut self, surface: &mut Surface, _phase: f64) -> DlIconResult<()> {
        self.advance();
        let height = LOGICAL_SIZE * self.easing.current();

        self.draw_water(surface, height)?;

        if self.shows_particles() {
            self.particles.tick(height, self.easing.target());
            self.particles.draw(surface)?;
        }

        self.draw_label(surface)
    }
}
