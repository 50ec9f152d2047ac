use kurbo::Point;

use crate::{
    foundation::{core::LOGICAL_SIZE, error::DlIconResult, math::SplitMix64},
    render::{
        paint::{Paint, Rgba},
        surface::{Shadow, Surface},
        text::TextStyle,
    },
};

const COLUMNS: usize = 8;
const PER_COLUMN: usize = 3;
/// Particles at or below this opacity are purged.
pub const PURGE_ALPHA: f64 = 0.01;
/// Above this target progress no new batches spawn.
pub const SPAWN_CEILING: f64 = 0.9;
const FADE: f64 = 0.95;
const DRAG: f64 = 0.98;
const TRAIL_COPIES: usize = 2;
const TRAIL_SPACING: f64 = 0.5;

const DIGIT: Rgba = Rgba::rgb(144, 240, 156);
const GLOW: Rgba = Rgba::rgba(104, 148, 224, 0.6);

/// One falling binary digit.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub value: u8,
    pub speed: f64,
    pub alpha: f64,
    pub size: f64,
    pub glow: f64,
}

impl Particle {
    fn is_live(&self) -> bool {
        self.alpha > PURGE_ALPHA
    }
}

/// Column-spawned digit rain that fades once it sinks below the fill line.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    rng: SplitMix64,
    batches: u32,
}

impl ParticleField {
    pub fn new(seed: u64) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(COLUMNS * PER_COLUMN),
            rng: SplitMix64::new(seed),
            batches: 0,
        };
        field.spawn_batch();
        field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of batches spawned so far, including the first.
    pub fn batches(&self) -> u32 {
        self.batches
    }

    fn spawn_batch(&mut self) {
        let column_width = LOGICAL_SIZE / COLUMNS as f64;
        for col in 0..COLUMNS {
            let x = (col as f64 + 0.5) * column_width;
            for _ in 0..PER_COLUMN {
                let rng = &mut self.rng;
                self.particles.push(Particle {
                    x,
                    y: -rng.next_f64() * 20.0,
                    value: rng.next_bit(),
                    speed: 0.08 + rng.next_f64() * 0.05,
                    alpha: 0.8 + rng.next_f64() * 0.2,
                    size: 2.5 + rng.next_f64(),
                    glow: rng.next_f64(),
                });
            }
        }
        self.batches += 1;
    }

    /// Advance one frame against a fill of `water_level` logical units,
    /// then purge faded particles and respawn when the field ran dry while
    /// `target_progress` is still below [`SPAWN_CEILING`].
    pub fn tick(&mut self, water_level: f64, target_progress: f64) {
        let surface_y = LOGICAL_SIZE - water_level;
        for p in &mut self.particles {
            p.y += p.speed;
            if p.y > surface_y {
                p.alpha *= FADE;
                p.speed *= DRAG;
            }
        }
        self.particles.retain(Particle::is_live);
        if self.particles.is_empty() && target_progress < SPAWN_CEILING {
            self.spawn_batch();
        }
    }

    pub fn draw(&self, surface: &mut Surface) -> DlIconResult<()> {
        surface.save();
        for p in &self.particles {
            surface.set_shadow(Shadow {
                blur: p.glow * 0.3 * 5.0,
                ..Shadow::new(GLOW, 0.0)
            });
            let style = TextStyle::new(p.size);
            let text = if p.value == 0 { "0" } else { "1" };

            for i in (1..=TRAIL_COPIES).rev() {
                let trail_y = p.y - i as f64 * TRAIL_SPACING;
                if trail_y > 0.0 {
                    let a = p.alpha * (1.0 - i as f64 * 0.3);
                    let paint = Paint::Solid(DIGIT.with_alpha(a as f32));
                    surface.fill_text(text, Point::new(p.x, trail_y), &style, &paint)?;
                }
            }
            let paint = Paint::Solid(DIGIT.with_alpha(p.alpha as f32));
            surface.fill_text(text, Point::new(p.x, p.y), &style, &paint)?;
        }
        surface.restore();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/particles.rs"]
mod tests;
