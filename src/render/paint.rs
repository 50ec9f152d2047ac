use std::f64::consts::TAU;

use kurbo::Point;

/// Straight-alpha color with 8-bit channels and a float alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// `0xRRGGBB`, opaque.
    pub const fn hex(v: u32) -> Self {
        Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn multiply_alpha(self, k: f32) -> Self {
        self.with_alpha(self.a * k)
    }

    pub(crate) fn to_cpu(self) -> vello_cpu::peniko::Color {
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, a)
    }
}

/// A gradient stop: offset in `[0, 1]` and color.
pub type Stop = (f32, Rgba);

/// Three-stop ramp, the shape every renderer's palette has.
pub type Ramp = [Stop; 3];

pub fn ramp_with_alpha(ramp: &Ramp, a: f32) -> Ramp {
    ramp.map(|(offset, color)| (offset, color.with_alpha(a)))
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear {
        start: Point,
        end: Point,
        stops: Vec<Stop>,
    },
    /// Sweep gradient around `center`, starting at `start_angle` radians
    /// and covering one full turn clockwise (y down).
    Conic {
        center: Point,
        start_angle: f64,
        stops: Vec<Stop>,
    },
}

impl Paint {
    pub fn linear(start: impl Into<Point>, end: impl Into<Point>, stops: &[Stop]) -> Self {
        Self::Linear {
            start: start.into(),
            end: end.into(),
            stops: stops.to_vec(),
        }
    }

    pub fn conic(center: impl Into<Point>, start_angle: f64, stops: &[Stop]) -> Self {
        Self::Conic {
            center: center.into(),
            start_angle,
            stops: stops.to_vec(),
        }
    }

    pub(crate) fn apply(&self, ctx: &mut vello_cpu::RenderContext) {
        use vello_cpu::peniko::{ColorStop, Extend, Gradient};

        fn cpu_stops(stops: &[Stop]) -> Vec<ColorStop> {
            let mut out: Vec<ColorStop> = stops
                .iter()
                .map(|&(offset, color)| ColorStop::from((offset.clamp(0.0, 1.0), color.to_cpu())))
                .collect();
            out.sort_by(|a, b| a.offset.total_cmp(&b.offset));
            out
        }

        match self {
            Self::Solid(color) => ctx.set_paint(color.to_cpu()),
            Self::Linear { start, end, stops } => {
                let gradient = Gradient::new_linear(point_to_cpu(*start), point_to_cpu(*end))
                    .with_stops(cpu_stops(stops).as_slice());
                ctx.set_paint(gradient);
            }
            Self::Conic {
                center,
                start_angle,
                stops,
            } => {
                // The sweep shader measures pixel angles in [0, 2π), so the
                // start must live there too; Repeat wraps the part of the
                // turn that falls before it.
                let start = start_angle.rem_euclid(TAU) as f32;
                let gradient = Gradient::new_sweep(
                    point_to_cpu(*center),
                    start,
                    start + std::f32::consts::TAU,
                )
                .with_extend(Extend::Repeat)
                .with_stops(cpu_stops(stops).as_slice());
                ctx.set_paint(gradient);
            }
        }
    }
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Self::Solid(color)
    }
}

pub(crate) fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
