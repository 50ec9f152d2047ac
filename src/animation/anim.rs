use std::time::Duration;

use crate::{
    animation::{
        kind::{ActivationKind, AnimationKind},
        renderers::{FrameRenderer, Renderer},
    },
    foundation::{
        config::AnimatorConfig,
        core::FrameRGBA,
        error::{DlIconError, DlIconResult},
    },
    render::surface::{LineCap, LineJoin, Surface},
};

/// One looping visual state: a renderer plus its frame counter.
#[derive(Clone, Debug)]
pub struct Animation {
    renderer: Renderer,
    frame: u32,
    total_frames: u32,
    duration: Duration,
    scale_factor: f64,
}

impl Animation {
    /// Build the animation an activation maps to, with any progress target
    /// already applied.
    pub fn for_activation(activation: ActivationKind, config: &AnimatorConfig) -> Self {
        let kind = activation.animation_kind(config.progress_style);
        let mut anim = Self::new(kind, config);
        anim.apply(activation);
        anim
    }

    pub fn new(kind: AnimationKind, config: &AnimatorConfig) -> Self {
        Self {
            renderer: Renderer::for_kind(kind, config.particle_seed),
            frame: 0,
            total_frames: config.frames_per_loop.max(1),
            duration: config.durations.for_animation(kind),
            scale_factor: config.icon_size().scale_factor(),
        }
    }

    pub fn kind(&self) -> AnimationKind {
        self.renderer.kind()
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// `(current, target)` for progress kinds.
    pub fn progress(&self) -> Option<(f64, f64)> {
        self.renderer.progress()
    }

    /// Fold a same-kind activation into this instance without resetting
    /// its loop phase.
    pub fn apply(&mut self, activation: ActivationKind) {
        if let Some(target) = activation.progress() {
            self.renderer.set_progress(target);
        }
    }

    /// Render the current frame onto `surface` without clearing it, then
    /// advance the frame counter.
    pub fn draw_into(&mut self, surface: &mut Surface, alpha: f32) -> DlIconResult<()> {
        if self.frame >= self.total_frames {
            return Err(DlIconError::render(format!(
                "frame counter {} escaped loop of {}",
                self.frame, self.total_frames
            )));
        }
        let phase = f64::from(self.frame) / f64::from(self.total_frames);

        surface.save();
        surface.set_line_cap(LineCap::Round);
        surface.set_line_join(LineJoin::Round);
        surface.set_global_alpha(alpha);
        surface.scale(self.scale_factor);
        let rendered = self.renderer.render(surface, phase);
        surface.restore();
        rendered?;

        self.frame = (self.frame + 1) % self.total_frames;
        Ok(())
    }

    /// Clear, render at `alpha`, advance, and return the finished bitmap.
    pub fn draw(&mut self, surface: &mut Surface, alpha: f32) -> DlIconResult<FrameRGBA> {
        surface.clear();
        self.draw_into(surface, alpha)?;
        Ok(surface.snapshot())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
