use std::time::{Duration, Instant};

use crate::{
    animation::{
        anim::Animation,
        kind::{ActivationKind, AnimationKind},
    },
    foundation::{config::AnimatorConfig, core::FrameRGBA, error::DlIconResult},
    render::surface::Surface,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Single,
    Transitioning,
}

/// What an activation did to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivateOutcome {
    /// Idle -> Single.
    Started,
    /// Same kind as the active animation: state folded in place.
    Updated,
    /// Kind changed: crossfade begins.
    TransitionStarted,
}

/// `(outgoing, incoming)` alpha weights at `step` of `total`. They always
/// sum to exactly 1 and reach `(0, 1)` at the final step.
pub fn transition_weights(step: u32, total: u32) -> (f64, f64) {
    let total = total.max(1);
    let p = f64::from(step.min(total)) / f64::from(total);
    (1.0 - p, p)
}

#[derive(Debug)]
struct Transition {
    outgoing: Animation,
    started: Instant,
    step: u32,
}

/// Owns the active animation and any crossfade in flight.
///
/// Transition progression is driven by elapsed time: the step counter is
/// `elapsed / step_interval`, clamped to the configured step count, so a
/// jittery tick shortens or lengthens nothing.
#[derive(Debug)]
pub struct TransitionEngine {
    config: AnimatorConfig,
    current: Option<Animation>,
    transition: Option<Transition>,
}

impl TransitionEngine {
    pub fn new(config: AnimatorConfig) -> Self {
        Self {
            config,
            current: None,
            transition: None,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        match (&self.current, &self.transition) {
            (None, _) => TransitionPhase::Idle,
            (Some(_), None) => TransitionPhase::Single,
            (Some(_), Some(_)) => TransitionPhase::Transitioning,
        }
    }

    /// The active animation (the incoming one while transitioning).
    pub fn current(&self) -> Option<&Animation> {
        self.current.as_ref()
    }

    pub fn current_kind(&self) -> Option<AnimationKind> {
        self.current.as_ref().map(Animation::kind)
    }

    pub fn outgoing_kind(&self) -> Option<AnimationKind> {
        self.transition.as_ref().map(|t| t.outgoing.kind())
    }

    pub fn step(&self) -> Option<u32> {
        self.transition.as_ref().map(|t| t.step)
    }

    pub fn total_steps(&self) -> u32 {
        self.config.transition_steps.max(1)
    }

    pub fn activate(&mut self, activation: ActivationKind, now: Instant) -> ActivateOutcome {
        let kind = activation.animation_kind(self.config.progress_style);
        match self.current.as_mut() {
            Some(current) if current.kind() == kind => {
                current.apply(activation);
                ActivateOutcome::Updated
            }
            Some(_) => {
                let incoming = Animation::for_activation(activation, &self.config);
                let outgoing = self.current.replace(incoming);
                if let Some(outgoing) = outgoing {
                    tracing::debug!(from = %outgoing.kind(), to = %kind, "transition started");
                    self.transition = Some(Transition {
                        outgoing,
                        started: now,
                        step: 0,
                    });
                }
                ActivateOutcome::TransitionStarted
            }
            None => {
                self.current = Some(Animation::for_activation(activation, &self.config));
                self.transition = None;
                ActivateOutcome::Started
            }
        }
    }

    /// Compose the next frame. `None` when idle.
    pub fn request_frame(
        &mut self,
        surface: &mut Surface,
        now: Instant,
    ) -> DlIconResult<Option<FrameRGBA>> {
        let Some(current) = self.current.as_mut() else {
            return Ok(None);
        };

        let total = self.config.transition_steps.max(1);
        if let Some(t) = self.transition.as_mut() {
            let elapsed = now.saturating_duration_since(t.started);
            let due = steps_elapsed(elapsed, self.config.tick_interval());
            t.step = t.step.max(due.min(total));

            if t.step < total {
                let (out_w, in_w) = transition_weights(t.step, total);
                surface.clear();
                t.outgoing.draw_into(surface, out_w as f32)?;
                current.draw_into(surface, in_w as f32)?;
                return Ok(Some(surface.snapshot()));
            }

            tracing::debug!(kind = %current.kind(), "transition resolved");
            self.transition = None;
        }

        current.draw(surface, 1.0).map(Some)
    }

    /// Drop any outgoing animation so only the active one remains.
    pub fn settle(&mut self) {
        if self.transition.take().is_some() {
            tracing::debug!("transition settled early");
        }
    }

    /// Draw the active animation alone at `alpha` (used while fading out).
    pub fn draw_current(
        &mut self,
        surface: &mut Surface,
        alpha: f32,
    ) -> DlIconResult<Option<FrameRGBA>> {
        match self.current.as_mut() {
            Some(current) => current.draw(surface, alpha).map(Some),
            None => Ok(None),
        }
    }

    /// Back to Idle.
    pub fn clear(&mut self) {
        self.current = None;
        self.transition = None;
    }
}

fn steps_elapsed(elapsed: Duration, interval: Duration) -> u32 {
    if interval.is_zero() {
        return u32::MAX;
    }
    (elapsed.as_nanos() / interval.as_nanos()).min(u128::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transition.rs"]
mod tests;
