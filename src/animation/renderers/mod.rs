//! Per-kind procedural renderers.
//!
//! Each renderer draws one frame in the 16×16 logical space. The caller has
//! already cleared the surface, pushed a saved state, applied the global
//! alpha and the pixel scale, and set round caps and joins.

mod complete;
mod download;
mod error;
mod progress_arc;
mod progress_fill;

pub use complete::CompleteRenderer;
pub use download::DownloadRenderer;
pub use error::ErrorRenderer;
pub use progress_arc::ProgressArcRenderer;
pub use progress_fill::ProgressFillRenderer;

use crate::{
    animation::kind::AnimationKind, foundation::error::DlIconResult, render::surface::Surface,
};

/// Renders one frame from owned state.
///
/// `phase` is `frame / total_frames` in `[0, 1)`. Renderers may mutate
/// their own state (easing, wave phase, particles) but nothing else.
pub trait FrameRenderer {
    fn render(&mut self, surface: &mut Surface, phase: f64) -> DlIconResult<()>;
}

/// Closed set of renderers, dispatched by kind.
#[derive(Clone, Debug)]
pub enum Renderer {
    Download(DownloadRenderer),
    Error(ErrorRenderer),
    Complete(CompleteRenderer),
    ProgressArc(ProgressArcRenderer),
    ProgressFill(ProgressFillRenderer),
}

impl Renderer {
    pub fn for_kind(kind: AnimationKind, particle_seed: u64) -> Self {
        match kind {
            AnimationKind::Download => Self::Download(DownloadRenderer),
            AnimationKind::Error => Self::Error(ErrorRenderer),
            AnimationKind::Complete => Self::Complete(CompleteRenderer),
            AnimationKind::ProgressArc => Self::ProgressArc(ProgressArcRenderer::new()),
            AnimationKind::ProgressFill => {
                Self::ProgressFill(ProgressFillRenderer::new(particle_seed))
            }
        }
    }

    pub fn kind(&self) -> AnimationKind {
        match self {
            Self::Download(_) => AnimationKind::Download,
            Self::Error(_) => AnimationKind::Error,
            Self::Complete(_) => AnimationKind::Complete,
            Self::ProgressArc(_) => AnimationKind::ProgressArc,
            Self::ProgressFill(_) => AnimationKind::ProgressFill,
        }
    }

    /// Retarget a progress renderer; other kinds ignore it.
    pub fn set_progress(&mut self, target: f64) {
        match self {
            Self::ProgressArc(r) => r.set_progress(target),
            Self::ProgressFill(r) => r.set_progress(target),
            Self::Download(_) | Self::Error(_) | Self::Complete(_) => {}
        }
    }

    /// `(current, target)` for progress renderers.
    pub fn progress(&self) -> Option<(f64, f64)> {
        match self {
            Self::ProgressArc(r) => Some((r.easing().current(), r.easing().target())),
            Self::ProgressFill(r) => Some((r.easing().current(), r.easing().target())),
            Self::Download(_) | Self::Error(_) | Self::Complete(_) => None,
        }
    }
}

impl FrameRenderer for Renderer {
    fn render(&mut self, surface: &mut Surface, phase: f64) -> DlIconResult<()> {
        match self {
            Self::Download(r) => r.render(surface, phase),
            Self::Error(r) => r.render(surface, phase),
            Self::Complete(r) => r.render(surface, phase),
            Self::ProgressArc(r) => r.render(surface, phase),
            Self::ProgressFill(r) => r.render(surface, phase),
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/animation/renderers/mod.rs"]
mod tests;
