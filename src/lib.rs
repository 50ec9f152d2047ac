//! dlicon renders a small procedural icon that shows the state of a
//! download, and animates between states on a fixed clock.
//!
//! # Layers
//!
//! 1. **Surface**: a 16x16 logical canvas (scaled to `icon_px`) rasterized
//!    with `vello_cpu`, with save/restore, global alpha, gradients, shadows
//!    and text shaped by `parley` against an embedded DejaVu Sans.
//! 2. **Renderers**: five looping animations (download, error, complete,
//!    progress arc, progress fill with falling-digit particles).
//! 3. **Transitions**: a crossfade engine blending outgoing into incoming
//!    over a fixed number of time-driven steps.
//! 4. **Controller**: tokio tasks for the frame loop, the per-activation
//!    auto-stop deadline and the fade-out, delivering frames through a
//!    [`PresentationAdapter`].
//!
//! Frames are premultiplied RGBA8 end to end.
#![forbid(unsafe_code)]

mod animation;
mod effects;
mod events;
mod foundation;
mod render;
mod schedule;

pub use animation::anim::Animation;
pub use animation::easing::ProgressEasing;
pub use animation::kind::{ActivationKind, AnimationKind, ProgressStyle, ProgressValue};
pub use animation::particles::{PURGE_ALPHA, Particle, ParticleField, SPAWN_CEILING};
pub use animation::renderers::{
    CompleteRenderer, DownloadRenderer, ErrorRenderer, FrameRenderer, ProgressArcRenderer,
    ProgressFillRenderer, Renderer,
};
pub use effects::transition::{
    ActivateOutcome, TransitionEngine, TransitionPhase, transition_weights,
};
pub use events::{DownloadEvent, DownloadId, DownloadTracker};
pub use foundation::config::{AnimatorConfig, KindDurations};
pub use foundation::core::{
    Affine, BezPath, FrameRGBA, IconSize, LOGICAL_SIZE, Point, Rgba8Premul, Vec2,
};
pub use foundation::error::{DlIconError, DlIconResult};
pub use render::blur::{blur_params, blur_rgba8_premul};
pub use render::composite::{PremulRgba8, over, over_in_place};
pub use render::paint::{Paint, Ramp, Rgba, Stop, ramp_with_alpha};
pub use render::surface::{LineCap, LineJoin, Shadow, StrokeStyle, Surface};
pub use render::text::{
    FontWeight, TextAlign, TextBaseline, TextRun, TextStyle, layout_text, text_width,
};
pub use schedule::adapter::{NullAdapter, PngSequenceAdapter, PresentationAdapter};
pub use schedule::controller::{AnimationController, ControllerSnapshot, fade_alpha};
pub use schedule::presenter::{Delivery, Presenter, Ticket};
