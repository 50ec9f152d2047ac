use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::{
    animation::{
        anim::Animation,
        kind::{ActivationKind, AnimationKind},
    },
    effects::transition::{ActivateOutcome, TransitionEngine, TransitionPhase},
    foundation::{
        config::AnimatorConfig,
        core::FrameRGBA,
        error::{DlIconError, DlIconResult},
    },
    render::surface::Surface,
    schedule::{
        adapter::PresentationAdapter,
        presenter::{Presenter, Ticket},
    },
};

/// Point-in-time view of the controller, for diagnostics and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerSnapshot {
    pub phase: TransitionPhase,
    /// The animation on screen; the outgoing one while a crossfade runs.
    pub current_kind: Option<AnimationKind>,
    /// The animation being faded in, if any.
    pub incoming_kind: Option<AnimationKind>,
    pub frame_task: bool,
    pub deadline_task: bool,
    pub fade_task: bool,
    pub progress_target: Option<f64>,
}

/// Drives one icon: picks the animation, runs the frame loop, arms the
/// auto-stop deadline and fades out when it elapses.
///
/// All three timers are tokio tasks owned by the controller. Starting an
/// activation cancels a running fade; the deadline cancels the frame loop
/// before it starts a fade, so the frame loop and the fade never overlap.
pub struct AnimationController<A: PresentationAdapter> {
    inner: Arc<Inner<A>>,
}

impl<A: PresentationAdapter> Clone for AnimationController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: PresentationAdapter> std::fmt::Debug for AnimationController<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("state", &self.snapshot_state())
            .finish()
    }
}

struct Inner<A> {
    config: AnimatorConfig,
    runtime: Handle,
    presenter: Presenter<A>,
    state: Mutex<State>,
}

struct State {
    engine: TransitionEngine,
    surface: Surface,
    frame_task: Option<Task>,
    deadline_task: Option<Task>,
    fade_task: Option<Task>,
    next_task_id: u64,
}

/// A spawned timer. The id lets a task that already woke up check it still
/// owns its slot before touching shared state.
struct Task {
    id: u64,
    handle: JoinHandle<()>,
}

impl Task {
    fn cancel(self) {
        self.handle.abort();
    }
}

fn owns(slot: &Option<Task>, id: u64) -> bool {
    slot.as_ref().is_some_and(|t| t.id == id)
}

impl State {
    fn task_id(&mut self) -> u64 {
        self.next_task_id += 1;
        self.next_task_id
    }

    fn abort_all(&mut self) {
        for task in [
            self.frame_task.take(),
            self.deadline_task.take(),
            self.fade_task.take(),
        ]
        .into_iter()
        .flatten()
        {
            task.cancel();
        }
    }
}

enum Tick {
    Frame(Ticket, FrameRGBA),
    Idle,
    Retired,
}

impl<A: PresentationAdapter> AnimationController<A> {
    /// Must be called from within a tokio runtime; the controller spawns its
    /// timers onto that runtime.
    pub fn new(config: AnimatorConfig, adapter: A) -> DlIconResult<Self> {
        config.validate()?;
        let runtime = Handle::try_current()
            .map_err(|e| DlIconError::Other(anyhow::anyhow!("no tokio runtime: {e}")))?;
        let surface = Surface::new(config.icon_size());
        let engine = TransitionEngine::new(config.clone());
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                runtime,
                presenter: Presenter::new(adapter),
                state: Mutex::new(State {
                    engine,
                    surface,
                    frame_task: None,
                    deadline_task: None,
                    fade_task: None,
                    next_task_id: 0,
                }),
            }),
        })
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.inner.config
    }

    pub fn adapter(&self) -> &A {
        self.inner.presenter.adapter()
    }

    /// Request an animation by name.
    ///
    /// Unknown kinds fail with [`DlIconError::InvalidKind`]. A progress
    /// value outside `[0, 1]` is logged and ignored.
    #[tracing::instrument(skip(self))]
    pub fn activate(&self, kind: &str, value: Option<f64>) -> DlIconResult<()> {
        let activation = match ActivationKind::parse(kind, value) {
            Ok(activation) => activation,
            Err(DlIconError::ProgressOutOfRange(v)) => {
                tracing::warn!(value = v, "progress out of range, ignoring activation");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        self.activate_kind(activation);
        Ok(())
    }

    pub fn activate_kind(&self, activation: ActivationKind) {
        Inner::activate(&self.inner, activation);
    }

    /// Cancel every timer, drop the animation and reset the adapter.
    pub async fn shutdown(&self) {
        let ticket = {
            let mut state = self.inner.lock();
            state.abort_all();
            state.engine.clear();
            self.inner.presenter.ticket()
        };
        tracing::debug!("controller shut down");
        self.inner.presenter.reset(ticket).await;
    }

    pub fn snapshot_state(&self) -> ControllerSnapshot {
        let state = self.inner.lock();
        let engine = &state.engine;
        let phase = engine.phase();
        let (current_kind, incoming_kind) = match phase {
            TransitionPhase::Transitioning => (engine.outgoing_kind(), engine.current_kind()),
            _ => (engine.current_kind(), None),
        };
        ControllerSnapshot {
            phase,
            current_kind,
            incoming_kind,
            frame_task: state.frame_task.is_some(),
            deadline_task: state.deadline_task.is_some(),
            fade_task: state.fade_task.is_some(),
            progress_target: engine
                .current()
                .and_then(|anim| anim.progress())
                .map(|(_, target)| target),
        }
    }
}

impl<A: PresentationAdapter> Inner<A> {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn activate(this: &Arc<Self>, activation: ActivationKind) {
        let mut state = this.lock();
        let now = time::Instant::now().into_std();
        let outcome = state.engine.activate(activation, now);
        tracing::debug!(kind = activation.name(), ?outcome, "activated");
        if outcome == ActivateOutcome::TransitionStarted {
            tracing::debug!(steps = state.engine.total_steps(), "crossfade scheduled");
        }

        if let Some(fade) = state.fade_task.take() {
            fade.cancel();
            tracing::debug!("fade-out interrupted");
        }

        if state.frame_task.is_none() {
            let id = state.task_id();
            let handle = this.runtime.spawn(Arc::clone(this).run_frames(id));
            state.frame_task = Some(Task { id, handle });
        }

        if let Some(old) = state.deadline_task.take() {
            old.cancel();
        }
        let id = state.task_id();
        // The engine's current animation is the one this activation selected.
        let after = state
            .engine
            .current()
            .map_or_else(|| this.config.durations.for_kind(activation), Animation::duration);
        let inner = Arc::clone(this);
        let handle = this.runtime.spawn(async move {
            time::sleep(after).await;
            inner.stop(id).await;
        });
        state.deadline_task = Some(Task { id, handle });
    }

    async fn run_frames(self: Arc<Self>, id: u64) {
        let period = self.config.tick_interval();
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            match self.next_frame(id) {
                Ok(Tick::Frame(ticket, frame)) => {
                    self.presenter.present(ticket, &frame).await;
                }
                Ok(Tick::Idle) => {}
                Ok(Tick::Retired) => return,
                Err(e) => {
                    tracing::error!(error = %e, "frame production failed, stopping frame loop");
                    let mut state = self.lock();
                    if owns(&state.frame_task, id) {
                        state.frame_task = None;
                    }
                    return;
                }
            }
        }
    }

    fn next_frame(&self, id: u64) -> DlIconResult<Tick> {
        let mut state = self.lock();
        if !owns(&state.frame_task, id) {
            return Ok(Tick::Retired);
        }
        let now = time::Instant::now().into_std();
        let State {
            engine, surface, ..
        } = &mut *state;
        Ok(match engine.request_frame(surface, now)? {
            Some(frame) => Tick::Frame(self.presenter.ticket(), frame),
            None => Tick::Idle,
        })
    }

    /// Deadline elapsed: stop producing frames and fade out, or reset
    /// straight away when nothing is showing.
    async fn stop(self: Arc<Self>, id: u64) {
        let reset = {
            let mut state = self.lock();
            if !owns(&state.deadline_task, id) {
                return;
            }
            if let Some(frames) = state.frame_task.take() {
                frames.cancel();
            }

            if state.engine.current().is_some() {
                // Our own handle: release it without aborting the running task.
                state.deadline_task = None;
                state.engine.settle();
                if let Some(old) = state.fade_task.take() {
                    old.cancel();
                }
                tracing::debug!(steps = self.config.fade_steps, "fade-out started");
                let fade_id = state.task_id();
                let handle = self.runtime.spawn(Arc::clone(&self).run_fade(fade_id));
                state.fade_task = Some(Task {
                    id: fade_id,
                    handle,
                });
                return;
            }
            self.presenter.ticket()
        };

        self.presenter.reset(reset).await;
        let mut state = self.lock();
        if owns(&state.deadline_task, id) {
            state.deadline_task = None;
        }
    }

    async fn run_fade(self: Arc<Self>, id: u64) {
        let period = self.config.fade_interval();
        let steps = self.config.fade_steps.max(1);
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        for step in 1..=steps {
            ticker.tick().await;
            let alpha = fade_alpha(step, steps);
            let produced = {
                let mut state = self.lock();
                if !owns(&state.fade_task, id) {
                    return;
                }
                let State {
                    engine, surface, ..
                } = &mut *state;
                engine
                    .draw_current(surface, alpha)
                    .map(|frame| frame.map(|f| (self.presenter.ticket(), f)))
            };
            match produced {
                Ok(Some((ticket, frame))) => {
                    self.presenter.present(ticket, &frame).await;
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "fade frame failed");
                    break;
                }
            }
        }

        let ticket = {
            let mut state = self.lock();
            if !owns(&state.fade_task, id) {
                return;
            }
            state.engine.clear();
            self.presenter.ticket()
        };
        self.presenter.reset(ticket).await;
        tracing::debug!("fade-out finished");

        let mut state = self.lock();
        if owns(&state.fade_task, id) {
            state.fade_task = None;
        }
    }
}

/// Alpha presented at fade step `step` (1-based) of `steps`: `1 - step/steps`,
/// reaching exactly zero on the last step.
pub fn fade_alpha(step: u32, steps: u32) -> f32 {
    let steps = steps.max(1);
    let step = step.min(steps);
    (steps - step) as f32 / steps as f32
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/controller.rs"]
mod tests;
