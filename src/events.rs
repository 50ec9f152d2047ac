//! Download lifecycle events and their mapping onto icon activations.

use crate::{
    animation::kind::{ActivationKind, ProgressValue},
    schedule::{adapter::PresentationAdapter, controller::AnimationController},
};

pub type DownloadId = u64;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DownloadEvent {
    Created {
        id: DownloadId,
    },
    Progress {
        id: DownloadId,
        received: u64,
        /// `None` or zero when the server did not announce a length.
        total: Option<u64>,
    },
    Completed {
        id: DownloadId,
    },
    Failed {
        id: DownloadId,
        reason: String,
    },
}

impl DownloadEvent {
    pub fn id(&self) -> DownloadId {
        match self {
            Self::Created { id }
            | Self::Progress { id, .. }
            | Self::Completed { id }
            | Self::Failed { id, .. } => *id,
        }
    }
}

/// Follows a single download at a time.
///
/// A `Created` event always takes over tracking; everything else is only
/// honoured for the tracked id, and completion or failure ends tracking.
#[derive(Clone, Debug, Default)]
pub struct DownloadTracker {
    current: Option<DownloadId>,
}

impl DownloadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<DownloadId> {
        self.current
    }

    pub fn route(&mut self, event: &DownloadEvent) -> Option<ActivationKind> {
        if let DownloadEvent::Created { id } = event {
            self.current = Some(*id);
            return Some(ActivationKind::Download);
        }
        if self.current != Some(event.id()) {
            tracing::trace!(id = event.id(), tracked = ?self.current, "event for untracked download");
            return None;
        }

        match event {
            DownloadEvent::Created { .. } => None,
            DownloadEvent::Progress {
                received, total, ..
            } => {
                let total = (*total).filter(|&t| t > 0)?;
                let fraction = (*received as f64 / total as f64).clamp(0.0, 1.0);
                ProgressValue::new(fraction).ok().map(ActivationKind::Progress)
            }
            DownloadEvent::Completed { .. } => {
                self.current = None;
                Some(ActivationKind::Complete)
            }
            DownloadEvent::Failed { reason, .. } => {
                tracing::debug!(%reason, "download failed");
                self.current = None;
                Some(ActivationKind::Error)
            }
        }
    }

    /// Route `event` and apply the result to `controller`.
    pub fn dispatch<A: PresentationAdapter>(
        &mut self,
        controller: &AnimationController<A>,
        event: &DownloadEvent,
    ) -> Option<ActivationKind> {
        let routed = self.route(event);
        if let Some(activation) = routed {
            controller.activate_kind(activation);
        }
        routed
    }
}

#[cfg(test)]
#[path = "../tests/unit/events.rs"]
mod tests;
