use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

use crate::{foundation::core::FrameRGBA, schedule::adapter::PresentationAdapter};

/// Sequence number handed out when a frame or reset is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Serializes adapter calls and keeps them in production order.
///
/// Callers take a [`Ticket`] while they still hold the controller state, so
/// ticket order is production order. Delivery waits on an async mutex; an
/// item whose ticket is older than the last delivered one is dropped rather
/// than shown late.
#[derive(Debug)]
pub struct Presenter<A> {
    adapter: A,
    next: AtomicU64,
    delivered: Mutex<u64>,
}

/// What happened to a delivery attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Presented,
    Stale,
    Failed,
}

impl<A: PresentationAdapter> Presenter<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            next: AtomicU64::new(1),
            delivered: Mutex::new(0),
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn ticket(&self) -> Ticket {
        Ticket(self.next.fetch_add(1, Ordering::Relaxed))
    }

    pub async fn present(&self, ticket: Ticket, frame: &FrameRGBA) -> Delivery {
        let mut delivered = self.delivered.lock().await;
        if ticket.0 <= *delivered {
            tracing::trace!(ticket = ticket.0, last = *delivered, "dropping stale frame");
            return Delivery::Stale;
        }
        *delivered = ticket.0;
        match self.adapter.present(frame).await {
            Ok(()) => Delivery::Presented,
            Err(e) => {
                tracing::error!(error = %e, "present failed");
                Delivery::Failed
            }
        }
    }

    pub async fn reset(&self, ticket: Ticket) -> Delivery {
        let mut delivered = self.delivered.lock().await;
        if ticket.0 <= *delivered {
            tracing::trace!(ticket = ticket.0, last = *delivered, "dropping stale reset");
            return Delivery::Stale;
        }
        *delivered = ticket.0;
        match self.adapter.reset_to_default().await {
            Ok(()) => Delivery::Presented,
            Err(e) => {
                tracing::error!(error = %e, "reset to default failed");
                Delivery::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/presenter.rs"]
mod tests;
