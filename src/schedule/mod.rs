//! Timers and presentation: the frame loop, the auto-stop deadline and the
//! fade-out, plus the adapter boundary frames are delivered through.

pub(crate) mod adapter;
pub(crate) mod controller;
pub(crate) mod presenter;
