use super::*;

fn progress(id: DownloadId, received: u64, total: Option<u64>) -> DownloadEvent {
    DownloadEvent::Progress {
        id,
        received,
        total,
    }
}

#[test]
fn lifecycle_maps_to_activations() {
    let mut t = DownloadTracker::new();
    assert_eq!(
        t.route(&DownloadEvent::Created { id: 7 }),
        Some(ActivationKind::Download)
    );
    assert_eq!(t.current(), Some(7));

    let routed = t.route(&progress(7, 25, Some(100))).unwrap();
    assert_eq!(routed.progress(), Some(0.25));

    assert_eq!(
        t.route(&DownloadEvent::Completed { id: 7 }),
        Some(ActivationKind::Complete)
    );
    assert_eq!(t.current(), None);
}

#[test]
fn other_ids_are_ignored() {
    let mut t = DownloadTracker::new();
    t.route(&DownloadEvent::Created { id: 1 });
    assert_eq!(t.route(&progress(2, 5, Some(10))), None);
    assert_eq!(t.route(&DownloadEvent::Completed { id: 2 }), None);
    assert_eq!(t.current(), Some(1));
}

#[test]
fn unknown_length_progress_is_skipped() {
    let mut t = DownloadTracker::new();
    t.route(&DownloadEvent::Created { id: 3 });
    assert_eq!(t.route(&progress(3, 10, None)), None);
    assert_eq!(t.route(&progress(3, 10, Some(0))), None);
}

#[test]
fn over_delivery_clamps_to_full() {
    let mut t = DownloadTracker::new();
    t.route(&DownloadEvent::Created { id: 3 });
    let routed = t.route(&progress(3, 150, Some(100))).unwrap();
    assert_eq!(routed.progress(), Some(1.0));
}

#[test]
fn failure_ends_tracking() {
    let mut t = DownloadTracker::new();
    t.route(&DownloadEvent::Created { id: 9 });
    let failed = DownloadEvent::Failed {
        id: 9,
        reason: "NETWORK_FAILED".into(),
    };
    assert_eq!(t.route(&failed), Some(ActivationKind::Error));
    assert_eq!(t.route(&DownloadEvent::Completed { id: 9 }), None);
}

#[test]
fn newer_download_takes_over() {
    let mut t = DownloadTracker::new();
    t.route(&DownloadEvent::Created { id: 1 });
    t.route(&DownloadEvent::Created { id: 2 });
    assert_eq!(t.route(&DownloadEvent::Completed { id: 1 }), None);
    assert_eq!(
        t.route(&DownloadEvent::Completed { id: 2 }),
        Some(ActivationKind::Complete)
    );
}

#[test]
fn events_deserialize_from_tagged_json() {
    let ev: DownloadEvent =
        serde_json::from_str(r#"{"type":"progress","id":4,"received":1,"total":4}"#).unwrap();
    assert_eq!(ev, progress(4, 1, Some(4)));
    let ev: DownloadEvent =
        serde_json::from_str(r#"{"type":"failed","id":4,"reason":"disk full"}"#).unwrap();
    assert_eq!(ev.id(), 4);
}

#[tokio::test(start_paused = true)]
async fn dispatch_drives_the_controller() {
    use crate::{foundation::config::AnimatorConfig, schedule::adapter::NullAdapter};

    let cfg = AnimatorConfig {
        icon_px: 16,
        ..AnimatorConfig::default()
    };
    let ctl = AnimationController::new(cfg, NullAdapter).unwrap();
    let mut t = DownloadTracker::new();
    t.dispatch(&ctl, &DownloadEvent::Created { id: 5 });
    t.dispatch(&ctl, &progress(5, 1, Some(2)));

    let snap = ctl.snapshot_state();
    assert_eq!(snap.progress_target, Some(0.5));
    assert_eq!(
        snap.incoming_kind,
        Some(crate::animation::kind::AnimationKind::ProgressFill)
    );
}
