use std::f64::consts::FRAC_PI_2;

use super::*;
use crate::foundation::core::IconSize;

fn prepared_surface() -> Surface {
    let mut s = Surface::new(IconSize::new(32).unwrap());
    s.save();
    s.scale(2.0);
    s.set_line_cap(crate::render::surface::LineCap::Round);
    s.set_line_join(crate::render::surface::LineJoin::Round);
    s
}

#[test]
fn every_kind_draws_something() {
    for kind in [
        AnimationKind::Download,
        AnimationKind::Error,
        AnimationKind::Complete,
        AnimationKind::ProgressArc,
        AnimationKind::ProgressFill,
    ] {
        let mut r = Renderer::for_kind(kind, 7);
        assert_eq!(r.kind(), kind);
        r.set_progress(0.5);
        let mut s = prepared_surface();
        r.render(&mut s, 0.4).unwrap();
        s.restore();
        assert!(!s.snapshot().is_blank(), "{kind} rendered nothing");
    }
}

#[test]
fn download_bounce_follows_sine() {
    assert!((DownloadRenderer::bounce_offset(0.0) - 2.0).abs() < 1e-12);
    assert!((DownloadRenderer::bounce_offset(0.25) - 4.0).abs() < 1e-12);
    assert!((DownloadRenderer::bounce_offset(0.75) - 0.0).abs() < 1e-12);
}

#[test]
fn download_arrow_moves_with_phase() {
    let mut a = prepared_surface();
    DownloadRenderer.render(&mut a, 0.25).unwrap();
    let mut b = prepared_surface();
    DownloadRenderer.render(&mut b, 0.75).unwrap();
    assert_ne!(a.snapshot(), b.snapshot());
}

#[test]
fn error_breathes_and_pulses() {
    assert!((ErrorRenderer::breath_scale(0.25) - 1.15).abs() < 1e-12);
    assert!((ErrorRenderer::breath_scale(0.75) - 0.85).abs() < 1e-12);
    assert!((ErrorRenderer::pulse_alpha(0.25) - 1.0).abs() < 1e-12);
    assert!((ErrorRenderer::pulse_alpha(0.75) - 0.4).abs() < 1e-12);

    let mut s = prepared_surface();
    ErrorRenderer.render(&mut s, 0.3).unwrap();
    // The renderer balances its own save/restore.
    assert_eq!(s.depth(), 1);
}

#[test]
fn checkmark_draws_progressively() {
    use super::complete::CHECK;

    assert_eq!(CompleteRenderer::draw_progress(0.0), 0.0);
    assert_eq!(CompleteRenderer::draw_progress(0.5), 0.75);
    assert_eq!(CompleteRenderer::draw_progress(0.9), 1.0);

    let first = CompleteRenderer::visible_points(0.25);
    assert_eq!(first.len(), 2);
    assert_eq!(first[1], CHECK[0].lerp(CHECK[1], 0.5));

    let half = CompleteRenderer::visible_points(0.5);
    assert_eq!(half, vec![CHECK[0], CHECK[1]]);

    let full = CompleteRenderer::visible_points(1.0);
    assert_eq!(full, CHECK.to_vec());
}

#[test]
fn arc_sweep_starts_at_twelve_oclock() {
    let (start, end) = ProgressArcRenderer::sweep(0.0);
    assert_eq!(start, -FRAC_PI_2);
    assert_eq!(end, -FRAC_PI_2);
    let (_, end) = ProgressArcRenderer::sweep(0.5);
    assert!((end - FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn progress_renderers_ease_on_each_render() {
    let mut arc = Renderer::for_kind(AnimationKind::ProgressArc, 0);
    arc.set_progress(0.5);
    let mut s = prepared_surface();
    arc.render(&mut s, 0.0).unwrap();
    let (current, target) = arc.progress().unwrap();
    assert!((current - 0.02).abs() < 1e-12);
    assert_eq!(target, 0.5);

    let mut fill = ProgressFillRenderer::new(0);
    fill.set_progress(0.3);
    let mut s = prepared_surface();
    fill.render(&mut s, 0.0).unwrap();
    assert!((fill.easing().current() - 0.02).abs() < 1e-12);
    assert!((fill.wave_offset() - 0.2).abs() < 1e-12);
}

#[test]
fn fill_hides_particles_near_completion() {
    let mut fill = ProgressFillRenderer::new(4);
    fill.set_progress(0.95);
    assert!(!fill.shows_particles());
    let before = fill.particles().particles().to_vec();
    let mut s = prepared_surface();
    fill.render(&mut s, 0.0).unwrap();
    assert_eq!(fill.particles().particles(), before.as_slice());

    fill.set_progress(0.4);
    assert!(fill.shows_particles());
    fill.render(&mut s, 0.0).unwrap();
    assert_ne!(fill.particles().particles(), before.as_slice());
}

#[test]
fn wave_offset_wraps() {
    let mut fill = ProgressFillRenderer::new(0);
    let mut s = prepared_surface();
    for _ in 0..100 {
        fill.render(&mut s, 0.0).unwrap();
        assert!((0.0..std::f64::consts::TAU).contains(&fill.wave_offset()));
    }
}

#[test]
fn non_progress_kinds_ignore_progress_updates() {
    let mut r = Renderer::for_kind(AnimationKind::Download, 0);
    r.set_progress(0.7);
    assert_eq!(r.progress(), None);
}
