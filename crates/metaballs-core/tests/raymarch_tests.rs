// Sphere tracing termination: hit, far-plane escape, step budget.

use glam::Vec3;
use metaballs_core::constants::{MAX_STEPS, MISS};
use metaballs_core::raymarch::{march, march_field};
use metaballs_core::FrameInputs;

fn unit_sphere(p: Vec3) -> f32 {
    p.length() - 1.0
}

#[test]
fn hits_a_sphere_straight_ahead() {
    let m = march_field(Vec3::new(0.0, 0.0, 6.0), Vec3::NEG_Z, unit_sphere);
    assert!(m.is_hit());
    assert!((m.distance - 5.0).abs() < 1e-4);
    assert_eq!(m.steps, 1);
}

#[test]
fn escapes_past_the_far_plane() {
    let m = march_field(Vec3::new(0.0, 0.0, 6.0), Vec3::Z, unit_sphere);
    assert!(!m.is_hit());
    assert_eq!(m.distance, MISS);
    assert!(m.steps < 5);
}

#[test]
fn step_budget_exhaustion_is_a_miss() {
    let m = march_field(Vec3::ZERO, Vec3::X, |_| 0.001);
    assert_eq!(m.distance, MISS);
    assert_eq!(m.steps, MAX_STEPS - 1);
}

#[test]
fn starting_inside_reports_zero_which_is_not_a_hit() {
    let m = march_field(Vec3::ZERO, Vec3::X, unit_sphere);
    assert_eq!(m.distance, 0.0);
    assert!(!m.is_hit());
}

#[test]
fn central_ray_hits_the_silent_scene() {
    let m = march(Vec3::new(0.0, 0.0, 6.0), Vec3::NEG_Z, &FrameInputs::default());
    assert!(m.is_hit());
    assert!(m.distance > 3.0 && m.distance < 6.0, "distance {}", m.distance);
}

#[test]
fn ray_pointing_away_misses_the_scene() {
    let m = march(Vec3::new(0.0, 0.0, 6.0), Vec3::Z, &FrameInputs::default());
    assert_eq!(m.distance, MISS);
}
