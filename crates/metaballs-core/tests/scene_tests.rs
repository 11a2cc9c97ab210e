// Distance field properties: blending, noise ranges, audio coupling.

use glam::Vec3;
use metaballs_core::constants::{BASS_SPREAD, FBM_AMPLITUDE, METABALL_COUNT};
use metaballs_core::scene::*;
use metaballs_core::{AudioBands, FrameInputs};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn inputs(time: f32, bass: f32, mid: f32, high: f32) -> FrameInputs {
    FrameInputs {
        time,
        audio: AudioBands { bass, mid, high },
        ..FrameInputs::default()
    }
}

#[test]
fn smin_is_bounded_by_min_and_blend_width() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..2000 {
        let a: f32 = rng.gen_range(-5.0..5.0);
        let b: f32 = rng.gen_range(-5.0..5.0);
        let k: f32 = rng.gen_range(0.05..3.0);
        let s = smin(a, b, k);
        let m = a.min(b);
        assert!(s <= m + 1e-5, "smin({a}, {b}, {k}) = {s} above min {m}");
        assert!(s >= m - k * 0.25 - 1e-5, "smin({a}, {b}, {k}) = {s} too low");
        assert!((s - smin(b, a, k)).abs() < 1e-4);
    }
}

#[test]
fn smin_is_plain_min_when_far_apart() {
    assert_eq!(smin(1.0, 5.0, 0.6), 1.0);
    assert_eq!(smin(5.0, 1.0, 0.6), 1.0);
}

#[test]
fn fract_wraps_negative_inputs_upward() {
    assert!((fract(-0.25) - 0.75).abs() < 1e-6);
    assert!((fract(2.5) - 0.5).abs() < 1e-6);
}

#[test]
fn hash_and_noise_stay_in_unit_range() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..2000 {
        let n: f32 = rng.gen_range(-1000.0..1000.0);
        let h = hash(n);
        assert!((0.0..=1.0).contains(&h), "hash({n}) = {h}");

        let p = Vec3::new(
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
        );
        let v = noise(p);
        assert!((-1e-5..=1.0 + 1e-5).contains(&v), "noise({p}) = {v}");
    }
}

#[test]
fn fbm_is_bounded_by_octave_weights() {
    // 1.2 * (1 + 1/2 + ... + 1/32)
    let max = FBM_AMPLITUDE * 1.96875;
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..500 {
        let p = Vec3::new(
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        );
        let v = fbm(p);
        assert!(v >= -1e-4 && v <= max + 1e-4, "fbm({p}) = {v}");
    }
}

#[test]
fn table_has_seven_coupled_balls_and_one_free() {
    assert_eq!(METABALLS.len(), METABALL_COUNT);
    let coupled = METABALLS.iter().filter(|b| b.bass_coupled).count();
    assert_eq!(coupled, 7);
    let last = METABALLS[7];
    assert!(!last.bass_coupled);
    assert_eq!(last.horizontal_amplitude(0.0), 1.5);
    assert_eq!(last.horizontal_amplitude(1.0), 1.5);
    assert_eq!(METABALLS[0].horizontal_amplitude(1.0), BASS_SPREAD);
}

#[test]
fn silence_collapses_coupled_balls_onto_the_vertical_axis() {
    for (i, ball) in METABALLS.iter().enumerate().take(7) {
        for t in [0.0f32, 1.3, 7.9] {
            assert_eq!(ball.center(t, 0.0).x, 0.0, "ball {i} at t={t}");
        }
    }
    // With full bass the first ball swings by up to three units.
    let x = METABALLS[0].center(0.0, 1.0).x;
    assert!((x - 80.0f32.sin() * 3.0).abs() < 1e-5);
}

#[test]
fn blend_sharpens_with_bass() {
    assert!((blend_sharpness(0.0) - 0.6).abs() < 1e-6);
    assert!((blend_sharpness(1.0) - 2.3).abs() < 1e-6);
}

#[test]
fn origin_is_inside_the_silent_cluster() {
    let d = scene_distance(Vec3::ZERO, &inputs(0.0, 0.0, 0.0, 0.0));
    assert!(d < 0.0, "origin distance {d}");
}

#[test]
fn far_points_are_far() {
    let d = scene_distance(Vec3::new(0.0, 0.0, 15.0), &inputs(0.0, 0.0, 0.0, 0.0));
    assert!(d > 10.0, "distance {d}");
}

#[test]
fn displacement_needs_bass() {
    let quiet = inputs(2.0, 0.0, 0.9, 0.9);
    let p = Vec3::new(0.3, -0.2, 0.8);
    assert_eq!(scene_distance(p, &quiet), blended_distance(p, &quiet));

    let loud = inputs(2.0, 0.8, 0.9, 0.9);
    let expected = blended_distance(p, &loud) - displacement(p, &loud) * 0.8 * 0.4;
    assert!((scene_distance(p, &loud) - expected).abs() < 1e-5);
}

#[test]
fn field_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..200 {
        let p = Vec3::new(
            rng.gen_range(-4.0..4.0),
            rng.gen_range(-4.0..4.0),
            rng.gen_range(-4.0..4.0),
        );
        let f = inputs(rng.gen_range(0.0..30.0), rng.gen(), rng.gen(), rng.gen());
        assert_eq!(scene_distance(p, &f).to_bits(), scene_distance(p, &f).to_bits());
    }
}

#[test]
fn smin_approaches_min_as_blend_width_shrinks() {
    let (a, b) = (0.7f32, 0.75f32);
    let mut prev_gap = f32::INFINITY;
    for k in [1.0f32, 0.5, 0.1, 0.01, 0.001] {
        let gap = a.min(b) - smin(a, b, k);
        assert!(gap >= -1e-6 && gap <= prev_gap + 1e-6);
        prev_gap = gap;
    }
    assert!(prev_gap < 1e-5);
}
