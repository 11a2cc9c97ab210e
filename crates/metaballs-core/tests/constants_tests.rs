// Sanity checks on tuning constants shared by both renderers.

use metaballs_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn band_cutoffs_are_ordered() {
    assert!(BASS_CUTOFF_HZ > 0.0);
    assert!(BASS_CUTOFF_HZ < MID_CUTOFF_HZ);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn analyser_window_is_a_power_of_two() {
    assert!(ANALYSER_FFT_SIZE.is_power_of_two());
    assert_eq!(ANALYSER_FFT_SIZE / 2, 256);
    assert!(ANALYSER_MIN_DB < ANALYSER_MAX_DB);
    assert!((0.0..1.0).contains(&ANALYSER_SMOOTHING));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn mix_targets_are_in_unit_range() {
    for v in [MIX_INITIAL, MIX_TARGET_PRESSED, MIX_TARGET_RELEASED] {
        assert!((0.0..=1.0).contains(&v));
    }
    assert!(MIX_TARGET_RELEASED < MIX_TARGET_PRESSED);
    assert!(MIX_TRANSITION_SPEED > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn march_budget_is_sane() {
    assert!(HIT_EPSILON > 0.0 && HIT_EPSILON < NORMAL_EPSILON);
    assert!(FAR_PLANE > CAMERA_Z);
    assert!(MISS < 0.0);
    assert!(MAX_STEPS > 0);
}
