// Pointer tracking and displacement-mix smoothing.

use metaballs_core::constants::{MIX_TARGET_PRESSED, MIX_TARGET_RELEASED};
use metaballs_core::interaction::approach_mix;
use metaballs_core::InteractionState;

#[test]
fn starts_at_zero_with_no_pointer() {
    let s = InteractionState::new();
    assert_eq!(s.mix, 0.0);
    assert!(s.pointer.is_none());
    assert!(!s.pressed);
    assert_eq!(s.pointer_uniform(600.0), [0.0, 0.0]);
}

#[test]
fn pointer_y_is_flipped_to_bottom_left_origin() {
    let mut s = InteractionState::new();
    s.pointer_moved(100.0, 50.0);
    assert_eq!(s.pointer_uniform(600.0), [100.0, 550.0]);
    s.pointer_moved(300.0, 300.0);
    assert_eq!(s.pointer_uniform(600.0), [300.0, 300.0]);
}

#[test]
fn target_follows_button() {
    let mut s = InteractionState::new();
    assert_eq!(s.target_mix(), MIX_TARGET_RELEASED);
    s.pointer_down();
    assert_eq!(s.target_mix(), MIX_TARGET_PRESSED);
    s.pointer_up();
    assert_eq!(s.target_mix(), MIX_TARGET_RELEASED);
}

#[test]
fn one_sixtieth_step_while_pressed() {
    let mut s = InteractionState::new();
    s.pointer_down();
    let m = s.step(1.0 / 60.0);
    // 0 + (1 - 0) * 1.5 * (1/60)
    assert!((m - 0.025).abs() < 1e-6);
}

#[test]
fn released_converges_to_point_three() {
    let mut s = InteractionState::new();
    for _ in 0..600 {
        s.step(1.0 / 60.0);
    }
    assert!((s.mix - MIX_TARGET_RELEASED).abs() < 1e-3);
}

#[test]
fn pressed_converges_to_one_and_stays_in_range() {
    let mut s = InteractionState::new();
    s.pointer_down();
    for _ in 0..600 {
        let m = s.step(1.0 / 60.0);
        assert!((0.0..=1.0).contains(&m));
    }
    assert!((s.mix - MIX_TARGET_PRESSED).abs() < 1e-3);
}

#[test]
fn zero_and_bad_dt_leave_mix_unchanged() {
    assert_eq!(approach_mix(0.4, 1.0, 0.0), 0.4);
    assert_eq!(approach_mix(0.4, 1.0, -1.0), 0.4);
    assert_eq!(approach_mix(0.4, 1.0, f32::NAN), 0.4);
    assert_eq!(approach_mix(0.4, 1.0, f32::INFINITY), 0.4);
}

#[test]
fn long_frames_are_clamped() {
    assert_eq!(approach_mix(0.0, 1.0, 10.0), 1.0);
    assert_eq!(approach_mix(1.0, 0.3, 10.0), 0.0);
}
