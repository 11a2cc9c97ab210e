//! Pointer/button tracking and the smoothed displacement mix.

use crate::constants::{MIX_INITIAL, MIX_TARGET_PRESSED, MIX_TARGET_RELEASED, MIX_TRANSITION_SPEED};
use glam::Vec2;

#[derive(Clone, Copy, Debug)]
pub struct InteractionState {
    /// Pixel position with a top-left origin, `None` until the first move.
    pub pointer: Option<Vec2>,
    pub pressed: bool,
    pub mix: f32,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            pointer: None,
            pressed: false,
            mix: MIX_INITIAL,
        }
    }
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    #[inline]
    pub fn pointer_down(&mut self) {
        self.pressed = true;
    }

    #[inline]
    pub fn pointer_up(&mut self) {
        self.pressed = false;
    }

    pub fn target_mix(&self) -> f32 {
        if self.pressed {
            MIX_TARGET_PRESSED
        } else {
            MIX_TARGET_RELEASED
        }
    }

    /// One first-order step toward the target, clamped to `[0, 1]`.
    pub fn step(&mut self, dt_sec: f32) -> f32 {
        self.mix = approach_mix(self.mix, self.target_mix(), dt_sec);
        self.mix
    }

    /// Pointer in the field's vertical convention (`y' = height - y`), or the
    /// `(0, 0)` sentinel before any pointer movement.
    pub fn pointer_uniform(&self, height: f32) -> [f32; 2] {
        match self.pointer {
            Some(p) => [p.x, height - p.y],
            None => [0.0, 0.0],
        }
    }
}

#[inline]
pub fn approach_mix(mix: f32, target: f32, dt_sec: f32) -> f32 {
    let dt = if dt_sec.is_finite() { dt_sec.max(0.0) } else { 0.0 };
    (mix + (target - mix) * MIX_TRANSITION_SPEED * dt).clamp(0.0, 1.0)
}
