//! Signed distance field for the blended, noise-displaced metaballs.
//!
//! Everything here is a pure function of the point and the frame's inputs.
//! The WGSL program is generated from the same table and constants, see
//! [`crate::shader`].

use crate::constants::*;
use crate::frame::FrameInputs;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wave {
    Sin,
    Cos,
}

impl Wave {
    #[inline]
    pub fn eval(self, x: f32) -> f32 {
        match self {
            Wave::Sin => x.sin(),
            Wave::Cos => x.cos(),
        }
    }

    pub fn wgsl_name(self) -> &'static str {
        match self {
            Wave::Sin => "sin",
            Wave::Cos => "cos",
        }
    }
}

/// One axis of a ball's trajectory: `wave(time * frequency + phase) * amplitude`.
#[derive(Clone, Copy, Debug)]
pub struct Orbit {
    pub wave: Wave,
    pub frequency: f32,
    pub phase: f32,
    pub amplitude: f32,
}

const fn orbit(wave: Wave, frequency: f32, phase: f32, amplitude: f32) -> Orbit {
    Orbit {
        wave,
        frequency,
        phase,
        amplitude,
    }
}

impl Orbit {
    #[inline]
    pub fn eval(&self, time: f32, amplitude: f32) -> f32 {
        self.wave.eval(time * self.frequency + self.phase) * amplitude
    }
}

/// Animation parameters for one ball. When `bass_coupled` is set the
/// horizontal amplitude is `bass * x.amplitude` instead of `x.amplitude`.
#[derive(Clone, Copy, Debug)]
pub struct Metaball {
    pub x: Orbit,
    pub y: Orbit,
    pub z: Orbit,
    pub radius: f32,
    pub bass_coupled: bool,
}

impl Metaball {
    #[inline]
    pub fn horizontal_amplitude(&self, bass: f32) -> f32 {
        if self.bass_coupled {
            bass * self.x.amplitude
        } else {
            self.x.amplitude
        }
    }

    pub fn center(&self, time: f32, bass: f32) -> Vec3 {
        Vec3::new(
            self.x.eval(time, self.horizontal_amplitude(bass)),
            self.y.eval(time, self.y.amplitude),
            self.z.eval(time, self.z.amplitude),
        )
    }

    #[inline]
    pub fn distance(&self, p: Vec3, time: f32, bass: f32) -> f32 {
        (p - self.center(time, bass)).length() - self.radius
    }
}

use Wave::{Cos, Sin};

// Literal per-ball constants; the visual rhythm depends on them.
pub const METABALLS: [Metaball; METABALL_COUNT] = [
    Metaball {
        x: orbit(Sin, 0.6, 80.0, BASS_SPREAD),
        y: orbit(Cos, 0.5, 0.0, 0.8),
        z: orbit(Sin, 0.3, 0.0, 0.8),
        radius: 0.75,
        bass_coupled: true,
    },
    Metaball {
        x: orbit(Cos, 3.4, 0.0, BASS_SPREAD),
        y: orbit(Sin, 0.8, 3.14, 0.9),
        z: orbit(Cos, 0.6, 0.0, 0.9),
        radius: 0.95,
        bass_coupled: true,
    },
    Metaball {
        x: orbit(Sin, 0.6, 4.5, BASS_SPREAD),
        y: orbit(Cos, 0.3, 0.0, 0.7),
        z: orbit(Sin, 0.75, 0.5, 0.7),
        radius: 0.55,
        bass_coupled: true,
    },
    Metaball {
        x: orbit(Cos, 5.55, 4.0, BASS_SPREAD),
        y: orbit(Sin, 0.65, 0.0, 0.85),
        z: orbit(Cos, 0.85, 5.0, 0.85),
        radius: 0.70,
        bass_coupled: true,
    },
    Metaball {
        x: orbit(Sin, 0.8, 2.0, BASS_SPREAD),
        y: orbit(Cos, 0.9, 0.0, 0.6),
        z: orbit(Sin, 0.5, 1.0, 0.6),
        radius: 0.45,
        bass_coupled: true,
    },
    Metaball {
        x: orbit(Cos, 2.1, 1.0, BASS_SPREAD),
        y: orbit(Sin, 1.2, 4.5, 0.7),
        z: orbit(Cos, 0.7, 0.0, 0.7),
        radius: 0.65,
        bass_coupled: true,
    },
    Metaball {
        x: orbit(Sin, 1.5, 6.0, BASS_SPREAD),
        y: orbit(Cos, 1.1, 0.0, 0.9),
        z: orbit(Sin, 0.9, 2.5, 0.9),
        radius: 0.8,
        bass_coupled: true,
    },
    Metaball {
        x: orbit(Cos, 4.2, 3.0, 1.5),
        y: orbit(Sin, 1.3, 0.0, 0.75),
        z: orbit(Cos, 1.0, 6.0, 0.75),
        radius: 0.6,
        bass_coupled: false,
    },
];

/// Polynomial smooth minimum; `k` is the blend width.
#[inline]
pub fn smin(a: f32, b: f32, k: f32) -> f32 {
    let h = (0.5 + 0.5 * (b - a) / k).clamp(0.0, 1.0);
    mix(b, a, h) - k * h * (1.0 - h)
}

#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// GPU-style `fract`: `x - floor(x)`, so negative inputs land in `[0, 1)`.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
pub fn hash(n: f32) -> f32 {
    fract(n.sin() * 43758.5453)
}

/// Trilinear value noise over a hashed integer lattice.
pub fn noise(x: Vec3) -> f32 {
    let p = x.floor();
    let f = x - p;
    let f = f * f * (Vec3::splat(3.0) - 2.0 * f);
    let n = p.x + p.y * 7.0 + 33.0 * p.z;
    mix(
        mix(
            mix(hash(n + 0.0), hash(n + 1.0), f.x),
            mix(hash(n + 57.0), hash(n + 58.0), f.x),
            f.y,
        ),
        mix(
            mix(hash(n + 113.0), hash(n + 114.0), f.x),
            mix(hash(n + 170.0), hash(n + 171.0), f.x),
            f.y,
        ),
        f.z,
    )
}

pub fn fbm(p: Vec3) -> f32 {
    let mut value = 0.0;
    let mut amplitude = FBM_AMPLITUDE;
    let mut frequency = FBM_FREQUENCY;
    for _ in 0..FBM_OCTAVES {
        value += amplitude * noise(p * frequency);
        frequency *= 2.0;
        amplitude *= 0.5;
    }
    value
}

/// Shared blend width for every fold in a frame; more bass, sharper blend.
#[inline]
pub fn blend_sharpness(bass: f32) -> f32 {
    BLEND_BASE + bass * BLEND_BASS_GAIN
}

pub fn blended_distance(p: Vec3, inputs: &FrameInputs) -> f32 {
    let bass = inputs.audio.bass;
    let k = blend_sharpness(bass);
    let mut balls = METABALLS.iter().map(|b| b.distance(p, inputs.time, bass));
    let first = balls.next().unwrap_or(FAR_PLANE);
    balls.fold(first, |acc, d| smin(acc, d, k))
}

pub fn displacement(p: Vec3, inputs: &FrameInputs) -> f32 {
    let bass = inputs.audio.bass;
    let mid = inputs.audio.mid;
    let high = inputs.audio.high;
    let strength = DISPLACE_STRENGTH_BASE + high * DISPLACE_STRENGTH_HIGH;
    let scale = DISPLACE_SCALE_BASE + mid * DISPLACE_SCALE_MID;
    let speed = DISPLACE_SPEED_BASE + high * DISPLACE_SPEED_HIGH;
    let warp = ((high * bass) + (inputs.time * 1.0 + 1.0).sin()) * speed;
    fbm(p * scale + Vec3::splat(warp)) * strength
}

pub fn scene_distance(p: Vec3, inputs: &FrameInputs) -> f32 {
    blended_distance(p, inputs) - displacement(p, inputs) * (inputs.audio.bass * DISPLACE_BASS_GAIN)
}
