//! WGSL program assembly. The template carries the pipeline and lighting;
//! numeric tuning and the metaball table come from Rust so both renderers
//! share one source of truth.

use crate::constants::*;
use crate::scene::{Metaball, Orbit, METABALLS};
use std::fmt::Write as _;

pub const METABALLS_WGSL: &str = include_str!("../shaders/metaballs.wgsl");

const CONSTANTS_MARKER: &str = "// @constants";
const METABALLS_MARKER: &str = "// @metaballs";

/// Vertex entry point: one oversized triangle, draw with `0..3`.
pub const VERTEX_ENTRY: &str = "vs_fullscreen";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// The complete program with constants and the ball fold spliced in.
pub fn scene_wgsl() -> String {
    METABALLS_WGSL
        .replacen(CONSTANTS_MARKER, &constants_block(), 1)
        .replacen(METABALLS_MARKER, &metaballs_block(&METABALLS), 1)
}

/// `{:?}` keeps a decimal point on whole numbers, which WGSL needs to infer f32.
fn float(v: f32) -> String {
    format!("{:?}", v)
}

fn constants_block() -> String {
    let floats: [(&str, f32); 31] = [
        ("FBM_AMPLITUDE", FBM_AMPLITUDE),
        ("FBM_FREQUENCY", FBM_FREQUENCY),
        ("BLEND_BASE", BLEND_BASE),
        ("BLEND_BASS_GAIN", BLEND_BASS_GAIN),
        ("DISPLACE_STRENGTH_BASE", DISPLACE_STRENGTH_BASE),
        ("DISPLACE_STRENGTH_HIGH", DISPLACE_STRENGTH_HIGH),
        ("DISPLACE_SCALE_BASE", DISPLACE_SCALE_BASE),
        ("DISPLACE_SCALE_MID", DISPLACE_SCALE_MID),
        ("DISPLACE_SPEED_BASE", DISPLACE_SPEED_BASE),
        ("DISPLACE_SPEED_HIGH", DISPLACE_SPEED_HIGH),
        ("DISPLACE_BASS_GAIN", DISPLACE_BASS_GAIN),
        ("HIT_EPSILON", HIT_EPSILON),
        ("FAR_PLANE", FAR_PLANE),
        ("MISS", MISS),
        ("NORMAL_EPSILON", NORMAL_EPSILON),
        ("CAMERA_Z", CAMERA_Z),
        ("POINTER_CAMERA_SCALE_X", POINTER_CAMERA_SCALE_X),
        ("POINTER_CAMERA_SCALE_Y", POINTER_CAMERA_SCALE_Y),
        ("LIGHT_ORBIT_SPEED", LIGHT_ORBIT_SPEED),
        ("LIGHT_ORBIT_RADIUS", LIGHT_ORBIT_RADIUS),
        ("AUDIO_FLOOR_GAIN", AUDIO_FLOOR_GAIN),
        ("DIFFUSE_WEIGHT", DIFFUSE_WEIGHT),
        ("AMBIENT", AMBIENT),
        ("SHININESS", SHININESS),
        ("SPECULAR_BASS_GAIN", SPECULAR_BASS_GAIN),
        ("FRESNEL_BIAS", FRESNEL_BIAS),
        ("FRESNEL_BASS_GAIN", FRESNEL_BASS_GAIN),
        ("ENV_MIX", ENV_MIX),
        ("HIGH_DARKEN", HIGH_DARKEN),
        ("VIGNETTE_STRENGTH", VIGNETTE_STRENGTH),
        ("BASS_SPREAD", BASS_SPREAD),
    ];
    let mut out = String::new();
    for (name, value) in floats {
        let _ = writeln!(out, "const {}: f32 = {};", name, float(value));
    }
    let _ = writeln!(out, "const FBM_OCTAVES: i32 = {};", FBM_OCTAVES);
    let _ = writeln!(out, "const MAX_STEPS: i32 = {};", MAX_STEPS);
    out
}

fn axis(orbit: &Orbit, amplitude: &str) -> String {
    format!(
        "{}(u.time * {} + {}) * {}",
        orbit.wave.wgsl_name(),
        float(orbit.frequency),
        float(orbit.phase),
        amplitude
    )
}

fn sphere_call(ball: &Metaball) -> String {
    let x_amp = if ball.bass_coupled {
        format!("(bass * {})", float(ball.x.amplitude))
    } else {
        float(ball.x.amplitude)
    };
    format!(
        "sphere(p, vec3<f32>({}, {}, {}), {})",
        axis(&ball.x, &x_amp),
        axis(&ball.y, &float(ball.y.amplitude)),
        axis(&ball.z, &float(ball.z.amplitude)),
        float(ball.radius)
    )
}

/// Declares `res` from the first ball and folds the rest in with `smin(.., k)`.
fn metaballs_block(balls: &[Metaball]) -> String {
    let mut out = String::new();
    for (i, ball) in balls.iter().enumerate() {
        if i == 0 {
            let _ = writeln!(out, "var res = {};", sphere_call(ball));
        } else {
            let _ = writeln!(out, "    res = smin(res, {}, k);", sphere_call(ball));
        }
    }
    if balls.is_empty() {
        let _ = writeln!(out, "var res = FAR_PLANE;");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_are_fully_replaced() {
        let src = scene_wgsl();
        assert!(!src.contains(CONSTANTS_MARKER));
        assert!(!src.contains(METABALLS_MARKER));
        assert!(src.contains("const MAX_STEPS: i32 = 100;"));
        assert!(src.contains("const MISS: f32 = -1.0;"));
    }

    #[test]
    fn fold_has_one_declaration_and_seven_blends() {
        let block = metaballs_block(&METABALLS);
        assert_eq!(block.matches("var res").count(), 1);
        assert_eq!(block.matches("smin(").count(), METABALLS.len() - 1);
        assert!(block.starts_with("var res = sphere(p, vec3<f32>(sin(u.time * 0.6 + 80.0) * (bass * 3.0)"));
        // The last ball drifts independently of bass.
        let last = block.lines().last().unwrap_or_default();
        assert!(last.contains("cos(u.time * 4.2 + 3.0) * 1.5,"));
        assert!(!last.contains("bass"));
    }
}
