//! Camera, normal estimation and the audio-tinted lighting model.

use crate::constants::*;
use crate::frame::FrameInputs;
use crate::raymarch::march;
use crate::scene::scene_distance;
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug)]
pub struct CameraRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Centered, aspect-corrected coordinates: `(frag * 2 - res) / res.y`.
#[inline]
pub fn screen_uv(frag: Vec2, resolution: Vec2) -> Vec2 {
    (frag * 2.0 - resolution) / resolution.y
}

/// Pointer as a screen offset; the `(0, 0)` sentinel maps to no offset.
pub fn pointer_offset(pointer: Vec2, resolution: Vec2) -> Vec2 {
    if pointer.x == 0.0 && pointer.y == 0.0 {
        return Vec2::ZERO;
    }
    screen_uv(pointer, resolution)
}

pub fn camera_origin(pointer: Vec2, resolution: Vec2) -> Vec3 {
    let mouse = pointer_offset(pointer, resolution);
    Vec3::new(
        mouse.x * POINTER_CAMERA_SCALE_X,
        mouse.y * POINTER_CAMERA_SCALE_Y,
        CAMERA_Z,
    )
}

/// Look-at camera aimed at the origin. `uv` comes from [`screen_uv`].
pub fn camera_ray(uv: Vec2, inputs: &FrameInputs) -> CameraRay {
    let origin = camera_origin(inputs.pointer, inputs.resolution);
    let forward = (Vec3::ZERO - origin).normalize();
    let right = Vec3::Y.cross(forward).normalize();
    let up = forward.cross(right);
    let direction = (forward + uv.x * right + uv.y * up).normalize();
    CameraRay { origin, direction }
}

pub fn estimate_normal(p: Vec3, inputs: &FrameInputs) -> Vec3 {
    let e = NORMAL_EPSILON;
    let dx = Vec3::new(e, 0.0, 0.0);
    let dy = Vec3::new(0.0, e, 0.0);
    let dz = Vec3::new(0.0, 0.0, e);
    Vec3::new(
        scene_distance(p + dx, inputs) - scene_distance(p - dx, inputs),
        scene_distance(p + dy, inputs) - scene_distance(p - dy, inputs),
        scene_distance(p + dz, inputs) - scene_distance(p - dz, inputs),
    )
    .normalize_or_zero()
}

#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

pub fn light_position(time: f32) -> Vec3 {
    let mut light = Vec3::new(2.0, 3.0, 5.0);
    light.x += (time * LIGHT_ORBIT_SPEED).sin() * LIGHT_ORBIT_RADIUS;
    light.z += (time * LIGHT_ORBIT_SPEED).cos() * LIGHT_ORBIT_RADIUS;
    light
}

pub fn background(uv: Vec2) -> Vec3 {
    Vec3::new(0.01, 0.02, 0.04) + Vec3::splat(0.05 * uv.y.abs())
}

/// Base tint: high feeds red, mid feeds green, bass feeds blue.
pub fn base_color(inputs: &FrameInputs) -> Vec3 {
    let a = inputs.audio;
    Vec3::new(0.1 + a.high * 0.65, 0.1 + a.mid * 0.5, 0.1 + a.bass * 0.7)
}

pub fn shade(hit: Vec3, ray_dir: Vec3, origin: Vec3, inputs: &FrameInputs) -> Vec3 {
    let bass = inputs.audio.bass;
    let mid = inputs.audio.mid;
    let high = inputs.audio.high;
    let n = estimate_normal(hit, inputs);
    let light_dir = (light_position(inputs.time) - hit).normalize_or_zero();

    // The audio term doubles as an ambient floor and can exceed 1.
    let diffuse = n.dot(light_dir).max((high + mid) * AUDIO_FLOOR_GAIN);

    let view_dir = (origin - hit).normalize_or_zero();
    let reflect_dir = reflect(-light_dir, n);
    let specular = view_dir.dot(reflect_dir).max(0.0).powf(SHININESS);

    let rim = FRESNEL_BIAS + view_dir.dot(n);
    let fresnel = rim * rim;

    let reflected = reflect(ray_dir, n);
    let env = 0.5 + 0.5 * reflected.y;

    let base = base_color(inputs);
    let mut col = base * (diffuse * DIFFUSE_WEIGHT + AMBIENT);
    col += Vec3::ONE * specular * (bass * SPECULAR_BASS_GAIN);
    col += base * fresnel * (bass * FRESNEL_BASS_GAIN);
    col = col.lerp(Vec3::new(0.8, 1.5 + high * 0.2, 1.0), env * ENV_MIX);
    col -= Vec3::splat(high * HIGH_DARKEN);
    col
}

#[inline]
pub fn vignette(col: Vec3, uv: Vec2) -> Vec3 {
    col * (1.0 - VIGNETTE_STRENGTH * uv.dot(uv))
}

/// Full per-pixel evaluation. `frag` is a pixel center with a bottom-left
/// origin, matching the GPU program's convention after its y flip.
pub fn shade_pixel(frag: Vec2, inputs: &FrameInputs) -> Vec3 {
    let uv = screen_uv(frag, inputs.resolution);
    let ray = camera_ray(uv, inputs);
    let hit = march(ray.origin, ray.direction, inputs);
    let col = if hit.is_hit() {
        let p = ray.origin + ray.direction * hit.distance;
        shade(p, ray.direction, ray.origin, inputs)
    } else {
        background(uv)
    };
    vignette(col, uv)
}
