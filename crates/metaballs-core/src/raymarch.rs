use crate::constants::{FAR_PLANE, HIT_EPSILON, MAX_STEPS, MISS};
use crate::frame::FrameInputs;
use crate::scene::scene_distance;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct March {
    /// Distance along the ray to the hit, or [`MISS`].
    pub distance: f32,
    /// Index of the last step taken; diagnostic only.
    pub steps: u32,
}

impl March {
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance > 0.0
    }
}

pub fn march(origin: Vec3, direction: Vec3, inputs: &FrameInputs) -> March {
    march_field(origin, direction, |p| scene_distance(p, inputs))
}

/// Sphere tracing over an arbitrary distance field, with the step, epsilon
/// and far-plane budget of the scene.
pub fn march_field(origin: Vec3, direction: Vec3, field: impl Fn(Vec3) -> f32) -> March {
    let mut d = 0.0f32;
    let mut steps = 0;
    for i in 0..MAX_STEPS {
        steps = i;
        let dist = field(origin + direction * d);
        if dist < HIT_EPSILON {
            return March { distance: d, steps };
        }
        d += dist;
        if d > FAR_PLANE {
            return March {
                distance: MISS,
                steps,
            };
        }
    }
    March {
        distance: MISS,
        steps,
    }
}
