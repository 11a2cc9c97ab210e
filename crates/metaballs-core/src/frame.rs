//! Per-frame inputs and the driver that assembles them.

use crate::analyzer::{AudioBands, AudioCapture, FrequencyAnalyzer};
use crate::interaction::InteractionState;
use glam::Vec2;

/// Immutable snapshot consumed identically by every pixel of one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInputs {
    pub time: f32,
    pub resolution: Vec2,
    /// Pointer with a bottom-left origin, or `(0, 0)` before any movement.
    pub pointer: Vec2,
    pub displacement_mix: f32,
    pub audio: AudioBands,
}

impl Default for FrameInputs {
    fn default() -> Self {
        Self {
            time: 0.0,
            resolution: Vec2::ONE,
            pointer: Vec2::ZERO,
            displacement_mix: 0.0,
            audio: AudioBands::SILENT,
        }
    }
}

/// Uniform block layout shared with `FrameUniforms` in the WGSL program.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub resolution: [f32; 2],
    pub pointer: [f32; 2],
    pub audio: [f32; 3],
    pub time: f32,
    pub displacement_mix: f32,
    pub _pad: [f32; 3],
}

impl From<&FrameInputs> for FrameUniforms {
    fn from(inputs: &FrameInputs) -> Self {
        Self {
            resolution: inputs.resolution.to_array(),
            pointer: inputs.pointer.to_array(),
            audio: inputs.audio.to_array(),
            time: inputs.time,
            displacement_mix: inputs.displacement_mix,
            _pad: [0.0; 3],
        }
    }
}

/// Monotonic frame timing. The first tick reports `dt = 0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    origin: Option<f64>,
    last: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    pub time: f32,
    pub dt: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the host's timestamp in seconds. Backwards jumps yield `dt = 0`.
    pub fn tick(&mut self, now_sec: f64) -> FrameTime {
        let origin = *self.origin.get_or_insert(now_sec);
        let dt = match self.last {
            Some(last) => (now_sec - last).max(0.0),
            None => 0.0,
        };
        self.last = Some(now_sec);
        FrameTime {
            time: (now_sec - origin).max(0.0) as f32,
            dt: dt as f32,
        }
    }
}

/// Cached output size; reports a change only when the live size differs.
#[derive(Clone, Copy, Debug, Default)]
pub struct Viewport {
    size: Option<(u32, u32)>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the cached size changed (always on the first call).
    /// Zero dimensions are clamped to one pixel.
    pub fn sync(&mut self, width: u32, height: u32) -> bool {
        let next = (width.max(1), height.max(1));
        if self.size == Some(next) {
            return false;
        }
        self.size = Some(next);
        true
    }

    pub fn size(&self) -> (u32, u32) {
        self.size.unwrap_or((1, 1))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Frame {
    pub inputs: FrameInputs,
    pub resized: Option<(u32, u32)>,
}

/// Owns the cross-frame state and writes it exactly once per frame.
#[derive(Debug, Default)]
pub struct FrameDriver {
    clock: FrameClock,
    interaction: InteractionState,
    analyzer: FrequencyAnalyzer,
    viewport: Viewport,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut InteractionState {
        &mut self.interaction
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn tick<C: AudioCapture + ?Sized>(
        &mut self,
        now_sec: f64,
        display: (u32, u32),
        capture: Option<&mut C>,
    ) -> Frame {
        let t = self.clock.tick(now_sec);
        let mix = self.interaction.step(t.dt);
        let audio = self.analyzer.poll(capture);
        let resized = self
            .viewport
            .sync(display.0, display.1)
            .then(|| self.viewport.size());
        let (w, h) = self.viewport.size();
        let inputs = FrameInputs {
            time: t.time,
            resolution: Vec2::new(w as f32, h as f32),
            pointer: Vec2::from(self.interaction.pointer_uniform(h as f32)),
            displacement_mix: mix,
            audio,
        };
        Frame { inputs, resized }
    }
}
