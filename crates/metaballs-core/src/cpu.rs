//! CPU reference renderer over the same per-pixel functions as the GPU program.

use crate::frame::FrameInputs;
use crate::session::FrameSink;
use crate::shading::shade_pixel;
use glam::{Vec2, Vec3};

/// RGBA8 image, rows stored top to bottom.
#[derive(Debug, Default)]
pub struct CpuFrame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    frames: u64,
}

impl CpuFrame {
    pub fn new(width: u32, height: u32) -> Self {
        let mut f = Self::default();
        f.resize(width, height);
        f
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Pixel at `(x, y)` with a top-left origin.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    pub fn render(&mut self, inputs: &FrameInputs) {
        let (w, h) = (self.width, self.height);
        for row in 0..h {
            // Shading uses a bottom-left origin; storage is top-down.
            let frag_y = (h - 1 - row) as f32 + 0.5;
            for x in 0..w {
                let col = shade_pixel(Vec2::new(x as f32 + 0.5, frag_y), inputs);
                let i = ((row * w + x) * 4) as usize;
                self.pixels[i..i + 4].copy_from_slice(&to_rgba8(col));
            }
        }
        self.frames += 1;
    }
}

impl FrameSink for CpuFrame {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.pixels = vec![0; (self.width * self.height * 4) as usize];
    }

    fn submit(&mut self, inputs: &FrameInputs) -> anyhow::Result<()> {
        self.render(inputs);
        Ok(())
    }
}

/// Clamp to `[0, 1]` and quantize, the way a unorm target stores color.
pub fn to_rgba8(col: Vec3) -> [u8; 4] {
    let q = |v: f32| {
        let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        (v * 255.0 + 0.5) as u8
    };
    [q(col.x), q(col.y), q(col.z), 255]
}
