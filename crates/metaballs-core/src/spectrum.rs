//! Byte-spectrum analyser for capture backends that deliver raw PCM.
//!
//! Mirrors what a browser `AnalyserNode` reports from `getByteFrequencyData`:
//! Blackman window, FFT, magnitude / N, exponential smoothing over time and a
//! decibel window mapped onto `[0, 1]`.

use crate::constants::{ANALYSER_FFT_SIZE, ANALYSER_MAX_DB, ANALYSER_MIN_DB, ANALYSER_SMOOTHING};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

pub struct SpectrumAnalyser {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    normalized: Vec<f32>,
    smoothing: f32,
    min_db: f32,
    max_db: f32,
}

impl SpectrumAnalyser {
    pub fn new(fft_size: usize) -> Self {
        let fft_size = fft_size.max(2);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        let bins = fft_size / 2;
        Self {
            fft,
            window: (0..fft_size).map(|i| blackman(i, fft_size)).collect(),
            scratch: vec![Complex::new(0.0, 0.0); fft_size],
            smoothed: vec![0.0; bins],
            normalized: vec![0.0; bins],
            smoothing: ANALYSER_SMOOTHING,
            min_db: ANALYSER_MIN_DB,
            max_db: ANALYSER_MAX_DB,
        }
    }

    pub fn fft_size(&self) -> usize {
        self.window.len()
    }

    pub fn bin_count(&self) -> usize {
        self.smoothed.len()
    }

    /// Latest normalized spectrum, without recomputing.
    pub fn spectrum(&self) -> &[f32] {
        &self.normalized
    }

    /// Analyse the most recent `fft_size` samples (zero-padded at the front
    /// when fewer are available) and return the normalized spectrum.
    pub fn process(&mut self, samples: &[f32]) -> &[f32] {
        let n = self.fft_size();
        let take = samples.len().min(n);
        let pad = n - take;
        let recent = &samples[samples.len() - take..];
        for (i, slot) in self.scratch.iter_mut().enumerate() {
            let s = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(s * self.window[i], 0.0);
        }
        self.fft.process(&mut self.scratch);

        let inv_n = 1.0 / n as f32;
        let span = self.max_db - self.min_db;
        for k in 0..self.bin_count() {
            let mag = self.scratch[k].norm() * inv_n;
            let s = self.smoothing * self.smoothed[k] + (1.0 - self.smoothing) * mag;
            self.smoothed[k] = if s.is_finite() { s } else { 0.0 };
            let db = if self.smoothed[k] > 0.0 {
                20.0 * self.smoothed[k].log10()
            } else {
                f32::NEG_INFINITY
            };
            self.normalized[k] = ((db - self.min_db) / span).clamp(0.0, 1.0);
        }
        &self.normalized
    }
}

impl Default for SpectrumAnalyser {
    fn default() -> Self {
        Self::new(ANALYSER_FFT_SIZE)
    }
}

/// Blackman window with the classic a0=0.42, a1=0.5, a2=0.08 weights.
pub fn blackman(index: usize, size: usize) -> f32 {
    let x = index as f32 / size as f32;
    0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blackman_window_shape() {
        let size = 512;
        assert!(blackman(0, size).abs() < 1e-4);
        assert!((blackman(size / 2, size) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn silence_maps_to_zero() {
        let mut a = SpectrumAnalyser::default();
        let out = a.process(&vec![0.0; ANALYSER_FFT_SIZE]);
        assert_eq!(out.len(), ANALYSER_FFT_SIZE / 2);
        assert!(out.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn tone_lights_up_its_bin() {
        let mut a = SpectrumAnalyser::default();
        let n = a.fft_size();
        // Exactly 32 cycles across the window lands on bin 32.
        let tone: Vec<f32> = (0..n)
            .map(|i| 0.01 * (2.0 * PI * 32.0 * i as f32 / n as f32).sin())
            .collect();
        for _ in 0..20 {
            a.process(&tone);
        }
        let out = a.spectrum();
        let peak = out
            .iter()
            .enumerate()
            .fold((0, 0.0f32), |best, (i, v)| if *v > best.1 { (i, *v) } else { best });
        assert_eq!(peak.0, 32);
        assert!(peak.1 > 0.5);
        assert!(out[200] < peak.1);
    }

    #[test]
    fn short_input_is_zero_padded() {
        let mut a = SpectrumAnalyser::new(64);
        let out = a.process(&[0.5; 8]);
        assert_eq!(out.len(), 32);
        assert!(out.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
