//! Reduces a frequency-magnitude snapshot to three band levels.

use crate::constants::{BASS_CUTOFF_HZ, MID_CUTOFF_HZ};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioBands {
    pub bass: f32,
    pub mid: f32,
    pub high: f32,
}

impl AudioBands {
    pub const SILENT: AudioBands = AudioBands {
        bass: 0.0,
        mid: 0.0,
        high: 0.0,
    };

    pub fn to_array(self) -> [f32; 3] {
        [self.bass, self.mid, self.high]
    }
}

/// A live source of normalized frequency magnitudes.
///
/// Implementations hand back whatever snapshot is currently buffered; a source
/// that has not received new audio since the last poll returns stale data.
pub trait AudioCapture {
    fn sample_rate(&self) -> f32;
    /// Magnitudes in `[0, 1]`, index 0 is the lowest frequency bin.
    fn spectrum(&mut self) -> &[f32];
    /// Release the device and any audio graph. Must be safe to call twice.
    fn close(&mut self);
}

/// Bin index for a frequency, as `floor(hz / nyquist * bins)`.
#[inline]
pub fn band_edge(freq_hz: f32, sample_rate: f32, bins: usize) -> usize {
    let nyquist = sample_rate / 2.0;
    if nyquist <= 0.0 {
        return 0;
    }
    (freq_hz / nyquist * bins as f32).floor().max(0.0) as usize
}

/// Average the bins of each band. Bass covers `[0, bass_edge]`, mid
/// `(bass_edge, mid_edge]` and high everything above. Empty bands read 0.
pub fn analyze_bands(sample_rate: f32, magnitudes: &[f32]) -> AudioBands {
    let bins = magnitudes.len();
    if bins == 0 {
        return AudioBands::SILENT;
    }
    let bass_edge = band_edge(BASS_CUTOFF_HZ, sample_rate, bins);
    let mid_edge = band_edge(MID_CUTOFF_HZ, sample_rate, bins);

    let mut sums = [0.0f32; 3];
    let mut counts = [0usize; 3];
    for (i, m) in magnitudes.iter().enumerate() {
        let band = if i <= bass_edge {
            0
        } else if i <= mid_edge {
            1
        } else {
            2
        };
        sums[band] += if m.is_finite() { m.clamp(0.0, 1.0) } else { 0.0 };
        counts[band] += 1;
    }
    let mean = |b: usize| {
        if counts[b] > 0 {
            sums[b] / counts[b] as f32
        } else {
            0.0
        }
    };
    AudioBands {
        bass: mean(0),
        mid: mean(1),
        high: mean(2),
    }
}

/// Scale a byte spectrum (as delivered by a browser analyser) into `out`.
pub fn normalize_bytes(bytes: &[u8], out: &mut [f32]) {
    for (dst, b) in out.iter_mut().zip(bytes) {
        *dst = *b as f32 / 255.0;
    }
}

#[derive(Debug, Default)]
pub struct FrequencyAnalyzer {
    latest: AudioBands,
}

impl FrequencyAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from a fresh snapshot. No smoothing across frames.
    pub fn poll<C: AudioCapture + ?Sized>(&mut self, capture: Option<&mut C>) -> AudioBands {
        self.latest = match capture {
            Some(c) => {
                let sample_rate = c.sample_rate();
                analyze_bands(sample_rate, c.spectrum())
            }
            None => AudioBands::SILENT,
        };
        self.latest
    }

    pub fn latest(&self) -> AudioBands {
        self.latest
    }
}
