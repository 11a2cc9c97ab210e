// Band reduction over byte and float spectra.

use metaballs_core::analyzer::{analyze_bands, band_edge, normalize_bytes, FrequencyAnalyzer};
use metaballs_core::{AudioBands, AudioCapture};

struct MockCapture {
    sample_rate: f32,
    bins: Vec<f32>,
    closed: u32,
}

impl AudioCapture for MockCapture {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
    fn spectrum(&mut self) -> &[f32] {
        &self.bins
    }
    fn close(&mut self) {
        self.closed += 1;
    }
}

#[test]
fn band_edges_at_48k_with_256_bins() {
    // nyquist 24000: 250 / 24000 * 256 = 2.67, 4000 / 24000 * 256 = 42.67
    assert_eq!(band_edge(250.0, 48_000.0, 256), 2);
    assert_eq!(band_edge(4000.0, 48_000.0, 256), 42);
}

#[test]
fn full_scale_bytes_saturate_every_band() {
    let mut unit = vec![0.0f32; 256];
    normalize_bytes(&[255u8; 256], &mut unit);
    let bands = analyze_bands(48_000.0, &unit);
    assert!((bands.bass - 1.0).abs() < 1e-6);
    assert!((bands.mid - 1.0).abs() < 1e-6);
    assert!((bands.high - 1.0).abs() < 1e-6);
}

#[test]
fn silence_reads_zero() {
    let mut unit = vec![0.5f32; 256];
    normalize_bytes(&[0u8; 256], &mut unit);
    assert_eq!(analyze_bands(48_000.0, &unit), AudioBands::SILENT);
    assert_eq!(analyze_bands(48_000.0, &[]), AudioBands::SILENT);
}

#[test]
fn energy_lands_in_its_band() {
    let mut bins = vec![0.0f32; 256];
    for b in bins.iter_mut().take(3) {
        *b = 0.9;
    }
    let bands = analyze_bands(48_000.0, &bins);
    assert!((bands.bass - 0.9).abs() < 1e-6);
    assert_eq!(bands.mid, 0.0);
    assert_eq!(bands.high, 0.0);

    let mut bins = vec![0.0f32; 256];
    bins[200] = 1.0;
    let bands = analyze_bands(48_000.0, &bins);
    assert_eq!(bands.bass, 0.0);
    assert_eq!(bands.mid, 0.0);
    assert!(bands.high > 0.0 && bands.high < 0.01);
}

#[test]
fn out_of_range_magnitudes_are_clamped() {
    let bins = vec![2.0f32; 16];
    let bands = analyze_bands(48_000.0, &bins);
    assert!(bands.bass <= 1.0 && bands.mid <= 1.0 && bands.high <= 1.0);
    let bins = vec![-1.0f32; 16];
    assert_eq!(analyze_bands(48_000.0, &bins), AudioBands::SILENT);
}

#[test]
fn tiny_spectra_stay_finite() {
    let bands = analyze_bands(8_000.0, &[0.5, 0.5]);
    assert!(bands.bass.is_finite() && bands.mid.is_finite() && bands.high.is_finite());
    // Both bins fall at or below the mid edge, so high has no members.
    assert_eq!(bands.high, 0.0);
}

#[test]
fn analyzer_polls_capture_or_reports_silence() {
    let mut analyzer = FrequencyAnalyzer::new();
    assert_eq!(analyzer.poll(None::<&mut MockCapture>), AudioBands::SILENT);

    let mut capture = MockCapture {
        sample_rate: 48_000.0,
        bins: vec![1.0; 256],
        closed: 0,
    };
    let bands = analyzer.poll(Some(&mut capture));
    assert!((bands.bass - 1.0).abs() < 1e-6);
    assert_eq!(analyzer.latest(), bands);

    // No smoothing: the next snapshot replaces the previous one outright.
    capture.bins = vec![0.0; 256];
    assert_eq!(analyzer.poll(Some(&mut capture)), AudioBands::SILENT);
}

#[test]
fn eight_uniform_bins_at_44k() {
    assert_eq!(band_edge(250.0, 44_100.0, 8), 0);
    assert_eq!(band_edge(4000.0, 44_100.0, 8), 1);
    let bands = analyze_bands(44_100.0, &[1.0; 8]);
    assert_eq!(bands, AudioBands { bass: 1.0, mid: 1.0, high: 1.0 });
}

#[test]
fn byte_scaling_is_one_over_255() {
    let mut unit = [0.0f32; 3];
    normalize_bytes(&[0, 51, 255], &mut unit);
    assert_eq!(unit, [0.0, 0.2, 1.0]);
}

#[test]
fn non_finite_bins_count_as_silence() {
    let mut bins = vec![0.5f32; 8];
    bins[0] = f32::NAN;
    bins[7] = f32::INFINITY;
    let bands = analyze_bands(44_100.0, &bins);
    for v in bands.to_array() {
        assert!(v.is_finite() && (0.0..=1.0).contains(&v), "{bands:?}");
    }
    // 250 / 22050 * 8 floors to 0, so bass is the NaN bin alone.
    assert_eq!(bands.bass, 0.0);
    assert_eq!(bands.mid, 0.5);

    let bands = analyze_bands(44_100.0, &[f32::NEG_INFINITY; 8]);
    assert_eq!(bands, AudioBands::SILENT);
}
