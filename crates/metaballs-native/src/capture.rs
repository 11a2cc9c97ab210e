//! Microphone capture: cpal callback -> lock-free ring -> spectrum analyser.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat};
use metaballs_core::{AudioCapture, SessionError, SpectrumAnalyser};
use ringbuf::traits::{Consumer as _, Producer as _, Split as _};
use ringbuf::HeapRb;
use std::collections::VecDeque;

fn unavailable(what: &str, e: impl std::fmt::Display) -> SessionError {
    SessionError::AudioUnavailable(format!("{}: {}", what, e))
}

pub struct MicCapture {
    stream: Option<cpal::Stream>,
    cons: ringbuf::HeapCons<f32>,
    recent: VecDeque<f32>,
    analyser: SpectrumAnalyser,
    sample_rate: f32,
}

impl MicCapture {
    pub fn open() -> Result<Self, SessionError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| SessionError::AudioUnavailable("no default input device".into()))?;
        let supported = device
            .default_input_config()
            .map_err(|e| unavailable("default input config", e))?;
        let sample_rate_hz = supported.sample_rate().0;
        let channels = supported.channels() as usize;
        let config: cpal::StreamConfig = supported.clone().into();

        // About half a second of mono samples; the analyser only reads the tail.
        let rb = HeapRb::<f32>::new((sample_rate_hz as usize / 2).max(1024));
        let (mut prod, cons) = rb.split();

        let err_fn = |err| log::warn!("[audio] input stream error: {err}");
        let stream = match supported.sample_format() {
            SampleFormat::F32 => device.build_input_stream(
                &config,
                move |data: &[f32], _| push_interleaved(data, channels, &mut prod),
                err_fn,
                None,
            ),
            SampleFormat::I16 => device.build_input_stream(
                &config,
                move |data: &[i16], _| push_interleaved(data, channels, &mut prod),
                err_fn,
                None,
            ),
            SampleFormat::U16 => device.build_input_stream(
                &config,
                move |data: &[u16], _| push_interleaved(data, channels, &mut prod),
                err_fn,
                None,
            ),
            fmt => {
                return Err(SessionError::AudioUnavailable(format!(
                    "unsupported sample format: {fmt:?}"
                )))
            }
        }
        .map_err(|e| unavailable("build input stream", e))?;
        stream.play().map_err(|e| unavailable("start input stream", e))?;

        let analyser = SpectrumAnalyser::default();
        log::info!(
            "[audio] microphone open: {} Hz, {} ch, {} bins",
            sample_rate_hz,
            channels,
            analyser.bin_count()
        );
        Ok(Self {
            stream: Some(stream),
            cons,
            recent: VecDeque::with_capacity(analyser.fft_size()),
            analyser,
            sample_rate: sample_rate_hz as f32,
        })
    }
}

fn push_interleaved<T: Sample<Float = f32> + Copy>(
    data: &[T],
    channels: usize,
    prod: &mut ringbuf::HeapProd<f32>,
) {
    for frame in data.chunks(channels.max(1)) {
        let mut acc = 0.0f32;
        for s in frame {
            acc += (*s).to_float_sample();
        }
        let _ = prod.try_push(acc / frame.len() as f32);
    }
}

impl AudioCapture for MicCapture {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Drains whatever arrived since the last frame; with nothing new the
    /// analyser re-runs on the same window.
    fn spectrum(&mut self) -> &[f32] {
        if self.stream.is_none() {
            return self.analyser.spectrum();
        }
        let keep = self.analyser.fft_size();
        while let Some(s) = self.cons.try_pop() {
            if self.recent.len() == keep {
                self.recent.pop_front();
            }
            self.recent.push_back(s);
        }
        self.analyser.process(self.recent.make_contiguous())
    }

    fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.pause();
            drop(stream);
            log::info!("[audio] microphone released");
        }
    }
}

impl Drop for MicCapture {
    fn drop(&mut self) {
        self.close();
    }
}
