use metaballs_core::constants::{
    ANALYSER_FFT_SIZE, ANALYSER_MAX_DB, ANALYSER_MIN_DB, ANALYSER_SMOOTHING,
};
use metaballs_core::analyzer::normalize_bytes;
use metaballs_core::{AudioCapture, SessionError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn unavailable(what: &str, e: JsValue) -> SessionError {
    SessionError::AudioUnavailable(format!("{}: {:?}", what, e))
}

/// Microphone -> MediaStreamAudioSourceNode -> AnalyserNode.
pub struct MicCapture {
    ctx: web::AudioContext,
    stream: web::MediaStream,
    source: web::MediaStreamAudioSourceNode,
    analyser: web::AnalyserNode,
    bytes: Vec<u8>,
    spectrum: Vec<f32>,
    closed: bool,
}

impl MicCapture {
    /// Ask for the microphone. Must run from a user gesture so the context
    /// is allowed to start.
    pub async fn open() -> Result<Self, SessionError> {
        let window = web::window().ok_or_else(|| SessionError::AudioUnavailable("no window".into()))?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| unavailable("mediaDevices", e))?;
        let constraints = web::MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        constraints.set_video(&JsValue::FALSE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| unavailable("getUserMedia", e))?;
        let stream: web::MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| unavailable("getUserMedia", e))?
            .dyn_into()
            .map_err(|e| unavailable("MediaStream", e))?;

        let ctx = match web::AudioContext::new() {
            Ok(c) => c,
            Err(e) => {
                stop_tracks(&stream);
                return Err(unavailable("AudioContext", e));
            }
        };
        if ctx.state() == web::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        let graph = ctx
            .create_media_stream_source(&stream)
            .and_then(|source| ctx.create_analyser().map(|a| (source, a)));
        let (source, analyser) = match graph {
            Ok(g) => g,
            Err(e) => {
                stop_tracks(&stream);
                let _ = ctx.close();
                return Err(unavailable("analyser graph", e));
            }
        };
        analyser.set_fft_size(ANALYSER_FFT_SIZE as u32);
        analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING as f64);
        analyser.set_min_decibels(ANALYSER_MIN_DB as f64);
        analyser.set_max_decibels(ANALYSER_MAX_DB as f64);
        if let Err(e) = source.connect_with_audio_node(&analyser) {
            stop_tracks(&stream);
            let _ = ctx.close();
            return Err(unavailable("connect", e));
        }

        let bins = analyser.frequency_bin_count() as usize;
        log::info!(
            "[audio] microphone open: {} Hz, {} bins",
            ctx.sample_rate(),
            bins
        );
        Ok(Self {
            ctx,
            stream,
            source,
            analyser,
            bytes: vec![0; bins],
            spectrum: vec![0.0; bins],
            closed: false,
        })
    }
}

fn stop_tracks(stream: &web::MediaStream) {
    let tracks: js_sys::Array = stream.get_tracks();
    for t in tracks.iter() {
        if let Ok(track) = t.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}

impl AudioCapture for MicCapture {
    fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate()
    }

    fn spectrum(&mut self) -> &[f32] {
        if self.closed {
            self.spectrum.iter_mut().for_each(|v| *v = 0.0);
            return &self.spectrum;
        }
        self.analyser.get_byte_frequency_data(&mut self.bytes);
        normalize_bytes(&self.bytes, &mut self.spectrum);
        &self.spectrum
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let _ = self.source.disconnect();
        stop_tracks(&self.stream);
        let _ = self.ctx.close();
        log::info!("[audio] microphone released");
    }
}

impl Drop for MicCapture {
    fn drop(&mut self) {
        self.close();
    }
}
