//! Session lifecycle: renderer, audio capture and frame loop under one owner.

use crate::analyzer::AudioCapture;
use crate::frame::{Frame, FrameDriver, FrameInputs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Something that can present a frame: the GPU program or the CPU reference.
pub trait FrameSink {
    fn resize(&mut self, width: u32, height: u32);
    fn submit(&mut self, inputs: &FrameInputs) -> anyhow::Result<()>;
}

#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Handle to a repeating per-refresh task. Cancelling is synchronous and idempotent.
pub struct FrameLoop {
    token: CancelToken,
    on_cancel: Option<Box<dyn FnOnce()>>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            token: CancelToken::default(),
            on_cancel: None,
        }
    }

    /// `on_cancel` runs once, on the first `cancel`, to drop the pending callback.
    pub fn with_canceller(on_cancel: impl FnOnce() + 'static) -> Self {
        Self {
            token: CancelToken::default(),
            on_cancel: Some(Box::new(on_cancel)),
        }
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn cancel(&mut self) {
        if self.token.0.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(f) = self.on_cancel.take() {
            f();
        }
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Closed,
}

/// Explicit owner of everything that lives for the session.
///
/// A session built without a renderer (the program failed to build) still
/// tracks input but never draws.
pub struct Session<R: FrameSink> {
    driver: FrameDriver,
    renderer: Option<R>,
    audio: Option<Box<dyn AudioCapture>>,
    frame_loop: Option<FrameLoop>,
    state: SessionState,
}

impl<R: FrameSink> Session<R> {
    pub fn new(renderer: Option<R>) -> Self {
        if renderer.is_none() {
            log::warn!("[session] no renderer; frames will not be drawn");
        }
        Self {
            driver: FrameDriver::new(),
            renderer,
            audio: None,
            frame_loop: None,
            state: SessionState::Running,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio.is_some()
    }

    /// Install a capture, closing any previous one. Ignored once closed.
    pub fn attach_audio(&mut self, mut capture: Box<dyn AudioCapture>) {
        if !self.is_running() {
            capture.close();
            return;
        }
        if let Some(mut old) = self.audio.replace(capture) {
            old.close();
        }
        log::info!("[session] audio capture attached");
    }

    /// Adopt the host's frame loop; a closed session cancels it immediately.
    pub fn set_frame_loop(&mut self, mut frame_loop: FrameLoop) {
        if !self.is_running() {
            frame_loop.cancel();
            return;
        }
        if let Some(mut old) = self.frame_loop.replace(frame_loop) {
            old.cancel();
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.driver.interaction_mut().pointer_moved(x, y);
    }

    pub fn pointer_down(&mut self) {
        self.driver.interaction_mut().pointer_down();
    }

    pub fn pointer_up(&mut self) {
        self.driver.interaction_mut().pointer_up();
    }

    /// Run one frame. Never fails: sink errors are logged and the frame dropped.
    pub fn frame(&mut self, now_sec: f64, display: (u32, u32)) -> Option<Frame> {
        if !self.is_running() {
            return None;
        }
        let frame = self
            .driver
            .tick(now_sec, display, self.audio.as_deref_mut());
        if let Some(r) = self.renderer.as_mut() {
            if let Some((w, h)) = frame.resized {
                log::debug!("[viewport] {}x{}", w, h);
                r.resize(w, h);
            }
            if let Err(e) = r.submit(&frame.inputs) {
                log::warn!("[frame] submit failed: {:?}", e);
            }
        }
        Some(frame)
    }

    /// Stop the loop, release the capture and drop the renderer. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(mut l) = self.frame_loop.take() {
            l.cancel();
        }
        if let Some(mut a) = self.audio.take() {
            a.close();
        }
        self.renderer = None;
        if self.state == SessionState::Running {
            self.state = SessionState::Closed;
            log::info!("[session] shut down");
        }
    }
}

impl<R: FrameSink> Drop for Session<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
