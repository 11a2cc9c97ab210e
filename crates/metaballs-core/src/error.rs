use thiserror::Error;

/// Failures that can occur while bringing a session up.
///
/// Only initialization reports errors; the per-frame path logs and carries on.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no GPU adapter with fragment program support")]
    GpuUnavailable,
    #[error("shader program failed to build: {0}")]
    Program(String),
    #[error("audio capture unavailable: {0}")]
    AudioUnavailable(String),
}

impl SessionError {
    /// Fatal errors end the rendering session; audio errors leave the bands at zero.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SessionError::AudioUnavailable(_))
    }
}
