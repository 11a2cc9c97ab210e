//! Audio-reactive raymarched metaballs: scene field, lighting, audio bands,
//! interaction smoothing and the session that drives them each frame.

pub mod analyzer;
pub mod constants;
pub mod cpu;
pub mod error;
pub mod frame;
pub mod interaction;
pub mod raymarch;
#[cfg(feature = "gpu")]
pub mod render;
pub mod scene;
pub mod session;
pub mod shader;
pub mod shading;
pub mod spectrum;

pub use analyzer::{AudioBands, AudioCapture, FrequencyAnalyzer};
pub use cpu::CpuFrame;
pub use error::SessionError;
pub use frame::{Frame, FrameDriver, FrameInputs, FrameUniforms, Viewport};
pub use interaction::InteractionState;
pub use session::{CancelToken, FrameLoop, FrameSink, Session, SessionState};
pub use shader::scene_wgsl;
pub use spectrum::SpectrumAnalyser;
