use metaballs_core::render::SurfaceRenderer;
use metaballs_core::SessionError;
use web_sys as web;

pub type GpuState = SurfaceRenderer<'static>;

/// WebGPU surface on `canvas`. The surface owns its own handle to the
/// element, so no lifetime ties it to the caller.
pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Result<GpuState, SessionError> {
    let instance = wgpu::Instance::default();
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| {
            log::error!("[gpu] create_surface: {:?}", e);
            SessionError::GpuUnavailable
        })?;
    SurfaceRenderer::new(&instance, surface, canvas.width(), canvas.height()).await
}
