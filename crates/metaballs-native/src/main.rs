use std::sync::Arc;
use std::time::Instant;
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use metaballs_core::render::SurfaceRenderer;
use metaballs_core::Session;

mod capture;

fn enable_audio(session: &mut Session<SurfaceRenderer<'static>>) {
    if session.audio_enabled() {
        return;
    }
    match capture::MicCapture::open() {
        Ok(mic) => session.attach_audio(Box::new(mic)),
        Err(e) => log::warn!("[audio] {} (press M to retry)", e),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("audio-metaballs")
            .with_inner_size(winit::dpi::LogicalSize::new(960.0, 640.0))
            .build(&event_loop)?,
    );

    let size = window.inner_size();
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window.clone())?;
    let renderer = match pollster::block_on(SurfaceRenderer::new(
        &instance,
        surface,
        size.width,
        size.height,
    )) {
        Ok(r) => r,
        Err(e) => {
            log::error!("{}", e);
            return Err(e.into());
        }
    };
    let mut session = Session::new(Some(renderer));
    log::info!("metaballs-native running; M enables the microphone, Esc quits");

    let start = Instant::now();
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                session.shutdown();
                elwt.exit();
            }
            WindowEvent::CursorMoved { position, .. } => {
                session.pointer_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => session.pointer_down(),
                ElementState::Released => session.pointer_up(),
            },
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Escape) => {
                    session.shutdown();
                    elwt.exit();
                }
                Key::Character(c) if c.eq_ignore_ascii_case("m") => enable_audio(&mut session),
                _ => {}
            },
            _ => {}
        },
        Event::AboutToWait => {
            if !session.is_running() {
                return;
            }
            let size = window.inner_size();
            session.frame(start.elapsed().as_secs_f64(), (size.width, size.height));
        }
        _ => {}
    })?;
    Ok(())
}
