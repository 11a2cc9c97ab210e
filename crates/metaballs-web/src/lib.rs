#![cfg(target_arch = "wasm32")]
use frame::SharedSession;
use metaballs_core::Session;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

thread_local! {
    static SESSION: RefCell<Option<SharedSession>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("metaballs-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("#app-canvas is not a canvas"))?;
    dom::sync_canvas_backing_size(&canvas);

    let gpu = match render::init_gpu(&canvas).await {
        Ok(g) => g,
        Err(e) => {
            // Fatal: no session, no loop. Reported once.
            overlay::gpu_failed(&document, &e.to_string());
            return Err(e.into());
        }
    };
    let session: SharedSession = Rc::new(RefCell::new(Session::new(Some(gpu))));

    events::wire_pointer_handlers(&canvas, &session);
    events::wire_pagehide();
    wire_enable_audio(&document, Rc::downgrade(&session));

    let frame_loop = frame::start_loop(&session, canvas);
    session.borrow_mut().set_frame_loop(frame_loop);
    SESSION.with(|s| *s.borrow_mut() = Some(session));
    log::info!("metaballs-web running");
    Ok(())
}

/// The button stays usable after a failure so access can be retried.
fn wire_enable_audio(document: &web::Document, session: Weak<RefCell<Session<render::GpuState>>>) {
    let in_flight = Rc::new(Cell::new(false));
    let doc = document.clone();
    dom::add_click_listener(document, overlay::ENABLE_BUTTON_ID, move || {
        if in_flight.replace(true) {
            return;
        }
        let in_flight = in_flight.clone();
        let session = session.clone();
        let doc = doc.clone();
        spawn_local(async move {
            match audio::MicCapture::open().await {
                Ok(capture) => {
                    if let Some(s) = session.upgrade() {
                        s.borrow_mut().attach_audio(Box::new(capture));
                        overlay::audio_enabled(&doc);
                    }
                }
                Err(e) => {
                    log::warn!("[audio] {}", e);
                    overlay::audio_failed(&doc);
                }
            }
            in_flight.set(false);
        });
    });
}

/// Stop rendering and release the microphone. Safe to call more than once.
#[wasm_bindgen]
pub fn stop() {
    let session = SESSION.with(|s| s.borrow_mut().take());
    if let Some(session) = session {
        if let Ok(mut s) = session.try_borrow_mut() {
            s.shutdown();
        }
    }
}
