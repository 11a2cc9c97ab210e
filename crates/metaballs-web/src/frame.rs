use crate::dom;
use crate::render::GpuState;
use metaballs_core::{FrameLoop, Session};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedSession = Rc<RefCell<Session<GpuState>>>;

/// Drive `session` from requestAnimationFrame. The returned handle cancels the
/// pending request; the callback itself stays allocated for the page lifetime.
pub fn start_loop(session: &SharedSession, canvas: web::HtmlCanvasElement) -> FrameLoop {
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let frame_loop = {
        let pending = pending.clone();
        FrameLoop::with_canceller(move || {
            if let (Some(id), Some(w)) = (pending.take(), web::window()) {
                let _ = w.cancel_animation_frame(id);
            }
        })
    };
    let token = frame_loop.token();

    let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let session = Rc::downgrade(session);
    let pending_tick = pending.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
        pending_tick.set(None);
        if token.is_cancelled() {
            return;
        }
        let Some(session) = session.upgrade() else {
            return;
        };
        let display = dom::sync_canvas_backing_size(&canvas);
        if let Ok(mut s) = session.try_borrow_mut() {
            s.frame(timestamp_ms / 1000.0, display);
        }
        if token.is_cancelled() {
            return;
        }
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => pending_tick.set(Some(id)),
                Err(e) => log::error!("[frame] requestAnimationFrame: {:?}", e),
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame: {:?}", e),
        }
    }
    frame_loop
}
