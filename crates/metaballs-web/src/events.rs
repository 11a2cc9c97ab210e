use crate::frame::SharedSession;
use crate::input;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    target: &web::EventTarget,
    name: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Pointer move/down on the canvas, release anywhere in the window.
pub fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, session: &SharedSession) {
    {
        let canvas_move = canvas.clone();
        let s = Rc::downgrade(session);
        listen(canvas, "pointermove", move |ev: web::PointerEvent| {
            let (x, y) = input::pointer_canvas_px(&ev, &canvas_move);
            if let Some(s) = s.upgrade() {
                if let Ok(mut s) = s.try_borrow_mut() {
                    s.pointer_moved(x, y);
                }
            }
        });
    }
    {
        let canvas_down = canvas.clone();
        let s = Rc::downgrade(session);
        listen(canvas, "pointerdown", move |ev: web::PointerEvent| {
            let (x, y) = input::pointer_canvas_px(&ev, &canvas_down);
            if let Some(s) = s.upgrade() {
                if let Ok(mut s) = s.try_borrow_mut() {
                    s.pointer_moved(x, y);
                    s.pointer_down();
                }
            }
        });
    }
    if let Some(window) = web::window() {
        for name in ["pointerup", "pointercancel"] {
            let s = Rc::downgrade(session);
            listen(&window, name, move |_ev: web::PointerEvent| {
                if let Some(s) = s.upgrade() {
                    if let Ok(mut s) = s.try_borrow_mut() {
                        s.pointer_up();
                    }
                }
            });
        }
    }
}

/// Tear the session down when the page is hidden for unload or bfcache.
pub fn wire_pagehide() {
    if let Some(window) = web::window() {
        listen(&window, "pagehide", move |_ev: web::Event| {
            crate::stop();
        });
    }
}
