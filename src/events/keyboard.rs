use crate::core::SceneSession;
use crate::overlay;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Typing into a form field must not steer the camera.
fn from_text_input(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        .is_some()
}

pub fn handle_keydown(
    ev: &web::KeyboardEvent,
    session: &Rc<RefCell<SceneSession>>,
    canvas: &web::HtmlCanvasElement,
) {
    if from_text_input(ev) {
        return;
    }
    let code = ev.code();
    let key = ev.key();
    let outcome = session
        .borrow_mut()
        .on_key_down(&code, &key, ev.ctrl_key(), Instant::now());
    if outcome.prevent_default {
        ev.prevent_default();
    }
    overlay::flush(session, canvas);
}

pub fn handle_keyup(ev: &web::KeyboardEvent, session: &Rc<RefCell<SceneSession>>) {
    session.borrow_mut().on_key_up(&ev.code());
}

pub fn wire_keyboard(session: Rc<RefCell<SceneSession>>, canvas: web::HtmlCanvasElement) {
    let Some(document) = crate::dom::window_document() else {
        return;
    };
    let session_down = session.clone();
    let keydown = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keydown(&ev, &session_down, &canvas);
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
    keydown.forget();

    let keyup = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keyup(&ev, &session);
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());
    keyup.forget();
}
