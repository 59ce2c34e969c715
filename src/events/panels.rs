use crate::constants::{ACCESS_INPUT_ID, ACCESS_SUBMIT_ID};
use crate::core::SceneSession;
use crate::dom;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn submit_access_code(
    document: &web::Document,
    session: &Rc<RefCell<SceneSession>>,
    canvas: &web::HtmlCanvasElement,
) {
    let Some(value) = dom::input_value(document, ACCESS_INPUT_ID) else {
        return;
    };
    let outcome = session.borrow_mut().submit_access_code(&value);
    log::info!("[panel] access outcome={:?}", outcome);
    dom::clear_input(document, ACCESS_INPUT_ID);
    overlay::flush(session, canvas);
}

/// Close buttons (`[data-close-panel]`) and the access-code form.
pub fn wire_panel_controls(session: Rc<RefCell<SceneSession>>, canvas: web::HtmlCanvasElement) {
    let Some(document) = dom::window_document() else {
        return;
    };

    for (button, panel) in dom::close_buttons(&document) {
        let session = session.clone();
        let canvas = canvas.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            session.borrow_mut().close_panel(&panel);
            overlay::flush(&session, &canvas);
        }) as Box<dyn FnMut()>);
        _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let doc = document.clone();
        let session = session.clone();
        let canvas = canvas.clone();
        dom::add_click_listener(&document, ACCESS_SUBMIT_ID, move || {
            submit_access_code(&doc, &session, &canvas);
        });
    }

    if let Some(input) = document.get_element_by_id(ACCESS_INPUT_ID) {
        let doc = document.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            if ev.key() == "Enter" {
                ev.prevent_default();
                submit_access_code(&doc, &session, &canvas);
            }
        }) as Box<dyn FnMut(_)>);
        _ = input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
