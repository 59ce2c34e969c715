use crate::core::{pixel_to_ndc, SceneSession};
use crate::input::{self, TouchTracker};
use crate::overlay;
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub session: Rc<RefCell<SceneSession>>,
    pub touch: Rc<RefCell<TouchTracker>>,
    pub mobile: bool,
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_click(&w);
    wire_mousemove(&w);
    wire_pointer_lock_change(&w);
    if w.mobile {
        wire_touch(&w);
    }
}

fn targets_canvas(target: Option<web::EventTarget>, canvas: &web::HtmlCanvasElement) -> bool {
    target
        .map(|t| js_sys::Object::is(&t, canvas))
        .unwrap_or(false)
}

/// Client coordinates to NDC over the canvas' CSS box.
fn client_ndc(canvas: &web::HtmlCanvasElement, client: Vec2) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let local = input::client_to_local(client, Vec2::new(rect.left() as f32, rect.top() as f32));
    pixel_to_ndc(local.x, local.y, rect.width() as f32, rect.height() as f32)
}

fn click_at(w: &PointerWiring, on_canvas: bool, client: Vec2) {
    let ndc = client_ndc(&w.canvas, client);
    w.session
        .borrow_mut()
        .on_click(on_canvas, ndc, Instant::now());
    overlay::flush(&w.session, &w.canvas);
}

fn wire_click(w: &PointerWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let on_canvas = targets_canvas(ev.target(), &w.canvas);
        let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        click_at(&w, on_canvas, client);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_mousemove(w: &PointerWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let session = w.session.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        session
            .borrow_mut()
            .on_look_delta(ev.movement_x() as f32, ev.movement_y() as f32);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointer_lock_change(w: &PointerWiring) {
    let Some(document) = crate::dom::window_document() else {
        return;
    };
    let w = w.clone();
    let doc = document.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        let captured = doc
            .pointer_lock_element()
            .map(|el| js_sys::Object::is(&el, &w.canvas))
            .unwrap_or(false);
        w.session.borrow_mut().on_capture_changed(captured);
        overlay::flush(&w.session, &w.canvas);
    }) as Box<dyn FnMut()>);
    _ = document
        .add_event_listener_with_callback("pointerlockchange", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn first_touch(list: &web::TouchList) -> Option<Vec2> {
    list.item(0)
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
}

fn add_active_listener(window: &web::Window, event: &str, closure: &js_sys::Function) {
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        event, closure, &opts,
    );
}

fn wire_touch(w: &PointerWiring) {
    let Some(window) = web::window() else {
        return;
    };

    let touch = w.touch.clone();
    let start = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        if let Some(at) = first_touch(&ev.touches()) {
            touch.borrow_mut().begin(at);
        }
    }) as Box<dyn FnMut(_)>);
    add_active_listener(&window, "touchstart", start.as_ref().unchecked_ref());
    start.forget();

    let wm = w.clone();
    let moved = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        let Some(at) = first_touch(&ev.touches()) else {
            return;
        };
        let Some(delta) = wm.touch.borrow_mut().move_to(at) else {
            return;
        };
        ev.prevent_default();
        wm.session.borrow_mut().on_touch_look(delta.x, delta.y);
    }) as Box<dyn FnMut(_)>);
    add_active_listener(&window, "touchmove", moved.as_ref().unchecked_ref());
    moved.forget();

    let we = w.clone();
    let end = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        let Some(at) = first_touch(&ev.changed_touches()) else {
            return;
        };
        let tap = we.touch.borrow_mut().end(at);
        let on_canvas = targets_canvas(ev.target(), &we.canvas);
        if let (Some(at), true) = (tap, on_canvas) {
            // Taps on the canvas stand in for clicks; suppress the emulated one
            ev.prevent_default();
            click_at(&we, on_canvas, at);
        }
    }) as Box<dyn FnMut(_)>);
    add_active_listener(&window, "touchend", end.as_ref().unchecked_ref());
    end.forget();
}
