#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::core::{CueId, SceneSession, SessionConfig, UiCommand};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod core;
mod dom;
mod entry;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// The GPU device went away: tell the visitor and reload the page.
pub(crate) fn on_context_lost() {
    let Some(window) = web::window() else {
        return;
    };
    if let Some(document) = window.document() {
        dom::hide(&document, SCENE_CONTAINER_ID);
        _ = dom::set_text(&document, LOADING_SCREEN_ID, CONTEXT_LOST_MESSAGE);
        dom::show(&document, LOADING_SCREEN_ID);
    }
    let reload = Closure::once_into_js(move || {
        if let Some(w) = web::window() {
            _ = w.location().reload();
        }
    });
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        reload.unchecked_ref(),
        RELOAD_DELAY_MS,
    );
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ritual-space starting");

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
    let mobile = dom::is_mobile_user_agent();
    log::info!("[entry] mobile={}", mobile);

    let entry_canvas = dom::canvas_by_id(&document, ENTRY_CANVAS_ID)?;
    wire_canvas_resize(&entry_canvas);
    let entry_handle = Rc::new(RefCell::new(Some(
        entry::start(entry_canvas, mobile).await,
    )));

    // Only one session is ever built, however many clicks arrive
    static STARTED: AtomicBool = AtomicBool::new(false);
    let doc = document.clone();
    dom::add_click_listener(&document, ENTRY_SCREEN_ID, move || {
        if STARTED.swap(true, Ordering::SeqCst) {
            return;
        }
        let clicked_at = Instant::now();
        audio::play(&doc, CueId::Wow, true, WOW_VOLUME);
        if let Some(handle) = entry_handle.borrow_mut().take() {
            handle.teardown();
        }
        dom::hide(&doc, ENTRY_SCREEN_ID);
        dom::show(&doc, LOADING_SCREEN_ID);
        spawn_local(async move {
            if let Err(e) = start_session(mobile, clicked_at).await {
                log::error!("session init error: {:?}", e);
            }
        });
    });
    Ok(())
}

async fn start_session(mobile: bool, chime_started: Instant) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, RITUAL_CANVAS_ID)?;
    wire_canvas_resize(&canvas);

    let config = SessionConfig {
        mobile,
        ..SessionConfig::default()
    };
    let session = Rc::new(RefCell::new(SceneSession::new(config, Instant::now())));
    session
        .borrow_mut()
        .defer(chime_started, ENTRY_CHIME_MS, UiCommand::StopCue(CueId::Wow));

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        session.clone(),
        canvas.clone(),
        gpu,
    )));

    events::wire_keyboard(session.clone(), canvas.clone());
    events::wire_pointer_handlers(events::PointerWiring {
        canvas: canvas.clone(),
        session: session.clone(),
        touch: Rc::new(RefCell::new(input::TouchTracker::default())),
        mobile,
    });
    events::wire_panel_controls(session.clone(), canvas.clone());

    assets::load_scene_assets(frame_ctx.clone());

    let frame_ctx_tick = frame_ctx.clone();
    frame::start_loop(move || frame_ctx_tick.borrow_mut().frame());
    Ok(())
}
