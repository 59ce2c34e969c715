use crate::constants::LOADING_SCREEN_ID;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        let (w_px, h_px) = (w_px.max(1), h_px.max(1));
        // Resizing resets the drawing buffer; skip when nothing changed
        if canvas.width() != w_px || canvas.height() != h_px {
            canvas.set_width(w_px);
            canvas.set_height(h_px);
        }
    }
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Inline `display` value used when an element is shown.
fn display_for(id: &str) -> &'static str {
    if id == LOADING_SCREEN_ID {
        "flex"
    } else {
        "block"
    }
}

pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().remove_1("hidden");
        _ = el.set_attribute("style", &format!("display:{}", display_for(id)));
    }
}

pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}

pub fn set_text(document: &web::Document, id: &str, text: &str) -> bool {
    match document.get_element_by_id(id) {
        Some(el) => {
            el.set_text_content(Some(text));
            true
        }
        None => false,
    }
}

/// `(button, panel id)` pairs for every `[data-close-panel]` element.
pub fn close_buttons(document: &web::Document) -> Vec<(web::Element, String)> {
    let mut out = Vec::new();
    let Ok(nodes) = document.query_selector_all("[data-close-panel]") else {
        return out;
    };
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        if let Some(panel) = el.get_attribute("data-close-panel") {
            out.push((el, panel));
        }
    }
    out
}

pub fn input_value(document: &web::Document, id: &str) -> Option<String> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
        .map(|input| input.value())
}

pub fn clear_input(document: &web::Document, id: &str) {
    if let Some(input) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        input.set_value("");
    }
}

pub fn is_mobile_user_agent() -> bool {
    web::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .map(|ua| {
            ["iPhone", "iPad", "iPod", "Android"]
                .iter()
                .any(|needle| ua.to_ascii_lowercase().contains(&needle.to_ascii_lowercase()))
        })
        .unwrap_or(false)
}
