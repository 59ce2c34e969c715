use crate::core::CueId;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn cue_element(document: &web::Document, cue: CueId) -> Option<web::HtmlAudioElement> {
    document
        .get_element_by_id(cue.element_id())
        .and_then(|el| el.dyn_into::<web::HtmlAudioElement>().ok())
}

/// Restart a cue from the beginning. Autoplay rejections are logged and
/// otherwise ignored.
pub fn play(document: &web::Document, cue: CueId, looped: bool, volume: f32) {
    let Some(audio) = cue_element(document, cue) else {
        log::debug!("[audio] no element for {:?}", cue);
        return;
    };
    audio.set_loop(looped);
    audio.set_volume(volume.clamp(0.0, 1.0) as f64);
    audio.set_current_time(0.0);
    match audio.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("[audio] play {:?} rejected: {:?}", cue, e);
            }
        }),
        Err(e) => log::warn!("[audio] play {:?} failed: {:?}", cue, e),
    }
}

pub fn stop(document: &web::Document, cue: CueId) {
    if let Some(audio) = cue_element(document, cue) {
        _ = audio.pause();
        audio.set_current_time(0.0);
    }
}
