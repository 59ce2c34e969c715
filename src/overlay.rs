use crate::audio;
use crate::constants::ACCESS_STATUS_ID;
use crate::core::{SceneSession, UiCommand};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

fn request_capture(canvas: &web::HtmlCanvasElement) {
    canvas.request_pointer_lock();
}

fn release_capture(document: &web::Document) {
    if document.pointer_lock_element().is_some() {
        document.exit_pointer_lock();
    }
}

pub fn apply(document: &web::Document, canvas: &web::HtmlCanvasElement, cmd: &UiCommand) {
    match cmd {
        UiCommand::Show(id) => dom::show(document, id),
        UiCommand::Hide(id) => dom::hide(document, id),
        UiCommand::SetText { id, text } => {
            _ = dom::set_text(document, id, text);
        }
        UiCommand::PlayCue {
            cue,
            looped,
            volume,
        } => audio::play(document, *cue, *looped, *volume),
        UiCommand::StopCue(cue) => audio::stop(document, *cue),
        UiCommand::RequestCapture => request_capture(canvas),
        UiCommand::ReleaseCapture => release_capture(document),
        UiCommand::AccessStatus(message) => {
            if !dom::set_text(document, ACCESS_STATUS_ID, message) {
                if let Some(w) = web::window() {
                    _ = w.alert_with_message(message);
                }
            }
        }
    }
}

/// Drain the session's queued commands and perform them on the page.
pub fn flush(session: &Rc<RefCell<SceneSession>>, canvas: &web::HtmlCanvasElement) {
    let commands = session.borrow_mut().drain_commands();
    if commands.is_empty() {
        return;
    }
    let Some(document) = dom::window_document() else {
        return;
    };
    for cmd in &commands {
        apply(&document, canvas, cmd);
    }
}
