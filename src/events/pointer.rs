use super::PianoWiring;
use crate::constants::{NOTE_ATTR, NOTE_SELECTOR};
use crate::dom::EventListener;
use crate::fullscreen::BrowserFullscreen;
use wasm_bindgen::JsCast;
use web_sys as web;

fn clicked_element(ev: &web::Event, selector: &str) -> Option<web::Element> {
    ev.target()?
        .dyn_into::<web::Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

/// One delegated click listener on the piano root covers every key.
pub fn wire_note_clicks(root: &web::Element, w: &PianoWiring) -> Option<EventListener> {
    let w = w.clone();
    EventListener::new(root, "click", move |ev: web::Event| {
        let Some(note) = clicked_element(&ev, NOTE_SELECTOR).and_then(|el| el.get_attribute(NOTE_ATTR)) else {
            return;
        };
        w.strike(&note);
    })
}

pub fn wire_fullscreen_toggle(button: &web::Element, fullscreen: &BrowserFullscreen) -> Option<EventListener> {
    let fullscreen = fullscreen.clone();
    EventListener::new(button, "click", move |ev: web::Event| {
        ev.prevent_default();
        let req = fullscreen.toggle();
        log::debug!("[fullscreen] requested {:?}", req);
    })
}
