use super::PianoWiring;
use crate::dom::EventListener;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn is_modified(ev: &web::KeyboardEvent) -> bool {
    ev.ctrl_key() || ev.meta_key() || ev.alt_key()
}

fn typing_in_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}

/// Computer keyboard to piano: the home row plays white keys, the row
/// above plays sharps.
pub fn wire_piano_keys(window: &web::Window, w: &PianoWiring) -> Option<EventListener> {
    let w = w.clone();
    EventListener::new(window, "keydown", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        if ev.repeat() || is_modified(ev) || typing_in_field(ev) {
            return;
        }
        let note = match w.keyboard.for_computer_key(&ev.key()) {
            Some(k) => k.note.clone(),
            None => return,
        };
        if w.strike_held(&note) {
            ev.prevent_default();
        }
    })
}
