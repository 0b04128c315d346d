use crate::constants::{FULLSCREEN_CLASS, FULLSCREEN_HINT_SELECTOR, HIDDEN_CLASS};
use web_sys as web;

fn hint(container: &web::Element) -> Option<web::Element> {
    container.query_selector(FULLSCREEN_HINT_SELECTOR).ok().flatten()
}

#[inline]
pub fn show_hint(container: &web::Element) {
    if let Some(el) = hint(container) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
        // fallback for pages without the class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide_hint(container: &web::Element) {
    if let Some(el) = hint(container) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
        _ = el.set_attribute("style", "display:none");
    }
}

/// Mirror the fullscreen flag onto the container class and the exit hint.
pub fn sync_fullscreen(container: &web::Element, is_fullscreen: bool) {
    _ = container
        .class_list()
        .toggle_with_force(FULLSCREEN_CLASS, is_fullscreen);
    if is_fullscreen {
        show_hint(container);
    } else {
        hide_hint(container);
    }
}
