use viz_core::LayoutBox;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("no element with id #{id}"))?
        .dyn_into::<T>()
        .map_err(|_| anyhow::anyhow!("#{id} has an unexpected element type"))
}

/// CSS layout box of an element, or `None` once it left the document.
pub fn layout_box(el: &web::Element) -> Option<LayoutBox> {
    if !el.is_connected() {
        return None;
    }
    let rect = el.get_bounding_client_rect();
    Some(LayoutBox::new(rect.width(), rect.height()))
}

/// A registered DOM listener; dropping it unregisters the callback.
pub struct EventListener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                event,
                closure,
            }),
            Err(e) => {
                log::error!("[dom] add {event} listener failed: {:?}", e);
                None
            }
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// `ResizeObserver` on one element; disconnects on drop. Catches container
/// resizes that never reach the window `resize` event.
pub struct ResizeWatch {
    observer: web::ResizeObserver,
    _closure: Closure<dyn FnMut(js_sys::Array, web::ResizeObserver)>,
}

impl ResizeWatch {
    pub fn new(target: &web::Element, mut handler: impl FnMut() + 'static) -> Option<Self> {
        let closure = Closure::wrap(Box::new(move |_entries: js_sys::Array, _obs: web::ResizeObserver| {
            handler()
        }) as Box<dyn FnMut(js_sys::Array, web::ResizeObserver)>);
        match web::ResizeObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(target);
                Some(Self {
                    observer,
                    _closure: closure,
                })
            }
            Err(e) => {
                log::warn!("[dom] ResizeObserver unavailable: {:?}", e);
                None
            }
        }
    }
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
