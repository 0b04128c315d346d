use std::cell::RefCell;
use std::rc::Rc;
use viz_core::{FullscreenError, FullscreenHost, FullscreenRequest, FullscreenState};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Fullscreen API bridge. Requests are fire-and-forget; the visible flag
/// only changes through `fullscreenchange` in [`BrowserFullscreen::sync`].
#[derive(Clone)]
pub struct BrowserFullscreen {
    document: web::Document,
    container: web::Element,
    state: Rc<RefCell<FullscreenState>>,
}

impl BrowserFullscreen {
    pub fn new(document: web::Document, container: web::Element) -> Self {
        Self {
            document,
            container,
            state: Rc::new(RefCell::new(FullscreenState::new())),
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state.borrow().is_fullscreen()
    }

    pub fn toggle(&self) -> FullscreenRequest {
        let mut state = self.state.borrow_mut();
        state.toggle(self)
    }

    /// Fold the document's fullscreen element into the state; true only when
    /// it is this container.
    pub fn sync(&self) -> bool {
        let element = self.document.fullscreen_element();
        let active: Option<&JsValue> = element.as_ref().map(|el| el.as_ref());
        let owner: &JsValue = self.container.as_ref();
        let mut state = self.state.borrow_mut();
        state.on_owner_change(active, owner);
        state.is_fullscreen()
    }

    pub fn fail(&self, err: &FullscreenError) {
        self.state.borrow_mut().on_request_failed(err);
    }
}

fn describe(e: &JsValue) -> String {
    e.as_string()
        .or_else(|| {
            js_sys::Reflect::get(e, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", e))
}

/// Call a zero-argument method by name; older engines lack the unprefixed API.
fn invoke(target: &JsValue, method: &str) -> Result<JsValue, FullscreenError> {
    let func = js_sys::Reflect::get(target, &JsValue::from_str(method))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
        .ok_or(FullscreenError::Unsupported)?;
    func.call0(target)
        .map_err(|e| FullscreenError::Rejected(describe(&e)))
}

impl FullscreenHost for BrowserFullscreen {
    fn request(&self, request: FullscreenRequest) -> Result<(), FullscreenError> {
        let result = match request {
            FullscreenRequest::Enter => invoke(self.container.as_ref(), "requestFullscreen")?,
            FullscreenRequest::Exit => invoke(self.document.as_ref(), "exitFullscreen")?,
        };
        if let Ok(promise) = result.dyn_into::<js_sys::Promise>() {
            let state = self.state.clone();
            spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    state
                        .borrow_mut()
                        .on_request_failed(&FullscreenError::Rejected(describe(&e)));
                }
            });
        }
        Ok(())
    }
}
