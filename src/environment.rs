use viz_core::environment::{detect, AppEnvironment, EnvironmentConfig, EnvironmentProbe};
use wasm_bindgen::JsValue;
use web_sys as web;

const SDK_GLOBALS: [&str; 3] = ["farcaster", "sdk", "minikit"];

fn global(window: &web::Window, name: &str) -> JsValue {
    js_sys::Reflect::get(window, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED)
}

/// Gather the signals environment detection needs from the live window.
pub fn probe(window: &web::Window) -> EnvironmentProbe {
    let me: &JsValue = window.as_ref();
    let differs = |other: Result<Option<web::Window>, JsValue>| match other {
        Ok(Some(w)) => {
            let w: &JsValue = w.as_ref();
            w != me
        }
        // cross-origin access throws inside frames
        Err(_) => true,
        Ok(None) => false,
    };
    let in_frame = differs(window.parent()) || differs(window.top());
    EnvironmentProbe {
        has_sdk_global: SDK_GLOBALS.iter().any(|name| global(window, name).is_truthy()),
        has_ready_fn: global(window, "ready").is_function(),
        user_agent: window.navigator().user_agent().unwrap_or_default(),
        inner_width: window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0),
        hostname: window.location().hostname().unwrap_or_default(),
        in_frame,
        referrer: window.document().map(|d| d.referrer()).unwrap_or_default(),
    }
}

pub fn current() -> AppEnvironment {
    web::window()
        .map(|w| detect(&probe(&w)))
        .unwrap_or(AppEnvironment::Browser)
}

pub fn log_environment(environment: AppEnvironment) {
    let config = EnvironmentConfig::for_environment(environment);
    log::info!(
        "[env] {} wallet={} features={:?}",
        environment,
        config.wallet_support,
        config.features
    );
}
