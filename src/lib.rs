#![cfg(target_arch = "wasm32")]
use viz_core::EffectMode;
use wasm_bindgen::prelude::*;

mod audio;
mod constants;
mod dom;
mod environment;
mod events;
mod frame;
mod fullscreen;
mod overlay;
mod props;
mod render;
mod view;

pub use view::{PianoView, VisualizerView};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("partiture-viz starting");
    environment::log_environment(environment::current());
    Ok(())
}

/// `browser`, `farcaster-web` or `farcaster-mobile`.
#[wasm_bindgen(js_name = detectEnvironment)]
pub fn detect_environment() -> String {
    environment::current().as_str().to_string()
}

/// Effect tags accepted by `VisualizerView.setEffect`.
#[wasm_bindgen(js_name = effectTags)]
pub fn effect_tags() -> js_sys::Array {
    EffectMode::ALL
        .iter()
        .map(|m| JsValue::from_str(m.as_str()))
        .collect()
}

/// `[{ tag, label, description }]` for building an effect picker.
#[wasm_bindgen(js_name = effectCatalog)]
pub fn effect_catalog() -> Result<js_sys::Array, JsValue> {
    let catalog = js_sys::Array::new();
    for mode in EffectMode::ALL {
        let entry = js_sys::Object::new();
        js_sys::Reflect::set(&entry, &"tag".into(), &mode.as_str().into())?;
        js_sys::Reflect::set(&entry, &"label".into(), &mode.label().into())?;
        js_sys::Reflect::set(&entry, &"description".into(), &mode.description().into())?;
        catalog.push(&entry);
    }
    Ok(catalog)
}
