use crate::audio;
use crate::constants::{
    ATTR_EFFECT, ATTR_PLAYING, ATTR_SEED, ATTR_TRACK, CANVAS_SELECTOR, FULLSCREEN_TOGGLE_SELECTOR,
    PRESS_SWEEP_MS,
};
use crate::dom::{self, EventListener, ResizeWatch};
use crate::events::{self, PianoWiring};
use crate::frame::{BrowserHost, BrowserTask};
use crate::fullscreen::BrowserFullscreen;
use crate::overlay;
use crate::props::ContainerAttrs;
use crate::render::CanvasSurface;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use viz_core::piano::{Keyboard, NoteEnvelope, PianoState};
use viz_core::{Cadence, EffectMode, FullscreenError, Running, TaskHost, Visualizer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

fn js_err(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

fn read_attrs(el: &web::Element) -> ContainerAttrs {
    ContainerAttrs {
        effect: el.get_attribute(ATTR_EFFECT),
        playing: el.get_attribute(ATTR_PLAYING),
        seed: el.get_attribute(ATTR_SEED),
        track: el.get_attribute(ATTR_TRACK),
    }
}

fn find_or_create_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    if let Ok(Some(el)) = container.query_selector(CANVAS_SELECTOR) {
        return el
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|_| anyhow::anyhow!("canvas selector matched a non-canvas element"));
    }
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("created element is not a canvas"))?;
    _ = canvas.set_attribute("style", "width:100%;height:100%;display:block");
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

struct MountedVisualizer {
    visualizer: Visualizer,
    host: BrowserHost,
    running: Option<Running<BrowserTask>>,
    fullscreen: BrowserFullscreen,
    listeners: Vec<EventListener>,
    resize_watch: Option<ResizeWatch>,
}

impl Drop for MountedVisualizer {
    fn drop(&mut self) {
        self.listeners.clear();
        self.resize_watch = None;
        if let Some(running) = self.running.take() {
            self.visualizer.stop(&self.host, running);
        }
    }
}

fn mount_visualizer(container_id: &str) -> anyhow::Result<MountedVisualizer> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container: web::Element = dom::element_by_id(&document, container_id)?;
    let attrs = read_attrs(&container);

    let canvas = find_or_create_canvas(&document, &container)?;
    let observed: web::Element = canvas.clone().into();
    let surface = Rc::new(RefCell::new(CanvasSurface::new(canvas)?));
    if let Err(e) = surface.borrow_mut().sync_backing_size() {
        log::debug!("[viz] initial sizing deferred: {}", e);
    }

    let visualizer = Visualizer::new(attrs.config(), attrs.props());
    let host = BrowserHost::new(window.clone());
    let running = visualizer
        .start(&host, surface.clone())
        .map_err(|e| anyhow::anyhow!("visualizer start failed: {e}"))?;

    let fullscreen = BrowserFullscreen::new(document.clone(), container.clone());
    let mut listeners = Vec::new();

    let surface_resize = surface.clone();
    listeners.extend(EventListener::new(&window, "resize", move |_| {
        if let Err(e) = surface_resize.borrow_mut().sync_backing_size() {
            log::debug!("[viz] resize skipped: {}", e);
        }
    }));

    let surface_observed = surface.clone();
    let resize_watch = ResizeWatch::new(&observed, move || {
        // the frame loop may hold the surface; its own refresh covers that case
        if let Ok(mut s) = surface_observed.try_borrow_mut() {
            if let Err(e) = s.sync_backing_size() {
                log::debug!("[viz] observed resize skipped: {}", e);
            }
        }
    });

    let fs_change = fullscreen.clone();
    let surface_fs = surface.clone();
    let container_fs = container.clone();
    listeners.extend(EventListener::new(&document, "fullscreenchange", move |_| {
        let active = fs_change.sync();
        overlay::sync_fullscreen(&container_fs, active);
        _ = surface_fs.borrow_mut().sync_backing_size();
    }));

    let fs_error = fullscreen.clone();
    listeners.extend(EventListener::new(&document, "fullscreenerror", move |_| {
        fs_error.fail(&FullscreenError::Rejected("fullscreenerror event".into()));
    }));

    if let Ok(Some(button)) = container.query_selector(FULLSCREEN_TOGGLE_SELECTOR) {
        listeners.extend(events::wire_fullscreen_toggle(&button, &fullscreen));
    }
    overlay::sync_fullscreen(&container, false);

    let props = visualizer.props();
    log::info!(
        "[viz] mounted #{} effect={} playing={}",
        container_id,
        props.effect.map(EffectMode::as_str).unwrap_or("none"),
        props.is_playing
    );
    Ok(MountedVisualizer {
        visualizer,
        host,
        running: Some(running),
        fullscreen,
        listeners,
        resize_watch,
    })
}

/// Audio-reactive canvas bound to a container element.
///
/// Initial props come from the container's `data-*` attributes; the
/// page updates them through the setters. Dropping or unmounting stops
/// both loops and removes every listener.
#[wasm_bindgen]
pub struct VisualizerView {
    mounted: Option<MountedVisualizer>,
}

impl VisualizerView {
    fn visualizer(&self) -> Option<&Visualizer> {
        self.mounted.as_ref().map(|m| &m.visualizer)
    }
}

#[wasm_bindgen]
impl VisualizerView {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> Result<VisualizerView, JsValue> {
        let mounted = mount_visualizer(container_id).map_err(js_err)?;
        Ok(Self {
            mounted: Some(mounted),
        })
    }

    #[wasm_bindgen(js_name = setPlaying)]
    pub fn set_playing(&self, is_playing: bool) {
        if let Some(v) = self.visualizer() {
            v.set_playing(is_playing);
        }
    }

    /// `undefined` selects the default effect; unknown tags draw nothing.
    #[wasm_bindgen(js_name = setEffect)]
    pub fn set_effect(&self, tag: Option<String>) {
        if let Some(v) = self.visualizer() {
            v.set_effect(EffectMode::from_tag(tag.as_deref()));
        }
    }

    #[wasm_bindgen(js_name = setCurrentTrack)]
    pub fn set_current_track(&self, track: Option<String>) {
        if let Some(v) = self.visualizer() {
            v.set_current_track(track);
        }
    }

    #[wasm_bindgen(js_name = toggleFullscreen)]
    pub fn toggle_fullscreen(&self) {
        if let Some(m) = &self.mounted {
            m.fullscreen.toggle();
        }
    }

    #[wasm_bindgen(js_name = isFullscreen)]
    pub fn is_fullscreen(&self) -> bool {
        self.mounted
            .as_ref()
            .map(|m| m.fullscreen.is_fullscreen())
            .unwrap_or(false)
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> f64 {
        self.visualizer().map(|v| v.stats().frames as f64).unwrap_or(0.0)
    }

    pub fn unmount(&mut self) {
        self.mounted = None;
    }
}

struct MountedPiano {
    host: BrowserHost,
    sweep: Option<BrowserTask>,
    wiring: PianoWiring,
    listeners: Vec<EventListener>,
}

impl Drop for MountedPiano {
    fn drop(&mut self) {
        self.listeners.clear();
        if let Some(task) = self.sweep.take() {
            self.host.cancel(task);
        }
        _ = self.wiring.audio_ctx.close();
    }
}

fn mount_piano(root_id: Option<&str>) -> anyhow::Result<MountedPiano> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let root = match root_id {
        Some(id) => {
            let document = window
                .document()
                .ok_or_else(|| anyhow::anyhow!("no document"))?;
            Some(dom::element_by_id::<web::Element>(&document, id)?)
        }
        None => None,
    };
    let wiring = PianoWiring {
        keyboard: Rc::new(Keyboard::new()),
        state: Rc::new(RefCell::new(PianoState::new())),
        envelope: Rc::new(Cell::new(NoteEnvelope::default())),
        audio_ctx: audio::create_context()?,
        root,
    };

    let mut listeners = Vec::new();
    listeners.extend(events::wire_piano_keys(&window, &wiring));
    if let Some(root) = &wiring.root {
        listeners.extend(events::wire_note_clicks(root, &wiring));
    }

    let host = BrowserHost::new(window);
    let sweep_wiring = wiring.clone();
    let sweep = host
        .spawn_repeating(
            Cadence::Interval(Duration::from_millis(PRESS_SWEEP_MS)),
            Box::new(move |_| sweep_wiring.release_expired()),
        )
        .map_err(|e| anyhow::anyhow!("piano sweep failed: {e}"))?;

    log::info!("[piano] mounted {} keys", wiring.keyboard.keys().len());
    Ok(MountedPiano {
        host,
        sweep: Some(sweep),
        wiring,
        listeners,
    })
}

/// Two-octave on-screen piano with computer-keyboard input.
#[wasm_bindgen]
pub struct PianoView {
    mounted: Option<MountedPiano>,
}

#[wasm_bindgen]
impl PianoView {
    /// `root_id` names the element holding `[data-note]` keys; without it
    /// only the computer keyboard plays.
    #[wasm_bindgen(constructor)]
    pub fn new(root_id: Option<String>) -> Result<PianoView, JsValue> {
        let mounted = mount_piano(root_id.as_deref()).map_err(js_err)?;
        Ok(Self {
            mounted: Some(mounted),
        })
    }

    pub fn play(&self, note: &str) -> bool {
        self.mounted
            .as_ref()
            .map(|m| m.wiring.strike(note))
            .unwrap_or(false)
    }

    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, volume: f32) {
        if let Some(m) = &self.mounted {
            let env = m.wiring.envelope.get().with_volume(volume);
            m.wiring.envelope.set(env);
        }
    }

    /// Note names in keyboard order, for building the key elements.
    pub fn notes(&self) -> js_sys::Array {
        Keyboard::new()
            .keys()
            .iter()
            .map(|k| JsValue::from_str(&k.note))
            .collect()
    }

    pub fn unmount(&mut self) {
        self.mounted = None;
    }
}
