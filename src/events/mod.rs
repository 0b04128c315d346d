mod keyboard;
mod pointer;

pub use keyboard::wire_piano_keys;
pub use pointer::{wire_fullscreen_toggle, wire_note_clicks};

use crate::audio;
use crate::constants::{NOTE_ATTR, PRESSED_CLASS};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use viz_core::piano::{Keyboard, NoteEnvelope, PianoKey, PianoState};
use web_sys as web;

/// Everything a piano input handler needs; cloned into each closure.
#[derive(Clone)]
pub struct PianoWiring {
    pub keyboard: Rc<Keyboard>,
    pub state: Rc<RefCell<PianoState>>,
    pub envelope: Rc<Cell<NoteEnvelope>>,
    pub audio_ctx: web::AudioContext,
    pub root: Option<web::Element>,
}

impl PianoWiring {
    /// Sound a note by name from a click or the page API. Every call plays;
    /// returns false only for unknown notes.
    pub fn strike(&self, note: &str) -> bool {
        let Some(key) = self.keyboard.by_note(note) else {
            return false;
        };
        self.state.borrow_mut().retrigger(&key.note, instant::now());
        self.sound(key);
        true
    }

    /// Keyboard strike: a note still inside its pressed-feedback window is
    /// not retriggered.
    pub fn strike_held(&self, note: &str) -> bool {
        let Some(key) = self.keyboard.by_note(note) else {
            return false;
        };
        if !self.state.borrow_mut().press(&key.note, instant::now()) {
            return false;
        }
        self.sound(key);
        true
    }

    fn sound(&self, key: &PianoKey) {
        if let Err(e) = audio::play_note(&self.audio_ctx, key.frequency_hz, &self.envelope.get()) {
            log::warn!("[piano] {} failed to sound: {:?}", key.note, e);
        }
        log::debug!("[piano] {} {:.2}Hz", key.note, key.frequency_hz);
        self.mark(&key.note, true);
    }

    pub fn release_expired(&self) {
        let done = self.state.borrow_mut().expire(instant::now());
        for note in done {
            self.mark(&note, false);
        }
    }

    fn mark(&self, note: &str, pressed: bool) {
        let Some(root) = &self.root else {
            return;
        };
        let selector = format!("[{NOTE_ATTR}=\"{note}\"]");
        if let Ok(Some(el)) = root.query_selector(&selector) {
            _ = el.class_list().toggle_with_force(PRESSED_CLASS, pressed);
        }
    }
}
