//! Two-octave virtual piano model: key table, keyboard mapping, envelope
//! and pressed-key feedback. Sound output lives in the web front-end.

use fnv::FnvHashMap;

pub const FIRST_MIDI: i32 = 60; // C4
pub const KEY_COUNT: usize = 24;
pub const PRESS_FEEDBACK_MS: f64 = 200.0;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

// Home-row layout: white keys on a s d f g h j k, sharps on the row above.
const KEYBOARD_LAYOUT: [(char, usize); 13] = [
    ('a', 0),
    ('w', 1),
    ('s', 2),
    ('e', 3),
    ('d', 4),
    ('f', 5),
    ('t', 6),
    ('g', 7),
    ('y', 8),
    ('h', 9),
    ('u', 10),
    ('j', 11),
    ('k', 12),
];

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct PianoKey {
    pub note: String,
    pub midi: i32,
    pub frequency_hz: f32,
    pub is_black: bool,
}

impl PianoKey {
    fn from_midi(midi: i32) -> Self {
        let pitch_class = midi.rem_euclid(12) as usize;
        let octave = midi.div_euclid(12) - 1;
        let name = NOTE_NAMES[pitch_class];
        Self {
            note: format!("{name}{octave}"),
            midi,
            frequency_hz: midi_to_hz(midi as f32),
            is_black: name.ends_with('#'),
        }
    }
}

/// Gain envelope for one struck note.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteEnvelope {
    pub volume: f32,
    pub attack_sec: f64,
    pub release_sec: f64,
    /// Exponential ramps cannot reach zero; this is where the tail ends.
    pub floor: f32,
}

impl Default for NoteEnvelope {
    fn default() -> Self {
        Self {
            volume: 0.3,
            attack_sec: 0.01,
            release_sec: 0.5,
            floor: 0.001,
        }
    }
}

impl NoteEnvelope {
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }
}

pub struct Keyboard {
    keys: Vec<PianoKey>,
    by_note: FnvHashMap<String, usize>,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyboard {
    pub fn new() -> Self {
        let keys: Vec<PianoKey> = (0..KEY_COUNT as i32)
            .map(|i| PianoKey::from_midi(FIRST_MIDI + i))
            .collect();
        let by_note = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.note.clone(), i))
            .collect();
        Self { keys, by_note }
    }

    pub fn keys(&self) -> &[PianoKey] {
        &self.keys
    }

    pub fn by_note(&self, note: &str) -> Option<&PianoKey> {
        self.by_note.get(note).map(|&i| &self.keys[i])
    }

    /// Map a `KeyboardEvent.key` value to a piano key, ignoring case.
    pub fn for_computer_key(&self, key: &str) -> Option<&PianoKey> {
        let mut chars = key.chars();
        let c = chars.next()?.to_ascii_lowercase();
        if chars.next().is_some() {
            return None;
        }
        KEYBOARD_LAYOUT
            .iter()
            .find(|(k, _)| *k == c)
            .map(|&(_, idx)| &self.keys[idx])
    }
}

/// Which notes are showing pressed feedback, keyed by note name.
#[derive(Debug, Default)]
pub struct PianoState {
    pressed_until_ms: FnvHashMap<String, f64>,
}

impl PianoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, note: &str, now_ms: f64) -> bool {
        self.pressed_until_ms
            .get(note)
            .is_some_and(|&until| now_ms < until)
    }

    /// Register a strike. Returns false when the note is still sounding its
    /// feedback window, i.e. a key-repeat that should not retrigger.
    pub fn press(&mut self, note: &str, now_ms: f64) -> bool {
        if self.is_pressed(note, now_ms) {
            return false;
        }
        self.pressed_until_ms
            .insert(note.to_string(), now_ms + PRESS_FEEDBACK_MS);
        true
    }

    /// Register a strike that always sounds (pointer or API), restarting the
    /// feedback window of a note that is still lit.
    pub fn retrigger(&mut self, note: &str, now_ms: f64) {
        self.pressed_until_ms
            .insert(note.to_string(), now_ms + PRESS_FEEDBACK_MS);
    }

    /// Drop expired entries; returns the notes whose feedback ended.
    pub fn expire(&mut self, now_ms: f64) -> Vec<String> {
        let done: Vec<String> = self
            .pressed_until_ms
            .iter()
            .filter(|(_, &until)| now_ms >= until)
            .map(|(n, _)| n.clone())
            .collect();
        for n in &done {
            self.pressed_until_ms.remove(n);
        }
        done
    }
}
