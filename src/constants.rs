// DOM hooks and attribute names the host page uses to embed the
// visualizer and the piano. No web-sys types here: host tests include it.

// Visualizer container and its optional children
pub const CANVAS_SELECTOR: &str = "canvas";
pub const FULLSCREEN_TOGGLE_SELECTOR: &str = "[data-fullscreen-toggle]";
pub const FULLSCREEN_HINT_SELECTOR: &str = "[data-fullscreen-hint]";
pub const FULLSCREEN_CLASS: &str = "is-fullscreen";
pub const HIDDEN_CLASS: &str = "hidden";

// Container attributes read once at mount
pub const ATTR_EFFECT: &str = "data-effect";
pub const ATTR_PLAYING: &str = "data-playing";
pub const ATTR_SEED: &str = "data-seed";
pub const ATTR_TRACK: &str = "data-track";

// Piano
pub const NOTE_ATTR: &str = "data-note";
pub const NOTE_SELECTOR: &str = "[data-note]";
pub const PRESSED_CLASS: &str = "pressed";
pub const PRESS_SWEEP_MS: u64 = 50; // how often pressed-key feedback is expired
