pub mod constants;
pub mod draw;
pub mod effects;
pub mod environment;
pub mod fullscreen;
pub mod levels;
pub mod piano;
pub mod task;
pub mod viewport;
pub mod visualizer;

pub use draw::*;
pub use effects::{EffectMode, EffectRegistry, FrameInput, RenderError, UnknownEffect};
pub use fullscreen::*;
pub use levels::*;
pub use task::*;
pub use viewport::*;
pub use visualizer::*;
