//! Backend-neutral drawing primitives.
//!
//! Effect renderers append [`DrawCommand`]s to a [`DrawList`]; a [`Surface`]
//! replays them onto a real canvas (or records them in tests). Coordinates
//! are layout (CSS) pixels with the origin at the top-left corner.

use crate::viewport::ViewportGeometry;
use glam::Vec2;
use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    /// Saturation and lightness are percentages; hue wraps into `[0, 360)`.
    pub fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue: wrap_hue(hue),
            saturation: saturation.clamp(0.0, 100.0),
            lightness: lightness.clamp(0.0, 100.0),
            alpha: if alpha.is_finite() {
                alpha.clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({:.1}, {:.0}%, {:.0}%, {:.3})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// Hue rotation keyed on elapsed time and element index.
#[inline]
pub fn rotating_hue(time: f32, rate: f32, index: usize, step: f32) -> f32 {
    wrap_hue(time * rate + index as f32 * step)
}

#[inline]
fn wrap_hue(h: f32) -> f32 {
    if h.is_finite() {
        h.rem_euclid(360.0)
    } else {
        0.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

impl LineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Hsla,
    pub width: f32,
    pub cap: LineCap,
}

impl Stroke {
    pub fn new(color: Hsla, width: f32) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Butt,
        }
    }

    pub fn round(mut self) -> Self {
        self.cap = LineCap::Round;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill {
    Solid(Hsla),
    /// Gradient from the circle centre (`inner`) to its rim (`outer`).
    Radial { inner: Hsla, outer: Hsla },
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillCircle {
        center: Vec2,
        radius: f32,
        fill: Fill,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        stroke: Stroke,
    },
    Line {
        from: Vec2,
        to: Vec2,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Vec2>,
        stroke: Stroke,
    },
}

#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Fill) {
        self.push(DrawCommand::FillCircle {
            center,
            radius: radius.max(0.0),
            fill,
        });
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke) {
        self.push(DrawCommand::StrokeCircle {
            center,
            radius: radius.max(0.0),
            stroke,
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        self.push(DrawCommand::Line { from, to, stroke });
    }

    pub fn polyline(&mut self, points: Vec<Vec2>, stroke: Stroke) {
        if points.len() >= 2 {
            self.push(DrawCommand::Polyline { points, stroke });
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("drawing context unavailable")]
    ContextLost,
    #[error("backend rejected {op}: {detail}")]
    Backend { op: &'static str, detail: String },
}

/// Something the render loop can paint on.
pub trait Surface {
    fn geometry(&self) -> ViewportGeometry;
    /// Re-read the host layout. Called before any frame whose geometry
    /// cannot be drawn, so a surface sized after mount recovers.
    fn refresh(&mut self) {}
    fn clear(&mut self);
    fn execute(&mut self, commands: &[DrawCommand]) -> Result<(), SurfaceError>;
}

/// In-memory surface that keeps every frame it was asked to paint.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub geometry: ViewportGeometry,
    pub frames: Vec<Vec<DrawCommand>>,
    pub clears: usize,
}

impl RecordingSurface {
    pub fn new(geometry: ViewportGeometry) -> Self {
        Self {
            geometry,
            frames: Vec::new(),
            clears: 0,
        }
    }

    pub fn last_frame(&self) -> Option<&[DrawCommand]> {
        self.frames.last().map(|f| f.as_slice())
    }

    pub fn total_commands(&self) -> usize {
        self.frames.iter().map(Vec::len).sum()
    }
}

impl Surface for RecordingSurface {
    fn geometry(&self) -> ViewportGeometry {
        self.geometry
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn execute(&mut self, commands: &[DrawCommand]) -> Result<(), SurfaceError> {
        self.frames.push(commands.to_vec());
        Ok(())
    }
}
