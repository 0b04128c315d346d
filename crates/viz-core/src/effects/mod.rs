//! Effect renderers and the table that selects between them.

mod bars;
mod particles;
mod ripples;
mod spiral;
mod waves;

use crate::draw::DrawList;
use crate::levels::IntensityVector;
use crate::viewport::ViewportGeometry;
use fnv::FnvHashMap;
use glam::Vec2;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EffectMode {
    #[default]
    Waves,
    Particles,
    Bars,
    Ripples,
    Spiral,
}

impl EffectMode {
    pub const ALL: [EffectMode; 5] = [
        EffectMode::Waves,
        EffectMode::Particles,
        EffectMode::Bars,
        EffectMode::Ripples,
        EffectMode::Spiral,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EffectMode::Waves => "waves",
            EffectMode::Particles => "particles",
            EffectMode::Bars => "bars",
            EffectMode::Ripples => "ripples",
            EffectMode::Spiral => "spiral",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EffectMode::Waves => "Waves",
            EffectMode::Particles => "Particles",
            EffectMode::Bars => "Bars",
            EffectMode::Ripples => "Ripples",
            EffectMode::Spiral => "Spiral",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EffectMode::Waves => "Pulsing circular waves",
            EffectMode::Particles => "Floating light particles",
            EffectMode::Bars => "Radiating audio bars",
            EffectMode::Ripples => "Water ripple effects",
            EffectMode::Spiral => "Spinning spiral patterns",
        }
    }

    /// Resolve a host-supplied tag. An absent tag means the default effect;
    /// an unrecognised one selects nothing, which draws an empty frame.
    pub fn from_tag(tag: Option<&str>) -> Option<EffectMode> {
        match tag {
            None => Some(EffectMode::default()),
            Some(t) => t.parse().ok(),
        }
    }
}

impl fmt::Display for EffectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown effect `{0}`")]
pub struct UnknownEffect(pub String);

impl FromStr for EffectMode {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        EffectMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| UnknownEffect(s.to_string()))
    }
}

/// Everything a renderer may read for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    pub levels: &'a IntensityVector,
    /// Scaled elapsed time; one unit per 500ms.
    pub time: f32,
    pub geometry: ViewportGeometry,
}

impl FrameInput<'_> {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.geometry.center()
    }

    #[inline]
    pub fn short_side(&self) -> f32 {
        self.geometry.short_side()
    }

    #[inline]
    pub fn average(&self) -> f32 {
        self.levels.average()
    }

    fn validate(&self) -> Result<(), RenderError> {
        if !self.geometry.is_drawable() {
            return Err(RenderError::DegenerateViewport {
                width: self.geometry.width,
                height: self.geometry.height,
            });
        }
        if !self.time.is_finite() {
            return Err(RenderError::NonFiniteTime);
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("viewport {width}x{height} cannot be drawn")]
    DegenerateViewport { width: f32, height: f32 },
    #[error("elapsed time is not finite")]
    NonFiniteTime,
}

pub type RenderFn = fn(&FrameInput<'_>, &mut DrawList);

/// Strategy table from effect to renderer, filled once at construction.
pub struct EffectRegistry {
    table: FnvHashMap<EffectMode, RenderFn>,
}

impl EffectRegistry {
    pub fn empty() -> Self {
        Self {
            table: FnvHashMap::default(),
        }
    }

    pub fn register(&mut self, mode: EffectMode, render: RenderFn) -> &mut Self {
        self.table.insert(mode, render);
        self
    }

    pub fn contains(&self, mode: EffectMode) -> bool {
        self.table.contains_key(&mode)
    }

    /// Paint `mode` into `out`. `None` or an unregistered mode appends
    /// nothing. Returns the number of commands added.
    pub fn render(
        &self,
        mode: Option<EffectMode>,
        input: &FrameInput<'_>,
        out: &mut DrawList,
    ) -> Result<usize, RenderError> {
        let Some(render) = mode.and_then(|m| self.table.get(&m)) else {
            return Ok(0);
        };
        input.validate()?;
        let before = out.len();
        render(input, out);
        Ok(out.len() - before)
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        let mut reg = Self::empty();
        reg.register(EffectMode::Waves, waves::render)
            .register(EffectMode::Particles, particles::render)
            .register(EffectMode::Bars, bars::render)
            .register(EffectMode::Ripples, ripples::render)
            .register(EffectMode::Spiral, spiral::render);
        reg
    }
}

/// Point on a circle of `radius` around `center`.
#[inline]
pub(crate) fn polar(center: Vec2, angle: f32, radius: f32) -> Vec2 {
    center + Vec2::new(angle.cos(), angle.sin()) * radius
}
