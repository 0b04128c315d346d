//! The visualizer component: owns the level signal and drives repainting.

use crate::constants::{LEVEL_DECAY, LEVEL_FLOOR, TICK_INTERVAL_MS, TIME_SCALE_PER_MS};
use crate::draw::{DrawList, Surface};
use crate::effects::{EffectMode, EffectRegistry, FrameInput, RenderError};
use crate::levels::{IntensityVector, LevelGenerator};
use crate::task::{Cadence, HostError, TaskHost};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct VisualizerConfig {
    pub tick_interval: Duration,
    pub level_floor: f32,
    pub level_decay: f32,
    pub time_scale_per_ms: f64,
    /// Fixed RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            level_floor: LEVEL_FLOOR,
            level_decay: LEVEL_DECAY,
            time_scale_per_ms: TIME_SCALE_PER_MS,
            seed: None,
        }
    }
}

/// Inputs set by the hosting view.
#[derive(Clone, Debug)]
pub struct VisualizerProps {
    pub is_playing: bool,
    /// `None` paints nothing.
    pub effect: Option<EffectMode>,
    /// Accepted for future per-track theming; not read by the renderers.
    pub current_track: Option<String>,
}

impl VisualizerProps {
    pub fn new(is_playing: bool, effect_tag: Option<&str>) -> Self {
        Self {
            is_playing,
            effect: EffectMode::from_tag(effect_tag),
            current_track: None,
        }
    }
}

impl Default for VisualizerProps {
    fn default() -> Self {
        Self::new(false, None)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn(usize),
    Skipped,
}

/// Counters exposed for diagnostics and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub frames: u64,
    pub skipped_frames: u64,
    /// Warnings emitted for an undrawable viewport; one per degenerate spell.
    pub viewport_warnings: u64,
}

struct Inner {
    config: VisualizerConfig,
    props: VisualizerProps,
    levels: LevelGenerator,
    registry: EffectRegistry,
    draw_list: DrawList,
    started_at_ms: Option<f64>,
    stats: LoopStats,
    // set after the first undrawable-viewport warning, cleared on a drawn frame
    viewport_warned: bool,
}

/// Handles for a running visualizer; pass back to [`Visualizer::stop`].
#[must_use = "dropping Running leaks the scheduled tasks; pass it to Visualizer::stop"]
pub struct Running<H> {
    ticker: H,
    frames: H,
}

#[derive(Clone)]
pub struct Visualizer {
    inner: Rc<RefCell<Inner>>,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig, props: VisualizerProps) -> Self {
        let levels = LevelGenerator::new(config.level_floor, config.level_decay, config.seed);
        Self {
            inner: Rc::new(RefCell::new(Inner {
                config,
                props,
                levels,
                registry: EffectRegistry::default(),
                draw_list: DrawList::new(),
                started_at_ms: None,
                stats: LoopStats::default(),
                viewport_warned: false,
            })),
        }
    }

    pub fn props(&self) -> VisualizerProps {
        self.inner.borrow().props.clone()
    }

    pub fn set_playing(&self, is_playing: bool) {
        self.inner.borrow_mut().props.is_playing = is_playing;
    }

    pub fn set_effect(&self, effect: Option<EffectMode>) {
        self.inner.borrow_mut().props.effect = effect;
    }

    pub fn set_current_track(&self, track: Option<String>) {
        let mut inner = self.inner.borrow_mut();
        if inner.props.current_track != track {
            log::debug!("[viz] track -> {:?}", track);
        }
        inner.props.current_track = track;
    }

    pub fn levels(&self) -> IntensityVector {
        self.inner.borrow().levels.current()
    }

    pub fn stats(&self) -> LoopStats {
        self.inner.borrow().stats
    }

    /// One level-generator period.
    pub fn tick(&self) -> IntensityVector {
        let mut inner = self.inner.borrow_mut();
        let active = inner.props.is_playing;
        inner.stats.ticks += 1;
        inner.levels.tick(active)
    }

    /// Paint one frame. Failures are logged and reported as `Skipped`; they
    /// never escape to the caller.
    pub fn frame<S: Surface + ?Sized>(&self, now_ms: f64, surface: &mut S) -> FrameOutcome {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        inner.stats.frames += 1;

        let started = *inner.started_at_ms.get_or_insert(now_ms);
        let time = ((now_ms - started) * inner.config.time_scale_per_ms) as f32;
        let levels = inner.levels.current();
        if !surface.geometry().is_drawable() {
            surface.refresh();
        }
        let input = FrameInput {
            levels: &levels,
            time,
            geometry: surface.geometry(),
        };

        surface.clear();
        inner.draw_list.clear();
        let drawn = match inner.registry.render(inner.props.effect, &input, &mut inner.draw_list) {
            Ok(n) => n,
            Err(e @ RenderError::DegenerateViewport { .. }) => {
                // a hidden container stays degenerate for every frame until shown
                if inner.viewport_warned {
                    log::debug!("[viz] frame skipped: {}", e);
                } else {
                    log::warn!("[viz] frame skipped until the viewport is sized: {}", e);
                    inner.viewport_warned = true;
                    inner.stats.viewport_warnings += 1;
                }
                inner.stats.skipped_frames += 1;
                return FrameOutcome::Skipped;
            }
            Err(e) => {
                log::warn!("[viz] frame skipped: {}", e);
                inner.stats.skipped_frames += 1;
                return FrameOutcome::Skipped;
            }
        };
        if let Err(e) = surface.execute(inner.draw_list.commands()) {
            log::warn!("[viz] surface error: {}", e);
            inner.stats.skipped_frames += 1;
            return FrameOutcome::Skipped;
        }
        inner.viewport_warned = false;
        FrameOutcome::Drawn(drawn)
    }

    /// Register the level ticker and the frame loop on `host`.
    pub fn start<H, S>(&self, host: &H, surface: Rc<RefCell<S>>) -> Result<Running<H::Handle>, HostError>
    where
        H: TaskHost,
        S: Surface + 'static,
    {
        let interval = {
            let mut inner = self.inner.borrow_mut();
            inner.started_at_ms = None;
            inner.config.tick_interval
        };

        let for_tick = self.clone();
        let ticker = host.spawn_repeating(
            Cadence::Interval(interval),
            Box::new(move |_now| {
                for_tick.tick();
            }),
        )?;

        let for_frame = self.clone();
        let frames = match host.spawn_repeating(
            Cadence::AnimationFrame,
            Box::new(move |now| {
                // A surface busy elsewhere (e.g. mid-resize) costs one frame.
                match surface.try_borrow_mut() {
                    Ok(mut s) => {
                        for_frame.frame(now, &mut *s);
                    }
                    Err(_) => log::debug!("[viz] surface busy, frame dropped"),
                }
            }),
        ) {
            Ok(h) => h,
            Err(e) => {
                host.cancel(ticker);
                return Err(e);
            }
        };

        log::info!(
            "[viz] started effect={} playing={}",
            self.effect_name(),
            self.inner.borrow().props.is_playing
        );
        Ok(Running { ticker, frames })
    }

    pub fn stop<H: TaskHost>(&self, host: &H, running: Running<H::Handle>) {
        host.cancel(running.frames);
        host.cancel(running.ticker);
        let stats = self.stats();
        log::info!(
            "[viz] stopped after {} ticks, {} frames ({} skipped)",
            stats.ticks,
            stats.frames,
            stats.skipped_frames
        );
    }

    fn effect_name(&self) -> &'static str {
        self.inner.borrow().props.effect.map_or("none", EffectMode::as_str)
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(VisualizerConfig::default(), VisualizerProps::default())
    }
}
