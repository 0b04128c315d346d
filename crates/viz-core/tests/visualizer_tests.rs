use std::cell::{Cell, RefCell};
use std::rc::Rc;
use viz_core::constants::{SPOKE_COUNT, TICK_INTERVAL_MS};
use viz_core::{
    DrawCommand, EffectMode, FrameOutcome, ManualHost, RecordingSurface, Surface, SurfaceError,
    TaskKind, ViewportGeometry, Visualizer, VisualizerConfig, VisualizerProps,
};

fn seeded(playing: bool, effect: Option<&str>) -> Visualizer {
    let config = VisualizerConfig {
        seed: Some(1234),
        ..VisualizerConfig::default()
    };
    Visualizer::new(config, VisualizerProps::new(playing, effect))
}

fn surface() -> Rc<RefCell<RecordingSurface>> {
    Rc::new(RefCell::new(RecordingSurface::new(ViewportGeometry::new(
        640.0, 480.0, 2.0,
    ))))
}

#[test]
fn bars_scenario_draws_sixteen_spokes_per_frame() {
    let viz = seeded(true, Some("bars"));
    let host = ManualHost::new();
    let surf = surface();
    let running = viz.start(&host, surf.clone()).unwrap();

    for _ in 0..10 {
        assert_eq!(host.fire(TaskKind::Interval), 1);
    }
    for _ in 0..10 {
        assert_eq!(host.step_frame(), 1);
    }
    viz.stop(&host, running);

    let s = surf.borrow();
    assert_eq!(s.frames.len(), 10);
    assert_eq!(s.clears, 10);
    for frame in &s.frames {
        let spokes: Vec<f32> = frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, .. } => Some(from.distance(*to)),
                _ => None,
            })
            .collect();
        assert_eq!(spokes.len(), SPOKE_COUNT);
        assert!(spokes.iter().all(|len| *len >= 0.0));
    }
    assert_eq!(viz.stats().ticks, 10);
    assert_eq!(viz.stats().frames, 10);
}

#[test]
fn stop_freezes_all_callbacks() {
    let viz = seeded(true, None);
    let host = ManualHost::new();
    let surf = surface();
    let running = viz.start(&host, surf.clone()).unwrap();

    host.advance(1000.0);
    let before = viz.stats();
    assert!(before.ticks >= 8);
    assert!(before.frames >= 59);

    viz.stop(&host, running);
    let fired = host.fired();
    let painted = surf.borrow().frames.len();

    host.advance(5000.0);
    assert_eq!(host.fired(), fired);
    assert_eq!(host.live_tasks(), 0);
    assert_eq!(viz.stats(), before);
    assert_eq!(surf.borrow().frames.len(), painted);
}

#[test]
fn ticker_follows_configured_interval() {
    let viz = seeded(false, None);
    let host = ManualHost::new();
    let running = viz.start(&host, surface()).unwrap();
    host.advance(TICK_INTERVAL_MS as f64 * 5.0);
    assert_eq!(viz.stats().ticks, 5);
    viz.stop(&host, running);
}

#[test]
fn unknown_effect_paints_empty_frames() {
    let viz = seeded(true, Some("confetti"));
    let host = ManualHost::new();
    let surf = surface();
    let running = viz.start(&host, surf.clone()).unwrap();
    host.fire(TaskKind::Interval);
    for _ in 0..3 {
        host.step_frame();
    }
    viz.stop(&host, running);
    let s = surf.borrow();
    assert_eq!(s.clears, 3);
    assert_eq!(s.total_commands(), 0);
}

#[test]
fn prop_changes_apply_without_restart() {
    let viz = seeded(true, Some("waves"));
    let host = ManualHost::new();
    let surf = surface();
    let running = viz.start(&host, surf.clone()).unwrap();

    host.fire(TaskKind::Interval);
    host.step_frame();
    viz.set_effect(Some(EffectMode::Ripples));
    viz.set_playing(false);
    let playing_levels = viz.levels();
    host.fire(TaskKind::Interval);
    host.step_frame();
    viz.stop(&host, running);

    let paused = viz.levels();
    for (a, b) in playing_levels.iter().zip(paused.iter()) {
        assert!((b - a * 0.9).abs() < 1e-6);
    }
    let s = surf.borrow();
    let last = s.last_frame().unwrap();
    // ripples: six rings and a core disc
    assert_eq!(last.len(), 7);
}

struct FlakySurface {
    inner: RecordingSurface,
    calls: Cell<u32>,
}

impl Surface for FlakySurface {
    fn geometry(&self) -> ViewportGeometry {
        self.inner.geometry()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn execute(&mut self, commands: &[DrawCommand]) -> Result<(), SurfaceError> {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        if n % 2 == 0 {
            return Err(SurfaceError::ContextLost);
        }
        self.inner.execute(commands)
    }
}

#[test]
fn failed_frames_do_not_stop_the_loop() {
    let viz = seeded(true, Some("particles"));
    let host = ManualHost::new();
    let surf = Rc::new(RefCell::new(FlakySurface {
        inner: RecordingSurface::new(ViewportGeometry::new(300.0, 300.0, 1.0)),
        calls: Cell::new(0),
    }));
    let running = viz.start(&host, surf.clone()).unwrap();
    for _ in 0..6 {
        host.step_frame();
    }
    viz.stop(&host, running);
    let stats = viz.stats();
    assert_eq!(stats.frames, 6);
    assert_eq!(stats.skipped_frames, 3);
    assert_eq!(surf.borrow().inner.frames.len(), 3);
}

#[test]
fn zero_sized_surface_skips_frame() {
    let viz = seeded(true, Some("spiral"));
    let mut surf = RecordingSurface::new(ViewportGeometry::new(0.0, 0.0, 1.0));
    assert_eq!(viz.frame(0.0, &mut surf), FrameOutcome::Skipped);
    surf.geometry = ViewportGeometry::new(200.0, 100.0, 1.0);
    assert!(matches!(viz.frame(16.0, &mut surf), FrameOutcome::Drawn(n) if n > 0));
}

/// Container hidden at mount; its layout appears after a few frames without
/// any window resize.
struct LateLayoutSurface {
    inner: RecordingSurface,
    refreshes: usize,
    sized_after: usize,
}

impl Surface for LateLayoutSurface {
    fn geometry(&self) -> ViewportGeometry {
        self.inner.geometry()
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
        if self.refreshes >= self.sized_after {
            self.inner.geometry = ViewportGeometry::new(320.0, 240.0, 2.0);
        }
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn execute(&mut self, commands: &[DrawCommand]) -> Result<(), SurfaceError> {
        self.inner.execute(commands)
    }
}

#[test]
fn hidden_container_recovers_once_laid_out() {
    let viz = seeded(true, Some("ripples"));
    let host = ManualHost::new();
    let surf = Rc::new(RefCell::new(LateLayoutSurface {
        inner: RecordingSurface::new(ViewportGeometry::default()),
        refreshes: 0,
        sized_after: 120,
    }));
    let running = viz.start(&host, surf.clone()).unwrap();
    for _ in 0..130 {
        host.step_frame();
    }
    viz.stop(&host, running);

    let stats = viz.stats();
    assert_eq!(stats.frames, 130);
    assert_eq!(stats.skipped_frames, 119);
    assert_eq!(stats.viewport_warnings, 1);
    assert_eq!(surf.borrow().inner.frames.len(), 11);
    // refresh only runs while the geometry is undrawable
    assert_eq!(surf.borrow().refreshes, 120);
}

#[test]
fn viewport_warning_rearms_after_a_drawn_frame() {
    let viz = seeded(true, Some("waves"));
    let mut surf = RecordingSurface::new(ViewportGeometry::new(0.0, 0.0, 1.0));
    for t in 0..5 {
        assert_eq!(viz.frame(t as f64 * 16.0, &mut surf), FrameOutcome::Skipped);
    }
    assert_eq!(viz.stats().viewport_warnings, 1);

    surf.geometry = ViewportGeometry::new(100.0, 100.0, 1.0);
    assert!(matches!(viz.frame(100.0, &mut surf), FrameOutcome::Drawn(_)));
    surf.geometry = ViewportGeometry::new(0.0, 100.0, 1.0);
    viz.frame(116.0, &mut surf);
    viz.frame(132.0, &mut surf);
    assert_eq!(viz.stats().viewport_warnings, 2);
}

#[test]
fn elapsed_time_starts_at_first_frame() {
    let viz = seeded(true, Some("bars"));
    let mut a = RecordingSurface::new(ViewportGeometry::new(400.0, 400.0, 1.0));
    let mut b = RecordingSurface::new(ViewportGeometry::new(400.0, 400.0, 1.0));
    viz.tick();
    viz.frame(10_000.0, &mut a);
    let other = seeded(true, Some("bars"));
    other.tick();
    other.frame(0.0, &mut b);
    // Same levels and zero elapsed time regardless of the absolute clock.
    assert_eq!(a.last_frame(), b.last_frame());
}

#[test]
fn current_track_is_stored_only() {
    let viz = seeded(true, Some("waves"));
    viz.set_current_track(Some("track-7".into()));
    assert_eq!(viz.props().current_track.as_deref(), Some("track-7"));
    assert_eq!(viz.props().effect, Some(EffectMode::Waves));
}
