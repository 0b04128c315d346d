use viz_core::constants::{PARTICLE_COUNT, RIPPLE_COUNT, SPIRAL_ARMS, SPIRAL_PARTICLES, SPOKE_COUNT};
use viz_core::effects::{EffectMode, EffectRegistry, FrameInput, RenderError};
use viz_core::{DrawCommand, DrawList, IntensityVector, ViewportGeometry};

fn levels(v: f32) -> IntensityVector {
    IntensityVector::from_slice(&[v; 8])
}

fn render(mode: Option<EffectMode>, lv: &IntensityVector, time: f32) -> (Result<usize, RenderError>, DrawList) {
    let reg = EffectRegistry::default();
    let mut out = DrawList::new();
    let input = FrameInput {
        levels: lv,
        time,
        geometry: ViewportGeometry::new(800.0, 600.0, 2.0),
    };
    (reg.render(mode, &input, &mut out), out)
}

fn count<F: Fn(&DrawCommand) -> bool>(list: &DrawList, f: F) -> usize {
    list.commands().iter().filter(|c| f(*c)).count()
}

#[test]
fn every_effect_is_registered() {
    let reg = EffectRegistry::default();
    for mode in EffectMode::ALL {
        assert!(reg.contains(mode), "{mode} missing");
    }
}

#[test]
fn picker_entries_are_distinct() {
    let labels: std::collections::HashSet<&str> = EffectMode::ALL.iter().map(|m| m.label()).collect();
    assert_eq!(labels.len(), EffectMode::ALL.len());
    assert_eq!(EffectMode::Bars.description(), "Radiating audio bars");
    assert!(EffectMode::ALL.iter().all(|m| !m.description().is_empty()));
}

#[test]
fn unknown_tags_draw_nothing() {
    for tag in ["", "lasers", "WAVES!", "bar"] {
        let mode = EffectMode::from_tag(Some(tag));
        assert_eq!(mode, None, "tag {tag:?}");
        let (res, out) = render(mode, &levels(0.5), 1.0);
        assert_eq!(res, Ok(0));
        assert!(out.is_empty());
    }
}

#[test]
fn missing_tag_defaults_to_waves() {
    assert_eq!(EffectMode::from_tag(None), Some(EffectMode::Waves));
    assert_eq!(EffectMode::from_tag(Some(" Spiral ")), Some(EffectMode::Spiral));
}

#[test]
fn tags_round_trip_through_display() {
    for mode in EffectMode::ALL {
        assert_eq!(mode.to_string().parse::<EffectMode>(), Ok(mode));
    }
}

#[test]
fn waves_draws_one_ring_per_band_and_a_pulse() {
    let (res, out) = render(Some(EffectMode::Waves), &levels(0.5), 0.0);
    assert_eq!(res, Ok(9));
    assert_eq!(count(&out, |c| matches!(c, DrawCommand::StrokeCircle { .. })), 8);
    match &out.commands()[8] {
        DrawCommand::FillCircle { radius, .. } => assert!((radius - 35.0).abs() < 1e-4),
        other => panic!("expected pulse, got {other:?}"),
    }
    match &out.commands()[0] {
        // 0.5 * 600 * 0.3 + 50
        DrawCommand::StrokeCircle { radius, .. } => assert!((radius - 140.0).abs() < 1e-4),
        other => panic!("expected ring, got {other:?}"),
    }
}

#[test]
fn particles_count_and_glow() {
    let (_, out) = render(Some(EffectMode::Particles), &levels(0.3), 2.5);
    assert_eq!(out.len(), PARTICLE_COUNT + 1);
}

#[test]
fn bars_spokes_scale_with_levels() {
    let lv = IntensityVector::from_slice(&[0.0, 0.25, 0.5, 0.75, 1.0, 0.5, 0.25, 0.0]);
    let (_, out) = render(Some(EffectMode::Bars), &lv, 0.0);
    let lengths: Vec<f32> = out
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Line { from, to, .. } => Some(from.distance(*to)),
            _ => None,
        })
        .collect();
    assert_eq!(lengths.len(), SPOKE_COUNT);
    let max_len = 600.0 * 0.3;
    for (i, len) in lengths.iter().enumerate() {
        assert!((len - lv.cyclic(i) * max_len).abs() < 1e-3, "spoke {i}: {len}");
    }
}

#[test]
fn ripples_and_spiral_shapes() {
    let (_, ripples) = render(Some(EffectMode::Ripples), &levels(0.6), 4.0);
    assert_eq!(
        count(&ripples, |c| matches!(c, DrawCommand::StrokeCircle { .. })),
        RIPPLE_COUNT
    );

    let (_, spiral) = render(Some(EffectMode::Spiral), &levels(0.6), 4.0);
    assert_eq!(count(&spiral, |c| matches!(c, DrawCommand::Polyline { .. })), SPIRAL_ARMS);
    assert_eq!(
        count(&spiral, |c| matches!(c, DrawCommand::FillCircle { .. })),
        SPIRAL_PARTICLES
    );
    for cmd in spiral.commands() {
        if let DrawCommand::Polyline { points, .. } = cmd {
            assert_eq!(points.len(), 189);
        }
    }
}

#[test]
fn silent_levels_still_render_without_fault() {
    let empty = IntensityVector::from_slice(&[]);
    for mode in EffectMode::ALL {
        let (res, out) = render(Some(mode), &empty, 1.0);
        assert!(res.is_ok(), "{mode}: {res:?}");
        for cmd in out.commands() {
            if let DrawCommand::FillCircle { radius, .. } | DrawCommand::StrokeCircle { radius, .. } = cmd {
                assert!(radius.is_finite() && *radius >= 0.0);
            }
        }
    }
}

#[test]
fn renderers_are_deterministic() {
    for mode in EffectMode::ALL {
        let (_, a) = render(Some(mode), &levels(0.4), 3.3);
        let (_, b) = render(Some(mode), &levels(0.4), 3.3);
        assert_eq!(a.commands(), b.commands());
    }
}

#[test]
fn degenerate_input_is_an_error() {
    let reg = EffectRegistry::default();
    let lv = levels(0.5);
    let mut out = DrawList::new();
    let zero = FrameInput {
        levels: &lv,
        time: 0.0,
        geometry: ViewportGeometry::new(0.0, 300.0, 1.0),
    };
    assert!(matches!(
        reg.render(Some(EffectMode::Bars), &zero, &mut out),
        Err(RenderError::DegenerateViewport { .. })
    ));
    let nan_time = FrameInput {
        levels: &lv,
        time: f32::NAN,
        geometry: ViewportGeometry::new(300.0, 300.0, 1.0),
    };
    assert_eq!(
        reg.render(Some(EffectMode::Bars), &nan_time, &mut out),
        Err(RenderError::NonFiniteTime)
    );
    assert!(out.is_empty());
}
