use super::FrameInput;
use crate::constants::*;
use crate::draw::{rotating_hue, DrawList, Fill, Hsla};
use glam::Vec2;

pub(super) fn render(input: &FrameInput<'_>, out: &mut DrawList) {
    let center = input.center();
    let avg = input.average();
    let t = input.time;

    let orbit = Vec2::new(
        PARTICLE_ORBIT_X.0 + avg * PARTICLE_ORBIT_X.1,
        PARTICLE_ORBIT_Y.0 + avg * PARTICLE_ORBIT_Y.1,
    );
    let size = PARTICLE_SIZE.0 + avg * PARTICLE_SIZE.1;

    for i in 0..PARTICLE_COUNT {
        let phase = t + i as f32 * PARTICLE_PHASE_STEP;
        let pos = center + Vec2::new(phase.cos(), (phase * PARTICLE_Y_FREQ).sin()) * orbit;
        let hue = rotating_hue(t, 80.0, i, 12.0);
        out.fill_circle(pos, size, Fill::Solid(Hsla::new(hue, 80.0, 70.0, avg * 0.9)));
    }

    let glow = GLOW_RADIUS.0 + avg * GLOW_RADIUS.1;
    let hue = rotating_hue(t, 120.0, 0, 0.0);
    out.fill_circle(
        center,
        glow,
        Fill::Radial {
            inner: Hsla::new(hue, 80.0, 70.0, 0.6),
            outer: Hsla::new(hue, 60.0, 50.0, 0.0),
        },
    );
}
