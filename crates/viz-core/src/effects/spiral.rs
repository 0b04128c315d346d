use super::{polar, FrameInput};
use crate::constants::*;
use crate::draw::{rotating_hue, DrawList, Fill, Hsla, Stroke};
use std::f32::consts::PI;

pub(super) fn render(input: &FrameInput<'_>, out: &mut DrawList) {
    let center = input.center();
    let avg = input.average();
    let t = input.time;
    let steps = (SPIRAL_TURNS_RAD / SPIRAL_ANGLE_STEP).ceil() as usize;

    for arm in 0..SPIRAL_ARMS {
        let rotation = t + arm as f32 * PI * 0.67;
        let points = (0..steps)
            .map(|s| {
                let angle = s as f32 * SPIRAL_ANGLE_STEP;
                let radius = angle * SPIRAL_ARM_GROWTH + avg * SPIRAL_ARM_SPAN;
                polar(center, angle + rotation, radius)
            })
            .collect();
        let hue = rotating_hue(t, 60.0, arm, 120.0);
        out.polyline(
            points,
            Stroke::new(Hsla::new(hue, 75.0, 65.0, 0.6), SPIRAL_LINE_WIDTH),
        );
    }

    let size = SPIRAL_PARTICLE_SIZE.0 + avg * SPIRAL_PARTICLE_SIZE.1;
    for i in 0..SPIRAL_PARTICLES {
        let angle = (t * 2.0 + i as f32 * 0.4).rem_euclid(SPIRAL_TURNS_RAD);
        let radius = angle * SPIRAL_PARTICLE_GROWTH + avg * SPIRAL_PARTICLE_SPAN;
        let hue = rotating_hue(t, 100.0, i, 24.0);
        out.fill_circle(
            polar(center, angle, radius),
            size,
            Fill::Solid(Hsla::new(hue, 80.0, 70.0, 0.8)),
        );
    }
}
