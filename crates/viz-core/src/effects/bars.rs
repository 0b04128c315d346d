use super::{polar, FrameInput};
use crate::constants::*;
use crate::draw::{rotating_hue, DrawList, Fill, Hsla, Stroke};
use std::f32::consts::TAU;

// Spokes radiate from a fixed inner radius; band index cycles around the ring.
pub(super) fn render(input: &FrameInput<'_>, out: &mut DrawList) {
    let center = input.center();
    let max_len = input.short_side() * SPOKE_LENGTH_SPAN;
    let t = input.time;

    for i in 0..SPOKE_COUNT {
        let angle = i as f32 / SPOKE_COUNT as f32 * TAU;
        let len = input.levels.cyclic(i) * max_len;
        let hue = rotating_hue(t, 50.0, i, SPOKE_HUE_STEP);
        out.line(
            polar(center, angle, SPOKE_INNER_RADIUS),
            polar(center, angle, SPOKE_INNER_RADIUS + len),
            Stroke::new(Hsla::new(hue, 80.0, 65.0, 0.8), SPOKE_WIDTH).round(),
        );
    }

    let hue = rotating_hue(t, 60.0, 0, 0.0);
    out.fill_circle(center, HUB_RADIUS, Fill::Solid(Hsla::new(hue, 70.0, 60.0, 0.7)));
}
