use super::FrameInput;
use crate::constants::*;
use crate::draw::{rotating_hue, DrawList, Fill, Hsla, Stroke};

// One ring per band plus a radial pulse sized by the average level.
pub(super) fn render(input: &FrameInput<'_>, out: &mut DrawList) {
    let center = input.center();
    let short = input.short_side();
    let t = input.time;

    for (i, level) in input.levels.iter().enumerate() {
        let radius = level * short * WAVES_RADIUS_SPAN + WAVES_RADIUS_BASE;
        let hue = rotating_hue(t, WAVES_HUE_RATE, i, WAVES_HUE_STEP);
        let stroke = Stroke::new(Hsla::new(hue, 70.0, 60.0, level * 0.4), WAVES_LINE_WIDTH);
        out.stroke_circle(center, radius, stroke);
    }

    let pulse = PULSE_RADIUS_BASE + input.average() * PULSE_RADIUS_SPAN;
    let hue = rotating_hue(t, PULSE_HUE_RATE, 0, 0.0);
    out.fill_circle(
        center,
        pulse,
        Fill::Radial {
            inner: Hsla::new(hue, 90.0, 80.0, 0.8),
            outer: Hsla::new(hue, 70.0, 60.0, 0.0),
        },
    );
}
