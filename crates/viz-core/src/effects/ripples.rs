use super::FrameInput;
use crate::constants::*;
use crate::draw::{rotating_hue, DrawList, Fill, Hsla, Stroke};

pub(super) fn render(input: &FrameInput<'_>, out: &mut DrawList) {
    let center = input.center();
    let max_radius = input.short_side() * RIPPLE_RADIUS_SPAN;
    let avg = input.average();
    let t = input.time;

    for i in 0..RIPPLE_COUNT {
        let wave = (t + i as f32 * RIPPLE_PHASE_STEP).sin();
        let radius = (wave * 0.5 + 0.5) * max_radius;
        // Troughs go negative; Hsla clamps those rings to invisible.
        let alpha = (wave * 0.3 + 0.2) * avg;
        let hue = rotating_hue(t, 40.0, i, 60.0);
        out.stroke_circle(
            center,
            radius,
            Stroke::new(Hsla::new(hue, 70.0, 65.0, alpha), RIPPLE_LINE_WIDTH),
        );
    }

    let core = RIPPLE_CORE.0 + avg * RIPPLE_CORE.1;
    let hue = rotating_hue(t, 150.0, 0, 0.0);
    out.fill_circle(center, core, Fill::Solid(Hsla::new(hue, 85.0, 75.0, 0.9)));
}
