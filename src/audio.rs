use viz_core::piano::NoteEnvelope;
use web_sys as web;

pub fn create_context() -> anyhow::Result<web::AudioContext> {
    web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext unavailable: {:?}", e))
}

/// Browsers start contexts suspended until a user gesture; every note
/// retries the resume.
#[inline]
pub fn ensure_running(audio_ctx: &web::AudioContext) {
    if audio_ctx.state() == web::AudioContextState::Suspended {
        _ = audio_ctx.resume();
    }
}

/// One sine note: linear attack to the envelope volume, exponential
/// release to the floor, then the oscillator stops.
pub fn play_note(
    audio_ctx: &web::AudioContext,
    frequency_hz: f32,
    envelope: &NoteEnvelope,
) -> Result<(), wasm_bindgen::JsValue> {
    ensure_running(audio_ctx);
    let src = web::OscillatorNode::new(audio_ctx)?;
    let gain = web::GainNode::new(audio_ctx)?;
    src.set_type(web::OscillatorType::Sine);
    src.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&audio_ctx.destination())?;

    let now = audio_ctx.current_time();
    src.frequency().set_value_at_time(frequency_hz, now)?;
    let g = gain.gain();
    g.set_value_at_time(0.0, now)?;
    g.linear_ramp_to_value_at_time(envelope.volume, now + envelope.attack_sec)?;
    // exponential ramps cannot reach zero
    g.exponential_ramp_to_value_at_time(envelope.floor.max(1e-4), now + envelope.release_sec)?;

    src.start_with_when(now)?;
    src.stop_with_when(now + envelope.release_sec)?;
    Ok(())
}
