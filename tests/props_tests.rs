// Container attribute parsing, exercised on the host.

#![allow(dead_code)]
mod props {
    include!("../src/props.rs");
}

use props::{parse_flag, parse_seed, ContainerAttrs};
use viz_core::EffectMode;

fn attrs(effect: Option<&str>, playing: Option<&str>) -> ContainerAttrs {
    ContainerAttrs {
        effect: effect.map(str::to_string),
        playing: playing.map(str::to_string),
        ..ContainerAttrs::default()
    }
}

#[test]
fn playing_flag_accepts_html_boolean_forms() {
    for on in ["", "true", "TRUE", "1", "yes", " on "] {
        assert!(parse_flag(Some(on)), "{on:?}");
    }
    for off in ["false", "0", "no", "paused"] {
        assert!(!parse_flag(Some(off)), "{off:?}");
    }
    assert!(!parse_flag(None));
}

#[test]
fn seed_parses_unsigned_integers_only() {
    assert_eq!(parse_seed(Some("42")), Some(42));
    assert_eq!(parse_seed(Some(" 7 ")), Some(7));
    assert_eq!(parse_seed(Some("-1")), None);
    assert_eq!(parse_seed(Some("abc")), None);
    assert_eq!(parse_seed(None), None);
}

#[test]
fn missing_effect_attribute_selects_waves() {
    let props = attrs(None, Some("true")).props();
    assert_eq!(props.effect, Some(EffectMode::Waves));
    assert!(props.is_playing);
}

#[test]
fn empty_effect_attribute_counts_as_unset() {
    assert_eq!(attrs(Some(""), None).props().effect, Some(EffectMode::Waves));
}

#[test]
fn unknown_effect_attribute_selects_nothing() {
    let props = attrs(Some("plasma"), None).props();
    assert_eq!(props.effect, None);
    assert!(!props.is_playing);
}

#[test]
fn known_effect_attribute_is_case_insensitive() {
    let props = attrs(Some("Spiral"), None).props();
    assert_eq!(props.effect, Some(EffectMode::Spiral));
}

#[test]
fn blank_track_is_treated_as_absent() {
    let mut a = attrs(None, None);
    a.track = Some("   ".into());
    assert_eq!(a.props().current_track, None);
    a.track = Some("Clair de Lune".into());
    assert_eq!(a.props().current_track.as_deref(), Some("Clair de Lune"));
}

#[test]
fn seed_attribute_flows_into_config() {
    let mut a = attrs(None, None);
    a.seed = Some("99".into());
    let config = a.config();
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.tick_interval, viz_core::VisualizerConfig::default().tick_interval);
}
