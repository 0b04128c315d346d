use viz_core::piano::{midi_to_hz, Keyboard, NoteEnvelope, PianoState, KEY_COUNT, PRESS_FEEDBACK_MS};

#[test]
fn table_spans_two_octaves() {
    let kb = Keyboard::new();
    assert_eq!(kb.keys().len(), KEY_COUNT);
    let black: Vec<&str> = kb
        .keys()
        .iter()
        .filter(|k| k.is_black)
        .map(|k| k.note.as_str())
        .collect();
    assert_eq!(black, ["C#4", "D#4", "F#4", "G#4", "A#4", "C#5", "D#5", "F#5", "G#5", "A#5"]);
    let c5 = kb.by_note("C5").unwrap();
    assert!((c5.frequency_hz - 523.25).abs() < 0.01);
}

#[test]
fn computer_keys_map_to_first_octave() {
    let kb = Keyboard::new();
    assert_eq!(kb.for_computer_key("a").unwrap().note, "C4");
    assert_eq!(kb.for_computer_key("W").unwrap().note, "C#4");
    assert_eq!(kb.for_computer_key("h").unwrap().note, "A4");
    assert_eq!(kb.for_computer_key("k").unwrap().note, "C5");
    assert!(kb.for_computer_key("z").is_none());
    assert!(kb.for_computer_key("Enter").is_none());
    assert!(kb.for_computer_key("").is_none());
}

#[test]
fn held_key_does_not_retrigger() {
    let mut state = PianoState::new();
    assert!(state.press("C4", 0.0));
    assert!(!state.press("C4", 50.0));
    assert!(state.press("D4", 50.0));
    assert!(state.is_pressed("C4", 199.0));
    assert!(!state.is_pressed("C4", PRESS_FEEDBACK_MS));
    assert!(state.press("C4", 250.0));
}

#[test]
fn clicks_always_sound_and_extend_feedback() {
    let mut state = PianoState::new();
    assert!(state.press("C4", 0.0));
    // a second click 120 ms later is not a key-repeat
    state.retrigger("C4", 120.0);
    assert!(state.is_pressed("C4", 250.0));
    assert!(state.expire(250.0).is_empty());
    assert_eq!(state.expire(120.0 + PRESS_FEEDBACK_MS), vec!["C4".to_string()]);

    // retrigger on an idle note lights it like a fresh press
    state.retrigger("E4", 500.0);
    assert!(state.is_pressed("E4", 600.0));
    assert!(!state.press("E4", 650.0));
}

#[test]
fn expire_reports_released_notes() {
    let mut state = PianoState::new();
    state.press("E4", 0.0);
    state.press("G4", 100.0);
    let mut done = state.expire(250.0);
    done.sort();
    assert_eq!(done, vec!["E4".to_string()]);
    assert_eq!(state.expire(400.0), vec!["G4".to_string()]);
}

#[test]
fn envelope_defaults() {
    let env = NoteEnvelope::default();
    assert_eq!(env.volume, 0.3);
    assert!(env.attack_sec < env.release_sec);
    assert!(env.floor > 0.0);
    assert_eq!(env.with_volume(4.0).volume, 1.0);
    assert!((midi_to_hz(69.0) - 440.0).abs() < 1e-4);
}
