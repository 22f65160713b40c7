//! End-to-end typing sessions through the dispatcher.
//!
//! Time is driven by a `ManualClock` so double taps are deterministic.

use softkey_core::{
    BufferMutation, Config, KeyDispatcher, KeyEvent, LayoutTable, ManualClock, Notification,
    ReplacementTable, ShiftState, SpecialKey,
};

fn keyboard() -> KeyDispatcher<ManualClock> {
    let config = Config::default();
    let layout = LayoutTable::qwerty(&config.weights);
    KeyDispatcher::with_clock(config, layout, ManualClock::at_millis(1_000))
}

/// Press keys one by one, half a second apart. `_` is the space bar.
fn press(keyboard: &mut KeyDispatcher<ManualClock>, keys: &str) -> Vec<Notification> {
    let mut notes = Vec::new();
    for c in keys.chars() {
        keyboard.clock().advance_millis(500);
        let event = match c {
            '_' => KeyEvent::special(SpecialKey::Space),
            other => KeyEvent::character(other.to_string()),
        };
        notes.extend(keyboard.process_key(event));
    }
    notes
}

#[test]
fn test_hello_world_sentence() {
    let mut kb = keyboard();

    press(&mut kb, "hello");
    assert_eq!(kb.context().buffer_text, "Hello");

    press(&mut kb, "_");
    assert_eq!(kb.context().buffer_text, "Hello ");

    press(&mut kb, "world");
    assert_eq!(kb.context().buffer_text, "Hello world");

    press(&mut kb, ".");
    assert_eq!(kb.context().buffer_text, "Hello world.");
    assert!(!kb.context().auto_capitalize);

    press(&mut kb, "_");
    assert_eq!(kb.context().buffer_text, "Hello world. ");
    assert!(kb.context().auto_capitalize);

    press(&mut kb, "again");
    assert_eq!(kb.context().buffer_text, "Hello world. Again");
}

#[test]
fn test_every_mutation_is_reported() {
    let mut kb = keyboard();
    let notes = press(&mut kb, "hi_");

    let mutations: Vec<BufferMutation> = notes
        .into_iter()
        .filter_map(|n| match n {
            Notification::BufferChanged(m) => Some(m),
            _ => None,
        })
        .collect();

    assert_eq!(mutations.len(), 3);
    assert_eq!(mutations[0].key, "h");
    assert_eq!(mutations[0].resulting_text, "H");
    assert_eq!(mutations[2].key, "space");
    assert_eq!(mutations[2].resulting_text, "Hi ");
}

#[test]
fn test_shift_timing_through_dispatcher() {
    let mut kb = keyboard();
    press(&mut kb, "a_");

    // two taps 299ms apart: caps lock
    kb.process_key(KeyEvent::special(SpecialKey::Shift));
    kb.clock().advance_millis(299);
    kb.process_key(KeyEvent::special(SpecialKey::Shift));
    assert_eq!(kb.context().shift_state, ShiftState::CapsLock);

    press(&mut kb, "ok");
    assert_eq!(kb.context().buffer_text, "A OK");

    // a later single tap turns it off
    kb.clock().advance_millis(1_000);
    kb.process_key(KeyEvent::special(SpecialKey::Shift));
    assert_eq!(kb.context().shift_state, ShiftState::Off);

    // two taps exactly 300ms apart: shift then off, no caps lock
    kb.clock().advance_millis(1_000);
    kb.process_key(KeyEvent::special(SpecialKey::Shift));
    kb.clock().advance_millis(300);
    kb.process_key(KeyEvent::special(SpecialKey::Shift));
    assert_eq!(kb.context().shift_state, ShiftState::Off);
}

#[test]
fn test_numbers_mode_typing() {
    let mut kb = keyboard();
    kb.set_text("Room ");
    kb.process_key(KeyEvent::special(SpecialKey::Numbers));
    press(&mut kb, "42");
    kb.process_key(KeyEvent::special(SpecialKey::Letters));
    press(&mut kb, "_b");
    assert_eq!(kb.context().buffer_text, "Room 42 b");
}

#[test]
fn test_shortcut_expansion_flow() {
    let mut kb = keyboard();
    kb.set_replacement_table(ReplacementTable::from_pairs([
        ("omw", "On my way!"),
        ("om", "Oh my!"),
        ("ty", "Thank you"),
    ]));

    press(&mut kb, "ok_omw");
    assert_eq!(kb.context().last_word, "omw");
    assert_eq!(kb.context().suggestions.len(), 1);

    kb.apply_suggestion(0);
    assert_eq!(kb.context().buffer_text, "Ok On my way!");
    assert!(kb.context().suggestions.is_empty());
}

#[test]
fn test_host_overwrite_starts_from_existing_content() {
    let mut kb = keyboard();
    let notes = kb.set_text("Dear team,\n");
    assert_eq!(
        notes,
        vec![Notification::BufferChanged(BufferMutation {
            key: "set_text".to_string(),
            resulting_text: "Dear team,\n".to_string(),
        })]
    );
    assert_eq!(kb.context().last_word, "team,");

    press(&mut kb, "x");
    assert_eq!(kb.context().buffer_text, "Dear team,\nx");
}
