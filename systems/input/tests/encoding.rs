use std::collections::HashSet;

use duel_arena_core::{EncodedInput, InputButton, PlayerSlot};
use duel_arena_system_input::{BindingError, InputEncoder, KeyBindings};

fn pressed(keys: &[&str]) -> HashSet<String> {
    keys.iter().map(|key| key.to_string()).collect()
}

#[test]
fn default_bindings_validate() {
    let encoder =
        InputEncoder::new(KeyBindings::default()).expect("default bindings must be collision-free");
    let held = pressed(&["w"]);
    let input = encoder.sample(|key| held.contains(key));
    assert!(input.contains(PlayerSlot::One, InputButton::Forward));
}

#[test]
fn no_keys_pressed_yields_the_empty_bitfield() {
    let encoder = InputEncoder::default();
    let input = encoder.sample(|_| false);
    assert_eq!(input, EncodedInput::EMPTY);
}

#[test]
fn identical_key_state_yields_identical_bit_patterns() {
    let encoder = InputEncoder::default();
    let held = pressed(&["w", "f", "up", "m"]);

    let first = encoder.sample(|key| held.contains(key));
    let second = encoder.sample(|key| held.contains(key));

    assert_eq!(first, second);
    assert!(first.contains(PlayerSlot::One, InputButton::Forward));
    assert!(first.contains(PlayerSlot::One, InputButton::Light));
    assert!(first.contains(PlayerSlot::Two, InputButton::Forward));
    assert!(first.contains(PlayerSlot::Two, InputButton::Dash));
}

#[test]
fn player_one_light_attack_sets_bit_four() {
    let encoder = InputEncoder::default();
    let held = pressed(&["f"]);
    let input = encoder.sample(|key| held.contains(key));
    assert_eq!(input.bits(), 1 << 4);
}

#[test]
fn unmapped_keys_are_ignored() {
    let encoder = InputEncoder::default();
    let held = pressed(&["q", "z", "space"]);
    let input = encoder.sample(|key| held.contains(key));
    assert_eq!(input, EncodedInput::EMPTY);
}

#[test]
fn bindings_are_normalised_case_insensitively() {
    let mut bindings = KeyBindings::default();
    bindings.player_one.forward = "  W ".to_string();
    let encoder = InputEncoder::new(bindings).expect("case differences are not collisions");

    let held = pressed(&["w"]);
    let input = encoder.sample(|key| held.contains(key));
    assert!(input.contains(PlayerSlot::One, InputButton::Forward));
}

#[test]
fn duplicate_keys_are_rejected() {
    let mut bindings = KeyBindings::default();
    bindings.player_two.dash = "w".to_string();

    let error = InputEncoder::new(bindings).expect_err("duplicate key must be rejected");
    assert_eq!(
        error,
        BindingError::DuplicateKey {
            key: "w".to_string()
        }
    );
}

#[test]
fn empty_bindings_are_rejected() {
    let mut bindings = KeyBindings::default();
    bindings.player_one.block = String::new();

    let error = InputEncoder::new(bindings).expect_err("empty binding must be rejected");
    assert!(matches!(error, BindingError::EmptyBinding { .. }));
}

#[test]
fn bindings_round_trip_through_toml() {
    let bindings = KeyBindings::default();
    let serialized = toml::to_string(&bindings).expect("bindings should serialise");
    let restored: KeyBindings = toml::from_str(&serialized).expect("bindings should deserialise");
    assert_eq!(restored, bindings);
}

#[test]
fn both_players_can_hold_every_button_at_once() {
    let encoder = InputEncoder::default();
    let bindings = encoder.bindings().clone();

    let mut held = HashSet::new();
    for slot in PlayerSlot::BOTH {
        for button in InputButton::ALL {
            let _ = held.insert(bindings.binding(slot, button).to_string());
        }
    }

    let input = encoder.sample(|key| held.contains(key));
    assert_eq!(input.bits().count_ones(), 18);
}
