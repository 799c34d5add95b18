#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic input system that packs raw key state into action bitfields.
//!
//! Key bindings are configuration, not logic: adapters describe which
//! physical key answers for each semantic button, and [`InputEncoder::sample`]
//! deterministically folds the currently pressed keys into an
//! [`EncodedInput`]. Sampling is a pure read: it never blocks, never fails,
//! and a no-keys-pressed state yields the empty bitfield.

use std::collections::HashSet;

use duel_arena_core::{EncodedInput, InputButton, PlayerSlot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key assignments for a single player's nine semantic buttons.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBindings {
    /// Key advancing toward the opponent.
    pub forward: String,
    /// Key retreating from the opponent.
    pub backward: String,
    /// Key guard-stepping to the fighter's left.
    pub guard_left: String,
    /// Key guard-stepping to the fighter's right.
    pub guard_right: String,
    /// Key triggering a light attack.
    pub light: String,
    /// Key triggering a heavy attack.
    pub heavy: String,
    /// Key triggering a special attack.
    pub special: String,
    /// Key holding a block.
    pub block: String,
    /// Key triggering a dash.
    pub dash: String,
}

impl PlayerBindings {
    /// The key bound to the given semantic button.
    #[must_use]
    pub fn binding(&self, button: InputButton) -> &str {
        match button {
            InputButton::Forward => &self.forward,
            InputButton::Backward => &self.backward,
            InputButton::GuardLeft => &self.guard_left,
            InputButton::GuardRight => &self.guard_right,
            InputButton::Light => &self.light,
            InputButton::Heavy => &self.heavy,
            InputButton::Special => &self.special,
            InputButton::Block => &self.block,
            InputButton::Dash => &self.dash,
        }
    }

    fn normalized(&self) -> Self {
        Self {
            forward: normalize_key(&self.forward),
            backward: normalize_key(&self.backward),
            guard_left: normalize_key(&self.guard_left),
            guard_right: normalize_key(&self.guard_right),
            light: normalize_key(&self.light),
            heavy: normalize_key(&self.heavy),
            special: normalize_key(&self.special),
            block: normalize_key(&self.block),
            dash: normalize_key(&self.dash),
        }
    }
}

/// Key assignments for both players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Bindings for the left-hand player.
    pub player_one: PlayerBindings,
    /// Bindings for the right-hand player.
    pub player_two: PlayerBindings,
}

impl KeyBindings {
    /// The key bound to the given player's semantic button.
    #[must_use]
    pub fn binding(&self, slot: PlayerSlot, button: InputButton) -> &str {
        match slot {
            PlayerSlot::One => self.player_one.binding(button),
            PlayerSlot::Two => self.player_two.binding(button),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            player_one: PlayerBindings {
                forward: "w".to_string(),
                backward: "s".to_string(),
                guard_left: "a".to_string(),
                guard_right: "d".to_string(),
                light: "f".to_string(),
                heavy: "g".to_string(),
                special: "h".to_string(),
                block: "c".to_string(),
                dash: "v".to_string(),
            },
            player_two: PlayerBindings {
                forward: "up".to_string(),
                backward: "down".to_string(),
                guard_left: "left".to_string(),
                guard_right: "right".to_string(),
                light: "j".to_string(),
                heavy: "k".to_string(),
                special: "l".to_string(),
                block: "n".to_string(),
                dash: "m".to_string(),
            },
        }
    }
}

/// Errors raised while validating a binding table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    /// The same physical key was assigned to more than one button.
    #[error("key '{key}' is bound to more than one button")]
    DuplicateKey {
        /// Normalised name of the conflicting key.
        key: String,
    },
    /// A button was left without a key assignment.
    #[error("{slot:?} {button:?} has an empty key binding")]
    EmptyBinding {
        /// Player whose table is incomplete.
        slot: PlayerSlot,
        /// Button missing an assignment.
        button: InputButton,
    },
}

/// Pure encoder that folds pressed keys into the canonical bitfield.
#[derive(Clone, Debug)]
pub struct InputEncoder {
    bindings: KeyBindings,
}

impl InputEncoder {
    /// Creates an encoder from a validated binding table.
    ///
    /// Key names are normalised case-insensitively. Returns an error when a
    /// key answers for more than one button or a binding is empty, so no two
    /// physical keys can ever set the same bit.
    pub fn new(bindings: KeyBindings) -> Result<Self, BindingError> {
        let bindings = KeyBindings {
            player_one: bindings.player_one.normalized(),
            player_two: bindings.player_two.normalized(),
        };

        let mut seen: HashSet<&str> = HashSet::new();
        for slot in PlayerSlot::BOTH {
            for button in InputButton::ALL {
                let key = bindings.binding(slot, button);
                if key.is_empty() {
                    return Err(BindingError::EmptyBinding { slot, button });
                }
                if !seen.insert(key) {
                    return Err(BindingError::DuplicateKey {
                        key: key.to_string(),
                    });
                }
            }
        }

        Ok(Self { bindings })
    }

    /// The normalised binding table backing this encoder.
    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Samples the current key state into an action bitfield.
    ///
    /// `is_pressed` answers whether the named key is currently held. Keys
    /// outside the binding table are never queried, identical key state
    /// always yields an identical bit pattern, and no keys pressed yields
    /// [`EncodedInput::EMPTY`].
    #[must_use]
    pub fn sample<F>(&self, is_pressed: F) -> EncodedInput
    where
        F: Fn(&str) -> bool,
    {
        let mut input = EncodedInput::EMPTY;
        for slot in PlayerSlot::BOTH {
            for button in InputButton::ALL {
                if is_pressed(self.bindings.binding(slot, button)) {
                    input = input.with(slot, button);
                }
            }
        }
        input
    }
}

impl Default for InputEncoder {
    fn default() -> Self {
        // The default table is lowercase and collision-free; validation is
        // exercised by the integration tests.
        Self {
            bindings: KeyBindings::default(),
        }
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}
