#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Duel Arena frontend.
//!
//! This crate defines the boundary between the presentation layer and the
//! combat simulation engine. Adapters sample keyboard state into an
//! [`EncodedInput`] bitfield, the scheduler feeds exactly one bitfield to
//! the engine per simulation tick, and the engine answers with an immutable
//! [`Snapshot`] that every downstream component treats as read-only.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Duel Arena.";

/// Number of semantic input bits reserved per player.
pub const PLAYER_BUTTON_COUNT: u32 = 9;

/// Identifies one of the two player slots in a match.
///
/// Slot order is fixed and meaningful: snapshots always list player one
/// first, and the encoded-input layout places player one in the low bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    /// The left-hand player occupying the low nine input bits.
    One,
    /// The right-hand player occupying the high nine input bits.
    Two,
}

impl PlayerSlot {
    /// Both slots in canonical order.
    pub const BOTH: [Self; 2] = [Self::One, Self::Two];

    /// Zero-based index used for snapshot fighter lookup.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// Bit offset of this player's input group within [`EncodedInput`].
    #[must_use]
    pub const fn bit_offset(self) -> u32 {
        match self {
            Self::One => 0,
            Self::Two => PLAYER_BUTTON_COUNT,
        }
    }

    /// Returns the opposing slot.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "Player 1"),
            Self::Two => write!(f, "Player 2"),
        }
    }
}

/// Semantic input buttons recognised by the combat engine.
///
/// The declaration order fixes each button's bit index. The engine's decoder
/// relies on this table, so the order must never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputButton {
    /// Advance toward the opponent.
    Forward,
    /// Retreat away from the opponent.
    Backward,
    /// Guard step to the fighter's left.
    GuardLeft,
    /// Guard step to the fighter's right.
    GuardRight,
    /// Light attack.
    Light,
    /// Heavy attack.
    Heavy,
    /// Special attack.
    Special,
    /// Hold a defensive block.
    Block,
    /// Burst dash.
    Dash,
}

impl InputButton {
    /// Every button in canonical bit order.
    pub const ALL: [Self; 9] = [
        Self::Forward,
        Self::Backward,
        Self::GuardLeft,
        Self::GuardRight,
        Self::Light,
        Self::Heavy,
        Self::Special,
        Self::Block,
        Self::Dash,
    ];

    /// Bit index of this button within a player's nine-bit group.
    #[must_use]
    pub const fn bit_index(self) -> u32 {
        match self {
            Self::Forward => 0,
            Self::Backward => 1,
            Self::GuardLeft => 2,
            Self::GuardRight => 3,
            Self::Light => 4,
            Self::Heavy => 5,
            Self::Special => 6,
            Self::Block => 7,
            Self::Dash => 8,
        }
    }
}

/// Packed per-tick action vector for both players.
///
/// Eighteen semantic bits: player one occupies bits 0..=8 and player two the
/// same layout shifted up by [`PLAYER_BUTTON_COUNT`]. Values are immutable;
/// the builder-style [`with`](Self::with) returns a new bitfield, so the
/// value handed to the engine can never be mutated afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedInput(u32);

impl EncodedInput {
    /// The no-keys-pressed action vector.
    pub const EMPTY: Self = Self(0);

    /// Reconstructs a bitfield from its raw wire representation.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw wire representation consumed by the engine decoder.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns a copy with the given player's button bit set.
    #[must_use]
    pub const fn with(self, slot: PlayerSlot, button: InputButton) -> Self {
        Self(self.0 | 1 << (slot.bit_offset() + button.bit_index()))
    }

    /// Reports whether the given player's button bit is set.
    #[must_use]
    pub const fn contains(self, slot: PlayerSlot, button: InputButton) -> bool {
        self.0 & 1 << (slot.bit_offset() + button.bit_index()) != 0
    }

    /// Reports whether no button is held by either player.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Match-level state machine governing overlay presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Phase {
    /// Pre-round countdown; fighters are locked in place.
    Countdown,
    /// Live combat.
    Fighting,
    /// A round just ended; the engine lingers before the next countdown.
    RoundOver,
    /// The match is decided.
    MatchOver,
}

/// Sub-phase of an attack while a fighter is in the attacking state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AttackPhase {
    /// Wind-up frames before the hitbox becomes live.
    Startup,
    /// Frames during which the attack can connect.
    Active,
    /// Cool-down frames after the hitbox expires.
    Recovery,
}

/// Per-fighter combat state reported by the engine.
///
/// Exactly one variant is active per fighter per snapshot. The attack
/// sub-phase exists only inside [`Attacking`](Self::Attacking), so an attack
/// phase can never coexist with a non-attacking state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FighterState {
    /// Standing neutral.
    Idle,
    /// Walking or strafing.
    Moving,
    /// Executing an attack in the embedded sub-phase.
    Attacking {
        /// Current sub-phase of the active attack.
        phase: AttackPhase,
    },
    /// Holding a block.
    Blocking,
    /// Burst dashing.
    Dashing,
    /// Staggered after taking a hit.
    HitStun,
    /// Launched off the ground.
    Airborne,
    /// Knocked down on the floor.
    Knockdown,
    /// Rising from a knockdown.
    GettingUp,
}

/// Direction a fighter faces along the arena's principal axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Facing the positive principal axis.
    Right,
    /// Facing the negative principal axis.
    Left,
}

impl Facing {
    /// Signed unit multiplier along the principal axis.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }
}

/// World-space position with three scalar coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// Coordinate along the principal (left/right) axis.
    pub x: f32,
    /// Height above the arena floor.
    pub y: f32,
    /// Depth coordinate across the arena.
    pub z: f32,
}

impl Vec3 {
    /// Creates a new position from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Normalised quantity clamped to the `0.0..=1.0` range on construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fraction(f32);

impl Fraction {
    /// The empty fraction.
    pub const ZERO: Self = Self(0.0);

    /// The full fraction.
    pub const FULL: Self = Self(1.0);

    /// Creates a fraction, clamping the value into `0.0..=1.0`.
    ///
    /// Non-finite inputs collapse to zero so a misbehaving engine cannot
    /// poison bar widths downstream.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    /// The clamped value.
    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }
}

/// Identifier naming an entry of the engine's fighter roster.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FighterId(String);

impl FighterId {
    /// Creates an identifier from any string-like value.
    #[must_use]
    pub fn new<T>(name: T) -> Self
    where
        T: Into<String>,
    {
        Self(name.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully-resolved view of one fighter at a tick boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FighterView {
    /// Roster identity of the fighter.
    pub id: FighterId,
    /// Weapon or archetype label shown on the HUD.
    pub archetype: String,
    /// Remaining health as a fraction of the maximum.
    pub health: Fraction,
    /// Remaining stamina as a fraction of the maximum.
    pub stamina: Fraction,
    /// Rounds won so far in the current match.
    pub round_wins: u32,
    /// World position resolved by the engine.
    pub position: Vec3,
    /// Facing along the arena's principal axis.
    pub facing: Facing,
    /// Discrete combat state, including any active attack sub-phase.
    pub state: FighterState,
}

/// Immutable view of the whole simulation at one tick boundary.
///
/// Snapshots are produced only by the engine and never mutated downstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Match-level phase driving overlay presentation.
    pub phase: Phase,
    /// One-based number of the round in progress.
    pub round: u32,
    /// Seconds remaining in the round; non-increasing within a round.
    pub round_timer: f32,
    /// Countdown display string, present while the phase is [`Phase::Countdown`].
    pub countdown: Option<String>,
    /// Winner of the match once the phase is [`Phase::MatchOver`].
    pub winner: Option<PlayerSlot>,
    /// Human-readable description of the most recent hit.
    pub last_hit: Option<String>,
    /// Both fighters in fixed order: player one first, player two second.
    pub fighters: [FighterView; 2],
}

impl Snapshot {
    /// The fighter occupying the given player slot.
    #[must_use]
    pub fn fighter(&self, slot: PlayerSlot) -> &FighterView {
        &self.fighters[slot.index()]
    }
}

/// Axis-aligned bounds of the playable arena floor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    /// Lower bound along the principal axis.
    pub min_x: f32,
    /// Upper bound along the principal axis.
    pub max_x: f32,
    /// Lower bound along the depth axis.
    pub min_z: f32,
    /// Upper bound along the depth axis.
    pub max_z: f32,
}

impl ArenaBounds {
    /// Creates new arena bounds.
    #[must_use]
    pub const fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Extent along the principal axis.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Extent along the depth axis.
    #[must_use]
    pub const fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }
}

/// Failures surfaced by the engine boundary.
///
/// Fatal to the frame in which they occur: callers must not retry on the
/// per-frame path and must leave the last good snapshot untouched.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine failed to advance the simulation by one tick.
    #[error("combat engine failed to advance the simulation: {reason}")]
    AdvanceFailed {
        /// Engine-provided description of the failure.
        reason: String,
    },
    /// The engine returned a snapshot violating its own contract.
    #[error("combat engine produced an invalid snapshot: {reason}")]
    InvalidSnapshot {
        /// Description of the contract violation.
        reason: String,
    },
}

/// Interface of the external combat simulation consumed by this frontend.
///
/// All calls are synchronous; [`advance`](Self::advance) performs exactly one
/// fixed-duration tick. Combat resolution, physics and match rules live
/// entirely behind this boundary.
pub trait CombatEngine {
    /// Advances the simulation by one tick with the given action vector.
    fn advance(&mut self, input: EncodedInput) -> Result<Snapshot, EngineError>;

    /// Returns the current snapshot without advancing the simulation.
    fn current_snapshot(&self) -> Snapshot;

    /// Ordered list of fighter identifiers available for selection.
    fn roster(&self) -> Vec<FighterId>;

    /// Bounds of the playable arena floor.
    fn arena_bounds(&self) -> ArenaBounds;
}
