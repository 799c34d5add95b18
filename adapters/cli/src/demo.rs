//! Scripted stand-in combat engine used by the demo binary.
//!
//! The authoritative simulation is an external collaborator; this engine
//! exists so the presentation stack can be exercised end to end. It honors
//! the [`CombatEngine`] contract — fixed ticks, packed input decoding, full
//! snapshots — with deliberately simple combat: straight-line movement, a
//! canned attack timeline and first-to-two rounds.

use anyhow::bail;
use duel_arena_core::{
    ArenaBounds, AttackPhase, CombatEngine, EncodedInput, EngineError, Facing, FighterId,
    FighterState, FighterView, Fraction, InputButton, Phase, PlayerSlot, Snapshot, Vec3,
};

const COUNTDOWN_TICKS: u32 = 180;
const ROUND_TICKS: u32 = 60 * 60;
const ROUND_OVER_TICKS: u32 = 120;
const ROUNDS_TO_WIN: u32 = 2;

const WALK_SPEED: f32 = 0.045;
const DASH_SPEED: f32 = 0.11;
const HIT_RANGE: f32 = 1.25;
const STUN_TICKS: u32 = 18;

const ATTACK_STARTUP: u32 = 6;
const ATTACK_ACTIVE: u32 = 6;
const ATTACK_RECOVERY: u32 = 10;
const ATTACK_TOTAL: u32 = ATTACK_STARTUP + ATTACK_ACTIVE + ATTACK_RECOVERY;

const BOUNDS: ArenaBounds = ArenaBounds::new(-3.2, 3.2, -1.6, 1.6);
const SPAWN_X: [f32; 2] = [-1.5, 1.5];

/// The built-in roster available to the demo binary.
pub(crate) const ROSTER: [(&str, &str); 5] = [
    ("Kael", "Katana"),
    ("Knight", "Longsword"),
    ("Zara", "Twin Daggers"),
    ("Magnus", "Warhammer"),
    ("Orin", "Quarterstaff"),
];

/// Names every fighter the demo engine can field.
pub(crate) fn available_fighters() -> Vec<FighterId> {
    ROSTER.iter().map(|(name, _)| FighterId::new(*name)).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AttackKind {
    Light,
    Heavy,
    Special,
}

impl AttackKind {
    fn damage(self) -> f32 {
        match self {
            Self::Light => 0.08,
            Self::Heavy => 0.14,
            Self::Special => 0.2,
        }
    }

    fn stamina_cost(self) -> f32 {
        match self {
            Self::Light => 0.1,
            Self::Heavy => 0.18,
            Self::Special => 0.3,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Heavy => "heavy",
            Self::Special => "special",
        }
    }
}

#[derive(Clone, Debug)]
struct DemoFighter {
    id: FighterId,
    archetype: String,
    health: f32,
    stamina: f32,
    wins: u32,
    x: f32,
    facing: Facing,
    stun_ticks: u32,
    blocking: bool,
    dashing: bool,
    attack: Option<(AttackKind, u32)>,
    attack_landed: bool,
}

impl DemoFighter {
    fn spawn(id: FighterId, archetype: String, slot: PlayerSlot) -> Self {
        Self {
            id,
            archetype,
            health: 1.0,
            stamina: 1.0,
            wins: 0,
            x: SPAWN_X[slot.index()],
            facing: match slot {
                PlayerSlot::One => Facing::Right,
                PlayerSlot::Two => Facing::Left,
            },
            stun_ticks: 0,
            blocking: false,
            dashing: false,
            attack: None,
            attack_landed: false,
        }
    }

    fn reset_round(&mut self, slot: PlayerSlot) {
        self.health = 1.0;
        self.stamina = 1.0;
        self.x = SPAWN_X[slot.index()];
        self.facing = match slot {
            PlayerSlot::One => Facing::Right,
            PlayerSlot::Two => Facing::Left,
        };
        self.stun_ticks = 0;
        self.blocking = false;
        self.dashing = false;
        self.attack = None;
        self.attack_landed = false;
    }

    fn attack_phase(elapsed: u32) -> AttackPhase {
        if elapsed < ATTACK_STARTUP {
            AttackPhase::Startup
        } else if elapsed < ATTACK_STARTUP + ATTACK_ACTIVE {
            AttackPhase::Active
        } else {
            AttackPhase::Recovery
        }
    }

    fn state(&self, moving: bool) -> FighterState {
        if self.stun_ticks > 0 {
            FighterState::HitStun
        } else if let Some((_, elapsed)) = self.attack {
            FighterState::Attacking {
                phase: Self::attack_phase(elapsed),
            }
        } else if self.blocking {
            FighterState::Blocking
        } else if self.dashing {
            FighterState::Dashing
        } else if moving {
            FighterState::Moving
        } else {
            FighterState::Idle
        }
    }
}

/// Deterministic scripted engine backing the demo session.
#[derive(Clone, Debug)]
pub(crate) struct DemoEngine {
    fighters: [DemoFighter; 2],
    phase: Phase,
    round: u32,
    round_ticks_left: u32,
    countdown_ticks: u32,
    round_over_ticks: u32,
    winner: Option<PlayerSlot>,
    last_hit: Option<String>,
    moved: [bool; 2],
}

impl DemoEngine {
    /// Creates an engine for the two named roster entries.
    pub(crate) fn new(player_one: &str, player_two: &str) -> anyhow::Result<Self> {
        let fighters = [
            Self::spawn_fighter(player_one, PlayerSlot::One)?,
            Self::spawn_fighter(player_two, PlayerSlot::Two)?,
        ];
        Ok(Self {
            fighters,
            phase: Phase::Countdown,
            round: 1,
            round_ticks_left: ROUND_TICKS,
            countdown_ticks: COUNTDOWN_TICKS,
            round_over_ticks: 0,
            winner: None,
            last_hit: None,
            moved: [false; 2],
        })
    }

    fn spawn_fighter(name: &str, slot: PlayerSlot) -> anyhow::Result<DemoFighter> {
        let lowered = name.to_lowercase();
        for (roster_name, archetype) in ROSTER {
            if roster_name.to_lowercase() == lowered {
                return Ok(DemoFighter::spawn(
                    FighterId::new(roster_name),
                    archetype.to_string(),
                    slot,
                ));
            }
        }
        let known: Vec<&str> = ROSTER.iter().map(|(name, _)| *name).collect();
        bail!("unknown fighter '{name}'; choose from: {}", known.join(", "));
    }

    fn countdown_display(&self) -> &'static str {
        if self.countdown_ticks > 120 {
            "3"
        } else if self.countdown_ticks > 60 {
            "2"
        } else if self.countdown_ticks > 0 {
            "1"
        } else {
            "FIGHT!"
        }
    }

    fn tick_fighting(&mut self, input: EncodedInput) {
        for slot in PlayerSlot::BOTH {
            self.tick_fighter(slot, input);
        }
        self.resolve_attacks(input);

        // Face the opponent once both have moved.
        let [left, right] = &mut self.fighters;
        if left.x <= right.x {
            left.facing = Facing::Right;
            right.facing = Facing::Left;
        } else {
            left.facing = Facing::Left;
            right.facing = Facing::Right;
        }

        self.round_ticks_left = self.round_ticks_left.saturating_sub(1);
        let knockout = self.fighters.iter().any(|fighter| fighter.health <= 0.0);
        if knockout || self.round_ticks_left == 0 {
            self.finish_round();
        }
    }

    fn tick_fighter(&mut self, slot: PlayerSlot, input: EncodedInput) {
        let held = |button| input.contains(slot, button);
        let fighter = &mut self.fighters[slot.index()];

        if fighter.stun_ticks > 0 {
            fighter.stun_ticks -= 1;
            self.moved[slot.index()] = false;
            return;
        }

        if let Some((kind, elapsed)) = fighter.attack {
            let elapsed = elapsed + 1;
            fighter.attack = if elapsed >= ATTACK_TOTAL {
                fighter.attack_landed = false;
                None
            } else {
                Some((kind, elapsed))
            };
            self.moved[slot.index()] = false;
            return;
        }

        fighter.blocking = held(InputButton::Block);
        fighter.stamina = (fighter.stamina + 0.002).min(1.0);
        if fighter.blocking {
            self.moved[slot.index()] = false;
            return;
        }

        let kind = if held(InputButton::Light) {
            Some(AttackKind::Light)
        } else if held(InputButton::Heavy) {
            Some(AttackKind::Heavy)
        } else if held(InputButton::Special) {
            Some(AttackKind::Special)
        } else {
            None
        };
        if let Some(kind) = kind {
            if fighter.stamina >= kind.stamina_cost() {
                fighter.stamina -= kind.stamina_cost();
                fighter.attack = Some((kind, 0));
                fighter.attack_landed = false;
                self.moved[slot.index()] = false;
                return;
            }
        }

        let mut direction = 0.0;
        if held(InputButton::Forward) {
            direction += fighter.facing.sign();
        }
        if held(InputButton::Backward) {
            direction -= fighter.facing.sign();
        }

        fighter.dashing = held(InputButton::Dash) && direction != 0.0;
        let speed = if fighter.dashing { DASH_SPEED } else { WALK_SPEED };
        fighter.x = (fighter.x + direction * speed).clamp(BOUNDS.min_x, BOUNDS.max_x);
        self.moved[slot.index()] = direction != 0.0;
    }

    fn resolve_attacks(&mut self, input: EncodedInput) {
        for slot in PlayerSlot::BOTH {
            let attacker_index = slot.index();
            let defender_index = slot.opponent().index();

            let Some((kind, elapsed)) = self.fighters[attacker_index].attack else {
                continue;
            };
            if DemoFighter::attack_phase(elapsed) != AttackPhase::Active {
                continue;
            }
            if self.fighters[attacker_index].attack_landed {
                continue;
            }

            let distance =
                (self.fighters[attacker_index].x - self.fighters[defender_index].x).abs();
            if distance > HIT_RANGE {
                continue;
            }

            let defender_blocks = input.contains(slot.opponent(), InputButton::Block)
                && self.fighters[defender_index].attack.is_none();
            let damage = if defender_blocks {
                kind.damage() * 0.2
            } else {
                kind.damage()
            };

            self.fighters[attacker_index].attack_landed = true;
            let defender = &mut self.fighters[defender_index];
            defender.health = (defender.health - damage).max(0.0);
            if !defender_blocks {
                defender.stun_ticks = STUN_TICKS;
                defender.blocking = false;
            }

            self.last_hit = Some(format!(
                "{} lands a {} hit on {} ({:.0}%)",
                self.fighters[attacker_index].id,
                kind.label(),
                self.fighters[defender_index].id,
                damage * 100.0,
            ));
        }
    }

    fn finish_round(&mut self) {
        let [one, two] = &mut self.fighters;
        // Timeout falls back to a health comparison; ties favor nobody.
        if one.health > two.health {
            one.wins += 1;
        } else if two.health > one.health {
            two.wins += 1;
        } else {
            one.wins += 1;
            two.wins += 1;
        }

        if one.wins >= ROUNDS_TO_WIN && one.wins > two.wins {
            self.winner = Some(PlayerSlot::One);
        } else if two.wins >= ROUNDS_TO_WIN && two.wins > one.wins {
            self.winner = Some(PlayerSlot::Two);
        }

        self.phase = Phase::RoundOver;
        self.round_over_ticks = ROUND_OVER_TICKS;
    }

    fn tick_round_over(&mut self) {
        if self.round_over_ticks > 0 {
            self.round_over_ticks -= 1;
            return;
        }

        let match_decided = self.winner.is_some()
            || self
                .fighters
                .iter()
                .filter(|fighter| fighter.wins >= ROUNDS_TO_WIN)
                .count()
                == 2;
        if match_decided {
            self.phase = Phase::MatchOver;
        } else {
            self.round += 1;
            for slot in PlayerSlot::BOTH {
                self.fighters[slot.index()].reset_round(slot);
            }
            self.round_ticks_left = ROUND_TICKS;
            self.countdown_ticks = COUNTDOWN_TICKS;
            self.last_hit = None;
            self.phase = Phase::Countdown;
        }
    }

    fn build_snapshot(&self) -> Snapshot {
        let fighter_view = |index: usize| {
            let fighter = &self.fighters[index];
            FighterView {
                id: fighter.id.clone(),
                archetype: fighter.archetype.clone(),
                health: Fraction::new(fighter.health),
                stamina: Fraction::new(fighter.stamina),
                round_wins: fighter.wins,
                position: Vec3::new(fighter.x, 0.0, 0.0),
                facing: fighter.facing,
                state: fighter.state(self.moved[index]),
            }
        };

        Snapshot {
            phase: self.phase,
            round: self.round,
            round_timer: self.round_ticks_left as f32 / 60.0,
            countdown: match self.phase {
                Phase::Countdown => Some(self.countdown_display().to_string()),
                _ => None,
            },
            winner: self.winner,
            last_hit: self.last_hit.clone(),
            fighters: [fighter_view(0), fighter_view(1)],
        }
    }
}

impl CombatEngine for DemoEngine {
    fn advance(&mut self, input: EncodedInput) -> Result<Snapshot, EngineError> {
        match self.phase {
            Phase::Countdown => {
                if self.countdown_ticks > 0 {
                    self.countdown_ticks -= 1;
                } else {
                    self.phase = Phase::Fighting;
                }
            }
            Phase::Fighting => self.tick_fighting(input),
            Phase::RoundOver => self.tick_round_over(),
            Phase::MatchOver => {}
            _ => {}
        }
        Ok(self.build_snapshot())
    }

    fn current_snapshot(&self) -> Snapshot {
        self.build_snapshot()
    }

    fn roster(&self) -> Vec<FighterId> {
        available_fighters()
    }

    fn arena_bounds(&self) -> ArenaBounds {
        BOUNDS
    }
}
