use std::time::Duration;

use duel_arena_core::{
    ArenaBounds, CombatEngine, EncodedInput, EngineError, Facing, FighterId, FighterState,
    FighterView, Fraction, InputButton, Phase, PlayerSlot, Snapshot, Vec3,
};
use duel_arena_system_scheduler::{TickScheduler, TimingError, MAX_FRAME_DELTA, TICK_PERIOD};

fn fighter(name: &str, facing: Facing) -> FighterView {
    FighterView {
        id: FighterId::new(name),
        archetype: "Sword".to_string(),
        health: Fraction::FULL,
        stamina: Fraction::FULL,
        round_wins: 0,
        position: Vec3::default(),
        facing,
        state: FighterState::Idle,
    }
}

fn snapshot_at_tick(tick: u32) -> Snapshot {
    Snapshot {
        phase: Phase::Fighting,
        round: 1,
        round_timer: 60.0 - tick as f32 / 60.0,
        countdown: None,
        winner: None,
        last_hit: None,
        fighters: [fighter("Kael", Facing::Right), fighter("Zara", Facing::Left)],
    }
}

/// Engine stub that records every action vector it is asked to simulate.
struct RecordingEngine {
    received: Vec<EncodedInput>,
    fail_on_tick: Option<usize>,
}

impl RecordingEngine {
    fn new() -> Self {
        Self {
            received: Vec::new(),
            fail_on_tick: None,
        }
    }

    fn failing_on(tick: usize) -> Self {
        Self {
            received: Vec::new(),
            fail_on_tick: Some(tick),
        }
    }
}

impl CombatEngine for RecordingEngine {
    fn advance(&mut self, input: EncodedInput) -> Result<Snapshot, EngineError> {
        if self.fail_on_tick == Some(self.received.len()) {
            return Err(EngineError::AdvanceFailed {
                reason: "scripted failure".to_string(),
            });
        }
        self.received.push(input);
        Ok(snapshot_at_tick(self.received.len() as u32))
    }

    fn current_snapshot(&self) -> Snapshot {
        snapshot_at_tick(self.received.len() as u32)
    }

    fn roster(&self) -> Vec<FighterId> {
        vec![FighterId::new("Kael"), FighterId::new("Zara")]
    }

    fn arena_bounds(&self) -> ArenaBounds {
        ArenaBounds::new(-3.0, 3.0, -1.5, 1.5)
    }
}

#[test]
fn zero_elapsed_runs_zero_ticks_and_keeps_the_prior_snapshot() {
    let mut engine = RecordingEngine::new();
    let initial = snapshot_at_tick(0);
    let mut scheduler = TickScheduler::new(initial.clone());

    let latest = scheduler
        .advance(Duration::ZERO, EncodedInput::default, &mut engine)
        .expect("zero elapsed cannot fail");

    assert_eq!(latest, &initial);
    assert!(engine.received.is_empty());
}

#[test]
fn deltas_summing_to_one_period_run_exactly_one_tick() {
    let mut engine = RecordingEngine::new();
    let mut scheduler = TickScheduler::new(snapshot_at_tick(0));

    let half = TICK_PERIOD / 2;
    let _ = scheduler
        .advance(half, EncodedInput::default, &mut engine)
        .expect("advance");
    assert!(engine.received.is_empty(), "half a period runs no tick");

    let _ = scheduler
        .advance(TICK_PERIOD - half, EncodedInput::default, &mut engine)
        .expect("advance");
    assert_eq!(engine.received.len(), 1);
}

#[test]
fn leftover_time_carries_into_the_next_frame() {
    let mut engine = RecordingEngine::new();
    let mut scheduler = TickScheduler::new(snapshot_at_tick(0));

    let _ = scheduler
        .advance(
            TICK_PERIOD + TICK_PERIOD / 2,
            EncodedInput::default,
            &mut engine,
        )
        .expect("advance");
    assert_eq!(engine.received.len(), 1);

    let _ = scheduler
        .advance(TICK_PERIOD / 2, EncodedInput::default, &mut engine)
        .expect("advance");
    assert_eq!(engine.received.len(), 2, "remainder plus half completes a tick");
}

#[test]
fn elapsed_beyond_the_clamp_behaves_exactly_like_the_clamp() {
    let mut clamped_engine = RecordingEngine::new();
    let mut clamped = TickScheduler::new(snapshot_at_tick(0));
    let _ = clamped
        .advance(MAX_FRAME_DELTA, EncodedInput::default, &mut clamped_engine)
        .expect("advance");

    let mut stalled_engine = RecordingEngine::new();
    let mut stalled = TickScheduler::new(snapshot_at_tick(0));
    let _ = stalled
        .advance(
            Duration::from_secs(30),
            EncodedInput::default,
            &mut stalled_engine,
        )
        .expect("advance");

    assert_eq!(stalled_engine.received.len(), clamped_engine.received.len());
}

#[test]
fn input_is_resampled_fresh_for_every_tick() {
    let mut engine = RecordingEngine::new();
    let mut scheduler = TickScheduler::new(snapshot_at_tick(0));

    let mut samples = 0u32;
    let _ = scheduler
        .advance(
            TICK_PERIOD * 3,
            || {
                samples += 1;
                EncodedInput::from_bits(samples)
            },
            &mut engine,
        )
        .expect("advance");

    assert_eq!(samples, 3, "one sample per tick, never reused");
    assert_eq!(
        engine.received,
        vec![
            EncodedInput::from_bits(1),
            EncodedInput::from_bits(2),
            EncodedInput::from_bits(3),
        ]
    );
}

#[test]
fn light_attack_bitfield_reaches_the_engine_verbatim() {
    let mut engine = RecordingEngine::new();
    let mut scheduler = TickScheduler::new(snapshot_at_tick(0));

    let _ = scheduler
        .advance(
            TICK_PERIOD,
            || EncodedInput::EMPTY.with(PlayerSlot::One, InputButton::Light),
            &mut engine,
        )
        .expect("advance");

    assert_eq!(engine.received, vec![EncodedInput::from_bits(1 << 4)]);
}

#[test]
fn engine_failure_propagates_and_freezes_the_latest_snapshot() {
    let mut engine = RecordingEngine::failing_on(1);
    let mut scheduler = TickScheduler::new(snapshot_at_tick(0));

    let error = scheduler
        .advance(TICK_PERIOD * 3, EncodedInput::default, &mut engine)
        .expect_err("second tick is scripted to fail");
    assert!(matches!(error, EngineError::AdvanceFailed { .. }));

    // The one successful tick is retained; the failure never replaced it.
    assert_eq!(scheduler.latest(), &snapshot_at_tick(1));
    assert_eq!(engine.received.len(), 1);
}

#[test]
fn custom_timing_rejects_a_zero_tick_period() {
    let error =
        TickScheduler::with_timing(Duration::ZERO, MAX_FRAME_DELTA, snapshot_at_tick(0))
            .expect_err("zero period must be rejected");
    assert_eq!(error, TimingError::ZeroTickPeriod);
}

#[test]
fn custom_timing_drives_the_accumulator() {
    let mut engine = RecordingEngine::new();
    let period = Duration::from_millis(10);
    let mut scheduler =
        TickScheduler::with_timing(period, Duration::from_millis(50), snapshot_at_tick(0))
            .expect("valid timing");

    let _ = scheduler
        .advance(Duration::from_millis(35), EncodedInput::default, &mut engine)
        .expect("advance");
    assert_eq!(engine.received.len(), 3);
}
