#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep scheduler that decouples rendering from simulation.
//!
//! The renderer runs at whatever rate the host delivers frames; the combat
//! engine advances in exact [`TICK_PERIOD`] steps. [`TickScheduler`] owns the
//! elapsed-time accumulator and, on every frame, runs however many whole
//! ticks the accumulated time covers — sampling a fresh input bitfield for
//! each one — then reports the latest snapshot for presentation.

use std::time::Duration;

use duel_arena_core::{CombatEngine, EncodedInput, EngineError, Snapshot};
use thiserror::Error;

/// Simulation ticks per second.
pub const TICKS_PER_SECOND: u32 = 60;

/// Exact duration of one simulation tick.
pub const TICK_PERIOD: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

/// Upper bound applied to a single frame's elapsed time.
///
/// After a stall (backgrounded tab, debugger pause) the backlog is truncated
/// instead of simulated, so wall-clock time can appear to shrink but the
/// engine never has to catch up unboundedly. A tunable trade-off, not a
/// load-bearing exact value.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Errors raised while configuring the scheduler's timing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimingError {
    /// The tick period must be positive for the accumulator loop to drain.
    #[error("tick period must be positive")]
    ZeroTickPeriod,
}

/// Fixed-step accumulator owning the latest engine snapshot.
///
/// Process-wide scheduling state lives in explicit fields with a single
/// owner: created at session start, dropped at session end.
#[derive(Debug)]
pub struct TickScheduler {
    tick_period: Duration,
    max_frame_delta: Duration,
    accumulator: Duration,
    latest: Snapshot,
}

impl TickScheduler {
    /// Creates a scheduler with the canonical 60Hz timing.
    #[must_use]
    pub fn new(initial: Snapshot) -> Self {
        Self {
            tick_period: TICK_PERIOD,
            max_frame_delta: MAX_FRAME_DELTA,
            accumulator: Duration::ZERO,
            latest: initial,
        }
    }

    /// Creates a scheduler with custom timing bounds.
    ///
    /// Returns an error when `tick_period` is zero, which would make the
    /// accumulator loop spin forever.
    pub fn with_timing(
        tick_period: Duration,
        max_frame_delta: Duration,
        initial: Snapshot,
    ) -> Result<Self, TimingError> {
        if tick_period.is_zero() {
            return Err(TimingError::ZeroTickPeriod);
        }
        Ok(Self {
            tick_period,
            max_frame_delta,
            accumulator: Duration::ZERO,
            latest: initial,
        })
    }

    /// Latest snapshot recorded by the scheduler.
    #[must_use]
    pub fn latest(&self) -> &Snapshot {
        &self.latest
    }

    /// Consumes elapsed wall-clock time and runs the due simulation ticks.
    ///
    /// `sample_input` is invoked exactly once per tick so the engine always
    /// observes fresh input — never a stale bitfield reused across ticks and
    /// never a skipped sample. Returns the latest snapshot, unchanged when
    /// the accumulated time covered no whole tick.
    ///
    /// An [`EngineError`] propagates immediately: the failed tick's time is
    /// left in the accumulator and the latest snapshot stays the last good
    /// one, so the caller can freeze presentation cleanly.
    pub fn advance<E, F>(
        &mut self,
        elapsed: Duration,
        mut sample_input: F,
        engine: &mut E,
    ) -> Result<&Snapshot, EngineError>
    where
        E: CombatEngine + ?Sized,
        F: FnMut() -> EncodedInput,
    {
        let elapsed = elapsed.min(self.max_frame_delta);
        self.accumulator = self.accumulator.saturating_add(elapsed);

        while self.accumulator >= self.tick_period {
            let input = sample_input();
            let snapshot = engine.advance(input)?;
            self.accumulator -= self.tick_period;
            self.latest = snapshot;
        }

        Ok(&self.latest)
    }
}
