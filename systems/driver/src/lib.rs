#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Top-level frame loop composing the input, scheduling and presentation systems.
//!
//! One [`FrameDriver::frame`] call per render callback: sample keys, run the
//! simulation ticks that came due, then project the latest snapshot into the
//! scene and HUD. The host guarantees a single callback in flight at a time,
//! so the driver owns all session state without any locking discipline.

use std::time::Duration;

use duel_arena_core::{CombatEngine, EngineError};
use duel_arena_rendering::hud::HudPresenter;
use duel_arena_rendering::{FrameInput, FrameStatus, Scene, SnapshotRenderer};
use duel_arena_system_input::InputEncoder;
use duel_arena_system_scheduler::TickScheduler;

/// Owns a session's engine and presentation state for the frame loop.
///
/// Created at session start and dropped at session end; there is exactly one
/// mutator of scheduling and presenter state, which is this driver.
#[derive(Debug)]
pub struct FrameDriver<E> {
    engine: E,
    encoder: InputEncoder,
    scheduler: TickScheduler,
    renderer: SnapshotRenderer,
    presenter: HudPresenter,
    failure: Option<EngineError>,
}

impl<E> FrameDriver<E>
where
    E: CombatEngine,
{
    /// Creates a driver around a freshly initialised engine.
    #[must_use]
    pub fn new(engine: E, encoder: InputEncoder, presenter: HudPresenter) -> Self {
        let scheduler = TickScheduler::new(engine.current_snapshot());
        Self {
            engine,
            encoder,
            scheduler,
            renderer: SnapshotRenderer::new(),
            presenter,
            failure: None,
        }
    }

    /// The engine driving this session.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The fatal engine failure that halted the session, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&EngineError> {
        self.failure.as_ref()
    }

    /// Advances the session by one render frame.
    ///
    /// On engine failure the frame is abandoned before any presentation
    /// mutation, so the scene keeps the last fully-applied snapshot — a
    /// partially-applied snapshot is never displayed. Every subsequent call
    /// short-circuits to [`FrameStatus::Halted`].
    pub fn frame(&mut self, elapsed: Duration, input: &FrameInput, scene: &mut Scene) -> FrameStatus {
        if self.failure.is_some() {
            return FrameStatus::Halted;
        }

        let Self {
            engine,
            encoder,
            scheduler,
            renderer,
            presenter,
            failure,
        } = self;

        let snapshot = match scheduler.advance(
            elapsed,
            || encoder.sample(|key| input.is_pressed(key)),
            engine,
        ) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                *failure = Some(error);
                return FrameStatus::Halted;
            }
        };

        renderer.apply(scene, snapshot);
        presenter.present(&mut scene.hud, snapshot);
        FrameStatus::Continue
    }
}
