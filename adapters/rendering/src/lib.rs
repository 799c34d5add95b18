#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Duel Arena backends.
//!
//! The frame driver projects engine snapshots into the declarative [`Scene`]
//! and [`HudView`](hud::HudView) descriptions defined here; concrete
//! backends draw those descriptions without ever touching simulation state.
//! Projection is deliberately literal: positions are copied verbatim from
//! the latest tick with no interpolation or easing, so presentation may
//! visibly step when the frame rate drops below the tick rate.

pub mod hud;
pub mod visuals;

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Result as AnyResult;
use duel_arena_core::{ArenaBounds, Facing, Snapshot};
use glam::Vec3;

use crate::hud::HudView;
use crate::visuals::{visual_for, FighterVisual};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Arena floor and bounds as presented to backends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaPresentation {
    /// Playable bounds reported by the engine.
    pub bounds: ArenaBounds,
    /// Fill color of the arena floor.
    pub floor_color: Color,
    /// Color of the boundary lines.
    pub line_color: Color,
}

impl ArenaPresentation {
    /// Creates a new arena descriptor.
    #[must_use]
    pub const fn new(bounds: ArenaBounds, floor_color: Color, line_color: Color) -> Self {
        Self {
            bounds,
            floor_color,
            line_color,
        }
    }
}

/// Declarative description of one fighter's mesh for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FighterPresentation {
    /// Identity color used when no state tint overrides it.
    pub base_color: Color,
    /// World position copied verbatim from the latest snapshot.
    pub position: Vec3,
    /// One of exactly two discrete orientations; never interpolated.
    pub facing: Facing,
    /// State tint overriding the base color, when any.
    pub tint: Option<Color>,
    /// Non-uniform scale applied to the body mesh.
    pub scale: Vec3,
}

impl FighterPresentation {
    /// Creates a neutral presentation for a fighter with the given identity color.
    #[must_use]
    pub const fn new(base_color: Color, facing: Facing) -> Self {
        Self {
            base_color,
            position: Vec3::ZERO,
            facing,
            tint: None,
            scale: Vec3::ONE,
        }
    }

    /// Color a backend should actually paint the body with.
    #[must_use]
    pub fn effective_color(&self) -> Color {
        self.tint.unwrap_or(self.base_color)
    }
}

/// Scene description combining the arena and both fighters.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Arena floor and bounds.
    pub arena: ArenaPresentation,
    /// Both fighters in fixed player order.
    pub fighters: [FighterPresentation; 2],
    /// HUD state derived from the latest snapshot.
    pub hud: HudView,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(arena: ArenaPresentation, fighters: [FighterPresentation; 2]) -> Self {
        Self {
            arena,
            fighters,
            hud: HudView::default(),
        }
    }
}

/// Counters surfaced when snapshots carry data the renderer cannot interpret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderDiagnostics {
    /// Fighter states that fell back to the default visual treatment.
    pub unrecognized_states: u64,
}

/// Projects snapshot fighters onto scene descriptions.
///
/// Side effects are confined to the scene; the renderer never reads or
/// writes simulation state. Unknown fighter states resolve to the default
/// treatment (no tint, unit scale) and bump a diagnostic counter instead of
/// failing the frame.
#[derive(Debug, Default)]
pub struct SnapshotRenderer {
    diagnostics: RenderDiagnostics,
}

impl SnapshotRenderer {
    /// Creates a renderer with clear diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics accumulated across applied snapshots.
    #[must_use]
    pub fn diagnostics(&self) -> RenderDiagnostics {
        self.diagnostics
    }

    /// Applies the snapshot's fighter views to the scene's fighter meshes.
    pub fn apply(&mut self, scene: &mut Scene, snapshot: &Snapshot) {
        for (presentation, view) in scene.fighters.iter_mut().zip(snapshot.fighters.iter()) {
            presentation.position = Vec3::new(view.position.x, view.position.y, view.position.z);
            presentation.facing = view.facing;

            let visual = match visual_for(&view.state) {
                Some(visual) => visual,
                None => {
                    self.diagnostics.unrecognized_states += 1;
                    FighterVisual::default()
                }
            };
            presentation.tint = visual.tint;
            presentation.scale = visual.scale;
        }
    }
}

/// Raw key state gathered by a backend before updating the scene.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pressed: HashSet<String>,
}

impl FrameInput {
    /// Creates an empty key state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key as held for this frame. Names are matched verbatim, so
    /// backends normalise to lowercase before inserting.
    pub fn press<T>(&mut self, key: T)
    where
        T: Into<String>,
    {
        let _ = self.pressed.insert(key.into());
    }

    /// Reports whether the named key is held this frame.
    #[must_use]
    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(key)
    }
}

/// Outcome of one frame-driver invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// The session is live; keep scheduling frames.
    Continue,
    /// A fatal engine failure occurred; the scene is frozen on the last
    /// fully-applied snapshot and no further ticks will run.
    Halted,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Duel Arena scenes.
pub trait RenderingBackend {
    /// Runs the backend until it is requested to exit.
    ///
    /// The `update` closure receives the frame's elapsed time and the key
    /// state gathered by the backend, and mutates the scene (including its
    /// HUD view) before drawing. Once it reports [`FrameStatus::Halted`] the
    /// backend must stop invoking it and keep presenting the frozen scene.
    fn run<F>(self, presentation: Presentation, update: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &FrameInput, &mut Scene) -> FrameStatus + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_arena_core::{
        AttackPhase, FighterId, FighterState, FighterView, Fraction, Phase, PlayerSlot,
    };

    fn fighter_view(state: FighterState) -> FighterView {
        FighterView {
            id: FighterId::new("Kael"),
            archetype: "Sword".to_string(),
            health: Fraction::FULL,
            stamina: Fraction::FULL,
            round_wins: 0,
            position: duel_arena_core::Vec3::new(-1.25, 0.5, 0.25),
            facing: Facing::Left,
            state,
        }
    }

    fn snapshot(states: [FighterState; 2]) -> Snapshot {
        let [first, second] = states;
        Snapshot {
            phase: Phase::Fighting,
            round: 1,
            round_timer: 42.0,
            countdown: None,
            winner: None,
            last_hit: None,
            fighters: [fighter_view(first), fighter_view(second)],
        }
    }

    fn test_scene() -> Scene {
        let arena = ArenaPresentation::new(
            ArenaBounds::new(-3.0, 3.0, -1.5, 1.5),
            Color::from_rgb_u8(40, 40, 48),
            Color::from_rgb_u8(90, 90, 100),
        );
        Scene::new(
            arena,
            [
                FighterPresentation::new(Color::from_rgb_u8(70, 110, 220), Facing::Right),
                FighterPresentation::new(Color::from_rgb_u8(220, 80, 70), Facing::Left),
            ],
        )
    }

    #[test]
    fn apply_copies_position_and_facing_verbatim() {
        let mut scene = test_scene();
        let mut renderer = SnapshotRenderer::new();

        renderer.apply(&mut scene, &snapshot([FighterState::Idle, FighterState::Idle]));

        assert_eq!(scene.fighters[0].position, Vec3::new(-1.25, 0.5, 0.25));
        assert_eq!(scene.fighters[0].facing, Facing::Left);
        assert_eq!(renderer.diagnostics().unrecognized_states, 0);
    }

    #[test]
    fn idle_fighters_fall_back_to_their_base_color() {
        let mut scene = test_scene();
        let mut renderer = SnapshotRenderer::new();

        renderer.apply(&mut scene, &snapshot([FighterState::Idle, FighterState::Moving]));

        assert!(scene.fighters[0].tint.is_none());
        assert_eq!(
            scene.fighters[0].effective_color(),
            scene.fighters[0].base_color
        );
        assert_eq!(scene.fighters[0].scale, Vec3::ONE);
        assert_eq!(scene.fighters[1].scale, Vec3::ONE);
    }

    #[test]
    fn state_tints_override_the_base_color() {
        let mut scene = test_scene();
        let mut renderer = SnapshotRenderer::new();

        renderer.apply(
            &mut scene,
            &snapshot([
                FighterState::Attacking {
                    phase: AttackPhase::Active,
                },
                FighterState::Blocking,
            ]),
        );

        let attacker = &scene.fighters[PlayerSlot::One.index()];
        assert!(attacker.tint.is_some());
        assert_ne!(attacker.effective_color(), attacker.base_color);
        assert_ne!(attacker.scale, Vec3::ONE);

        let blocker = &scene.fighters[PlayerSlot::Two.index()];
        assert!(blocker.tint.is_some());
        assert_eq!(blocker.scale, Vec3::ONE);
    }

    #[test]
    fn lighten_moves_channels_toward_white() {
        let color = Color::from_rgb_u8(100, 0, 200).lighten(0.5);
        assert!(color.red > 100.0 / 255.0);
        assert!(color.green > 0.0);
        assert!(color.blue > 200.0 / 255.0);
        assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn frame_input_matches_keys_verbatim() {
        let mut input = FrameInput::new();
        input.press("w");
        assert!(input.is_pressed("w"));
        assert!(!input.is_pressed("W"));
        assert!(!input.is_pressed("s"));
    }
}
