//! Pure mapping from fighter states to visual treatments.
//!
//! Presentation convenience only, never simulation-authoritative: states the
//! table does not recognise resolve to the default treatment rather than
//! erroring, so a newer engine can never crash the frame loop.

use duel_arena_core::{AttackPhase, FighterState};
use glam::Vec3;

use crate::Color;

/// Warm highlight shown while attacking.
pub const ATTACK_TINT: Color = Color::from_rgb_u8(255, 150, 60);
/// Cool highlight shown while blocking.
pub const BLOCK_TINT: Color = Color::from_rgb_u8(80, 150, 255);
/// Light highlight shown while dashing.
pub const DASH_TINT: Color = Color::from_rgb_u8(170, 230, 255);
/// Alarm highlight shown during hit stun.
pub const HIT_STUN_TINT: Color = Color::from_rgb_u8(255, 70, 70);
/// Bright highlight shown while airborne.
pub const AIRBORNE_TINT: Color = Color::from_rgb_u8(240, 240, 255);
/// Dim highlight shown while knocked down.
pub const KNOCKDOWN_TINT: Color = Color::from_rgb_u8(90, 80, 80);
/// Muted highlight shown while getting up.
pub const GETTING_UP_TINT: Color = Color::from_rgb_u8(150, 150, 150);

/// Visual treatment derived from a fighter's discrete state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FighterVisual {
    /// Tint overriding the fighter's base identity color, when any.
    pub tint: Option<Color>,
    /// Non-uniform scale applied to the body mesh.
    pub scale: Vec3,
}

impl FighterVisual {
    const fn new(tint: Option<Color>, scale: Vec3) -> Self {
        Self { tint, scale }
    }
}

impl Default for FighterVisual {
    /// The no-override treatment: base color, unit scale.
    fn default() -> Self {
        Self::new(None, Vec3::ONE)
    }
}

/// Derives the visual treatment for a fighter state.
///
/// Pure and deterministic: identical states always map to identical
/// treatments. Returns `None` for states the table does not recognise so
/// the caller can apply the default treatment and record a diagnostic.
#[must_use]
pub fn visual_for(state: &FighterState) -> Option<FighterVisual> {
    match state {
        FighterState::Idle | FighterState::Moving => Some(FighterVisual::default()),
        FighterState::Attacking { phase } => {
            let scale = match phase {
                AttackPhase::Active => Vec3::splat(1.08),
                AttackPhase::Startup | AttackPhase::Recovery => Vec3::ONE,
                // Future sub-phases keep the neutral silhouette.
                _ => Vec3::ONE,
            };
            Some(FighterVisual::new(Some(ATTACK_TINT), scale))
        }
        FighterState::Blocking => Some(FighterVisual::new(Some(BLOCK_TINT), Vec3::ONE)),
        FighterState::Dashing => Some(FighterVisual::new(
            Some(DASH_TINT),
            Vec3::new(1.35, 0.75, 1.0),
        )),
        FighterState::HitStun => Some(FighterVisual::new(
            Some(HIT_STUN_TINT),
            Vec3::new(0.8, 1.18, 0.8),
        )),
        FighterState::Airborne => Some(FighterVisual::new(Some(AIRBORNE_TINT), Vec3::ONE)),
        FighterState::Knockdown => Some(FighterVisual::new(
            Some(KNOCKDOWN_TINT),
            Vec3::new(1.0, 0.35, 1.0),
        )),
        FighterState::GettingUp => Some(FighterVisual::new(Some(GETTING_UP_TINT), Vec3::ONE)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visual_for_is_idempotent() {
        let state = FighterState::Attacking {
            phase: AttackPhase::Active,
        };
        assert_eq!(visual_for(&state), visual_for(&state));
        assert_eq!(visual_for(&FighterState::Idle), visual_for(&FighterState::Idle));
    }

    #[test]
    fn idle_and_moving_have_no_override() {
        for state in [FighterState::Idle, FighterState::Moving] {
            let visual = visual_for(&state).expect("known state");
            assert_eq!(visual.tint, None);
            assert_eq!(visual.scale, Vec3::ONE);
        }
    }

    #[test]
    fn only_the_active_attack_phase_expands_the_silhouette() {
        let startup = visual_for(&FighterState::Attacking {
            phase: AttackPhase::Startup,
        })
        .expect("known state");
        let active = visual_for(&FighterState::Attacking {
            phase: AttackPhase::Active,
        })
        .expect("known state");
        let recovery = visual_for(&FighterState::Attacking {
            phase: AttackPhase::Recovery,
        })
        .expect("known state");

        assert_eq!(startup.scale, Vec3::ONE);
        assert_eq!(recovery.scale, Vec3::ONE);
        assert_eq!(active.scale, Vec3::splat(1.08));
        for visual in [startup, active, recovery] {
            assert_eq!(visual.tint, Some(ATTACK_TINT));
        }
    }

    #[test]
    fn dashing_stretches_forward_and_compresses_vertically() {
        let visual = visual_for(&FighterState::Dashing).expect("known state");
        assert!(visual.scale.x > 1.0);
        assert!(visual.scale.y < 1.0);
        assert_eq!(visual.tint, Some(DASH_TINT));
    }

    #[test]
    fn hit_stun_compresses_horizontally_and_stretches_vertically() {
        let visual = visual_for(&FighterState::HitStun).expect("known state");
        assert!(visual.scale.x < 1.0);
        assert!(visual.scale.y > 1.0);
        assert_eq!(visual.tint, Some(HIT_STUN_TINT));
    }

    #[test]
    fn knockdown_strongly_compresses_vertically() {
        let visual = visual_for(&FighterState::Knockdown).expect("known state");
        assert!(visual.scale.y < 0.5);
        assert_eq!(visual.tint, Some(KNOCKDOWN_TINT));
    }

    #[test]
    fn remaining_states_keep_unit_scale_with_their_tint() {
        for (state, tint) in [
            (FighterState::Blocking, BLOCK_TINT),
            (FighterState::Airborne, AIRBORNE_TINT),
            (FighterState::GettingUp, GETTING_UP_TINT),
        ] {
            let visual = visual_for(&state).expect("known state");
            assert_eq!(visual.scale, Vec3::ONE);
            assert_eq!(visual.tint, Some(tint));
        }
    }
}
