//! HUD state derivation: snapshot fields mapped to a declarative view.
//!
//! [`HudPresenter`] owns the only mutable presentation state in the HUD —
//! the retained hit description and its display countdown — and rewrites a
//! [`HudView`] from each snapshot. Backends draw the view verbatim.

use duel_arena_core::{Fraction, Phase, PlayerSlot, Snapshot};

/// Presentation ticks a hit notification stays visible (~2 seconds at 60Hz).
pub const HIT_BANNER_TICKS: u32 = 120;

/// Fixed overlay text shown between rounds.
pub const ROUND_OVER_TEXT: &str = "ROUND OVER";

/// Overlay text shown when the match ends without a winner reference.
pub const DRAW_TEXT: &str = "DRAW";

/// Glyph repeated once per round win under a fighter's bars.
pub const WIN_GLYPH: char = '*';

/// Styling escalation applied to a health bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BarStyle {
    /// Default styling.
    #[default]
    Normal,
    /// Warning gradient: health below one half.
    Warning,
    /// Alarm gradient: health below one quarter.
    Alarm,
}

impl BarStyle {
    /// Derives the style for a health fraction.
    ///
    /// Boundaries are strict: health exactly at 0.25 is Warning, not Alarm,
    /// and exactly at 0.5 is Normal.
    #[must_use]
    pub fn for_health(health: Fraction) -> Self {
        let value = health.get();
        if value < 0.25 {
            Self::Alarm
        } else if value < 0.5 {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// Per-fighter HUD panel contents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FighterPanel {
    /// Fighter identity label.
    pub name: String,
    /// Weapon or archetype label.
    pub archetype: String,
    /// Health bar fill fraction in `0.0..=1.0`.
    pub health_ratio: f32,
    /// Styling escalation for the health bar.
    pub health_style: BarStyle,
    /// Stamina bar fill fraction in `0.0..=1.0`.
    pub stamina_ratio: f32,
    /// One glyph per round win.
    pub win_glyphs: String,
}

/// Phase-driven overlay contents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayView {
    /// Whether the overlay is shown at all.
    pub visible: bool,
    /// Text displayed while visible.
    pub text: String,
}

/// Transient hit-notification banner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HitBanner {
    /// Whether the banner is shown this frame.
    pub visible: bool,
    /// Description of the most recent hit.
    pub text: String,
}

/// Declarative HUD description consumed by rendering backends.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HudView {
    /// Panels for both fighters in fixed player order.
    pub fighters: [FighterPanel; 2],
    /// Current round label.
    pub round_label: String,
    /// Remaining round time, one decimal place.
    pub timer_label: String,
    /// Phase-governed overlay.
    pub overlay: OverlayView,
    /// Transient hit notification.
    pub hit_banner: HitBanner,
}

/// Policy for a hit description that disappears from the snapshot while the
/// banner is still displayed.
///
/// Engines differ on whether a cleared description should also drop the
/// banner, so the choice is configuration rather than an assumption.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClearedHitPolicy {
    /// Keep the banner until its countdown expires naturally.
    #[default]
    PersistUntilExpiry,
    /// Hide the banner as soon as the engine clears the description.
    ClearImmediately,
}

/// Counters surfaced when snapshots carry phases the presenter cannot map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HudDiagnostics {
    /// Phases that fell back to a hidden overlay.
    pub unknown_phases: u64,
}

/// Derives HUD views from snapshots, owning the transient banner state.
#[derive(Debug, Default)]
pub struct HudPresenter {
    retained_hit: Option<String>,
    banner_ticks: u32,
    cleared_policy: ClearedHitPolicy,
    diagnostics: HudDiagnostics,
}

impl HudPresenter {
    /// Creates a presenter with the default cleared-description policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a presenter with an explicit cleared-description policy.
    #[must_use]
    pub fn with_policy(cleared_policy: ClearedHitPolicy) -> Self {
        Self {
            cleared_policy,
            ..Self::default()
        }
    }

    /// Diagnostics accumulated across presented snapshots.
    #[must_use]
    pub fn diagnostics(&self) -> HudDiagnostics {
        self.diagnostics
    }

    /// Remaining display ticks of the hit banner.
    #[must_use]
    pub fn banner_ticks(&self) -> u32 {
        self.banner_ticks
    }

    /// Rewrites the HUD view from the snapshot.
    ///
    /// Called exactly once per render frame; the hit-banner countdown is
    /// decremented per call, so presentation ticks are render frames, not
    /// simulation ticks.
    pub fn present(&mut self, view: &mut HudView, snapshot: &Snapshot) {
        for slot in PlayerSlot::BOTH {
            let fighter = snapshot.fighter(slot);
            let panel = &mut view.fighters[slot.index()];
            panel.name = fighter.id.to_string();
            panel.archetype = fighter.archetype.clone();
            panel.health_ratio = fighter.health.get();
            panel.health_style = BarStyle::for_health(fighter.health);
            panel.stamina_ratio = fighter.stamina.get();
            panel.win_glyphs = WIN_GLYPH.to_string().repeat(fighter.round_wins as usize);
        }

        view.round_label = format!("Round {}", snapshot.round);
        view.timer_label = format!("{:.1}", snapshot.round_timer.max(0.0));

        self.present_overlay(&mut view.overlay, snapshot);
        self.present_hit_banner(&mut view.hit_banner, snapshot);
    }

    fn present_overlay(&mut self, overlay: &mut OverlayView, snapshot: &Snapshot) {
        match snapshot.phase {
            Phase::Countdown => {
                overlay.visible = true;
                overlay.text = snapshot.countdown.clone().unwrap_or_default();
            }
            Phase::Fighting => {
                overlay.visible = false;
                overlay.text.clear();
            }
            Phase::RoundOver => {
                overlay.visible = true;
                overlay.text = ROUND_OVER_TEXT.to_string();
            }
            Phase::MatchOver => {
                overlay.visible = true;
                overlay.text = match snapshot.winner {
                    Some(slot) => format!("{} WINS", snapshot.fighter(slot).id),
                    None => DRAW_TEXT.to_string(),
                };
            }
            _ => {
                self.diagnostics.unknown_phases += 1;
                overlay.visible = false;
                overlay.text.clear();
            }
        }
    }

    fn present_hit_banner(&mut self, banner: &mut HitBanner, snapshot: &Snapshot) {
        match snapshot.last_hit.as_deref() {
            // Only a genuinely new description restarts the timer; identical
            // repeats while displayed never retrigger.
            Some(description) if self.retained_hit.as_deref() != Some(description) => {
                self.retained_hit = Some(description.to_string());
                self.banner_ticks = HIT_BANNER_TICKS;
            }
            None if self.cleared_policy == ClearedHitPolicy::ClearImmediately => {
                self.retained_hit = None;
                self.banner_ticks = 0;
            }
            _ => {}
        }

        if self.banner_ticks > 0 {
            self.banner_ticks -= 1;
        }

        banner.text = self.retained_hit.clone().unwrap_or_default();
        banner.visible = self.banner_ticks > 0;
    }
}
