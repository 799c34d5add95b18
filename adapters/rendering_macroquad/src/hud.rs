//! HUD drawing for the Macroquad backend.
//!
//! This module hosts all text layout and bar drawing so the rest of the
//! adapter can stay focused on the arena itself. It draws the declarative
//! [`HudView`] verbatim; all state derivation happens upstream.

use duel_arena_rendering::hud::{BarStyle, HudView};
use duel_arena_rendering::Color;
use macroquad::text::{draw_text, measure_text};

use crate::to_macroquad_color;

const BAR_WIDTH_FRACTION: f32 = 0.36;
const BAR_MARGIN: f32 = 28.0;
const HEALTH_BAR_HEIGHT: f32 = 20.0;
const STAMINA_BAR_HEIGHT: f32 = 8.0;

const HEALTH_NORMAL: Color = Color::from_rgb_u8(70, 200, 90);
const HEALTH_WARNING: Color = Color::from_rgb_u8(235, 180, 40);
const HEALTH_ALARM: Color = Color::from_rgb_u8(225, 55, 45);
const STAMINA_COLOR: Color = Color::from_rgb_u8(80, 160, 235);
const BAR_BACKDROP: Color = Color::from_rgb_u8(25, 25, 30);
const TEXT_COLOR: Color = Color::from_rgb_u8(235, 235, 235);
const HALT_COLOR: Color = Color::from_rgb_u8(255, 60, 60);

fn health_color(style: BarStyle) -> Color {
    match style {
        BarStyle::Normal => HEALTH_NORMAL,
        BarStyle::Warning => HEALTH_WARNING,
        BarStyle::Alarm => HEALTH_ALARM,
    }
}

/// Draws the full HUD for the current frame.
pub(crate) fn draw_hud(view: &HudView) {
    let screen_width = macroquad::window::screen_width();
    let bar_width = screen_width * BAR_WIDTH_FRACTION;

    draw_fighter_panel(&view.fighters[0], BAR_MARGIN, bar_width, false);
    draw_fighter_panel(
        &view.fighters[1],
        screen_width - BAR_MARGIN - bar_width,
        bar_width,
        true,
    );

    draw_centered(&view.round_label, 30.0, 28.0, TEXT_COLOR);
    draw_centered(&view.timer_label, 62.0, 40.0, TEXT_COLOR);

    if view.overlay.visible {
        let y = macroquad::window::screen_height() * 0.42;
        draw_centered(&view.overlay.text, y, 72.0, TEXT_COLOR);
    }

    if view.hit_banner.visible {
        let y = macroquad::window::screen_height() * 0.56;
        draw_centered(&view.hit_banner.text, y, 30.0, TEXT_COLOR);
    }
}

/// Draws the frozen-session notice once the driver has halted.
pub(crate) fn draw_halt_banner() {
    let y = macroquad::window::screen_height() * 0.32;
    draw_centered("SIMULATION HALTED", y, 40.0, HALT_COLOR);
}

fn draw_fighter_panel(
    panel: &duel_arena_rendering::hud::FighterPanel,
    x: f32,
    width: f32,
    right_aligned: bool,
) {
    let label = if panel.archetype.is_empty() {
        panel.name.clone()
    } else {
        format!("{} ({})", panel.name, panel.archetype)
    };
    let label_x = if right_aligned {
        let size = measure_text(&label, None, 24, 1.0);
        x + width - size.width
    } else {
        x
    };
    draw_text(&label, label_x, 34.0, 24.0, to_macroquad_color(TEXT_COLOR));

    draw_bar(
        x,
        44.0,
        width,
        HEALTH_BAR_HEIGHT,
        panel.health_ratio,
        health_color(panel.health_style),
        right_aligned,
    );
    draw_bar(
        x,
        48.0 + HEALTH_BAR_HEIGHT,
        width,
        STAMINA_BAR_HEIGHT,
        panel.stamina_ratio,
        STAMINA_COLOR,
        right_aligned,
    );

    if !panel.win_glyphs.is_empty() {
        let glyph_x = if right_aligned {
            let size = measure_text(&panel.win_glyphs, None, 22, 1.0);
            x + width - size.width
        } else {
            x
        };
        draw_text(
            &panel.win_glyphs,
            glyph_x,
            92.0,
            22.0,
            to_macroquad_color(TEXT_COLOR),
        );
    }
}

fn draw_bar(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    ratio: f32,
    color: Color,
    right_aligned: bool,
) {
    macroquad::shapes::draw_rectangle(x, y, width, height, to_macroquad_color(BAR_BACKDROP));

    let fill = width * ratio.clamp(0.0, 1.0);
    // Player two's bar drains toward the center of the screen.
    let fill_x = if right_aligned { x + width - fill } else { x };

    macroquad::shapes::draw_rectangle(fill_x, y, fill, height, to_macroquad_color(color));
    // Lightened top half fakes the gradient styling.
    macroquad::shapes::draw_rectangle(
        fill_x,
        y,
        fill,
        height / 2.0,
        to_macroquad_color(color.lighten(0.35)),
    );
}

fn draw_centered(text: &str, y: f32, font_size: f32, color: Color) {
    if text.is_empty() {
        return;
    }
    let size = measure_text(text, None, font_size as u16, 1.0);
    let x = (macroquad::window::screen_width() - size.width) / 2.0;
    draw_text(text, x, y, font_size, to_macroquad_color(color));
}
