#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad rendering backend for Duel Arena.
//!
//! Draws the declarative [`Scene`] as a side-view: the arena floor spans the
//! lower portion of the window and fighters are boxes positioned, scaled and
//! tinted exactly as the scene description dictates. HUD drawing lives in
//! [`hud`] so the rest of the adapter stays free of text-layout concerns.

mod hud;

use std::time::Duration;

use anyhow::Result;
use duel_arena_core::{ArenaBounds, Facing};
use duel_arena_rendering::{
    Color, FighterPresentation, FrameInput, FrameStatus, Presentation, RenderingBackend, Scene,
};
use glam::{Vec2, Vec3};
use macroquad::input::{is_key_down, KeyCode};

/// Nominal fighter body width in world units before scaling.
const BODY_WIDTH: f32 = 0.55;
/// Nominal fighter body height in world units before scaling.
const BODY_HEIGHT: f32 = 1.8;
/// Horizontal margin reserved around the arena, in pixels.
const ARENA_MARGIN: f32 = 90.0;
/// Fraction of the window height where the arena floor line sits.
const GROUND_FRACTION: f32 = 0.78;

/// Keys the backend polls every frame, with their canonical binding names.
const POLLED_KEYS: [(KeyCode, &str); 41] = [
    (KeyCode::A, "a"),
    (KeyCode::B, "b"),
    (KeyCode::C, "c"),
    (KeyCode::D, "d"),
    (KeyCode::E, "e"),
    (KeyCode::F, "f"),
    (KeyCode::G, "g"),
    (KeyCode::H, "h"),
    (KeyCode::I, "i"),
    (KeyCode::J, "j"),
    (KeyCode::K, "k"),
    (KeyCode::L, "l"),
    (KeyCode::M, "m"),
    (KeyCode::N, "n"),
    (KeyCode::O, "o"),
    (KeyCode::P, "p"),
    (KeyCode::Q, "q"),
    (KeyCode::R, "r"),
    (KeyCode::S, "s"),
    (KeyCode::T, "t"),
    (KeyCode::U, "u"),
    (KeyCode::V, "v"),
    (KeyCode::W, "w"),
    (KeyCode::X, "x"),
    (KeyCode::Y, "y"),
    (KeyCode::Z, "z"),
    (KeyCode::Up, "up"),
    (KeyCode::Down, "down"),
    (KeyCode::Left, "left"),
    (KeyCode::Right, "right"),
    (KeyCode::Space, "space"),
    (KeyCode::Enter, "enter"),
    (KeyCode::LeftShift, "leftshift"),
    (KeyCode::RightShift, "rightshift"),
    (KeyCode::LeftControl, "leftcontrol"),
    (KeyCode::RightControl, "rightcontrol"),
    (KeyCode::Key1, "1"),
    (KeyCode::Key2, "2"),
    (KeyCode::Key3, "3"),
    (KeyCode::Key4, "4"),
    (KeyCode::Key5, "5"),
];

/// Rendering backend that presents scenes through a Macroquad window.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadBackend {
    window_width: i32,
    window_height: i32,
}

impl MacroquadBackend {
    /// Creates a backend with the default window size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
        }
    }

    /// Overrides the created window's dimensions.
    #[must_use]
    pub fn with_window_size(mut self, width: i32, height: i32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, update: F) -> Result<()>
    where
        F: FnMut(Duration, &FrameInput, &mut Scene) -> FrameStatus + 'static,
    {
        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let config = macroquad::window::Conf {
            window_title,
            window_width: self.window_width,
            window_height: self.window_height,
            ..macroquad::window::Conf::default()
        };

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut update = update;
            let mut halted = false;
            let background = to_macroquad_color(clear_color);

            loop {
                if is_key_down(KeyCode::Escape) {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = poll_frame_input();

                if !halted {
                    let status = update(frame_dt, &frame_input, &mut scene);
                    halted = status == FrameStatus::Halted;
                }

                macroquad::window::clear_background(background);

                let viewport = Viewport::from_scene(&scene);
                draw_arena(&scene, &viewport);
                for fighter in &scene.fighters {
                    draw_fighter(fighter, &viewport);
                }
                hud::draw_hud(&scene.hud);
                if halted {
                    hud::draw_halt_banner();
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Collects the currently held keys into a frame input descriptor.
fn poll_frame_input() -> FrameInput {
    let mut input = FrameInput::new();
    for (code, name) in POLLED_KEYS {
        if is_key_down(code) {
            input.press(name);
        }
    }
    input
}

/// Screen-space mapping of the arena's principal axis and floor line.
struct Viewport {
    origin_x: f32,
    min_x: f32,
    scale: f32,
    ground_y: f32,
}

impl Viewport {
    fn new(bounds: ArenaBounds, screen_width: f32, screen_height: f32) -> Self {
        let usable = (screen_width - 2.0 * ARENA_MARGIN).max(1.0);
        let width = bounds.width().max(f32::EPSILON);

        Self {
            origin_x: ARENA_MARGIN,
            min_x: bounds.min_x,
            scale: usable / width,
            ground_y: screen_height * GROUND_FRACTION,
        }
    }

    fn from_scene(scene: &Scene) -> Self {
        Self::new(
            scene.arena.bounds,
            macroquad::window::screen_width(),
            macroquad::window::screen_height(),
        )
    }

    fn screen_x(&self, world_x: f32) -> f32 {
        self.origin_x + (world_x - self.min_x) * self.scale
    }

    fn screen_y_above_ground(&self, world_y: f32) -> f32 {
        self.ground_y - world_y * self.scale
    }

    /// Projects a world position onto the fighter's screen-space anchor: the
    /// point where its feet meet the floor line.
    fn project(&self, world: Vec3) -> Vec2 {
        Vec2::new(self.screen_x(world.x), self.screen_y_above_ground(world.y))
    }
}

fn draw_arena(scene: &Scene, viewport: &Viewport) {
    let bounds = scene.arena.bounds;
    let left = viewport.screen_x(bounds.min_x);
    let right = viewport.screen_x(bounds.max_x);
    let floor_depth = macroquad::window::screen_height() - viewport.ground_y;

    macroquad::shapes::draw_rectangle(
        left,
        viewport.ground_y,
        right - left,
        floor_depth,
        to_macroquad_color(scene.arena.floor_color),
    );
    macroquad::shapes::draw_line(
        left,
        viewport.ground_y,
        right,
        viewport.ground_y,
        3.0,
        to_macroquad_color(scene.arena.line_color),
    );
    // Boundary posts mark the ends of the playable axis.
    for x in [left, right] {
        macroquad::shapes::draw_line(
            x,
            viewport.ground_y - 24.0,
            x,
            viewport.ground_y,
            3.0,
            to_macroquad_color(scene.arena.line_color),
        );
    }
}

fn draw_fighter(fighter: &FighterPresentation, viewport: &Viewport) {
    let body_width = BODY_WIDTH * fighter.scale.x * viewport.scale;
    let body_height = BODY_HEIGHT * fighter.scale.y * viewport.scale;

    let anchor = viewport.project(fighter.position);
    let left = anchor.x - body_width / 2.0;
    let top = anchor.y - body_height;

    let color = to_macroquad_color(fighter.effective_color());
    macroquad::shapes::draw_rectangle(left, top, body_width, body_height, color);

    // A brighter head-height marker on the leading edge shows facing, since
    // orientation is one of exactly two discrete rotations.
    let marker = to_macroquad_color(fighter.effective_color().lighten(0.5));
    let marker_width = body_width * 0.25;
    let marker_x = match fighter.facing {
        Facing::Right => anchor.x + body_width / 2.0,
        Facing::Left => anchor.x - body_width / 2.0 - marker_width,
    };
    macroquad::shapes::draw_rectangle(
        marker_x,
        top + body_height * 0.1,
        marker_width,
        body_height * 0.15,
        marker,
    );
}

pub(crate) fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(ArenaBounds::new(-3.2, 3.2, -1.6, 1.6), 1280.0, 720.0)
    }

    #[test]
    fn arena_edges_map_to_the_horizontal_margins() {
        let viewport = viewport();
        assert!((viewport.screen_x(-3.2) - ARENA_MARGIN).abs() < 1e-3);
        assert!((viewport.screen_x(3.2) - (1280.0 - ARENA_MARGIN)).abs() < 1e-3);
    }

    #[test]
    fn the_arena_midpoint_maps_to_the_screen_center() {
        let viewport = viewport();
        assert!((viewport.screen_x(0.0) - 640.0).abs() < 1e-3);
    }

    #[test]
    fn the_floor_sits_at_the_ground_fraction_of_the_window() {
        let viewport = viewport();
        assert!((viewport.screen_y_above_ground(0.0) - 720.0 * GROUND_FRACTION).abs() < 1e-3);
    }

    #[test]
    fn height_above_the_floor_rises_on_screen() {
        let viewport = viewport();
        let on_floor = viewport.screen_y_above_ground(0.0);
        let airborne = viewport.screen_y_above_ground(1.0);
        assert!(airborne < on_floor, "screen y decreases as world y rises");
        assert!((on_floor - airborne - viewport.scale).abs() < 1e-3);
    }

    #[test]
    fn project_combines_both_axes_into_the_floor_anchor() {
        let viewport = viewport();
        let anchor = viewport.project(Vec3::new(-3.2, 0.0, 0.0));
        assert!((anchor.x - ARENA_MARGIN).abs() < 1e-3);
        assert!((anchor.y - viewport.ground_y).abs() < 1e-3);
    }

    #[test]
    fn degenerate_bounds_never_produce_a_non_finite_scale() {
        let collapsed = Viewport::new(ArenaBounds::new(1.0, 1.0, -1.0, 1.0), 1280.0, 720.0);
        assert!(collapsed.scale.is_finite());
    }

    #[test]
    fn color_conversion_preserves_every_channel() {
        let converted = to_macroquad_color(Color::new(0.25, 0.5, 0.75, 0.5));
        assert_eq!(converted.r, 0.25);
        assert_eq!(converted.g, 0.5);
        assert_eq!(converted.b, 0.75);
        assert_eq!(converted.a, 0.5);
    }
}
