#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots a local Duel Arena session.
//!
//! Wires the scripted demo engine to the Macroquad backend: parses the
//! command line, loads an optional key-binding file, assembles the frame
//! driver and hands the per-frame closure to the window loop.

mod demo;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use duel_arena_core::{CombatEngine, Facing, WELCOME_BANNER};
use duel_arena_rendering::hud::HudPresenter;
use duel_arena_rendering::{
    ArenaPresentation, Color, FighterPresentation, Presentation, RenderingBackend, Scene,
};
use duel_arena_rendering_macroquad::MacroquadBackend;
use duel_arena_system_driver::FrameDriver;
use duel_arena_system_input::{InputEncoder, KeyBindings};

use crate::demo::DemoEngine;

const WINDOW_TITLE: &str = "Duel Arena";

const CLEAR_COLOR: Color = Color::from_rgb_u8(16, 16, 22);
const FLOOR_COLOR: Color = Color::from_rgb_u8(46, 42, 56);
const LINE_COLOR: Color = Color::from_rgb_u8(180, 170, 150);
const PLAYER_ONE_COLOR: Color = Color::from_rgb_u8(70, 110, 220);
const PLAYER_TWO_COLOR: Color = Color::from_rgb_u8(220, 80, 70);

/// Command-line options for a duel session.
#[derive(Debug, Parser)]
#[command(name = "duel-arena", about = "Local two-player duel client")]
struct Args {
    /// Fighter piloted by player one.
    #[arg(long, default_value = "Kael")]
    player_one: String,
    /// Fighter piloted by player two.
    #[arg(long, default_value = "Knight")]
    player_two: String,
    /// TOML file overriding the built-in key bindings.
    #[arg(long)]
    bindings: Option<PathBuf>,
    /// Print the available roster and exit.
    #[arg(long)]
    list_fighters: bool,
}

/// Entry point for the Duel Arena command-line interface.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.list_fighters {
        for (name, archetype) in demo::ROSTER {
            println!("{name} ({archetype})");
        }
        return Ok(());
    }

    println!("{WELCOME_BANNER}");

    let bindings = match &args.bindings {
        Some(path) => load_bindings(path)?,
        None => KeyBindings::default(),
    };
    let encoder = InputEncoder::new(bindings).context("invalid key bindings")?;

    let engine = DemoEngine::new(&args.player_one, &args.player_two)?;
    let arena = ArenaPresentation::new(engine.arena_bounds(), FLOOR_COLOR, LINE_COLOR);
    let scene = Scene::new(
        arena,
        [
            FighterPresentation::new(PLAYER_ONE_COLOR, Facing::Right),
            FighterPresentation::new(PLAYER_TWO_COLOR, Facing::Left),
        ],
    );

    let mut driver = FrameDriver::new(engine, encoder, HudPresenter::new());
    let presentation = Presentation::new(WINDOW_TITLE, CLEAR_COLOR, scene);

    MacroquadBackend::new().run(presentation, move |elapsed, input, scene| {
        driver.frame(elapsed, input, scene)
    })
}

fn load_bindings(path: &Path) -> anyhow::Result<KeyBindings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read bindings file {}", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse bindings file {}", path.display()))
}
