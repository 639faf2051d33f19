#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots Star Siege.
//!
//! Without `--headless` the game opens a macroquad window; with it the
//! simulation runs for a fixed number of ticks under a simple autopilot and
//! logs the outcome.

mod autopilot;
mod scene;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use star_siege_core::WINDOW_TITLE;
use star_siege_rendering::{Color, Presentation, RenderingBackend, Scene};
use star_siege_rendering_macroquad::{MacroquadBackend, DEFAULT_MANIFEST_PATH};
use star_siege_system_game_loop::Game;
use star_siege_world::{query, GameConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use self::{autopilot::Autopilot, scene::populate_scene};

#[derive(Debug, Parser)]
#[command(name = "star-siege")]
#[command(about = "Vertical shoot-em-up: clear the waves, then defeat the boss")]
struct Args {
    /// Game configuration file (TOML). Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Texture manifest loaded before the first frame.
    #[arg(long, default_value = DEFAULT_MANIFEST_PATH)]
    manifest: PathBuf,
    /// Seed overriding the configured one (decimal or 0x-prefixed hex).
    #[arg(long, value_parser = parse_seed)]
    seed: Option<u64>,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,
    /// Run the simulation without a window under the autopilot.
    #[arg(long)]
    headless: bool,
    /// Tick budget for a headless run.
    #[arg(long, default_value_t = 3_000, requires = "headless")]
    ticks: u64,
}

/// Entry point for the Star Siege command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    if args.headless {
        run_headless(config, args.ticks);
        Ok(())
    } else {
        run_windowed(config, &args)
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => GameConfig::default(),
    };
    Ok(match args.seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    })
}

fn run_windowed(config: GameConfig, args: &Args) -> Result<()> {
    let mut game = Game::new(config);
    let mut scene = Scene::default();
    populate_scene(game.world(), &mut scene);

    let backend = MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_manifest(args.manifest.clone());
    let presentation = Presentation::new(WINDOW_TITLE, Color::BLACK, scene);

    backend.run(presentation, move |dt, input, scene| {
        for key in input.keys {
            game.handle_key(key);
        }
        let _ = game.advance(dt);
        populate_scene(game.world(), scene);
    })
}

fn run_headless(config: GameConfig, ticks: u64) {
    let seed = config.seed;
    let mut game = Game::new(config);
    let mut pilot = Autopilot::default();

    for _ in 0..ticks {
        if game.is_over() {
            break;
        }
        for key in pilot.next_keys(game.world()) {
            game.handle_key(key);
        }
        game.step();
    }

    let world = game.world();
    let (points, life) = query::hero(world).map_or((0, 0), |hero| (hero.points, hero.life));
    info!(
        seed,
        phase = ?world.phase(),
        stage = world.stage_index() + 1,
        ticks = world.tick_index(),
        decisions = pilot.decisions(),
        points,
        life,
        "headless run finished"
    );
    println!(
        "{:?} at stage {} after {} ticks: {} points, {} lives left",
        world.phase(),
        world.stage_index() + 1,
        world.tick_index(),
        points,
        life
    );
}

fn parse_seed(value: &str) -> Result<u64, String> {
    let trimmed = value.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => trimmed.replace('_', "").parse(),
    };
    parsed.map_err(|error| format!("invalid seed `{value}`: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_accept_decimal_and_hex() {
        assert_eq!(parse_seed("42"), Ok(42));
        assert_eq!(parse_seed("0x5eed"), Ok(0x5eed));
        assert_eq!(parse_seed("1_000"), Ok(1_000));
        assert!(parse_seed("seed").is_err());
    }

    #[test]
    fn seed_flag_overrides_defaults() {
        let args = Args::parse_from(["star-siege", "--seed", "0x10"]);
        let config = load_config(&args).expect("default config");
        assert_eq!(config.seed, 16);
        assert_eq!(config.stages, GameConfig::default().stages);
    }

    #[test]
    fn ticks_require_headless() {
        assert!(Args::try_parse_from(["star-siege", "--ticks", "5"]).is_err());
        let args = Args::try_parse_from(["star-siege", "--headless", "--ticks", "5"])
            .expect("headless run");
        assert_eq!(args.ticks, 5);
        assert_eq!(args.manifest, PathBuf::from(DEFAULT_MANIFEST_PATH));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let args = Args::parse_from(["star-siege", "--config", "/nonexistent/star-siege.toml"]);
        let error = load_config(&args).expect_err("missing file");
        assert!(format!("{error:#}").contains("failed to load configuration"));
    }
}
