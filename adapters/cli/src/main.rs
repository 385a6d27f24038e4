#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Gridwalk experience.

mod config;
mod frame_clock;
mod game_loop;

use std::{cell::RefCell, fs, path::PathBuf, rc::Rc};

use anyhow::{Context, Result};
use clap::Parser;
use gridwalk_core::{GameConfig, MovementMode};
use gridwalk_rendering::{
    Color, FrameInput, HeadlessBackend, Presentation, RenderingBackend, Scene,
};
use gridwalk_rendering_macroquad::MacroquadBackend;
use gridwalk_system_bootstrap::Bootstrap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use self::{config::Overrides, game_loop::GameLoop};

/// Walk a tile grid with a camera that follows you.
#[derive(Debug, Parser)]
#[command(name = "gridwalk", version, about)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Text layout to load instead of placing random solid tiles.
    #[arg(long, value_name = "PATH")]
    map: Option<PathBuf>,
    /// Movement mode: arrow-keys, rotate-with-keys or rotate-with-mouse.
    #[arg(long, value_name = "MODE", value_parser = config::parse_movement)]
    movement: Option<MovementMode>,
    /// Seed for the random tile placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Log the frame rate once per second.
    #[arg(long)]
    show_fps: bool,
    /// Render as fast as possible instead of waiting for the display refresh.
    #[arg(long)]
    no_vsync: bool,
    /// Run this many frames without opening a window.
    #[arg(long, value_name = "FRAMES")]
    headless: Option<usize>,
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Gridwalk command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = config::load(cli.config.as_deref())?;
    config::apply(
        &mut config,
        Overrides {
            movement: cli.movement,
            no_vsync: cli.no_vsync,
        },
    );

    run(&cli, &config)
}

fn run(cli: &Cli, config: &GameConfig) -> Result<()> {
    let bootstrap = Bootstrap;
    tracing::info!("{}", bootstrap.welcome_banner());

    let layout = cli
        .map
        .as_deref()
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read map file {}", path.display()))
        })
        .transpose()?;

    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let startup = bootstrap
        .startup(config, layout.as_deref(), &mut rng)
        .context("failed to build the tile grid")?;

    let presentation = Presentation::new(
        bootstrap.welcome_banner(),
        config.window.width,
        config.window.height,
        Color::WHITE,
        Scene::new(startup.grid.tile_side() as f32),
    )?;

    let game = Rc::new(RefCell::new(GameLoop::new(startup, config.window.target_fps)));
    let handle = Rc::clone(&game);
    let update =
        move |input: FrameInput, scene: &mut Scene| handle.borrow_mut().frame(input, scene);

    tracing::info!(movement = ?config.player.movement, "starting game loop");
    match cli.headless {
        Some(frames) => HeadlessBackend::idle(frames).run(presentation, update)?,
        None => MacroquadBackend::new()
            .with_vsync(config.window.vsync)
            .with_show_fps(cli.show_fps)
            .run(presentation, update)?,
    }

    let game = game.borrow();
    let rect = game.player().rect();
    tracing::info!(
        frames = game.frames(),
        x = rect.left(),
        y = rect.top(),
        solid_tiles = game.grid().solid_count(),
        "game loop stopped"
    );
    Ok(())
}
