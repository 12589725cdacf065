#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Waypoint Defence experience.

mod config;
mod scene;

use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use waypoint_defence_oracle::select_oracle;
use waypoint_defence_rendering::{
    Color, FrameSimulationBreakdown, Presentation, RenderingBackend,
};
use waypoint_defence_rendering_macroquad::MacroquadBackend;
use waypoint_defence_simulation::Simulation;

use crate::config::GameConfigFile;

/// Command-line arguments accepted by the game binary.
#[derive(Debug, Parser)]
#[command(name = "waypoint-defence")]
#[command(about = "Tower defence along a fixed waypoint path")]
struct CliArgs {
    /// Optional TOML file with `[game]` and `[oracle]` sections.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for the cosmetic particle generator, overriding the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Never contact the remote wave generator.
    #[arg(long)]
    offline: bool,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    vsync: bool,

    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Entry point for the Waypoint Defence command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    let file = GameConfigFile::load(args.config.as_deref())?;
    let simulation_config = file.game.simulation_config(args.seed);
    tracing::info!(
        seed = simulation_config.world.particle_seed,
        money = simulation_config.world.starting_money,
        lives = simulation_config.world.starting_lives,
        "starting game"
    );

    let oracle = select_oracle(&file.oracle, args.offline);
    let mut simulation = Simulation::new(simulation_config, oracle);
    let scene = scene::initial_scene(&simulation)?;

    let presentation = Presentation::new(
        "Waypoint Defence",
        Color::from_rgb_u8(0x12, 0x14, 0x18),
        scene,
    );
    let backend = MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps);

    backend
        .run(presentation, move |_dt, input, scene| {
            let simulation_start = Instant::now();
            scene::apply_input(&mut simulation, &input);
            simulation.update();
            let simulation_time = simulation_start.elapsed();

            let population_start = Instant::now();
            scene::populate_scene(&simulation, input.cursor_world_space, scene);

            FrameSimulationBreakdown {
                simulation: simulation_time,
                scene_population: population_start.elapsed(),
            }
        })
        .context("rendering backend stopped with an error")
}
