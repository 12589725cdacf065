use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use waypoint_defence_oracle::OracleConfig;
use waypoint_defence_simulation::SimulationConfig;
use waypoint_defence_world::WorldConfig;

/// Contents of the optional TOML configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfigFile {
    /// Economy, pacing and seeding of the simulation.
    pub game: GameSection,
    /// Remote wave generation settings.
    pub oracle: OracleConfig,
}

/// `[game]` table of the configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameSection {
    pub starting_money: u32,
    pub starting_lives: u32,
    pub difficulty_ramp: f32,
    pub seed: u64,
    pub reply_timeout_frames: u32,
}

impl Default for GameSection {
    fn default() -> Self {
        let simulation = SimulationConfig::default();
        Self {
            starting_money: simulation.world.starting_money,
            starting_lives: simulation.world.starting_lives,
            difficulty_ramp: simulation.difficulty_ramp,
            seed: simulation.world.particle_seed,
            reply_timeout_frames: simulation.reply_timeout_frames,
        }
    }
}

impl GameSection {
    /// Builds the simulation settings, preferring `seed_override` when present.
    pub(crate) fn simulation_config(&self, seed_override: Option<u64>) -> SimulationConfig {
        SimulationConfig {
            world: WorldConfig {
                starting_money: self.starting_money,
                starting_lives: self.starting_lives,
                particle_seed: seed_override.unwrap_or(self.seed),
            },
            difficulty_ramp: self.difficulty_ramp,
            reply_timeout_frames: self.reply_timeout_frames.max(1),
        }
    }
}

impl GameConfigFile {
    /// Loads the configuration at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid configuration toml")
    }
}
