//! # sim_app: headless driver
//!
//! Builds one of the built-in scenes and steps it for a fixed number of
//! ticks, logging the outcome. No window or keyboard is involved: input is
//! scripted and the renderer only records draw lists.
//!
//! ## Usage
//!
//! ```text
//! sim_app --scenario archery --ticks 240 --dt 0.0833
//! sim_app --config sim.json
//! RUST_LOG=sim_system=trace sim_app
//! ```

mod config;
mod render;
mod scenario;
mod tick;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sim_component::Position;
use sim_system::{DirectionalInput, ScriptedInput};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::SimConfig;
use scenario::Scenario;
use tick::TickLoop;

#[derive(Parser)]
#[command(name = "sim_app", about = "Headless driver for the 2D simulation core")]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scene to run, overriding the config file
    #[arg(short, long, value_enum)]
    scenario: Option<Scenario>,

    /// Number of ticks to run (0 = unlimited)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Fixed step in seconds
    #[arg(long)]
    dt: Option<f64>,
}

impl Args {
    /// Load the config file, if any, and apply the command-line overrides.
    fn into_config(self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        if let Some(scenario) = self.scenario {
            config.scenario = scenario;
        }
        if let Some(ticks) = self.ticks {
            config.tick.max_ticks = ticks;
        }
        if let Some(dt) = self.dt {
            anyhow::ensure!(dt > 0.0, "--dt must be positive, got {dt}");
            config.tick.dt = dt;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sim_app=info".parse()?))
        .init();

    let config = Args::parse().into_config()?;
    info!(scenario = %config.scenario, "simulation starting");

    let input = ScriptedInput::default().hold(DirectionalInput::LEFT, config.archery.aim_ticks);
    let mut tick_loop = TickLoop::new(&config, Box::new(input))?;
    tick_loop.run()?;

    let world = tick_loop.world();
    for entity in tick_loop.scene().arrows() {
        if let Some(position) = world.get::<Position>(*entity) {
            info!(%entity, x = position.x, y = position.y, "arrow");
        }
    }
    for (entity, trajectory) in tick_loop.trajectories().trajectories() {
        if let Some((x, y)) = trajectory.last() {
            info!(%entity, x, y, samples = trajectory.len(), "final position");
        }
    }
    info!(
        ticks = tick_loop.tick_id(),
        time = tick_loop.time(),
        score = tick_loop.score(),
        stuck = tick_loop.stuck_count(),
        "simulation finished"
    );
    Ok(())
}
