//! Driver configuration.
//!
//! Everything has a default, so a config file only needs the fields it
//! changes:
//!
//! ```json
//! { "scenario": "archery", "tick": { "dt": 0.0833, "max_ticks": 240 } }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use sim_system::{PhysicsConfig, Viewport};

use crate::scenario::Scenario;

/// Configuration for the tick loop.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Fixed simulation step in seconds.
    pub dt: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            max_ticks: 600,
        }
    }
}

/// Size of the arena the scenarios are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 360.0,
        }
    }
}

impl From<ArenaConfig> for Viewport {
    fn from(arena: ArenaConfig) -> Self {
        Viewport::new(arena.width, arena.height)
    }
}

/// Archery-specific settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArcheryConfig {
    /// Launch speed of each arrow.
    pub arrow_speed: f64,
    /// Ticks between arrows; 0 disables firing.
    pub fire_every: u64,
    /// Ticks to hold the aim-up key at the start of the run.
    pub aim_ticks: usize,
}

impl Default for ArcheryConfig {
    fn default() -> Self {
        Self {
            arrow_speed: 70.0,
            fire_every: 30,
            aim_ticks: 0,
        }
    }
}

/// Top-level driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub scenario: Scenario,
    pub tick: TickConfig,
    pub physics: PhysicsConfig,
    pub arena: ArenaConfig,
    pub archery: ArcheryConfig,
}

impl SimConfig {
    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid simulation config")
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }
}
