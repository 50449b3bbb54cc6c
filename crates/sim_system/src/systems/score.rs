//! Counts arrows stuck in the target.

use sim_component::{ComponentKind, Name, Paired, QueryDescriptor};
use sim_world::{Payload, World};
use tracing::{info, warn};

use crate::error::SystemError;
use crate::frame::FrameArgs;
use crate::system::System;

/// Event fired with the current score on every update.
pub const SCORE_EVENT: &str = "score";

/// Name an anchor must carry for its dependents to score.
pub const TARGET_NAME: &str = "target";

/// Scores one point per paired entity whose anchor is named `"target"`.
#[derive(Debug, Clone)]
pub struct ScoreSystem {
    query: QueryDescriptor,
    last_score: u32,
}

impl ScoreSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: QueryDescriptor::new().require(ComponentKind::Paired),
            last_score: 0,
        }
    }

    /// Count the current score and publish it.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Event`] if firing the score event fails.
    pub fn step(&mut self, world: &World) -> Result<u32, SystemError> {
        let mut score = 0;
        for entity in world.resolve(&self.query) {
            let Some(paired) = world.get::<Paired>(entity) else {
                continue;
            };
            if !world.contains(paired.anchor) {
                warn!(%entity, anchor = %paired.anchor, "paired anchor not found");
                continue;
            }
            if world
                .get::<Name>(paired.anchor)
                .is_some_and(|name| name.value == TARGET_NAME)
            {
                score += 1;
            }
        }

        if score != self.last_score {
            info!(score, "score changed");
        }
        self.last_score = score;
        world.events().fire(SCORE_EVENT, &Payload::Score(score))?;
        Ok(score)
    }

    /// The score computed by the latest update.
    #[must_use]
    pub fn last_score(&self) -> u32 {
        self.last_score
    }
}

impl Default for ScoreSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for ScoreSystem {
    fn name(&self) -> &str {
        "score"
    }

    fn query(&self) -> &QueryDescriptor {
        &self.query
    }

    fn update(&mut self, world: &mut World, _frame: &FrameArgs) -> Result<(), SystemError> {
        self.step(world)?;
        Ok(())
    }
}
