//! Episode configuration.

use serde::{Deserialize, Serialize};

use crate::{EpisodeError, EpisodeResult};

/// Size and length of one episode.
///
/// The defaults match the evaluation service's request defaults.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EpisodeConfig {
    pub fleet_size:    usize,
    /// Number of one-minute ticks to simulate.
    pub steps:         usize,
    /// Record a [`StepInsight`][crate::StepInsight] for every tick.
    pub capture_steps: bool,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self { fleet_size: 120, steps: 180, capture_steps: false }
    }
}

impl EpisodeConfig {
    pub fn validate(&self) -> EpisodeResult<()> {
        if self.fleet_size == 0 {
            return Err(EpisodeError::Config("fleet_size must be > 0".into()));
        }
        if self.steps == 0 {
            return Err(EpisodeError::Config("steps must be > 0".into()));
        }
        Ok(())
    }
}
