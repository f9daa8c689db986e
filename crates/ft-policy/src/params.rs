//! Tunable policy parameters.

use ft_core::{CoreError, CoreResult, clamp};
use serde::{Deserialize, Serialize};

/// Inclusive `(min, max)` range for each [`PolicyParams`] field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParamBounds {
    pub demand_weight:    (f64, f64),
    pub energy_weight:    (f64, f64),
    pub charge_threshold: (f64, f64),
    pub exploration:      (f64, f64),
}

/// Valid ranges used by validation, clamping and perturbation.
pub const PARAM_BOUNDS: ParamBounds = ParamBounds {
    demand_weight:    (0.4, 2.0),
    energy_weight:    (0.05, 1.0),
    charge_threshold: (0.1, 0.9),
    exploration:      (0.0, 0.5),
};

/// The four scalars steering [`TunedHeuristic`][crate::TunedHeuristic].
///
/// Created by the caller and fixed for the length of an episode.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyParams {
    /// How strongly per-vehicle demand pulls a vehicle toward a cell.
    pub demand_weight: f64,
    /// How strongly the tariff discourages moving; also raises the daytime
    /// charge rate.
    pub energy_weight: f64,
    /// State-of-charge ratio below which a vehicle always charges.
    pub charge_threshold: f64,
    /// Base probability of replacing the chosen cell with a random neighbour.
    pub exploration: f64,
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            demand_weight:    1.1,
            energy_weight:    0.25,
            charge_threshold: 0.35,
            exploration:      0.08,
        }
    }
}

impl PolicyParams {
    /// Copy with every field clamped into [`PARAM_BOUNDS`].
    pub fn clamped(self) -> Self {
        let b = PARAM_BOUNDS;
        Self {
            demand_weight:    clamp(self.demand_weight, b.demand_weight.0, b.demand_weight.1),
            energy_weight:    clamp(self.energy_weight, b.energy_weight.0, b.energy_weight.1),
            charge_threshold: clamp(self.charge_threshold, b.charge_threshold.0, b.charge_threshold.1),
            exploration:      clamp(self.exploration, b.exploration.0, b.exploration.1),
        }
    }

    /// Check every field against [`PARAM_BOUNDS`]; NaN is out of range.
    pub fn validate(&self) -> CoreResult<()> {
        let b = PARAM_BOUNDS;
        let fields = [
            ("demand_weight", self.demand_weight, b.demand_weight),
            ("energy_weight", self.energy_weight, b.energy_weight),
            ("charge_threshold", self.charge_threshold, b.charge_threshold),
            ("exploration", self.exploration, b.exploration),
        ];
        for (name, value, (min, max)) in fields {
            if !(min..=max).contains(&value) {
                return Err(CoreError::OutOfRange { name, value, min, max });
            }
        }
        Ok(())
    }
}
