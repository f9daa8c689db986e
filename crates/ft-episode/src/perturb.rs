//! Local-search neighbour of a parameter vector.

use ft_core::{SimRng, clamp};
use ft_policy::{PARAM_BOUNDS, PolicyParams};

/// Noise scale per field, applied to a uniform draw centred on zero.
const DEMAND_SCALE: f64 = 0.6;
const ENERGY_SCALE: f64 = 0.4;
const THRESHOLD_SCALE: f64 = 0.2;
const EXPLORATION_SCALE: f64 = 0.16;

/// Return a neighbouring parameter vector.
///
/// Each field gets `(u − 0.5)·scale` added, `u ∈ [0, 1)`, drawn in field
/// order (demand, energy, threshold, exploration), then is clamped into
/// [`PARAM_BOUNDS`].  The result is always in bounds, whatever `base` is.
pub fn perturb_params(base: &PolicyParams, rng: &mut SimRng) -> PolicyParams {
    let b = PARAM_BOUNDS;
    let mut delta = |scale: f64| (rng.unit() - 0.5) * scale;
    PolicyParams {
        demand_weight:    clamp(base.demand_weight + delta(DEMAND_SCALE), b.demand_weight.0, b.demand_weight.1),
        energy_weight:    clamp(base.energy_weight + delta(ENERGY_SCALE), b.energy_weight.0, b.energy_weight.1),
        charge_threshold: clamp(
            base.charge_threshold + delta(THRESHOLD_SCALE),
            b.charge_threshold.0,
            b.charge_threshold.1,
        ),
        exploration:      clamp(base.exploration + delta(EXPLORATION_SCALE), b.exploration.0, b.exploration.1),
    }
}
