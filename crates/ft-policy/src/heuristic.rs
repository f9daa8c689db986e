//! The parameter-driven scoring policy.

use ft_core::{CellId, SimRng};
use ft_env::Action;

use crate::{FleetPolicy, PolicyContext, PolicyParams};

/// Off-peak charge rate in kW.
pub const OFF_PEAK_CHARGE_KW: f64 = 11.0;

/// Scores the current cell and its neighbours by demand per vehicle minus a
/// tariff penalty, with threshold-based charging and random exploration.
///
/// Per vehicle:
///
/// 1. **Charge** when the state-of-charge ratio is below
///    `charge_threshold`, or off-peak and below
///    `min(0.98, charge_threshold + 0.35)`.  Rate is 11 kW off-peak,
///    otherwise `7 + 6·energy_weight` kW.
/// 2. Otherwise score `[current, neighbours…]` as
///    `(1 + demand_weight)·demand/(vehicles + 1) − price·(0.8 + 1.6·energy_weight)`
///    and keep the first highest score, so ties stay put.
/// 3. When `exploration > 0`, with probability
///    `min(0.9, exploration + 0.05)` replace the target with a uniformly
///    random neighbour.
/// 4. Move if the target differs from the current cell, else idle.
#[derive(Copy, Clone, Debug, Default)]
pub struct TunedHeuristic;

impl FleetPolicy for TunedHeuristic {
    fn decide(&self, ctx: &PolicyContext<'_>, params: &PolicyParams, rng: &mut SimRng) -> Vec<Action> {
        let state = ctx.state;
        let off_peak = ctx.is_off_peak();
        let counts = state.vehicle_counts();
        let top_up = (params.charge_threshold + 0.35).min(0.98);
        let energy_penalty = state.energy_price * (0.8 + params.energy_weight * 1.6);
        let explore_p = (params.exploration + 0.05).min(0.9);

        let score = |cell: CellId| {
            let here = counts.get(cell.index()).copied().unwrap_or(0) as f64;
            let load = state.demand(cell) as f64 / (here + 1.0);
            (1.0 + params.demand_weight) * load - energy_penalty
        };

        state
            .vehicles
            .iter()
            .map(|v| {
                let ratio = v.battery_ratio();
                if ratio < params.charge_threshold || (off_peak && ratio < top_up) {
                    let rate = if off_peak { OFF_PEAK_CHARGE_KW } else { 7.0 + params.energy_weight * 6.0 };
                    return Action::charge(v.id, rate);
                }

                let neighbors = ctx.neighbors(v.cell);
                let mut target = v.cell;
                let mut best = score(v.cell);
                for &n in neighbors {
                    let s = score(n);
                    if s > best {
                        best = s;
                        target = n;
                    }
                }

                if params.exploration > 0.0 && rng.unit() < explore_p && !neighbors.is_empty() {
                    let pick = (rng.unit() * neighbors.len() as f64) as usize;
                    target = neighbors[pick.min(neighbors.len() - 1)];
                }

                if target != v.cell { Action::move_to(v.id, target) } else { Action::idle(v.id) }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "tuned-heuristic"
    }
}
