//! Reference policies that ignore `PolicyParams`.

use ft_core::{CellId, SimRng};
use ft_env::Action;

use crate::{FleetPolicy, PolicyContext, PolicyParams};

/// Untuned rule set used as a comparison point for [`TunedHeuristic`].
///
/// * 00:00–05:59 and below 90 % charge → charge at 11 kW.
/// * Below 5 kWh → charge at 7 kW.
/// * Otherwise move to the cell (current or adjacent) with the best demand
///   per vehicle; if staying put and the current cell has no demand, move to
///   the first neighbour; otherwise idle.
///
/// Draws nothing from the RNG.
///
/// [`TunedHeuristic`]: crate::TunedHeuristic
#[derive(Copy, Clone, Debug, Default)]
pub struct BaselinePolicy;

impl FleetPolicy for BaselinePolicy {
    fn decide(&self, ctx: &PolicyContext<'_>, _params: &PolicyParams, _rng: &mut SimRng) -> Vec<Action> {
        let state = ctx.state;
        let night = ctx.hour() < 6;
        let counts = state.vehicle_counts();

        let score = |cell: CellId| {
            let here = counts.get(cell.index()).copied().unwrap_or(0) as f64;
            state.demand(cell) as f64 / (here + 1.0)
        };

        state
            .vehicles
            .iter()
            .map(|v| {
                if night && v.battery_kwh < v.capacity_kwh * 0.9 {
                    return Action::charge(v.id, 11.0);
                }
                if v.battery_kwh < 5.0 {
                    return Action::charge(v.id, 7.0);
                }

                let neighbors = ctx.neighbors(v.cell);
                let mut best = v.cell;
                let mut best_score = score(v.cell);
                for &n in neighbors {
                    let s = score(n);
                    if s > best_score {
                        best_score = s;
                        best = n;
                    }
                }

                if best != v.cell {
                    Action::move_to(v.id, best)
                } else if state.demand(v.cell) == 0 {
                    neighbors.first().map_or(Action::idle(v.id), |&n| Action::move_to(v.id, n))
                } else {
                    Action::idle(v.id)
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "baseline"
    }
}

/// Every vehicle idles.  Useful as a floor when comparing policies.
#[derive(Copy, Clone, Debug, Default)]
pub struct IdlePolicy;

impl FleetPolicy for IdlePolicy {
    fn decide(&self, ctx: &PolicyContext<'_>, _params: &PolicyParams, _rng: &mut SimRng) -> Vec<Action> {
        ctx.state.vehicles.iter().map(|v| Action::idle(v.id)).collect()
    }

    fn name(&self) -> &'static str {
        "idle"
    }
}
