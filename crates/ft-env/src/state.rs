//! Environment state snapshots and step results.

use ft_core::{CellId, Tick};

use crate::Vehicle;

/// Everything that changes between ticks.
///
/// Obtained from [`GridEnv::snapshot`][crate::GridEnv::snapshot] as an owned
/// value, so holding or editing one never affects the environment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvState {
    pub tick: Tick,
    /// Ride requests this tick, indexed by `CellId`.
    pub demand_by_cell: Vec<u32>,
    /// €/kWh for this tick.
    pub energy_price: f64,
    /// Fleet in ascending `VehicleId` order.
    pub vehicles: Vec<Vehicle>,
}

impl EnvState {
    /// Demand at `cell`; zero for unknown cells.
    #[inline]
    pub fn demand(&self, cell: CellId) -> u32 {
        self.demand_by_cell.get(cell.index()).copied().unwrap_or(0)
    }

    pub fn total_demand(&self) -> u64 {
        self.demand_by_cell.iter().map(|&d| d as u64).sum()
    }

    /// Number of vehicles in each cell, indexed by `CellId`.
    pub fn vehicle_counts(&self) -> Vec<u32> {
        let mut counts = vec![0u32; self.demand_by_cell.len()];
        for v in &self.vehicles {
            if let Some(c) = counts.get_mut(v.cell.index()) {
                *c += 1;
            }
        }
        counts
    }
}

/// Per-tick figures from one `advance` call.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepInfo {
    pub served: u64,
    pub unmet: u64,
    /// `served + unmet`; equals the demand generated for the resolved tick.
    pub demand_total: u64,
    /// € spent charging, 4 d.p.
    pub energy_cost: f64,
    /// Σ `unmet / (demand + 1)` over cells, 4 d.p.
    pub wait_proxy: f64,
}

/// Result of [`GridEnv::advance`][crate::GridEnv::advance].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepOutcome {
    /// State after the tick advanced.
    pub state:  EnvState,
    /// Non-negative, 4 d.p.
    pub reward: f64,
    pub info:   StepInfo,
}
