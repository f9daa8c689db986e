//! The `GridEnv` state machine.

use std::f64::consts::TAU;
use std::sync::Arc;

use ft_core::{CellId, Tick, VehicleId, round_dp};
use ft_grid::Scenario;
use tracing::{debug, trace};

use crate::{Action, ActionKind, EnvConfig, EnvState, REWARD_OFFSET, StepInfo, StepOutcome, Vehicle};

/// Energy drawn by one move between adjacent cells.
pub const MOVE_COST_KWH: f64 = 0.5;

/// Energy drawn by one served ride; also the minimum charge to take a ride.
pub const RIDE_COST_KWH: f64 = 1.0;

/// Floor of the day-curve tariff in €/kWh.
pub const MIN_ENERGY_PRICE: f64 = 0.05;

// ── GridEnv ───────────────────────────────────────────────────────────────────

/// A fleet operating on one [`Scenario`].
///
/// The scenario is shared read-only through an `Arc`, so many environments
/// (e.g. concurrent episodes comparing policy variants) can run on one grid.
/// Each environment owns its `EnvState` exclusively.
pub struct GridEnv {
    scenario: Arc<Scenario>,
    config:   EnvConfig,
    state:    EnvState,
}

impl GridEnv {
    /// Seed `config.fleet_size` vehicles round-robin over the cells in
    /// descending population order and compute demand/price for tick 0.
    pub fn new(scenario: Arc<Scenario>, config: EnvConfig) -> Self {
        let capacity = config.battery_capacity_kwh.max(0.0);
        let initial = config.initial_battery_kwh.clamp(0.0, capacity);
        let seeding = scenario.cells_by_population();

        let vehicles = if seeding.is_empty() {
            Vec::new()
        } else {
            (0..config.fleet_size)
                .map(|i| Vehicle {
                    id:           VehicleId(i as u32),
                    cell:         seeding[i % seeding.len()],
                    battery_kwh:  initial,
                    capacity_kwh: capacity,
                })
                .collect()
        };

        debug!(
            scenario = scenario.name(),
            cells = scenario.cell_count(),
            fleet = vehicles.len(),
            "environment created"
        );

        let mut state = EnvState {
            tick:           Tick::ZERO,
            demand_by_cell: Vec::new(),
            energy_price:   scenario.base_energy_price(),
            vehicles,
        };
        refresh(&scenario, &mut state);

        Self { scenario, config, state }
    }

    pub fn scenario(&self) -> &Arc<Scenario> {
        &self.scenario
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn tick(&self) -> Tick {
        self.state.tick
    }

    /// Borrow the current state.  The borrow checker keeps callers from
    /// mutating it; use [`snapshot`](Self::snapshot) to keep a copy across
    /// `advance` calls.
    pub fn state(&self) -> &EnvState {
        &self.state
    }

    /// Independent copy of the current state.
    pub fn snapshot(&self) -> EnvState {
        self.state.clone()
    }

    /// Adjacent cells of `cell` in scenario order.
    pub fn neighbors(&self, cell: CellId) -> &[CellId] {
        self.scenario.neighbors(cell)
    }

    /// Apply `actions`, resolve demand for the current tick, then advance
    /// time by one tick.
    pub fn advance(&mut self, actions: &[Action]) -> StepOutcome {
        let price = self.state.energy_price;
        let before: Vec<f64> = self.state.vehicles.iter().map(|v| v.battery_kwh).collect();

        for action in actions {
            self.apply(action);
        }

        // ── Demand resolution ─────────────────────────────────────────────
        let cell_count = self.scenario.cell_count();
        let mut present: Vec<Vec<usize>> = vec![Vec::new(); cell_count];
        for (i, v) in self.state.vehicles.iter().enumerate() {
            if let Some(slot) = present.get_mut(v.cell.index()) {
                slot.push(i);
            }
        }

        let mut served_total = 0u64;
        let mut unmet_total = 0u64;
        let mut wait_proxy = 0.0;
        for (cell, here) in present.iter().enumerate() {
            let demand = self.state.demand_by_cell.get(cell).copied().unwrap_or(0);
            let mut served = 0u32;
            for &i in here {
                if served == demand {
                    break;
                }
                let v = &mut self.state.vehicles[i];
                if v.battery_kwh >= RIDE_COST_KWH {
                    v.battery_kwh = (v.battery_kwh - RIDE_COST_KWH).max(0.0);
                    served += 1;
                }
            }
            let unmet = demand - served;
            served_total += u64::from(served);
            unmet_total += u64::from(unmet);
            wait_proxy += unmet as f64 / (demand as f64 + 1.0);
        }

        // ── Energy cost and reward ────────────────────────────────────────
        let charged_kwh: f64 = self
            .state
            .vehicles
            .iter()
            .zip(&before)
            .map(|(v, &b)| (v.battery_kwh - b).max(0.0))
            .sum();
        let energy_cost = charged_kwh * price;

        let w = &self.config.weights;
        let raw = w.served * served_total as f64
            - w.unmet * unmet_total as f64
            - w.energy * energy_cost
            - w.wait * wait_proxy;
        let reward = round_dp((raw + REWARD_OFFSET).max(0.0), 4);

        let info = StepInfo {
            served:       served_total,
            unmet:        unmet_total,
            demand_total: served_total + unmet_total,
            energy_cost:  round_dp(energy_cost, 4),
            wait_proxy:   round_dp(wait_proxy, 4),
        };

        trace!(
            tick = self.state.tick.0,
            served = info.served,
            unmet = info.unmet,
            energy_cost = info.energy_cost,
            reward,
            "tick resolved"
        );

        // ── Advance time ──────────────────────────────────────────────────
        self.state.tick = self.state.tick.next();
        refresh(&self.scenario, &mut self.state);

        StepOutcome { state: self.snapshot(), reward, info }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn apply(&mut self, action: &Action) {
        let Some(vehicle) = self.state.vehicles.get_mut(action.vehicle.index()) else {
            return;
        };
        match action.kind {
            ActionKind::Move { target } => {
                if vehicle.battery_kwh >= MOVE_COST_KWH && self.scenario.is_neighbor(vehicle.cell, target) {
                    vehicle.cell = target;
                    vehicle.battery_kwh = (vehicle.battery_kwh - MOVE_COST_KWH).max(0.0);
                }
            }
            ActionKind::Charge { rate_kw } => {
                let requested = if rate_kw.is_finite() { rate_kw.max(0.0) } else { 0.0 };
                let local = self
                    .scenario
                    .cell(vehicle.cell)
                    .map_or(0.0, |c| c.charging_capacity_kw)
                    .max(0.0);
                let added = requested.min(local) / 60.0;
                vehicle.battery_kwh = (vehicle.battery_kwh + added).min(vehicle.capacity_kwh).max(0.0);
            }
            ActionKind::Idle => {}
        }
    }
}

/// Regenerate demand and price for `state.tick`.
fn refresh(scenario: &Scenario, state: &mut EnvState) {
    state.demand_by_cell = scenario.demand_at(state.tick);
    state.energy_price = energy_price(scenario.base_energy_price(), state.tick);
}

/// Day-curve tariff: `base · (0.8 + 0.4·sin(2π·phase))`, floored at
/// [`MIN_ENERGY_PRICE`].
pub fn energy_price(base: f64, tick: Tick) -> f64 {
    let price = base * (0.8 + 0.4 * (TAU * tick.day_phase()).sin());
    price.max(MIN_ENERGY_PRICE)
}
