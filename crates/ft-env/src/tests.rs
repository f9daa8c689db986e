//! Unit tests for ft-env.

use std::sync::Arc;

use ft_core::{CellId, SimRng, Tick, VehicleId};
use ft_grid::{CityPreset, FlatDemand, Scenario, ScenarioBuilder};

use crate::{Action, EnvConfig, GridEnv, MIN_ENERGY_PRICE, energy_price};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 3×2 grid, population rising by id, 11 kW everywhere:
///
/// ```text
///   0 1 2
///   3 4 5
/// ```
fn grid(demand: f64) -> Arc<Scenario> {
    Arc::new(
        ScenarioBuilder::grid("3x2", 3, 2, |x, y| 100.0 + (x + 3 * y) as f64 * 10.0, |_, _| 11.0)
            .build(0.25, FlatDemand(demand))
            .unwrap(),
    )
}

/// One 22 kW cell at (0,0) and one 11 kW cell at (1,0).
fn pair(demand: f64) -> Arc<Scenario> {
    let mut b = ScenarioBuilder::new("pair");
    b.add_cell(0, 0, 300, 22.0);
    b.add_cell(1, 0, 100, 11.0);
    Arc::new(b.build(0.25, FlatDemand(demand)).unwrap())
}

fn env(scenario: Arc<Scenario>, fleet: usize, battery: f64) -> GridEnv {
    let config = EnvConfig { initial_battery_kwh: battery, ..EnvConfig::with_fleet_size(fleet) };
    GridEnv::new(scenario, config)
}

fn battery(env: &GridEnv, id: u32) -> f64 {
    env.state().vehicles[id as usize].battery_kwh
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn round_robin_by_population() {
        let e = env(grid(0.0), 8, 40.0);
        let cells: Vec<CellId> = e.state().vehicles.iter().map(|v| v.cell).collect();
        assert_eq!(
            cells,
            vec![CellId(5), CellId(4), CellId(3), CellId(2), CellId(1), CellId(0), CellId(5), CellId(4)]
        );
        for (i, v) in e.state().vehicles.iter().enumerate() {
            assert_eq!(v.id, VehicleId(i as u32));
            assert_eq!(v.battery_kwh, 40.0);
            assert_eq!(v.capacity_kwh, 60.0);
        }
    }

    #[test]
    fn tick_zero_demand_and_price() {
        let e = env(grid(2.0), 3, 40.0);
        assert_eq!(e.tick(), Tick(0));
        assert_eq!(e.state().demand_by_cell, vec![2; 6]);
        assert!((e.state().energy_price - 0.25 * 0.8).abs() < 1e-12);
    }

    #[test]
    fn initial_battery_clamped_to_capacity() {
        let e = env(grid(0.0), 1, 75.0);
        assert_eq!(battery(&e, 0), 60.0);
    }

    #[test]
    fn empty_fleet() {
        let mut e = env(grid(1.0), 0, 40.0);
        assert!(e.state().vehicles.is_empty());
        let out = e.advance(&[]);
        assert_eq!(out.info.served, 0);
        assert_eq!(out.info.unmet, 6);
    }

    #[test]
    fn snapshot_is_independent() {
        let e = env(grid(0.0), 2, 40.0);
        let mut snap = e.snapshot();
        snap.vehicles[0].battery_kwh = 0.0;
        snap.demand_by_cell[0] = 99;
        assert_eq!(battery(&e, 0), 40.0);
        assert_eq!(e.state().demand_by_cell[0], 0);
    }
}

// ── Actions ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod actions {
    use super::*;

    #[test]
    fn dead_charger_adds_nothing() {
        let mut b = ScenarioBuilder::new("dead-charger");
        b.add_cell(0, 0, 100, 0.0);
        let mut e = env(Arc::new(b.build(0.25, FlatDemand(0.0)).unwrap()), 1, 5.0);
        for _ in 0..2 {
            e.advance(&[Action::charge(VehicleId(0), 11.0)]);
        }
        assert_eq!(battery(&e, 0), 5.0);
    }

    #[test]
    fn legal_move_relocates_and_costs() {
        let mut e = env(pair(0.0), 1, 40.0);
        assert_eq!(e.state().vehicles[0].cell, CellId(0));
        let out = e.advance(&[Action::move_to(VehicleId(0), CellId(1))]);
        assert_eq!(out.state.vehicles[0].cell, CellId(1));
        assert_eq!(out.state.vehicles[0].battery_kwh, 39.5);
    }

    #[test]
    fn non_adjacent_move_is_dropped() {
        let mut e = env(grid(0.0), 1, 40.0);
        // Vehicle 0 sits in cell 5; cell 0 is two steps away.
        let out = e.advance(&[Action::move_to(VehicleId(0), CellId(0))]);
        assert_eq!(out.state.vehicles[0].cell, CellId(5));
        assert_eq!(out.state.vehicles[0].battery_kwh, 40.0);
    }

    #[test]
    fn move_to_own_cell_is_dropped() {
        let mut e = env(pair(0.0), 1, 40.0);
        let out = e.advance(&[Action::move_to(VehicleId(0), CellId(0))]);
        assert_eq!(out.state.vehicles[0].battery_kwh, 40.0);
    }

    #[test]
    fn move_needs_half_kwh() {
        let mut e = env(pair(0.0), 1, 0.4);
        let out = e.advance(&[Action::move_to(VehicleId(0), CellId(1))]);
        assert_eq!(out.state.vehicles[0].cell, CellId(0));
        assert_eq!(out.state.vehicles[0].battery_kwh, 0.4);
    }

    #[test]
    fn charge_limited_by_cell_capacity() {
        let mut e = env(pair(0.0), 2, 10.0);
        // Vehicle 0 at the 22 kW cell, vehicle 1 at the 11 kW cell.
        let out = e.advance(&[Action::charge(VehicleId(0), 50.0), Action::charge(VehicleId(1), 50.0)]);
        assert!((out.state.vehicles[0].battery_kwh - (10.0 + 22.0 / 60.0)).abs() < 1e-12);
        assert!((out.state.vehicles[1].battery_kwh - (10.0 + 11.0 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn charge_capped_at_capacity() {
        let mut e = env(pair(0.0), 1, 59.9);
        let out = e.advance(&[Action::charge(VehicleId(0), 22.0)]);
        assert_eq!(out.state.vehicles[0].battery_kwh, 60.0);
    }

    #[test]
    fn bad_charge_rates_add_nothing() {
        let mut e = env(pair(0.0), 1, 30.0);
        let out = e.advance(&[
            Action::charge(VehicleId(0), -11.0),
            Action::charge(VehicleId(0), f64::NAN),
            Action::charge(VehicleId(0), f64::INFINITY),
        ]);
        assert_eq!(out.state.vehicles[0].battery_kwh, 30.0);
        assert_eq!(out.info.energy_cost, 0.0);
    }

    #[test]
    fn unknown_vehicle_is_ignored() {
        let mut e = env(pair(0.0), 1, 40.0);
        let out = e.advance(&[Action::move_to(VehicleId(7), CellId(1)), Action::idle(VehicleId::INVALID)]);
        assert_eq!(out.state.vehicles.len(), 1);
        assert_eq!(out.state.vehicles[0].cell, CellId(0));
    }

    #[test]
    fn duplicate_actions_apply_in_order() {
        let mut e = env(pair(0.0), 1, 40.0);
        let out = e.advance(&[
            Action::move_to(VehicleId(0), CellId(1)),
            Action::move_to(VehicleId(0), CellId(0)),
        ]);
        assert_eq!(out.state.vehicles[0].cell, CellId(0));
        assert_eq!(out.state.vehicles[0].battery_kwh, 39.0);
    }
}

// ── Demand resolution & reward ────────────────────────────────────────────────

#[cfg(test)]
mod resolution {
    use super::*;

    #[test]
    fn all_served_reward() {
        // One vehicle and one request per cell.
        let mut e = env(grid(1.0), 6, 40.0);
        let out = e.advance(&[]);
        assert_eq!(out.info.served, 6);
        assert_eq!(out.info.unmet, 0);
        assert_eq!(out.info.wait_proxy, 0.0);
        assert_eq!(out.reward, 6.0 + 8.0);
        assert!(out.state.vehicles.iter().all(|v| v.battery_kwh == 39.0));
    }

    #[test]
    fn partial_service_and_wait_proxy() {
        // Two requests per cell, one vehicle in cell 5 only.
        let mut e = env(grid(2.0), 1, 40.0);
        let out = e.advance(&[]);
        assert_eq!(out.info.served, 1);
        assert_eq!(out.info.unmet, 11);
        assert_eq!(out.info.demand_total, 12);
        // Cell 5: 1/3; five other cells: 2/3 each.
        let expected = 1.0 / 3.0 + 5.0 * 2.0 / 3.0;
        assert!((out.info.wait_proxy - ft_core::round_dp(expected, 4)).abs() < 1e-12);
    }

    #[test]
    fn first_listed_vehicle_serves_first() {
        let mut e = env(pair(1.0), 3, 40.0);
        // Vehicles 0 and 2 share cell 0; vehicle 1 is in cell 1.
        let out = e.advance(&[]);
        assert_eq!(out.state.vehicles[0].battery_kwh, 39.0);
        assert_eq!(out.state.vehicles[2].battery_kwh, 40.0);
        assert_eq!(out.state.vehicles[1].battery_kwh, 39.0);
    }

    #[test]
    fn flat_battery_cannot_serve() {
        let mut e = env(pair(1.0), 1, 0.9);
        let out = e.advance(&[]);
        assert_eq!(out.info.served, 0);
        assert_eq!(out.info.unmet, 2);
    }

    #[test]
    fn reward_floored_at_zero() {
        let mut e = env(grid(50.0), 1, 40.0);
        let out = e.advance(&[]);
        assert_eq!(out.reward, 0.0);
    }

    #[test]
    fn charging_cost_uses_current_price() {
        let mut e = env(pair(0.0), 1, 20.0);
        let price = e.state().energy_price;
        let out = e.advance(&[Action::charge(VehicleId(0), 22.0)]);
        let expected = ft_core::round_dp(22.0 / 60.0 * price, 4);
        assert_eq!(out.info.energy_cost, expected);
    }

    #[test]
    fn charge_and_ride_net_to_zero_cost() {
        let mut e = env(pair(1.0), 1, 20.0);
        let out = e.advance(&[Action::charge(VehicleId(0), 22.0)]);
        assert_eq!(out.info.served, 1);
        assert_eq!(out.info.energy_cost, 0.0);
    }

    #[test]
    fn saturated_cells_sum_without_overflow() {
        // Each cell alone stays below u32::MAX; the two together do not.
        let mut e = env(pair(4.0e9), 2, 40.0);
        let out = e.advance(&[]);
        assert_eq!(out.info.demand_total, 8_000_000_000);
        assert_eq!(out.info.served, 2);
        assert_eq!(out.info.unmet, 8_000_000_000 - 2);
        assert_eq!(out.reward, 0.0);
    }

    #[test]
    fn conservation_over_preset_run() {
        let scenario = Arc::new(CityPreset::Brussels.build(&mut SimRng::new(9)));
        let mut e = GridEnv::new(scenario, EnvConfig::with_fleet_size(40));
        for _ in 0..120 {
            let demand = e.state().total_demand();
            let out = e.advance(&[]);
            assert_eq!(out.info.served + out.info.unmet, demand);
            assert!(out.reward >= 0.0);
            for v in &out.state.vehicles {
                assert!((0.0..=v.capacity_kwh).contains(&v.battery_kwh));
            }
        }
        assert_eq!(e.tick(), Tick(120));
    }
}

// ── Time & price ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod time {
    use super::*;

    #[test]
    fn advance_moves_clock() {
        let mut e = env(grid(0.0), 1, 40.0);
        let out = e.advance(&[]);
        assert_eq!(out.state.tick, Tick(1));
        assert_eq!(e.tick(), Tick(1));
    }

    #[test]
    fn price_follows_day_curve() {
        // Quarter day: sin = 1 → base · 1.2.
        assert!((energy_price(0.25, Tick(360)) - 0.30).abs() < 1e-12);
        // Three-quarter day: sin = −1 → base · 0.4.
        assert!((energy_price(0.25, Tick(1_080)) - 0.10).abs() < 1e-12);
        // Periodic in days.
        assert!((energy_price(0.25, Tick(360 + 1_440)) - 0.30).abs() < 1e-12);
    }

    #[test]
    fn price_floor() {
        for t in (0..1_440).step_by(30) {
            assert!(energy_price(0.01, Tick(t)) >= MIN_ENERGY_PRICE);
        }
        assert_eq!(energy_price(0.01, Tick(1_080)), MIN_ENERGY_PRICE);
    }
}
