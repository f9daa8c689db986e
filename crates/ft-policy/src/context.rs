//! Read-only tick view passed to every policy.

use ft_core::CellId;
use ft_env::{EnvState, GridEnv};
use ft_grid::Scenario;

/// Off-peak window starts at this hour...
pub const OFF_PEAK_START_HOUR: u32 = 22;
/// ...and ends before this one.
pub const OFF_PEAK_END_HOUR: u32 = 6;

/// Everything a [`FleetPolicy`][crate::FleetPolicy] may look at for one
/// decision.
///
/// Both borrows live for one `decide` call; the environment cannot advance
/// while a context is alive.
#[derive(Copy, Clone)]
pub struct PolicyContext<'a> {
    pub state:    &'a EnvState,
    pub scenario: &'a Scenario,
}

impl<'a> PolicyContext<'a> {
    #[inline]
    pub fn new(state: &'a EnvState, scenario: &'a Scenario) -> Self {
        Self { state, scenario }
    }

    /// Borrow the current state and scenario of `env`.
    #[inline]
    pub fn from_env(env: &'a GridEnv) -> Self {
        Self { state: env.state(), scenario: env.scenario() }
    }

    #[inline]
    pub fn neighbors(&self, cell: CellId) -> &'a [CellId] {
        self.scenario.neighbors(cell)
    }

    /// Simulated hour of day, `0..24`.
    #[inline]
    pub fn hour(&self) -> u32 {
        self.state.tick.hour_of_day()
    }

    /// Before 06:00 or at/after 22:00.
    #[inline]
    pub fn is_off_peak(&self) -> bool {
        let h = self.hour();
        h < OFF_PEAK_END_HOUR || h >= OFF_PEAK_START_HOUR
    }
}
