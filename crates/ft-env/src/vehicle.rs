//! Fleet vehicle state.

use ft_core::{CellId, VehicleId};

/// One autonomous vehicle.
///
/// Owned by [`GridEnv`][crate::GridEnv]; policies see copies inside an
/// [`EnvState`][crate::EnvState] and propose [`Action`][crate::Action]s.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id: VehicleId,
    /// Cell the vehicle is currently in.
    pub cell: CellId,
    /// Always within `[0, capacity_kwh]`.
    pub battery_kwh: f64,
    pub capacity_kwh: f64,
}

impl Vehicle {
    /// State-of-charge ratio in `[0, 1]`; zero for a zero-capacity vehicle.
    #[inline]
    pub fn battery_ratio(&self) -> f64 {
        if self.capacity_kwh > 0.0 { self.battery_kwh / self.capacity_kwh } else { 0.0 }
    }
}
