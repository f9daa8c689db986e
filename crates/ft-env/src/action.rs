//! Actions proposed by policies.

use ft_core::{CellId, VehicleId};

/// What a vehicle should do this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum ActionKind {
    /// Relocate to an adjacent cell.  Costs 0.5 kWh.
    Move { target: CellId },
    /// Draw from the local charger for one minute at up to `rate_kw`.
    Charge { rate_kw: f64 },
    Idle,
}

/// A proposal for one vehicle.  The environment decides whether it takes
/// effect.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub vehicle: VehicleId,
    pub kind:    ActionKind,
}

impl Action {
    #[inline]
    pub fn move_to(vehicle: VehicleId, target: CellId) -> Self {
        Self { vehicle, kind: ActionKind::Move { target } }
    }

    #[inline]
    pub fn charge(vehicle: VehicleId, rate_kw: f64) -> Self {
        Self { vehicle, kind: ActionKind::Charge { rate_kw } }
    }

    #[inline]
    pub fn idle(vehicle: VehicleId) -> Self {
        Self { vehicle, kind: ActionKind::Idle }
    }

    pub fn is_move(&self) -> bool {
        matches!(self.kind, ActionKind::Move { .. })
    }

    pub fn is_charge(&self) -> bool {
        matches!(self.kind, ActionKind::Charge { .. })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.kind, ActionKind::Idle)
    }
}
