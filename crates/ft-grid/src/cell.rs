//! Grid cell type.

use ft_core::CellId;

/// One square of the city grid.
///
/// Immutable after scenario construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityCell {
    pub id: CellId,
    pub x: i32,
    pub y: i32,
    /// Demand potential; demand models scale with it.
    pub population: u32,
    /// Local charger capacity in kW.
    pub charging_capacity_kw: f64,
}
