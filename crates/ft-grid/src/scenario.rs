//! Scenario representation and builder.
//!
//! # Data layout
//!
//! Cells live in a `Vec<CityCell>` indexed by `CellId`.  Adjacency is a
//! parallel `Vec<Vec<CellId>>`: `neighbors[c]` holds the 4-connected
//! neighbours of cell `c` in the fixed order west, east, north, south, with
//! missing entries at the grid edge.  Both arrays are frozen by
//! [`ScenarioBuilder::build`]; a `Scenario` exposes no mutation API.

use std::collections::{HashMap, HashSet};
use std::fmt;

use ft_core::{CellId, Tick};

use crate::{CityCell, GridError, GridResult};

// ── DemandModel ───────────────────────────────────────────────────────────────

/// Expected ride requests for a cell at a tick.
///
/// Implementations must be pure functions of `(tick, cell)`: the environment
/// may call them from any thread and expects identical answers for identical
/// inputs.  Stochastic models derive their noise from
/// [`ft_core::hashed_unit`] with a seed fixed at construction.
pub trait DemandModel: Send + Sync + 'static {
    fn expected_demand(&self, tick: Tick, cell: &CityCell) -> f64;
}

impl<F> DemandModel for F
where
    F: Fn(Tick, &CityCell) -> f64 + Send + Sync + 'static,
{
    #[inline]
    fn expected_demand(&self, tick: Tick, cell: &CityCell) -> f64 {
        self(tick, cell)
    }
}

/// The same demand for every cell at every tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlatDemand(pub f64);

impl DemandModel for FlatDemand {
    #[inline]
    fn expected_demand(&self, _tick: Tick, _cell: &CityCell) -> f64 {
        self.0
    }
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// A named city grid with adjacency, a base energy price and a demand model.
///
/// Do not construct directly; use [`ScenarioBuilder`] or a
/// [`CityPreset`][crate::CityPreset].
pub struct Scenario {
    name:              String,
    cells:             Vec<CityCell>,
    neighbors:         Vec<Vec<CellId>>,
    base_energy_price: f64,
    demand:            Box<dyn DemandModel>,
}

impl Scenario {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base energy price in €/kWh; the environment's day curve is anchored to it.
    pub fn base_energy_price(&self) -> f64 {
        self.base_energy_price
    }

    pub fn cells(&self) -> &[CityCell] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Look up a cell; `None` if `id` does not belong to this scenario.
    #[inline]
    pub fn cell(&self, id: CellId) -> Option<&CityCell> {
        self.cells.get(id.index())
    }

    #[inline]
    pub fn contains(&self, id: CellId) -> bool {
        id.index() < self.cells.len()
    }

    /// Neighbours of `id` (west, east, north, south; edges omitted).
    ///
    /// Unknown cells have no neighbours.
    #[inline]
    pub fn neighbors(&self, id: CellId) -> &[CellId] {
        self.neighbors.get(id.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline]
    pub fn is_neighbor(&self, from: CellId, to: CellId) -> bool {
        self.neighbors(from).contains(&to)
    }

    /// Find the cell at grid coordinate `(x, y)`.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<&CityCell> {
        self.cells.iter().find(|c| c.x == x && c.y == y)
    }

    /// Cell ids ordered by descending population; ties keep id order.
    pub fn cells_by_population(&self) -> Vec<CellId> {
        let mut ids: Vec<CellId> = self.cells.iter().map(|c| c.id).collect();
        ids.sort_by(|a, b| self.cells[b.index()].population.cmp(&self.cells[a.index()].population));
        ids
    }

    /// Raw model output for `cell` at `tick`.
    #[inline]
    pub fn expected_demand(&self, tick: Tick, cell: &CityCell) -> f64 {
        self.demand.expected_demand(tick, cell)
    }

    /// Integer ride requests for every cell at `tick`, indexed by `CellId`.
    ///
    /// Each entry is the model output rounded to the nearest integer and
    /// floored at zero; non-finite outputs count as zero.
    pub fn demand_at(&self, tick: Tick) -> Vec<u32> {
        self.cells
            .iter()
            .map(|cell| {
                let raw = self.demand.expected_demand(tick, cell);
                if raw.is_finite() { raw.round().max(0.0) as u32 } else { 0 }
            })
            .collect()
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("cells", &self.cells.len())
            .field("base_energy_price", &self.base_energy_price)
            .finish_non_exhaustive()
    }
}

// ── ScenarioBuilder ───────────────────────────────────────────────────────────

/// Construct a [`Scenario`] incrementally, then call [`build`](Self::build).
///
/// Cells may be added in any order; `build()` derives the 4-connected
/// adjacency from their coordinates.
///
/// # Example
///
/// ```
/// use ft_grid::{FlatDemand, ScenarioBuilder};
///
/// let mut b = ScenarioBuilder::new("two-cells");
/// b.add_cell(0, 0, 200, 11.0);
/// b.add_cell(1, 0, 150, 22.0);
/// let scenario = b.build(0.25, FlatDemand(1.0)).unwrap();
/// assert_eq!(scenario.cell_count(), 2);
/// assert_eq!(scenario.neighbors(ft_core::CellId(0)).len(), 1);
/// ```
pub struct ScenarioBuilder {
    name:  String,
    cells: Vec<CityCell>,
}

impl ScenarioBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), cells: Vec::new() }
    }

    /// Fill a `width × height` rectangle row by row.
    ///
    /// Population is rounded and floored at 50; charging capacity is rounded
    /// and floored at 5 kW.
    pub fn grid<P, C>(name: impl Into<String>, width: u32, height: u32, mut population: P, mut charging_kw: C) -> Self
    where
        P: FnMut(i32, i32) -> f64,
        C: FnMut(i32, i32) -> f64,
    {
        let mut b = Self::new(name);
        b.cells.reserve((width * height) as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let pop = population(x, y).round().max(50.0) as u32;
                let kw = charging_kw(x, y).round().max(5.0);
                b.add_cell(x, y, pop, kw);
            }
        }
        b
    }

    /// Add a cell and return its `CellId` (sequential from 0).
    pub fn add_cell(&mut self, x: i32, y: i32, population: u32, charging_capacity_kw: f64) -> CellId {
        let id = CellId(self.cells.len() as u32);
        self.cells.push(CityCell { id, x, y, population, charging_capacity_kw });
        id
    }

    /// Consume the builder and produce a [`Scenario`].
    ///
    /// Fails on an empty grid, on two cells sharing a coordinate or on a
    /// negative or non-finite charging capacity.
    pub fn build<D: DemandModel>(self, base_energy_price: f64, demand: D) -> GridResult<Scenario> {
        if self.cells.is_empty() {
            return Err(GridError::Empty(self.name));
        }

        let mut seen: HashSet<(i32, i32)> = HashSet::with_capacity(self.cells.len());
        for cell in &self.cells {
            if !seen.insert((cell.x, cell.y)) {
                return Err(GridError::DuplicateCell { x: cell.x, y: cell.y });
            }
            if !(cell.charging_capacity_kw.is_finite() && cell.charging_capacity_kw >= 0.0) {
                return Err(GridError::InvalidCharging { x: cell.x, y: cell.y, kw: cell.charging_capacity_kw });
            }
        }

        Ok(self.finish(base_energy_price, demand))
    }

    /// Build without validation; callers guarantee a non-empty grid with
    /// unique coordinates.
    pub(crate) fn finish<D: DemandModel>(self, base_energy_price: f64, demand: D) -> Scenario {
        let by_coord: HashMap<(i32, i32), CellId> =
            self.cells.iter().map(|c| ((c.x, c.y), c.id)).collect();

        let neighbors = self
            .cells
            .iter()
            .map(|c| {
                [(c.x - 1, c.y), (c.x + 1, c.y), (c.x, c.y - 1), (c.x, c.y + 1)]
                    .iter()
                    .filter_map(|coord| by_coord.get(coord).copied())
                    .collect()
            })
            .collect();

        Scenario {
            name: self.name,
            cells: self.cells,
            neighbors,
            base_energy_price,
            demand: Box::new(demand),
        }
    }
}
