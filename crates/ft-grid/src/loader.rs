//! CSV grid loader.
//!
//! # CSV format
//!
//! One row per cell.  Cell ids are assigned in row order.
//!
//! ```csv
//! x,y,population,charging_kw
//! 0,0,210,11
//! 1,0,340,22
//! 0,1,180,11
//! ```
//!
//! Cells need not form a full rectangle; adjacency is derived from whichever
//! coordinates are present.  The demand model and base price are supplied by
//! the caller because they are not per-cell data.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{DemandModel, GridError, GridResult, Scenario, ScenarioBuilder};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CellRecord {
    x:           i32,
    y:           i32,
    population:  u32,
    charging_kw: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a scenario grid from a CSV file.
///
/// The scenario is named after the file stem.
pub fn load_cells_csv<D: DemandModel>(path: &Path, base_energy_price: f64, demand: D) -> GridResult<Scenario> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("grid")
        .to_string();
    let file = std::fs::File::open(path)?;
    load_cells_reader(name, file, base_energy_price, demand)
}

/// Load a scenario grid from any `Read` source (file, `&[u8]`, `Cursor`, …).
pub fn load_cells_reader<R: Read, D: DemandModel>(
    name:              impl Into<String>,
    reader:            R,
    base_energy_price: f64,
    demand:            D,
) -> GridResult<Scenario> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut builder = ScenarioBuilder::new(name);

    for (row, result) in rdr.deserialize::<CellRecord>().enumerate() {
        let rec = result?;
        if !rec.charging_kw.is_finite() || rec.charging_kw < 0.0 {
            return Err(GridError::Parse(format!(
                "row {}: charging_kw must be a non-negative number, got {}",
                row + 1,
                rec.charging_kw
            )));
        }
        builder.add_cell(rec.x, rec.y, rec.population, rec.charging_kw);
    }

    builder.build(base_energy_price, demand)
}
