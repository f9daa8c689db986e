//! `ft-grid` — the discretised city a fleet operates on.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`cell`]     | `CityCell`                                                  |
//! | [`scenario`] | `Scenario`, `ScenarioBuilder`, `DemandModel`, `FlatDemand`  |
//! | [`presets`]  | `CityPreset` (Ingolstadt, Oslo, Brussels)                   |
//! | [`loader`]   | `load_cells_csv`, `load_cells_reader`                       |
//! | [`error`]    | `GridError`, `GridResult<T>`                                |
//!
//! A `Scenario` is built once and read-only afterwards.  Cells are numbered
//! densely from 0 in insertion order, so `CellId::index()` addresses the
//! cell and adjacency arrays directly.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `CityCell`/`CityPreset`. |

pub mod cell;
pub mod error;
pub mod loader;
pub mod presets;
pub mod scenario;


pub use cell::CityCell;
pub use error::{GridError, GridResult};
pub use loader::{load_cells_csv, load_cells_reader};
pub use presets::CityPreset;
pub use scenario::{DemandModel, FlatDemand, Scenario, ScenarioBuilder};
