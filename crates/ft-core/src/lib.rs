//! `ft-core` — foundational types for the `fleet_twin` fleet simulator.
//!
//! This crate is a dependency of every other `ft-*` crate.  It intentionally
//! has no `ft-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`ids`]     | `CellId`, `VehicleId`                                    |
//! | [`time`]    | `Tick` (one simulated minute) and day-phase helpers      |
//! | [`rng`]     | `SimRng` (caller-owned), `hashed_unit`                   |
//! | [`num`]     | `round_dp`, `clamp` helpers for published figures       |
//! | [`error`]   | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod num;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{CellId, VehicleId};
pub use num::{clamp, round_dp};
pub use rng::{SimRng, hashed_unit};
pub use time::{MINUTES_PER_DAY, TIMELINE_SLOTS, Tick};
