//! `ft-env` — the grid city environment.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`vehicle`] | `Vehicle` — position and battery of one fleet member          |
//! | [`action`]  | `Action`, `ActionKind` (`Move`, `Charge`, `Idle`)             |
//! | [`state`]   | `EnvState`, `StepInfo`, `StepOutcome`                         |
//! | [`config`]  | `EnvConfig`, `RewardWeights`                                  |
//! | [`env`]     | `GridEnv` — the only mutable entity in a simulation           |
//!
//! # Tick model
//!
//! ```text
//! advance(actions):
//!   ① Actions  — moves and charges applied in the order given;
//!                illegal ones are dropped without side effects.
//!   ② Demand   — per cell, present vehicles with ≥ 1 kWh serve rides
//!                in fleet order; each ride costs 1 kWh.
//!   ③ Cost     — net positive battery change × this tick's price.
//!   ④ Reward   — weighted sum + offset, floored at zero.
//!   ⑤ Time     — tick += 1; demand and price regenerated.
//! ```
//!
//! `advance` never fails.  Unknown vehicles, non-adjacent targets, flat
//! batteries and over-capacity charge requests are clamped or ignored.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|-------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.    |

pub mod action;
pub mod config;
pub mod env;
pub mod state;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use action::{Action, ActionKind};
pub use config::{EnvConfig, REWARD_OFFSET, RewardWeights};
pub use env::{GridEnv, MIN_ENERGY_PRICE, MOVE_COST_KWH, RIDE_COST_KWH, energy_price};
pub use state::{EnvState, StepInfo, StepOutcome};
pub use vehicle::Vehicle;
