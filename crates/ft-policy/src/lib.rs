//! `ft-policy` — fleet policies and their tunable parameters.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`params`]    | `PolicyParams`, `PARAM_BOUNDS`                                |
//! | [`context`]   | `PolicyContext<'a>` — read-only view of one tick              |
//! | [`policy`]    | `FleetPolicy` trait                                           |
//! | [`heuristic`] | `TunedHeuristic` — parameter-driven scoring policy            |
//! | [`baseline`]  | `BaselinePolicy` (untuned), `IdlePolicy` (no-op)              |
//! | [`tracker`]   | `RewardTracker` — reward moving average                       |
//!
//! # Design notes
//!
//! A policy is a pure function of `(context, params, rng)`.  It never
//! touches the environment; it only returns one [`Action`][ft_env::Action]
//! per vehicle for the environment to accept or drop.  All randomness comes
//! from the caller's [`SimRng`][ft_core::SimRng], so decisions replay
//! exactly from a seed.
//!
//! Nothing here learns.  `PolicyParams` change only between episodes, by an
//! outer search loop.

pub mod baseline;
pub mod context;
pub mod heuristic;
pub mod params;
pub mod policy;
pub mod tracker;


pub use baseline::{BaselinePolicy, IdlePolicy};
pub use context::PolicyContext;
pub use heuristic::TunedHeuristic;
pub use params::{PARAM_BOUNDS, ParamBounds, PolicyParams};
pub use policy::FleetPolicy;
pub use tracker::RewardTracker;
