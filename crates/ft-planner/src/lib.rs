//! `ft-planner` — turns corridor delay telemetry into a city-wide fleet plan.
//!
//! # Pipeline
//!
//! ```text
//! RawRoute ──normalize──▶ RouteDescriptor
//!                              │ severity_score ∈ [0,1]
//!                              ▼
//!                        SeverityTier (High > 0.6 > Medium > 0.35 > Support)
//!                              │ weight = km·(0.6+score) + min_share
//!                              ▼
//!                        allocate(): round, clip to tier bounds, reconcile
//!                              │
//!                              ▼
//!   OrchestrationPlan { hotspots, KPIs, 24-hour timeline, charging plan }
//! ```
//!
//! Planning is a pure function of its input; no state survives a call.
//!
//! # Crate layout
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`route`]      | `RouteDescriptor`, `RouteSegment`                     |
//! | [`telemetry`]  | `RawRoute`, `RawSegment`, `normalize_routes`          |
//! | [`severity`]   | `severity_score`, `SeverityTier`                      |
//! | [`allocation`] | `allocate`, `Allocation`, `CorridorDemand`            |
//! | [`plan`]       | `Planner`, `PlannerConfig`, `OrchestrationPlan`, `build_plan` |
//! | [`fixtures`]   | `sample_corridors` reference readings                 |
//! | [`error`]      | `PlannerError`, `PlannerResult<T>`                    |

pub mod allocation;
pub mod error;
pub mod fixtures;
pub mod plan;
pub mod route;
pub mod severity;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use allocation::{Allocation, CorridorDemand, allocate};
pub use error::{PlannerError, PlannerResult};
pub use fixtures::{sample_corridors, sample_raw_routes};
pub use plan::{
    ChargingInstruction, DemandSupplyPoint, HotspotAllocation, OrchestrationPlan, Planner, PlannerConfig,
    build_plan, charging_schedule, hour_multiplier,
};
pub use route::{RouteDescriptor, RouteSegment};
pub use severity::{SeverityTier, severity_score};
pub use telemetry::{RawId, RawRoute, RawSegment, normalize_routes};
