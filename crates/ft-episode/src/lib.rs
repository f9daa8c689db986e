//! `ft-episode` — episode loop, metrics and evaluation seam.
//!
//! # Episode loop
//!
//! ```text
//! scenario = source.resolve(rng)
//! env      = GridEnv::new(scenario, fleet_size)
//! for i in 0..steps:
//!   ① Decide  — policy.decide(ctx(env), params, rng)
//!   ② Advance — env.advance(actions)
//!   ③ Tally   — served/unmet/energy/reward totals;
//!               timeline slot  = next tick mod 24;
//!               step log (opt) = true hour/minute of next tick.
//! metrics = rounded totals + 24-slot timeline + params (+ steps)
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`runner`]    | `EpisodeRunner`, `EpisodeRunnerBuilder`, `ScenarioSource`, `run_episode` |
//! | [`metrics`]   | `EpisodeMetrics`, `TimelinePoint`, `StepInsight`, `StepNote`    |
//! | [`observer`]  | `EpisodeObserver`, `NoopObserver`                               |
//! | [`perturb`]   | `perturb_params`                                                |
//! | [`evaluator`] | `EpisodeEvaluator`, `LocalEvaluator`, `FallbackEvaluator`       |
//! | [`batch`]     | `run_batch`                                                     |
//! | [`config`]    | `EpisodeConfig`                                                 |
//! | [`error`]     | `EpisodeError`, `EvaluationError`, `EpisodeResult<T>`           |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs `run_batch` episodes on Rayon's thread pool.      |

pub mod batch;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod metrics;
pub mod observer;
pub mod perturb;
pub mod runner;


pub use batch::run_batch;
pub use config::EpisodeConfig;
pub use error::{EpisodeError, EpisodeResult, EvaluationError};
pub use evaluator::{EpisodeEvaluator, EpisodeRequest, Evaluated, FallbackEvaluator, LocalEvaluator, MetricsSource};
pub use metrics::{
    ActionMix, EpisodeMetrics, HIGH_TARIFF, StepInsight, StepNote, TimelineAccumulator, TimelinePoint,
};
pub use observer::{EpisodeObserver, NoopObserver};
pub use perturb::perturb_params;
pub use runner::{EpisodeOptions, EpisodeRunner, EpisodeRunnerBuilder, ScenarioSource, run_episode};
