//! Episode observer trait for progress reporting and data collection.

use ft_env::{Action, EnvState, StepOutcome};
use ft_policy::RewardTracker;

use crate::EpisodeMetrics;

/// Callbacks invoked by [`EpisodeRunner::run_observed`][crate::EpisodeRunner::run_observed].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — reward printer
///
/// ```rust,ignore
/// struct RewardPrinter;
///
/// impl EpisodeObserver for RewardPrinter {
///     fn on_step(&mut self, index: usize, _: &[Action], outcome: &StepOutcome) {
///         println!("step {index}: reward {}", outcome.reward);
///     }
/// }
/// ```
pub trait EpisodeObserver {
    /// Called once after the environment is built, before the first step.
    fn on_episode_start(&mut self, _initial: &EnvState) {}

    /// Called after every `advance`.
    fn on_step(&mut self, _index: usize, _actions: &[Action], _outcome: &StepOutcome) {}

    /// Called once with the finished metrics.
    fn on_episode_end(&mut self, _metrics: &EpisodeMetrics) {}
}

/// An [`EpisodeObserver`] that does nothing.
pub struct NoopObserver;

impl EpisodeObserver for NoopObserver {}

/// Feeds every step's reward into the moving average.
impl EpisodeObserver for RewardTracker {
    fn on_step(&mut self, _index: usize, _actions: &[Action], outcome: &StepOutcome) {
        self.record(outcome.reward);
    }
}
