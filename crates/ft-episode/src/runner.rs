//! The episode loop and its builder.

use std::fmt;
use std::sync::Arc;

use ft_core::{SimRng, round_dp};
use ft_env::{EnvConfig, GridEnv};
use ft_grid::{CityPreset, Scenario};
use ft_policy::{FleetPolicy, PolicyContext, PolicyParams, TunedHeuristic};
use tracing::debug;

use crate::{
    EpisodeConfig, EpisodeMetrics, EpisodeObserver, EpisodeResult, NoopObserver, StepInsight,
    TimelineAccumulator,
};

// ── ScenarioSource ────────────────────────────────────────────────────────────

/// Where an episode's grid comes from.
#[derive(Clone)]
pub enum ScenarioSource {
    /// One pre-built grid reused by every episode.
    Shared(Arc<Scenario>),
    /// Build a fresh grid per episode from the episode's RNG.
    Factory(fn(&mut SimRng) -> Scenario),
    /// Build a fresh preset city per episode from the episode's RNG.
    Preset(CityPreset),
}

impl Default for ScenarioSource {
    fn default() -> Self {
        ScenarioSource::Preset(CityPreset::Ingolstadt)
    }
}

impl ScenarioSource {
    /// Produce the grid for one episode.  `Shared` draws nothing from `rng`.
    pub fn resolve(&self, rng: &mut SimRng) -> Arc<Scenario> {
        match self {
            ScenarioSource::Shared(s)  => Arc::clone(s),
            ScenarioSource::Factory(f) => Arc::new(f(rng)),
            ScenarioSource::Preset(p)  => Arc::new(p.build(rng)),
        }
    }
}

impl fmt::Debug for ScenarioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioSource::Shared(s)  => f.debug_tuple("Shared").field(&s.name()).finish(),
            ScenarioSource::Factory(_) => f.write_str("Factory(..)"),
            ScenarioSource::Preset(p)  => f.debug_tuple("Preset").field(p).finish(),
        }
    }
}

impl From<Arc<Scenario>> for ScenarioSource {
    fn from(s: Arc<Scenario>) -> Self {
        ScenarioSource::Shared(s)
    }
}

impl From<Scenario> for ScenarioSource {
    fn from(s: Scenario) -> Self {
        ScenarioSource::Shared(Arc::new(s))
    }
}

impl From<CityPreset> for ScenarioSource {
    fn from(p: CityPreset) -> Self {
        ScenarioSource::Preset(p)
    }
}

// ── EpisodeRunner ─────────────────────────────────────────────────────────────

/// Drives one environment and one policy for `config.steps` ticks and
/// aggregates the result.
///
/// A runner holds no per-episode state, so one runner may serve many
/// episodes, including concurrent ones.  Each call to [`run`](Self::run)
/// builds its own [`GridEnv`].
///
/// Create via [`EpisodeRunnerBuilder`].
#[derive(Clone)]
pub struct EpisodeRunner {
    source: ScenarioSource,
    config: EpisodeConfig,
    env:    EnvConfig,
    policy: Arc<dyn FleetPolicy>,
}

impl fmt::Debug for EpisodeRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EpisodeRunner")
            .field("source", &self.source)
            .field("config", &self.config)
            .field("policy", &self.policy.name())
            .finish_non_exhaustive()
    }
}

impl EpisodeRunner {
    pub fn builder() -> EpisodeRunnerBuilder {
        EpisodeRunnerBuilder::new()
    }

    pub fn config(&self) -> &EpisodeConfig {
        &self.config
    }

    pub fn source(&self) -> &ScenarioSource {
        &self.source
    }

    /// Same scenario source, environment and policy with a different
    /// episode configuration.
    pub fn with_config(&self, config: EpisodeConfig) -> EpisodeResult<EpisodeRunner> {
        config.validate()?;
        Ok(EpisodeRunner { config, ..self.clone() })
    }

    /// Same runner on a fixed grid.
    pub fn with_source(&self, source: ScenarioSource) -> EpisodeRunner {
        EpisodeRunner { source, ..self.clone() }
    }

    /// Run one episode.
    pub fn run(&self, params: &PolicyParams, rng: &mut SimRng) -> EpisodeMetrics {
        self.run_observed(params, rng, &mut NoopObserver)
    }

    /// Run one episode, reporting to `observer`.
    ///
    /// The policy and the scenario source draw from `rng` in a fixed
    /// order, so the same seed reproduces the same metrics.
    pub fn run_observed<O: EpisodeObserver + ?Sized>(
        &self,
        params:   &PolicyParams,
        rng:      &mut SimRng,
        observer: &mut O,
    ) -> EpisodeMetrics {
        let scenario = self.source.resolve(rng);
        let env_config = EnvConfig { fleet_size: self.config.fleet_size, ..self.env.clone() };
        let mut env = GridEnv::new(scenario, env_config);
        observer.on_episode_start(env.state());

        let steps = self.config.steps;
        let mut served = 0u64;
        let mut unmet = 0u64;
        let mut energy_cost = 0.0;
        let mut reward_total = 0.0;
        let mut timeline = TimelineAccumulator::new();
        let mut log = self.config.capture_steps.then(|| Vec::with_capacity(steps));

        for index in 0..steps {
            let actions = {
                let ctx = PolicyContext::from_env(&env);
                self.policy.decide(&ctx, params, rng)
            };
            let outcome = env.advance(&actions);
            let info = &outcome.info;

            served = served.saturating_add(info.served);
            unmet = unmet.saturating_add(info.unmet);
            energy_cost += info.energy_cost;
            reward_total += outcome.reward;
            timeline.record(outcome.state.tick, info.demand_total, info.served);

            if let Some(log) = log.as_mut() {
                log.push(StepInsight::from_step(index, &actions, &outcome));
            }
            observer.on_step(index, &actions, &outcome);
        }

        let metrics = EpisodeMetrics {
            served,
            unmet,
            energy_cost:  round_dp(energy_cost, 2),
            reward_total: round_dp(reward_total, 2),
            reward_avg:   round_dp(reward_total / steps.max(1) as f64, 2),
            timeline:     timeline.finish(),
            params:       *params,
            steps:        log,
        };

        debug!(
            scenario = env.scenario().name(),
            policy = self.policy.name(),
            steps,
            served = metrics.served,
            unmet = metrics.unmet,
            reward_avg = metrics.reward_avg,
            "episode finished"
        );

        observer.on_episode_end(&metrics);
        metrics
    }
}

// ── EpisodeRunnerBuilder ──────────────────────────────────────────────────────

/// Fluent builder for [`EpisodeRunner`].
///
/// # Optional inputs (all have defaults)
///
/// | Method          | Default                              |
/// |-----------------|--------------------------------------|
/// | `.scenario(s)`  | `ScenarioSource::Preset(Ingolstadt)` |
/// | `.config(c)`    | `EpisodeConfig::default()`           |
/// | `.env(e)`       | `EnvConfig::default()`               |
/// | `.policy(p)`    | `TunedHeuristic`                     |
///
/// `config.fleet_size` always overrides `env.fleet_size`.
///
/// # Example
///
/// ```rust,ignore
/// let runner = EpisodeRunnerBuilder::new()
///     .scenario(CityPreset::Oslo)
///     .config(EpisodeConfig { steps: 60, ..Default::default() })
///     .build()?;
/// let metrics = runner.run(&PolicyParams::default(), &mut SimRng::new(7));
/// ```
pub struct EpisodeRunnerBuilder {
    source: ScenarioSource,
    config: EpisodeConfig,
    env:    EnvConfig,
    policy: Arc<dyn FleetPolicy>,
}

impl Default for EpisodeRunnerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeRunnerBuilder {
    pub fn new() -> Self {
        Self {
            source: ScenarioSource::default(),
            config: EpisodeConfig::default(),
            env:    EnvConfig::default(),
            policy: Arc::new(TunedHeuristic),
        }
    }

    pub fn scenario(mut self, source: impl Into<ScenarioSource>) -> Self {
        self.source = source.into();
        self
    }

    pub fn config(mut self, config: EpisodeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override battery and reward settings.
    pub fn env(mut self, env: EnvConfig) -> Self {
        self.env = env;
        self
    }

    pub fn policy<P: FleetPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn shared_policy(mut self, policy: Arc<dyn FleetPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Validate the configuration and return a ready-to-run runner.
    ///
    /// Fails when `fleet_size` or `steps` is zero.
    pub fn build(self) -> EpisodeResult<EpisodeRunner> {
        self.config.validate()?;
        Ok(EpisodeRunner {
            source: self.source,
            config: self.config,
            env:    self.env,
            policy: self.policy,
        })
    }
}

// ── Free-function entry point ─────────────────────────────────────────────────

/// Inputs for [`run_episode`].
#[derive(Clone, Debug, Default)]
pub struct EpisodeOptions {
    pub scenario: ScenarioSource,
    pub config:   EpisodeConfig,
}

/// Run one [`TunedHeuristic`] episode with default environment settings.
///
/// Rejects parameters outside [`PARAM_BOUNDS`](ft_policy::PARAM_BOUNDS).
pub fn run_episode(params: &PolicyParams, options: &EpisodeOptions, rng: &mut SimRng) -> EpisodeResult<EpisodeMetrics> {
    params.validate()?;
    let runner = EpisodeRunnerBuilder::new()
        .scenario(options.scenario.clone())
        .config(options.config)
        .build()?;
    Ok(runner.run(params, rng))
}
